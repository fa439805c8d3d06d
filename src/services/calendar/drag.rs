use chrono::NaiveDate;

use crate::models::selection::SelectionEvent;

/// A pointer drag in progress over the month grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DragSession {
    pub anchor: NaiveDate,
    pub hovered: NaiveDate,
}

impl DragSession {
    pub fn new(anchor: NaiveDate) -> Self {
        Self {
            anchor,
            hovered: anchor,
        }
    }

    /// The policy event describing the current extent of the drag.
    pub fn as_event(&self) -> SelectionEvent {
        SelectionEvent::DragUpdate {
            anchor: self.anchor,
            hovered: self.hovered,
        }
    }

    /// Number of days covered, endpoints included.
    pub fn span_days(&self) -> i64 {
        (self.hovered - self.anchor).num_days().abs() + 1
    }
}

/// Holds at most one open [`DragSession`].
#[derive(Debug, Default)]
pub struct DragController {
    session: Option<DragSession>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a session anchored at `anchor`.
    ///
    /// An already open session is closed first and returned.
    pub fn begin(&mut self, anchor: NaiveDate) -> Option<DragSession> {
        let previous = self.session.replace(DragSession::new(anchor));
        if let Some(prev) = previous {
            log::debug!(
                "drag anchored at {} replaced by new drag at {}",
                prev.anchor,
                anchor
            );
        }
        previous
    }

    pub fn active(&self) -> Option<DragSession> {
        self.session
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Move the hovered end of the open session.
    ///
    /// Returns the drag-update event to apply, or `None` when no session is
    /// open or the pointer is still over the same day.
    pub fn update_hover(&mut self, date: NaiveDate) -> Option<SelectionEvent> {
        let session = self.session.as_mut()?;
        if session.hovered == date {
            return None;
        }
        session.hovered = date;
        Some(session.as_event())
    }

    /// Close the open session, if any.
    pub fn finish(&mut self) -> Option<DragSession> {
        self.session.take()
    }
}

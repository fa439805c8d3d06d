use chrono::NaiveDate;

use crate::models::selection::SelectionSet;

/// Receives the full selection, ascending, every time it is committed.
#[cfg_attr(test, mockall::automock)]
pub trait SelectionListener {
    fn on_selection(&mut self, dates: &[NaiveDate]);
}

impl<F> SelectionListener for F
where
    F: FnMut(&[NaiveDate]),
{
    fn on_selection(&mut self, dates: &[NaiveDate]) {
        self(dates)
    }
}

/// Handle returned by [`SelectionPublisher::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// Fans committed selections out to every subscriber, in subscription order.
#[derive(Default)]
pub struct SelectionPublisher {
    listeners: Vec<(SubscriptionId, Box<dyn SelectionListener>)>,
    next_id: u64,
    published: u64,
}

impl SelectionPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl SelectionListener + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false when the id was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    /// Number of notifications sent so far.
    pub fn published(&self) -> u64 {
        self.published
    }

    pub fn notify(&mut self, selection: &SelectionSet) {
        let dates = selection.to_vec();
        self.published += 1;
        log::debug!(
            "publishing {} selected date(s) to {} subscriber(s)",
            dates.len(),
            self.listeners.len()
        );
        for (_, listener) in self.listeners.iter_mut() {
            listener.on_selection(&dates);
        }
    }
}

impl std::fmt::Debug for SelectionPublisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionPublisher")
            .field("subscribers", &self.listeners.len())
            .field("published", &self.published)
            .finish()
    }
}

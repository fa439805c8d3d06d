use chrono::{Datelike, NaiveDate};

use crate::models::calendar::{CalendarCell, DayCell, NavigationCursor};
use crate::models::selection::{SelectionEvent, SelectionMode, SelectionSet};
use crate::models::settings::Settings;

use super::drag::{DragController, DragSession};
use super::grid::build_grid;
use super::policy;
use super::publisher::{SelectionListener, SelectionPublisher, SubscriptionId};

/// Calendar date picker state: displayed month, active mode, selection and
/// the drag session used by Range mode.
///
/// Every mutating call is applied completely before it returns, and every
/// committed change to the selection is pushed to the subscribers.
#[derive(Debug)]
pub struct CalendarEngine {
    cursor: NavigationCursor,
    mode: SelectionMode,
    selection: SelectionSet,
    drag: DragController,
    publisher: SelectionPublisher,
}

impl CalendarEngine {
    /// Engine showing `year`/`month` with nothing selected.
    pub fn new(year: i32, month: u32) -> Self {
        Self::with_selection(year, month, std::iter::empty())
    }

    /// Engine seeded with an initial selection.
    pub fn with_selection(
        year: i32,
        month: u32,
        initial: impl IntoIterator<Item = NaiveDate>,
    ) -> Self {
        Self {
            cursor: NavigationCursor::new(year, i32::try_from(month).unwrap_or(i32::MAX)),
            mode: SelectionMode::default(),
            selection: initial.into_iter().collect(),
            drag: DragController::new(),
            publisher: SelectionPublisher::new(),
        }
    }

    /// Engine configured from user settings.
    ///
    /// Opens on `today`'s month unless the settings ask to start on the
    /// first initially selected date.
    pub fn from_settings(settings: &Settings, today: NaiveDate) -> Self {
        let selection: SelectionSet = settings.initial_selection.iter().copied().collect();
        let opening = match (settings.start_on_today, selection.first()) {
            (false, Some(first)) => first,
            _ => today,
        };
        let mut engine = Self::with_selection(opening.year(), opening.month(), selection.iter());
        engine.mode = settings.default_mode;
        engine
    }

    // Navigation

    pub fn cursor(&self) -> NavigationCursor {
        self.cursor
    }

    pub fn prev_month(&mut self) {
        self.cursor = self.cursor.previous();
        log::debug!("navigated to {}-{:02}", self.cursor.year(), self.cursor.month());
    }

    pub fn next_month(&mut self) {
        self.cursor = self.cursor.next();
        log::debug!("navigated to {}-{:02}", self.cursor.year(), self.cursor.month());
    }

    pub fn go_to(&mut self, year: i32, month: u32) {
        self.cursor = NavigationCursor::new(year, i32::try_from(month).unwrap_or(i32::MAX));
    }

    pub fn go_to_date(&mut self, date: NaiveDate) {
        self.cursor = NavigationCursor::from_date(date);
    }

    // Mode

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Switch the selection mode. The selection is kept; an open drag is dropped.
    pub fn set_mode(&mut self, mode: SelectionMode) {
        if self.mode == mode {
            return;
        }
        if self.drag.finish().is_some() {
            log::debug!("drag abandoned by switch to {} mode", mode);
        }
        log::debug!("selection mode {} -> {}", self.mode, mode);
        self.mode = mode;
    }

    // Interaction

    /// Plain click on a day cell. Ignored while a drag is open.
    pub fn click(&mut self, date: NaiveDate) {
        if self.drag.is_active() {
            log::debug!("click on {} ignored during drag", date);
            return;
        }
        self.commit(SelectionEvent::Click(date));
    }

    /// Pointer pressed over a day cell. Starts a drag in Range mode only.
    pub fn pointer_down(&mut self, date: NaiveDate) {
        if !self.mode.uses_drag() {
            return;
        }
        self.drag.begin(date);
        self.commit(SelectionEvent::Click(date));
    }

    /// Pointer moved over a day cell; extends an open drag (live preview).
    pub fn pointer_enter(&mut self, date: NaiveDate) {
        if let Some(event) = self.drag.update_hover(date) {
            self.commit(event);
        }
    }

    /// Pointer released: closes an open drag and publishes the final range.
    pub fn pointer_up(&mut self) {
        self.end_drag();
    }

    /// Pointer left the grid: same as releasing it.
    pub fn pointer_leave(&mut self) {
        self.end_drag();
    }

    /// Empty the selection in any mode, dropping an open drag.
    pub fn clear(&mut self) {
        self.drag.finish();
        self.commit(SelectionEvent::Clear);
    }

    fn end_drag(&mut self) {
        if let Some(session) = self.drag.finish() {
            log::debug!(
                "drag from {} to {} finished ({} day(s))",
                session.anchor,
                session.hovered,
                session.span_days()
            );
            self.publisher.notify(&self.selection);
        }
    }

    fn commit(&mut self, event: SelectionEvent) {
        self.selection = policy::apply(&self.selection, self.mode, event, self.cursor);
        self.publisher.notify(&self.selection);
    }

    // Output

    pub fn subscribe(&mut self, listener: impl SelectionListener + 'static) -> SubscriptionId {
        self.publisher.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.publisher.unsubscribe(id)
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn selected_dates(&self) -> Vec<NaiveDate> {
        self.selection.to_vec()
    }

    pub fn is_selected(&self, date: NaiveDate) -> bool {
        self.selection.contains(date)
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }

    pub fn drag_session(&self) -> Option<DragSession> {
        self.drag.active()
    }

    /// Month grid of the displayed month.
    pub fn grid(&self) -> Vec<DayCell> {
        build_grid(self.cursor.year(), self.cursor.month())
    }

    /// Month grid decorated with selection and today markers.
    pub fn cells(&self, today: NaiveDate) -> Vec<CalendarCell> {
        self.grid()
            .into_iter()
            .map(|day| CalendarCell {
                day,
                selected: self.selection.contains(day.date),
                today: day.date == today,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn recording(engine: &mut CalendarEngine) -> Rc<RefCell<Vec<Vec<NaiveDate>>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        engine.subscribe(move |dates: &[NaiveDate]| sink.borrow_mut().push(dates.to_vec()));
        log
    }

    #[test]
    fn test_starts_in_single_mode_with_seed() {
        let engine = CalendarEngine::with_selection(2025, 1, [ymd(2025, 1, 3)]);
        assert_eq!(engine.mode(), SelectionMode::Single);
        assert!(engine.is_selected(ymd(2025, 1, 3)));
        assert!(!engine.is_dragging());
    }

    #[test]
    fn test_click_publishes_each_commit() {
        let mut engine = CalendarEngine::new(2025, 1);
        let log = recording(&mut engine);
        engine.set_mode(SelectionMode::Multiple);
        engine.click(ymd(2025, 1, 2));
        engine.click(ymd(2025, 1, 5));
        engine.click(ymd(2025, 1, 2));
        assert_eq!(
            *log.borrow(),
            vec![
                vec![ymd(2025, 1, 2)],
                vec![ymd(2025, 1, 2), ymd(2025, 1, 5)],
                vec![ymd(2025, 1, 5)],
            ]
        );
    }

    #[test]
    fn test_range_drag_crosses_month_boundary() {
        let mut engine = CalendarEngine::new(2025, 1);
        let log = recording(&mut engine);
        engine.set_mode(SelectionMode::Range);

        engine.pointer_down(ymd(2025, 1, 30));
        assert!(engine.is_dragging());
        engine.pointer_enter(ymd(2025, 2, 2));
        engine.pointer_up();

        let expected = vec![ymd(2025, 1, 30), ymd(2025, 1, 31), ymd(2025, 2, 1), ymd(2025, 2, 2)];
        assert_eq!(engine.selected_dates(), expected);
        assert!(!engine.is_dragging());
        // down, enter (live preview), up
        assert_eq!(log.borrow().len(), 3);
        assert_eq!(log.borrow().last(), Some(&expected));
    }

    #[test]
    fn test_drag_backwards_and_shrinking() {
        let mut engine = CalendarEngine::new(2025, 1);
        engine.set_mode(SelectionMode::Range);
        engine.pointer_down(ymd(2025, 1, 20));
        engine.pointer_enter(ymd(2025, 1, 10));
        assert_eq!(engine.selection().len(), 11);
        engine.pointer_enter(ymd(2025, 1, 18));
        assert_eq!(
            engine.selected_dates(),
            vec![ymd(2025, 1, 18), ymd(2025, 1, 19), ymd(2025, 1, 20)]
        );
        engine.pointer_leave();
        assert!(!engine.is_dragging());
        assert_eq!(engine.selection().len(), 3);
    }

    #[test]
    fn test_pointer_events_ignored_outside_range_mode() {
        let mut engine = CalendarEngine::new(2025, 1);
        let log = recording(&mut engine);
        engine.pointer_down(ymd(2025, 1, 5));
        engine.pointer_enter(ymd(2025, 1, 9));
        engine.pointer_up();
        assert!(engine.selection().is_empty());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_pointer_up_without_drag_is_noop() {
        let mut engine = CalendarEngine::with_selection(2025, 1, [ymd(2025, 1, 5)]);
        let log = recording(&mut engine);
        engine.set_mode(SelectionMode::Range);
        engine.pointer_up();
        engine.pointer_leave();
        engine.pointer_enter(ymd(2025, 1, 9));
        assert_eq!(engine.selected_dates(), vec![ymd(2025, 1, 5)]);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_click_ignored_during_drag() {
        let mut engine = CalendarEngine::new(2025, 1);
        engine.set_mode(SelectionMode::Range);
        engine.pointer_down(ymd(2025, 1, 5));
        engine.pointer_enter(ymd(2025, 1, 7));
        engine.click(ymd(2025, 1, 20));
        assert_eq!(engine.selection().len(), 3);
        engine.pointer_up();
        // The click a browser fires after mouseup lands on a closed session.
        engine.click(ymd(2025, 1, 7));
        assert_eq!(engine.selected_dates(), vec![ymd(2025, 1, 7)]);
    }

    #[test]
    fn test_second_pointer_down_restarts_drag() {
        let mut engine = CalendarEngine::new(2025, 1);
        engine.set_mode(SelectionMode::Range);
        engine.pointer_down(ymd(2025, 1, 5));
        engine.pointer_enter(ymd(2025, 1, 9));
        engine.pointer_down(ymd(2025, 1, 20));
        assert_eq!(engine.drag_session().map(|s| s.anchor), Some(ymd(2025, 1, 20)));
        assert_eq!(engine.selected_dates(), vec![ymd(2025, 1, 20)]);
        engine.pointer_enter(ymd(2025, 1, 21));
        assert_eq!(engine.selection().len(), 2);
    }

    #[test]
    fn test_mode_switch_keeps_selection_and_ends_drag() {
        let mut engine = CalendarEngine::new(2025, 1);
        let log = recording(&mut engine);
        engine.set_mode(SelectionMode::Range);
        engine.pointer_down(ymd(2025, 1, 5));
        engine.pointer_enter(ymd(2025, 1, 6));
        engine.set_mode(SelectionMode::Multiple);
        assert!(!engine.is_dragging());
        assert_eq!(engine.selection().len(), 2);
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn test_recurring_uses_displayed_month() {
        let mut engine = CalendarEngine::new(2025, 1);
        engine.set_mode(SelectionMode::Recurring);
        engine.click(ymd(2025, 1, 1));
        assert_eq!(
            engine.selected_dates(),
            vec![
                ymd(2025, 1, 1),
                ymd(2025, 1, 8),
                ymd(2025, 1, 15),
                ymd(2025, 1, 22),
                ymd(2025, 1, 29)
            ]
        );

        engine.next_month();
        engine.click(ymd(2025, 2, 5));
        // February Wednesdays are added; January ones are untouched.
        assert_eq!(engine.selection().len(), 9);
        engine.click(ymd(2025, 2, 12));
        assert_eq!(engine.selection().len(), 5);
    }

    #[test]
    fn test_navigation_at_largest_year() {
        let mut engine = CalendarEngine::with_selection(2025, 1, [ymd(2025, 1, 3)]);
        engine.go_to(i32::MAX, 12);
        engine.next_month();
        assert_eq!(engine.cursor(), NavigationCursor::new(i32::MAX, 1));
        assert!(engine.grid().is_empty());

        engine.set_mode(SelectionMode::Recurring);
        engine.click(ymd(2025, 1, 3));
        assert_eq!(engine.selected_dates(), vec![ymd(2025, 1, 3)]);
    }

    #[test]
    fn test_navigation_does_not_touch_selection() {
        let mut engine = CalendarEngine::with_selection(2025, 1, [ymd(2025, 1, 3)]);
        let log = recording(&mut engine);
        engine.prev_month();
        assert_eq!((engine.cursor().year(), engine.cursor().month()), (2024, 12));
        engine.next_month();
        engine.next_month();
        assert_eq!(engine.cursor(), NavigationCursor::new(2025, 2));
        engine.go_to(2026, 13);
        assert_eq!(engine.cursor(), NavigationCursor::new(2027, 1));
        engine.go_to_date(ymd(2025, 7, 14));
        assert_eq!(engine.cursor(), NavigationCursor::new(2025, 7));
        assert_eq!(engine.selected_dates(), vec![ymd(2025, 1, 3)]);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_clear_in_every_mode() {
        for mode in SelectionMode::ALL {
            let mut engine =
                CalendarEngine::with_selection(2025, 1, [ymd(2025, 1, 3), ymd(2025, 1, 4)]);
            let log = recording(&mut engine);
            engine.set_mode(mode);
            engine.pointer_down(ymd(2025, 1, 10));
            engine.clear();
            assert!(engine.selection().is_empty());
            assert!(!engine.is_dragging());
            assert_eq!(log.borrow().last(), Some(&Vec::new()));
        }
    }

    #[test]
    fn test_cells_mark_selection_and_today() {
        let engine = CalendarEngine::with_selection(2025, 1, [ymd(2025, 1, 8)]);
        let cells = engine.cells(ymd(2025, 1, 1));
        assert_eq!(cells.len(), 35);
        let selected: Vec<_> = cells.iter().filter(|c| c.selected).map(|c| c.day.date).collect();
        assert_eq!(selected, vec![ymd(2025, 1, 8)]);
        let today: Vec<_> = cells.iter().filter(|c| c.today).map(|c| c.day.date).collect();
        assert_eq!(today, vec![ymd(2025, 1, 1)]);
    }

    #[test]
    fn test_from_settings() {
        let settings = Settings {
            default_mode: SelectionMode::Recurring,
            start_on_today: false,
            initial_selection: vec![ymd(2025, 3, 4), ymd(2025, 3, 11)],
            ..Settings::default()
        };
        let engine = CalendarEngine::from_settings(&settings, ymd(2026, 10, 19));
        assert_eq!(engine.mode(), SelectionMode::Recurring);
        assert_eq!(engine.cursor(), NavigationCursor::new(2025, 3));
        assert_eq!(engine.selection().len(), 2);

        let engine = CalendarEngine::from_settings(&Settings::default(), ymd(2026, 10, 19));
        assert_eq!(engine.cursor(), NavigationCursor::new(2026, 10));
        assert!(engine.selection().is_empty());
    }
}

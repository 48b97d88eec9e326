//! Clip-and-sum semantics of the aggregation engine.
//!
//! The reports run the same predicate in SQL (`db::reports`); this module is
//! the in-memory form used when the intervals are already loaded.
//!
//! ```text
//!   window:            [start_ts ............ end_ts)
//!   item:        [start ........ eff_end]
//!   contribution:      [max(start, start_ts) .. min(eff_end, end_ts)]
//! ```

use crate::models::report::ReportWindow;
use crate::models::work_item::WorkItem;
use std::collections::BTreeMap;

/// A report window bound to an evaluation instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipWindow {
    pub start_ts: i64,
    pub end_ts: i64,
    pub now_ts: i64,
}

impl ClipWindow {
    pub fn new(window: ReportWindow, now_ts: i64) -> Self {
        Self {
            start_ts: window.start_ts,
            end_ts: window.end_ts,
            now_ts,
        }
    }

    fn bounds(&self, item: &WorkItem) -> (i64, i64) {
        let eff_end = item.effective_end(self.now_ts);
        (
            item.start_timestamp.max(self.start_ts),
            eff_end.min(self.end_ts),
        )
    }

    /// Whether the item overlaps the window by a positive amount.
    ///
    /// Starts are inclusive at `start_ts`, effective ends inclusive at
    /// `end_ts`: an item ending exactly at `start_ts` does not participate.
    pub fn participates(&self, item: &WorkItem) -> bool {
        let start = item.start_timestamp;
        let eff_end = item.effective_end(self.now_ts);

        let starts_inside = start >= self.start_ts && start < self.end_ts;
        let ends_inside = eff_end > self.start_ts && eff_end <= self.end_ts;
        let spans = start < self.start_ts && eff_end > self.end_ts;

        let (from, to) = self.bounds(item);
        (starts_inside || ends_inside || spans) && to > from
    }

    /// Seconds of `item` inside the window (0 when it does not participate).
    pub fn clipped_seconds(&self, item: &WorkItem) -> i64 {
        if !self.participates(item) {
            return 0;
        }
        let (from, to) = self.bounds(item);
        to - from
    }

    /// Total clipped seconds over a set of items.
    pub fn total<'a>(&self, items: impl IntoIterator<Item = &'a WorkItem>) -> i64 {
        items
            .into_iter()
            .filter(|item| self.participates(item))
            .map(|item| self.clipped_seconds(item))
            .sum()
    }

    /// Clipped seconds grouped by task id, ordered by task id.
    ///
    /// Same grouping as `db::reports::report_by_task`; the integration tests
    /// use it to cross-check the SQL against these rules.
    pub fn by_task<'a>(&self, items: impl IntoIterator<Item = &'a WorkItem>) -> BTreeMap<i64, i64> {
        let mut out = BTreeMap::new();
        for item in items.into_iter().filter(|item| self.participates(item)) {
            *out.entry(item.task_id).or_insert(0) += self.clipped_seconds(item);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const H: i64 = 3600;

    fn item(id: i64, task_id: i64, start: i64, end: Option<i64>) -> WorkItem {
        WorkItem {
            id,
            task_id,
            start_timestamp: start,
            end_timestamp: end,
        }
    }

    fn window(start: i64, end: i64, now: i64) -> ClipWindow {
        ClipWindow::new(ReportWindow::new(start, end), now)
    }

    #[test]
    fn item_inside_counts_fully() {
        let w = window(0, 24 * H, 30 * H);
        assert_eq!(w.clipped_seconds(&item(1, 1, H, Some(3 * H))), 2 * H);
    }

    #[test]
    fn item_before_window_is_skipped() {
        let w = window(0, 24 * H, 30 * H);
        let before = item(1, 1, -4 * H, Some(-2 * H));
        assert!(!w.participates(&before));
        assert_eq!(w.clipped_seconds(&before), 0);
    }

    #[test]
    fn item_ending_exactly_at_window_start_is_skipped() {
        let w = window(10 * H, 20 * H, 30 * H);
        let touching = item(1, 1, 8 * H, Some(10 * H));
        assert!(!w.participates(&touching));
    }

    #[test]
    fn item_starting_exactly_at_window_end_is_skipped() {
        let w = window(10 * H, 20 * H, 30 * H);
        assert!(!w.participates(&item(1, 1, 20 * H, Some(21 * H))));
    }

    #[test]
    fn partial_overlaps_are_clipped() {
        let w = window(10 * H, 20 * H, 30 * H);
        assert_eq!(w.clipped_seconds(&item(1, 1, 8 * H, Some(12 * H))), 2 * H);
        assert_eq!(w.clipped_seconds(&item(2, 1, 19 * H, Some(25 * H))), H);
        assert_eq!(w.clipped_seconds(&item(3, 1, 5 * H, Some(25 * H))), 10 * H);
    }

    #[test]
    fn open_item_clips_to_now_before_window_end() {
        let w = window(0, 24 * H, 6 * H);
        assert_eq!(w.clipped_seconds(&item(1, 1, 2 * H, None)), 4 * H);
    }

    #[test]
    fn open_item_clips_to_window_end_after_now() {
        let w = window(0, 24 * H, 25 * H);
        assert_eq!(w.clipped_seconds(&item(1, 1, 23 * H, None)), H);
        // started before the window and still running after it
        assert_eq!(w.clipped_seconds(&item(2, 1, -H, None)), 24 * H);
    }

    #[test]
    fn zero_width_window_is_empty() {
        let w = window(5 * H, 5 * H, 30 * H);
        let items = [item(1, 1, 0, Some(10 * H)), item(2, 1, 5 * H, Some(6 * H))];
        assert!(items.iter().all(|i| !w.participates(i)));
        assert_eq!(w.total(&items), 0);
        assert!(w.by_task(&items).is_empty());
    }

    #[test]
    fn open_item_starting_after_now_contributes_nothing() {
        let w = window(0, 24 * H, 2 * H);
        assert_eq!(w.clipped_seconds(&item(1, 1, 3 * H, None)), 0);
    }

    #[test]
    fn grouping_by_task_matches_total() {
        let w = window(0, 24 * H, 25 * H);
        let items = [
            item(1, 2, H, Some(3 * H)),
            item(2, 1, 4 * H, Some(5 * H)),
            item(3, 2, 23 * H, None),
            item(4, 1, -3 * H, Some(-H)),
        ];
        let grouped = w.by_task(&items);
        assert_eq!(grouped.keys().copied().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(grouped[&1], H);
        assert_eq!(grouped[&2], 3 * H);
        assert_eq!(grouped.values().sum::<i64>(), w.total(&items));
    }
}

//! Write-time rules for work item ranges.
//!
//! Unlike reporting (half-open windows), validation compares closed ranges:
//! two items sharing an endpoint conflict, so no instant is booked twice.

use crate::db::work_items::load_work_items_touching;
use crate::errors::{AppError, AppResult};
use crate::models::work_item::WorkItem;
use rusqlite::Connection;

/// A range about to be written. `excluded_id` is the item's own id on
/// update (it must not conflict with itself) and `None` on create.
#[derive(Debug, Clone, Copy)]
pub struct RangeCandidate {
    pub start: i64,
    pub end: Option<i64>,
    pub excluded_id: Option<i64>,
}

impl RangeCandidate {
    pub fn for_create(start: i64, end: Option<i64>) -> Self {
        Self {
            start,
            end,
            excluded_id: None,
        }
    }

    pub fn for_update(id: i64, start: i64, end: Option<i64>) -> Self {
        Self {
            start,
            end,
            excluded_id: Some(id),
        }
    }

    pub fn check_order(&self) -> AppResult<()> {
        match self.end {
            Some(end) if self.start >= end => Err(AppError::RangeOrder {
                start: self.start,
                end,
            }),
            _ => Ok(()),
        }
    }

    /// Whether `other` conflicts with this candidate. Missing ends count as
    /// +infinity on both sides.
    ///
    /// Shared endpoints conflict, except that an open candidate may start
    /// exactly where a closed item ends (stop, then start again in the same
    /// second).
    pub fn conflicts_with(&self, other: &WorkItem) -> bool {
        if Some(other.id) == self.excluded_id {
            return false;
        }
        // an open item may resume at the instant a closed one ended
        if self.end.is_none() && other.end_timestamp == Some(self.start) {
            return false;
        }

        let other_end = other.end_timestamp.unwrap_or(i64::MAX);
        let cand_end = self.end.unwrap_or(i64::MAX);

        // other covers the candidate's start
        let covers_start = other.start_timestamp <= self.start && other_end >= self.start;
        // other covers the candidate's end
        let covers_end = self.end.is_some()
            && other.start_timestamp <= cand_end
            && other_end >= cand_end;
        // two open items can never coexist
        let both_open = self.end.is_none() && other.end_timestamp.is_none();
        // candidate swallows other
        let contains_other = self.start <= other.start_timestamp && cand_end >= other.start_timestamp;

        covers_start || covers_end || both_open || contains_other
    }

    /// Run both rules against the store: order first, then overlap.
    pub fn validate(&self, conn: &Connection) -> AppResult<()> {
        self.check_order()?;

        let nearby = load_work_items_touching(conn, self.start, self.end, self.excluded_id)?;
        if let Some(hit) = nearby.iter().find(|other| self.conflicts_with(other)) {
            return Err(AppError::Overlap { id: hit.id });
        }
        Ok(())
    }
}

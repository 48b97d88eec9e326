use serde::Serialize;

/// A timed work interval owned by a task.
///
/// Timestamps are UTC seconds since the epoch. `end_timestamp == None`
/// marks the single open ("current") interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkItem {
    pub id: i64,
    pub task_id: i64,          // ⇔ work_items.task_id (NOT NULL, FK tasks.id)
    pub start_timestamp: i64,  // ⇔ work_items.start_timestamp
    pub end_timestamp: Option<i64>, // ⇔ work_items.end_timestamp (NULL = open)
}

impl WorkItem {
    pub fn is_open(&self) -> bool {
        self.end_timestamp.is_none()
    }

    /// End used for duration purposes: an open interval runs through `now_ts`.
    pub fn effective_end(&self, now_ts: i64) -> i64 {
        self.end_timestamp.unwrap_or(now_ts)
    }

    /// Unclipped duration in seconds, measured up to `now_ts` when open.
    pub fn duration(&self, now_ts: i64) -> i64 {
        (self.effective_end(now_ts) - self.start_timestamp).max(0)
    }
}

/// Fields accepted by an explicit update; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct WorkItemPatch {
    pub task_id: Option<i64>,
    pub start_timestamp: Option<i64>,
    pub end_timestamp: Option<i64>,
}

impl WorkItemPatch {
    pub fn is_empty(&self) -> bool {
        self.task_id.is_none() && self.start_timestamp.is_none() && self.end_timestamp.is_none()
    }

    /// Merge the patch on top of a stored item.
    pub fn apply_to(&self, item: &WorkItem) -> WorkItem {
        WorkItem {
            id: item.id,
            task_id: self.task_id.unwrap_or(item.task_id),
            start_timestamp: self.start_timestamp.unwrap_or(item.start_timestamp),
            end_timestamp: self.end_timestamp.or(item.end_timestamp),
        }
    }
}

/// Listing order for work items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum WorkItemOrder {
    #[default]
    Start,
    StartDesc,
    Id,
}

impl WorkItemOrder {
    pub fn to_sql(self) -> &'static str {
        match self {
            WorkItemOrder::Start => "start_timestamp ASC, id ASC",
            WorkItemOrder::StartDesc => "start_timestamp DESC, id DESC",
            WorkItemOrder::Id => "id ASC",
        }
    }
}

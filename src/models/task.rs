use serde::Serialize;

/// Task read model, decorated with its category name and the derived
/// `is_current` flag (true iff the task owns the open work item).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    pub id: i64,
    pub name: String,
    pub category_id: i64,
    pub category_name: String,
    pub is_archived: bool,
    pub is_current: bool,
}

/// Fields accepted by a task update; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub name: Option<String>,
    pub category_id: Option<i64>,
    pub is_archived: Option<bool>,
}

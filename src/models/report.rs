//! Report rows produced by the aggregation engine and the window they cover.

use serde::{Serialize, Serializer};

/// Durations are stored as whole seconds and exposed as a floating `time`.
fn seconds_as_time<S: Serializer>(seconds: &i64, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(*seconds as f64)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTime {
    pub category_id: i64,
    pub category_name: String,
    #[serde(rename = "time", serialize_with = "seconds_as_time")]
    pub seconds: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskTime {
    pub task_id: i64,
    pub task_name: String,
    pub category_id: i64,
    pub category_name: String,
    #[serde(rename = "time", serialize_with = "seconds_as_time")]
    pub seconds: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TotalTime {
    #[serde(rename = "time", serialize_with = "seconds_as_time")]
    pub seconds: i64,
}

/// Reporting window in timestamp space: `[start_ts, end_ts)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportWindow {
    pub start_ts: i64,
    pub end_ts: i64,
}

impl ReportWindow {
    pub fn new(start_ts: i64, end_ts: i64) -> Self {
        Self { start_ts, end_ts }
    }

    pub fn width(&self) -> i64 {
        self.end_ts - self.start_ts
    }
}

/// Optional narrowing of the intervals considered by a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportFilter {
    pub category_id: Option<i64>,
    pub task_id: Option<i64>,
}

/// Which aggregation a report command asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportKind {
    Category,
    Task,
    Total,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_serialize_time_as_float_seconds() {
        let row = CategoryTime {
            category_id: 1,
            category_name: "Dev".into(),
            seconds: 7200,
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["time"], serde_json::json!(7200.0));
        assert_eq!(json["category_name"], "Dev");
        assert!(json.get("seconds").is_none());

        let total = serde_json::to_string(&TotalTime { seconds: 0 }).unwrap();
        assert_eq!(total, r#"{"time":0.0}"#);
    }
}

//! Reporting façade: resolves the window, binds "now" and runs the
//! aggregation queries.

use crate::core::aggregation::ClipWindow;
use crate::core::clock::Clock;
use crate::db::pool::DbPool;
use crate::db::reports;
use crate::errors::{AppError, AppResult};
use crate::models::report::{CategoryTime, ReportFilter, ReportWindow, TaskTime, TotalTime};
use crate::utils::time::{naive_to_ts, to_dt};
use chrono::{Datelike, Months, NaiveDate};

/// Default first day of the reporting period (21st → 20th).
pub const DEFAULT_PERIOD_START_DAY: u32 = 21;

pub struct ReportLogic;

impl ReportLogic {
    pub fn by_category(
        pool: &DbPool,
        clock: &dyn Clock,
        window: ReportWindow,
        filter: &ReportFilter,
    ) -> AppResult<Vec<CategoryTime>> {
        let clip = ClipWindow::new(window, clock.now_ts());
        reports::report_by_category(&pool.conn, &clip, filter)
    }

    pub fn by_task(
        pool: &DbPool,
        clock: &dyn Clock,
        window: ReportWindow,
        filter: &ReportFilter,
    ) -> AppResult<Vec<TaskTime>> {
        let clip = ClipWindow::new(window, clock.now_ts());
        reports::report_by_task(&pool.conn, &clip, filter)
    }

    pub fn total(
        pool: &DbPool,
        clock: &dyn Clock,
        window: ReportWindow,
        filter: &ReportFilter,
    ) -> AppResult<TotalTime> {
        let clip = ClipWindow::new(window, clock.now_ts());
        reports::report_total(&pool.conn, &clip, filter)
    }

    /// Previous period: day `start_day` of last month 00:00:00 up to day
    /// `start_day - 1` of the current month 23:59:59 (local time).
    ///
    /// Month arithmetic goes through chrono, so January reaches back into
    /// December of the previous year.
    pub fn default_window(today: NaiveDate, start_day: u32) -> AppResult<ReportWindow> {
        if !(2..=28).contains(&start_day) {
            return Err(AppError::InvalidWindow(format!(
                "period start day must be between 2 and 28, got {start_day}"
            )));
        }

        let invalid = || AppError::InvalidDate(format!("no default period for {today}"));

        let start = NaiveDate::from_ymd_opt(today.year(), today.month(), start_day)
            .and_then(|d| d.checked_sub_months(Months::new(1)))
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .ok_or_else(invalid)?;
        let end = NaiveDate::from_ymd_opt(today.year(), today.month(), start_day - 1)
            .and_then(|d| d.and_hms_opt(23, 59, 59))
            .ok_or_else(invalid)?;

        Ok(ReportWindow::new(naive_to_ts(start)?, naive_to_ts(end)?))
    }

    /// `[today 00:00, tomorrow 00:00)` in local time.
    pub fn today_window(clock: &dyn Clock) -> AppResult<ReportWindow> {
        let today = to_dt(clock.now_ts())?.date_naive();
        let invalid = || AppError::InvalidDate(format!("no day window for {today}"));

        let start = today.and_hms_opt(0, 0, 0).ok_or_else(invalid)?;
        let end = today
            .succ_opt()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .ok_or_else(invalid)?;

        Ok(ReportWindow::new(naive_to_ts(start)?, naive_to_ts(end)?))
    }

    /// Both bounds or neither; neither falls back to the default period.
    pub fn resolve_window(
        start: Option<i64>,
        end: Option<i64>,
        clock: &dyn Clock,
        start_day: u32,
    ) -> AppResult<ReportWindow> {
        match (start, end) {
            (Some(start), Some(end)) => {
                let window = ReportWindow::new(start, end);
                if window.width() < 0 {
                    return Err(AppError::InvalidWindow(format!(
                        "start {start} is after end {end}"
                    )));
                }
                Ok(window)
            }
            (None, None) => {
                let today = to_dt(clock.now_ts())?.date_naive();
                Self::default_window(today, start_day)
            }
            _ => Err(AppError::InvalidWindow(
                "start and end must be given together".into(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::FixedClock;
    use chrono::{Local, NaiveDateTime, TimeZone};

    fn local_ts(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> i64 {
        let naive: NaiveDateTime = NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap();
        Local.from_local_datetime(&naive).earliest().unwrap().timestamp()
    }

    #[test]
    fn default_window_runs_21st_to_20th() {
        let today = NaiveDate::from_ymd_opt(2023, 4, 5).unwrap();
        let w = ReportLogic::default_window(today, DEFAULT_PERIOD_START_DAY).unwrap();
        assert_eq!(w.start_ts, local_ts(2023, 3, 21, 0, 0, 0));
        assert_eq!(w.end_ts, local_ts(2023, 4, 20, 23, 59, 59));
    }

    #[test]
    fn default_window_rolls_back_over_new_year() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 28).unwrap();
        let w = ReportLogic::default_window(today, DEFAULT_PERIOD_START_DAY).unwrap();
        assert_eq!(w.start_ts, local_ts(2023, 12, 21, 0, 0, 0));
        assert_eq!(w.end_ts, local_ts(2024, 1, 20, 23, 59, 59));
    }

    #[test]
    fn default_window_honours_configured_start_day() {
        let today = NaiveDate::from_ymd_opt(2023, 3, 1).unwrap();
        let w = ReportLogic::default_window(today, 2).unwrap();
        assert_eq!(w.start_ts, local_ts(2023, 2, 2, 0, 0, 0));
        assert_eq!(w.end_ts, local_ts(2023, 3, 1, 23, 59, 59));
        assert!(ReportLogic::default_window(today, 1).is_err());
        assert!(ReportLogic::default_window(today, 29).is_err());
    }

    #[test]
    fn window_bounds_come_in_pairs() {
        let clock = FixedClock(1_700_000_000);
        assert_eq!(
            ReportLogic::resolve_window(Some(10), Some(20), &clock, 21).unwrap(),
            ReportWindow::new(10, 20)
        );
        assert!(matches!(
            ReportLogic::resolve_window(Some(10), None, &clock, 21),
            Err(AppError::InvalidWindow(_))
        ));
        assert!(matches!(
            ReportLogic::resolve_window(None, Some(10), &clock, 21),
            Err(AppError::InvalidWindow(_))
        ));
        assert!(matches!(
            ReportLogic::resolve_window(Some(30), Some(20), &clock, 21),
            Err(AppError::InvalidWindow(_))
        ));
        // zero width is allowed and simply reports nothing
        assert_eq!(
            ReportLogic::resolve_window(Some(20), Some(20), &clock, 21).unwrap().width(),
            0
        );
        assert!(ReportLogic::resolve_window(None, None, &clock, 21).is_ok());
    }

    #[test]
    fn today_window_contains_now() {
        let now = local_ts(2023, 6, 10, 14, 30, 0);
        let w = ReportLogic::today_window(&FixedClock(now)).unwrap();
        assert_eq!(w.start_ts, local_ts(2023, 6, 10, 0, 0, 0));
        assert_eq!(w.end_ts, local_ts(2023, 6, 11, 0, 0, 0));
        assert!(w.start_ts <= now && now < w.end_ts);
    }
}

use crate::cli::commands::open_db;
use crate::cli::parser::OutputFormat;
use crate::config::Config;
use crate::core::clock::Clock;
use crate::core::report::ReportLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::report::{
    CategoryTime, ReportFilter, ReportKind, ReportWindow, TaskTime, TotalTime,
};
use crate::ui::messages::success;
use crate::utils::formatting::{secs2days, secs2readable};
use crate::utils::table::{Column, Table};
use crate::utils::time::{format_ts, parse_optional_datetime};
use serde::Serialize;
use std::fs;
use std::io::{self, Write};

/// Arguments of the `report` command, as parsed from the CLI.
pub struct ReportArgs<'a> {
    pub kind: ReportKind,
    pub start: Option<&'a String>,
    pub end: Option<&'a String>,
    pub today: bool,
    pub filter: ReportFilter,
    pub format: OutputFormat,
    pub file: Option<&'a str>,
}

fn write_json<T: Serialize>(out: &mut dyn Write, rows: &T) -> AppResult<()> {
    serde_json::to_writer_pretty(&mut *out, rows)?;
    writeln!(out)?;
    Ok(())
}

fn write_csv<T: Serialize>(out: &mut dyn Write, rows: &[T]) -> AppResult<()> {
    let mut wtr = csv::Writer::from_writer(out);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

fn window_title(kind: ReportKind, window: &ReportWindow) -> String {
    let what = match kind {
        ReportKind::Category => "Time per category",
        ReportKind::Task => "Time per task",
        ReportKind::Total => "Total time",
    };
    format!(
        "{what}: {} → {}",
        format_ts(window.start_ts),
        format_ts(window.end_ts)
    )
}

fn duration_cells(seconds: i64, hours_per_day: u32) -> [String; 2] {
    [
        secs2readable(seconds),
        format!("{:.2}", secs2days(seconds, hours_per_day)),
    ]
}

/// Rows of one report, fetched before any output is produced.
enum ReportRows {
    Category(Vec<CategoryTime>),
    Task(Vec<TaskTime>),
    Total(TotalTime),
}

fn render(
    rows: &ReportRows,
    format: OutputFormat,
    window: &ReportWindow,
    hpd: u32,
) -> AppResult<Vec<u8>> {
    let mut out = Vec::new();

    match rows {
        ReportRows::Category(rows) => match format {
            OutputFormat::Json => write_json(&mut out, rows)?,
            OutputFormat::Csv => write_csv(&mut out, rows)?,
            OutputFormat::Table => {
                let mut table = Table::new(vec![
                    Column::right("ID"),
                    Column::left("Category"),
                    Column::right("Time"),
                    Column::right("Days"),
                ]);
                for r in rows {
                    let [time, days] = duration_cells(r.seconds, hpd);
                    table.add_row(vec![r.category_id.to_string(), r.category_name.clone(), time, days]);
                }
                let total: i64 = rows.iter().map(|r| r.seconds).sum();
                let [time, days] = duration_cells(total, hpd);
                table.add_row(vec![String::new(), "Total".into(), time, days]);
                writeln!(out, "{}\n", window_title(ReportKind::Category, window))?;
                write!(out, "{}", table.render())?;
            }
        },

        ReportRows::Task(rows) => match format {
            OutputFormat::Json => write_json(&mut out, rows)?,
            OutputFormat::Csv => write_csv(&mut out, rows)?,
            OutputFormat::Table => {
                let mut table = Table::new(vec![
                    Column::right("ID"),
                    Column::left("Task"),
                    Column::left("Category"),
                    Column::right("Time"),
                    Column::right("Days"),
                ]);
                for r in rows {
                    let [time, days] = duration_cells(r.seconds, hpd);
                    table.add_row(vec![
                        r.task_id.to_string(),
                        r.task_name.clone(),
                        r.category_name.clone(),
                        time,
                        days,
                    ]);
                }
                let total: i64 = rows.iter().map(|r| r.seconds).sum();
                let [time, days] = duration_cells(total, hpd);
                table.add_row(vec![String::new(), "Total".into(), String::new(), time, days]);
                writeln!(out, "{}\n", window_title(ReportKind::Task, window))?;
                write!(out, "{}", table.render())?;
            }
        },

        ReportRows::Total(total) => match format {
            OutputFormat::Json => write_json(&mut out, total)?,
            OutputFormat::Csv => write_csv(&mut out, std::slice::from_ref(total))?,
            OutputFormat::Table => {
                let [time, days] = duration_cells(total.seconds, hpd);
                writeln!(out, "{}\n", window_title(ReportKind::Total, window))?;
                writeln!(out, "{time} ({days} days of {hpd}h)")?;
            }
        },
    }

    Ok(out)
}

pub fn handle(args: &ReportArgs, cfg: &Config, clock: &dyn Clock) -> AppResult<()> {
    let pool = open_db(cfg)?;
    write_report(&pool, args, cfg, clock)
}

/// Run the report and write it out. The destination file is only created
/// once the whole report has been rendered, so a failed query leaves an
/// existing file untouched.
fn write_report(
    pool: &DbPool,
    args: &ReportArgs,
    cfg: &Config,
    clock: &dyn Clock,
) -> AppResult<()> {
    let window = if args.today {
        ReportLogic::today_window(clock)?
    } else {
        ReportLogic::resolve_window(
            parse_optional_datetime(args.start)?,
            parse_optional_datetime(args.end)?,
            clock,
            cfg.report_start_day,
        )?
    };

    let rows = match args.kind {
        ReportKind::Category => {
            ReportRows::Category(ReportLogic::by_category(pool, clock, window, &args.filter)?)
        }
        ReportKind::Task => ReportRows::Task(ReportLogic::by_task(pool, clock, window, &args.filter)?),
        ReportKind::Total => ReportRows::Total(ReportLogic::total(pool, clock, window, &args.filter)?),
    };
    let rendered = render(&rows, args.format, &window, cfg.hours_per_day)?;

    match args.file {
        Some(path) => {
            fs::write(path, &rendered)?;
            success(format!("Report written to {path}"));
        }
        None => {
            let mut out = io::stdout().lock();
            out.write_all(&rendered)?;
            out.flush()?;
        }
    }
    Ok(())
}

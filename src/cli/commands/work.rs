use crate::cli::commands::open_db;
use crate::cli::parser::WorkAction;
use crate::config::Config;
use crate::core::clock::Clock;
use crate::core::work::WorkLogic;
use crate::errors::AppResult;
use crate::models::work_item::{WorkItem, WorkItemPatch};
use crate::ui::messages::{header, info, success};
use crate::utils::formatting::secs2readable;
use crate::utils::table::{Column, Table};
use crate::utils::time::{format_ts, parse_datetime, parse_optional_datetime};

fn describe(item: &WorkItem, now: i64) -> String {
    match item.end_timestamp {
        Some(end) => format!(
            "#{} task #{}: {} → {} ({})",
            item.id,
            item.task_id,
            format_ts(item.start_timestamp),
            format_ts(end),
            secs2readable(item.duration(now))
        ),
        None => format!(
            "#{} task #{}: running since {} ({})",
            item.id,
            item.task_id,
            format_ts(item.start_timestamp),
            secs2readable(item.duration(now))
        ),
    }
}

pub fn handle(action: &WorkAction, cfg: &Config, clock: &dyn Clock) -> AppResult<()> {
    let mut pool = open_db(cfg)?;
    let now = clock.now_ts();

    match action {
        WorkAction::Start { task_id, at } => {
            let start = parse_optional_datetime(at.as_ref())?;
            let item = WorkLogic::start_work(&mut pool, clock, *task_id, start)?;
            success(format!("Started {}", describe(&item, now)));
        }

        WorkAction::Stop => {
            let item = WorkLogic::stop_current(&mut pool, clock)?;
            success(format!("Stopped {}", describe(&item, now)));
        }

        WorkAction::Current => match WorkLogic::current(&pool)? {
            Some(item) => println!("{}", describe(&item, now)),
            None => info("No work is running."),
        },

        WorkAction::Add {
            task_id,
            start,
            end,
        } => {
            let start = parse_datetime(start)?;
            let end = parse_optional_datetime(end.as_ref())?;
            let item = WorkLogic::create(&mut pool, *task_id, start, end)?;
            success(format!("Recorded {}", describe(&item, now)));
        }

        WorkAction::Edit {
            id,
            task,
            start,
            end,
        } => {
            let patch = WorkItemPatch {
                task_id: *task,
                start_timestamp: parse_optional_datetime(start.as_ref())?,
                end_timestamp: parse_optional_datetime(end.as_ref())?,
            };
            if patch.is_empty() {
                info("Nothing to change: use --task, --start or --end.");
                return Ok(());
            }
            let item = WorkLogic::update(&mut pool, *id, &patch)?;
            success(format!("Updated {}", describe(&item, now)));
        }

        WorkAction::Del { id } => {
            WorkLogic::delete(&mut pool, *id)?;
            success(format!("Work item #{id} deleted."));
        }

        WorkAction::Show { id } => {
            let item = WorkLogic::read(&pool, *id)?;
            println!("{}", describe(&item, now));
        }

        WorkAction::List { page, size, order } => {
            let page = WorkLogic::list(&pool, *order, *page, *size)?;
            if page.total == 0 {
                info("No work recorded yet.");
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::right("ID"),
                Column::right("Task"),
                Column::left("Start"),
                Column::left("End"),
                Column::right("Duration"),
            ]);
            for item in &page.items {
                table.add_row(vec![
                    item.id.to_string(),
                    item.task_id.to_string(),
                    format_ts(item.start_timestamp),
                    item.end_timestamp.map(format_ts).unwrap_or_else(|| "running".into()),
                    secs2readable(item.duration(now)),
                ]);
            }
            header(format!(
                "Work items (page {}/{}, {} total)",
                page.page, page.pages, page.total
            ));
            print!("{}", table.render());
        }
    }

    Ok(())
}

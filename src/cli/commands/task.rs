use crate::cli::commands::open_db;
use crate::cli::parser::TaskAction;
use crate::config::Config;
use crate::core::aggregation::ClipWindow;
use crate::core::clock::Clock;
use crate::core::report::ReportLogic;
use crate::core::task::TaskLogic;
use crate::core::work::WorkLogic;
use crate::errors::AppResult;
use crate::models::task::TaskPatch;
use crate::ui::messages::{header, info, success};
use crate::utils::formatting::{secs2readable, yes_no};
use crate::utils::table::{Column, Table};
use crate::utils::time::format_ts;

pub fn handle(action: &TaskAction, cfg: &Config, clock: &dyn Clock) -> AppResult<()> {
    let mut pool = open_db(cfg)?;

    match action {
        TaskAction::Add { name, category } => {
            let t = TaskLogic::create(&mut pool, name, *category)?;
            success(format!(
                "Task #{} '{}' created in category '{}'.",
                t.id, t.name, t.category_name
            ));
        }

        TaskAction::List { archived, active } => {
            let filter = match (*archived, *active) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            let tasks = TaskLogic::list(&pool, filter)?;
            if tasks.is_empty() {
                info("No tasks found.");
                return Ok(());
            }

            let mut table = Table::new(vec![
                Column::right("ID"),
                Column::left("Task"),
                Column::left("Category"),
                Column::left("Archived"),
                Column::left("Running"),
            ]);
            for t in tasks {
                table.add_row(vec![
                    t.id.to_string(),
                    t.name,
                    t.category_name,
                    yes_no(t.is_archived).into(),
                    yes_no(t.is_current).into(),
                ]);
            }
            header("Tasks");
            print!("{}", table.render());
        }

        TaskAction::Show { id } => {
            let t = TaskLogic::read(&pool, *id)?;
            let items = WorkLogic::for_task(&pool, *id)?;
            let now = clock.now_ts();

            header(format!("Task #{} {} ({})", t.id, t.name, t.category_name));
            println!("Archived : {}", yes_no(t.is_archived));
            println!("Running  : {}", yes_no(t.is_current));

            let recorded: i64 = items.iter().map(|i| i.duration(now)).sum();
            let period = ReportLogic::resolve_window(None, None, clock, cfg.report_start_day)?;
            let in_period = ClipWindow::new(period, now).total(&items);
            println!("Recorded : {}", secs2readable(recorded));
            println!(
                "Period   : {} ({} → {})\n",
                secs2readable(in_period),
                format_ts(period.start_ts),
                format_ts(period.end_ts)
            );

            let mut table = Table::new(vec![
                Column::right("ID"),
                Column::left("Start"),
                Column::left("End"),
                Column::right("Duration"),
            ]);
            for item in &items {
                table.add_row(vec![
                    item.id.to_string(),
                    format_ts(item.start_timestamp),
                    item.end_timestamp.map(format_ts).unwrap_or_else(|| "running".into()),
                    secs2readable(item.duration(now)),
                ]);
            }
            if !table.is_empty() {
                print!("{}", table.render());
            }
        }

        TaskAction::Edit {
            id,
            name,
            category,
            archive,
            unarchive,
        } => {
            let patch = TaskPatch {
                name: name.clone(),
                category_id: *category,
                is_archived: match (*archive, *unarchive) {
                    (true, _) => Some(true),
                    (_, true) => Some(false),
                    _ => None,
                },
            };
            let t = TaskLogic::update(&mut pool, *id, &patch)?;
            success(format!(
                "Task #{} updated: '{}' in '{}'{}.",
                t.id,
                t.name,
                t.category_name,
                if t.is_archived { ", archived" } else { "" }
            ));
        }

        TaskAction::Del { id } => {
            TaskLogic::delete(&mut pool, *id)?;
            success(format!("Task #{id} deleted with its work."));
        }
    }

    Ok(())
}

use crate::db::log::load_log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{header, info};
use crate::utils::formatting::truncate;
use ansi_term::Colour;
use unicode_width::UnicodeWidthStr;

const OP_TARGET_MAX: usize = 40;

fn color_for_operation(op: &str) -> Colour {
    match op {
        "start" => Colour::Green,
        "stop" => Colour::Cyan,
        "add" => Colour::Blue,
        "edit" => Colour::Yellow,
        "del" => Colour::Red,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(pool: &DbPool) -> AppResult<()> {
        let entries = load_log(&pool.conn)?;
        if entries.is_empty() {
            info("The internal log is empty.");
            return Ok(());
        }

        let rows: Vec<(i64, String, String, String, String)> = entries
            .into_iter()
            .map(|e| {
                let date = chrono::DateTime::parse_from_rfc3339(&e.date)
                    .map(|dt| dt.format("%FT%T%:z").to_string())
                    .unwrap_or(e.date);
                let op_target = if e.target.is_empty() {
                    e.operation.clone()
                } else {
                    truncate(&format!("{} ({})", e.operation, e.target), OP_TARGET_MAX)
                };
                (e.id, date, e.operation, op_target, e.message)
            })
            .collect();

        let id_w = rows.iter().map(|r| r.0.to_string().len()).max().unwrap_or(1);
        let date_w = rows.iter().map(|r| r.1.width()).max().unwrap_or(10);
        let op_w = rows.iter().map(|r| r.3.width()).max().unwrap_or(10);

        header("Internal log");

        for (id, date, operation, op_target, message) in rows {
            // pad on the plain text, colour only the operation word
            let padding = " ".repeat(op_w.saturating_sub(op_target.width()));
            let rest = op_target.strip_prefix(operation.as_str()).unwrap_or("");
            let colored = color_for_operation(&operation).paint(operation.as_str());

            println!(
                "{:>id_w$}: {:<date_w$} | {}{}{} => {}",
                id, date, colored, rest, padding, message
            );
        }

        Ok(())
    }
}

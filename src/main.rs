//! timesheet main entrypoint.

use timesheet::run;
use timesheet::ui::messages::{error, info};

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {e}"));
        if !e.is_user_error() {
            info("If the database looks damaged, try `timesheet db --check`.");
        }
        std::process::exit(1);
    }
}

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{header, info, success, warning};
use std::path::Path;
use std::process::Command;

fn default_editor() -> String {
    std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(target_os = "windows") {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        })
}

fn run_editor(editor: &str, path: &Path) -> bool {
    matches!(Command::new(editor).arg(path).status(), Ok(s) if s.success())
}

/// Handle the `config` subcommand
pub fn handle(
    print_config: bool,
    edit_config: bool,
    editor: Option<&str>,
    cfg: &Config,
) -> AppResult<()> {
    let path = Config::config_file();

    if !print_config && !edit_config {
        info("Nothing to do: use --print or --edit.");
        return Ok(());
    }

    if print_config {
        header(format!("Current configuration ({})", path.display()));
        println!("{}", serde_yaml::to_string(cfg)?);
    }

    if edit_config {
        let fallback = default_editor();
        let requested = editor.map(str::to_string).unwrap_or_else(|| fallback.clone());

        if run_editor(&requested, &path) {
            success(format!("Configuration file edited using '{requested}'"));
        } else if requested != fallback {
            warning(format!(
                "Editor '{requested}' not available, falling back to '{fallback}'"
            ));
            if !run_editor(&fallback, &path) {
                return Err(AppError::Config(format!(
                    "failed to edit {} with '{fallback}'",
                    path.display()
                )));
            }
            success(format!("Configuration file edited using fallback '{fallback}'"));
        } else {
            return Err(AppError::Config(format!(
                "failed to edit {} with '{requested}'",
                path.display()
            )));
        }

        // reject an edited file that no longer parses or validates
        Config::load()?;
    }

    Ok(())
}

use crate::core::report::DEFAULT_PERIOD_START_DAY;
use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    /// First day of the default reporting period (the period ends the day before).
    #[serde(default = "default_report_start_day")]
    pub report_start_day: u32,
    /// Hours counted as one working day in report output.
    #[serde(default = "default_hours_per_day")]
    pub hours_per_day: u32,
}

fn default_report_start_day() -> u32 {
    DEFAULT_PERIOD_START_DAY
}
fn default_hours_per_day() -> u32 {
    8
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            report_start_day: default_report_start_day(),
            hours_per_day: default_hours_per_day(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("timesheet")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".timesheet")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("timesheet.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("timesheet.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        let cfg = if path.exists() {
            let content = fs::read_to_string(&path)?;
            Self::from_yaml(&content)?
        } else {
            Self::default()
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_yaml(content: &str) -> AppResult<Self> {
        let mut cfg: Config = serde_yaml::from_str(content)?;
        cfg.database = expand_tilde(&cfg.database).to_string_lossy().to_string();
        Ok(cfg)
    }

    pub fn validate(&self) -> AppResult<()> {
        if !(2..=28).contains(&self.report_start_day) {
            return Err(AppError::Config(format!(
                "report_start_day must be between 2 and 28, got {}",
                self.report_start_day
            )));
        }
        if self.hours_per_day == 0 || self.hours_per_day > 24 {
            return Err(AppError::Config(format!(
                "hours_per_day must be between 1 and 24, got {}",
                self.hours_per_day
            )));
        }
        Ok(())
    }

    /// Initialize configuration and database files.
    ///
    /// Returns the configuration that was written (or would have been, in
    /// test mode).
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();

        // DB name: user provided or default
        let db_path = if let Some(name) = custom_name {
            let p = expand_tilde(&name);
            if p.is_absolute() { p } else { dir.join(p) }
        } else {
            Self::database_file()
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Self::default()
        };

        // Write config file
        if !is_test {
            fs::create_dir_all(&dir)?;
            let yaml = serde_yaml::to_string(&config)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        Ok(config)
    }
}

// src/config.rs
use crate::domain::errors::{AppError, AppResult};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Stock watcher configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Watchlist and credential file locations
    pub files: FilesConfig,

    /// Market data provider configuration
    pub market_data: MarketDataConfig,

    /// Mail relay configuration
    pub mail: MailConfig,

    /// Optional in-process daily schedule
    pub schedule: ScheduleConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilesConfig {
    /// One ticker symbol per line
    pub watchlist_path: PathBuf,

    /// Env-style file with GOOGLE_ACCOUNT and GOOGLE_APP_PASSWORD
    pub credentials_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketDataConfig {
    /// History range requested per symbol (e.g., "1y", "2y")
    pub range: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    pub smtp_host: String,

    /// STARTTLS submission port
    pub smtp_port: u16,

    /// Alert recipient, the sending account when unset
    pub recipient: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Local time of day for repeated scans; a single scan when unset
    pub daily_at: Option<NaiveTime>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (e.g., "info", "debug", "warn", "error")
    pub level: String,

    /// Log to file
    pub to_file: bool,

    /// Log file path
    pub file_path: Option<String>,
}

/// Mail account loaded from the credential file. Never written back.
#[derive(Clone)]
pub struct Credentials {
    pub account: String,
    pub app_password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("account", &self.account)
            .field("app_password", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    pub const ACCOUNT_KEY: &'static str = "GOOGLE_ACCOUNT";
    pub const PASSWORD_KEY: &'static str = "GOOGLE_APP_PASSWORD";

    /// Read key/value pairs from an env-style file without touching the
    /// process environment.
    pub fn from_file<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let path = path.as_ref();
        let entries = dotenv::from_path_iter(path).map_err(|e| {
            AppError::Config(format!(
                "Failed to open credential file {}: {}",
                path.display(),
                e
            ))
        })?;

        let mut account = None;
        let mut app_password = None;

        for entry in entries {
            let (key, value) = entry.map_err(|e| {
                AppError::Config(format!(
                    "Failed to parse credential file {}: {}",
                    path.display(),
                    e
                ))
            })?;

            match key.as_str() {
                Self::ACCOUNT_KEY => account = Some(value),
                Self::PASSWORD_KEY => app_password = Some(value),
                _ => {}
            }
        }

        Ok(Self {
            account: required(account, Self::ACCOUNT_KEY, path)?,
            app_password: required(app_password, Self::PASSWORD_KEY, path)?,
        })
    }
}

fn required(value: Option<String>, key: &str, path: &Path) -> AppResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(AppError::Config(format!(
            "Missing {} in credential file {}",
            key,
            path.display()
        ))),
    }
}

impl Config {
    /// Load configuration from environment variables, seeded from `.env`
    pub fn from_env() -> AppResult<Self> {
        Self::from_env_file(".env")
    }

    /// Load configuration from environment variables, seeded from `path` if
    /// it exists. Variables already set in the environment win.
    pub fn from_env_file<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        seed_env(path.as_ref())?;

        let files_config = FilesConfig {
            watchlist_path: env::var("WATCHLIST_PATH")
                .unwrap_or_else(|_| "stocks.txt".to_string())
                .into(),
            credentials_path: env::var("CREDENTIALS_PATH")
                .unwrap_or_else(|_| ".env".to_string())
                .into(),
        };

        let market_data_config = MarketDataConfig {
            range: env::var("MARKET_DATA_RANGE").unwrap_or_else(|_| "1y".to_string()),
        };

        let mail_config = MailConfig {
            smtp_host: env::var("SMTP_HOST").unwrap_or_else(|_| "smtp.gmail.com".to_string()),
            smtp_port: match env::var("SMTP_PORT") {
                Ok(port) => port.trim().parse().map_err(|_| {
                    AppError::Config(format!("Invalid SMTP_PORT: {}", port))
                })?,
                Err(_) => 587,
            },
            recipient: env::var("ALERT_RECIPIENT").ok().filter(|r| !r.trim().is_empty()),
        };

        let schedule_config = ScheduleConfig {
            daily_at: match env::var("RUN_DAILY_AT") {
                Ok(at) if !at.trim().is_empty() => Some(parse_time_of_day(&at)?),
                _ => None,
            },
        };

        // Create Logging config
        let logging_config = LoggingConfig {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            to_file: env::var("LOG_TO_FILE")
                .unwrap_or_else(|_| "false".to_string())
                .parse()
                .unwrap_or(false),
            file_path: env::var("LOG_FILE_PATH").ok(),
        };

        Ok(Config {
            files: files_config,
            market_data: market_data_config,
            mail: mail_config,
            schedule: schedule_config,
            logging: logging_config,
        })
    }

    /// Load the mail account named by `files.credentials_path`
    pub fn load_credentials(&self) -> AppResult<Credentials> {
        Credentials::from_file(&self.files.credentials_path)
    }

    /// Initialize logging based on configuration
    pub fn init_logging(&self) -> AppResult<()> {
        let mut builder = env_logger::Builder::new();

        // Set log level
        let log_level = match self.logging.level.to_lowercase().as_str() {
            "trace" => log::LevelFilter::Trace,
            "debug" => log::LevelFilter::Debug,
            "info" => log::LevelFilter::Info,
            "warn" => log::LevelFilter::Warn,
            "error" => log::LevelFilter::Error,
            _ => log::LevelFilter::Info,
        };

        builder.filter_level(log_level);

        // Configure output
        if self.logging.to_file {
            if let Some(file_path) = &self.logging.file_path {
                let file = File::create(file_path).map_err(|e| {
                    AppError::Config(format!("Failed to create log file: {}", e))
                })?;

                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
        }

        // Initialize the logger
        builder.init();

        Ok(())
    }
}

/// Copy settings from an env-style file into the process environment.
///
/// Mail credentials are skipped; they stay in the file and are only read by
/// `Credentials::from_file`.
fn seed_env(path: &Path) -> AppResult<()> {
    let entries = match dotenv::from_path_iter(path) {
        Ok(entries) => entries,
        Err(_) if !path.exists() => return Ok(()),
        Err(e) => {
            return Err(AppError::Config(format!(
                "Failed to open {}: {}",
                path.display(),
                e
            )))
        }
    };

    for entry in entries {
        let (key, value) = entry.map_err(|e| {
            AppError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })?;

        if key == Credentials::ACCOUNT_KEY || key == Credentials::PASSWORD_KEY {
            continue;
        }
        if env::var_os(&key).is_none() {
            env::set_var(key, value);
        }
    }

    Ok(())
}

/// Parse "HH:MM" (24-hour clock)
pub fn parse_time_of_day(value: &str) -> AppResult<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map_err(|e| AppError::Config(format!("Invalid RUN_DAILY_AT '{}': {}", value, e)))
}

impl Default for Config {
    fn default() -> Self {
        Self {
            files: FilesConfig {
                watchlist_path: "stocks.txt".into(),
                credentials_path: ".env".into(),
            },
            market_data: MarketDataConfig {
                range: "1y".to_string(),
            },
            mail: MailConfig {
                smtp_host: "smtp.gmail.com".to_string(),
                smtp_port: 587,
                recipient: None,
            },
            schedule: ScheduleConfig { daily_at: None },
            logging: LoggingConfig {
                level: "info".to_string(),
                to_file: false,
                file_path: None,
            },
        }
    }
}

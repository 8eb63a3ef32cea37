use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU8, Ordering};
use tracing::{info, warn};

use repstreak_domain::stats::StreakAnchor;

pub const CONFIG_FILE_NAME: &str = "app_config.json";

/// Log level configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error = 1,
    Warn = 2,
    #[default]
    Info = 3,
    Debug = 4,
    Trace = 5,
}

impl LogLevel {
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => LogLevel::Error,
            2 => LogLevel::Warn,
            4 => LogLevel::Debug,
            5 => LogLevel::Trace,
            _ => LogLevel::Info,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Persistent configuration structure
///
/// Every field has a default, so a partial file only overrides what it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub log_level: LogLevel,
    /// SQLite file name, relative to the data directory
    pub database_file: String,
    /// Offset used to decide what "today" is for streaks
    pub utc_offset_minutes: i32,
    pub streak_anchor: StreakAnchor,
    /// Recompute stats after an entry is deleted
    pub recompute_on_delete: bool,
    /// Entries shown on the dashboard
    pub recent_entries_limit: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        let database_file = if cfg!(debug_assertions) {
            "repstreak-dev.db"
        } else {
            "repstreak.db"
        };

        Self {
            log_level: LogLevel::Info,
            database_file: database_file.to_string(),
            utc_offset_minutes: 0,
            streak_anchor: StreakAnchor::default(),
            recompute_on_delete: false,
            recent_entries_limit: 20,
        }
    }
}

/// Application configuration service
pub struct ConfigService {
    config: AppConfig,
    log_level: AtomicU8,
    data_dir: PathBuf,
}

impl ConfigService {
    /// Default data directory (e.g. `~/.local/share/repstreak`)
    pub fn default_data_dir() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("repstreak"))
    }

    /// Load `app_config.json` from `data_dir`, falling back to defaults
    /// when the file is missing or unreadable as JSON.
    pub fn load(data_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(data_dir)?;

        let config_path = data_dir.join(CONFIG_FILE_NAME);

        let config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            match serde_json::from_str::<AppConfig>(&content) {
                Ok(config) => config,
                Err(e) => {
                    warn!(
                        path = %config_path.display(),
                        "Invalid config file, using defaults: {}", e
                    );
                    AppConfig::default()
                }
            }
        } else {
            AppConfig::default()
        };

        info!(path = %config_path.display(), "Config loaded");
        info!("Initial log level: {}", config.log_level.as_str());

        Ok(Self {
            log_level: AtomicU8::new(config.log_level as u8),
            config,
            data_dir: data_dir.to_path_buf(),
        })
    }

    /// Current configuration, including any runtime log level change
    pub fn config(&self) -> AppConfig {
        AppConfig {
            log_level: self.log_level(),
            ..self.config.clone()
        }
    }

    pub fn log_level(&self) -> LogLevel {
        LogLevel::from_u8(self.log_level.load(Ordering::Relaxed))
    }

    /// Change the log level and persist it
    pub fn set_log_level(&self, level: LogLevel) -> Result<()> {
        self.log_level.store(level as u8, Ordering::Relaxed);
        self.save()?;
        info!("Log level changed to: {}", level.as_str());
        Ok(())
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config_path(&self) -> PathBuf {
        self.data_dir.join(CONFIG_FILE_NAME)
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(&self.config.database_file)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }

    fn save(&self) -> Result<()> {
        let content = serde_json::to_string_pretty(&self.config())?;
        std::fs::write(self.config_path(), content)?;
        Ok(())
    }
}

mod app_config;
mod store;

pub use app_config::{AppConfig, ConfigService, LogLevel, CONFIG_FILE_NAME};
pub use store::StoreConfig;

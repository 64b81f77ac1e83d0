pub mod app_config;
pub mod config;
pub mod date;
pub mod stats;

use thiserror::Error;

pub use app_config::{AppConfig, LogSettings, PortalCredentials};
pub use config::{
    load_app_config, load_app_config_from_env, load_dotenv, load_log_settings, program_dir,
};
pub use date::{date_label, resolve_target_date, resolve_target_date_now, DateError};
pub use stats::DailyStats;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing portal credentials: set {0} in the environment or .env")]
    MissingCredentials(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("cannot determine program directory: {0}")]
    ProgramDir(#[source] std::io::Error),
}

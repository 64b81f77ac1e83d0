use std::path::{Path, PathBuf};

use crate::app_config::{AppConfig, LogSettings, PortalCredentials};
use crate::ConfigError;

pub const DEFAULT_PORTAL_URL: &str = "https://bbarunsonweb.barunsoncard.com";
pub const DEFAULT_CHROMEDRIVER: &str = "chromedriver";
pub const DEFAULT_SERVICE_ACCOUNT_KEY: &str = "service_account.json";
pub const DEFAULT_LOG_FILE: &str = "daily_tracker.log";

/// Directory containing the running executable.
///
/// Relative paths in the configuration (service-account key, log file, `.env`)
/// are resolved against this directory rather than the working directory, so
/// the job behaves the same when launched from cron.
///
/// # Errors
///
/// Returns [`ConfigError::ProgramDir`] if the executable path is unavailable.
pub fn program_dir() -> Result<PathBuf, ConfigError> {
    let exe = std::env::current_exe().map_err(ConfigError::ProgramDir)?;
    Ok(exe
        .parent()
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf))
}

/// Load `.env` from the program directory, then from the working directory.
///
/// Variables already present in the process environment are never overridden.
pub fn load_dotenv(program_dir: &Path) {
    dotenvy::from_path(program_dir.join(".env")).ok();
    dotenvy::dotenv().ok();
}

/// Load application configuration, reading `.env` files first.
///
/// # Errors
///
/// Returns `ConfigError` if credentials are missing or values are invalid.
pub fn load_app_config(program_dir: &Path) -> Result<AppConfig, ConfigError> {
    load_dotenv(program_dir);
    load_app_config_from_env(program_dir)
}

/// Load application configuration from variables already in the process.
///
/// # Errors
///
/// Returns `ConfigError` if credentials are missing or values are invalid.
pub fn load_app_config_from_env(program_dir: &Path) -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key), program_dir)
}

/// Resolve logging settings. Never fails: unset values fall back to defaults.
#[must_use]
pub fn load_log_settings(program_dir: &Path) -> LogSettings {
    build_log_settings(|key| std::env::var(key), program_dir)
}

fn build_log_settings<F>(lookup: F, program_dir: &Path) -> LogSettings
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let log_level = lookup("CSTRACK_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let log_file = resolve_path(
        &lookup("CSTRACK_LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string()),
        program_dir,
    );
    LogSettings {
        log_level,
        log_file,
    }
}

fn build_app_config<F>(lookup: F, program_dir: &Path) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    // An empty value is as useless as an absent one for a login form.
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingCredentials(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let user_id = require("BARUNSON_ID")?;
    let password = require("BARUNSON_PW")?;

    let service_account_key_path = resolve_path(
        &or_default("GOOGLE_SERVICE_ACCOUNT_KEY", DEFAULT_SERVICE_ACCOUNT_KEY),
        program_dir,
    );

    let portal_url = or_default("CSTRACK_PORTAL_URL", DEFAULT_PORTAL_URL);
    // Without an external WebDriver server the job starts its own chromedriver.
    let webdriver_url = lookup("CSTRACK_WEBDRIVER_URL")
        .ok()
        .filter(|v| !v.trim().is_empty());
    let chromedriver_path = chromedriver_path(
        &or_default("CSTRACK_CHROMEDRIVER", DEFAULT_CHROMEDRIVER),
        program_dir,
    );

    let login_timeout_secs = parse_u64("CSTRACK_LOGIN_TIMEOUT_SECS", "15")?;
    let element_timeout_secs = parse_u64("CSTRACK_ELEMENT_TIMEOUT_SECS", "10")?;
    let menu_settle_ms = parse_u64("CSTRACK_MENU_SETTLE_MS", "1000")?;
    let search_settle_ms = parse_u64("CSTRACK_SEARCH_SETTLE_MS", "2000")?;
    let http_timeout_secs = parse_u64("CSTRACK_HTTP_TIMEOUT_SECS", "30")?;

    let spreadsheet_id = lookup("CSTRACK_SPREADSHEET_ID").ok();
    let sheet_name = lookup("CSTRACK_SHEET_NAME").ok();

    Ok(AppConfig {
        credentials: PortalCredentials { user_id, password },
        service_account_key_path,
        portal_url,
        webdriver_url,
        chromedriver_path,
        login_timeout_secs,
        element_timeout_secs,
        menu_settle_ms,
        search_settle_ms,
        http_timeout_secs,
        spreadsheet_id,
        sheet_name,
    })
}

/// A bare program name is left for `PATH` lookup; anything with a directory
/// part resolves like other configured paths.
fn chromedriver_path(raw: &str, program_dir: &Path) -> PathBuf {
    if Path::new(raw).components().count() == 1 {
        PathBuf::from(raw)
    } else {
        resolve_path(raw, program_dir)
    }
}

/// Absolute paths are kept; relative ones are joined onto `program_dir`.
fn resolve_path(raw: &str, program_dir: &Path) -> PathBuf {
    let path = PathBuf::from(raw);
    if path.is_absolute() {
        path
    } else {
        program_dir.join(path)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

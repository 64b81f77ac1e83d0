use std::path::PathBuf;
use std::time::Duration;

/// Login identifier and secret for the vendor portal.
#[derive(Clone)]
pub struct PortalCredentials {
    pub user_id: String,
    pub password: String,
}

impl std::fmt::Debug for PortalCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortalCredentials")
            .field("user_id", &self.user_id)
            .field("password", &"[redacted]")
            .finish()
    }
}

/// Where and how verbosely to log. Resolved before [`AppConfig`] so that
/// configuration failures can themselves be logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub log_level: String,
    pub log_file: PathBuf,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub credentials: PortalCredentials,
    pub service_account_key_path: PathBuf,
    pub portal_url: String,
    /// External WebDriver server; `None` means spawn `chromedriver_path`.
    pub webdriver_url: Option<String>,
    pub chromedriver_path: PathBuf,
    pub login_timeout_secs: u64,
    pub element_timeout_secs: u64,
    pub menu_settle_ms: u64,
    pub search_settle_ms: u64,
    pub http_timeout_secs: u64,
    pub spreadsheet_id: Option<String>,
    pub sheet_name: Option<String>,
}

impl AppConfig {
    #[must_use]
    pub fn login_timeout(&self) -> Duration {
        Duration::from_secs(self.login_timeout_secs)
    }

    #[must_use]
    pub fn element_timeout(&self) -> Duration {
        Duration::from_secs(self.element_timeout_secs)
    }

    #[must_use]
    pub fn menu_settle(&self) -> Duration {
        Duration::from_millis(self.menu_settle_ms)
    }

    #[must_use]
    pub fn search_settle(&self) -> Duration {
        Duration::from_millis(self.search_settle_ms)
    }
}

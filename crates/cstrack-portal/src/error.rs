use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PortalError {
    /// Failure reported by the WebDriver server or the browser.
    #[error("browser session error: {0}")]
    WebDriver(#[from] thirtyfour::error::WebDriverError),

    #[error("failed to start chromedriver at {}: {source}", path.display())]
    DriverSpawn {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("chromedriver at {} did not become ready: {reason}", path.display())]
    DriverNotReady { path: PathBuf, reason: String },

    /// An element query itself failed (as opposed to matching nothing).
    #[error("element lookup {locator} failed: {reason}")]
    Lookup { locator: String, reason: String },

    #[error("portal login failed: {reason}")]
    AuthenticationFailed { reason: String },

    #[error("navigation failed: {step} not found within the wait bound")]
    NavigationFailed { step: String },

    #[error("no data rows in the {report} results table")]
    DataNotFound { report: String },
}

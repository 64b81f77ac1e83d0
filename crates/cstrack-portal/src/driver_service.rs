//! A chromedriver child process owned by one browser session.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use tokio::net::TcpStream;
use tokio::process::{Child, Command};
use tokio::time::Instant;

use crate::error::PortalError;

const READY_POLL: Duration = Duration::from_millis(100);

/// Where the browser session's WebDriver server comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverEndpoint {
    /// An already-running server, e.g. a Selenium container.
    Remote(String),
    /// Start `chromedriver` locally for the duration of the session.
    Spawn { chromedriver: PathBuf },
}

/// A running chromedriver. Dropping it kills the process.
#[derive(Debug)]
pub struct ChromeDriverService {
    child: Child,
    port: u16,
}

impl ChromeDriverService {
    /// Spawn `binary` on a free local port and wait until it accepts connections.
    ///
    /// # Errors
    ///
    /// - [`PortalError::DriverSpawn`] if the binary cannot be started.
    /// - [`PortalError::DriverNotReady`] if it exits early or does not listen
    ///   within `startup`.
    pub async fn start(binary: &Path, startup: Duration) -> Result<Self, PortalError> {
        let port = free_port().map_err(|source| PortalError::DriverSpawn {
            path: binary.to_path_buf(),
            source,
        })?;
        let child = Command::new(binary)
            .arg(format!("--port={port}"))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| PortalError::DriverSpawn {
                path: binary.to_path_buf(),
                source,
            })?;

        let mut service = Self { child, port };
        service.wait_ready(binary, startup).await?;
        tracing::info!(path = %binary.display(), port, "chromedriver started");
        Ok(service)
    }

    async fn wait_ready(&mut self, binary: &Path, startup: Duration) -> Result<(), PortalError> {
        let deadline = Instant::now() + startup;
        loop {
            if let Ok(Some(status)) = self.child.try_wait() {
                return Err(PortalError::DriverNotReady {
                    path: binary.to_path_buf(),
                    reason: format!("exited with {status}"),
                });
            }
            if TcpStream::connect(("127.0.0.1", self.port)).await.is_ok() {
                return Ok(());
            }
            if Instant::now() >= deadline {
                self.stop().await;
                return Err(PortalError::DriverNotReady {
                    path: binary.to_path_buf(),
                    reason: format!(
                        "port {} not listening after {}ms",
                        self.port,
                        startup.as_millis()
                    ),
                });
            }
            tokio::time::sleep(READY_POLL).await;
        }
    }

    #[must_use]
    pub fn url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// Kill the process and reap it.
    pub async fn stop(&mut self) {
        if let Err(e) = self.child.kill().await {
            tracing::warn!(error = %e, "failed to stop chromedriver");
        }
    }
}

/// Ask the OS for an unused port. The listener is released before returning,
/// so another process could in principle take it first.
fn free_port() -> std::io::Result<u16> {
    let listener = std::net::TcpListener::bind(("127.0.0.1", 0))?;
    Ok(listener.local_addr()?.port())
}

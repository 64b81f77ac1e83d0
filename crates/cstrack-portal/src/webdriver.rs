//! [`Page`] over a WebDriver-controlled headless Chrome.

use std::time::Duration;

use async_trait::async_trait;
use thirtyfour::error::WebDriverError;
use thirtyfour::prelude::*;
use thirtyfour::ChromiumLikeCapabilities;

use crate::driver_service::{ChromeDriverService, DriverEndpoint};
use crate::error::PortalError;
use crate::page::{Locator, Page};

pub const WINDOW_WIDTH: u32 = 1920;
pub const WINDOW_HEIGHT: u32 = 1080;

/// Assigns the value and fires `change`, which the portal's date pickers
/// listen for instead of keyboard input.
const FORCE_VALUE_SCRIPT: &str =
    "arguments[0].value = arguments[1]; arguments[0].dispatchEvent(new Event('change'));";

/// Chrome flags for unattended runs. The portal does not render under the
/// Chrome sandbox in containerized environments.
#[must_use]
pub fn chrome_args() -> Vec<String> {
    vec![
        "--headless=new".to_owned(),
        "--no-sandbox".to_owned(),
        "--disable-dev-shm-usage".to_owned(),
        format!("--window-size={WINDOW_WIDTH},{WINDOW_HEIGHT}"),
    ]
}

/// Give chromedriver this long to open its port.
const DRIVER_STARTUP: Duration = Duration::from_secs(20);

pub struct WebDriverPage {
    driver: WebDriver,
    /// Locally spawned server; `None` when talking to a remote one.
    service: Option<ChromeDriverService>,
}

impl WebDriverPage {
    /// Start a new headless Chrome session, spawning chromedriver first when
    /// `endpoint` asks for it.
    ///
    /// # Errors
    ///
    /// - [`PortalError::DriverSpawn`] or [`PortalError::DriverNotReady`] if a
    ///   local chromedriver cannot be started.
    /// - [`PortalError::WebDriver`] if the server is unreachable or refuses
    ///   the session.
    pub async fn launch(endpoint: &DriverEndpoint) -> Result<Self, PortalError> {
        let (url, service) = match endpoint {
            DriverEndpoint::Remote(url) => (url.clone(), None),
            DriverEndpoint::Spawn { chromedriver } => {
                let service = ChromeDriverService::start(chromedriver, DRIVER_STARTUP).await?;
                (service.url(), Some(service))
            }
        };

        let mut caps = DesiredCapabilities::chrome();
        for arg in chrome_args() {
            caps.add_arg(&arg)?;
        }
        // On failure `service` drops here, which kills a spawned chromedriver.
        let driver = WebDriver::new(url.as_str(), caps).await?;
        tracing::info!(webdriver_url = %url, "browser session created");
        Ok(Self { driver, service })
    }
}

fn by(locator: &Locator) -> By {
    match locator {
        Locator::Css(selector) => By::Css(selector.clone()),
        Locator::XPath(expression) => By::XPath(expression.clone()),
    }
}

fn lookup_error(locator: &Locator, err: &WebDriverError) -> PortalError {
    PortalError::Lookup {
        locator: locator.to_string(),
        reason: err.to_string(),
    }
}

#[async_trait]
impl Page for WebDriverPage {
    type Element = WebElement;

    async fn goto(&self, url: &str) -> Result<(), PortalError> {
        self.driver.goto(url).await?;
        Ok(())
    }

    async fn current_url(&self) -> Result<String, PortalError> {
        Ok(self.driver.current_url().await?.to_string())
    }

    async fn find_all(&self, locator: &Locator) -> Result<Vec<WebElement>, PortalError> {
        self.driver
            .find_all(by(locator))
            .await
            .map_err(|e| lookup_error(locator, &e))
    }

    async fn find_all_in(
        &self,
        parent: &WebElement,
        locator: &Locator,
    ) -> Result<Vec<WebElement>, PortalError> {
        parent
            .find_all(by(locator))
            .await
            .map_err(|e| lookup_error(locator, &e))
    }

    async fn text(&self, element: &WebElement) -> Result<String, PortalError> {
        Ok(element.text().await?)
    }

    async fn is_clickable(&self, element: &WebElement) -> Result<bool, PortalError> {
        Ok(element.is_clickable().await?)
    }

    async fn click(&self, element: &WebElement) -> Result<(), PortalError> {
        element.click().await?;
        Ok(())
    }

    async fn type_into(&self, element: &WebElement, text: &str) -> Result<(), PortalError> {
        element.clear().await?;
        element.send_keys(text).await?;
        Ok(())
    }

    async fn force_value(&self, element: &WebElement, value: &str) -> Result<(), PortalError> {
        element.clear().await?;
        let args = vec![
            element.to_json()?,
            serde_json::Value::String(value.to_owned()),
        ];
        self.driver.execute(FORCE_VALUE_SCRIPT, args).await?;
        Ok(())
    }

    async fn close(self) -> Result<(), PortalError> {
        let Self {
            driver,
            mut service,
        } = self;
        let quit = driver.quit().await;
        if let Some(service) = service.as_mut() {
            service.stop().await;
        }
        quit?;
        Ok(())
    }
}

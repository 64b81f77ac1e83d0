//! End-to-end collection of one day's [`DailyStats`] from the portal.

use std::time::Duration;

use chrono::NaiveDate;
use cstrack_core::{AppConfig, DailyStats, PortalCredentials};
use futures::future::BoxFuture;

use crate::driver_service::DriverEndpoint;
use crate::error::PortalError;
use crate::extract::{extract_count, CountReading};
use crate::login::login;
use crate::menu::navigate_menu;
use crate::page::Page;
use crate::report::{Report, INBOUND_CALL_REPORT, QA_REPORT};
use crate::search::set_date_and_search;
use crate::wait::Waits;
use crate::webdriver::WebDriverPage;

/// Portal location and timing for a collection run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalSettings {
    pub portal_url: String,
    pub driver: DriverEndpoint,
    pub waits: Waits,
}

impl PortalSettings {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            portal_url: config.portal_url.clone(),
            driver: match &config.webdriver_url {
                Some(url) => DriverEndpoint::Remote(url.clone()),
                None => DriverEndpoint::Spawn {
                    chromedriver: config.chromedriver_path.clone(),
                },
            },
            waits: Waits {
                login: config.login_timeout(),
                element: config.element_timeout(),
                poll: Duration::from_millis(250),
                menu_settle: config.menu_settle(),
                search_settle: config.search_settle(),
            },
        }
    }
}

/// Run `body` against `page`, then close the page whatever the outcome.
///
/// `ctx` is handed back to `body` so the returned future may borrow from it.
/// The body's result is returned unchanged; a failure to close is logged and
/// does not mask it.
///
/// # Errors
///
/// Returns whatever `body` returns.
pub async fn with_session<P, C, T, F>(page: P, ctx: &C, body: F) -> Result<T, PortalError>
where
    P: Page,
    C: Sync + ?Sized,
    F: for<'a> FnOnce(&'a P, &'a C) -> BoxFuture<'a, Result<T, PortalError>>,
{
    let outcome = body(&page, ctx).await;
    match page.close().await {
        Ok(()) => tracing::info!("browser session closed"),
        Err(e) => tracing::warn!(error = %e, "failed to close browser session"),
    }
    outcome
}

/// Log in and read both reports for `date` on an already-open page.
///
/// # Errors
///
/// Propagates the first [`PortalError`] from login, navigation, search or
/// extraction.
pub async fn collect_with_page<P: Page>(
    page: &P,
    settings: &PortalSettings,
    credentials: &PortalCredentials,
    date: NaiveDate,
) -> Result<DailyStats, PortalError> {
    login(page, &settings.portal_url, credentials, &settings.waits).await?;

    let qa = read_report(page, &QA_REPORT, date, &settings.waits).await?;
    let calls = read_report(page, &INBOUND_CALL_REPORT, date, &settings.waits).await?;

    Ok(DailyStats::new(date, qa.value, calls.value))
}

async fn read_report<P: Page>(
    page: &P,
    report: &Report,
    date: NaiveDate,
    waits: &Waits,
) -> Result<CountReading, PortalError> {
    navigate_menu(page, report.menu_path, waits).await?;
    tracing::info!(report = report.name, "report page opened");
    set_date_and_search(page, date, waits).await?;
    extract_count(page, report, waits).await
}

/// Launch a browser session, collect `date`'s counters and close the session.
///
/// # Errors
///
/// - [`PortalError::DriverSpawn`], [`PortalError::DriverNotReady`] or
///   [`PortalError::WebDriver`] if the browser session cannot be created.
/// - Any error from [`collect_with_page`]; the session is closed first.
pub async fn collect_daily_stats(
    settings: &PortalSettings,
    credentials: &PortalCredentials,
    date: NaiveDate,
) -> Result<DailyStats, PortalError> {
    let page = WebDriverPage::launch(&settings.driver).await?;
    let ctx = (settings, credentials, date);
    with_session(page, &ctx, |page, &(settings, credentials, date)| {
        Box::pin(collect_with_page(page, settings, credentials, date))
    })
    .await
}

#[cfg(test)]
#[path = "collector_test.rs"]
mod tests;

//! Bounded polling over ordered locator lists.
//!
//! The portal's markup is not stable, so most lookups offer several plausible
//! patterns. Every poll tries them in order and the first pattern with a
//! qualifying match wins.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

use crate::error::PortalError;
use crate::page::{Locator, Page};

/// Wait bounds and settle delays for one collection run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Waits {
    /// Bound for the login form and the post-login landing.
    pub login: Duration,
    /// Bound for menu entries, the search control and the count cell.
    pub element: Duration,
    /// Interval between polls.
    pub poll: Duration,
    /// Pause after each menu click so sub-menus can render.
    pub menu_settle: Duration,
    /// Pause after searching so results can render.
    pub search_settle: Duration,
}

impl Default for Waits {
    fn default() -> Self {
        Self {
            login: Duration::from_secs(15),
            element: Duration::from_secs(10),
            poll: Duration::from_millis(250),
            menu_settle: Duration::from_secs(1),
            search_settle: Duration::from_secs(2),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Present,
    Clickable,
}

/// First element satisfying `condition`, trying `locators` in order. Does not wait.
///
/// # Errors
///
/// Propagates lookup failures from the page.
pub async fn find_first<P: Page>(
    page: &P,
    locators: &[Locator],
    condition: Condition,
) -> Result<Option<P::Element>, PortalError> {
    for locator in locators {
        for element in page.find_all(locator).await? {
            match condition {
                Condition::Present => return Ok(Some(element)),
                Condition::Clickable => {
                    // A node that went stale between lookup and check simply doesn't qualify.
                    if page.is_clickable(&element).await.unwrap_or(false) {
                        return Ok(Some(element));
                    }
                }
            }
        }
    }
    Ok(None)
}

/// Poll [`find_first`] until it yields an element or `timeout` elapses.
///
/// Returns `Ok(None)` on timeout; callers decide which error that is.
///
/// # Errors
///
/// Propagates lookup failures from the page.
pub async fn wait_for_first<P: Page>(
    page: &P,
    locators: &[Locator],
    condition: Condition,
    timeout: Duration,
    poll: Duration,
) -> Result<Option<P::Element>, PortalError> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(element) = find_first(page, locators, condition).await? {
            return Ok(Some(element));
        }
        let now = Instant::now();
        if now >= deadline {
            tracing::debug!(
                patterns = locators.len(),
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
                "no locator matched before the deadline"
            );
            return Ok(None);
        }
        tokio::time::sleep(poll.min(deadline - now)).await;
    }
}

/// Poll `check` until it returns `true` or `timeout` elapses.
///
/// # Errors
///
/// Propagates the first error returned by `check`.
pub async fn poll_until<F, Fut>(
    timeout: Duration,
    poll: Duration,
    mut check: F,
) -> Result<bool, PortalError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool, PortalError>>,
{
    let deadline = Instant::now() + timeout;
    loop {
        if check().await? {
            return Ok(true);
        }
        let now = Instant::now();
        if now >= deadline {
            return Ok(false);
        }
        tokio::time::sleep(poll.min(deadline - now)).await;
    }
}

//! Click-through navigation of the portal's side menu.

use crate::error::PortalError;
use crate::page::{xpath_literal, Locator, Page};
use crate::wait::{wait_for_first, Condition, Waits};

/// Patterns for a menu entry whose visible text contains `text`.
///
/// Entries render as links, as spans inside a clickable parent, or as bare
/// list items depending on the menu level.
#[must_use]
pub fn menu_entry_locators(text: &str) -> Vec<Locator> {
    let literal = xpath_literal(text);
    vec![
        Locator::xpath(format!("//a[contains(text(), {literal})]")),
        Locator::xpath(format!("//span[contains(text(), {literal})]/..")),
        Locator::xpath(format!("//li[contains(text(), {literal})]")),
    ]
}

/// Click each entry of `path` in order, pausing after every click.
///
/// # Errors
///
/// - [`PortalError::NavigationFailed`] if an entry is not clickable within
///   `waits.element`.
/// - [`PortalError::WebDriver`] / [`PortalError::Lookup`] on browser failures.
pub async fn navigate_menu<P: Page>(
    page: &P,
    path: &[&str],
    waits: &Waits,
) -> Result<(), PortalError> {
    for entry in path {
        let element = wait_for_first(
            page,
            &menu_entry_locators(entry),
            Condition::Clickable,
            waits.element,
            waits.poll,
        )
        .await?
        .ok_or_else(|| PortalError::NavigationFailed {
            step: format!("menu entry \"{entry}\""),
        })?;

        page.click(&element).await?;
        tracing::info!(entry, "menu clicked");
        tokio::time::sleep(waits.menu_settle).await;
    }
    Ok(())
}

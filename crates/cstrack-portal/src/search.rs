//! Query-date entry and search submission on a report page.

use chrono::NaiveDate;

use crate::error::PortalError;
use crate::page::{Locator, Page};
use crate::wait::{wait_for_first, Condition, Waits};

pub const DATE_INPUT_SELECTORS: &[&str] = &[
    "input[type='date']",
    "input[type='text'][name*='date']",
    "input[type='text'][name*='Date']",
    "input.datepicker",
];

/// One selector list covering every date-input pattern, so matches come back
/// in document order whichever pattern each field satisfies.
#[must_use]
pub fn date_input_locator() -> Locator {
    Locator::css(DATE_INPUT_SELECTORS.join(", "))
}

#[must_use]
pub fn search_button_locators() -> Vec<Locator> {
    vec![
        Locator::xpath("//button[contains(text(), '조회') or contains(text(), '검색')]"),
        Locator::xpath("//input[@value='조회' or @value='검색']"),
    ]
}

/// Fill the report's date field(s) with `date` and run the search.
///
/// With a start/end pair both ends get `date`, querying a single day.
///
/// # Errors
///
/// - [`PortalError::NavigationFailed`] if no date input exists or the search
///   control is not clickable within `waits.element`.
/// - [`PortalError::WebDriver`] / [`PortalError::Lookup`] on browser failures.
pub async fn set_date_and_search<P: Page>(
    page: &P,
    date: NaiveDate,
    waits: &Waits,
) -> Result<(), PortalError> {
    let value = date.format("%Y-%m-%d").to_string();

    let inputs = page.find_all(&date_input_locator()).await?;
    if inputs.is_empty() {
        return Err(PortalError::NavigationFailed {
            step: "query date input".to_owned(),
        });
    }
    for input in inputs.iter().take(2) {
        page.force_value(input, &value).await?;
    }
    tracing::info!(date = %value, fields = inputs.len().min(2), "query date set");

    let button = wait_for_first(
        page,
        &search_button_locators(),
        Condition::Clickable,
        waits.element,
        waits.poll,
    )
    .await?
    .ok_or_else(|| PortalError::NavigationFailed {
        step: "search button".to_owned(),
    })?;
    page.click(&button).await?;

    tokio::time::sleep(waits.search_settle).await;
    Ok(())
}

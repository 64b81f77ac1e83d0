//! Reading a total out of a report's results table.
//!
//! Two tiers. The primary tier finds the cell next to the total's label and
//! parses it strictly. When that lookup errors, finds nothing, or finds text
//! that is not a count, the positional fallback reads the first data row and
//! accepts a `0` for text it cannot parse. Fallback reads are logged at `warn`
//! so label drift on the portal shows up in the run log.

use crate::error::PortalError;
use crate::page::{xpath_literal, Locator, Page};
use crate::report::Report;
use crate::wait::{wait_for_first, Condition, Waits};

pub const HEADER_CELLS: &str = "table thead th";
pub const BODY_ROWS: &str = "table tbody tr";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Primary,
    Fallback,
}

impl Tier {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Primary => "primary",
            Tier::Fallback => "fallback",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountReading {
    pub value: u64,
    pub tier: Tier,
}

/// Parse a displayed count: trim, drop thousands separators, require digits only.
#[must_use]
pub fn parse_count_strict(text: &str) -> Option<u64> {
    let digits: String = text.trim().chars().filter(|c| *c != ',').collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Like [`parse_count_strict`] but anything unparsable reads as `0`.
#[must_use]
pub fn parse_count_lenient(text: &str) -> u64 {
    parse_count_strict(text).unwrap_or(0)
}

/// Locators for the value cell beside any of `labels`, in label order.
#[must_use]
pub fn label_value_locators(labels: &[&str]) -> Vec<Locator> {
    labels
        .iter()
        .flat_map(|label| {
            let literal = xpath_literal(label);
            [
                Locator::xpath(format!(
                    "//th[contains(text(), {literal})]/following-sibling::td[1]"
                )),
                Locator::xpath(format!(
                    "//td[contains(text(), {literal})]/following-sibling::td[1]"
                )),
            ]
        })
        .collect()
}

/// Read `report`'s total from the results currently on screen.
///
/// # Errors
///
/// - [`PortalError::DataNotFound`] if the fallback is needed and finds no
///   data rows.
/// - [`PortalError::WebDriver`] / [`PortalError::Lookup`] on browser failures
///   during the fallback.
pub async fn extract_count<P: Page>(
    page: &P,
    report: &Report,
    waits: &Waits,
) -> Result<CountReading, PortalError> {
    match labelled_cell_text(page, report, waits).await {
        Ok(Some(text)) => match parse_count_strict(&text) {
            Some(value) => {
                tracing::info!(
                    report = report.name,
                    value,
                    tier = Tier::Primary.as_str(),
                    "count extracted"
                );
                Ok(CountReading {
                    value,
                    tier: Tier::Primary,
                })
            }
            None => {
                tracing::warn!(
                    report = report.name,
                    raw = %text.trim(),
                    "labelled total is not a count; reading first table row instead"
                );
                positional_count(page, report).await
            }
        },
        Ok(None) => {
            tracing::warn!(
                report = report.name,
                labels = ?report.labels,
                "labelled total not found; reading first table row instead"
            );
            positional_count(page, report).await
        }
        Err(e) => {
            tracing::warn!(
                report = report.name,
                error = %e,
                "labelled total lookup failed; reading first table row instead"
            );
            positional_count(page, report).await
        }
    }
}

async fn labelled_cell_text<P: Page>(
    page: &P,
    report: &Report,
    waits: &Waits,
) -> Result<Option<String>, PortalError> {
    let cell = wait_for_first(
        page,
        &label_value_locators(report.labels),
        Condition::Present,
        waits.element,
        waits.poll,
    )
    .await?;
    match cell {
        Some(cell) => Ok(Some(page.text(&cell).await?)),
        None => Ok(None),
    }
}

async fn positional_count<P: Page>(page: &P, report: &Report) -> Result<CountReading, PortalError> {
    let column = labelled_column(page, report).await?;

    let rows = page.find_all(&Locator::css(BODY_ROWS)).await?;
    let Some(first_row) = rows.first() else {
        return Err(PortalError::DataNotFound {
            report: report.name.to_owned(),
        });
    };

    let cells = page.find_all_in(first_row, &Locator::css("td")).await?;
    let cell = column
        .and_then(|i| cells.get(i))
        .or_else(|| cells.first());
    let text = match cell {
        Some(cell) => page.text(cell).await?,
        None => String::new(),
    };

    let value = parse_count_lenient(&text);
    tracing::warn!(
        report = report.name,
        value,
        tier = Tier::Fallback.as_str(),
        column = ?column,
        raw = %text.trim(),
        "count extracted"
    );
    Ok(CountReading {
        value,
        tier: Tier::Fallback,
    })
}

/// Index of the first header cell mentioning one of the report's labels.
async fn labelled_column<P: Page>(page: &P, report: &Report) -> Result<Option<usize>, PortalError> {
    let headers = page.find_all(&Locator::css(HEADER_CELLS)).await?;
    for (index, header) in headers.iter().enumerate() {
        let text = page.text(header).await?;
        if report.labels.iter().any(|label| text.contains(label)) {
            return Ok(Some(index));
        }
    }
    Ok(None)
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;

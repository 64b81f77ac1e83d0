//! Browser-driven collection of the daily CS counters from the vendor portal.

pub mod collector;
pub mod driver_service;
pub mod error;
pub mod extract;
pub mod login;
pub mod menu;
pub mod page;
pub mod report;
pub mod search;
pub mod wait;
pub mod webdriver;

#[cfg(test)]
mod fake;

pub use collector::{collect_daily_stats, collect_with_page, with_session, PortalSettings};
pub use driver_service::{ChromeDriverService, DriverEndpoint};
pub use error::PortalError;
pub use extract::{parse_count_lenient, parse_count_strict, CountReading, Tier};
pub use page::{xpath_literal, Locator, Page};
pub use report::{Report, INBOUND_CALL_REPORT, QA_REPORT};
pub use wait::Waits;
pub use webdriver::WebDriverPage;

//! The seam between portal logic and the browser.
//!
//! Everything the collector does to the portal goes through [`Page`], so the
//! login, navigation and extraction heuristics run unchanged against a real
//! WebDriver session or an in-memory page in tests.

use async_trait::async_trait;

use crate::error::PortalError;

/// How to find elements: a CSS selector or an XPath expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Locator {
    Css(String),
    XPath(String),
}

impl Locator {
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    pub fn xpath(expression: impl Into<String>) -> Self {
        Self::XPath(expression.into())
    }

    /// Build one CSS locator per selector, preserving order.
    #[must_use]
    pub fn css_all(selectors: &[&str]) -> Vec<Self> {
        selectors.iter().map(|s| Self::css(*s)).collect()
    }
}

impl std::fmt::Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Locator::Css(s) => write!(f, "css={s}"),
            Locator::XPath(s) => write!(f, "xpath={s}"),
        }
    }
}

/// Quote `text` as an XPath 1.0 string literal.
///
/// XPath has no escape sequences, so text containing both quote kinds is
/// assembled with `concat()`.
#[must_use]
pub fn xpath_literal(text: &str) -> String {
    if !text.contains('\'') {
        return format!("'{text}'");
    }
    if !text.contains('"') {
        return format!("\"{text}\"");
    }
    let parts: Vec<String> = text
        .split('\'')
        .map(|part| format!("'{part}'"))
        .collect();
    format!("concat({})", parts.join(", \"'\", "))
}

/// A live document the collector can query and drive.
#[async_trait]
pub trait Page: Send + Sync {
    type Element: Clone + Send + Sync;

    async fn goto(&self, url: &str) -> Result<(), PortalError>;

    async fn current_url(&self) -> Result<String, PortalError>;

    /// All elements currently matching `locator`, in document order.
    async fn find_all(&self, locator: &Locator) -> Result<Vec<Self::Element>, PortalError>;

    async fn find_all_in(
        &self,
        parent: &Self::Element,
        locator: &Locator,
    ) -> Result<Vec<Self::Element>, PortalError>;

    /// Rendered text of the element.
    async fn text(&self, element: &Self::Element) -> Result<String, PortalError>;

    /// Displayed and enabled.
    async fn is_clickable(&self, element: &Self::Element) -> Result<bool, PortalError>;

    async fn click(&self, element: &Self::Element) -> Result<(), PortalError>;

    /// Clear the field and type `text` into it.
    async fn type_into(&self, element: &Self::Element, text: &str) -> Result<(), PortalError>;

    /// Clear the field, assign `value` directly and dispatch a `change` event.
    ///
    /// Needed for date pickers whose validation only runs on `change`.
    async fn force_value(&self, element: &Self::Element, value: &str) -> Result<(), PortalError>;

    /// End the browser session.
    async fn close(self) -> Result<(), PortalError>;
}

//! Portal sign-in.

use cstrack_core::PortalCredentials;

use crate::error::PortalError;
use crate::page::{Locator, Page};
use crate::wait::{find_first, poll_until, wait_for_first, Condition, Waits};

pub const USERNAME_SELECTORS: &[&str] = &[
    "input[type='text']",
    "input[name*='id']",
    "input[name*='Id']",
];

pub const PASSWORD_SELECTORS: &[&str] = &[
    "input[type='password']",
    "input[name*='pw']",
    "input[name*='Pw']",
];

pub const SUBMIT_SELECTORS: &[&str] = &[
    "button[type='submit']",
    "input[type='submit']",
    ".btn-login",
    ".login-btn",
];

/// Navigation chrome that only renders for a signed-in user.
pub const POST_LOGIN_SELECTORS: &[&str] = &[".sidebar", ".gnb", ".nav"];

/// Open the portal root, submit `credentials`, and wait for the signed-in view.
///
/// Success is either a URL change away from the landing page or the
/// appearance of post-login navigation, whichever comes first.
///
/// # Errors
///
/// - [`PortalError::AuthenticationFailed`] if the form cannot be found or the
///   signed-in view does not appear within `waits.login`.
/// - [`PortalError::WebDriver`] / [`PortalError::Lookup`] on browser failures.
pub async fn login<P: Page>(
    page: &P,
    portal_url: &str,
    credentials: &PortalCredentials,
    waits: &Waits,
) -> Result<(), PortalError> {
    page.goto(portal_url).await?;
    let landing_url = page.current_url().await?;

    let username = wait_for_first(
        page,
        &Locator::css_all(USERNAME_SELECTORS),
        Condition::Present,
        waits.login,
        waits.poll,
    )
    .await?
    .ok_or_else(|| auth_failed("login form did not appear"))?;

    let password = find_first(page, &Locator::css_all(PASSWORD_SELECTORS), Condition::Present)
        .await?
        .ok_or_else(|| auth_failed("password field not found"))?;

    page.type_into(&username, &credentials.user_id).await?;
    page.type_into(&password, &credentials.password).await?;

    let submit = find_first(page, &Locator::css_all(SUBMIT_SELECTORS), Condition::Present)
        .await?
        .ok_or_else(|| auth_failed("login button not found"))?;
    page.click(&submit).await?;

    let post_login = Locator::css_all(POST_LOGIN_SELECTORS);
    let (landing_url, post_login) = (&landing_url, &post_login);
    let signed_in = poll_until(waits.login, waits.poll, || async move {
        if page.current_url().await? != *landing_url {
            return Ok(true);
        }
        let nav = find_first(page, post_login, Condition::Present).await?;
        Ok::<_, PortalError>(nav.is_some())
    })
    .await?;

    if !signed_in {
        return Err(auth_failed("no post-login page after submitting credentials"));
    }

    tracing::info!(user_id = %credentials.user_id, "portal login succeeded");
    Ok(())
}

fn auth_failed(reason: &str) -> PortalError {
    PortalError::AuthenticationFailed {
        reason: reason.to_owned(),
    }
}

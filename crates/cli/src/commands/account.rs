//! Account commands: login, signup, session and logout.

use forecast_portal_client::Route;
use forecast_portal_core::{Credentials, FormData, Registration, fields};

use super::{Context, accepted};
use crate::error::CliError;

/// Submit the login form.
///
/// # Errors
///
/// Returns an error if the request fails or the server rejects the credentials.
pub async fn login(ctx: &Context, username: String, password: String) -> Result<(), CliError> {
    let form = FormData::new()
        .with(fields::USERNAME, username)
        .with(fields::PASSWORD, password);

    let outcome = ctx
        .controller(Route::Landing)?
        .submit::<Credentials>(&form)
        .await?;
    accepted(outcome)
}

/// Submit the signup form.
///
/// # Errors
///
/// Returns an error if the request fails or the server rejects the registration.
pub async fn signup(
    ctx: &Context,
    username: String,
    email: String,
    password: String,
) -> Result<(), CliError> {
    let form = FormData::new()
        .with(fields::USERNAME, username)
        .with(fields::EMAIL, email)
        .with(fields::PASSWORD, password);

    let outcome = ctx
        .controller(Route::Landing)?
        .submit::<Registration>(&form)
        .await?;
    accepted(outcome)
}

/// Run the home page's load-time session check.
///
/// # Errors
///
/// Returns an error if the check fails or nobody is logged in.
pub async fn session(ctx: &Context) -> Result<(), CliError> {
    match ctx.gateway.check_session(&ctx.page).await? {
        Some(session) => {
            tracing::debug!(username = %session.username, "Session active");
            Ok(())
        }
        None => Err(CliError::NotLoggedIn),
    }
}

/// End the session.
///
/// # Errors
///
/// Returns an error if the logout request fails.
pub async fn logout(ctx: &Context) -> Result<(), CliError> {
    ctx.gateway.logout(&ctx.page).await?;
    Ok(())
}

//! Password reset commands.

use forecast_portal_client::Route;
use forecast_portal_core::{FormData, PasswordResetConfirmation, PasswordResetRequest, fields};
use url::Url;

use super::{Context, accepted};
use crate::error::CliError;

/// Submit the forgot-password form.
///
/// # Errors
///
/// Returns an error if the server rejects the email or cannot be reached.
pub async fn forgot(ctx: &Context, email: String) -> Result<(), CliError> {
    let form = FormData::new().with(fields::EMAIL, email);

    let outcome = ctx
        .controller(Route::Landing)?
        .submit::<PasswordResetRequest>(&form)
        .await?;
    accepted(outcome)
}

/// Submit the reset form as if opened from `link`.
///
/// # Errors
///
/// Returns an error if `link` is not a URL, the request fails, or the
/// server rejects the token.
pub async fn reset(ctx: &Context, link: &str, password: String) -> Result<(), CliError> {
    let location = Url::parse(link).map_err(CliError::InvalidLink)?;
    if forecast_portal_client::reset_token(&location).is_none() {
        tracing::warn!("Reset link has no token parameter");
    }

    let form = FormData::new().with(fields::NEW_PASSWORD, password);

    let outcome = ctx
        .controller_at(location)
        .submit::<PasswordResetConfirmation>(&form)
        .await?;
    accepted(outcome)
}

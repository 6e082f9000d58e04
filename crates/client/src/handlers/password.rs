//! Forgot-password and reset-password.

use std::future::Future;

use forecast_portal_core::{
    FormData, FormError, FromForm, PasswordResetConfirmation, PasswordResetRequest,
};
use tracing::{info, instrument, warn};
use url::Url;

use super::{Gateway, Outcome, Submission, messages};
use crate::config::Route;
use crate::error::ClientError;
use crate::page::Page;

/// Query parameter of the reset link carrying the token.
const TOKEN_PARAM: &str = "token";

/// The reset token from a reset link, unvalidated. The first `token`
/// parameter wins.
#[must_use]
pub fn reset_token(location: &Url) -> Option<String> {
    location
        .query_pairs()
        .find(|(name, _)| name == TOKEN_PARAM)
        .map(|(_, value)| value.into_owned())
}

impl Gateway {
    /// Request a reset link by email.
    ///
    /// Unlike the other handlers, a failed request is reported to the user
    /// with a generic message instead of being returned.
    ///
    /// # Errors
    ///
    /// Never fails in practice; the `Result` keeps the handler signatures uniform.
    #[instrument(skip_all)]
    pub async fn forgot_password(
        &self,
        page: &dyn Page,
        request: &PasswordResetRequest,
    ) -> Result<Outcome, ClientError> {
        let response = match self.api.forgot_password(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Forgot-password request failed");
                page.alert(messages::TRY_AGAIN);
                return Ok(Outcome::Unreachable);
            }
        };

        let message = response.message();
        if response.is_success() {
            info!("Reset link requested");
            page.alert(&format!(
                "{}{}",
                messages::RESET_LINK_PREFIX,
                message.message_text()
            ));
            Ok(Outcome::Accepted)
        } else {
            warn!(status = %response.status, error = message.error_text(), "Forgot-password rejected");
            page.alert(&format!(
                "{}{}",
                messages::WARNING_PREFIX,
                message.error_text()
            ));
            Ok(Outcome::Rejected)
        }
    }

    /// Set a new password. The server's message (or error) is always shown;
    /// only success goes to the landing page.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is unreadable.
    #[instrument(skip_all, fields(has_token = confirmation.token.is_some()))]
    pub async fn reset_password(
        &self,
        page: &dyn Page,
        confirmation: &PasswordResetConfirmation,
    ) -> Result<Outcome, ClientError> {
        let response = self.api.reset_password(confirmation).await?;

        page.alert(response.message().message_or_error());

        if response.is_success() {
            info!("Password reset");
            page.navigate(Route::Landing);
            Ok(Outcome::Accepted)
        } else {
            warn!(status = %response.status, "Password reset rejected");
            Ok(Outcome::Rejected)
        }
    }
}

impl Submission for PasswordResetRequest {
    type Output = Outcome;

    fn extract(form: &FormData, _location: &Url) -> Result<Self, FormError> {
        Self::from_form(form)
    }

    fn submit(
        self,
        gateway: &Gateway,
        page: &dyn Page,
    ) -> impl Future<Output = Result<Outcome, ClientError>> + Send {
        async move { gateway.forgot_password(page, &self).await }
    }
}

impl Submission for PasswordResetConfirmation {
    type Output = Outcome;

    fn extract(form: &FormData, location: &Url) -> Result<Self, FormError> {
        Self::from_form_with_token(form, reset_token(location))
    }

    fn submit(
        self,
        gateway: &Gateway,
        page: &dyn Page,
    ) -> impl Future<Output = Result<Outcome, ClientError>> + Send {
        async move { gateway.reset_password(page, &self).await }
    }
}

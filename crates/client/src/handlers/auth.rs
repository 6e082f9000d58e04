//! Login, signup and logout.

use std::future::Future;

use forecast_portal_core::{Credentials, FormData, FormError, FromForm, Registration};
use tracing::{info, instrument, warn};
use url::Url;

use super::{Gateway, Outcome, Submission, messages};
use crate::config::Route;
use crate::error::ClientError;
use crate::page::Page;

impl Gateway {
    /// Log in. Success alerts and goes to the home page; a rejection alerts
    /// the server's error and stays.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is unreadable.
    #[instrument(skip_all, fields(username = %credentials.username))]
    pub async fn login(
        &self,
        page: &dyn Page,
        credentials: &Credentials,
    ) -> Result<Outcome, ClientError> {
        let response = self.api.login(credentials).await?;

        let outcome = if response.is_success() {
            info!("Login successful");
            page.alert(messages::LOGIN_SUCCESS);
            page.navigate(Route::Home);
            Outcome::Accepted
        } else {
            let message = response.message();
            warn!(status = %response.status, error = message.error_text(), "Login rejected");
            page.alert(message.error_text());
            Outcome::Rejected
        };

        // The page already reflects the server's answer when this fails
        self.session.persist_cookies(&self.api)?;
        Ok(outcome)
    }

    /// Create an account. Success alerts the server's message and goes to
    /// the landing page.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is unreadable.
    #[instrument(skip_all, fields(username = %registration.username))]
    pub async fn signup(
        &self,
        page: &dyn Page,
        registration: &Registration,
    ) -> Result<Outcome, ClientError> {
        let response = self.api.signup(registration).await?;
        let message = response.message();

        if response.is_success() {
            info!("Account created");
            page.alert(message.message_text());
            page.navigate(Route::Landing);
            Ok(Outcome::Accepted)
        } else {
            warn!(status = %response.status, error = message.error_text(), "Signup rejected");
            page.alert(message.error_text());
            Ok(Outcome::Rejected)
        }
    }

    /// End the server-side session and go to the landing page.
    ///
    /// The stored API key is left in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip_all)]
    pub async fn logout(&self, page: &dyn Page) -> Result<(), ClientError> {
        self.api.logout().await?;

        info!("Logged out");
        page.navigate(Route::Landing);
        self.session.persist_cookies(&self.api)?;
        Ok(())
    }
}

impl Submission for Credentials {
    type Output = Outcome;

    fn extract(form: &FormData, _location: &Url) -> Result<Self, FormError> {
        Self::from_form(form)
    }

    fn submit(
        self,
        gateway: &Gateway,
        page: &dyn Page,
    ) -> impl Future<Output = Result<Outcome, ClientError>> + Send {
        async move { gateway.login(page, &self).await }
    }
}

impl Submission for Registration {
    type Output = Outcome;

    fn extract(form: &FormData, _location: &Url) -> Result<Self, FormError> {
        Self::from_form(form)
    }

    fn submit(
        self,
        gateway: &Gateway,
        page: &dyn Page,
    ) -> impl Future<Output = Result<Outcome, ClientError>> + Send {
        async move { gateway.signup(page, &self).await }
    }
}

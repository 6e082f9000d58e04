//! Wiring between a submitted form and its handler.
//!
//! A [`FormController`] is bound to one page: the gateway it submits
//! through, the [`Page`] it renders to and the page location (the reset
//! page reads its token from there). Submitting extracts the typed input
//! named by the [`Submission`] type and runs its handler.
//!
//! ```no_run
//! # use std::sync::Arc;
//! # use forecast_portal_client::{FormController, Gateway, GatewayConfig, MemorySessionStore, Page};
//! # use forecast_portal_core::{Credentials, FormData};
//! # async fn example(page: &dyn Page) -> Result<(), forecast_portal_client::ClientError> {
//! let config = GatewayConfig::from_env()?;
//! let gateway = Gateway::connect(&config, Arc::new(MemorySessionStore::new()))?;
//! let location = config.api_url.join(&config.pages.landing)?;
//! let login = FormController::new(&gateway, page, location);
//!
//! let form = FormData::new()
//!     .with("username", "alice")
//!     .with("password", "hunter2");
//! login.submit::<Credentials>(&form).await?;
//! # Ok(())
//! # }
//! ```

use forecast_portal_core::FormData;
use tracing::error;
use url::Url;

use crate::error::ClientError;
use crate::handlers::{Gateway, Submission};
use crate::page::Page;

/// Binds a page to the gateway.
pub struct FormController<'a> {
    gateway: &'a Gateway,
    page: &'a dyn Page,
    location: Url,
}

impl<'a> FormController<'a> {
    #[must_use]
    pub fn new(gateway: &'a Gateway, page: &'a dyn Page, location: Url) -> Self {
        Self {
            gateway,
            page,
            location,
        }
    }

    /// The page location forms are submitted from.
    #[must_use]
    pub const fn location(&self) -> &Url {
        &self.location
    }

    /// Extract `S` from the form and run its handler.
    ///
    /// Failures are logged here and returned; none is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if a bound field is missing or the handler fails.
    pub async fn submit<S: Submission>(&self, form: &FormData) -> Result<S::Output, ClientError> {
        let input = S::extract(form, &self.location).inspect_err(|e| {
            error!(error = %e, "Form submission rejected before sending");
        })?;

        input
            .submit(self.gateway, self.page)
            .await
            .inspect_err(|e| error!(error = %e, "Form submission failed"))
    }
}

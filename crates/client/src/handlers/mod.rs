//! Submit handlers.
//!
//! Each handler performs one backend round trip (the forecast handler runs a
//! session check first) and then updates the [`Page`] it was given:
//!
//! | Handler | Endpoint | On success | On rejection |
//! |---|---|---|---|
//! | [`Gateway::login`] | `/login` | alert, go home | alert `error` |
//! | [`Gateway::signup`] | `/signup` | alert `message`, go to landing | alert `error` |
//! | [`Gateway::forgot_password`] | `/forgot-password` | alert `📩 message` | alert `⚠️ error` |
//! | [`Gateway::reset_password`] | `/reset-password` | alert, go to landing | alert |
//! | [`Gateway::forecast`] | `/check_session`, `/predict` | render prediction | render error |
//! | [`Gateway::logout`] | `/logout` | go to landing | go to landing |
//!
//! Every handler returns `Result`; transport failures that the handler does
//! not turn into user feedback are returned to the caller.

mod auth;
mod forecast;
mod password;

use std::future::Future;
use std::sync::Arc;

use forecast_portal_core::{FormData, FormError};
use tracing::instrument;
use url::Url;

use crate::api::ApiClient;
use crate::config::GatewayConfig;
use crate::error::ClientError;
use crate::page::Page;
use crate::session::{Session, SessionManager, SessionStore};

pub use password::reset_token;

/// User-facing texts that do not come from the server.
pub mod messages {
    pub const LOGIN_SUCCESS: &str = "Login successful!";
    pub const RESET_LINK_PREFIX: &str = "📩 ";
    pub const WARNING_PREFIX: &str = "⚠️ ";
    pub const TRY_AGAIN: &str = "Something went wrong. Try again.";
}

/// How a form submission ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The server answered 2xx.
    Accepted,
    /// The server answered non-2xx; its error was shown.
    Rejected,
    /// The request failed; a generic message was shown.
    Unreachable,
}

/// Entry point for every handler: the API client plus the session it acts in.
#[derive(Debug, Clone)]
pub struct Gateway {
    api: ApiClient,
    session: SessionManager,
}

impl Gateway {
    #[must_use]
    pub const fn new(api: ApiClient, session: SessionManager) -> Self {
        Self { api, session }
    }

    /// Build the client for `config` and restore persisted cookies from `store`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or the store
    /// cannot be read.
    pub fn connect(
        config: &GatewayConfig,
        store: Arc<dyn SessionStore>,
    ) -> Result<Self, ClientError> {
        let api = ApiClient::new(config)?;
        let session = SessionManager::new(store);
        session.restore(&api)?;
        Ok(Self::new(api, session))
    }

    #[must_use]
    pub const fn api(&self) -> &ApiClient {
        &self.api
    }

    #[must_use]
    pub const fn session(&self) -> &SessionManager {
        &self.session
    }

    /// The check a page runs when it loads.
    ///
    /// # Errors
    ///
    /// Returns an error if the session check fails.
    #[instrument(skip_all)]
    pub async fn check_session(&self, page: &dyn Page) -> Result<Option<Session>, ClientError> {
        self.session.check(&self.api, page).await
    }
}

/// A typed form submission.
pub trait Submission: Sized {
    type Output;

    /// Extract the input from the submitted fields and the page location.
    ///
    /// # Errors
    ///
    /// Returns [`FormError`] if a bound field is missing.
    fn extract(form: &FormData, location: &Url) -> Result<Self, FormError>;

    /// Run the matching handler.
    fn submit(
        self,
        gateway: &Gateway,
        page: &dyn Page,
    ) -> impl Future<Output = Result<Self::Output, ClientError>> + Send;
}

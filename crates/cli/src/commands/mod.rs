//! Command implementations.
//!
//! Every command submits one form through a [`FormController`] bound to
//! the terminal page, exactly as the matching web page would.

use std::io::Stdout;
use std::sync::Arc;

use forecast_portal_client::{
    FileSessionStore, FormController, Gateway, GatewayConfig, Outcome, Route,
};
use url::Url;

use crate::error::CliError;
use crate::page::TerminalPage;

pub mod account;
pub mod forecast;
pub mod password;

/// Everything a command needs: configuration, gateway and output page.
pub struct Context {
    pub config: GatewayConfig,
    pub gateway: Gateway,
    pub page: TerminalPage<Stdout>,
}

impl Context {
    /// Load configuration and restore the session persisted by earlier runs.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is invalid or the session file is unreadable.
    pub fn from_env() -> Result<Self, CliError> {
        let config = GatewayConfig::from_env()?;
        let store = FileSessionStore::new(config.session_file());
        tracing::debug!(path = %store.path().display(), "Using session file");

        let gateway = Gateway::connect(&config, Arc::new(store))?;
        let page = TerminalPage::new(std::io::stdout(), config.pages.clone());

        Ok(Self {
            config,
            gateway,
            page,
        })
    }

    /// A form controller for the page at `route`.
    ///
    /// # Errors
    ///
    /// Returns an error if the page path does not join onto the API URL.
    pub fn controller(&self, route: Route) -> Result<FormController<'_>, CliError> {
        let location = self
            .config
            .api_url
            .join(self.config.pages.resolve(route))
            .map_err(forecast_portal_client::ClientError::from)?;
        Ok(self.controller_at(location))
    }

    /// A form controller for a page at an explicit location.
    pub fn controller_at(&self, location: Url) -> FormController<'_> {
        FormController::new(&self.gateway, &self.page, location)
    }
}

/// Map a handler outcome to the command result.
pub fn accepted(outcome: Outcome) -> Result<(), CliError> {
    match outcome {
        Outcome::Accepted => Ok(()),
        Outcome::Rejected | Outcome::Unreachable => Err(CliError::NotAccepted),
    }
}

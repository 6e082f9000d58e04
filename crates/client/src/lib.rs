//! Forecast Portal Client - API client and session gateway.
//!
//! This crate talks to the Forecast Portal backend on behalf of a page:
//! it submits login, signup and password-reset forms, keeps the session
//! (cookies and API key) in an explicit store, and runs the session-gated
//! demand forecast.
//!
//! # Architecture
//!
//! - [`ApiClient`] - one method per backend endpoint, built on `reqwest`
//! - [`SessionManager`] - owns the persisted session slot ([`SessionStore`])
//! - [`Page`] - the surface handlers render to (alerts, navigation, results)
//! - [`Gateway`] - the submit handlers, one per form
//! - [`FormController`] - extracts typed input from a form and dispatches it
//!
//! # Modules
//!
//! - [`api`] - HTTP client and endpoint paths
//! - [`config`] - Environment configuration and page routes
//! - [`error`] - Error taxonomy
//! - [`form`] - Form controller
//! - [`handlers`] - Submit handlers
//! - [`page`] - Rendering surface and forecast views
//! - [`session`] - Session manager and stores

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod form;
pub mod handlers;
pub mod page;
pub mod session;

pub use api::{ApiClient, ApiResponse};
pub use config::{GatewayConfig, PageRoutes, Route};
pub use error::ClientError;
pub use form::FormController;
pub use handlers::{Gateway, Outcome, Submission, reset_token};
pub use page::{ForecastView, LoadingIndicator, Page};
pub use session::{
    ApiKey, FileSessionStore, MemorySessionStore, Session, SessionManager, SessionStore,
    StoredSession,
};

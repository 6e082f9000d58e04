//! Core types for the Forecast Portal.
//!
//! This module provides typed request and response bodies for every backend
//! endpoint, plus the form abstraction they are extracted from.

pub mod auth;
pub mod forecast;
pub mod form;
pub mod session;

pub use auth::{
    Credentials, PasswordResetConfirmation, PasswordResetRequest, Registration, fields,
};
pub use forecast::{
    ForecastInput, ForecastResponse, ForecastResult, HOLIDAY_PROMOTION_FIELD, KNOWN_FORECAST_FIELDS,
    coerce_field,
};
pub use form::{FormData, FormError, FromForm};
pub use session::{ApiMessage, SessionStatus};

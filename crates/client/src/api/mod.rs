//! Backend HTTP API client.
//!
//! This module provides:
//! - [`ApiClient`] for every backend endpoint
//! - [`ApiResponse`] holding the status and JSON body of a form submission
//!
//! Requests are split across two `reqwest` clients: a credentialed one that
//! owns the cookie jar (login, session check, logout) and an anonymous one
//! without cookies (signup, password reset). `/predict` authenticates with
//! the `x-api-key` header instead of cookies.

mod client;

pub use client::{API_KEY_HEADER, ApiClient, ApiResponse, endpoints};

//! Forecast Portal Core - Shared wire and form types.
//!
//! This crate provides the types exchanged between the Forecast Portal
//! client and the backend API:
//! - `client` - API client, session gateway and submit handlers
//! - `cli` - Terminal front end for the client
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no HTTP clients,
//! no storage. Everything here is either built from a submitted form or
//! deserialized from a backend response.
//!
//! # Modules
//!
//! - [`types`] - Form data, auth request bodies, session status and forecast payloads

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

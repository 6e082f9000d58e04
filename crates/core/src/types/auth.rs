//! Authentication request bodies.
//!
//! Passwords are held as [`SecretString`] so they never show up in `Debug`
//! output or logs; they are exposed only when serialized into a request body.

use secrecy::{ExposeSecret, SecretString};
use serde::{Serialize, Serializer};

use super::form::{FormData, FormError, FromForm};

/// Form field names the auth forms are bound to.
pub mod fields {
    /// Username input.
    pub const USERNAME: &str = "username";
    /// Password input (login and signup).
    pub const PASSWORD: &str = "password";
    /// Email input (signup and forgot-password).
    pub const EMAIL: &str = "email";
    /// New password input on the reset page.
    pub const NEW_PASSWORD: &str = "newPassword";
}

/// Login credentials, sent to `POST /login`.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    #[serde(serialize_with = "expose")]
    pub password: SecretString,
}

impl Credentials {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }
}

impl FromForm for Credentials {
    fn from_form(form: &FormData) -> Result<Self, FormError> {
        Ok(Self::new(
            form.require(fields::USERNAME)?,
            form.require(fields::PASSWORD)?,
        ))
    }
}

/// Account registration, sent to `POST /signup`.
///
/// The email is not validated client-side; the server decides.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    #[serde(serialize_with = "expose")]
    pub password: SecretString,
}

impl Registration {
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: SecretString::from(password.into()),
        }
    }
}

impl FromForm for Registration {
    fn from_form(form: &FormData) -> Result<Self, FormError> {
        Ok(Self::new(
            form.require(fields::USERNAME)?,
            form.require(fields::EMAIL)?,
            form.require(fields::PASSWORD)?,
        ))
    }
}

/// Password reset request, sent to `POST /forgot-password`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PasswordResetRequest {
    pub email: String,
}

impl FromForm for PasswordResetRequest {
    fn from_form(form: &FormData) -> Result<Self, FormError> {
        Ok(Self {
            email: form.require(fields::EMAIL)?.to_owned(),
        })
    }
}

/// New password submission, sent to `POST /reset-password`.
///
/// The token comes from the reset link, not from the form. A missing token
/// is sent as `null`.
#[derive(Debug, Clone, Serialize)]
pub struct PasswordResetConfirmation {
    pub token: Option<String>,
    #[serde(serialize_with = "expose")]
    pub new_password: SecretString,
}

impl PasswordResetConfirmation {
    #[must_use]
    pub fn new(token: Option<String>, new_password: impl Into<String>) -> Self {
        Self {
            token,
            new_password: SecretString::from(new_password.into()),
        }
    }

    /// Build the confirmation from the reset form and a token taken from the page.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::MissingField`] if the new password field is absent.
    pub fn from_form_with_token(form: &FormData, token: Option<String>) -> Result<Self, FormError> {
        Ok(Self::new(token, form.require(fields::NEW_PASSWORD)?))
    }
}

fn expose<S: Serializer>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

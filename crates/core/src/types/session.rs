//! Session status and generic message bodies returned by the backend.

use serde_json::Value;

/// Response of `GET /check_session`.
///
/// A body that is not an object, or lacks a boolean `logged_in`, reads as
/// logged out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionStatus {
    pub logged_in: bool,
    pub username: Option<String>,
    pub api_key: Option<String>,
}

impl SessionStatus {
    /// Extract the session fields from a JSON body. Wrongly typed fields read as absent.
    #[must_use]
    pub fn from_json(body: &Value) -> Self {
        let Some(object) = body.as_object() else {
            return Self::default();
        };
        let text = |name: &str| object.get(name).and_then(Value::as_str).map(str::to_owned);

        Self {
            logged_in: object
                .get("logged_in")
                .and_then(Value::as_bool)
                .unwrap_or_default(),
            username: text("username"),
            api_key: text("api_key"),
        }
    }
}

/// The `{message}` / `{error}` body most endpoints answer with.
///
/// Built from an arbitrary JSON value: non-object bodies and non-string
/// fields read as absent rather than failing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiMessage {
    pub message: Option<String>,
    pub error: Option<String>,
}

impl ApiMessage {
    /// Text shown when the server sent neither a message nor an error.
    pub const UNKNOWN_ERROR: &'static str = "Unknown error";

    /// Extract the `message` and `error` string fields from a JSON body.
    #[must_use]
    pub fn from_json(body: &Value) -> Self {
        let field = |name: &str| body.get(name).and_then(Value::as_str).map(str::to_owned);
        Self {
            message: field("message"),
            error: field("error"),
        }
    }

    /// The server's error text, or [`ApiMessage::UNKNOWN_ERROR`].
    #[must_use]
    pub fn error_text(&self) -> &str {
        self.error.as_deref().unwrap_or(Self::UNKNOWN_ERROR)
    }

    /// The server's message text, or an empty string.
    #[must_use]
    pub fn message_text(&self) -> &str {
        self.message.as_deref().unwrap_or_default()
    }

    /// The message if it is non-empty, otherwise the error text.
    #[must_use]
    pub fn message_or_error(&self) -> &str {
        self.message
            .as_deref()
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| self.error_text())
    }
}

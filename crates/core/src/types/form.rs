//! Submitted form data.

use thiserror::Error;

/// Errors that can occur when extracting typed input from a [`FormData`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// A field the submitter is bound to was not present in the submission.
    #[error("form field `{0}` is missing")]
    MissingField(String),
}

/// The fields of one form submission, in document order.
///
/// Values are kept as raw strings exactly as entered. The same name may
/// appear more than once; [`FormData::get`] returns the last occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    entries: Vec<(String, String)>,
}

impl FormData {
    /// Create an empty submission.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a field to the submission.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Builder-style [`FormData::append`].
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.append(name, value);
        self
    }

    /// Returns the value of the last field named `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Returns the value of a field the caller is bound to.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::MissingField`] if no field named `name` was submitted.
    pub fn require(&self, name: &str) -> Result<&str, FormError> {
        self.get(name)
            .ok_or_else(|| FormError::MissingField(name.to_owned()))
    }

    /// Iterate over all fields in submission order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Number of submitted fields.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the submission has no fields.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for FormData
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

/// Typed input extracted from a form submission.
pub trait FromForm: Sized {
    /// Extract the input from the submitted fields.
    ///
    /// # Errors
    ///
    /// Returns [`FormError`] if a required field is absent.
    fn from_form(form: &FormData) -> Result<Self, FormError>;
}

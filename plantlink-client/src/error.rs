use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use thiserror::Error;

/// Errors produced at the HTTP boundary.
///
/// Nothing here is retried automatically and nothing panics past this crate;
/// callers convert to a display string and decide how to surface it.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never completed: connect failure, timeout, or a success
    /// body that was not valid JSON.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The backend answered with a non-success status.
    #[error("{0}")]
    Backend(BackendError),
}

impl ApiError {
    /// Backend per-field validation errors flattened to the first message per
    /// field, when the failure carried any.
    pub fn field_errors(&self) -> Option<BTreeMap<String, String>> {
        match self {
            ApiError::Backend(backend) if !backend.field_errors.is_empty() => Some(
                backend
                    .field_errors
                    .iter()
                    .filter_map(|(field, messages)| {
                        messages.first().map(|m| (field.clone(), m.clone()))
                    })
                    .collect(),
            ),
            _ => None,
        }
    }
}

/// A structured error reported by the backend.
///
/// Validation failures carry a per-field `errors` map whose values may be a
/// single string or an array of strings; general failures carry `title`
/// and/or `message`. Display follows that priority order and falls back to
/// the status code when the body carried neither.
#[derive(Debug)]
pub struct BackendError {
    pub status: u16,
    pub field_errors: BTreeMap<String, Vec<String>>,
    pub title: Option<String>,
    pub message: Option<String>,
}

impl BackendError {
    pub(crate) fn from_response(status: u16, body: &str) -> Self {
        let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
        let field_errors = parsed
            .errors
            .into_iter()
            .map(|(field, messages)| (field, messages.into_vec()))
            .collect();

        Self {
            status,
            field_errors,
            title: parsed.title,
            message: parsed.message,
        }
    }
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.field_errors.is_empty() {
            let flattened: Vec<String> = self
                .field_errors
                .iter()
                .filter_map(|(field, messages)| {
                    messages.first().map(|m| format!("{field}: {m}"))
                })
                .collect();
            return write!(f, "{}", flattened.join("; "));
        }
        if let Some(title) = &self.title {
            return write!(f, "{title}");
        }
        if let Some(message) = &self.message {
            return write!(f, "{message}");
        }
        write!(f, "request failed with status {}", self.status)
    }
}

impl std::error::Error for BackendError {}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: BTreeMap<String, OneOrMany>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// The backend reports field messages as either a single string or an array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    fn into_vec(self) -> Vec<String> {
        match self {
            OneOrMany::One(message) => vec![message],
            OneOrMany::Many(messages) => messages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_errors_take_priority_over_title() {
        let error = BackendError::from_response(
            400,
            r#"{"errors":{"DeviceName":["Too short."]},"title":"One or more validation errors occurred."}"#,
        );
        assert_eq!(error.to_string(), "DeviceName: Too short.");
    }

    #[test]
    fn single_string_and_array_messages_both_parse() {
        let error = BackendError::from_response(
            400,
            r#"{"errors":{"DeviceName":"Too short.","Description":["Too long.","Bad charset."]}}"#,
        );
        assert_eq!(error.field_errors["DeviceName"], vec!["Too short."]);
        assert_eq!(error.field_errors["Description"].len(), 2);
    }

    #[test]
    fn title_beats_message_and_status_is_the_last_resort() {
        let titled = BackendError::from_response(500, r#"{"title":"Boom","message":"ignored"}"#);
        assert_eq!(titled.to_string(), "Boom");

        let messaged = BackendError::from_response(500, r#"{"message":"Broke"}"#);
        assert_eq!(messaged.to_string(), "Broke");

        let opaque = BackendError::from_response(502, "<html>bad gateway</html>");
        assert_eq!(opaque.to_string(), "request failed with status 502");
    }
}

//! API-level error types.

use thiserror::Error;

/// Failures of a single round trip to the posts backend or a feed endpoint.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// No response reached us (connection refused, DNS, timeout).
    #[error("Transport failed: {0}")]
    Transport(String),

    #[error("Backend responded with HTTP {status}")]
    Http { status: u16, body: String },

    /// A write was rejected by the backend (4xx other than 404).
    #[error("Validation failed: {details}")]
    Validation { details: serde_json::Value },

    #[error("Post not found")]
    NotFound,

    /// The response arrived but was not in the expected shape.
    #[error("Malformed response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Human-readable message for inline form errors and notices.
    ///
    /// Validation details are flattened to `field: message` pairs when the
    /// backend returned the usual `{field: [messages]}` object.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Validation { details } => match details {
                serde_json::Value::Object(fields) if !fields.is_empty() => fields
                    .iter()
                    .map(|(field, messages)| format!("{}: {}", field, flatten(messages)))
                    .collect::<Vec<_>>()
                    .join("; "),
                serde_json::Value::Null => "An error occurred".to_string(),
                other => flatten(other),
            },
            ApiError::NotFound => "The post no longer exists".to_string(),
            ApiError::Transport(_) => "Could not reach the server".to_string(),
            ApiError::Http { status, .. } => format!("Server error (HTTP {})", status),
            ApiError::Decode(_) => "Unexpected response from the server".to_string(),
        }
    }
}

fn flatten(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Array(items) => items.iter().map(flatten).collect::<Vec<_>>().join(", "),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn validation_message_lists_fields() {
        let err = ApiError::Validation {
            details: json!({"title": ["This field may not be blank."]}),
        };
        assert_eq!(err.user_message(), "title: This field may not be blank.");
    }

    #[test]
    fn validation_without_details_falls_back() {
        let err = ApiError::Validation {
            details: serde_json::Value::Null,
        };
        assert_eq!(err.user_message(), "An error occurred");
    }

    #[test]
    fn http_message_carries_status() {
        let err = ApiError::Http {
            status: 503,
            body: String::new(),
        };
        assert_eq!(err.user_message(), "Server error (HTTP 503)");
    }
}

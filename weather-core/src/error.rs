//! Error types for fetching weather and persisting the last city.

use thiserror::Error;

/// Sentinel carried when the server answers 2xx without a body.
pub const EMPTY_RESPONSE_MESSAGE: &str = "empty response from server";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    /// Connection, DNS or timeout failure; carries the underlying message.
    #[error("{0}")]
    Network(String),

    /// Non-2xx answer; `body` is the raw response text.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("{}", EMPTY_RESPONSE_MESSAGE)]
    EmptyPayload,

    /// 2xx with a body that is present but not valid JSON for the model.
    #[error("{0}")]
    Decode(String),
}

impl FetchError {
    /// Text shown in a `Failure` state.
    pub fn message(&self) -> String {
        match self {
            Self::Network(msg) | Self::Decode(msg) => msg.clone(),
            Self::Http { body, .. } => body.clone(),
            Self::EmptyPayload => EMPTY_RESPONSE_MESSAGE.to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Preferences I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse preferences: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize preferences: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_message_is_body_verbatim() {
        let err = FetchError::Http { status: 404, body: "city not found".into() };
        assert_eq!(err.message(), "city not found");
        assert!(err.to_string().contains("404"));
    }

    #[test]
    fn empty_payload_uses_sentinel() {
        assert_eq!(FetchError::EmptyPayload.message(), "empty response from server");
        assert_eq!(FetchError::EmptyPayload.to_string(), "empty response from server");
    }

    #[test]
    fn network_message_passes_through() {
        let err = FetchError::Network("operation timed out".into());
        assert_eq!(err.message(), "operation timed out");
    }
}

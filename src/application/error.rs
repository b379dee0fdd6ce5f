// Normalized error contract shared by every core operation
use thiserror::Error;

/// A failure reduced to one of four fixed, user-facing kinds.
///
/// Transport failures are normalized once, inside the HTTP client. Services
/// above it log context and pass the same value through unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("request timed out, check network connectivity")]
    Timeout,

    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("cannot connect to server, check network connectivity")]
    Network,
}

impl ApiError {
    pub fn empty_import() -> Self {
        ApiError::Validation("no valid data to import".to_string())
    }

    /// Build a server error from a failing status and its (possibly absent) body
    pub fn from_status(status: u16, body: Option<&serde_json::Value>) -> Self {
        let message = body
            .and_then(|b| b.get("message"))
            .and_then(|m| m.as_str())
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("server error ({})", status));

        ApiError::Server { status, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_server_message_prefers_body() {
        let body = json!({"message": "duplicate observation"});
        let err = ApiError::from_status(409, Some(&body));
        assert_eq!(err.to_string(), "duplicate observation");
    }

    #[test]
    fn test_server_message_falls_back_to_status() {
        assert_eq!(ApiError::from_status(500, None).to_string(), "server error (500)");

        let body = json!({"error": "boom"});
        assert_eq!(ApiError::from_status(502, Some(&body)).to_string(), "server error (502)");
    }

    #[test]
    fn test_fixed_messages() {
        assert_eq!(ApiError::empty_import().to_string(), "no valid data to import");
        assert_eq!(ApiError::Timeout.to_string(), "request timed out, check network connectivity");
        assert_eq!(
            ApiError::Network.to_string(),
            "cannot connect to server, check network connectivity"
        );
    }
}

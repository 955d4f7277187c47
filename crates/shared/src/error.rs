//! Error types returned at the HTTP client boundaries.

use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Errors from a news source fetch. Callers degrade to placeholder text.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("request failed: {0}")]
    Request(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    Malformed(String),
}

impl FetchError {
    pub(crate) fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            FetchError::Timeout(timeout)
        } else if err.is_decode() {
            FetchError::Malformed(err.to_string())
        } else {
            FetchError::Request(err.to_string())
        }
    }
}

/// Errors from the generation service, classified by recoverability.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("rate limited: {0}")]
    RateLimited(String),

    #[error("service overloaded: {0}")]
    Overloaded(String),

    #[error("authentication failed: {0}")]
    Unauthorized(String),

    #[error("model not found: {0}")]
    NotFound(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected response: {0}")]
    Malformed(String),
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

impl GenerationError {
    /// Overload and quota errors clear up on their own; everything else needs a human.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            GenerationError::RateLimited(_) | GenerationError::Overloaded(_)
        )
    }

    /// Classify an error response from its HTTP status and the provider's
    /// `{"error": {"status": ..., "message": ...}}` body when present.
    pub fn from_response(status: u16, body: &str) -> Self {
        let (category, message) = match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(envelope) => (envelope.error.status, envelope.error.message),
            Err(_) => (String::new(), body.trim().to_string()),
        };
        let message = if message.is_empty() {
            format!("HTTP {}", status)
        } else {
            message
        };

        match (status, category.as_str()) {
            (429, _) | (_, "RESOURCE_EXHAUSTED") => GenerationError::RateLimited(message),
            (503, _) | (_, "UNAVAILABLE") => GenerationError::Overloaded(message),
            (401 | 403, _) | (_, "UNAUTHENTICATED" | "PERMISSION_DENIED") => {
                GenerationError::Unauthorized(message)
            }
            (404, _) | (_, "NOT_FOUND") => GenerationError::NotFound(message),
            (400, _) | (_, "INVALID_ARGUMENT" | "FAILED_PRECONDITION") => {
                GenerationError::InvalidRequest(message)
            }
            _ => GenerationError::Api { status, message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quota_and_overload_are_transient() {
        let quota = GenerationError::from_response(
            429,
            r#"{"error":{"code":429,"message":"Quota exceeded","status":"RESOURCE_EXHAUSTED"}}"#,
        );
        assert!(matches!(quota, GenerationError::RateLimited(ref m) if m == "Quota exceeded"));
        assert!(quota.is_transient());

        let overloaded = GenerationError::from_response(503, "The model is overloaded.");
        assert!(matches!(overloaded, GenerationError::Overloaded(_)));
        assert!(overloaded.is_transient());
    }

    #[test]
    fn structured_status_wins_over_generic_code() {
        let err = GenerationError::from_response(
            500,
            r#"{"error":{"code":500,"message":"busy","status":"UNAVAILABLE"}}"#,
        );
        assert!(err.is_transient());
    }

    #[test]
    fn auth_and_config_errors_are_permanent() {
        let cases = [
            (401, GenerationError::from_response(401, "")),
            (403, GenerationError::from_response(403, "denied")),
            (404, GenerationError::from_response(404, "no such model")),
            (400, GenerationError::from_response(400, "bad payload")),
            (500, GenerationError::from_response(500, "boom")),
        ];
        for (status, err) in cases {
            assert!(!err.is_transient(), "status {} should be permanent", status);
        }
        assert!(matches!(
            GenerationError::from_response(404, "x"),
            GenerationError::NotFound(_)
        ));
        assert!(matches!(
            GenerationError::from_response(401, ""),
            GenerationError::Unauthorized(ref m) if m == "HTTP 401"
        ));
    }

    #[test]
    fn transport_errors_are_not_retried() {
        assert!(!GenerationError::Transport("connection reset".into()).is_transient());
        assert!(!GenerationError::Malformed("no candidates".into()).is_transient());
    }
}

use thiserror::Error;

/// Errors returned by chat-completion backends
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LlmError {
    /// HTTP 401/403
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// HTTP 429
    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("The model returned no content")]
    EmptyResponse,
}

impl LlmError {
    /// Map a non-success HTTP status and body to an error
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            401 | 403 => LlmError::Authentication(body),
            429 => LlmError::RateLimited(body),
            _ => LlmError::Api {
                status,
                message: body,
            },
        }
    }
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            LlmError::Decode(err.to_string())
        } else {
            LlmError::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            LlmError::from_status(401, "bad key".into()),
            LlmError::Authentication(_)
        ));
        assert!(matches!(
            LlmError::from_status(429, "slow down".into()),
            LlmError::RateLimited(_)
        ));
        let err = LlmError::from_status(503, "overloaded".into());
        assert_eq!(err.to_string(), "API error (status 503): overloaded");
    }
}

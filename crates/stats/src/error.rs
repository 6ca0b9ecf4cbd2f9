/// Stats client result type
pub type Result<T> = std::result::Result<T, FetchError>;

/// Ways a stats request can fail
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// DNS, connection or body-read failure
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Server answered with a non-2xx status
    #[error("HTTP error. Status = {status}")]
    Http {
        /// HTTP status code
        status: u16,
    },

    /// 2xx response whose body is not the expected JSON
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Client could not be built from the given config
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl FetchError {
    /// Short label for log fields and CLI output
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Network(_) => "network",
            FetchError::Http { .. } => "http",
            FetchError::Decode(_) => "decode",
            FetchError::Config(_) => "config",
        }
    }

    /// Status code for `Http` errors
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Http { status } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_message_carries_status() {
        let err = FetchError::Http { status: 503 };
        assert_eq!(err.to_string(), "HTTP error. Status = 503");
        assert_eq!(err.status(), Some(503));
        assert_eq!(err.kind(), "http");
    }

    #[test]
    fn test_decode_error_from_serde() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: FetchError = serde_err.into();
        assert_eq!(err.kind(), "decode");
        assert_eq!(err.status(), None);
        assert!(err.to_string().starts_with("failed to decode response"));
    }
}

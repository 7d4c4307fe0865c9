use std::fmt;

/// Error type for Theta API operations
///
/// The variants are deliberately distinct so a caller can tell a missing
/// remote object (`NotFound`) apart from a broken connection (`Transport`)
/// or a response it could not understand (`Decode`).
#[derive(Debug)]
pub enum ThetaError {
    /// Login failed; the provider cannot be configured
    Auth(String),
    /// Network failure or non-2xx HTTP status
    Transport {
        url: String,
        status: Option<u16>,
        message: String,
        body: String,
    },
    /// Response body was not the JSON shape we expected
    Decode { context: String, message: String },
    /// Well-formed envelope whose status is not "success"
    Api {
        context: String,
        status: String,
        body: String,
    },
    /// Resource absent on the server
    NotFound { kind: String, id: String },
    /// A human-readable response did not follow the documented pattern
    UnexpectedFormat(String),
    /// Configuration error
    Config(String),
    /// Credentials could not be resolved
    Credentials(String),
}

impl ThetaError {
    /// Build a transport error for a request that never got a response
    pub fn transport(url: &str, message: impl Into<String>) -> Self {
        ThetaError::Transport {
            url: url.to_string(),
            status: None,
            message: message.into(),
            body: String::new(),
        }
    }

    /// Build a decode error with context about what was being parsed
    pub fn decode(context: &str, message: impl fmt::Display) -> Self {
        ThetaError::Decode {
            context: context.to_string(),
            message: message.to_string(),
        }
    }

    pub fn not_found(kind: &str, id: &str) -> Self {
        ThetaError::NotFound {
            kind: kind.to_string(),
            id: id.to_string(),
        }
    }

    /// True when the remote object does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, ThetaError::NotFound { .. })
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, ThetaError::Auth(_))
    }

    /// Turn an HTTP 404 into `NotFound` for the given resource
    pub fn or_not_found(self, kind: &str, id: &str) -> Self {
        match self.http_status() {
            Some(404) => ThetaError::not_found(kind, id),
            _ => self,
        }
    }

    /// HTTP status code, if the error came from an HTTP response
    pub fn http_status(&self) -> Option<u16> {
        match self {
            ThetaError::Transport { status, .. } => *status,
            _ => None,
        }
    }
}

impl fmt::Display for ThetaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThetaError::Auth(msg) => write!(f, "Authentication failed: {}", msg),
            ThetaError::Transport {
                url,
                status,
                message,
                body,
            } => {
                match status {
                    Some(code) => write!(
                        f,
                        "Request to {} failed (status {}): {}",
                        url, code, message
                    )?,
                    None => write!(f, "Request to {} failed: {}", url, message)?,
                }
                if !body.is_empty() {
                    write!(f, ". Response body: {}", body)?;
                }
                Ok(())
            }
            ThetaError::Decode { context, message } => {
                write!(f, "Failed to decode {}: {}", context, message)
            }
            ThetaError::Api {
                context,
                status,
                body,
            } => write!(
                f,
                "API error while {} (status '{}'): {}",
                context, status, body
            ),
            ThetaError::NotFound { kind, id } => write!(f, "{} '{}' not found", kind, id),
            ThetaError::UnexpectedFormat(msg) => write!(f, "Unexpected format: {}", msg),
            ThetaError::Config(msg) => write!(f, "Configuration error: {}", msg),
            ThetaError::Credentials(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ThetaError {}

impl From<serde_json::Error> for ThetaError {
    fn from(err: serde_json::Error) -> Self {
        ThetaError::decode("JSON", err)
    }
}

impl From<std::io::Error> for ThetaError {
    fn from(err: std::io::Error) -> Self {
        ThetaError::Credentials(err.to_string())
    }
}

/// Result type alias for Theta operations
pub type Result<T> = std::result::Result<T, ThetaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_display() {
        let err = ThetaError::Auth("bad password".to_string());
        assert!(err.to_string().contains("Authentication failed"));
        assert!(err.to_string().contains("bad password"));
        assert!(err.is_auth());
    }

    #[test]
    fn test_transport_error_display_with_status_and_body() {
        let err = ThetaError::Transport {
            url: "https://controller.example.com/deployment".to_string(),
            status: Some(502),
            message: "502 Bad Gateway".to_string(),
            body: "upstream down".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("https://controller.example.com/deployment"));
        assert!(msg.contains("502"));
        assert!(msg.contains("upstream down"));
        assert_eq!(err.http_status(), Some(502));
    }

    #[test]
    fn test_transport_error_without_status() {
        let err = ThetaError::transport("https://x", "connection refused");
        assert_eq!(err.http_status(), None);
        assert!(!err.to_string().contains("Response body"));
    }

    #[test]
    fn test_not_found_is_distinguishable() {
        let err = ThetaError::not_found("deployment", "abcd123");
        assert!(err.is_not_found());
        assert!(err.to_string().contains("abcd123"));

        let decode = ThetaError::decode("deployment list", "missing field");
        assert!(!decode.is_not_found());
    }

    #[test]
    fn test_or_not_found_only_maps_404() {
        let missing = ThetaError::Transport {
            url: "https://x/deployment/1/abc".to_string(),
            status: Some(404),
            message: "404 Not Found".to_string(),
            body: String::new(),
        };
        assert!(missing.or_not_found("deployment", "abc").is_not_found());

        let broken = ThetaError::transport("https://x", "timeout");
        assert!(!broken.or_not_found("deployment", "abc").is_not_found());
    }

    #[test]
    fn test_api_error_display() {
        let err = ThetaError::Api {
            context: "deleting template".to_string(),
            status: "error".to_string(),
            body: "{\"status\":\"error\"}".to_string(),
        };
        assert!(err.to_string().contains("deleting template"));
        assert!(err.to_string().contains("'error'"));
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: ThetaError = json_err.into();
        match err {
            ThetaError::Decode { message, .. } => assert!(!message.is_empty()),
            _ => panic!("Expected ThetaError::Decode"),
        }
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ThetaError>();
    }
}

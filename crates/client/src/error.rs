//! Error types shared across the sforce crates.

/// Result type alias for sforce operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for sforce operations.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    /// Returns true if this is an option-validation error.
    pub fn is_validation(&self) -> bool {
        matches!(self.kind, ErrorKind::Validation(_))
    }

    /// Returns true if this is a structured remote API error.
    pub fn is_api_error(&self) -> bool {
        matches!(self.kind, ErrorKind::Api { .. })
    }

    /// Returns the remote status code for API and HTTP errors.
    pub fn status(&self) -> Option<u16> {
        match &self.kind {
            ErrorKind::Api { status, .. } => Some(*status),
            ErrorKind::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// An option value failed validation before any request was sent.
    #[error("validation error: {0}")]
    Validation(String),

    /// HTTP request failed without a decodable error body.
    #[error("HTTP error: {status} {message}")]
    Http { status: u16, message: String },

    /// Structured error decoded from a remote error body.
    #[error("Salesforce API error ({status}): {error_code} - {message}")]
    Api {
        status: u16,
        error_code: String,
        message: String,
        fields: Vec<String>,
    },

    /// The request was cancelled through its cancellation token.
    #[error("request cancelled")]
    Cancelled,

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Connection error.
    #[error("connection error: {0}")]
    Connection(String),

    /// Authentication error (missing or rejected session).
    #[error("authentication error: {0}")]
    Auth(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(String),

    /// XML decoding error (SOAP login response).
    #[error("XML error: {0}")]
    Xml(String),

    /// Invalid URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Other error.
    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            ErrorKind::Timeout
        } else if err.is_connect() {
            ErrorKind::Connection(err.to_string())
        } else if let Some(status) = err.status() {
            ErrorKind::Http {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            ErrorKind::Other(err.to_string())
        };

        Error::with_source(kind, err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Json(err.to_string()), err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::with_source(ErrorKind::InvalidUrl(err.to_string()), err)
    }
}

/// Error body format returned by the REST API.
///
/// Errors usually arrive as a one-element JSON array, occasionally as a bare
/// object.
#[derive(Debug, serde::Deserialize)]
struct ApiErrorBody {
    #[serde(alias = "errorCode")]
    error_code: String,
    message: String,
    fields: Option<Vec<String>>,
}

/// Decode a non-success response body into a structured error.
///
/// Falls back to an [`ErrorKind::Http`] carrying the sanitized raw body when
/// the body is not in either JSON error shape.
pub fn parse_api_error(status: u16, body: &[u8]) -> Error {
    if let Ok(errors) = serde_json::from_slice::<Vec<ApiErrorBody>>(body) {
        if let Some(err) = errors.into_iter().next() {
            return Error::new(ErrorKind::Api {
                status,
                error_code: err.error_code,
                message: sanitize_error_message(&err.message),
                fields: err.fields.unwrap_or_default(),
            });
        }
    }

    if let Ok(err) = serde_json::from_slice::<ApiErrorBody>(body) {
        return Error::new(ErrorKind::Api {
            status,
            error_code: err.error_code,
            message: sanitize_error_message(&err.message),
            fields: err.fields.unwrap_or_default(),
        });
    }

    Error::new(ErrorKind::Http {
        status,
        message: sanitize_error_message(&String::from_utf8_lossy(body)),
    })
}

/// Sanitize an error message to prevent exposing sensitive data.
///
/// Truncates messages longer than 500 characters and redacts anything that
/// looks like an access token or session ID.
fn sanitize_error_message(message: &str) -> String {
    const MAX_LENGTH: usize = 500;

    // Salesforce tokens typically start with "00D" and are 100+ chars
    let token_pattern = regex_lite::Regex::new(r"00[A-Za-z0-9]{13,}[!][A-Za-z0-9_.]+").unwrap();
    let mut sanitized = token_pattern
        .replace_all(message, "[REDACTED_TOKEN]")
        .to_string();

    let session_pattern = regex_lite::Regex::new(r"sid=[A-Za-z0-9]{20,}").unwrap();
    sanitized = session_pattern
        .replace_all(&sanitized, "sid=[REDACTED]")
        .to_string();

    if sanitized.len() > MAX_LENGTH {
        sanitized.truncate(MAX_LENGTH);
        sanitized.push_str("...[truncated]");
    }

    sanitized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let err = Error::new(ErrorKind::Validation("limit cannot be lower than 1".into()));
        assert!(err.is_validation());
        assert!(!err.is_api_error());
        assert_eq!(err.status(), None);
        assert!(err.to_string().contains("limit cannot be lower than 1"));
    }

    #[test]
    fn test_parse_api_error_array_format() {
        let body = br#"[{"errorCode":"INVALID_FIELD","message":"No such column 'foo' on entity 'Account'","fields":["foo"]}]"#;
        let err = parse_api_error(400, body);

        assert!(err.is_api_error());
        assert_eq!(err.status(), Some(400));
        match err.kind {
            ErrorKind::Api {
                error_code, fields, ..
            } => {
                assert_eq!(error_code, "INVALID_FIELD");
                assert_eq!(fields, vec!["foo".to_string()]);
            }
            other => panic!("unexpected kind: {other:?}"),
        }
    }

    #[test]
    fn test_parse_api_error_single_object() {
        let body = br#"{"errorCode":"NOT_FOUND","message":"The requested resource does not exist"}"#;
        let err = parse_api_error(404, body);

        match err.kind {
            ErrorKind::Api {
                status, error_code, ..
            } => {
                assert_eq!(status, 404);
                assert_eq!(error_code, "NOT_FOUND");
            }
            other => panic!("unexpected kind: {other:?}"),
        }
    }

    #[test]
    fn test_parse_api_error_unstructured_body() {
        let err = parse_api_error(502, b"Bad Gateway");
        match err.kind {
            ErrorKind::Http { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "Bad Gateway");
            }
            other => panic!("unexpected kind: {other:?}"),
        }
    }

    #[test]
    fn test_parse_api_error_empty_array_falls_through() {
        let err = parse_api_error(500, b"[]");
        assert!(matches!(err.kind, ErrorKind::Http { status: 500, .. }));
    }

    #[test]
    fn test_sanitize_redacts_access_tokens() {
        let msg = "Session expired: 00Dxx0000001gEF!AQcAQH3k9s7LKbp_example_token_value.here";
        let sanitized = sanitize_error_message(msg);
        assert!(sanitized.contains("[REDACTED_TOKEN]"), "{sanitized}");
        assert!(!sanitized.contains("AQcAQH3k9s7LKbp"), "{sanitized}");
    }

    #[test]
    fn test_sanitize_redacts_session_ids() {
        let msg = "Invalid session: sid=abc123def456ghi789jkl012";
        let sanitized = sanitize_error_message(msg);
        assert!(sanitized.contains("sid=[REDACTED]"), "{sanitized}");
    }

    #[test]
    fn test_sanitize_truncates_long_messages() {
        let long_msg = "x".repeat(600);
        let sanitized = sanitize_error_message(&long_msg);
        assert!(sanitized.len() < 600);
        assert!(sanitized.ends_with("...[truncated]"));
    }

    #[test]
    fn test_sanitize_passes_through_clean_messages() {
        let msg = "No such column 'foo' on entity 'Account'";
        assert_eq!(sanitize_error_message(msg), msg);
    }

    #[test]
    fn test_error_with_source() {
        let source_err = std::io::Error::other("disk full");
        let err = Error::with_source(ErrorKind::Other("read failed".into()), source_err);

        assert!(err.source.is_some());
        assert_eq!(err.to_string(), "read failed");
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<String>("not valid json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err.kind, ErrorKind::Json(_)));
        assert!(err.source.is_some());
    }

    #[test]
    fn test_from_url_parse_error() {
        let url_err = url::Url::parse("not a url").unwrap_err();
        let err: Error = url_err.into();
        assert!(matches!(err.kind, ErrorKind::InvalidUrl(_)));
    }
}

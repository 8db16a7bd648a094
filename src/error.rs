//! Error types for parsing upload results and running the adapters.
//!
//! Rendering itself never fails. Everything that can go wrong happens before
//! (reading and classifying a payload) or after (writing reports, serving).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Filesystem or socket I/O failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The payload is not valid JSON or not a JSON object.
    #[error("Invalid upload result: {0}")]
    Json(#[from] serde_json::Error),

    /// Auto-detection found fields of both response shapes in one payload.
    #[error("Upload result mixes violation and removal fields")]
    MixedSchema,

    /// A schema name that is not `auto`, `violations` or `removals`.
    #[error("Unknown schema '{0}' (expected auto, violations or removals)")]
    UnknownSchema(String),

    /// The request query string could not be decoded.
    #[error("Invalid query: {0}")]
    Query(String),

    /// The config file could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The HTTP adapter could not start.
    #[error("Server error: {0}")]
    Server(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.json");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn test_json_error_converts() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = parse.into();
        assert!(err.to_string().starts_with("Invalid upload result"));
    }

    #[test]
    fn test_unknown_schema_message_lists_choices() {
        let err = Error::UnknownSchema("v3".to_string());
        assert_eq!(
            err.to_string(),
            "Unknown schema 'v3' (expected auto, violations or removals)"
        );
    }
}

//! Unified error type for corpus loading and the CLI.
//!
//! The flow engine itself never fails; everything here comes from I/O,
//! decoding, or bad arguments.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CallflowError {
    /// I/O error (file read/write, directory access)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed corpus JSON
    #[error("Invalid corpus JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Snapshot could not be encoded or decoded
    #[error("Snapshot error for {path}: {message}")]
    Snapshot {
        path: String,
        message: String,
    },

    /// Input path does not exist
    #[error("Input does not exist: {0}")]
    InputNotFound(String),

    /// Directory contained no corpus files
    #[error("No .json corpus files found under '{0}'")]
    NoInputFiles(String),

    /// `resolve` was pointed at a method that is not in the corpus
    #[error("Method '{0}' not found in corpus (expected pkg.Type.method)")]
    MethodNotFound(String),

    /// Argument validation error
    #[error("{0}")]
    InvalidArgs(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let err = CallflowError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "file not found",
        ));
        assert!(err.to_string().contains("I/O error"));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_json_error_display_names_path() {
        let source = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err = CallflowError::Json { path: "corpus/a.json".to_string(), source };
        assert!(err.to_string().contains("corpus/a.json"));
    }

    #[test]
    fn test_snapshot_error_display_fits_save_and_load() {
        let err = CallflowError::Snapshot {
            path: "out/corpus.cfs".to_string(),
            message: "LZ4 finish failed: disk full".to_string(),
        };
        let msg = err.to_string();
        assert_eq!(msg, "Snapshot error for out/corpus.cfs: LZ4 finish failed: disk full");
        assert!(!msg.contains("read"));
    }

    #[test]
    fn test_method_not_found_display() {
        let err = CallflowError::MethodNotFound("com.shop.Ghost.run".to_string());
        let msg = err.to_string();
        assert!(msg.contains("com.shop.Ghost.run"));
        assert!(msg.contains("pkg.Type.method"));
    }

    #[test]
    fn test_io_error_from_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err: CallflowError = io_err.into();
        assert!(matches!(err, CallflowError::Io(_)));
    }
}

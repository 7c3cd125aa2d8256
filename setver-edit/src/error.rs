//! Error types for setver-edit.
//!
//! Every variant is fatal for the run: the caller stops at the first error and
//! leaves files rewritten by earlier rules in their new state.

use camino::Utf8PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditError {
    /// The rule's target file does not exist.
    #[error("target file not found: {path}")]
    TargetMissing { path: Utf8PathBuf },

    /// Reading or writing the target failed (permissions, encoding, disk).
    #[error("{action} {path}")]
    Io {
        action: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The rule's pattern is not a valid regex.
    #[error("invalid pattern for {path}: {message}")]
    Pattern { path: Utf8PathBuf, message: String },
}

/// Result type alias using EditError.
pub type EditResult<T> = Result<T, EditError>;

#[cfg(test)]
mod tests {
    use super::EditError;
    use camino::Utf8PathBuf;

    #[test]
    fn target_missing_names_the_path() {
        let err = EditError::TargetMissing {
            path: Utf8PathBuf::from("Dockerfile.deploy"),
        };
        assert!(err.to_string().contains("Dockerfile.deploy"));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn io_names_the_action() {
        let err = EditError::Io {
            action: "write",
            path: Utf8PathBuf::from("Cargo.toml"),
            source: std::io::Error::other("disk full"),
        };
        assert_eq!(err.to_string(), "write Cargo.toml");
    }
}

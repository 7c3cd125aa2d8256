//! Loader for `variables.toml`.
//!
//! The file is the single source of truth for the version values; loading it
//! is the first step of every run and any failure here aborts before a single
//! target file is touched.

use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use setver_types::Variables;
use thiserror::Error;
use tracing::debug;

/// The configuration file name, resolved against the run root.
pub const VARIABLES_FILE_NAME: &str = "variables.toml";

#[derive(Debug, Error)]
pub enum VarsError {
    #[error("configuration file not found: {path}")]
    ConfigNotFound { path: Utf8PathBuf },

    #[error("invalid configuration in {path}: {message}")]
    ConfigParse { path: Utf8PathBuf, message: String },

    #[error("read {path}")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Read and parse the configuration record.
pub fn load_variables(path: &Utf8Path) -> Result<Variables, VarsError> {
    debug!(path = %path, "loading variables");

    let contents = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            VarsError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            VarsError::Io {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    parse_variables(&contents).map_err(|e| VarsError::ConfigParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Parse a configuration record from a string.
pub fn parse_variables(contents: &str) -> Result<Variables, toml::de::Error> {
    toml::from_str(contents)
}

//! Error type for configuration assembly

use std::path::PathBuf;
use thiserror::Error;

/// Failure to assemble a [`Configuration`](crate::config::Configuration).
///
/// Assembly is all-or-nothing: any of these aborts the whole operation and no
/// partial configuration is produced.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    /// The settings file is missing or could not be read
    #[error("failed to read settings file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No parser could decode the settings file
    #[error("failed to parse settings file {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    /// The settings file decoded to something other than a mapping
    #[error("settings file {} must contain a mapping of rule settings, found {found}", .path.display())]
    NotAMapping { path: PathBuf, found: &'static str },

    /// A chain of `extends` references loops back on itself
    #[error("settings file {} extends itself (directly or indirectly)", .path.display())]
    ExtendsCycle { path: PathBuf },

    /// An ignore pattern is not a valid glob
    #[error("invalid ignore pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigLoadError>;

//! Global error handling for ftpgen
//!
//! This module provides a centralized error type that can represent errors
//! from all modules in the project.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Global error type for ftpgen operations
#[derive(Error, Debug)]
pub enum FtpGenError {
    /// No profile matches the requested id
    #[error("Could not find FTP configuration with id: {0}")]
    ConfigurationNotFound(String),

    /// The local directory to mirror does not exist
    #[error("Local directory not found: {}", .0.display())]
    SourceTreeMissing(PathBuf),

    /// The local directory has no leaf name to use as root marker
    #[error("Local directory has no usable name: {}", .0.display())]
    InvalidRoot(PathBuf),

    /// The command file could not be created, even after falling back
    #[error("Cannot create command file {}: {source}", path.display())]
    OutputPathUnwritable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A single additional-folder operation failed
    #[error("Failed to merge {}: {source}", path.display())]
    AdditionalFolderMerge {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Stored password is not valid base64 text
    #[error("Password of profile {id} cannot be decoded: {reason}")]
    PasswordDecode { id: String, reason: String },

    /// XML processing errors
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Specialized Result type for ftpgen operations
pub type Result<T> = std::result::Result<T, FtpGenError>;

/// Creates an FtpGenError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::FtpGenError::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}

/// Ensures a condition is true, otherwise returns an error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error_type:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($error_type, $($arg)*)
        }
    };
}

impl From<quick_xml::events::attributes::AttrError> for FtpGenError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        FtpGenError::Xml(err.into())
    }
}

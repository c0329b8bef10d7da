//! Error types for ossim.
//!
//! The four user-facing variants carry a complete, human-readable line and
//! display it verbatim; the shell renders each failure as exactly that line.

use std::io;

/// Errors produced by the ossim crates.
#[derive(Debug, thiserror::Error)]
pub enum OssimError {
    /// A path, file, command or pid does not resolve.
    #[error("{0}")]
    NotFound(String),

    /// A create or rename collides with an existing sibling name.
    #[error("{0}")]
    AlreadyExists(String),

    /// Missing operand, malformed number, malformed redirection.
    #[error("{0}")]
    InvalidArgument(String),

    /// Attempt to touch a protected entity (root directory, system pid).
    #[error("{0}")]
    PermissionDenied(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Coarse classification of an [`OssimError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    AlreadyExists,
    InvalidArgument,
    PermissionDenied,
    Config,
    Io,
}

impl OssimError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::AlreadyExists(_) => ErrorKind::AlreadyExists,
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::PermissionDenied(_) => ErrorKind::PermissionDenied,
            Self::Config(_) | Self::TomlParse(_) => ErrorKind::Config,
            Self::Io(_) => ErrorKind::Io,
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, OssimError>;

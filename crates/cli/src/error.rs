// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

/// repo-preflight error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Bad profile/rule pack name, malformed config, unknown check id
    #[error("config error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    /// Invalid command-line arguments
    #[error("argument error: {0}")]
    Argument(String),

    /// Unresolvable ref or failed git query
    #[error("git error: {message}")]
    Git { message: String },

    /// Secret scanner missing or failed
    #[error("scanner error: {message}")]
    Scanner { message: String },

    /// File I/O error
    #[error("io error: {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Internal error (bug)
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Config error without an associated file.
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            path: None,
        }
    }

    /// Config error attributed to a config file.
    pub fn config_at(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Error::Config {
            message: message.into(),
            path: Some(path.into()),
        }
    }

    pub fn git(message: impl Into<String>) -> Self {
        Error::Git {
            message: message.into(),
        }
    }

    pub fn scanner(message: impl Into<String>) -> Self {
        Error::Scanner {
            message: message.into(),
        }
    }
}

impl From<git2::Error> for Error {
    fn from(err: git2::Error) -> Self {
        Error::git(err.message().to_string())
    }
}

/// Result type using repo-preflight Error
pub type Result<T> = std::result::Result<T, Error>;

/// Process exit codes.
///
/// `Success`, `Warnings` and `Failures` are produced only by the result
/// aggregator; the rest signal that no check verdict was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum ExitCode {
    /// No warnings and no failures
    Success = 0,
    /// Warnings present, no failures, not strict
    Warnings = 1,
    /// Failures present, or warnings under strict mode
    Failures = 2,
    /// Configuration or argument error
    ConfigError = 3,
    /// Explicitly requested diff refs could not be resolved
    GitError = 4,
    /// Internal error
    InternalError = 5,
}

impl ExitCode {
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl serde::Serialize for ExitCode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        match err {
            Error::Config { .. } | Error::Argument(_) => ExitCode::ConfigError,
            Error::Git { .. } => ExitCode::GitError,
            Error::Scanner { .. } => ExitCode::InternalError,
            Error::Io { .. } => ExitCode::InternalError,
            Error::Internal(_) => ExitCode::InternalError,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;

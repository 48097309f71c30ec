//! Error types for carbrand-core

use thiserror::Error;

/// Result type alias for carbrand operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the navigation router
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed route path
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Two records claim the same path
    #[error("Duplicate route: {0}")]
    DuplicateRoute(String),

    /// Redirect record pointing at a path no record handles
    #[error("Redirect target not found: {from} -> {to}")]
    UnknownRedirectTarget { from: String, to: String },

    /// Redirect chain that never settles
    #[error("Redirect loop detected at {0}")]
    RedirectLoop(String),

    /// Login page must stay reachable without a token
    #[error("Login path {0} is not a public page")]
    LoginNotPublic(String),

    /// A guard refused the navigation outright
    #[error("Navigation to {0} was blocked")]
    NavigationBlocked(String),

    /// Storage backend failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// History backend failure
    #[error("History error: {0}")]
    History(String),

    /// Invalid configuration
    #[error("Config error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<carbrand_router::InsertError> for Error {
    fn from(err: carbrand_router::InsertError) -> Self {
        match err {
            carbrand_router::InsertError::Conflict { path, .. } => Error::DuplicateRoute(path),
            other => Error::InvalidPath(other.to_string()),
        }
    }
}

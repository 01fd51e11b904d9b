// src/error.rs
use thiserror::Error;

/// Failures of the collect → format → generate pipeline.
///
/// None of these are recovered locally. Callers surface them to the user and
/// abort the current command.
#[derive(Error, Debug)]
pub enum Error {
    /// git or the editor could not be spawned, or exited non-zero.
    #[error("{0}")]
    Execution(String),

    /// Missing credential, unknown provider, or an unreadable config file.
    #[error("{0}")]
    Config(String),

    /// The HTTP request could not be sent or the connection failed.
    #[error("Request failed: {0}")]
    Network(String),

    /// The provider answered, but not with usable text.
    #[error("{0}")]
    Response(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

//! Error types for grouped stream parsing

use quadgroup_turtle::TurtleError;

/// Terminal failure of a grouped stream
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    /// The upstream byte source failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The input is not a valid Turtle/TriG document
    #[error(transparent)]
    Parse(#[from] TurtleError),

    /// The stream already failed or finished
    #[error("stream is terminated and accepts no further input")]
    Terminated,
}

/// Result type for grouped stream operations
pub type Result<T> = std::result::Result<T, StreamError>;

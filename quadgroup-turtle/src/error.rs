//! Error types for Turtle/TriG parsing

/// Error type for Turtle parsing operations
///
/// Byte positions are absolute within the parsed stream, including text
/// consumed by earlier chunks.
#[derive(Debug, thiserror::Error)]
pub enum TurtleError {
    /// Lexer error (invalid token)
    #[error("Lexer error at position {position}: {message}")]
    Lexer { position: usize, message: String },

    /// Parser error (unexpected token or invalid structure)
    #[error("Parse error at position {position}: {message}")]
    Parse { position: usize, message: String },

    /// Input bytes are not valid UTF-8
    #[error("Encoding error at position {position}: {message}")]
    Encoding { position: usize, message: String },

    /// Prefix not defined
    #[error("Undefined prefix: {0}")]
    UndefinedPrefix(String),

    /// The stream already failed or finished; no further input is accepted
    #[error("parser is terminated and accepts no further input")]
    Terminated,
}

/// Result type for Turtle operations
pub type Result<T> = std::result::Result<T, TurtleError>;

impl TurtleError {
    /// Create a lexer error
    pub fn lexer(position: usize, message: impl Into<String>) -> Self {
        Self::Lexer {
            position,
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(position: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            position,
            message: message.into(),
        }
    }

    /// Create an encoding error
    pub fn encoding(position: usize, message: impl Into<String>) -> Self {
        Self::Encoding {
            position,
            message: message.into(),
        }
    }

    /// Byte position of the error, when it has one
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::Lexer { position, .. }
            | Self::Parse { position, .. }
            | Self::Encoding { position, .. } => Some(*position),
            _ => None,
        }
    }
}

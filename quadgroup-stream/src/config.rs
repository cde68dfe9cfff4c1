//! Grouped parser configuration.

use serde::{Deserialize, Serialize};

/// Default read size for the reader adapters.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Configuration for a grouped stream parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Base IRI for relative IRIs until the document declares `@base`.
    /// Without one, relative IRIs are kept as written.
    pub base_iri: Option<String>,

    /// Bytes requested per read by [`GroupedReader`](crate::GroupedReader)
    /// and [`grouped_stream`](crate::grouped_stream).
    /// Default: 64 KiB
    pub chunk_size: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            base_iri: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl ParserConfig {
    pub fn with_base_iri(mut self, base_iri: impl Into<String>) -> Self {
        self.base_iri = Some(base_iri.into());
        self
    }

    /// Set the read size; zero is raised to one byte.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }
}

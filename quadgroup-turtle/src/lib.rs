//! Turtle and TriG parser with comment events and incremental input.
//!
//! This crate provides a parser that emits to `quadgroup_ir::QuadSink`,
//! forwarding `#` comments in document order, plus a [`StreamParser`] that
//! accepts input in arbitrary byte chunks.
//!
//! # Example
//!
//! ```
//! use quadgroup_turtle::{parse, StreamParser};
//! use quadgroup_ir::QuadCollectorSink;
//!
//! let turtle = r#"
//!     @prefix ex: <http://example.org/> .
//!     ## a comment
//!     ex:alice ex:name "Alice" ;
//!              ex:age 30 .
//! "#;
//!
//! // Option 1: Parse a whole document to a QuadSink
//! let mut sink = QuadCollectorSink::new();
//! parse(turtle, &mut sink).unwrap();
//! assert_eq!(sink.comments, vec![" a comment".to_string()]);
//!
//! // Option 2: Feed chunks as they arrive
//! let mut parser = StreamParser::new();
//! let mut quads = Vec::new();
//! for chunk in turtle.as_bytes().chunks(7) {
//!     parser.feed(chunk, &mut quads).unwrap();
//! }
//! parser.finish(&mut quads).unwrap();
//! assert_eq!(quads.len(), 2);
//! ```

pub mod error;
pub mod iri;
pub mod lex;
pub mod parser;
mod scan;
pub mod stream;

pub use error::{Result, TurtleError};
pub use lex::{tokenize, LexOptions, Lexer, SourcePosition, Token, TokenKind};
pub use parser::{parse, Parser, ParserState};
pub use stream::{QuadHandler, StreamParser};

use quadgroup_ir::{Quad, QuadCollectorSink};

/// Parse a complete Turtle or TriG document into owned quads.
pub fn parse_quads(input: &str) -> Result<Vec<Quad>> {
    let mut sink = QuadCollectorSink::new();
    parse(input, &mut sink)?;
    Ok(sink.finish())
}

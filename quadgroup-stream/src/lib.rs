//! Grouped quad streams.
//!
//! Parses a Turtle/TriG byte stream and holds back the quads that appear
//! between `# @group begin NAME` and `# @group end NAME` comments, releasing
//! them together when the group closes. Outside any group, quads pass
//! through as soon as they are parsed. Prefix declarations are forwarded
//! immediately.
//!
//! # Example
//!
//! ```
//! use quadgroup_stream::{GroupedStreamParser, StreamEvent};
//!
//! let input = "# @group begin 1\n<a> <b> <c> .\n<d> <e> <f> .\n# @group end 1\n";
//!
//! let mut parser = GroupedStreamParser::new();
//! parser.feed_str("# @group begin 1\n<a> <b> <c> .\n").unwrap();
//! assert!(parser.next_event().is_none());
//!
//! parser.feed_str("# @group end 1\n").unwrap();
//! parser.finish().unwrap();
//! assert!(matches!(parser.next_event(), Some(StreamEvent::Quad(_))));
//!
//! // Or pull from any `std::io::Read`
//! let quads = GroupedStreamParser::new()
//!     .import(input.as_bytes())
//!     .collect::<Result<Vec<_>, _>>()
//!     .unwrap();
//! assert_eq!(quads.len(), 2);
//! ```

mod async_reader;
pub mod config;
pub mod directive;
pub mod error;
mod grouped;
mod reader;
pub mod router;

pub use async_reader::grouped_stream;
pub use config::ParserConfig;
pub use directive::Directive;
pub use error::{Result, StreamError};
pub use grouped::GroupedStreamParser;
pub use reader::GroupedReader;
pub use router::{GroupRouter, StreamEvent};

pub use quadgroup_ir::{Quad, Term};
pub use quadgroup_turtle::TurtleError;

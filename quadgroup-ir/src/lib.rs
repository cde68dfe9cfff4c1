//! Record model for the grouped quad stream
//!
//! Canonical types for the records a parser produces and the event interface
//! a parser emits them through.
//!
//! # Key Design Principles
//!
//! 1. **Expanded IRIs only** - prefixed names are expanded before a term is
//!    built. Relative IRIs are resolved when a base is known.
//!
//! 2. **Explicit datatypes** - literals always have a datatype. Plain strings
//!    use `xsd:string`, language-tagged strings use `rdf:langString`.
//!
//! 3. **Cheap clones** - terms are `Arc`-backed, so a quad can be copied into
//!    several buffers without duplicating its strings.
//!
//! # Example
//!
//! ```
//! use quadgroup_ir::{Quad, Term};
//!
//! let quad = Quad::new(
//!     Term::iri("http://example.org/alice"),
//!     Term::iri("http://xmlns.com/foaf/0.1/name"),
//!     Term::string("Alice"),
//! );
//! assert!(quad.is_default_graph());
//! ```

pub mod datatype;
mod quad;
mod sink;
mod term;

pub use datatype::Datatype;
pub use quad::Quad;
pub use sink::{QuadCollectorSink, QuadSink, TermArena, TermId};
pub use term::{BlankId, LiteralValue, Term};

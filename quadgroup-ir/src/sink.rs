//! QuadSink trait for event-driven quad construction
//!
//! Parsers create terms and emit quads through a sink without knowing what
//! the sink does with them.
//!
//! # Design
//!
//! Terms are interned into a [`TermArena`] and referenced by [`TermId`], so a
//! subject shared by a `;` / `,` list is built once. The sink can be:
//! - `QuadCollectorSink`: collects everything into vectors (one-shot parsing)
//! - a streaming bridge that forwards every quad as soon as it is complete

use crate::{Datatype, LiteralValue, Quad, Term};
use std::collections::BTreeMap;

/// Opaque term identifier
///
/// A `TermId` is only valid for the arena that issued it, and only until
/// that arena is cleared.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TermId(u32);

/// Interning store backing a sink's `TermId`s
///
/// The fresh blank node counter survives [`TermArena::clear`], so generated
/// labels stay unique for the lifetime of the arena even when it is reset
/// between statements.
#[derive(Debug, Default)]
pub struct TermArena {
    terms: Vec<Term>,
    blank_counter: u64,
}

impl TermArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a term and return its ID
    pub fn intern(&mut self, term: Term) -> TermId {
        let id = TermId(self.terms.len() as u32);
        self.terms.push(term);
        id
    }

    /// Intern a blank node; `None` generates a fresh `genid-N` label
    pub fn blank(&mut self, label: Option<&str>) -> TermId {
        match label {
            Some(l) => self.intern(Term::blank(l)),
            None => {
                let label = format!("genid-{}", self.blank_counter);
                self.blank_counter += 1;
                self.intern(Term::blank(label))
            }
        }
    }

    pub fn literal(&mut self, value: &str, datatype: Datatype, language: Option<&str>) -> TermId {
        let term = match language {
            Some(lang) => Term::lang_string(value, lang),
            None => Term::typed(value, datatype),
        };
        self.intern(term)
    }

    pub fn literal_value(&mut self, value: LiteralValue, datatype: Datatype) -> TermId {
        self.intern(Term::Literal {
            value,
            datatype,
            language: None,
        })
    }

    /// Get a term by its ID
    ///
    /// # Panics
    ///
    /// Panics if the ID was not issued by this arena since the last clear.
    pub fn get(&self, id: TermId) -> &Term {
        &self.terms[id.0 as usize]
    }

    /// Materialize an owned quad from interned IDs
    pub fn quad(
        &self,
        subject: TermId,
        predicate: TermId,
        object: TermId,
        graph: Option<TermId>,
    ) -> Quad {
        Quad {
            s: self.get(subject).clone(),
            p: self.get(predicate).clone(),
            o: self.get(object).clone(),
            g: graph.map(|g| self.get(g).clone()),
        }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Drop all interned terms, invalidating every issued `TermId`
    pub fn clear(&mut self) {
        self.terms.clear();
    }
}

/// Event-driven interface for quad construction
///
/// # Example
///
/// ```
/// use quadgroup_ir::{QuadSink, QuadCollectorSink, Datatype};
///
/// let mut sink = QuadCollectorSink::new();
///
/// sink.on_prefix("foaf", "http://xmlns.com/foaf/0.1/");
///
/// let alice = sink.term_iri("http://example.org/alice");
/// let name = sink.term_iri("http://xmlns.com/foaf/0.1/name");
/// let alice_name = sink.term_literal("Alice", Datatype::xsd_string(), None);
///
/// sink.emit_quad(alice, name, alice_name, None);
///
/// assert_eq!(sink.quads().len(), 1);
/// ```
pub trait QuadSink {
    /// Called when a base IRI is declared
    ///
    /// In Turtle: `@base <http://example.org/> .`
    fn on_base(&mut self, base_iri: &str);

    /// Called when a prefix is declared
    ///
    /// In Turtle: `@prefix foaf: <http://xmlns.com/foaf/0.1/> .`
    fn on_prefix(&mut self, prefix: &str, namespace_iri: &str);

    /// Called for every `#` comment, in document order
    ///
    /// `text` excludes the leading `#` and the line terminator. Sinks that
    /// have no use for comments can rely on the default, which drops them.
    fn on_comment(&mut self, text: &str) {
        let _ = text;
    }

    /// Create an IRI term and return its ID
    fn term_iri(&mut self, iri: &str) -> TermId;

    /// Create a blank node term and return its ID
    ///
    /// If `label` is Some, the blank node has that label. If None, generate a
    /// fresh blank node.
    fn term_blank(&mut self, label: Option<&str>) -> TermId;

    /// Create a literal term from its lexical form
    fn term_literal(&mut self, value: &str, datatype: Datatype, language: Option<&str>) -> TermId;

    /// Create a literal term from a native value (boolean, integer, double)
    fn term_literal_value(&mut self, value: LiteralValue, datatype: Datatype) -> TermId;

    /// Emit a quad using previously created term IDs; `graph` None is the default graph
    fn emit_quad(
        &mut self,
        subject: TermId,
        predicate: TermId,
        object: TermId,
        graph: Option<TermId>,
    );
}

/// A sink that collects quads, directives and comments
#[derive(Debug, Default)]
pub struct QuadCollectorSink {
    arena: TermArena,
    quads: Vec<Quad>,
    /// Base IRI, if one was declared
    pub base: Option<String>,
    /// Prefix mappings (deterministic order via BTreeMap)
    pub prefixes: BTreeMap<String, String>,
    /// Comment bodies in document order
    pub comments: Vec<String>,
}

impl QuadCollectorSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quads(&self) -> &[Quad] {
        &self.quads
    }

    /// Finish collecting and return the quads
    pub fn finish(self) -> Vec<Quad> {
        self.quads
    }
}

impl QuadSink for QuadCollectorSink {
    fn on_base(&mut self, base_iri: &str) {
        self.base = Some(base_iri.to_string());
    }

    fn on_prefix(&mut self, prefix: &str, namespace_iri: &str) {
        self.prefixes
            .insert(prefix.to_string(), namespace_iri.to_string());
    }

    fn on_comment(&mut self, text: &str) {
        self.comments.push(text.to_string());
    }

    fn term_iri(&mut self, iri: &str) -> TermId {
        self.arena.intern(Term::iri(iri))
    }

    fn term_blank(&mut self, label: Option<&str>) -> TermId {
        self.arena.blank(label)
    }

    fn term_literal(&mut self, value: &str, datatype: Datatype, language: Option<&str>) -> TermId {
        self.arena.literal(value, datatype, language)
    }

    fn term_literal_value(&mut self, value: LiteralValue, datatype: Datatype) -> TermId {
        self.arena.literal_value(value, datatype)
    }

    fn emit_quad(
        &mut self,
        subject: TermId,
        predicate: TermId,
        object: TermId,
        graph: Option<TermId>,
    ) {
        let quad = self.arena.quad(subject, predicate, object, graph);
        self.quads.push(quad);
    }
}

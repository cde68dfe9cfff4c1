//! Incremental Turtle/TriG stream parser.
//!
//! Accepts input in arbitrary byte chunks and reports quads, prefixes and
//! comments to a [`QuadHandler`] as soon as the statements holding them are
//! complete. Chunks may split UTF-8 sequences, tokens or statements anywhere.

use quadgroup_ir::{Datatype, LiteralValue, Quad, QuadSink, Term, TermArena, TermId};

use crate::error::{Result, TurtleError};
use crate::lex::{LexOptions, Lexer, SourcePosition};
use crate::parser::{Parser, ParserState};
use crate::scan::BoundaryScanner;

const BOM: char = '\u{FEFF}';

/// Receives parse events in document order.
pub trait QuadHandler {
    /// Called for each parsed quad
    fn on_quad(&mut self, quad: Quad);

    /// Called when a prefix is declared
    fn on_prefix(&mut self, prefix: &str, namespace: &str) {
        let _ = (prefix, namespace);
    }

    /// Called when a base IRI is declared
    fn on_base(&mut self, base: &str) {
        let _ = base;
    }

    /// Called for each `#` comment; `text` excludes the `#` and line terminator
    fn on_comment(&mut self, text: &str) {
        let _ = text;
    }
}

impl QuadHandler for Vec<Quad> {
    fn on_quad(&mut self, quad: Quad) {
        self.push(quad);
    }
}

/// Bridges [`QuadSink`] term events to owned quads for a [`QuadHandler`].
struct HandlerSink<'a, H> {
    arena: &'a mut TermArena,
    handler: &'a mut H,
}

impl<H: QuadHandler> QuadSink for HandlerSink<'_, H> {
    fn on_base(&mut self, base_iri: &str) {
        self.handler.on_base(base_iri);
    }

    fn on_prefix(&mut self, prefix: &str, namespace_iri: &str) {
        self.handler.on_prefix(prefix, namespace_iri);
    }

    fn on_comment(&mut self, text: &str) {
        self.handler.on_comment(text);
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
        self.handler.on_quad(quad);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Open,
    Finished,
    Failed,
}

/// Push-based parser for a Turtle or TriG byte stream.
///
/// The first error poisons the parser: every later call returns
/// [`TurtleError::Terminated`]. Events produced before the error have already
/// been delivered to the handler.
#[derive(Debug)]
pub struct StreamParser {
    /// Decoded text not yet parsed
    pending: String,
    /// Trailing bytes of an incomplete UTF-8 sequence
    undecoded: Vec<u8>,
    scanner: BoundaryScanner,
    state: ParserState,
    arena: TermArena,
    /// Stream position of the start of `pending`
    origin: SourcePosition,
    /// Saw the first decoded character (BOM is only allowed before it)
    started: bool,
    status: Status,
}

impl Default for StreamParser {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamParser {
    pub fn new() -> Self {
        Self::with_state(ParserState::new())
    }

    /// Resolve relative IRIs against `base` until the document declares its own.
    pub fn with_base(base: impl Into<String>) -> Self {
        Self::with_state(ParserState::with_base(base))
    }

    fn with_state(state: ParserState) -> Self {
        Self {
            pending: String::new(),
            undecoded: Vec::new(),
            scanner: BoundaryScanner::new(),
            state,
            arena: TermArena::new(),
            origin: SourcePosition::start(),
            started: false,
            status: Status::Open,
        }
    }

    /// True once `finish` succeeded or any call failed.
    pub fn is_terminated(&self) -> bool {
        self.status != Status::Open
    }

    /// Bytes accepted but not yet parsed.
    pub fn buffered_len(&self) -> usize {
        self.pending.len() + self.undecoded.len()
    }

    /// Feed the next chunk of input, delivering every event it completes.
    pub fn feed<H: QuadHandler>(&mut self, chunk: &[u8], handler: &mut H) -> Result<()> {
        if self.status != Status::Open {
            return Err(TurtleError::Terminated);
        }
        let result = self.feed_inner(chunk, handler);
        if result.is_err() {
            self.status = Status::Failed;
        }
        result
    }

    /// Feed a chunk that is already text.
    pub fn feed_str<H: QuadHandler>(&mut self, chunk: &str, handler: &mut H) -> Result<()> {
        self.feed(chunk.as_bytes(), handler)
    }

    /// Signal end of input and parse whatever remains.
    ///
    /// Calling `finish` again after it succeeded is a no-op.
    pub fn finish<H: QuadHandler>(&mut self, handler: &mut H) -> Result<()> {
        match self.status {
            Status::Finished => return Ok(()),
            Status::Failed => return Err(TurtleError::Terminated),
            Status::Open => {}
        }
        let result = self.finish_inner(handler);
        self.status = if result.is_ok() {
            Status::Finished
        } else {
            Status::Failed
        };
        result
    }

    fn feed_inner<H: QuadHandler>(&mut self, chunk: &[u8], handler: &mut H) -> Result<()> {
        if chunk.is_empty() {
            return Ok(());
        }
        self.decode(chunk)?;

        // Parse statements in place and compact `pending` once per chunk
        let pending = std::mem::take(&mut self.pending);
        let mut consumed = 0;
        let result = loop {
            let end = self.scanner.segment_end(&pending[consumed..]);
            if end == 0 {
                break Ok(());
            }
            let segment = &pending[consumed..consumed + end];
            consumed += end;
            if let Err(err) = self.parse_segment(segment, handler) {
                break Err(err);
            }
        };
        self.pending = pending;
        self.pending.drain(..consumed);
        result
    }

    fn finish_inner<H: QuadHandler>(&mut self, handler: &mut H) -> Result<()> {
        if !self.undecoded.is_empty() {
            let position = self.origin.offset + self.pending.len();
            return Err(TurtleError::encoding(
                position,
                "incomplete UTF-8 sequence at end of input",
            ));
        }
        let rest = std::mem::take(&mut self.pending);
        self.parse_segment(&rest, handler)
    }

    /// Move every complete UTF-8 sequence from `chunk` into `pending`.
    fn decode(&mut self, chunk: &[u8]) -> Result<()> {
        self.undecoded.extend_from_slice(chunk);

        let decoded_offset = self.origin.offset + self.pending.len();
        let valid_up_to = match std::str::from_utf8(&self.undecoded) {
            Ok(_) => self.undecoded.len(),
            // Sequence cut off by the chunk boundary; wait for the rest
            Err(e) if e.error_len().is_none() => e.valid_up_to(),
            Err(e) => {
                return Err(TurtleError::encoding(
                    decoded_offset + e.valid_up_to(),
                    "invalid UTF-8 sequence",
                ))
            }
        };
        if valid_up_to == 0 {
            return Ok(());
        }

        let tail = self.undecoded.split_off(valid_up_to);
        let bytes = std::mem::replace(&mut self.undecoded, tail);
        let text = String::from_utf8(bytes).map_err(|e| {
            TurtleError::encoding(
                decoded_offset + e.utf8_error().valid_up_to(),
                "invalid UTF-8 sequence",
            )
        })?;

        let mut text = text.as_str();
        if !self.started {
            self.started = true;
            if let Some(rest) = text.strip_prefix(BOM) {
                self.origin.offset += BOM.len_utf8();
                text = rest;
            }
        }
        self.pending.push_str(text);
        Ok(())
    }

    fn parse_segment<H: QuadHandler>(&mut self, segment: &str, handler: &mut H) -> Result<()> {
        tracing::trace!(
            offset = self.origin.offset,
            len = segment.len(),
            "parsing segment"
        );

        // Tokens before a lexical error still deliver their events
        let (tokens, lex_error) = Lexer::new(segment)
            .with_options(LexOptions::with_comments())
            .with_origin(self.origin)
            .tokenize_partial();

        let mut sink = HandlerSink {
            arena: &mut self.arena,
            handler,
        };
        let result = Parser::new(tokens, &mut sink, &mut self.state).parse();

        self.arena.clear();
        self.origin = self.origin.advance(segment);
        match lex_error {
            Some(err) => Err(err),
            None => result,
        }
    }
}

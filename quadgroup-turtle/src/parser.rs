//! Turtle/TriG parser that emits to QuadSink.
//!
//! Parses a token stream statement by statement and emits quad, prefix, base
//! and comment events to a [`QuadSink`]. Prefix and base declarations live in
//! a [`ParserState`] owned by the caller, so a stream can be parsed one
//! segment at a time without losing them.

use std::collections::HashMap;

use quadgroup_ir::{Datatype, LiteralValue, QuadSink, TermId};
use quadgroup_vocab::rdf;

use crate::error::{Result, TurtleError};
use crate::iri;
use crate::lex::{LexOptions, Lexer, Token, TokenKind};

const RDF_TYPE: &str = rdf::TYPE;
const RDF_FIRST: &str = rdf::FIRST;
const RDF_REST: &str = rdf::REST;
const RDF_NIL: &str = rdf::NIL;

/// Declarations that stay in effect across statements.
#[derive(Debug, Clone, Default)]
pub struct ParserState {
    /// Prefix mappings (prefix -> namespace IRI)
    prefixes: HashMap<String, String>,
    /// Base IRI for relative IRI resolution
    base: Option<String>,
}

impl ParserState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a base IRI already in effect.
    pub fn with_base(base: impl Into<String>) -> Self {
        Self {
            prefixes: HashMap::new(),
            base: Some(base.into()),
        }
    }

    pub fn base(&self) -> Option<&str> {
        self.base.as_deref()
    }

    pub fn prefix(&self, prefix: &str) -> Option<&str> {
        self.prefixes.get(prefix).map(String::as_str)
    }

    /// Resolve a reference against the current base.
    ///
    /// Without a base, the reference is kept verbatim, so `<a>` is the IRI `a`.
    fn resolve_iri(&self, reference: &str) -> String {
        match &self.base {
            Some(base) => iri::resolve(base, reference),
            None => reference.to_string(),
        }
    }

    /// Expand a prefixed name to a full IRI.
    fn expand_prefixed_name(&self, prefix: &str, local: &str) -> Result<String> {
        match self.prefixes.get(prefix) {
            Some(namespace) => Ok(format!("{}{}", namespace, local)),
            None => Err(TurtleError::UndefinedPrefix(prefix.to_string())),
        }
    }
}

/// Turtle/TriG parser over one token vector.
pub struct Parser<'a, S> {
    tokens: Vec<Token>,
    pos: usize,
    sink: &'a mut S,
    state: &'a mut ParserState,
    /// Graph of the block being parsed; None is the default graph
    graph: Option<TermId>,
}

impl<'a, S: QuadSink> Parser<'a, S> {
    /// Create a parser over `tokens`, which must end with an `Eof` token.
    pub fn new(tokens: Vec<Token>, sink: &'a mut S, state: &'a mut ParserState) -> Self {
        Self {
            tokens,
            pos: 0,
            sink,
            state,
            graph: None,
        }
    }

    /// Parse every statement in the token vector.
    pub fn parse(mut self) -> Result<()> {
        self.skip_comments();
        while !self.is_at_end() {
            self.parse_statement()?;
        }
        Ok(())
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len() || self.current().is_eof()
    }

    /// Get the current token (never a comment once `skip_comments` ran).
    fn current(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    /// Kind of the next significant token after the current one.
    fn peek_kind(&self) -> Option<&TokenKind> {
        self.tokens[self.pos + 1..]
            .iter()
            .find(|t| !t.is_comment())
            .map(|t| &t.kind)
    }

    /// Advance to the next significant token, forwarding comments on the way.
    fn advance(&mut self) {
        if !self.is_at_end() {
            self.pos += 1;
        }
        self.skip_comments();
    }

    fn skip_comments(&mut self) {
        while let Some(Token {
            kind: TokenKind::Comment(text),
            ..
        }) = self.tokens.get(self.pos)
        {
            self.sink.on_comment(text);
            self.pos += 1;
        }
    }

    /// Check if the current token matches the expected kind.
    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.current().kind) == std::mem::discriminant(kind)
    }

    /// Consume a token of the expected kind, or return an error.
    fn expect(&mut self, kind: &TokenKind) -> Result<()> {
        if self.check(kind) {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(&format!("expected {}", kind)))
        }
    }

    fn unexpected(&self, what: &str) -> TurtleError {
        TurtleError::parse(
            self.current().span.start,
            format!("{}, found {}", what, self.current().kind),
        )
    }

    /// Parse a single statement (directive, triples, or graph block).
    fn parse_statement(&mut self) -> Result<()> {
        match &self.current().kind {
            TokenKind::KwPrefix | TokenKind::KwSparqlPrefix => self.parse_prefix_directive(),
            TokenKind::KwBase | TokenKind::KwSparqlBase => self.parse_base_directive(),
            TokenKind::KwGraph => {
                self.advance();
                let graph = self.parse_graph_label()?;
                self.parse_graph_block(Some(graph))
            }
            TokenKind::LBrace => self.parse_graph_block(None),
            TokenKind::Iri(_)
            | TokenKind::PrefixedName { .. }
            | TokenKind::PrefixedNameNs(_)
            | TokenKind::BlankNodeLabel(_)
            | TokenKind::Anon
                if matches!(self.peek_kind(), Some(TokenKind::LBrace)) =>
            {
                let graph = self.parse_graph_label()?;
                self.parse_graph_block(Some(graph))
            }
            TokenKind::Eof => Ok(()),
            _ => {
                self.parse_triples()?;
                self.expect(&TokenKind::Dot)
            }
        }
    }

    /// Parse @prefix or PREFIX directive.
    fn parse_prefix_directive(&mut self) -> Result<()> {
        let is_sparql_style = matches!(self.current().kind, TokenKind::KwSparqlPrefix);
        self.advance();

        let prefix = match &self.current().kind {
            TokenKind::PrefixedNameNs(p) => p.to_string(),
            _ => return Err(self.unexpected("expected prefix namespace")),
        };
        self.advance();

        let namespace = match &self.current().kind {
            TokenKind::Iri(iri) => self.state.resolve_iri(iri),
            _ => return Err(self.unexpected("expected IRI for prefix namespace")),
        };
        self.advance();

        self.sink.on_prefix(&prefix, &namespace);
        self.state.prefixes.insert(prefix, namespace);

        // Trailing dot is required for @prefix, not for PREFIX
        if !is_sparql_style {
            self.expect(&TokenKind::Dot)?;
        }

        Ok(())
    }

    /// Parse @base or BASE directive.
    fn parse_base_directive(&mut self) -> Result<()> {
        let is_sparql_style = matches!(self.current().kind, TokenKind::KwSparqlBase);
        self.advance();

        let base_iri = match &self.current().kind {
            TokenKind::Iri(iri) => self.state.resolve_iri(iri),
            _ => return Err(self.unexpected("expected IRI for base")),
        };
        self.advance();

        self.sink.on_base(&base_iri);
        self.state.base = Some(base_iri);

        if !is_sparql_style {
            self.expect(&TokenKind::Dot)?;
        }

        Ok(())
    }

    /// Parse the label in front of a graph block.
    fn parse_graph_label(&mut self) -> Result<TermId> {
        match self.current().kind.clone() {
            TokenKind::BlankNodeLabel(label) => {
                self.advance();
                Ok(self.sink.term_blank(Some(&*label)))
            }
            TokenKind::Anon => {
                self.advance();
                Ok(self.sink.term_blank(None))
            }
            _ => match self.parse_iri_token()? {
                Some(iri) => Ok(self.sink.term_iri(&iri)),
                None => Err(self.unexpected("expected graph name")),
            },
        }
    }

    /// Parse `{ triples ( . triples )* .? }`.
    fn parse_graph_block(&mut self, graph: Option<TermId>) -> Result<()> {
        self.expect(&TokenKind::LBrace)?;
        self.graph = graph;

        while !self.check(&TokenKind::RBrace) {
            self.parse_triples()?;
            if self.check(&TokenKind::Dot) {
                self.advance();
            } else {
                break;
            }
        }

        self.expect(&TokenKind::RBrace)?;
        self.graph = None;
        Ok(())
    }

    /// Parse a triple statement (without its terminating dot).
    fn parse_triples(&mut self) -> Result<()> {
        let bracketed = self.check(&TokenKind::LBracket);
        let subject = self.parse_subject()?;

        // `[ :p :o ] .` needs no predicate-object list
        if bracketed && matches!(self.current().kind, TokenKind::Dot | TokenKind::RBrace) {
            return Ok(());
        }

        self.parse_predicate_object_list(subject)
    }

    /// Consume an IRI or prefixed name and return the expanded IRI, if the
    /// current token is one.
    fn parse_iri_token(&mut self) -> Result<Option<String>> {
        let iri = match &self.current().kind {
            TokenKind::Iri(iri) => self.state.resolve_iri(iri),
            TokenKind::PrefixedName { prefix, local } => {
                self.state.expand_prefixed_name(prefix, local)?
            }
            TokenKind::PrefixedNameNs(prefix) => self.state.expand_prefixed_name(prefix, "")?,
            _ => return Ok(None),
        };
        self.advance();
        Ok(Some(iri))
    }

    /// Parse a subject term.
    fn parse_subject(&mut self) -> Result<TermId> {
        if let Some(iri) = self.parse_iri_token()? {
            return Ok(self.sink.term_iri(&iri));
        }
        match self.current().kind.clone() {
            TokenKind::BlankNodeLabel(label) => {
                self.advance();
                Ok(self.sink.term_blank(Some(&*label)))
            }
            TokenKind::Anon => {
                self.advance();
                Ok(self.sink.term_blank(None))
            }
            TokenKind::LBracket => self.parse_blank_node_property_list(),
            TokenKind::LParen => self.parse_collection(),
            TokenKind::Nil => {
                self.advance();
                Ok(self.sink.term_iri(RDF_NIL))
            }
            _ => Err(self.unexpected("expected subject")),
        }
    }

    /// Parse a predicate-object list.
    fn parse_predicate_object_list(&mut self, subject: TermId) -> Result<()> {
        loop {
            let predicate = self.parse_predicate()?;
            self.parse_object_list(subject, predicate)?;

            if !self.check(&TokenKind::Semicolon) {
                break;
            }
            // Repeated or trailing semicolons are allowed
            while self.check(&TokenKind::Semicolon) {
                self.advance();
            }
            if matches!(
                self.current().kind,
                TokenKind::Dot | TokenKind::RBracket | TokenKind::RBrace | TokenKind::Eof
            ) {
                break;
            }
        }
        Ok(())
    }

    /// Parse a predicate.
    fn parse_predicate(&mut self) -> Result<TermId> {
        if let Some(iri) = self.parse_iri_token()? {
            return Ok(self.sink.term_iri(&iri));
        }
        if self.check(&TokenKind::KwA) {
            self.advance();
            return Ok(self.sink.term_iri(RDF_TYPE));
        }
        Err(self.unexpected("expected predicate"))
    }

    /// Parse an object list (comma-separated objects).
    fn parse_object_list(&mut self, subject: TermId, predicate: TermId) -> Result<()> {
        loop {
            let object = self.parse_object()?;
            self.sink.emit_quad(subject, predicate, object, self.graph);

            if self.check(&TokenKind::Comma) {
                self.advance();
            } else {
                break;
            }
        }
        Ok(())
    }

    /// Parse an object term.
    fn parse_object(&mut self) -> Result<TermId> {
        if let Some(iri) = self.parse_iri_token()? {
            return Ok(self.sink.term_iri(&iri));
        }
        match self.current().kind.clone() {
            TokenKind::BlankNodeLabel(label) => {
                self.advance();
                Ok(self.sink.term_blank(Some(&*label)))
            }
            TokenKind::Anon => {
                self.advance();
                Ok(self.sink.term_blank(None))
            }
            TokenKind::LBracket => self.parse_blank_node_property_list(),
            TokenKind::LParen => self.parse_collection(),
            TokenKind::Nil => {
                self.advance();
                Ok(self.sink.term_iri(RDF_NIL))
            }
            TokenKind::String(_)
            | TokenKind::Integer(_)
            | TokenKind::Decimal(_)
            | TokenKind::Double(_)
            | TokenKind::KwTrue
            | TokenKind::KwFalse => self.parse_literal(),
            _ => Err(self.unexpected("expected object")),
        }
    }

    /// Parse a literal (string with optional language tag or datatype).
    fn parse_literal(&mut self) -> Result<TermId> {
        match self.current().kind.clone() {
            TokenKind::String(value) => {
                self.advance();

                match self.current().kind.clone() {
                    TokenKind::LangTag(lang) => {
                        self.advance();
                        Ok(self
                            .sink
                            .term_literal(&value, Datatype::rdf_lang_string(), Some(&*lang)))
                    }
                    TokenKind::DoubleCaret => {
                        self.advance();
                        let datatype = match self.parse_iri_token()? {
                            Some(iri) => Datatype::from_iri(iri),
                            None => return Err(self.unexpected("expected datatype IRI")),
                        };
                        Ok(self.sink.term_literal(&value, datatype, None))
                    }
                    _ => Ok(self.sink.term_literal(&value, Datatype::xsd_string(), None)),
                }
            }
            TokenKind::Integer(lexical) => {
                self.advance();
                Ok(match lexical.parse::<i64>() {
                    Ok(n) => self
                        .sink
                        .term_literal_value(LiteralValue::Integer(n), Datatype::xsd_integer()),
                    // Beyond i64: keep the lexical form
                    Err(_) => self.sink.term_literal(&lexical, Datatype::xsd_integer(), None),
                })
            }
            TokenKind::Decimal(s) => {
                self.advance();
                Ok(self.sink.term_literal(&s, Datatype::xsd_decimal(), None))
            }
            TokenKind::Double(n) => {
                self.advance();
                Ok(self
                    .sink
                    .term_literal_value(LiteralValue::Double(n), Datatype::xsd_double()))
            }
            TokenKind::KwTrue | TokenKind::KwFalse => {
                let value = self.check(&TokenKind::KwTrue);
                self.advance();
                Ok(self
                    .sink
                    .term_literal_value(LiteralValue::Boolean(value), Datatype::xsd_boolean()))
            }
            _ => Err(self.unexpected("expected literal")),
        }
    }

    /// Parse a blank node property list: `[ predicate object ; ... ]`
    fn parse_blank_node_property_list(&mut self) -> Result<TermId> {
        self.expect(&TokenKind::LBracket)?;

        let bnode = self.sink.term_blank(None);

        if !self.check(&TokenKind::RBracket) {
            self.parse_predicate_object_list(bnode)?;
        }

        self.expect(&TokenKind::RBracket)?;

        Ok(bnode)
    }

    /// Parse a collection (RDF list): `( item1 item2 ... )`
    fn parse_collection(&mut self) -> Result<TermId> {
        self.expect(&TokenKind::LParen)?;

        if self.check(&TokenKind::RParen) {
            self.advance();
            return Ok(self.sink.term_iri(RDF_NIL));
        }

        let rdf_first = self.sink.term_iri(RDF_FIRST);
        let rdf_rest = self.sink.term_iri(RDF_REST);
        let rdf_nil = self.sink.term_iri(RDF_NIL);

        let first_node = self.sink.term_blank(None);
        let mut current_node = first_node;

        loop {
            let item = self.parse_object()?;
            self.sink
                .emit_quad(current_node, rdf_first, item, self.graph);

            if self.check(&TokenKind::RParen) {
                self.sink
                    .emit_quad(current_node, rdf_rest, rdf_nil, self.graph);
                break;
            }
            if self.is_at_end() {
                return Err(self.unexpected("expected ')'"));
            }

            let next_node = self.sink.term_blank(None);
            self.sink
                .emit_quad(current_node, rdf_rest, next_node, self.graph);
            current_node = next_node;
        }

        self.expect(&TokenKind::RParen)?;

        Ok(first_node)
    }
}

/// Parse a complete Turtle or TriG document into QuadSink events.
///
/// Comments are forwarded to [`QuadSink::on_comment`].
pub fn parse<S: QuadSink>(input: &str, sink: &mut S) -> Result<()> {
    let tokens = Lexer::new(input)
        .with_options(LexOptions::with_comments())
        .tokenize()?;
    let mut state = ParserState::new();
    Parser::new(tokens, sink, &mut state).parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quadgroup_ir::{Quad, QuadCollectorSink, Term};

    fn parse_to_quads(input: &str) -> Result<Vec<Quad>> {
        let mut sink = QuadCollectorSink::new();
        parse(input, &mut sink)?;
        Ok(sink.finish())
    }

    fn find_by_string_object<'q>(quads: &'q [Quad], value: &str) -> &'q Quad {
        quads
            .iter()
            .find(|q| q.o.as_literal().and_then(|(v, _, _)| v.as_str()) == Some(value))
            .unwrap()
    }

    #[test]
    fn test_simple_triple() {
        let input = r#"<http://example.org/alice> <http://xmlns.com/foaf/0.1/name> "Alice" ."#;
        let quads = parse_to_quads(input).unwrap();

        assert_eq!(quads.len(), 1);
        assert_eq!(quads[0].s, Term::iri("http://example.org/alice"));
        assert_eq!(quads[0].p, Term::iri("http://xmlns.com/foaf/0.1/name"));
        assert_eq!(quads[0].o, Term::string("Alice"));
    }

    #[test]
    fn test_relative_iris_without_base_are_kept() {
        let quads = parse_to_quads("<a><b><c>.").unwrap();

        assert_eq!(
            quads,
            vec![Quad::new(Term::iri("a"), Term::iri("b"), Term::iri("c"))]
        );
    }

    #[test]
    fn test_prefix_directive() {
        let input = r#"
            @prefix ex: <http://example.org/> .
            @prefix foaf: <http://xmlns.com/foaf/0.1/> .
            ex:alice foaf:name "Alice" .
        "#;
        let mut sink = QuadCollectorSink::new();
        parse(input, &mut sink).unwrap();

        assert_eq!(sink.prefixes.len(), 2);
        let quads = sink.finish();
        assert_eq!(quads.len(), 1);
        assert_eq!(quads[0].s, Term::iri("http://example.org/alice"));
        assert_eq!(quads[0].p, Term::iri("http://xmlns.com/foaf/0.1/name"));
    }

    #[test]
    fn test_undefined_prefix() {
        let err = parse_to_quads("ex:alice ex:name \"Alice\" .").unwrap_err();
        assert!(matches!(err, TurtleError::UndefinedPrefix(p) if p == "ex"));
    }

    #[test]
    fn test_a_keyword() {
        let input = r#"
            @prefix ex: <http://example.org/> .
            ex:alice a ex:Person .
        "#;
        let quads = parse_to_quads(input).unwrap();

        assert_eq!(quads.len(), 1);
        assert_eq!(quads[0].p, Term::iri(RDF_TYPE));
    }

    #[test]
    fn test_semicolon_and_comma_syntax() {
        let input = r#"
            @prefix ex: <http://example.org/> .
            ex:alice ex:name "Alice" ;
                     ex:knows ex:bob, ex:charlie ;
            .
        "#;
        let quads = parse_to_quads(input).unwrap();

        assert_eq!(quads.len(), 3);
        assert!(quads.iter().all(|q| q.s == Term::iri("http://example.org/alice")));
    }

    #[test]
    fn test_blank_node_property_list() {
        let input = r#"
            @prefix ex: <http://example.org/> .
            ex:alice ex:knows [ ex:name "Bob" ] .
        "#;
        let quads = parse_to_quads(input).unwrap();

        // alice knows _:b, _:b name "Bob"; the inner triple completes first
        assert_eq!(quads.len(), 2);
        assert_eq!(quads[0].o, Term::string("Bob"));
        assert_eq!(quads[1].o, quads[0].s);
    }

    #[test]
    fn test_standalone_blank_node_property_list() {
        let quads = parse_to_quads("[ <p> <o> ] .").unwrap();
        assert_eq!(quads.len(), 1);
        assert!(quads[0].s.is_blank());
    }

    #[test]
    fn test_literals() {
        let input = r#"
            @prefix ex: <http://example.org/> .
            @prefix xsd: <http://www.w3.org/2001/XMLSchema#> .
            ex:alice ex:birthdate "2000-01-01"^^xsd:date ;
                     ex:name "Alice"@en ;
                     ex:age 30 ;
                     ex:height 1.68 ;
                     ex:mass 6.2e1 ;
                     ex:active true .
        "#;
        let quads = parse_to_quads(input).unwrap();

        let objects: Vec<_> = quads.iter().map(|q| q.o.clone()).collect();
        assert_eq!(
            objects,
            vec![
                Term::typed("2000-01-01", Datatype::xsd_date()),
                Term::lang_string("Alice", "en"),
                Term::integer(30),
                Term::typed("1.68", Datatype::xsd_decimal()),
                Term::double(62.0),
                Term::boolean(true),
            ]
        );
    }

    #[test]
    fn test_integers_outside_i64_keep_lexical_form() {
        let quads = parse_to_quads("<s> <p> +7, 123456789012345678901234567890 .").unwrap();
        assert_eq!(quads[0].o, Term::integer(7));
        assert_eq!(
            quads[1].o,
            Term::typed("123456789012345678901234567890", Datatype::xsd_integer())
        );
    }

    #[test]
    fn test_collection() {
        let input = r#"
            @prefix ex: <http://example.org/> .
            ex:alice ex:friends ( ex:bob ex:charlie ) .
        "#;
        let quads = parse_to_quads(input).unwrap();

        // Two rdf:first, two rdf:rest, plus alice friends _:list
        assert_eq!(quads.len(), 5);
        assert_eq!(quads[3].o, Term::iri(RDF_NIL));
    }

    #[test]
    fn test_empty_collection() {
        let quads = parse_to_quads("<alice> <friends> () .").unwrap();

        assert_eq!(quads.len(), 1);
        assert_eq!(quads[0].o, Term::iri(RDF_NIL));
    }

    #[test]
    fn test_sparql_prefix_syntax() {
        let input = r#"
            PREFIX ex: <http://example.org/>
            ex:alice ex:name "Alice" .
        "#;
        let quads = parse_to_quads(input).unwrap();

        assert_eq!(quads.len(), 1);
    }

    #[test]
    fn test_base_iri_resolution() {
        let input = r#"
            @base <http://example.org/path/> .
            <alice> <name> "Alice" .
            <../bob> <name> "Bob" .
        "#;
        let quads = parse_to_quads(input).unwrap();

        assert_eq!(quads.len(), 2);

        let alice = find_by_string_object(&quads, "Alice");
        assert_eq!(alice.s, Term::iri("http://example.org/path/alice"));
        assert_eq!(alice.p, Term::iri("http://example.org/path/name"));

        let bob = find_by_string_object(&quads, "Bob");
        assert_eq!(bob.s, Term::iri("http://example.org/bob"));
    }

    #[test]
    fn test_state_base_seeds_resolution() {
        let tokens = Lexer::new("<alice> <name> \"Alice\" .").tokenize().unwrap();
        let mut sink = QuadCollectorSink::new();
        let mut state = ParserState::with_base("http://example.org/doc");
        Parser::new(tokens, &mut sink, &mut state).parse().unwrap();

        assert_eq!(sink.quads()[0].s, Term::iri("http://example.org/alice"));
    }

    #[test]
    fn test_empty_iri_resolves_to_base() {
        let input = r#"
            @base <http://example.org/doc> .
            <> <name> "The Document" .
        "#;
        let quads = parse_to_quads(input).unwrap();

        assert_eq!(quads[0].s, Term::iri("http://example.org/doc"));
    }

    #[test]
    fn test_prefixes_persist_across_parser_runs() {
        let mut state = ParserState::new();
        let mut sink = QuadCollectorSink::new();

        let first = Lexer::new("@prefix ex: <http://example.org/> .").tokenize().unwrap();
        Parser::new(first, &mut sink, &mut state).parse().unwrap();
        assert_eq!(state.prefix("ex"), Some("http://example.org/"));

        let second = Lexer::new("ex:a ex:b ex:c .").tokenize().unwrap();
        Parser::new(second, &mut sink, &mut state).parse().unwrap();
        assert_eq!(sink.quads()[0].o, Term::iri("http://example.org/c"));
    }

    #[test]
    fn test_comments_forwarded_in_order() {
        let input = "# first\n<a> <b> <c> . # second\n<d> <e> <f> .";
        let mut sink = QuadCollectorSink::new();
        parse(input, &mut sink).unwrap();

        assert_eq!(sink.comments, vec![" first".to_string(), " second".to_string()]);
        assert_eq!(sink.quads().len(), 2);
    }

    #[test]
    fn test_comment_inside_statement() {
        let input = "<a> # between\n <b> <c> .";
        let mut sink = QuadCollectorSink::new();
        parse(input, &mut sink).unwrap();

        assert_eq!(sink.comments, vec![" between".to_string()]);
        assert_eq!(sink.quads().len(), 1);
    }

    #[test]
    fn test_trig_graph_blocks() {
        let input = r#"
            @prefix ex: <http://example.org/> .
            ex:g1 { ex:a ex:b ex:c . ex:d ex:e ex:f }
            GRAPH ex:g2 { ex:a ex:b ex:c . }
            { ex:x ex:y ex:z }
            ex:after ex:p ex:o .
        "#;
        let quads = parse_to_quads(input).unwrap();

        let graphs: Vec<_> = quads.iter().map(|q| q.g.clone()).collect();
        assert_eq!(
            graphs,
            vec![
                Some(Term::iri("http://example.org/g1")),
                Some(Term::iri("http://example.org/g1")),
                Some(Term::iri("http://example.org/g2")),
                None,
                None,
            ]
        );
    }

    #[test]
    fn test_missing_dot_is_an_error() {
        let err = parse_to_quads("<a> <b> <c>").unwrap_err();
        assert!(matches!(err, TurtleError::Parse { .. }));
        assert!(err.to_string().contains("expected ."), "{err}");
    }

    #[test]
    fn test_unexpected_token_position() {
        let err = parse_to_quads("<a> <b> <c> . . ").unwrap_err();
        assert_eq!(err.position(), Some(14));
    }
}

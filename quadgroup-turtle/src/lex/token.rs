//! Tokens produced by the lexer.

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

/// A token and the byte range it covers in the stream.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Absolute byte offsets, shifted by the lexer's origin
    pub span: Range<usize>,
}

impl Token {
    pub fn new(kind: TokenKind, span: Range<usize>) -> Self {
        Self { kind, span }
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    pub fn is_comment(&self) -> bool {
        matches!(self.kind, TokenKind::Comment(_))
    }
}

/// Turtle and TriG token kinds.
///
/// Names and literals carry their text already unescaped, except integers
/// and decimals which keep the exact lexical form.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    /// `<...>`, unresolved
    Iri(Arc<str>),
    /// `prefix:` with no local part
    PrefixedNameNs(Arc<str>),
    /// `prefix:local`
    PrefixedName { prefix: Arc<str>, local: Arc<str> },
    /// `_:label`, without the `_:`
    BlankNodeLabel(Arc<str>),
    /// `[]`
    Anon,
    /// `()`
    Nil,

    String(Arc<str>),
    /// Sign kept, so `+5` stays `+5`
    Integer(Arc<str>),
    Decimal(Arc<str>),
    Double(f64),
    /// Language tag without the `@`
    LangTag(Arc<str>),

    KwPrefix,
    KwBase,
    /// `PREFIX`, any case
    KwSparqlPrefix,
    /// `BASE`, any case
    KwSparqlBase,
    /// `GRAPH`, any case
    KwGraph,
    KwA,
    KwTrue,
    KwFalse,

    Dot,
    Comma,
    Semicolon,
    DoubleCaret,
    LBracket,
    RBracket,
    LParen,
    RParen,
    LBrace,
    RBrace,

    /// Text after `#`, up to the line break. Only emitted when the lexer
    /// keeps comments.
    Comment(Arc<str>),
    Eof,
}

impl TokenKind {
    /// Fixed spelling of keywords and punctuation.
    fn fixed_text(&self) -> Option<&'static str> {
        Some(match self {
            TokenKind::Anon => "[]",
            TokenKind::Nil => "()",
            TokenKind::KwPrefix => "@prefix",
            TokenKind::KwBase => "@base",
            TokenKind::KwSparqlPrefix => "PREFIX",
            TokenKind::KwSparqlBase => "BASE",
            TokenKind::KwGraph => "GRAPH",
            TokenKind::KwA => "a",
            TokenKind::KwTrue => "true",
            TokenKind::KwFalse => "false",
            TokenKind::Dot => ".",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::DoubleCaret => "^^",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Eof => "end of input",
            _ => return None,
        })
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(text) = self.fixed_text() {
            return f.write_str(text);
        }
        match self {
            TokenKind::Iri(iri) => write!(f, "<{iri}>"),
            TokenKind::PrefixedNameNs(prefix) => write!(f, "{prefix}:"),
            TokenKind::PrefixedName { prefix, local } => write!(f, "{prefix}:{local}"),
            TokenKind::BlankNodeLabel(label) => write!(f, "_:{label}"),
            TokenKind::String(value) => write!(f, "{value:?}"),
            TokenKind::Integer(lexical) | TokenKind::Decimal(lexical) => f.write_str(lexical),
            TokenKind::Double(value) => write!(f, "{value:e}"),
            TokenKind::LangTag(tag) => write!(f, "@{tag}"),
            TokenKind::Comment(text) => write!(f, "#{text}"),
            _ => Ok(()),
        }
    }
}

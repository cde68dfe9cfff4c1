//! Turtle/TriG lexer built on winnow.
//!
//! The first character of a token picks the rule that lexes it. Comments are
//! skipped unless [`LexOptions::comments`] asks for them, and the first bad
//! token ends lexing with a positioned error.

use std::sync::Arc;

use winnow::combinator::{alt, opt, preceded};
use winnow::error::{ContextError, ErrMode};
use winnow::stream::{AsChar, Location, Stream};
use winnow::token::{any, one_of, take, take_till, take_while};
use winnow::{LocatingSlice, ModalResult, Parser};

use super::chars::*;
use super::token::{Token, TokenKind};
use crate::error::{Result, TurtleError};

/// Lexer input; the location drives token spans.
pub type Input<'a> = LocatingSlice<&'a str>;

/// Lexer switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LexOptions {
    /// Emit `#` comments as [`TokenKind::Comment`] instead of skipping them.
    pub comments: bool,
}

impl LexOptions {
    /// Options that keep comments in the token stream.
    pub fn with_comments() -> Self {
        Self { comments: true }
    }
}

/// Where a piece of input starts within the whole stream.
///
/// Lets a stream be tokenized one segment at a time while spans and error
/// messages still refer to absolute offsets, lines and columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourcePosition {
    /// Byte offset
    pub offset: usize,
    /// Line number, 1-indexed
    pub line: usize,
    /// Column in characters, 1-indexed
    pub column: usize,
}

impl SourcePosition {
    /// Position of the first byte of a stream.
    pub fn start() -> Self {
        Self {
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    /// Position just after `text`, assuming `text` starts at `self`.
    pub fn advance(self, text: &str) -> Self {
        let mut next = self;
        next.offset += text.len();
        for c in text.chars() {
            if c == '\n' {
                next.line += 1;
                next.column = 1;
            } else {
                next.column += 1;
            }
        }
        next
    }
}

impl Default for SourcePosition {
    fn default() -> Self {
        Self::start()
    }
}

/// Lexer for Turtle and TriG documents.
pub struct Lexer<'a> {
    input: &'a str,
    options: LexOptions,
    origin: SourcePosition,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            options: LexOptions::default(),
            origin: SourcePosition::start(),
        }
    }

    pub fn with_options(mut self, options: LexOptions) -> Self {
        self.options = options;
        self
    }

    /// Treat the input as a segment that starts at `origin` in a larger stream.
    pub fn with_origin(mut self, origin: SourcePosition) -> Self {
        self.origin = origin;
        self
    }

    /// Tokenize the entire input.
    ///
    /// Stops at the first invalid token with an error carrying line, column
    /// and the offending source line.
    pub fn tokenize(self) -> Result<Vec<Token>> {
        match self.tokenize_partial() {
            (tokens, None) => Ok(tokens),
            (_, Some(err)) => Err(err),
        }
    }

    /// Tokenize up to the first invalid token.
    ///
    /// The token vector always ends with `Eof`, placed at the failing
    /// position when lexing stopped early, so the tokens before an error can
    /// still be parsed.
    pub fn tokenize_partial(self) -> (Vec<Token>, Option<TurtleError>) {
        let mut tokens = Vec::new();
        let mut input = LocatingSlice::new(self.input);
        let keep_comments = self.options.comments;
        let offset = self.origin.offset;

        loop {
            skip_trivia(&mut input, keep_comments);
            let start = input.current_token_start();
            if input.is_empty() {
                tokens.push(Token::new(TokenKind::Eof, start + offset..start + offset));
                return (tokens, None);
            }

            let lexed = if keep_comments && input.starts_with('#') {
                parse_comment(&mut input)
            } else {
                next_token(&mut input)
            };
            let Ok(kind) = lexed else {
                tokens.push(Token::new(TokenKind::Eof, start + offset..start + offset));
                return (tokens, Some(self.make_error(start)));
            };

            let end = input.current_token_start();
            tokens.push(Token::new(kind, start + offset..end + offset));
        }
    }

    /// Describe the token that failed to lex at `position`.
    fn make_error(&self, position: usize) -> TurtleError {
        let before = &self.input[..position];
        let relative = SourcePosition::start().advance(before);
        let absolute = self.origin.advance(before);
        let source_line = self
            .input
            .lines()
            .nth(relative.line - 1)
            .unwrap_or_default();

        let what = match self.input[position..].chars().next() {
            Some('"' | '\'') => "unterminated string literal".to_string(),
            Some('<') => "invalid or unterminated IRI".to_string(),
            Some(c) if !c.is_ascii() => format!(
                "unexpected character '{}' (U+{:04X})",
                c.escape_unicode(),
                c as u32
            ),
            Some(c) => format!("unexpected character '{}'", c),
            None => "unexpected end of input".to_string(),
        };

        let message = format!(
            "{} at line {}, column {}\n  |\n{} | {}\n  | {}^",
            what,
            absolute.line,
            absolute.column,
            absolute.line,
            source_line,
            " ".repeat(relative.column - 1)
        );
        TurtleError::lexer(absolute.offset, message)
    }
}

/// Tokenize a Turtle or TriG document, skipping comments.
pub fn tokenize(input: &str) -> Result<Vec<Token>> {
    Lexer::new(input).tokenize()
}

fn backtrack<T>() -> ModalResult<T> {
    Err(ErrMode::Backtrack(ContextError::new()))
}

/// Skip whitespace, and comments too unless they are being kept.
fn skip_trivia(input: &mut Input<'_>, keep_comments: bool) {
    loop {
        let _: ModalResult<&str> = take_while(0.., is_ws).parse_next(input);
        if keep_comments || !input.starts_with('#') {
            return;
        }
        let _ = parse_comment(input);
    }
}

/// `#` up to (not including) the line terminator.
fn parse_comment(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    preceded('#', take_till(0.., ['\n', '\r']))
        .map(|text: &str| TokenKind::Comment(Arc::from(text)))
        .parse_next(input)
}

fn next_token(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    let Some(first) = input.chars().next() else {
        return backtrack();
    };
    match first {
        '<' => parse_iri_ref(input),
        '"' | '\'' => parse_string_literal(input),
        '@' => parse_at_word(input),
        '^' => "^^".value(TokenKind::DoubleCaret).parse_next(input),
        '[' | '(' => alt((parse_empty_brackets, parse_punctuation)).parse_next(input),
        '_' if input.starts_with("_:") => parse_blank_node_label(input),
        '+' | '-' | '0'..='9' => parse_number(input),
        '.' => alt((parse_number, parse_punctuation)).parse_next(input),
        _ => alt((parse_prefixed_name_or_keyword, parse_punctuation)).parse_next(input),
    }
}

fn parse_punctuation(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    any.verify_map(|c| {
        Some(match c {
            '.' => TokenKind::Dot,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            _ => return None,
        })
    })
    .parse_next(input)
}

/// `[]` and `()`, whitespace allowed inside.
fn parse_empty_brackets(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    alt((
        ('[', take_while(0.., is_ws), ']').value(TokenKind::Anon),
        ('(', take_while(0.., is_ws), ')').value(TokenKind::Nil),
    ))
    .parse_next(input)
}

// =============================================================================
// IRIs and escapes
// =============================================================================

fn parse_iri_ref(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    '<'.parse_next(input)?;
    let mut iri = String::new();
    loop {
        let run: &str = take_while(0.., is_iri_char).parse_next(input)?;
        iri.push_str(run);
        match input.chars().next() {
            Some('>') => {
                any.parse_next(input)?;
                return Ok(TokenKind::Iri(Arc::from(iri)));
            }
            Some('\\') => {
                any.parse_next(input)?;
                iri.push(parse_unicode_escape(input)?);
            }
            _ => return backtrack(),
        }
    }
}

/// `uXXXX` or `UXXXXXXXX`, the backslash already consumed.
fn parse_unicode_escape(input: &mut Input<'_>) -> ModalResult<char> {
    let width = match any.parse_next(input)? {
        'u' => 4,
        'U' => 8,
        _ => return backtrack(),
    };
    let hex: &str = take_while(width..=width, AsChar::is_hex_digit).parse_next(input)?;
    match u32::from_str_radix(hex, 16).ok().and_then(char::from_u32) {
        Some(c) => Ok(c),
        None => backtrack(),
    }
}

/// `ECHAR` or a unicode escape inside a string, the backslash already consumed.
fn parse_string_escape(input: &mut Input<'_>) -> ModalResult<char> {
    if input.starts_with(['u', 'U']) {
        return parse_unicode_escape(input);
    }
    any.verify_map(|c| {
        Some(match c {
            't' => '\t',
            'b' => '\u{0008}',
            'n' => '\n',
            'r' => '\r',
            'f' => '\u{000C}',
            '"' | '\'' | '\\' => c,
            _ => return None,
        })
    })
    .parse_next(input)
}

// =============================================================================
// Names
// =============================================================================

/// Characters a local name may escape with `\`.
const LOCAL_ESCAPES: &str = "_~.-!$&'()*+,;=/?#@%";

/// Byte length of the longest name at the start of `s` whose first char
/// satisfies `is_start`, whose other chars are `PN_CHARS` or `.`, and which
/// does not end in `.`.
fn dotted_name_len(s: &str, is_start: impl Fn(char) -> bool) -> usize {
    let mut chars = s.char_indices();
    let mut end = match chars.next() {
        Some((_, c)) if is_start(c) => c.len_utf8(),
        _ => return 0,
    };
    for (i, c) in chars {
        if is_pn_chars(c) {
            end = i + c.len_utf8();
        } else if c != '.' {
            break;
        }
    }
    end
}

/// `prefix:local`, `prefix:`, or one of the bare keywords.
fn parse_prefixed_name_or_keyword(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    let prefix_len = dotted_name_len(input.as_ref(), is_pn_chars_base);
    if input.as_ref()[prefix_len..].starts_with(':') {
        let prefix: &str = take(prefix_len).parse_next(input)?;
        ':'.parse_next(input)?;
        let prefix = Arc::from(prefix);
        return Ok(match opt(parse_pn_local).parse_next(input)? {
            Some(local) => TokenKind::PrefixedName {
                prefix,
                local: Arc::from(local),
            },
            None => TokenKind::PrefixedNameNs(prefix),
        });
    }

    let word: &str = take_while(1.., AsChar::is_alpha).parse_next(input)?;
    if input.chars().next().is_some_and(is_pn_chars) {
        return backtrack();
    }
    match word {
        "a" => Ok(TokenKind::KwA),
        "true" => Ok(TokenKind::KwTrue),
        "false" => Ok(TokenKind::KwFalse),
        w if w.eq_ignore_ascii_case("prefix") => Ok(TokenKind::KwSparqlPrefix),
        w if w.eq_ignore_ascii_case("base") => Ok(TokenKind::KwSparqlBase),
        w if w.eq_ignore_ascii_case("graph") => Ok(TokenKind::KwGraph),
        _ => backtrack(),
    }
}

/// `PN_LOCAL`: `%XX` is kept verbatim and `\` escapes are resolved.
fn parse_pn_local(input: &mut Input<'_>) -> ModalResult<String> {
    let mut local = String::new();
    loop {
        let checkpoint = input.checkpoint();
        let dots: &str = take_while(0.., '.').parse_next(input)?;
        let piece: Option<String> = match input.chars().next() {
            _ if local.is_empty() && !dots.is_empty() => None,
            Some('%') => Some(
                ('%', take_while(2..=2, AsChar::is_hex_digit))
                    .take()
                    .parse_next(input)?
                    .to_string(),
            ),
            Some('\\') => {
                let escaped = preceded('\\', one_of(|c: char| LOCAL_ESCAPES.contains(c)))
                    .parse_next(input)?;
                Some(escaped.to_string())
            }
            Some(c) if (is_pn_chars(c) || c == ':') && (!local.is_empty() || is_pn_local_start(c)) => {
                let run: &str =
                    take_while(1.., |c: char| is_pn_chars(c) || c == ':').parse_next(input)?;
                Some(run.to_string())
            }
            _ => None,
        };
        let Some(piece) = piece else {
            // Dots with nothing after them end the statement, not the name
            input.reset(&checkpoint);
            break;
        };
        local.push_str(dots);
        local.push_str(&piece);
    }
    if local.is_empty() {
        backtrack()
    } else {
        Ok(local)
    }
}

fn parse_blank_node_label(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    "_:".parse_next(input)?;
    let len = dotted_name_len(input.as_ref(), |c| is_pn_chars_u(c) || c.is_ascii_digit());
    if len == 0 {
        return backtrack();
    }
    let label: &str = take(len).parse_next(input)?;
    Ok(TokenKind::BlankNodeLabel(Arc::from(label)))
}

/// `@prefix`, `@base`, or a language tag.
fn parse_at_word(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    '@'.parse_next(input)?;
    let word: &str = (
        take_while(1.., AsChar::is_alpha),
        take_while(0.., |c: char| c.is_ascii_alphanumeric() || c == '-'),
    )
        .take()
        .parse_next(input)?;
    Ok(match word {
        "prefix" => TokenKind::KwPrefix,
        "base" => TokenKind::KwBase,
        tag => TokenKind::LangTag(Arc::from(tag)),
    })
}

// =============================================================================
// Literals
// =============================================================================

/// A string in any quoting style: `"…"`, `'…'`, or the tripled long forms.
fn parse_string_literal(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    let quote = one_of(['"', '\'']).parse_next(input)?;
    let long = input.chars().take(2).filter(|&c| c == quote).count() == 2;
    if long {
        take(2usize).parse_next(input)?;
    }

    let mut value = String::new();
    loop {
        let run: &str = take_till(0.., |c: char| {
            c == quote || c == '\\' || (!long && (c == '\n' || c == '\r'))
        })
        .parse_next(input)?;
        value.push_str(run);

        match input.chars().next() {
            Some('\\') => {
                any.parse_next(input)?;
                value.push(parse_string_escape(input)?);
            }
            Some(c) if c == quote && !long => {
                any.parse_next(input)?;
                break;
            }
            Some(c) if c == quote => {
                // The last three quotes of a run close the literal
                let quotes: &str = take_while(1.., quote).parse_next(input)?;
                if quotes.len() >= 3 {
                    value.push_str(&quotes[..quotes.len() - 3]);
                    break;
                }
                value.push_str(quotes);
            }
            // End of input, or a line break in a short string
            _ => return backtrack(),
        }
    }
    Ok(TokenKind::String(Arc::from(value)))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum NumberClass {
    Integer,
    Decimal,
    Double,
}

/// Length and class of the numeric literal at the start of `s`, if any.
///
/// A `.` only joins the number when digits (or, after an integer part, an
/// exponent) follow it; otherwise it is left for the statement terminator.
fn scan_number(s: &str) -> Option<(usize, NumberClass)> {
    let bytes = s.as_bytes();
    let digits_at = |at: usize| bytes[at..].iter().take_while(|b| b.is_ascii_digit()).count();

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let whole = digits_at(end);
    end += whole;

    let mut fraction = None;
    if bytes.get(end) == Some(&b'.') {
        let digits = digits_at(end + 1);
        if digits > 0 || (whole > 0 && exponent_len(&bytes[end + 1..]) > 0) {
            fraction = Some(digits);
            end += 1 + digits;
        }
    }
    if whole == 0 && fraction.unwrap_or(0) == 0 {
        return None;
    }

    match exponent_len(&bytes[end..]) {
        0 if fraction.is_some() => Some((end, NumberClass::Decimal)),
        0 => Some((end, NumberClass::Integer)),
        n => Some((end + n, NumberClass::Double)),
    }
}

/// Length of an `EXPONENT` at the start of `bytes`, or 0.
fn exponent_len(bytes: &[u8]) -> usize {
    if !matches!(bytes.first(), Some(b'e' | b'E')) {
        return 0;
    }
    let sign = usize::from(matches!(bytes.get(1), Some(b'+' | b'-')));
    let digits = bytes[1 + sign..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits == 0 {
        0
    } else {
        1 + sign + digits
    }
}

fn parse_number(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    let Some((len, class)) = scan_number(input.as_ref()) else {
        return backtrack();
    };
    let lexeme: &str = take(len).parse_next(input)?;
    match class {
        NumberClass::Integer => Ok(TokenKind::Integer(Arc::from(lexeme))),
        NumberClass::Decimal => Ok(TokenKind::Decimal(Arc::from(lexeme))),
        NumberClass::Double => lexeme
            .parse()
            .map(TokenKind::Double)
            .or_else(|_| backtrack()),
    }
}

//! Statement boundary detection for incremental parsing.
//!
//! A byte-level state machine that tracks string literal, IRI and comment
//! context so that `.`, `}` and newlines in those contexts are ignored. The
//! scanner is fed the growing text that has not been parsed yet and reports
//! where its first complete statement or comment line ends. Anything it
//! cannot decide yet (a `.` or quote run at the very end of the text, an
//! unterminated comment) stays pending until more text arrives.

/// Lexical context at the scan position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Outside any literal, IRI, or comment.
    Normal,
    /// Inside `"..."` or `'...'`; holds the quote byte.
    InShortString(u8),
    /// Inside `"""..."""` or `'''...'''`; holds the quote byte.
    InLongString(u8),
    /// After `\` inside a string.
    InStringEscape { quote: u8, long: bool },
    /// Inside `<...>` (IRI reference).
    InIri,
    /// After `#` until end of line.
    InComment,
}

/// Incremental statement boundary scanner.
#[derive(Debug, Clone)]
pub(crate) struct BoundaryScanner {
    state: ScanState,
    /// Next byte to examine, relative to the pending text
    pos: usize,
    /// Byte before `pos`, kept across drains
    prev: Option<u8>,
    /// `[` and `(` nesting
    nesting: usize,
    /// `{` nesting
    braces: usize,
    /// Saw a significant byte since the last boundary
    in_statement: bool,
    /// End of the confirmed boundary, relative to the pending text
    boundary: usize,
}

impl Default for BoundaryScanner {
    fn default() -> Self {
        Self {
            state: ScanState::Normal,
            pos: 0,
            prev: None,
            nesting: 0,
            braces: 0,
            in_statement: false,
            boundary: 0,
        }
    }
}

impl BoundaryScanner {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Scan the not-yet-parsed `text` and return the end of its first
    /// complete statement or comment line, or 0 if there is none yet.
    ///
    /// The next call must pass `text` minus exactly the returned number of
    /// leading bytes (plus any newly arrived text); the scanner rebases
    /// itself on that assumption. Text already scanned is not examined again.
    pub(crate) fn segment_end(&mut self, text: &str) -> usize {
        let bytes = text.as_bytes();

        while self.pos < bytes.len() {
            let b = bytes[self.pos];
            let rest = &bytes[self.pos..];

            match self.state {
                ScanState::Normal => match b {
                    b'"' | b'\'' => {
                        let triple = [b; 3];
                        if rest.len() < 3 && triple.starts_with(rest) {
                            // `"` or `""` at the end: cannot tell short from long yet
                            break;
                        }
                        self.in_statement = true;
                        if rest.starts_with(&triple) {
                            self.state = ScanState::InLongString(b);
                            self.skip(3, b);
                            continue;
                        }
                        self.state = ScanState::InShortString(b);
                    }
                    b'<' => {
                        self.in_statement = true;
                        self.state = ScanState::InIri;
                    }
                    b'#' => self.state = ScanState::InComment,
                    b'.' => {
                        let Some(&next) = rest.get(1) else {
                            // Terminator or start of `.5`, `1.5`, `ex:a.b`
                            break;
                        };
                        if self.at_top_level() && ends_statement(self.prev, next) {
                            self.mark_boundary(self.pos + 1);
                        } else {
                            self.in_statement = true;
                        }
                    }
                    b'[' | b'(' => {
                        self.in_statement = true;
                        self.nesting += 1;
                    }
                    b']' | b')' => {
                        self.in_statement = true;
                        self.nesting = self.nesting.saturating_sub(1);
                    }
                    b'{' => {
                        self.in_statement = true;
                        self.braces += 1;
                    }
                    b'}' => {
                        self.braces = self.braces.saturating_sub(1);
                        if self.at_top_level() {
                            self.mark_boundary(self.pos + 1);
                        } else {
                            self.in_statement = true;
                        }
                    }
                    b' ' | b'\t' | b'\r' | b'\n' => {}
                    _ => self.in_statement = true,
                },

                ScanState::InShortString(quote) => match b {
                    b'\\' => {
                        self.state = ScanState::InStringEscape { quote, long: false };
                    }
                    // Short strings cannot span lines; recover at the newline
                    b'\n' | b'\r' => self.state = ScanState::Normal,
                    _ if b == quote => self.state = ScanState::Normal,
                    _ => {}
                },

                ScanState::InLongString(quote) => match b {
                    b'\\' => {
                        self.state = ScanState::InStringEscape { quote, long: true };
                    }
                    _ if b == quote => {
                        // The last three quotes of a run close the literal
                        let run = rest.iter().take_while(|&&c| c == quote).count();
                        if run == rest.len() {
                            break;
                        }
                        if run >= 3 {
                            self.state = ScanState::Normal;
                        }
                        self.skip(run, quote);
                        continue;
                    }
                    _ => {}
                },

                ScanState::InStringEscape { quote, long } => {
                    self.state = if long {
                        ScanState::InLongString(quote)
                    } else {
                        ScanState::InShortString(quote)
                    };
                }

                ScanState::InIri => {
                    if b == b'>' {
                        self.state = ScanState::Normal;
                    }
                }

                ScanState::InComment => {
                    if b == b'\n' || b == b'\r' {
                        self.state = ScanState::Normal;
                        if !self.in_statement && self.at_top_level() {
                            self.mark_boundary(self.pos + 1);
                        }
                    }
                }
            }

            self.skip(1, b);
            if self.boundary > 0 {
                break;
            }
        }

        let end = self.boundary;
        self.pos -= end;
        self.boundary = 0;
        end
    }

    fn skip(&mut self, n: usize, last: u8) {
        self.pos += n;
        self.prev = Some(last);
    }

    fn at_top_level(&self) -> bool {
        self.nesting == 0 && self.braces == 0
    }

    fn mark_boundary(&mut self, end: usize) {
        self.boundary = end;
        self.in_statement = false;
    }
}

/// Decide whether a top-level `.` between `prev` and `next` ends a statement.
fn ends_statement(prev: Option<u8>, next: u8) -> bool {
    if next.is_ascii_digit() {
        // Decimal or double: `1.5`, `.5`
        return false;
    }
    if prev == Some(b'\\') {
        // Escaped dot inside a local name: `ex:a\.`
        return false;
    }
    is_boundary_follower(next) || !(prev.is_some_and(is_name_byte) && is_name_byte(next))
}

/// Returns true if `b` can only follow a `.` that terminates a statement.
fn is_boundary_follower(b: u8) -> bool {
    matches!(
        b,
        b' ' | b'\t' | b'\r' | b'\n' | b'#' | b'<' | b'[' | b'(' | b'"' | b'\'' | b'@' | b'{' | b'}'
    )
}

/// Approximation of bytes that can continue a prefixed name or number.
///
/// Non-ASCII bytes count as name bytes so that `ex:caf\u{e9}.x` is not split.
fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b':' | b'%') || !b.is_ascii()
}

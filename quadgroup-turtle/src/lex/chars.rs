//! Character classes from the Turtle/TriG grammar.
//!
//! `PN_CHARS_BASE`, `PN_CHARS_U` and `PN_CHARS` drive prefixed names, local
//! names and blank node labels.

/// `PN_CHARS_BASE`: ASCII letters plus the allowed Unicode blocks.
pub fn is_pn_chars_base(c: char) -> bool {
    c.is_ascii_alphabetic()
        || matches!(c,
            '\u{00C0}'..='\u{00D6}'
            | '\u{00D8}'..='\u{00F6}'
            | '\u{00F8}'..='\u{02FF}'
            | '\u{0370}'..='\u{037D}'
            | '\u{037F}'..='\u{1FFF}'
            | '\u{200C}'..='\u{200D}'
            | '\u{2070}'..='\u{218F}'
            | '\u{2C00}'..='\u{2FEF}'
            | '\u{3001}'..='\u{D7FF}'
            | '\u{F900}'..='\u{FDCF}'
            | '\u{FDF0}'..='\u{FFFD}'
            | '\u{10000}'..='\u{EFFFF}')
}

/// `PN_CHARS_U ::= PN_CHARS_BASE | '_'`
pub fn is_pn_chars_u(c: char) -> bool {
    c == '_' || is_pn_chars_base(c)
}

/// `PN_CHARS ::= PN_CHARS_U | '-' | [0-9] | #x00B7 | [#x0300-#x036F] | [#x203F-#x2040]`
pub fn is_pn_chars(c: char) -> bool {
    is_pn_chars_u(c)
        || c == '-'
        || c == '\u{00B7}'
        || c.is_ascii_digit()
        || matches!(c, '\u{0300}'..='\u{036F}' | '\u{203F}'..='\u{2040}')
}

/// First character of `PN_PREFIX`.
pub fn is_pn_prefix_start(c: char) -> bool {
    is_pn_chars_base(c)
}

/// First character of `PN_LOCAL`.
pub fn is_pn_local_start(c: char) -> bool {
    c == ':' || c.is_ascii_digit() || is_pn_chars_u(c)
}

pub fn is_ws(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// Characters allowed unescaped inside `<...>`.
pub fn is_iri_char(c: char) -> bool {
    !matches!(c, '\x00'..='\x20' | '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\')
}

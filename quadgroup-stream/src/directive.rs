//! Group directives carried in `#` comments.
//!
//! - `# @group begin NAME` opens the group `NAME`
//! - `# @group end NAME` closes it
//!
//! The whole comment body, trimmed, must have one of these shapes; the name is
//! the rest of the line, trimmed. Anything else is an ordinary comment.

const BEGIN: &str = "@group begin ";
const END: &str = "@group end ";

/// A recognized group directive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    Begin(String),
    End(String),
}

impl Directive {
    /// Recognize a directive in a comment body (the text after `#`).
    pub fn parse(comment: &str) -> Option<Self> {
        let body = comment.trim();
        if let Some(name) = group_name(body, BEGIN) {
            Some(Directive::Begin(name))
        } else {
            group_name(body, END).map(Directive::End)
        }
    }

    /// Name of the group the directive refers to
    pub fn name(&self) -> &str {
        match self {
            Directive::Begin(name) | Directive::End(name) => name,
        }
    }
}

fn group_name(body: &str, keyword: &str) -> Option<String> {
    let name = body.strip_prefix(keyword)?.trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

impl std::fmt::Display for Directive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Directive::Begin(name) => write!(f, "{}{}", BEGIN, name),
            Directive::End(name) => write!(f, "{}{}", END, name),
        }
    }
}

//! Quad - a triple plus an optional graph name

use crate::Term;
use serde::{Deserialize, Serialize};

/// One parsed statement
///
/// `g` is `None` for statements in the default graph. Terms are `Arc`-backed,
/// so cloning a quad is cheap.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Quad {
    pub s: Term,
    pub p: Term,
    pub o: Term,
    pub g: Option<Term>,
}

impl Quad {
    /// Create a quad in the default graph
    pub fn new(s: Term, p: Term, o: Term) -> Self {
        Self { s, p, o, g: None }
    }

    /// Create a quad in a named graph
    pub fn in_graph(s: Term, p: Term, o: Term, g: Term) -> Self {
        Self { s, p, o, g: Some(g) }
    }

    pub fn is_default_graph(&self) -> bool {
        self.g.is_none()
    }
}

/// N-Quads line, without the trailing newline
impl std::fmt::Display for Quad {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.s, self.p, self.o)?;
        if let Some(g) = &self.g {
            write!(f, " {}", g)?;
        }
        write!(f, " .")
    }
}

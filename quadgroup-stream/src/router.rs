//! Group router: decides when each quad leaves the stream.
//!
//! While no group is open, quads pass straight through. While one or more
//! groups are open, every quad is appended to the buffer of each open group
//! and leaves the stream only when that group closes, once per group. Nested
//! and overlapping groups therefore repeat the quads they share.

use std::collections::{HashMap, VecDeque};

use quadgroup_ir::Quad;
use quadgroup_turtle::QuadHandler;

use crate::directive::Directive;

/// An item of grouped parser output
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// A quad released to the consumer
    Quad(Quad),
    /// A prefix declaration, forwarded as soon as it is parsed
    Prefix { prefix: String, iri: String },
}

impl StreamEvent {
    pub fn as_quad(&self) -> Option<&Quad> {
        match self {
            StreamEvent::Quad(quad) => Some(quad),
            StreamEvent::Prefix { .. } => None,
        }
    }

    pub fn into_quad(self) -> Option<Quad> {
        match self {
            StreamEvent::Quad(quad) => Some(quad),
            StreamEvent::Prefix { .. } => None,
        }
    }
}

/// Open groups and the queue of events ready for the consumer.
#[derive(Debug, Default)]
pub struct GroupRouter {
    groups: HashMap<String, Vec<Quad>>,
    output: VecDeque<StreamEvent>,
}

impl GroupRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a directive. Duplicate opens and unmatched closes are ignored.
    pub fn apply(&mut self, directive: Directive) {
        match directive {
            Directive::Begin(name) => self.begin(name),
            Directive::End(name) => self.end(&name),
        }
    }

    fn begin(&mut self, name: String) {
        if self.groups.contains_key(&name) {
            tracing::debug!(group = %name, "group already open, ignoring begin");
            return;
        }
        tracing::debug!(group = %name, open = self.groups.len() + 1, "group opened");
        self.groups.insert(name, Vec::new());
    }

    fn end(&mut self, name: &str) {
        let Some(buffer) = self.groups.remove(name) else {
            tracing::debug!(group = %name, "group not open, ignoring end");
            return;
        };
        tracing::debug!(group = %name, records = buffer.len(), "group closed");
        self.output.extend(buffer.into_iter().map(StreamEvent::Quad));
    }

    /// Emit `quad` now, or append it to every open group.
    pub fn route(&mut self, quad: Quad) {
        if self.groups.is_empty() {
            self.output.push_back(StreamEvent::Quad(quad));
            return;
        }
        tracing::trace!(groups = self.groups.len(), "buffering record");
        for buffer in self.groups.values_mut() {
            buffer.push(quad.clone());
        }
    }

    /// Take the next event ready for the consumer.
    pub fn next_event(&mut self) -> Option<StreamEvent> {
        self.output.pop_front()
    }

    /// Number of events ready for the consumer.
    pub fn ready_len(&self) -> usize {
        self.output.len()
    }

    /// Names of the open groups, sorted.
    pub fn open_groups(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.groups.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of records buffered in `group`, if it is open.
    pub fn buffered(&self, group: &str) -> Option<usize> {
        self.groups.get(group).map(Vec::len)
    }

    /// Drop every open group without emitting its records.
    ///
    /// Returns the number of groups dropped.
    pub fn discard(&mut self) -> usize {
        let dropped = self.groups.len();
        if dropped > 0 {
            let records: usize = self.groups.values().map(Vec::len).sum();
            tracing::debug!(groups = dropped, records, "discarding open groups");
            self.groups.clear();
        }
        dropped
    }
}

impl QuadHandler for GroupRouter {
    fn on_quad(&mut self, quad: Quad) {
        self.route(quad);
    }

    fn on_prefix(&mut self, prefix: &str, namespace: &str) {
        self.output.push_back(StreamEvent::Prefix {
            prefix: prefix.to_string(),
            iri: namespace.to_string(),
        });
    }

    fn on_comment(&mut self, text: &str) {
        if let Some(directive) = Directive::parse(text) {
            tracing::trace!(group = directive.name(), "group directive");
            self.apply(directive);
        }
    }
}

//! Shared helpers for quadgroup-stream integration tests.

// Each test crate uses a different subset of the helpers
#![allow(dead_code)]

pub mod tracing;

use std::collections::VecDeque;
use std::io::{self, Read};

use quadgroup_stream::{GroupedStreamParser, Quad, StreamError, StreamEvent};

/// A source that hands out one scripted chunk per read, like a readable
/// stream pushing items.
pub struct ChunkReader {
    chunks: VecDeque<io::Result<Vec<u8>>>,
}

impl ChunkReader {
    pub fn new<C: AsRef<[u8]>>(chunks: &[C]) -> Self {
        Self {
            chunks: chunks.iter().map(|c| Ok(c.as_ref().to_vec())).collect(),
        }
    }

    /// Fail with `error` after the chunks already queued.
    pub fn then_fail(mut self, error: io::Error) -> Self {
        self.chunks.push_back(Err(error));
        self
    }
}

impl Read for ChunkReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.chunks.pop_front() {
            None => Ok(0),
            Some(Err(e)) => Err(e),
            Some(Ok(mut chunk)) => {
                if chunk.len() > buf.len() {
                    let rest = chunk.split_off(buf.len());
                    self.chunks.push_front(Ok(rest));
                }
                buf[..chunk.len()].copy_from_slice(&chunk);
                // An empty chunk is not end of input; serve the next one
                if chunk.is_empty() {
                    return self.read(buf);
                }
                Ok(chunk.len())
            }
        }
    }
}

/// Everything a grouped parse produced.
#[derive(Debug, Default)]
pub struct Outcome {
    pub quads: Vec<Quad>,
    pub prefixes: Vec<(String, String)>,
    pub errors: Vec<StreamError>,
}

/// Run `chunks` through `GroupedStreamParser::import`.
pub fn run<C: AsRef<[u8]>>(chunks: &[C]) -> Outcome {
    run_reader(ChunkReader::new(chunks))
}

pub fn run_reader(reader: impl Read) -> Outcome {
    let mut outcome = Outcome::default();
    for item in GroupedStreamParser::new().import(reader) {
        match item {
            Ok(StreamEvent::Quad(quad)) => outcome.quads.push(quad),
            Ok(StreamEvent::Prefix { prefix, iri }) => outcome.prefixes.push((prefix, iri)),
            Err(e) => outcome.errors.push(e),
        }
    }
    outcome
}

/// Parse `chunks`, asserting success, and return the quads.
pub fn parse_ok<C: AsRef<[u8]>>(chunks: &[C]) -> Vec<Quad> {
    let outcome = run(chunks);
    assert!(outcome.errors.is_empty(), "unexpected errors: {:?}", outcome.errors);
    outcome.quads
}

/// Subjects of `quads`, as written in the input.
pub fn subjects(quads: &[Quad]) -> Vec<String> {
    quads
        .iter()
        .map(|q| q.s.as_iri().unwrap_or_default().to_string())
        .collect()
}

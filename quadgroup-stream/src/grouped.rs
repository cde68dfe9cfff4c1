//! Grouped stream parser: a Turtle/TriG producer wired to a group router.

use std::io::Read;

use quadgroup_turtle::{StreamParser, TurtleError};

use crate::config::ParserConfig;
use crate::error::{Result, StreamError};
use crate::reader::GroupedReader;
use crate::router::{GroupRouter, StreamEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Open,
    Finished,
    Failed,
}

/// Push-based grouped parser.
///
/// Feed chunks with [`feed`](Self::feed), signal the end with
/// [`finish`](Self::finish), and drain output with
/// [`next_event`](Self::next_event) after each call.
///
/// The first error is terminal: open groups are discarded without emitting
/// their records and every later call returns [`StreamError::Terminated`].
/// Events released before the error stay queued.
#[derive(Debug)]
pub struct GroupedStreamParser {
    parser: StreamParser,
    router: GroupRouter,
    chunk_size: usize,
    status: Status,
}

impl Default for GroupedStreamParser {
    fn default() -> Self {
        Self::new()
    }
}

impl GroupedStreamParser {
    pub fn new() -> Self {
        Self::with_config(&ParserConfig::default())
    }

    pub fn with_config(config: &ParserConfig) -> Self {
        let parser = match &config.base_iri {
            Some(base) => StreamParser::with_base(base.clone()),
            None => StreamParser::new(),
        };
        Self {
            parser,
            router: GroupRouter::new(),
            chunk_size: config.chunk_size.max(1),
            status: Status::Open,
        }
    }

    /// Read size used by the reader adapters.
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Feed the next chunk of input.
    pub fn feed(&mut self, chunk: &[u8]) -> Result<()> {
        self.ensure_open()?;
        match self.parser.feed(chunk, &mut self.router) {
            Ok(()) => Ok(()),
            Err(e) => Err(self.fail_with_parse_error(e)),
        }
    }

    pub fn feed_str(&mut self, chunk: &str) -> Result<()> {
        self.feed(chunk.as_bytes())
    }

    /// Signal end of input.
    ///
    /// Groups still open are discarded without emitting their records.
    /// Calling `finish` again after it succeeded is a no-op.
    pub fn finish(&mut self) -> Result<()> {
        match self.status {
            Status::Finished => return Ok(()),
            Status::Failed => return Err(StreamError::Terminated),
            Status::Open => {}
        }
        if let Err(e) = self.parser.finish(&mut self.router) {
            return Err(self.fail_with_parse_error(e));
        }

        let unclosed = self.router.discard();
        tracing::debug!(unclosed, "stream finished");
        self.status = Status::Finished;
        Ok(())
    }

    /// Terminate the stream because its source failed.
    ///
    /// Returns the error to surface, or `None` if the stream already failed
    /// and its error was surfaced before.
    pub fn fail(&mut self, error: StreamError) -> Option<StreamError> {
        if self.status == Status::Failed {
            return None;
        }
        tracing::debug!(error = %error, "upstream source failed");
        self.router.discard();
        self.status = Status::Failed;
        Some(error)
    }

    fn fail_with_parse_error(&mut self, error: TurtleError) -> StreamError {
        tracing::debug!(error = %error, "parse failed");
        self.router.discard();
        self.status = Status::Failed;
        StreamError::Parse(error)
    }

    fn ensure_open(&self) -> Result<()> {
        match self.status {
            Status::Open => Ok(()),
            Status::Finished | Status::Failed => Err(StreamError::Terminated),
        }
    }

    /// Take the next event ready for the consumer.
    pub fn next_event(&mut self) -> Option<StreamEvent> {
        self.router.next_event()
    }

    /// Take every event ready for the consumer.
    pub fn drain_events(&mut self) -> Vec<StreamEvent> {
        std::iter::from_fn(|| self.router.next_event()).collect()
    }

    /// Names of the groups currently open, sorted.
    pub fn open_groups(&self) -> Vec<&str> {
        self.router.open_groups()
    }

    /// True once the stream finished or failed.
    pub fn is_terminated(&self) -> bool {
        self.status != Status::Open
    }

    /// Pull input from `reader` on demand and iterate over the output.
    pub fn import<R: Read>(self, reader: R) -> GroupedReader<R> {
        GroupedReader::new(self, reader)
    }
}

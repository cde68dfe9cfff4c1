//! Pull-driven adapters over a byte source.
//!
//! Input is read only when every event from earlier input has been taken by
//! the consumer, so a slow consumer slows the reads down and nothing beyond
//! the open group buffers accumulates in memory.

use std::io::{self, Read};
use std::iter::FusedIterator;

use crate::error::{Result, StreamError};
use crate::grouped::GroupedStreamParser;
use crate::router::StreamEvent;

/// What the adapter should do next.
pub(crate) enum Step {
    /// Yield this item; `None` ends the stream
    Ready(Option<Result<StreamEvent>>),
    /// The output queue is empty; read more input into `Pump::buf`
    Read,
}

/// Source-independent driver shared by the sync and async adapters.
#[derive(Debug)]
pub(crate) struct Pump {
    parser: GroupedStreamParser,
    pub(crate) buf: Vec<u8>,
    /// Error waiting behind already released events
    error: Option<StreamError>,
    /// No more input will be read
    done: bool,
}

impl Pump {
    pub(crate) fn new(parser: GroupedStreamParser) -> Self {
        let buf = vec![0u8; parser.chunk_size()];
        Self {
            parser,
            buf,
            error: None,
            done: false,
        }
    }

    pub(crate) fn step(&mut self) -> Step {
        if let Some(event) = self.parser.next_event() {
            return Step::Ready(Some(Ok(event)));
        }
        if let Some(error) = self.error.take() {
            self.done = true;
            return Step::Ready(Some(Err(error)));
        }
        if self.done {
            return Step::Ready(None);
        }
        Step::Read
    }

    /// Handle the outcome of reading into `buf`.
    pub(crate) fn on_read(&mut self, result: io::Result<usize>) {
        let outcome = match result {
            Ok(0) => {
                self.done = true;
                self.parser.finish()
            }
            Ok(n) => self.parser.feed(&self.buf[..n]),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => Ok(()),
            Err(e) => {
                self.done = true;
                match self.parser.fail(e.into()) {
                    Some(error) => Err(error),
                    None => Ok(()),
                }
            }
        };
        if let Err(error) = outcome {
            self.done = true;
            self.error = Some(error);
        }
    }
}

/// Iterator over the grouped output of a [`Read`] source.
///
/// Created by [`GroupedStreamParser::import`]. Yields at most one error, after
/// which iteration ends.
#[derive(Debug)]
pub struct GroupedReader<R> {
    pump: Pump,
    reader: R,
}

impl<R: Read> GroupedReader<R> {
    pub(crate) fn new(parser: GroupedStreamParser, reader: R) -> Self {
        Self {
            pump: Pump::new(parser),
            reader,
        }
    }

    /// Recover the underlying source.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read> Iterator for GroupedReader<R> {
    type Item = Result<StreamEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.pump.step() {
                Step::Ready(item) => return item,
                Step::Read => {
                    let result = self.reader.read(&mut self.pump.buf);
                    self.pump.on_read(result);
                }
            }
        }
    }
}

impl<R: Read> FusedIterator for GroupedReader<R> {}

//! Async adapter over a tokio byte source.

use futures::stream::{self, Stream};
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::error::Result;
use crate::grouped::GroupedStreamParser;
use crate::reader::{Pump, Step};
use crate::router::StreamEvent;

/// Stream the grouped output of an [`AsyncRead`] source.
///
/// Same contract as [`GroupedReader`](crate::GroupedReader): input is read
/// only when earlier output has been taken, and at most one error is yielded
/// before the stream ends.
pub fn grouped_stream<R>(
    parser: GroupedStreamParser,
    reader: R,
) -> impl Stream<Item = Result<StreamEvent>>
where
    R: AsyncRead + Unpin,
{
    stream::unfold((Pump::new(parser), reader), |(mut pump, mut reader)| async move {
        loop {
            match pump.step() {
                Step::Ready(item) => return item.map(|item| (item, (pump, reader))),
                Step::Read => {
                    let result = reader.read(&mut pump.buf).await;
                    pump.on_read(result);
                }
            }
        }
    })
}

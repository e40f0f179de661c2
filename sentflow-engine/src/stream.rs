//! Pull adapters
//!
//! Drive a [`StreamSegmenter`] from a blocking iterator or an async stream
//! of chunks. Units already flushed are always delivered before an error;
//! after the error the sequence ends.

use std::collections::VecDeque;
use std::iter::FusedIterator;

use crate::error::{EngineError, Result};
use crate::traits::StreamSegmenter;

/// Iterator over the units a segmenter produces from `input`
#[derive(Debug)]
pub struct Segments<S, I> {
    segmenter: S,
    input: I,
    pending: VecDeque<String>,
    error: Option<EngineError>,
    done: bool,
}

/// Lazily segment a blocking sequence of chunks
pub fn segment<S, I>(segmenter: S, input: I) -> Segments<S, I::IntoIter>
where
    S: StreamSegmenter,
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    Segments {
        segmenter,
        input: input.into_iter(),
        pending: VecDeque::new(),
        error: None,
        done: false,
    }
}

impl<S, I> Iterator for Segments<S, I>
where
    S: StreamSegmenter,
    I: Iterator,
    I::Item: AsRef<str>,
{
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(unit) = self.pending.pop_front() {
                return Some(Ok(unit));
            }
            if let Some(err) = self.error.take() {
                return Some(Err(err));
            }
            if self.done {
                return None;
            }

            let mut emitted = Vec::new();
            let step = match self.input.next() {
                Some(chunk) => self.segmenter.push(chunk.as_ref(), &mut emitted),
                None => {
                    self.done = true;
                    self.segmenter.finish(&mut emitted)
                }
            };
            self.pending.extend(emitted);
            if let Err(err) = step {
                tracing::warn!(error = %err, "segmentation aborted");
                self.done = true;
                self.error = Some(err);
            }
        }
    }
}

impl<S, I> FusedIterator for Segments<S, I>
where
    S: StreamSegmenter,
    I: Iterator,
    I::Item: AsRef<str>,
{
}

/// Segment an async stream of chunks
#[cfg(feature = "async")]
pub fn segment_stream<S, St>(
    mut segmenter: S,
    input: St,
) -> impl futures::Stream<Item = Result<String>>
where
    S: StreamSegmenter,
    St: futures::Stream,
    St::Item: AsRef<str>,
{
    use futures::StreamExt;

    async_stream::stream! {
        futures::pin_mut!(input);
        let mut emitted = Vec::new();

        while let Some(chunk) = input.next().await {
            let step = segmenter.push(chunk.as_ref(), &mut emitted);
            for unit in emitted.drain(..) {
                yield Ok(unit);
            }
            if let Err(err) = step {
                tracing::warn!(error = %err, "segmentation aborted");
                yield Err(err);
                return;
            }
        }

        let step = segmenter.finish(&mut emitted);
        for unit in emitted.drain(..) {
            yield Ok(unit);
        }
        if let Err(err) = step {
            yield Err(err);
        }
    }
}

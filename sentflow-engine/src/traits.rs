//! Push interface shared by both segmentation designs

use crate::error::Result;

/// Incremental text-to-unit transform.
///
/// Chunks go in through [`push`](Self::push); completed units are appended
/// to `emit` in source order. [`finish`](Self::finish) flushes whatever is
/// still buffered once the input is exhausted.
pub trait StreamSegmenter {
    /// Feed the next chunk of input
    fn push(&mut self, chunk: &str, emit: &mut Vec<String>) -> Result<()>;

    /// Flush the remaining buffer at end of input
    fn finish(&mut self, emit: &mut Vec<String>) -> Result<()>;

    /// Run a complete input through the segmenter and collect every unit
    fn segment_all<I, S>(&mut self, chunks: I) -> Result<Vec<String>>
    where
        Self: Sized,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut units = Vec::new();
        for chunk in chunks {
            self.push(chunk.as_ref(), &mut units)?;
        }
        self.finish(&mut units)?;
        Ok(units)
    }
}

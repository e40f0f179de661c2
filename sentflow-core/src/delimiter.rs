//! Delimiter search
//!
//! Finds the right-most usable fragment boundary in a buffer. Delimiters come
//! in two priority classes; the secondary class is only consulted when no
//! preferred delimiter yields a valid split.

use crate::language::tables::WordSet;
use crate::text::word_count;

/// Terminal punctuation, tried first
pub const DEFAULT_PREFERRED_DELIMITERS: &[&str] = &[". ", "? ", "! ", "…", "\n"];

/// Weaker fragment punctuation
pub const DEFAULT_SECONDARY_DELIMITERS: &[&str] = &["; ", ": ", ", ", "* "];

/// Priority class a delimiter belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelimiterClass {
    Preferred,
    Secondary,
}

/// A usable boundary found by [`DelimiterSearch::find`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitPoint {
    /// Byte offset just past the delimiter's punctuation
    pub end: usize,
    /// The delimiter that matched
    pub delimiter: String,
    pub class: DelimiterClass,
}

impl SplitPoint {
    /// The fragment this split point cuts from `buffer`
    pub fn fragment<'a>(&self, buffer: &'a str) -> &'a str {
        &buffer[..self.end]
    }
}

/// Priority-ordered delimiter lookup with abbreviation exceptions
#[derive(Debug, Clone)]
pub struct DelimiterSearch {
    preferred: Vec<String>,
    secondary: Vec<String>,
    ignore_prefixes: WordSet,
}

impl DelimiterSearch {
    pub fn new(preferred: Vec<String>, secondary: Vec<String>, ignore_prefixes: WordSet) -> Self {
        Self {
            preferred: preferred.into_iter().filter(|d| !d.is_empty()).collect(),
            secondary: secondary.into_iter().filter(|d| !d.is_empty()).collect(),
            ignore_prefixes,
        }
    }

    /// Right-most split point whose prefix holds at least `min_words` words.
    ///
    /// A delimiter ending in whitespace also matches at the very end of the
    /// buffer. The returned fragment keeps the delimiter's punctuation and
    /// drops its trailing whitespace.
    pub fn find(&self, buffer: &str, min_words: usize) -> Option<SplitPoint> {
        let padded = format!("{buffer} ");
        self.find_in_class(buffer, &padded, &self.preferred, DelimiterClass::Preferred, min_words)
            .or_else(|| {
                self.find_in_class(
                    buffer,
                    &padded,
                    &self.secondary,
                    DelimiterClass::Secondary,
                    min_words,
                )
            })
    }

    fn find_in_class(
        &self,
        buffer: &str,
        padded: &str,
        delimiters: &[String],
        class: DelimiterClass,
        min_words: usize,
    ) -> Option<SplitPoint> {
        let mut best: Option<SplitPoint> = None;

        for delimiter in delimiters {
            let punct = delimiter.trim_end();
            let width = if punct.is_empty() {
                delimiter.len()
            } else {
                punct.len()
            };

            for (pos, _) in padded.rmatch_indices(delimiter.as_str()) {
                if pos >= buffer.len() {
                    continue;
                }
                if self.is_ignored(&padded[..pos], punct) {
                    continue;
                }

                let end = (pos + width).min(buffer.len());
                if word_count(&buffer[..end]) >= min_words
                    && best.as_ref().map_or(true, |b| end > b.end)
                {
                    best = Some(SplitPoint {
                        end,
                        delimiter: delimiter.clone(),
                        class,
                    });
                }
                // Occurrences further left only hold fewer words
                break;
            }
        }

        best
    }

    /// Whether the word ending at the delimiter is an ignore prefix, written
    /// either with or without the delimiter's punctuation.
    fn is_ignored(&self, before: &str, punct: &str) -> bool {
        let token = before.rsplit(char::is_whitespace).next().unwrap_or_default();
        if token.is_empty() {
            return false;
        }
        self.ignore_prefixes.contains(token)
            || self.ignore_prefixes.contains(&format!("{token}{punct}"))
    }
}

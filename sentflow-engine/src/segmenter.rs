//! Context-window segmenter
//!
//! Consumes input one character at a time. Once the buffer is long enough,
//! the character `context_size` positions from the tail is probed; when it
//! is a fragment delimiter the sentence oracle decides where the buffer
//! splits. Probing short of the tail leaves the oracle enough trailing
//! context to tell a sentence end from an abbreviation or a decimal point.

use std::collections::HashSet;
use std::sync::Arc;

use sentflow_core::text::char_len;
use sentflow_core::{SentenceOracle, TextSanitizer};

use crate::config::SegmenterConfig;
use crate::error::Result;
use crate::traits::StreamSegmenter;

/// Length-driven segmenter with a trailing context probe
#[derive(Debug)]
pub struct ContextWindowSegmenter {
    config: SegmenterConfig,
    oracle: Arc<SentenceOracle>,
    sanitizer: TextSanitizer,
    fragment_delimiters: HashSet<char>,
    full_sentence_delimiters: HashSet<char>,
    buffer: String,
    /// Length of `buffer` in characters
    buffer_len: usize,
    is_first_unit: bool,
    word_count: usize,
}

impl ContextWindowSegmenter {
    /// Create a segmenter with the oracle named in `config`
    pub fn new(config: SegmenterConfig) -> Result<Self> {
        let oracle = Arc::new(config.oracle());
        Self::with_oracle(config, oracle)
    }

    /// Create a segmenter sharing an existing oracle handle.
    ///
    /// The oracle is initialized here if it was not already.
    pub fn with_oracle(config: SegmenterConfig, oracle: Arc<SentenceOracle>) -> Result<Self> {
        config.validate()?;
        oracle.initialize()?;

        Ok(Self {
            sanitizer: TextSanitizer::new(config.cleanup_links, config.cleanup_emojis),
            fragment_delimiters: config.sentence_fragment_delimiters.chars().collect(),
            full_sentence_delimiters: config.full_sentence_delimiters.chars().collect(),
            config,
            oracle,
            buffer: String::new(),
            buffer_len: 0,
            is_first_unit: true,
            word_count: 0,
        })
    }

    /// Configuration in use
    pub fn config(&self) -> &SegmenterConfig {
        &self.config
    }

    /// Text received but not yet emitted
    pub fn buffered(&self) -> &str {
        &self.buffer
    }

    fn quick_yield_enabled(&self) -> bool {
        self.config.quick_yield_single_sentence_fragment
            || self.config.quick_yield_every_fragment
            || self.config.quick_yield_for_all_sentences
    }

    /// Process one character
    pub fn push_char(&mut self, ch: char, emit: &mut Vec<String>) -> Result<()> {
        if self.config.log_characters {
            tracing::trace!(target: "sentflow::characters", "{ch}");
        }

        // The buffer never starts with whitespace
        if !(self.buffer.is_empty() && ch.is_whitespace()) {
            self.buffer.push(ch);
            self.buffer_len += 1;
        }

        if ch.is_whitespace() || self.fragment_delimiters.contains(&ch) {
            self.word_count += 1;
        }

        if self.is_first_unit
            && self.quick_yield_enabled()
            && self.buffer_len > self.config.minimum_first_fragment_length
        {
            let ends_on_delimiter = self
                .buffer
                .chars()
                .next_back()
                .is_some_and(|last| self.fragment_delimiters.contains(&last));

            if ends_on_delimiter
                || self.word_count >= self.config.force_first_fragment_after_words
            {
                let unit = std::mem::take(&mut self.buffer);
                self.buffer_len = 0;
                self.word_count = 0;
                if !self.config.quick_yield_every_fragment {
                    self.is_first_unit = false;
                }
                tracing::debug!(chars = char_len(&unit), "quick yield");
                self.emit_unit(&unit, emit);
                return Ok(());
            }
        }

        if self.buffer_len <= self.config.minimum_sentence_length + self.config.context_size {
            return Ok(());
        }

        let probe = self.buffer.chars().rev().nth(self.config.context_size - 1);
        if probe.is_some_and(|c| self.fragment_delimiters.contains(&c)) {
            self.try_flush(emit)?;
        }

        Ok(())
    }

    /// Ask the oracle to split the buffer and flush every complete unit
    fn try_flush(&mut self, emit: &mut Vec<String>) -> Result<()> {
        let sentences = self.oracle.split(&self.buffer)?;
        if sentences.len() < 2 {
            return Ok(());
        }

        let mut units = merge_short(sentences, self.config.minimum_sentence_length);
        if units.len() < 2 {
            return Ok(());
        }
        let after_first: usize = units[1..].iter().map(|s| char_len(s)).sum();
        if after_first < self.config.context_size {
            return Ok(());
        }

        let Some(rest) = units.pop() else {
            return Ok(());
        };

        // Keep the trailing space so the next word does not fuse with the rest
        let trailing = &self.buffer[self.buffer.trim_end().len()..];
        let mut buffer = rest;
        buffer.push_str(trailing);
        self.buffer_len = char_len(&buffer);
        self.buffer = buffer;

        for unit in &units {
            self.emit_unit(unit, emit);
        }
        Ok(())
    }

    fn emit_unit(&mut self, unit: &str, emit: &mut Vec<String>) {
        if self.config.quick_yield_for_all_sentences
            && unit
                .trim_end()
                .chars()
                .next_back()
                .is_some_and(|c| self.full_sentence_delimiters.contains(&c))
        {
            self.is_first_unit = true;
        }

        if let Some(cleaned) = self.sanitizer.clean_unit(unit) {
            emit.push(cleaned);
        }
    }
}

impl StreamSegmenter for ContextWindowSegmenter {
    fn push(&mut self, chunk: &str, emit: &mut Vec<String>) -> Result<()> {
        for ch in chunk.chars() {
            self.push_char(ch, emit)?;
        }
        Ok(())
    }

    fn finish(&mut self, emit: &mut Vec<String>) -> Result<()> {
        let remaining = std::mem::take(&mut self.buffer);
        self.buffer_len = 0;
        self.word_count = 0;
        if remaining.trim().is_empty() {
            return Ok(());
        }

        let sentences = self.oracle.split(&remaining)?;
        for unit in merge_short(sentences, self.config.minimum_sentence_length) {
            self.emit_unit(&unit, emit);
        }
        Ok(())
    }
}

/// Join each sentence shorter than `min_len` characters onto the next one.
///
/// Every returned unit except possibly the last is at least `min_len` long.
fn merge_short(sentences: Vec<String>, min_len: usize) -> Vec<String> {
    let mut units = Vec::with_capacity(sentences.len());
    let mut pending = String::new();

    for sentence in sentences {
        if !pending.is_empty() {
            pending.push(' ');
        }
        pending.push_str(&sentence);
        if char_len(&pending) >= min_len {
            units.push(std::mem::take(&mut pending));
        }
    }

    if !pending.is_empty() {
        units.push(pending);
    }
    units
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_merge_short_forward() {
        assert_eq!(
            merge_short(strings(&["Short.", "Longer sentence."]), 7),
            strings(&["Short. Longer sentence."])
        );
        assert_eq!(
            merge_short(strings(&["Short.", "Longer sentence."]), 6),
            strings(&["Short.", "Longer sentence."])
        );
        assert_eq!(
            merge_short(strings(&["A long one.", "Hi.", "Ok."]), 5),
            strings(&["A long one.", "Hi. Ok."])
        );
        assert_eq!(
            merge_short(strings(&["A long one.", "Hi."]), 5),
            strings(&["A long one.", "Hi."])
        );
        assert!(merge_short(Vec::new(), 5).is_empty());
    }

    #[test]
    fn test_context_measured_after_merging() {
        let config = SegmenterConfig::builder()
            .minimum_sentence_length(5)
            .context_size(3)
            .build()
            .unwrap();
        let mut segmenter = ContextWindowSegmenter::new(config).unwrap();
        let mut out = Vec::new();

        // "Hi." merges forward, so only "Y" trails the merged unit
        segmenter.push("Hi. Good morning. Y", &mut out).unwrap();
        assert!(out.is_empty());
        assert_eq!(segmenter.buffered(), "Hi. Good morning. Y");

        segmenter.push("es indeed. S", &mut out).unwrap();
        assert_eq!(out, vec!["Hi. Good morning.", "Yes indeed."]);
        assert_eq!(segmenter.buffered(), "S");
    }

    #[test]
    fn test_buffer_never_starts_with_whitespace() {
        let mut segmenter = ContextWindowSegmenter::new(SegmenterConfig::default()).unwrap();
        let mut out = Vec::new();
        segmenter.push("  \n  Hello", &mut out).unwrap();
        assert_eq!(segmenter.buffered(), "Hello");
        assert!(out.is_empty());
    }

    #[test]
    fn test_flush_keeps_trailing_space() {
        let mut segmenter = ContextWindowSegmenter::new(SegmenterConfig::default()).unwrap();
        let mut out = Vec::new();
        segmenter
            .push("This is a test. This is another test sentence. Just testi", &mut out)
            .unwrap();
        assert_eq!(out, strings(&["This is a test.", "This is another test sentence."]));
        assert_eq!(segmenter.buffered(), "Just testi");

        segmenter.push("ng out ", &mut out).unwrap();
        assert_eq!(segmenter.buffered(), "Just testing out ");
    }

    #[test]
    fn test_finish_empties_buffer() {
        let mut segmenter = ContextWindowSegmenter::new(SegmenterConfig::default()).unwrap();
        let mut out = Vec::new();
        segmenter.push("Tail text", &mut out).unwrap();
        segmenter.finish(&mut out).unwrap();
        assert_eq!(out, strings(&["Tail text"]));
        assert_eq!(segmenter.buffered(), "");

        segmenter.finish(&mut out).unwrap();
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_unknown_backend_fails_on_construction() {
        let config = SegmenterConfig::builder()
            .tokenizer_backend("nltk")
            .build()
            .unwrap();
        let err = ContextWindowSegmenter::new(config).unwrap_err();
        assert!(err.is_configuration());
    }
}

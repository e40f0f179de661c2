//! Deadline-driven scheduler
//!
//! Emits units at the pace a downstream consumer reads them. Every emitted
//! word pushes the output deadline back by one word-duration at the target
//! rate; when the deadline approaches, the best unit available is flushed:
//! a full sentence, then a delimiter-bounded fragment, then the raw buffer.
//!
//! Before the deadline, units are only flushed when the oracle already sees
//! two more sentences behind them. Boundaries near the buffer's tail are
//! unstable and may move once more tokens arrive.

use std::sync::Arc;
use std::time::Instant;

use sentflow_core::text::{
    last_word_start, non_whitespace_len, normalize_whitespace, offset_after_non_whitespace,
    word_count,
};
use sentflow_core::{DelimiterSearch, SentenceOracle, WordSet};

use crate::clock::{Clock, SystemClock};
use crate::config::SchedulerConfig;
use crate::error::Result;
use crate::traits::StreamSegmenter;

/// Why a unit was flushed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushKind {
    /// Before the deadline, with two sentences of lookahead
    Lookahead,
    /// Deadline reached, first oracle sentence
    Sentence,
    /// Deadline reached, delimiter-bounded fragment
    Fragment,
    /// Deadline reached, whole buffer minus the in-flight word
    Raw,
    /// End of input
    Tail,
}

impl FlushKind {
    /// Lowercase label used in logs and output
    pub fn as_str(&self) -> &'static str {
        match self {
            FlushKind::Lookahead => "lookahead",
            FlushKind::Sentence => "sentence",
            FlushKind::Fragment => "fragment",
            FlushKind::Raw => "raw",
            FlushKind::Tail => "tail",
        }
    }
}

/// Counters of what has been emitted so far
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmissionRecord {
    /// Units emitted
    pub units: usize,
    /// Words across all emitted units
    pub words: usize,
    /// Reason for the most recent flush
    pub last_kind: Option<FlushKind>,
}

/// Source of a deadline candidate, strongest first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CandidateKind {
    Sentence,
    Fragment,
    Raw,
}

/// Best unit the buffer currently offers
#[derive(Debug)]
struct Candidate {
    text: String,
    kind: CandidateKind,
}

/// Latency-aware scheduler driven by a moving output deadline
pub struct DeadlineScheduler<C: Clock = SystemClock> {
    config: SchedulerConfig,
    oracle: Arc<SentenceOracle>,
    search: DelimiterSearch,
    avoid_pause: WordSet,
    clock: C,
    buffer_full: String,
    start_time: Instant,
    last_emission_time: Instant,
    record: EmissionRecord,
    has_output_started: bool,
}

impl DeadlineScheduler<SystemClock> {
    /// Create a scheduler on the system clock with the oracle named in `config`
    pub fn new(config: SchedulerConfig) -> Result<Self> {
        let oracle = Arc::new(config.oracle());
        Self::with_clock(config, oracle, SystemClock)
    }
}

impl<C: Clock> DeadlineScheduler<C> {
    /// Create a scheduler with an explicit oracle and time source.
    ///
    /// The session clock starts now. The oracle is initialized here if it
    /// was not already.
    pub fn with_clock(
        config: SchedulerConfig,
        oracle: Arc<SentenceOracle>,
        clock: C,
    ) -> Result<Self> {
        config.validate()?;
        oracle.initialize()?;

        let search = config.delimiter_search()?;
        let avoid_pause = config.avoid_pause_set()?;
        let now = clock.now();

        Ok(Self {
            config,
            oracle,
            search,
            avoid_pause,
            clock,
            buffer_full: String::new(),
            start_time: now,
            last_emission_time: now,
            record: EmissionRecord::default(),
            has_output_started: false,
        })
    }

    /// Configuration in use
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Emission counters
    pub fn record(&self) -> &EmissionRecord {
        &self.record
    }

    /// Text received but not yet emitted
    pub fn buffered(&self) -> &str {
        &self.buffer_full
    }

    /// Whether at least one unit went out
    pub fn has_output_started(&self) -> bool {
        self.has_output_started
    }

    fn min_output_length(&self) -> usize {
        self.config
            .min_output_length
            .get(self.record.units)
            .copied()
            .unwrap_or_default()
    }

    fn max_wait_for_fragment(&self) -> f64 {
        self.config
            .max_wait_for_fragment
            .get(self.record.units)
            .copied()
            .unwrap_or_default()
    }

    /// Seconds subtracted from the deadline for a candidate of `words` words
    fn deadline_offset(&self, words: usize) -> f64 {
        let n = self.record.units;
        let fixed = self
            .config
            .deadline_offset_static
            .get(n)
            .copied()
            .unwrap_or_default();
        let dynamic = self
            .config
            .deadline_offset_dynamic
            .get(n)
            .copied()
            .unwrap_or_default();
        fixed + dynamic * words as f64 * self.config.seconds_per_word()
    }

    fn is_output_needed(&self, now: Instant, candidate_words: usize) -> bool {
        let elapsed = now.saturating_duration_since(self.start_time).as_secs_f64();
        if !self.has_output_started && elapsed < self.config.lead_time {
            return false;
        }
        let deadline = self.record.words as f64 * self.config.seconds_per_word()
            - self.deadline_offset(candidate_words);
        elapsed > deadline
    }

    fn candidate(&self, buffer: &str, sentences: &[String], min_len: usize) -> Candidate {
        if sentences.len() > 1 && word_count(&sentences[0]) >= min_len {
            return Candidate {
                text: sentences[0].clone(),
                kind: CandidateKind::Sentence,
            };
        }
        if let Some(split) = self.search.find(buffer, min_len) {
            return Candidate {
                text: split.fragment(buffer).to_string(),
                kind: CandidateKind::Fragment,
            };
        }
        Candidate {
            text: buffer.to_string(),
            kind: CandidateKind::Raw,
        }
    }

    /// Reason a raw flush has to wait, if any
    fn raw_deferral(&self, buffer: &str, now: Instant, min_len: usize) -> Option<&'static str> {
        if word_count(buffer) < min_len {
            return Some("too few words");
        }
        let waited = now
            .saturating_duration_since(self.last_emission_time)
            .as_secs_f64();
        if waited < self.max_wait_for_fragment() {
            return Some("waiting for a delimiter");
        }
        let last_word = buffer
            .split_whitespace()
            .next_back()
            .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
            .unwrap_or_default();
        if self.avoid_pause.contains(last_word) {
            return Some("ends on avoid-pause word");
        }
        None
    }

    fn flush(&mut self, text: &str, kind: FlushKind, now: Instant, emit: &mut Vec<String>) {
        let unit = normalize_whitespace(text);
        if unit.is_empty() {
            return;
        }

        let cut = offset_after_non_whitespace(&self.buffer_full, non_whitespace_len(&unit));
        self.buffer_full.drain(..cut);
        trim_start_in_place(&mut self.buffer_full);

        let words = word_count(&unit);
        self.record.units += 1;
        self.record.words += words;
        self.record.last_kind = Some(kind);
        self.last_emission_time = now;
        if !self.has_output_started {
            // Deadlines count from when the consumer starts receiving
            self.has_output_started = true;
            self.start_time = now;
        }

        tracing::debug!(
            kind = kind.as_str(),
            index = self.record.units - 1,
            words,
            "flushed unit"
        );
        emit.push(unit);
    }
}

impl<C: Clock> StreamSegmenter for DeadlineScheduler<C> {
    fn push(&mut self, chunk: &str, emit: &mut Vec<String>) -> Result<()> {
        if chunk.is_empty() {
            return Ok(());
        }
        self.buffer_full.push_str(chunk);
        trim_start_in_place(&mut self.buffer_full);

        // The last word may still be incomplete, so it never takes part
        let Some(last_start) = last_word_start(&self.buffer_full) else {
            return Ok(());
        };
        let buffer = self.buffer_full[..last_start].trim_end().to_string();

        let now = self.clock.now();
        let min_len = self.min_output_length();
        let sentences = self.oracle.split(&buffer)?;
        let candidate = self.candidate(&buffer, &sentences, min_len);

        if !self.is_output_needed(now, word_count(&candidate.text)) {
            if let Some(needed) = sentences_needed(&sentences, min_len) {
                if needed + 2 <= sentences.len() {
                    let unit = sentences[..needed].join(" ");
                    self.flush(&unit, FlushKind::Lookahead, now, emit);
                }
            }
            return Ok(());
        }

        match candidate.kind {
            CandidateKind::Sentence => {
                self.flush(&candidate.text, FlushKind::Sentence, now, emit);
            }
            CandidateKind::Fragment => {
                self.flush(&candidate.text, FlushKind::Fragment, now, emit);
            }
            CandidateKind::Raw => match self.raw_deferral(&buffer, now, min_len) {
                Some(reason) => {
                    tracing::trace!(reason = reason, "raw flush deferred");
                }
                None => self.flush(&buffer, FlushKind::Raw, now, emit),
            },
        }
        Ok(())
    }

    fn finish(&mut self, emit: &mut Vec<String>) -> Result<()> {
        let remaining = std::mem::take(&mut self.buffer_full);
        let now = self.clock.now();
        for sentence in self.oracle.split(&remaining)? {
            let unit = normalize_whitespace(&sentence);
            if unit.is_empty() {
                continue;
            }
            self.record.units += 1;
            self.record.words += word_count(&unit);
            self.record.last_kind = Some(FlushKind::Tail);
            self.last_emission_time = now;
            tracing::debug!(kind = "tail", index = self.record.units - 1, "flushed unit");
            emit.push(unit);
        }
        Ok(())
    }
}

/// Smallest number of leading sentences whose combined word count exceeds
/// `min_len`
fn sentences_needed(sentences: &[String], min_len: usize) -> Option<usize> {
    let mut total = 0;
    for (i, sentence) in sentences.iter().enumerate() {
        total += word_count(sentence);
        if total > min_len {
            return Some(i + 1);
        }
    }
    None
}

fn trim_start_in_place(text: &mut String) {
    let leading = text.len() - text.trim_start().len();
    if leading > 0 {
        text.drain(..leading);
    }
}

impl<C: Clock> std::fmt::Debug for DeadlineScheduler<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeadlineScheduler")
            .field("oracle", &self.oracle)
            .field("buffered", &self.buffer_full)
            .field("record", &self.record)
            .field("has_output_started", &self.has_output_started)
            .finish()
    }
}

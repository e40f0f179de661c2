//! Simulated token streams
//!
//! Files are read whole, then cut into the small chunks an LLM would stream
//! and optionally paced at a fixed token rate.

use std::thread;
use std::time::{Duration, Instant};

/// Cut `text` into chunks of `chunk_chars` characters, or into words with
/// their trailing whitespace when no size is given.
pub fn simulate_tokens(text: &str, chunk_chars: Option<usize>) -> Vec<String> {
    match chunk_chars {
        Some(size) => {
            let chars: Vec<char> = text.chars().collect();
            chars
                .chunks(size.max(1))
                .map(|chunk| chunk.iter().collect())
                .collect()
        }
        None => {
            let mut tokens = Vec::new();
            let mut current = String::new();
            let mut in_whitespace = false;
            for ch in text.chars() {
                if in_whitespace && !ch.is_whitespace() {
                    tokens.push(std::mem::take(&mut current));
                }
                in_whitespace = ch.is_whitespace();
                current.push(ch);
            }
            if !current.is_empty() {
                tokens.push(current);
            }
            tokens
        }
    }
}

/// Releases tokens no faster than a fixed rate
#[derive(Debug)]
pub struct TokenPacer {
    interval: Option<Duration>,
    next: Option<Instant>,
}

impl TokenPacer {
    /// Pace at `tokens_per_second`; `None` or a non-positive rate disables pacing
    pub fn new(tokens_per_second: Option<f64>) -> Self {
        let interval = tokens_per_second
            .filter(|rate| *rate > 0.0 && rate.is_finite())
            .map(|rate| Duration::from_secs_f64(1.0 / rate));
        Self {
            interval,
            next: None,
        }
    }

    /// Whether this pacer ever sleeps
    pub fn is_paced(&self) -> bool {
        self.interval.is_some()
    }

    /// Block until the next token may be released
    pub fn wait(&mut self) {
        let Some(interval) = self.interval else {
            return;
        };
        let now = Instant::now();
        let slot = self.next.map_or(now, |next| next.max(now));
        if slot > now {
            thread::sleep(slot - now);
        }
        self.next = Some(slot + interval);
    }
}

//! Rule-based sentence splitter
//!
//! A boundary is placed after a run of terminators (plus any closing quotes
//! or brackets) when the language rules accept it. Periods are the weak
//! case: abbreviations, single-letter initials and a lowercase next word all
//! veto the split.

use std::sync::Arc;

use crate::error::Result;
use crate::language::LanguageRules;
use crate::oracle::SentenceSplitter;

/// Splitter driven by an embedded per-language table
#[derive(Debug, Clone)]
pub struct RuleBasedSplitter {
    rules: Arc<LanguageRules>,
}

impl RuleBasedSplitter {
    pub fn new(rules: Arc<LanguageRules>) -> Self {
        Self { rules }
    }

    fn is_any_terminator(&self, ch: char) -> bool {
        self.rules.is_terminator(ch) || self.rules.is_standalone_terminator(ch)
    }

    /// Decide whether the terminator run `run` (chars, closers included)
    /// ends a sentence. `before` is the text preceding the run and `after`
    /// everything following it.
    fn is_boundary(&self, run: &[char], before: &str, after: &str) -> bool {
        if run.iter().any(|&ch| self.rules.is_standalone_terminator(ch)) {
            return true;
        }

        let strong = run
            .iter()
            .any(|&ch| self.rules.is_terminator(ch) && !is_weak_terminator(ch));

        let next = match after.chars().next() {
            None => return true,
            Some(ch) => ch,
        };

        if !next.is_whitespace() {
            return strong && self.rules.split_before_uppercase() && next.is_uppercase();
        }

        if strong {
            return true;
        }

        // A lone period can still belong to an abbreviation or initial
        if run.first() == Some(&'.') && run.iter().filter(|&&ch| ch == '.').count() == 1 {
            let word = preceding_word(before);
            if self.rules.is_abbreviation(word) {
                return false;
            }
            if self.rules.single_letter_initials() && is_initial(word) {
                return false;
            }
        }

        if self.rules.lowercase_continuation() {
            if let Some(following) = after.trim_start().chars().next() {
                if following.is_lowercase() {
                    return false;
                }
            }
        }

        true
    }
}

impl SentenceSplitter for RuleBasedSplitter {
    fn split(&self, text: &str) -> Result<Vec<String>> {
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let mut sentences = Vec::new();
        let mut start = 0;
        let mut i = 0;

        while i < chars.len() {
            let (pos, ch) = chars[i];
            if !self.is_any_terminator(ch) {
                i += 1;
                continue;
            }

            // Absorb "?!", "..." and closing quotes into one run
            let mut j = i + 1;
            while j < chars.len()
                && (self.is_any_terminator(chars[j].1) || self.rules.is_closer(chars[j].1))
            {
                j += 1;
            }
            let end = chars.get(j).map_or(text.len(), |(p, _)| *p);
            let run: Vec<char> = chars[i..j].iter().map(|(_, c)| *c).collect();

            if self.is_boundary(&run, &text[start..pos], &text[end..]) {
                push_trimmed(&mut sentences, &text[start..end]);
                start = end;
            }
            i = j;
        }

        push_trimmed(&mut sentences, &text[start..]);
        Ok(sentences)
    }
}

fn is_weak_terminator(ch: char) -> bool {
    matches!(ch, '.' | '…')
}

/// Word directly before a terminator, stripped of opening punctuation
fn preceding_word(before: &str) -> &str {
    let word = before
        .rsplit(char::is_whitespace)
        .next()
        .unwrap_or_default();
    word.trim_start_matches(|c: char| !c.is_alphanumeric())
}

fn is_initial(word: &str) -> bool {
    let mut chars = word.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_uppercase())
}

fn push_trimmed(sentences: &mut Vec<String>, piece: &str) {
    let piece = piece.trim();
    if !piece.is_empty() {
        sentences.push(piece.to_string());
    }
}

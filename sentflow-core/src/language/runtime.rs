//! Compiled language rules used by the rule-based splitter

use std::collections::HashSet;

use crate::language::config::LanguageConfig;
use crate::language::tables::{MatchMode, WordSet};

/// Lookup-ready form of a [`LanguageConfig`]
#[derive(Debug, Clone)]
pub struct LanguageRules {
    code: String,
    name: String,
    terminators: HashSet<char>,
    standalone: HashSet<char>,
    closers: HashSet<char>,
    abbreviations: WordSet,
    split_before_uppercase: bool,
    lowercase_continuation: bool,
    single_letter_initials: bool,
}

impl LanguageRules {
    /// Compile from a validated configuration
    pub fn from_config(config: &LanguageConfig) -> Result<Self, String> {
        config.validate()?;

        Ok(Self {
            code: config.metadata.code.clone(),
            name: config.metadata.name.clone(),
            terminators: config.terminators.chars.iter().copied().collect(),
            standalone: config.terminators.standalone.iter().copied().collect(),
            closers: config.closers.chars.iter().copied().collect(),
            abbreviations: WordSet::from_categories(
                &config.abbreviations.categories,
                MatchMode::CaseInsensitive,
            ),
            split_before_uppercase: config.terminators.split_before_uppercase,
            lowercase_continuation: config.suppression.lowercase_continuation,
            single_letter_initials: config.suppression.single_letter_initials,
        })
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Terminator that needs whitespace (or end of text) after it
    pub fn is_terminator(&self, ch: char) -> bool {
        self.terminators.contains(&ch)
    }

    /// Terminator that ends a sentence regardless of what follows
    pub fn is_standalone_terminator(&self, ch: char) -> bool {
        self.standalone.contains(&ch)
    }

    pub fn is_closer(&self, ch: char) -> bool {
        self.closers.contains(&ch)
    }

    /// `word` is given without its trailing period
    pub fn is_abbreviation(&self, word: &str) -> bool {
        self.abbreviations.contains(word)
    }

    pub fn split_before_uppercase(&self) -> bool {
        self.split_before_uppercase
    }

    pub fn lowercase_continuation(&self) -> bool {
        self.lowercase_continuation
    }

    pub fn single_letter_initials(&self) -> bool {
        self.single_letter_initials
    }
}

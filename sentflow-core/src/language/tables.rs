//! Word lookup tables
//!
//! Flat sets built from categorized word lists, the way the TOML files group
//! them. Length bounds give a cheap rejection before hashing.

use std::collections::{HashMap, HashSet};

/// How a [`WordSet`] compares words
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Byte-for-byte comparison
    Exact,
    /// Compare lowercased forms
    CaseInsensitive,
}

/// Set of words with O(1) membership checks
#[derive(Debug, Clone)]
pub struct WordSet {
    words: HashSet<String>,
    mode: MatchMode,
    min_length: usize,
    max_length: usize,
}

impl WordSet {
    /// Build from any iterator of words
    pub fn new<I, S>(words: I, mode: MatchMode) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::empty(mode);
        for word in words {
            set.insert(word.into());
        }
        set
    }

    /// Create from categorized word lists
    pub fn from_categories(categories: &HashMap<String, Vec<String>>, mode: MatchMode) -> Self {
        Self::new(categories.values().flatten().cloned(), mode)
    }

    /// Create an empty set
    pub fn empty(mode: MatchMode) -> Self {
        Self {
            words: HashSet::new(),
            mode,
            min_length: usize::MAX,
            max_length: 0,
        }
    }

    /// Add a word
    pub fn insert(&mut self, word: String) {
        let word = match self.mode {
            MatchMode::Exact => word,
            MatchMode::CaseInsensitive => word.to_lowercase(),
        };
        if word.is_empty() {
            return;
        }
        self.min_length = self.min_length.min(word.len());
        self.max_length = self.max_length.max(word.len());
        self.words.insert(word);
    }

    /// Check membership
    pub fn contains(&self, word: &str) -> bool {
        match self.mode {
            MatchMode::Exact => self.in_bounds(word) && self.words.contains(word),
            MatchMode::CaseInsensitive => {
                let folded = word.to_lowercase();
                self.in_bounds(&folded) && self.words.contains(&folded)
            }
        }
    }

    fn in_bounds(&self, word: &str) -> bool {
        word.len() >= self.min_length && word.len() <= self.max_length
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_mode() {
        let set = WordSet::new(["Dr.", "U.S."], MatchMode::Exact);
        assert!(set.contains("Dr."));
        assert!(!set.contains("dr."));
        assert!(!set.contains("Dr"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_case_insensitive_mode() {
        let set = WordSet::new(["I", "and"], MatchMode::CaseInsensitive);
        assert!(set.contains("i"));
        assert!(set.contains("AND"));
        assert!(!set.contains("andes"));
    }

    #[test]
    fn test_from_categories_flattens() {
        let mut categories = HashMap::new();
        categories.insert("a".to_string(), vec!["one".to_string(), "two".to_string()]);
        categories.insert("b".to_string(), vec!["two".to_string(), "three".to_string()]);
        let set = WordSet::from_categories(&categories, MatchMode::Exact);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_empty_set_rejects_everything() {
        let set = WordSet::empty(MatchMode::Exact);
        assert!(set.is_empty());
        assert!(!set.contains(""));
        assert!(!set.contains("x"));
    }
}

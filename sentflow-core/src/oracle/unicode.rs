use unicode_segmentation::UnicodeSegmentation;

use crate::error::Result;
use crate::oracle::SentenceSplitter;

/// Sentence bounds from Unicode Standard Annex #29.
///
/// Knows nothing about abbreviations: "Dr. Jones" splits after "Dr.".
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeSplitter;

impl SentenceSplitter for UnicodeSplitter {
    fn split(&self, text: &str) -> Result<Vec<String>> {
        Ok(text
            .split_sentence_bounds()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_bounds() {
        let sentences = UnicodeSplitter
            .split("This is a test. This is another test sentence. Just testing.")
            .unwrap();
        assert_eq!(
            sentences,
            vec![
                "This is a test.",
                "This is another test sentence.",
                "Just testing."
            ]
        );
    }

    #[test]
    fn test_keeps_decimal() {
        let sentences = UnicodeSplitter
            .split("Good muffins cost $3.88 in New York. Please buy two.")
            .unwrap();
        assert_eq!(sentences[0], "Good muffins cost $3.88 in New York.");
        assert_eq!(sentences.len(), 2);
    }
}

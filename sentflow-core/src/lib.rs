//! Building blocks for streaming sentence segmentation
//!
//! This crate holds the pieces the streaming engine composes: the sentence
//! oracle with its built-in backends, the delimiter search, text
//! sanitization and the embedded word lists.

pub mod delimiter;
pub mod error;
pub mod language;
pub mod oracle;
pub mod sanitize;
pub mod text;
pub mod word_lists;

pub use delimiter::{
    DelimiterClass, DelimiterSearch, SplitPoint, DEFAULT_PREFERRED_DELIMITERS,
    DEFAULT_SECONDARY_DELIMITERS,
};
pub use error::{CoreError, Result};
pub use language::{MatchMode, WordSet};
pub use oracle::{
    SentenceOracle, SentenceSplitter, BUILTIN_BACKENDS, CUSTOM_BACKEND, RULES_BACKEND,
    UNICODE_BACKEND,
};
pub use sanitize::TextSanitizer;
pub use word_lists::WordLists;

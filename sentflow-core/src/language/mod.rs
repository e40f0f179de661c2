//! Per-language tables for the rule-based splitter

pub mod config;
pub mod loader;
pub mod runtime;
pub mod tables;

pub use config::LanguageConfig;
pub use loader::{get_rules, load_language, supported_languages};
pub use runtime::LanguageRules;
pub use tables::{MatchMode, WordSet};

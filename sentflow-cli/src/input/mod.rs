//! Input handling module

pub mod file_reader;
pub mod glob_resolver;
pub mod tokens;

pub use file_reader::{FileReader, InputSource};
pub use glob_resolver::resolve_patterns;
pub use tokens::{simulate_tokens, TokenPacer};

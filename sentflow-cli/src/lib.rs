//! sentflow CLI library
//!
//! This library provides the command-line interface for the sentflow
//! streaming segmenters: simulated token streams in, timed units out.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod logging;
pub mod output;
pub mod progress;

pub use error::{CliError, CliResult};

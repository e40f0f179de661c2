//! Streaming sentence segmentation for real-time consumers
//!
//! Two designs turn an incrementally arriving text stream (LLM tokens, for
//! example) into sentences or sentence fragments:
//!
//! - [`ContextWindowSegmenter`] flushes whatever the sentence oracle agrees
//!   is complete, probing a fixed distance behind the tail.
//! - [`DeadlineScheduler`] paces output against a target reading rate and
//!   falls back to weaker boundaries as the output deadline approaches.
//!
//! Both implement [`StreamSegmenter`] and can be driven through
//! [`segment`] or, with the `async` feature, [`segment_stream`].

#![warn(missing_docs)]

pub mod clock;
pub mod config;
pub mod error;
pub mod params;
pub mod scheduler;
pub mod segmenter;
pub mod stream;
pub mod traits;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{
    SchedulerConfig, SchedulerConfigBuilder, SegmenterConfig, SegmenterConfigBuilder,
    WORDS_PER_TOKEN,
};
pub use error::{EngineError, Result};
pub use params::PerUnit;
pub use scheduler::{DeadlineScheduler, EmissionRecord, FlushKind};
pub use segmenter::ContextWindowSegmenter;
#[cfg(feature = "async")]
pub use stream::segment_stream;
pub use stream::{segment, Segments};
pub use traits::StreamSegmenter;

// Re-export from core for convenience
pub use sentflow_core::{CoreError, SentenceOracle, SentenceSplitter, TextSanitizer};

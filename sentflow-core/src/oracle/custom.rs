use crate::error::{CoreError, Result};
use crate::oracle::{SentenceSplitter, CUSTOM_BACKEND};

type SplitFn = dyn Fn(&str) -> std::result::Result<Vec<String>, String> + Send + Sync;

/// Adapts a plain function into a [`SentenceSplitter`]
pub struct FnSplitter {
    split: Box<SplitFn>,
}

impl FnSplitter {
    pub fn infallible<F>(split: F) -> Self
    where
        F: Fn(&str) -> Vec<String> + Send + Sync + 'static,
    {
        Self {
            split: Box::new(move |text| Ok(split(text))),
        }
    }

    pub fn fallible<F>(split: F) -> Self
    where
        F: Fn(&str) -> std::result::Result<Vec<String>, String> + Send + Sync + 'static,
    {
        Self {
            split: Box::new(split),
        }
    }
}

impl SentenceSplitter for FnSplitter {
    fn split(&self, text: &str) -> Result<Vec<String>> {
        (self.split)(text).map_err(|reason| CoreError::OracleFailure {
            backend: CUSTOM_BACKEND.to_string(),
            reason,
        })
    }
}

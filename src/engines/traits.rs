//! Engine traits and types

use crate::results::SearchResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Parameters handed to an engine for one search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestParams {
    /// Search query string
    pub query: String,
    /// Page number (1-indexed)
    pub pageno: u32,
    /// Language code
    pub lang: String,
}

impl RequestParams {
    /// Create new request parameters
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            pageno: 1,
            lang: "en".to_string(),
        }
    }

    pub fn with_page(mut self, pageno: u32) -> Self {
        self.pageno = pageno.max(1);
        self
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }
}

/// Main engine trait that every backend adapter implements
///
/// An engine may fail or stall independently of its peers; the dispatcher
/// records such failures without discarding the other engines' results.
#[async_trait]
pub trait Engine: Send + Sync {
    /// Engine name
    fn name(&self) -> &str;

    /// Default timeout in seconds
    fn timeout(&self) -> f64 {
        crate::DEFAULT_TIMEOUT as f64
    }

    /// Run the search and return this engine's raw results
    async fn search(&self, params: &RequestParams) -> anyhow::Result<Vec<SearchResult>>;
}

//! Search request and query data models

use crate::config::SearchSettings;
use crate::engines::RequestParams;
use serde::{Deserialize, Serialize};

/// Inbound search request as sent by callers of `POST /api/search`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Free-text query
    #[serde(default)]
    pub query: String,
    /// Engine identifiers; the configured defaults apply when absent or empty
    #[serde(default)]
    pub engines: Option<Vec<String>>,
    /// Page number, floored at 1
    #[serde(default)]
    pub page: Option<i64>,
    /// Language tag
    #[serde(default)]
    pub language: Option<String>,
}

/// Why a request was rejected before any engine ran
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidRequest {
    #[error("query is required")]
    EmptyQuery,
}

/// Normalized search query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Trimmed, non-empty query
    pub query: String,
    /// Engine identifiers as requested; normalized per engine at dispatch
    pub engines: Vec<String>,
    /// Page number (1-indexed)
    pub pageno: u32,
    /// Language code
    pub lang: String,
}

impl SearchQuery {
    /// Validate a request and fill in defaults
    pub fn normalize(
        request: SearchRequest,
        settings: &SearchSettings,
    ) -> Result<Self, InvalidRequest> {
        let query = request.query.trim().to_string();
        if query.is_empty() {
            return Err(InvalidRequest::EmptyQuery);
        }

        let engines = match request.engines {
            Some(engines) if !engines.is_empty() => engines,
            _ => settings.default_engines.clone(),
        };

        let pageno = request
            .page
            .unwrap_or(1)
            .clamp(1, i64::from(u32::MAX)) as u32;

        let lang = request
            .language
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| settings.default_lang.clone());

        Ok(Self {
            query,
            engines,
            pageno,
            lang,
        })
    }

    /// Create a simple query against the given engines
    pub fn simple(query: impl Into<String>, engines: &[&str]) -> Self {
        Self {
            query: query.into(),
            engines: engines.iter().map(|e| e.to_string()).collect(),
            pageno: 1,
            lang: "en".to_string(),
        }
    }

    /// Parameters handed to each engine
    pub fn request_params(&self) -> RequestParams {
        RequestParams::new(self.query.clone())
            .with_page(self.pageno)
            .with_lang(self.lang.clone())
    }
}

/// Canonical form of an engine identifier, `None` when it is blank
pub fn normalize_engine(name: &str) -> Option<String> {
    let name = name.trim().to_lowercase();
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

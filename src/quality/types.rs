//! Wire records exchanged with the quality service

use crate::results::{null_as_default, SearchResult};
use serde::{Deserialize, Serialize};

/// Body of the outbound `POST`
#[derive(Debug, Serialize)]
pub struct ProcessingRequest<'a> {
    pub query: &'a str,
    pub results: &'a [SearchResult],
}

/// Body returned by the quality service on success
///
/// A missing or null list decodes as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessingResponse {
    /// Refined results, in the order the response must present them
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<SearchResult>,
    /// Query completions
    #[serde(default, deserialize_with = "null_as_default")]
    pub suggestions: Vec<String>,
}

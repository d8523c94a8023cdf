//! Local placeholder index
//!
//! Answers every query with three synthetic results under `<engine>.local`.
//! It stands in for live scraping or API adapters and never fails.

use super::traits::*;
use crate::results::SearchResult;
use async_trait::async_trait;
use url::form_urlencoded;

/// Synthetic engine named after the identifier it serves
pub struct LocalIndex {
    name: String,
}

impl LocalIndex {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Build the fixed result page for a query
    pub fn results(&self, params: &RequestParams) -> Vec<SearchResult> {
        let engine = self.name.as_str();
        let display = title_case(engine);
        let title_prefix = format!("{} index", display);
        let domain = format!("{}.local", engine);
        let query = params.query.as_str();
        let escaped: String = form_urlencoded::byte_serialize(query.as_bytes()).collect();
        let page = params.pageno;
        let lang = params.lang.as_str();

        vec![
            SearchResult::new(
                format!("{} • overview for {}", title_prefix, query),
                format!(
                    "https://{}/search?q={}&page={}&lang={}",
                    domain, escaped, page, lang
                ),
                format!(
                    "Local {} results covering {} with language {}.",
                    display,
                    query,
                    lang.to_uppercase()
                ),
                engine,
            ),
            SearchResult::new(
                format!("{} • deep dive", title_prefix),
                format!("https://{}/article/{}?lang={}", domain, escaped, lang),
                format!(
                    "Detailed analysis about {} surfaced by the {} engine.",
                    query, display
                ),
                engine,
            ),
            SearchResult::new(
                format!("{} • latest updates", title_prefix),
                format!("https://{}/updates/{}?page={}", domain, escaped, page),
                format!("Latest local updates and references for {}.", query),
                engine,
            ),
        ]
    }
}

#[async_trait]
impl Engine for LocalIndex {
    fn name(&self) -> &str {
        &self.name
    }

    async fn search(&self, params: &RequestParams) -> anyhow::Result<Vec<SearchResult>> {
        Ok(self.results(params))
    }
}

/// Upper-case the first character, leave the rest untouched
fn title_case(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

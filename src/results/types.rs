//! Result type definitions

use serde::{Deserialize, Deserializer, Serialize};

/// A single search result
///
/// The same shape travels from the engines to the quality service and back
/// out to the caller. Missing or null fields decode as their empty value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// The title of the result
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// The URL of the result
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    /// Content snippet/description
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Engine that returned this result
    #[serde(default, deserialize_with = "null_as_default")]
    pub engine: String,
    /// Relevance score; engines leave this at zero and the quality service assigns it
    #[serde(default, deserialize_with = "null_as_default")]
    pub score: f64,
}

/// Decode `null` as the type's default. Pair with `#[serde(default)]` so an
/// absent field behaves the same way.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl SearchResult {
    /// Create a new unscored result
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        description: impl Into<String>,
        engine: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            description: description.into(),
            engine: engine.into(),
            score: 0.0,
        }
    }
}

/// Engine error types
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EngineError {
    /// No adapter is registered under the name
    NotFound,
    /// The engine did not answer within its timeout
    Timeout,
    /// The adapter returned an error
    Failed(String),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(f, "Unknown engine"),
            Self::Timeout => write!(f, "Request timed out"),
            Self::Failed(reason) => write!(f, "Engine failed: {}", reason),
        }
    }
}

/// An unresponsive engine record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UnresponsiveEngine {
    pub name: String,
    pub error: EngineError,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_score_defaults_to_zero() {
        let result: SearchResult = serde_json::from_str(
            r#"{"title":"t","url":"https://a.local","description":"d","engine":"alpha"}"#,
        )
        .unwrap();
        assert_eq!(result.score, 0.0);
        assert_eq!(result, SearchResult::new("t", "https://a.local", "d", "alpha"));
    }

    #[test]
    fn test_missing_and_null_fields_decode_empty() {
        let result: SearchResult =
            serde_json::from_str(r#"{"url":"https://a.local","title":null,"score":null}"#).unwrap();
        assert_eq!(result, SearchResult::new("", "https://a.local", "", ""));

        assert!(serde_json::from_str::<SearchResult>(r#"{"title":7}"#).is_err());
    }

    #[test]
    fn test_wire_field_names() {
        let value = serde_json::to_value(SearchResult::new("t", "u", "d", "e")).unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        for key in ["title", "url", "description", "engine", "score"] {
            assert!(keys.contains(&key.to_string()), "missing {}", key);
        }
        assert_eq!(keys.len(), 5);
    }

    #[test]
    fn test_engine_error_serialization() {
        let unresponsive = UnresponsiveEngine {
            name: "alpha".to_string(),
            error: EngineError::Failed("boom".to_string()),
        };
        let json = serde_json::to_value(&unresponsive).unwrap();
        assert_eq!(json["error"]["failed"], "boom");
        assert_eq!(
            serde_json::to_value(EngineError::Timeout).unwrap(),
            serde_json::json!("timeout")
        );
        assert_eq!(EngineError::NotFound.to_string(), "Unknown engine");
    }
}

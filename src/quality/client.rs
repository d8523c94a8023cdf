//! HTTP client for the quality-processing service

use super::types::{ProcessingRequest, ProcessingResponse};
use crate::config::QualitySettings;
use crate::results::SearchResult;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, warn};

/// Failures talking to the quality service
///
/// None of these are retried; the handler reports all of them as a bad gateway.
#[derive(Debug, thiserror::Error)]
pub enum QualityError {
    #[error("no response within {0:?}")]
    Timeout(Duration),

    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("invalid response body: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Client for the refinement round-trip
#[derive(Clone)]
pub struct QualityClient {
    client: Client,
    url: String,
    timeout: Duration,
}

impl QualityClient {
    /// Create a client with the configured endpoint and timeout
    pub fn new(settings: &QualitySettings) -> anyhow::Result<Self> {
        let timeout = settings.timeout();
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(format!("metasearch-gateway/{}", crate::VERSION))
            .build()?;

        Ok(Self {
            client,
            url: settings.url.clone(),
            timeout,
        })
    }

    /// Send the raw results for refinement.
    ///
    /// All-or-nothing: on any error no results are returned. Dropping the
    /// future aborts the in-flight request.
    pub async fn refine(
        &self,
        query: &str,
        results: &[SearchResult],
    ) -> Result<ProcessingResponse, QualityError> {
        let payload = ProcessingRequest { query, results };

        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if status != StatusCode::OK {
            let text = response.text().await.unwrap_or_default();
            let message = match text.trim() {
                "" => status.to_string(),
                body => body.to_string(),
            };
            warn!(status = status.as_u16(), "Quality service returned an error");
            return Err(QualityError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(e))?;
        let refined: ProcessingResponse =
            serde_json::from_slice(&body).map_err(QualityError::Decode)?;

        debug!(
            "Quality service returned {} results and {} suggestions",
            refined.results.len(),
            refined.suggestions.len()
        );

        Ok(refined)
    }

    fn transport_error(&self, e: reqwest::Error) -> QualityError {
        if e.is_timeout() {
            QualityError::Timeout(self.timeout)
        } else {
            QualityError::Transport(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, timeout: f64) -> QualityClient {
        QualityClient::new(&QualitySettings {
            url: format!("{}/process", server.uri()),
            timeout,
        })
        .unwrap()
    }

    fn raw() -> Vec<SearchResult> {
        vec![
            SearchResult::new("A", "https://a.local/1", "first", "alpha"),
            SearchResult::new("B", "https://b.local/1", "second", "beta"),
        ]
    }

    #[tokio::test]
    async fn test_refine_success() {
        let server = MockServer::start().await;
        let mut refined = raw();
        refined.reverse();
        refined[0].score = 7.5;

        Mock::given(method("POST"))
            .and(path("/process"))
            .and(body_json(serde_json::json!({
                "query": "rust",
                "results": raw(),
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": refined,
                "suggestions": ["rust tutorial", "rust book"],
            })))
            .expect(1)
            .mount(&server)
            .await;

        let response = client_for(&server, 6.0).refine("rust", &raw()).await.unwrap();

        assert_eq!(response.results, refined);
        assert_eq!(response.suggestions, vec!["rust tutorial", "rust book"]);
    }

    #[tokio::test]
    async fn test_status_with_empty_body_uses_status_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = client_for(&server, 6.0).refine("rust", &raw()).await.unwrap_err();

        match err {
            QualityError::Status { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "503 Service Unavailable");
            }
            other => panic!("expected Status error, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_status_with_body_keeps_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(400).set_body_string("{\"error\": \"query is required\"}\n"),
            )
            .mount(&server)
            .await;

        let err = client_for(&server, 6.0).refine("", &[]).await.unwrap_err();

        assert_eq!(
            err.to_string(),
            "status 400: {\"error\": \"query is required\"}"
        );
    }

    #[tokio::test]
    async fn test_undecodable_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server, 6.0).refine("rust", &raw()).await.unwrap_err();
        assert!(matches!(err, QualityError::Decode(_)));
    }

    #[tokio::test]
    async fn test_non_ok_success_status_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "results": [],
                "suggestions": ["x"],
            })))
            .mount(&server)
            .await;

        let err = client_for(&server, 6.0).refine("rust", &raw()).await.unwrap_err();

        match err {
            QualityError::Status { status, .. } => assert_eq!(status, 201),
            other => panic!("expected Status error, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_result_fields_decode_empty() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [{"title": "T", "url": "https://a.local/", "engine": "alpha", "score": 3.0}],
                "suggestions": null,
            })))
            .mount(&server)
            .await;

        let response = client_for(&server, 6.0).refine("rust", &raw()).await.unwrap();

        assert_eq!(response.results.len(), 1);
        assert_eq!(response.results[0].title, "T");
        assert_eq!(response.results[0].description, "");
        assert_eq!(response.results[0].score, 3.0);
        assert!(response.suggestions.is_empty());
    }

    #[tokio::test]
    async fn test_missing_results_decode_empty() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"suggestions": ["a"]})),
            )
            .mount(&server)
            .await;

        let response = client_for(&server, 6.0).refine("rust", &raw()).await.unwrap();
        assert!(response.results.is_empty());
        assert_eq!(response.suggestions, vec!["a"]);
    }

    #[tokio::test]
    async fn test_wrong_shape_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"results": "none"})),
            )
            .mount(&server)
            .await;

        let err = client_for(&server, 6.0).refine("rust", &raw()).await.unwrap_err();
        assert!(matches!(err, QualityError::Decode(_)));
    }

    #[tokio::test]
    async fn test_timeout_is_bounded() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"results": [], "suggestions": []}))
                    .set_delay(Duration::from_secs(10)),
            )
            .mount(&server)
            .await;

        let start = Instant::now();
        let err = client_for(&server, 0.2).refine("rust", &raw()).await.unwrap_err();

        assert!(matches!(err, QualityError::Timeout(_)));
        assert!(start.elapsed() < Duration::from_secs(3));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let client = QualityClient::new(&QualitySettings {
            url: "http://127.0.0.1:9/process".to_string(),
            timeout: 2.0,
        })
        .unwrap();

        let err = client.refine("rust", &raw()).await.unwrap_err();
        assert!(matches!(err, QualityError::Transport(_) | QualityError::Timeout(_)));
    }
}

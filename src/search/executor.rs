//! Fan-out dispatch across engines

use super::models::{normalize_engine, SearchQuery};
use crate::config::SearchSettings;
use crate::engines::{Engine, EngineRegistry, RequestParams};
use crate::results::{EngineError, SearchResult, UnresponsiveEngine};
use futures::future::join_all;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Outcome of a single engine unit
#[derive(Debug)]
pub enum EngineOutcome {
    Success {
        results: Vec<SearchResult>,
    },
    Failure {
        engine: String,
        error: EngineError,
    },
}

/// Aggregated output of one fan-out
///
/// `results` holds every successful engine's output, in no meaningful order.
#[derive(Debug, Default)]
pub struct Dispatch {
    pub results: Vec<SearchResult>,
    pub unresponsive: Vec<UnresponsiveEngine>,
}

impl Dispatch {
    fn record(&mut self, outcome: EngineOutcome) {
        match outcome {
            EngineOutcome::Success { results } => self.results.extend(results),
            EngineOutcome::Failure { engine, error } => {
                self.unresponsive.push(UnresponsiveEngine {
                    name: engine,
                    error,
                });
            }
        }
    }
}

/// Dispatcher that queries every requested engine and joins the results
pub struct Dispatcher {
    /// Engine registry
    registry: Arc<EngineRegistry>,
    /// Default per-engine timeout
    default_timeout: Duration,
    /// Concurrent engine units allowed per dispatch
    max_concurrency: usize,
}

impl Dispatcher {
    /// Create a new dispatcher
    pub fn new(registry: Arc<EngineRegistry>, settings: &SearchSettings) -> Self {
        Self {
            registry,
            default_timeout: Duration::from_secs_f64(settings.engine_timeout),
            max_concurrency: settings.max_concurrency.max(1),
        }
    }

    /// Set default timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    /// Set the worker pool size
    pub fn with_max_concurrency(mut self, max: usize) -> Self {
        self.max_concurrency = max.max(1);
        self
    }

    /// Query every engine named by `query` and wait for all of them.
    ///
    /// Blank identifiers are skipped. Duplicates each get their own unit.
    /// Dropping the returned future cancels every unit still in flight.
    pub async fn dispatch(&self, query: &SearchQuery) -> Dispatch {
        let names: Vec<String> = query
            .engines
            .iter()
            .filter_map(|name| normalize_engine(name))
            .collect();

        info!(
            "Dispatching '{}' to {} engines",
            query.query,
            names.len()
        );

        let params = query.request_params();
        let limiter = Semaphore::new(self.max_concurrency);

        let units: Vec<_> = names
            .into_iter()
            .map(|name| self.search_engine(name, &params, &limiter))
            .collect();

        let mut dispatch = Dispatch::default();
        for outcome in join_all(units).await {
            dispatch.record(outcome);
        }

        debug!(
            "Collected {} raw results, {} engines unresponsive",
            dispatch.results.len(),
            dispatch.unresponsive.len()
        );

        dispatch
    }

    /// Search a single engine
    async fn search_engine(
        &self,
        name: String,
        params: &RequestParams,
        limiter: &Semaphore,
    ) -> EngineOutcome {
        let engine = match self.registry.resolve(&name) {
            Some(engine) => engine,
            None => {
                warn!("Unknown engine {}", name);
                return EngineOutcome::Failure {
                    engine: name,
                    error: EngineError::NotFound,
                };
            }
        };

        // never closed, so acquire only fails if the semaphore is dropped
        let _permit = limiter.acquire().await.ok();

        let engine_timeout = Duration::from_secs_f64(
            self.registry
                .get_timeout(engine.as_ref(), self.default_timeout.as_secs_f64()),
        );

        debug!(
            "Searching engine {} with timeout {:?}",
            name, engine_timeout
        );

        let start = Instant::now();
        let result = timeout(engine_timeout, engine.search(params)).await;
        let elapsed = start.elapsed();

        match result {
            Ok(Ok(results)) => {
                debug!(
                    "Engine {} returned {} results in {:?}",
                    name,
                    results.len(),
                    elapsed
                );
                EngineOutcome::Success { results }
            }
            Ok(Err(e)) => {
                warn!("Engine {} failed: {}", name, e);
                EngineOutcome::Failure {
                    engine: name,
                    error: EngineError::Failed(e.to_string()),
                }
            }
            Err(_) => {
                warn!("Timeout for engine {}", name);
                EngineOutcome::Failure {
                    engine: name,
                    error: EngineError::Timeout,
                }
            }
        }
    }
}

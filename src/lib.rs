//! Metasearch gateway: fans a query out to several search engines, hands the
//! combined raw results to an external quality-processing service, and
//! returns its refined results and suggestions.
//!
//! Every search is independent; no state survives between requests.

pub mod config;
pub mod engines;
pub mod quality;
pub mod results;
pub mod search;
pub mod web;

pub use config::Settings;
pub use engines::Engine;
pub use quality::{QualityClient, QualityError};
pub use results::SearchResult;
pub use search::{Dispatcher, SearchQuery, SearchRequest};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default timeout for engine requests in seconds
pub const DEFAULT_TIMEOUT: u64 = 5;

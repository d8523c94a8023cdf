//! Quality-processing service integration
//!
//! The service re-ranks, deduplicates and scores the raw aggregated results
//! and proposes query suggestions. Its algorithm is opaque to this crate; only
//! the request/response contract lives here.

mod client;
mod types;

pub use client::{QualityClient, QualityError};
pub use types::*;

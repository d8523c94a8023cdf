//! Search orchestration module
//!
//! Normalizes inbound requests and fans them out across engines.

mod executor;
mod models;

pub use executor::{Dispatch, Dispatcher, EngineOutcome};
pub use models::*;

//! Search engine module
//!
//! Defines the Engine trait and provides a registry for all search engines.

mod loader;
mod local;
mod registry;
mod traits;

pub use loader::EngineLoader;
pub use local::LocalIndex;
pub use registry::{EngineFactory, EngineRegistry};
pub use traits::*;

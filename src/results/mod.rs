//! Result types shared by the engines, the dispatcher and the quality client

mod types;

pub use types::*;

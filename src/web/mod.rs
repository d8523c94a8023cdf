//! Web server module
//!
//! Provides the search API and serves the bundled UI.

mod error;
mod handlers;
mod routes;
mod state;

pub use error::ApiError;
pub use handlers::SearchResponse;
pub use routes::create_router;
pub use state::AppState;

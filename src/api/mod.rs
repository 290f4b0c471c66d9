//! HTTP API layer: routes, handlers, and error mapping.

pub mod error;
pub mod handlers;
pub mod routes;

pub use error::ApiError;
pub use routes::{build_router, AppState};

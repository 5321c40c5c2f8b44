//! HTTP surface: shared state and the axum router.

pub mod router;
mod routes;

pub use router::{AppdockState, appdock_router};

//! HTTP service for the string analyzer.
//!
//! Provides:
//! - `StringService`: create, look up, delete and filter analyzed strings
//! - `api::router`: the axum routes over a shared service
//! - `run_server` / `run_server_with_shutdown`: bind and serve

pub mod api;
pub mod error;
pub mod server;
pub mod service;

pub use api::{router, ApiError, AppState};
pub use error::ServiceError;
pub use server::{run_server, run_server_with_shutdown, serve};
pub use service::{ListResult, NaturalLanguageResult, StringService};

//! # Axum Helpers
//!
//! Shared utilities for the store backend's Axum services.
//!
//! - **[`errors`]**: structured error responses with stable error codes
//! - **[`extractors`]**: `ValidatedJson` (validator-crate backed request validation)
//! - **[`session`]**: session-cookie and bearer-token plumbing
//! - **[`server`]**: router assembly, health endpoint, graceful shutdown

pub mod errors;
pub mod extractors;
pub mod server;
pub mod session;

pub use errors::ErrorResponse;
pub use extractors::ValidatedJson;
pub use server::{create_app, create_router, health_router, shutdown_signal};
pub use session::{
    clear_session_cookie, extract_session_token, session_cookie, SESSION_COOKIE,
};

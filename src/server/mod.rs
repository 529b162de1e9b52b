//! Axum-based HTTP server implementation for the semey-api dashboard.
//!
//! This module sets up the HTTP server, wires routes to the shared store,
//! and wraps everything in the cross-cutting layers the dashboard expects.
//!
//! # Components
//!
//! - `handlers`: One function per endpoint; validate, touch the store, reply.
//! - `extract`: Body, query and path extractors with envelope rejections.
//! - `middleware`: Request ids, security headers, CORS, access log, metrics, panic fallback.
//! - `rate_limit`: Fixed-window per-client throttling for `/api/`.
//! - `routes`: `AppState` and the router that ties everything together.
//!
//! Author: kelexine (<https://github.com/kelexine>)

mod extract;
mod handlers;
mod middleware;
mod rate_limit;
mod routes;

pub use middleware::SECURITY_HEADERS;
pub use rate_limit::{RateLimitStatus, RateLimiter};
pub use routes::{create_router, AppState};

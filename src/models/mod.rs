//! Wire types for the semey-api HTTP surface.
//!
//! - `envelope`: the `{success, data|error}` wrapper returned by `/api` routes.
//! - `requests`: request bodies and query strings, each with an explicit
//!   validation step into the store's typed inputs.
//! - `health`: the unwrapped `/health` payload.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod envelope;
pub mod health;
pub mod requests;

pub use envelope::ApiResponse;
pub use health::{HealthResponse, HealthStatus};
pub use requests::{
    parse_id, AddPointsRequest, CreateProjectRequest, NumericInput, ProjectQuery, SensorQuery,
    SubmitReadingRequest,
};

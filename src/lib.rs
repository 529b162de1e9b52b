// semey-api - In-memory smart-city dashboard API for the My Semey platform
// Author: kelexine (https://github.com/kelexine)

pub mod analytics;
pub mod cli;
pub mod config;
pub mod error;
pub mod integrations;
pub mod metrics;
pub mod models;
pub mod server;
pub mod store;
pub mod utils;

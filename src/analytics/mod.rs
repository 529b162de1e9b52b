//! Dashboard aggregation and mock forecasting.
//!
//! Nothing here is a real model: the dashboard is a straight reduction over
//! the current dataset, and predictions are a fixed payload served for the
//! demo UI.
//!
//! Author: kelexine (<https://github.com/kelexine>)

mod dashboard;
mod predictions;

pub use dashboard::{summarize, DashboardSummary};
pub use predictions::{predictions, Predictions};

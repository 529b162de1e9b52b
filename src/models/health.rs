// Health check payload
// Author: kelexine (https://github.com/kelexine)

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub timestamp: String,
    /// Seconds since the server started.
    pub uptime: f64,
    pub environment: String,
}

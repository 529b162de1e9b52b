//! Domain entities held by the in-memory store.

// Author: kelexine (https://github.com/kelexine)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A smart-city investment project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Sequential id, assigned as `count + 1` on creation.
    pub id: u64,
    pub name: String,
    /// Categorical tag such as `water`, `transport` or `ecology`.
    pub sector: String,
    pub budget: f64,
    pub status: String,
    /// Return on investment, in percent.
    pub roi: f64,
    /// Illustrative 0-100 rating.
    pub esg_score: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A single IoT sensor measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub sensor_id: String,
    #[serde(rename = "type")]
    pub sensor_type: String,
    pub value: f64,
    pub unit: String,
    pub timestamp: DateTime<Utc>,
}

/// Loyalty balance for one citizen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoyaltyAccount {
    pub user_id: u64,
    /// Only ever grows through the API.
    pub points: u64,
    /// Append-only, in insertion order.
    pub activities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub role: String,
}

/// Validated input for project creation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProject {
    pub name: String,
    pub sector: String,
    pub budget: f64,
    pub status: String,
    pub roi: f64,
    pub esg_score: i64,
}

/// Validated input for a sensor submission.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReading {
    pub sensor_id: String,
    pub sensor_type: String,
    pub value: f64,
    pub unit: String,
}

/// Validated loyalty points addition.
#[derive(Debug, Clone, PartialEq)]
pub struct PointsAward {
    pub user_id: u64,
    pub points: u64,
    pub activity: String,
}

/// Exact-match project filter; `None` matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectFilter {
    pub sector: Option<String>,
    pub status: Option<String>,
}

impl ProjectFilter {
    pub fn matches(&self, project: &Project) -> bool {
        self.sector.as_deref().map_or(true, |s| project.sector == s)
            && self.status.as_deref().map_or(true, |s| project.status == s)
    }
}

/// Every collection the API serves.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub users: Vec<User>,
    pub projects: Vec<Project>,
    pub readings: Vec<SensorReading>,
    pub loyalty: Vec<LoyaltyAccount>,
}

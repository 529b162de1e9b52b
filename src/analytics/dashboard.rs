// Dashboard aggregates over the live dataset
// Author: kelexine (https://github.com/kelexine)

use crate::store::Dataset;
use crate::utils::round_to;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_projects: usize,
    pub active_projects: usize,
    pub total_budget: f64,
    /// Mean ROI, two decimals.
    pub avg_roi: f64,
    /// Mean ESG score, one decimal.
    pub avg_esg: f64,
    pub total_users: usize,
    pub iot_sensors_active: usize,
    pub last_update: String,
}

pub fn summarize(data: &Dataset, now: DateTime<Utc>) -> DashboardSummary {
    let projects = &data.projects;
    let count = projects.len();

    // An empty project list averages to zero rather than NaN.
    let mean = |total: f64| if count == 0 { 0.0 } else { total / count as f64 };

    DashboardSummary {
        total_projects: count,
        active_projects: projects.iter().filter(|p| p.status == "active").count(),
        total_budget: projects.iter().map(|p| p.budget).sum(),
        avg_roi: round_to(mean(projects.iter().map(|p| p.roi).sum()), 2),
        avg_esg: round_to(mean(projects.iter().map(|p| p.esg_score as f64).sum()), 1),
        total_users: data.users.len(),
        iot_sensors_active: data.readings.len(),
        last_update: now.to_rfc3339_opts(SecondsFormat::Millis, true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed::demo_dataset;

    #[test]
    fn test_summary_over_seed_data() {
        let now = Utc::now();
        let summary = summarize(&demo_dataset(now), now);

        assert_eq!(summary.total_projects, 3);
        assert_eq!(summary.active_projects, 2);
        assert_eq!(summary.total_budget, 200_000_000.0);
        // (15.5 + 22.3 + 12.1) / 3 = 16.633..
        assert_eq!(summary.avg_roi, 16.63);
        // (85 + 78 + 95) / 3 = 86.0
        assert_eq!(summary.avg_esg, 86.0);
        assert_eq!(summary.total_users, 2);
        assert_eq!(summary.iot_sensors_active, 3);
    }

    #[test]
    fn test_summary_of_empty_dataset() {
        let summary = summarize(&Dataset::default(), Utc::now());
        assert_eq!(summary.total_projects, 0);
        assert_eq!(summary.avg_roi, 0.0);
        assert_eq!(summary.avg_esg, 0.0);
    }
}

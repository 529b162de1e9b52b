// Store - owns the dataset and serializes writers
// Author: kelexine (https://github.com/kelexine)

use super::models::{
    Dataset, LoyaltyAccount, NewProject, NewReading, PointsAward, Project, ProjectFilter,
    SensorReading, User,
};
use super::seed::demo_dataset;
use crate::analytics::{self, DashboardSummary};
use crate::metrics;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::debug;

/// Process-wide in-memory store, shared through `AppState`.
///
/// Every method takes the lock exactly once, so id assignment and the
/// matching push happen atomically with respect to other writers.
#[derive(Debug, Default)]
pub struct Store {
    data: RwLock<Dataset>,
}

impl Store {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            data: RwLock::new(dataset),
        }
    }

    /// Store preloaded with the demo dataset.
    pub fn seeded() -> Self {
        Self::new(demo_dataset(Utc::now()))
    }

    pub fn projects(&self, filter: &ProjectFilter) -> Vec<Project> {
        self.data
            .read()
            .projects
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect()
    }

    pub fn project(&self, id: u64) -> Option<Project> {
        self.data.read().projects.iter().find(|p| p.id == id).cloned()
    }

    pub fn create_project(&self, new: NewProject) -> Project {
        let mut data = self.data.write();
        let project = Project {
            id: data.projects.len() as u64 + 1,
            name: new.name,
            sector: new.sector,
            budget: new.budget,
            status: new.status,
            roi: new.roi,
            esg_score: new.esg_score,
            created_at: Some(Utc::now()),
        };
        data.projects.push(project.clone());
        drop(data);

        debug!("Created project {} ({})", project.id, project.name);
        metrics::record_project_created();
        project
    }

    /// Stored readings, optionally restricted to one sensor type.
    pub fn readings(&self, sensor_type: Option<&str>) -> Vec<SensorReading> {
        self.data
            .read()
            .readings
            .iter()
            .filter(|r| sensor_type.map_or(true, |t| r.sensor_type == t))
            .cloned()
            .collect()
    }

    pub fn record_reading(&self, new: NewReading) -> SensorReading {
        let reading = SensorReading {
            sensor_id: new.sensor_id,
            sensor_type: new.sensor_type,
            value: new.value,
            unit: new.unit,
            timestamp: Utc::now(),
        };
        self.data.write().readings.push(reading.clone());

        debug!("Recorded {} reading from {}", reading.sensor_type, reading.sensor_id);
        metrics::record_sensor_reading();
        reading
    }

    pub fn loyalty(&self, user_id: u64) -> Option<LoyaltyAccount> {
        self.data
            .read()
            .loyalty
            .iter()
            .find(|l| l.user_id == user_id)
            .cloned()
    }

    /// Adds points to an account, opening it first if the user has none.
    pub fn add_points(&self, award: PointsAward) -> LoyaltyAccount {
        let mut data = self.data.write();
        let index = match data.loyalty.iter().position(|l| l.user_id == award.user_id) {
            Some(index) => index,
            None => {
                debug!("Opening loyalty account for user {}", award.user_id);
                data.loyalty.push(LoyaltyAccount {
                    user_id: award.user_id,
                    points: 0,
                    activities: Vec::new(),
                });
                data.loyalty.len() - 1
            }
        };

        let account = &mut data.loyalty[index];
        account.points = account.points.saturating_add(award.points);
        account.activities.push(award.activity);
        let account = account.clone();
        drop(data);

        metrics::record_points_awarded(award.points);
        account
    }

    pub fn users(&self) -> Vec<User> {
        self.data.read().users.clone()
    }

    /// Aggregates over the current dataset.
    pub fn dashboard(&self, now: DateTime<Utc>) -> DashboardSummary {
        analytics::summarize(&self.data.read(), now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_project(name: &str, sector: &str) -> NewProject {
        NewProject {
            name: name.to_string(),
            sector: sector.to_string(),
            budget: 1_000.0,
            status: "planning".to_string(),
            roi: 0.0,
            esg_score: 0,
        }
    }

    fn award(user_id: u64, points: u64, activity: &str) -> PointsAward {
        PointsAward {
            user_id,
            points,
            activity: activity.to_string(),
        }
    }

    #[test]
    fn test_create_project_assigns_next_id() {
        let store = Store::seeded();
        let before = store.projects(&ProjectFilter::default()).len() as u64;

        let project = store.create_project(new_project("Bike Lanes", "transport"));

        assert_eq!(project.id, before + 1);
        assert!(project.created_at.is_some());
        assert_eq!(store.project(project.id), Some(project));
    }

    #[test]
    fn test_empty_store_starts_at_one() {
        let store = Store::default();
        assert_eq!(store.create_project(new_project("First", "water")).id, 1);
        assert_eq!(store.create_project(new_project("Second", "water")).id, 2);
    }

    #[test]
    fn test_project_filters_combine() {
        let store = Store::seeded();
        let filter = ProjectFilter {
            sector: Some("water".to_string()),
            status: Some("active".to_string()),
        };
        let projects = store.projects(&filter);
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].name, "Aqua-Monitor Abay");

        let none = ProjectFilter {
            sector: Some("water".to_string()),
            status: Some("planning".to_string()),
        };
        assert!(store.projects(&none).is_empty());
    }

    #[test]
    fn test_readings_filter_by_type() {
        let store = Store::seeded();
        let water = store.readings(Some("water"));
        assert_eq!(water.len(), 1);
        assert_eq!(water[0].sensor_id, "WTR-001");
        assert_eq!(store.readings(None).len(), 3);
        assert!(store.readings(Some("noise")).is_empty());
    }

    #[test]
    fn test_add_points_opens_account() {
        let store = Store::seeded();
        assert!(store.loyalty(3).is_none());

        let account = store.add_points(award(3, 50, "test"));

        assert_eq!(account.points, 50);
        assert_eq!(account.activities, vec!["test".to_string()]);
        assert_eq!(store.loyalty(3), Some(account));
    }

    #[test]
    fn test_add_points_preserves_activity_order() {
        let store = Store::seeded();
        store.add_points(award(1, 10, "cycling"));
        let account = store.add_points(award(1, 5, "tree_planting"));

        assert_eq!(account.points, 1265);
        assert_eq!(
            account.activities,
            vec!["volunteer", "recycling", "cycling", "tree_planting"]
        );
    }

    #[test]
    fn test_add_points_saturates() {
        let store = Store::default();
        store.add_points(award(9, u64::MAX, "jackpot"));
        assert_eq!(store.add_points(award(9, 1, "more")).points, u64::MAX);
    }
}

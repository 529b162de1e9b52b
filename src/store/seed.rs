// Demo dataset loaded at startup
// Author: kelexine (https://github.com/kelexine)

use super::models::{Dataset, LoyaltyAccount, Project, SensorReading, User};
use chrono::{DateTime, Utc};

fn user(id: u64, name: &str, email: &str, role: &str) -> User {
    User {
        id,
        name: name.to_string(),
        email: email.to_string(),
        role: role.to_string(),
    }
}

fn project(id: u64, name: &str, sector: &str, budget: f64, status: &str, roi: f64, esg: i64) -> Project {
    Project {
        id,
        name: name.to_string(),
        sector: sector.to_string(),
        budget,
        status: status.to_string(),
        roi,
        esg_score: esg,
        created_at: None,
    }
}

fn reading(sensor_id: &str, sensor_type: &str, value: f64, unit: &str, at: DateTime<Utc>) -> SensorReading {
    SensorReading {
        sensor_id: sensor_id.to_string(),
        sensor_type: sensor_type.to_string(),
        value,
        unit: unit.to_string(),
        timestamp: at,
    }
}

fn account(user_id: u64, points: u64, activities: &[&str]) -> LoyaltyAccount {
    LoyaltyAccount {
        user_id,
        points,
        activities: activities.iter().map(|a| a.to_string()).collect(),
    }
}

/// The Semey demo data. Seed readings are stamped with `now`.
pub fn demo_dataset(now: DateTime<Utc>) -> Dataset {
    Dataset {
        users: vec![
            user(1, "Admin User", "admin@semey.kz", "admin"),
            user(2, "Investor User", "investor@semey.kz", "investor"),
        ],
        projects: vec![
            project(1, "Aqua-Monitor Abay", "water", 50_000_000.0, "active", 15.5, 85),
            project(2, "Smart Road Semey", "transport", 120_000_000.0, "planning", 22.3, 78),
            project(3, "Green.City.Semei", "ecology", 30_000_000.0, "active", 12.1, 95),
        ],
        readings: vec![
            reading("WTR-001", "water", 245.5, "m3/h", now),
            reading("TMP-001", "temperature", 68.2, "°C", now),
            reading("TRF-001", "traffic", 342.0, "vehicles/h", now),
        ],
        loyalty: vec![
            account(1, 1250, &["volunteer", "recycling"]),
            account(2, 890, &["public_transport"]),
        ],
    }
}

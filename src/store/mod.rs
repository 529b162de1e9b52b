// In-memory data store
// Author: kelexine (https://github.com/kelexine)

pub mod manager;
pub mod models;
pub mod seed;

pub use manager::Store;
pub use models::{
    Dataset, LoyaltyAccount, NewProject, NewReading, PointsAward, Project, ProjectFilter,
    SensorReading, User,
};

// Static forecast payload for the analytics screen
// Author: kelexine (https://github.com/kelexine)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterConsumption {
    pub current: f64,
    pub predicted_next_month: f64,
    pub trend: String,
    pub savings_potential: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficFlow {
    pub current: u32,
    pub predicted_peak_hour: u32,
    pub optimization_recommendation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRoiForecast {
    pub avg_current: f64,
    pub predicted_3_years: f64,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Predictions {
    pub water_consumption: WaterConsumption,
    pub traffic_flow: TrafficFlow,
    pub project_roi: ProjectRoiForecast,
}

pub fn predictions() -> Predictions {
    Predictions {
        water_consumption: WaterConsumption {
            current: 245.5,
            predicted_next_month: 238.2,
            trend: "decreasing".to_string(),
            savings_potential: "3.0%".to_string(),
        },
        traffic_flow: TrafficFlow {
            current: 342,
            predicted_peak_hour: 485,
            optimization_recommendation: "Add traffic light at intersection A".to_string(),
        },
        project_roi: ProjectRoiForecast {
            avg_current: 16.6,
            predicted_3_years: 19.2,
            confidence: 0.85,
        },
    }
}

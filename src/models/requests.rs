// Request bodies and query strings for the /api/v1 endpoints
// Author: kelexine (https://github.com/kelexine)
//
// Bodies arrive loosely typed (JSON numbers, numeric strings, or form
// fields), so every struct here is all-optional and exposes a `validate`
// step that produces the store's typed input or a ValidationError.

use crate::error::{ApiError, Result};
use crate::store::{NewProject, NewReading, PointsAward, ProjectFilter};
use serde::Deserialize;

const DEFAULT_STATUS: &str = "planning";
const DEFAULT_UNIT: &str = "unit";
const MAX_ESG_SCORE: i64 = 100;

/// A numeric field that may be sent as a JSON number or as a string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(f64),
    Text(String),
}

impl NumericInput {
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            NumericInput::Number(n) => Some(*n),
            NumericInput::Text(s) => s.trim().parse::<f64>().ok(),
        };
        value.filter(|n| n.is_finite())
    }

    /// Integer view; fractional values are truncated toward zero.
    pub fn as_i64(&self) -> Option<i64> {
        self.as_f64().map(|n| n.trunc() as i64)
    }

    /// Zero and the empty string count as "not provided".
    fn is_falsy(&self) -> bool {
        match self {
            NumericInput::Number(n) => *n == 0.0,
            NumericInput::Text(s) => s.trim().is_empty(),
        }
    }
}

impl From<f64> for NumericInput {
    fn from(value: f64) -> Self {
        NumericInput::Number(value)
    }
}

impl From<&str> for NumericInput {
    fn from(value: &str) -> Self {
        NumericInput::Text(value.to_string())
    }
}

/// Collects the names of required fields that were absent.
#[derive(Default)]
struct MissingFields(Vec<&'static str>);

impl MissingFields {
    fn text(&mut self, field: &'static str, value: Option<String>) -> Option<String> {
        let value = value.filter(|v| !v.trim().is_empty());
        if value.is_none() {
            self.0.push(field);
        }
        value
    }

    fn number(&mut self, field: &'static str, value: Option<NumericInput>) -> Option<NumericInput> {
        let value = value.filter(|v| !v.is_falsy());
        if value.is_none() {
            self.0.push(field);
        }
        value
    }

    /// Like `number`, but zero is a legitimate value.
    fn present(&mut self, field: &'static str, value: Option<NumericInput>) -> Option<NumericInput> {
        if value.is_none() {
            self.0.push(field);
        }
        value
    }

    fn into_error(self) -> ApiError {
        ApiError::Validation(format!("Missing required fields: {}", self.0.join(", ")))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateProjectRequest {
    pub name: Option<String>,
    pub sector: Option<String>,
    pub budget: Option<NumericInput>,
    pub status: Option<String>,
    pub roi: Option<NumericInput>,
    pub esg_score: Option<NumericInput>,
}

impl CreateProjectRequest {
    pub fn validate(self) -> Result<NewProject> {
        let mut missing = MissingFields::default();
        let name = missing.text("name", self.name);
        let sector = missing.text("sector", self.sector);
        let budget = missing.number("budget", self.budget);

        let (Some(name), Some(sector), Some(budget)) = (name, sector, budget) else {
            return Err(missing.into_error());
        };

        let budget = budget
            .as_f64()
            .ok_or_else(|| ApiError::Validation("budget must be numeric".to_string()))?;

        let esg_score = self.esg_score.and_then(|v| v.as_i64()).unwrap_or(0);
        if !(0..=MAX_ESG_SCORE).contains(&esg_score) {
            return Err(ApiError::Validation(format!(
                "esg_score must be between 0 and {}",
                MAX_ESG_SCORE
            )));
        }

        Ok(NewProject {
            name,
            sector,
            budget,
            status: self
                .status
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_STATUS.to_string()),
            roi: self.roi.and_then(|v| v.as_f64()).unwrap_or(0.0),
            esg_score,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmitReadingRequest {
    pub sensor_id: Option<String>,
    #[serde(rename = "type")]
    pub sensor_type: Option<String>,
    pub value: Option<NumericInput>,
    pub unit: Option<String>,
}

impl SubmitReadingRequest {
    pub fn validate(self) -> Result<NewReading> {
        let mut missing = MissingFields::default();
        let sensor_id = missing.text("sensor_id", self.sensor_id);
        let sensor_type = missing.text("type", self.sensor_type);
        let value = missing.present("value", self.value);

        let (Some(sensor_id), Some(sensor_type), Some(value)) = (sensor_id, sensor_type, value)
        else {
            return Err(missing.into_error());
        };

        let value = value
            .as_f64()
            .ok_or_else(|| ApiError::Validation("value must be numeric".to_string()))?;

        Ok(NewReading {
            sensor_id,
            sensor_type,
            value,
            unit: self
                .unit
                .filter(|u| !u.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_UNIT.to_string()),
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddPointsRequest {
    pub user_id: Option<NumericInput>,
    pub points: Option<NumericInput>,
    pub activity: Option<String>,
}

impl AddPointsRequest {
    pub fn validate(self) -> Result<PointsAward> {
        let mut missing = MissingFields::default();
        let user_id = missing.number("user_id", self.user_id);
        let points = missing.number("points", self.points);
        let activity = missing.text("activity", self.activity);

        let (Some(user_id), Some(points), Some(activity)) = (user_id, points, activity) else {
            return Err(missing.into_error());
        };

        let user_id = positive_integer("user_id", &user_id)?;
        let points = positive_integer("points", &points)?;

        Ok(PointsAward {
            user_id,
            points,
            activity,
        })
    }
}

fn positive_integer(field: &str, value: &NumericInput) -> Result<u64> {
    value
        .as_i64()
        .filter(|n| *n > 0)
        .map(|n| n as u64)
        .ok_or_else(|| ApiError::Validation(format!("{} must be a positive integer", field)))
}

/// Query string for `GET /api/v1/projects`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectQuery {
    pub sector: Option<String>,
    pub status: Option<String>,
}

impl From<ProjectQuery> for ProjectFilter {
    fn from(query: ProjectQuery) -> Self {
        ProjectFilter {
            sector: query.sector.filter(|s| !s.is_empty()),
            status: query.status.filter(|s| !s.is_empty()),
        }
    }
}

/// Query string for `GET /api/v1/iot/sensors`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SensorQuery {
    #[serde(rename = "type")]
    pub sensor_type: Option<String>,
}

impl SensorQuery {
    pub fn sensor_type(&self) -> Option<&str> {
        self.sensor_type.as_deref().filter(|t| !t.is_empty())
    }
}

/// Parses an integer path segment such as a project or user id.
pub fn parse_id(raw: &str, field: &str) -> Result<u64> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| ApiError::Validation(format!("{} must be an integer", field)))
}

// External system status board
// Author: kelexine (https://github.com/kelexine)
//
// No integration is actually contacted; the list and sync ages are fixed.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegrationState {
    Connected,
    Degraded,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrationStatus {
    pub name: String,
    pub status: IntegrationState,
    pub last_sync: String,
}

/// (name, state, seconds since last sync)
const INTEGRATIONS: &[(&str, IntegrationState, i64)] = &[
    ("AgroDigit Abai", IntegrationState::Connected, 300),
    ("FreshUz", IntegrationState::Connected, 120),
    ("Aqua-Monitor", IntegrationState::Connected, 60),
    ("Smart Road", IntegrationState::Connected, 30),
    ("eGov API", IntegrationState::Degraded, 600),
];

pub fn statuses(now: DateTime<Utc>) -> Vec<IntegrationStatus> {
    INTEGRATIONS
        .iter()
        .map(|(name, status, age)| IntegrationStatus {
            name: name.to_string(),
            status: *status,
            last_sync: (now - Duration::seconds(*age)).to_rfc3339_opts(SecondsFormat::Millis, true),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_sync_is_relative_to_now() {
        let now = Utc::now();
        let list = statuses(now);
        assert_eq!(list.len(), 5);

        let egov = list.iter().find(|i| i.name == "eGov API").unwrap();
        assert_eq!(egov.status, IntegrationState::Degraded);
        let synced = DateTime::parse_from_rfc3339(&egov.last_sync).unwrap();
        assert_eq!((now - synced.with_timezone(&Utc)).num_seconds(), 600);
    }
}

//! Hourly activity bucket as reported by the backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One fixed-width (hourly) interval of aggregated activity counters.
///
/// Optional fields are `None` when the backend had no data for the hour,
/// which is distinct from a measured zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryBucket {
    /// Start of the hour this bucket covers.
    pub bucket_start: DateTime<Utc>,
    /// Number of conversational turns in the hour.
    #[serde(default)]
    pub turn_count: u64,
    /// Mean turn duration, if any turns completed.
    #[serde(default)]
    pub avg_turn_time_seconds: Option<f64>,
    /// Agents active during the hour.
    #[serde(default)]
    pub active_agents: Option<u64>,
    /// Summed frustration score over qualifying turns.
    #[serde(default)]
    pub total_frustration: Option<f64>,
    /// Number of turns that carried a frustration score.
    #[serde(default)]
    pub frustration_turn_count: Option<u64>,
}

impl HistoryBucket {
    /// A synthesized bucket for an hour with no recorded activity.
    pub fn empty(bucket_start: DateTime<Utc>) -> Self {
        Self {
            bucket_start,
            turn_count: 0,
            avg_turn_time_seconds: None,
            active_agents: None,
            total_frustration: None,
            frustration_turn_count: None,
        }
    }
}

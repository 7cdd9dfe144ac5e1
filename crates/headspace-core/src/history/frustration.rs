//! Frustration-level classification for color-coding aggregated history.

use serde::{Deserialize, Serialize};

/// Average frustration at or above this threshold classifies as Elevated.
pub const ELEVATED_THRESHOLD: f64 = 3.0;
/// Average frustration at or above this threshold classifies as High.
pub const HIGH_THRESHOLD: f64 = 6.0;

/// Severity bands for the backend's 0-10 frustration scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrustrationLevel {
    Calm,
    Elevated,
    High,
}

/// Classifies summed frustration against the two ascending thresholds.
///
/// The average is `total / turns`; undefined or zero-turn inputs classify
/// as [`FrustrationLevel::Calm`] by convention.
pub fn classify_frustration(total: Option<f64>, turns: Option<u64>) -> FrustrationLevel {
    let (Some(total), Some(turns)) = (total, turns) else {
        return FrustrationLevel::Calm;
    };
    if turns == 0 {
        return FrustrationLevel::Calm;
    }

    let average = total / turns as f64;
    if average >= HIGH_THRESHOLD {
        FrustrationLevel::High
    } else if average >= ELEVATED_THRESHOLD {
        FrustrationLevel::Elevated
    } else {
        FrustrationLevel::Calm
    }
}

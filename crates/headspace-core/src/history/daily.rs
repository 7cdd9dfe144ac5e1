//! Calendar-day rollup of hourly buckets.

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::model::HistoryBucket;

/// One calendar day of aggregated activity.
///
/// `total_frustration` and `frustration_turn_count` stay `None` when the
/// day carried no frustration data, distinguishing "no data" from
/// "measured zero".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBucket {
    /// Calendar day in the local timezone.
    pub day: NaiveDate,
    pub turn_count: u64,
    pub total_frustration: Option<f64>,
    pub frustration_turn_count: Option<u64>,
    /// Highest single-bucket frustration total seen during the day.
    pub max_frustration: Option<f64>,
}

#[derive(Default)]
struct DayAccum {
    turn_count: u64,
    frustration_sum: f64,
    frustration_turns: u64,
    max_frustration: Option<f64>,
}

/// Groups hourly buckets by local calendar day, summing turn counts and
/// frustration totals/counts and tracking the maximum bucket frustration.
/// Output is ordered by day ascending.
pub fn aggregate_daily(buckets: &[HistoryBucket]) -> Vec<DailyBucket> {
    let mut days: BTreeMap<NaiveDate, DayAccum> = BTreeMap::new();

    for bucket in buckets {
        let day = bucket.bucket_start.with_timezone(&Local).date_naive();
        let accum = days.entry(day).or_default();

        accum.turn_count += bucket.turn_count;
        if let Some(frustration) = bucket.total_frustration {
            accum.frustration_sum += frustration;
            accum.max_frustration = Some(match accum.max_frustration {
                Some(current) => current.max(frustration),
                None => frustration,
            });
        }
        if let Some(count) = bucket.frustration_turn_count {
            accum.frustration_turns += count;
        }
    }

    days.into_iter()
        .map(|(day, accum)| DailyBucket {
            day,
            turn_count: accum.turn_count,
            total_frustration: (accum.frustration_sum > 0.0).then_some(accum.frustration_sum),
            frustration_turn_count: (accum.frustration_turns > 0)
                .then_some(accum.frustration_turns),
            max_frustration: accum.max_frustration,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn bucket(day: u32, hour: u32, turns: u64, frustration: Option<f64>) -> HistoryBucket {
        HistoryBucket {
            bucket_start: Utc.with_ymd_and_hms(2026, 8, day, hour, 0, 0).unwrap(),
            turn_count: turns,
            avg_turn_time_seconds: None,
            active_agents: None,
            total_frustration: frustration,
            frustration_turn_count: frustration.map(|_| 1),
        }
    }

    #[test]
    fn test_same_day_turns_are_summed() {
        // Midday hours avoid local-timezone day boundaries.
        let buckets = vec![bucket(10, 11, 5, None), bucket(10, 13, 3, None)];
        let daily = aggregate_daily(&buckets);

        assert_eq!(daily.len(), 1);
        assert_eq!(daily[0].turn_count, 8);
    }

    #[test]
    fn test_all_none_frustration_stays_none() {
        let buckets = vec![bucket(10, 11, 5, None), bucket(10, 13, 3, None)];
        let daily = aggregate_daily(&buckets);

        assert_eq!(daily[0].total_frustration, None);
        assert_eq!(daily[0].frustration_turn_count, None);
        assert_eq!(daily[0].max_frustration, None);
    }

    #[test]
    fn test_frustration_sums_and_max() {
        let buckets = vec![bucket(10, 11, 1, Some(2.0)), bucket(10, 13, 1, Some(5.0))];
        let daily = aggregate_daily(&buckets);

        assert_eq!(daily[0].total_frustration, Some(7.0));
        assert_eq!(daily[0].frustration_turn_count, Some(2));
        assert_eq!(daily[0].max_frustration, Some(5.0));
    }

    #[test]
    fn test_days_ordered_ascending() {
        let buckets = vec![
            bucket(12, 11, 1, None),
            bucket(10, 11, 1, None),
            bucket(11, 11, 1, None),
        ];
        let daily = aggregate_daily(&buckets);

        assert_eq!(daily.len(), 3);
        assert!(daily[0].day < daily[1].day);
        assert!(daily[1].day < daily[2].day);
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate_daily(&[]).is_empty());
    }
}

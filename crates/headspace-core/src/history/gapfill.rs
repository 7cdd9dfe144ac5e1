//! Fills missing hours between the first and last reported bucket.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use super::model::HistoryBucket;

const HOUR_SECS: i64 = 3600;

/// Produces one bucket per hour from the first input bucket's hour boundary
/// through the last's, inclusive.
///
/// Hours present in the input pass through unchanged; missing hours are
/// synthesized with a zero turn count and `None` for all optional fields.
/// Inputs shorter than 2 buckets have no gap to fill and are returned
/// unchanged.
pub fn fill_hourly_gaps(buckets: &[HistoryBucket]) -> Vec<HistoryBucket> {
    if buckets.len() < 2 {
        return buckets.to_vec();
    }

    let by_hour: HashMap<i64, &HistoryBucket> = buckets
        .iter()
        .map(|bucket| (hour_floor_secs(bucket.bucket_start), bucket))
        .collect();

    let first = hour_floor_secs(buckets[0].bucket_start);
    let last = hour_floor_secs(buckets[buckets.len() - 1].bucket_start);

    let mut filled = Vec::with_capacity(((last - first) / HOUR_SECS + 1).max(0) as usize);
    let mut hour = first;
    while hour <= last {
        match by_hour.get(&hour) {
            Some(bucket) => filled.push((*bucket).clone()),
            None => {
                let start = DateTime::<Utc>::from_timestamp(hour, 0)
                    .unwrap_or_else(|| buckets[0].bucket_start);
                filled.push(HistoryBucket::empty(start));
            }
        }
        hour += HOUR_SECS;
    }
    filled
}

fn hour_floor_secs(ts: DateTime<Utc>) -> i64 {
    ts.timestamp() - ts.timestamp().rem_euclid(HOUR_SECS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn bucket_at(hour: u32, turns: u64) -> HistoryBucket {
        HistoryBucket {
            bucket_start: Utc.with_ymd_and_hms(2026, 8, 29, hour, 0, 0).unwrap(),
            turn_count: turns,
            avg_turn_time_seconds: Some(10.0),
            active_agents: Some(1),
            total_frustration: Some(2.0),
            frustration_turn_count: Some(1),
        }
    }

    #[test]
    fn test_fills_missing_hours() {
        let input = vec![bucket_at(0, 5), bucket_at(3, 2)];
        let filled = fill_hourly_gaps(&input);

        assert_eq!(filled.len(), 4);
        assert_eq!(filled[0].turn_count, 5);
        assert_eq!(filled[3].turn_count, 2);
        for synthesized in &filled[1..3] {
            assert_eq!(synthesized.turn_count, 0);
            assert_eq!(synthesized.avg_turn_time_seconds, None);
            assert_eq!(synthesized.active_agents, None);
            assert_eq!(synthesized.total_frustration, None);
            assert_eq!(synthesized.frustration_turn_count, None);
        }
        assert_eq!(
            filled[1].bucket_start,
            Utc.with_ymd_and_hms(2026, 8, 29, 1, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_contiguous_input_passes_through() {
        let input = vec![bucket_at(4, 1), bucket_at(5, 2), bucket_at(6, 3)];
        assert_eq!(fill_hourly_gaps(&input), input);
    }

    #[test]
    fn test_short_inputs_unchanged() {
        assert!(fill_hourly_gaps(&[]).is_empty());

        let single = vec![bucket_at(9, 4)];
        assert_eq!(fill_hourly_gaps(&single), single);
    }

    #[test]
    fn test_mid_hour_timestamps_snap_to_boundary() {
        let mut early = bucket_at(0, 1);
        early.bucket_start = Utc.with_ymd_and_hms(2026, 8, 29, 0, 30, 0).unwrap();
        let input = vec![early, bucket_at(2, 1)];

        let filled = fill_hourly_gaps(&input);
        assert_eq!(filled.len(), 3);
        // The synthesized hour lands on the boundary, not the half hour.
        assert_eq!(
            filled[1].bucket_start,
            Utc.with_ymd_and_hms(2026, 8, 29, 1, 0, 0).unwrap()
        );
    }
}

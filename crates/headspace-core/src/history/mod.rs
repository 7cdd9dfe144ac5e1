//! Activity-history buckets and their chart-side transforms.
//!
//! The backend reports activity as hourly buckets; this module fills the
//! gaps between them, rolls them up by calendar day and classifies the
//! aggregated frustration signal. Frustration scores are backend-computed;
//! they are only aggregated here.

mod daily;
mod frustration;
mod gapfill;
mod model;

pub use daily::{DailyBucket, aggregate_daily};
pub use frustration::{
    ELEVATED_THRESHOLD, FrustrationLevel, HIGH_THRESHOLD, classify_frustration,
};
pub use gapfill::fill_hourly_gaps;
pub use model::HistoryBucket;

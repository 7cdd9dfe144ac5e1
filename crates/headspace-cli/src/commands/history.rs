//! `headspace history` - gap-fill and daily rollup of hourly buckets.

use std::io::Read;

use anyhow::{Context, Result};
use headspace_core::history::{HistoryBucket, aggregate_daily, fill_hourly_gaps};

pub fn run(file: &str, daily: bool) -> Result<()> {
    let raw = if file == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        buf
    } else {
        std::fs::read_to_string(file).with_context(|| format!("failed to read {file}"))?
    };

    let buckets: Vec<HistoryBucket> =
        serde_json::from_str(&raw).context("failed to parse hourly buckets")?;
    let filled = fill_hourly_gaps(&buckets);

    let output = if daily {
        serde_json::to_string_pretty(&aggregate_daily(&filled))?
    } else {
        serde_json::to_string_pretty(&filled)?
    };
    println!("{output}");
    Ok(())
}

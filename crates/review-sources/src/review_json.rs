//! Parser for line-delimited review JSON (`reviews_*.json`).

use anyhow::{Context, Result};
use review_models::{ReviewRecord, INSTANT_VIDEO_CATEGORY};
use std::path::Path;
use tracing::debug;

use crate::at_limit;
use crate::dates::parse_local_date_millis;
use crate::fields::{self, JsonObject};
use crate::lines::open_lossy_lines;
use crate::progress::ParseStats;

/// `reviewTime` layout, e.g. `03 2, 2010`
const REVIEW_TIME_FORMAT: &str = "%m %d, %Y";

/// Parse review JSON lines from `path`, stopping once `limit` records are emitted.
///
/// Lines that are not JSON objects are skipped.
pub fn parse_review_json<P: AsRef<Path>>(path: P, limit: Option<usize>) -> Result<Vec<ReviewRecord>> {
    parse_review_json_with_stats(path, limit).map(|(records, _)| records)
}

/// As [`parse_review_json`], also returning what was skipped.
pub fn parse_review_json_with_stats<P: AsRef<Path>>(
    path: P,
    limit: Option<usize>,
) -> Result<(Vec<ReviewRecord>, ParseStats)> {
    let path = path.as_ref();
    debug!(path = %path.display(), ?limit, "Reading review JSON");

    let mut stats = ParseStats::new("review JSON");
    let mut records = Vec::new();

    for (i, line) in open_lossy_lines(path)?.enumerate() {
        if at_limit(records.len(), limit) {
            break;
        }
        let line = line.with_context(|| format!("read line {} in {}", i + 1, path.display()))?;
        stats.record_seen();

        let Some(review) = fields::parse_object(&line) else {
            stats.record_skipped("invalid json", format!("line {}", i + 1));
            continue;
        };

        records.push(review_record(&review));
        stats.record_emitted();
    }

    stats.log_summary();
    Ok((records, stats))
}

/// Normalize one review object.
pub fn review_record(review: &JsonObject) -> ReviewRecord {
    let asin = fields::string_or(review, "asin", "");

    ReviewRecord {
        rating: Some(fields::float(review, "overall").unwrap_or(0.0)),
        title: fields::string_or(review, "summary", ""),
        text: fields::string_or(review, "reviewText", ""),
        parent_asin: asin.clone(),
        asin,
        user_id: fields::string_or(review, "reviewerID", ""),
        timestamp: review_timestamp(review),
        helpful_vote: fields::first_integer(review, "helpful").unwrap_or(0),
        category: INSTANT_VIDEO_CATEGORY.to_string(),
        ..ReviewRecord::default()
    }
}

/// `reviewTime` at local midnight, else `unixReviewTime` seconds, else 0.
fn review_timestamp(review: &JsonObject) -> i64 {
    fields::string(review, "reviewTime")
        .and_then(|time| parse_local_date_millis(&time, REVIEW_TIME_FORMAT))
        .or_else(|| {
            fields::integer(review, "unixReviewTime").and_then(|secs| secs.checked_mul(1000))
        })
        .unwrap_or(0)
}

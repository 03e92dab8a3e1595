//! Parser for line-delimited product metadata JSON (`meta_*.json`).

use anyhow::{Context, Result};
use review_models::{ReviewRecord, INSTANT_VIDEO_CATEGORY};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

use crate::at_limit;
use crate::fields::{self, JsonObject};
use crate::lines::open_lossy_lines;
use crate::progress::ParseStats;

/// Parse metadata JSON lines from `path`, stopping once `limit` records are emitted.
///
/// Records carry no review: `rating` is `None` and review fields stay blank.
pub fn parse_meta_json<P: AsRef<Path>>(path: P, limit: Option<usize>) -> Result<Vec<ReviewRecord>> {
    parse_meta_json_with_stats(path, limit).map(|(records, _)| records)
}

/// As [`parse_meta_json`], also returning what was skipped.
pub fn parse_meta_json_with_stats<P: AsRef<Path>>(
    path: P,
    limit: Option<usize>,
) -> Result<(Vec<ReviewRecord>, ParseStats)> {
    let path = path.as_ref();
    debug!(path = %path.display(), ?limit, "Reading metadata JSON");

    let mut stats = ParseStats::new("metadata JSON");
    let mut records = Vec::new();

    for (i, line) in open_lossy_lines(path)?.enumerate() {
        if at_limit(records.len(), limit) {
            break;
        }
        let line = line.with_context(|| format!("read line {} in {}", i + 1, path.display()))?;
        stats.record_seen();

        let Some(meta) = fields::parse_object(&line) else {
            stats.record_skipped("invalid json", format!("line {}", i + 1));
            continue;
        };

        records.push(meta_record(&meta));
        stats.record_emitted();
    }

    stats.log_summary();
    Ok((records, stats))
}

/// Normalize one metadata object into a product-only record.
pub fn meta_record(meta: &JsonObject) -> ReviewRecord {
    let asin = fields::string_or(meta, "asin", "");
    let parent_asin = fields::string(meta, "parent_asin").unwrap_or_else(|| asin.clone());

    ReviewRecord {
        parent_asin,
        images: fields::string_list(meta, "image"),
        category: category(meta),
        ..ReviewRecord::product_only(asin)
    }
}

/// `category` as text; list-valued categories are joined into one path.
fn category(meta: &JsonObject) -> String {
    match meta.get("category") {
        Some(Value::Array(parts)) => parts
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join("|"),
        _ => fields::string_or(meta, "category", INSTANT_VIDEO_CATEGORY),
    }
}

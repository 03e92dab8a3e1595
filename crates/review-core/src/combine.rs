//! Merge parsed sources into the combined dataset.

use review_models::{CombinedRecord, ReviewRecord};
use std::collections::HashSet;
use tracing::debug;

use crate::category::rewrite_category;

/// Combine the three sources in order: text dump, review JSON, metadata JSON.
///
/// See [`combine_all`].
pub fn combine(
    text_dump: Vec<ReviewRecord>,
    review_json: Vec<ReviewRecord>,
    meta_json: Vec<ReviewRecord>,
    limit: Option<usize>,
) -> Vec<CombinedRecord> {
    combine_all(vec![text_dump, review_json, meta_json], limit)
}

/// Concatenate `sources` in order, keep at most `limit` records, drop
/// duplicate reviews, then derive `review_date` and rewrite categories.
///
/// The cap applies before deduplication, so fewer than `limit` rows may
/// survive.
pub fn combine_all(sources: Vec<Vec<ReviewRecord>>, limit: Option<usize>) -> Vec<CombinedRecord> {
    let mut all: Vec<ReviewRecord> = sources.into_iter().flatten().collect();

    if let Some(limit) = limit {
        if all.len() > limit {
            debug!(total = all.len(), limit, "Truncating combined records");
            all.truncate(limit);
        }
    }

    let before = all.len();
    let unique = remove_duplicate_reviews(all);
    debug!(
        before,
        after = unique.len(),
        removed = before - unique.len(),
        "Removed duplicate reviews"
    );

    unique
        .into_iter()
        .map(|mut record| {
            record.category = rewrite_category(&record.category);
            CombinedRecord::new(record)
        })
        .collect()
}

/// Keep the first record for each `user_id`/`asin`/`timestamp` key, preserving order.
pub fn remove_duplicate_reviews(records: Vec<ReviewRecord>) -> Vec<ReviewRecord> {
    let mut seen = HashSet::with_capacity(records.len());
    records
        .into_iter()
        .filter(|record| seen.insert(record.review_id()))
        .collect()
}

#[cfg(test)]
mod tests;

//! Parser for the legacy `amazon-meta.txt` product dump.
//!
//! The dump is a sequence of product blocks, each introduced by `Id: <n>`,
//! carrying an ASIN, a title, pipe-separated category paths and one line per
//! downloaded review. Review lines use the dump's own `cutomer:` spelling.

use anyhow::Result;
use regex::Regex;
use review_models::{ReviewRecord, UNKNOWN_CATEGORY};
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, trace};

use crate::dates::parse_local_date_millis;
use crate::lines::read_lossy_to_string;
use crate::progress::ParseStats;
use crate::at_limit;

const REVIEW_DATE_FORMAT: &str = "%Y-%m-%d";

fn block_delimiter_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"Id:\s+\d+").expect("valid block delimiter regex"))
}

fn asin_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"ASIN:\s+(\w+)").expect("valid asin regex"))
}

fn title_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"title:\s+(.+)").expect("valid title regex"))
}

fn category_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\|([^|]+)").expect("valid category regex"))
}

fn review_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(\d{4}-\d{1,2}-\d{1,2})\s+cutomer:\s+(\w+)\s+rating:\s+(\d+)\s+votes:\s+(\d+)\s+helpful:\s+(\d+)",
        )
        .expect("valid review line regex")
    })
}

/// Product-level fields shared by every review in a block
#[derive(Debug, Clone, PartialEq)]
pub struct ProductBlock<'a> {
    pub asin: &'a str,
    pub title: &'a str,
    pub main_category: String,
    body: &'a str,
}

impl<'a> ProductBlock<'a> {
    /// Extract product fields from one block. `None` when the block has no ASIN.
    pub fn parse(body: &'a str) -> Option<Self> {
        let asin = asin_re().captures(body)?.get(1)?.as_str();

        let title = title_re()
            .captures(body)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim_end_matches('\r'))
            .unwrap_or("");

        let main_category = category_re()
            .captures_iter(body)
            .filter_map(|c| c.get(1))
            .map(|m| category_name(m.as_str()))
            .next()
            .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string());

        Some(Self {
            asin,
            title,
            main_category,
            body,
        })
    }

    /// Build records for the block's review lines.
    ///
    /// Lines whose numbers do not fit are skipped and reported to `stats`.
    fn reviews(&self, stats: &mut ParseStats) -> Vec<ReviewRecord> {
        let mut records = Vec::new();
        for caps in review_line_re().captures_iter(self.body) {
            match self.review_from_captures(&caps) {
                Some(record) => records.push(record),
                None => {
                    let line = caps.get(0).map(|m| m.as_str()).unwrap_or_default();
                    stats.record_skipped("review line out of range", line);
                }
            }
        }
        records
    }

    fn review_from_captures(&self, caps: &regex::Captures<'_>) -> Option<ReviewRecord> {
        let date = caps.get(1)?.as_str();
        let user_id = caps.get(2)?.as_str();
        let rating = caps.get(3)?.as_str().parse::<u32>().ok()?;
        let helpful_vote = caps.get(5)?.as_str().parse::<i64>().ok()?;

        let timestamp = parse_local_date_millis(date, REVIEW_DATE_FORMAT).unwrap_or_else(|| {
            debug!(asin = self.asin, date, "Unparsable review date, using 0");
            0
        });

        Some(ReviewRecord {
            rating: Some(f64::from(rating)),
            asin: self.asin.to_string(),
            parent_asin: self.asin.to_string(),
            user_id: user_id.to_string(),
            timestamp,
            helpful_vote,
            category: self.main_category.clone(),
            ..ReviewRecord::default()
        })
    }
}

/// First segment of a category path entry, e.g. `Books[283155]` -> `Books`
fn category_name(raw: &str) -> String {
    raw.split('[').next().unwrap_or_default().trim().to_string()
}

/// Parse the text dump at `path`, stopping once `limit` records are emitted.
pub fn parse_text_dump<P: AsRef<Path>>(path: P, limit: Option<usize>) -> Result<Vec<ReviewRecord>> {
    parse_text_dump_with_stats(path, limit).map(|(records, _)| records)
}

/// As [`parse_text_dump`], also returning what was skipped.
pub fn parse_text_dump_with_stats<P: AsRef<Path>>(
    path: P,
    limit: Option<usize>,
) -> Result<(Vec<ReviewRecord>, ParseStats)> {
    let path = path.as_ref();
    debug!(path = %path.display(), ?limit, "Reading text dump");
    let content = read_lossy_to_string(path)?;
    Ok(parse_blocks(&content, limit))
}

/// Parse text dump content already held in memory.
pub fn parse_text_dump_str(content: &str, limit: Option<usize>) -> Vec<ReviewRecord> {
    parse_blocks(content, limit).0
}

fn parse_blocks(content: &str, limit: Option<usize>) -> (Vec<ReviewRecord>, ParseStats) {
    let mut stats = ParseStats::new("text dump");
    let mut records = Vec::new();

    'blocks: for body in block_delimiter_re().split(content).skip(1) {
        if at_limit(records.len(), limit) {
            break;
        }
        stats.record_seen();

        let Some(block) = ProductBlock::parse(body) else {
            stats.record_skipped("missing asin", body.trim().lines().next().unwrap_or_default());
            continue;
        };
        trace!(asin = block.asin, title = block.title, category = %block.main_category, "Product block");

        for record in block.reviews(&mut stats) {
            records.push(record);
            stats.record_emitted();
            if at_limit(records.len(), limit) {
                break 'blocks;
            }
        }
    }

    stats.log_summary();
    (records, stats)
}

#[cfg(test)]
mod tests;

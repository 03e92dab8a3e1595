use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::review::ReviewRecord;

/// Column names of the combined dataset, in export order.
pub const COLUMNS: [&str; 12] = [
    "rating",
    "title",
    "text",
    "images",
    "asin",
    "parent_asin",
    "user_id",
    "timestamp",
    "helpful_vote",
    "verified_purchase",
    "category",
    "review_date",
];

/// A row of the combined dataset: the normalized record plus its calendar date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CombinedRecord {
    #[serde(flatten)]
    pub record: ReviewRecord,
    /// Serialized as epoch milliseconds. `None` when `timestamp` falls
    /// outside the representable range.
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    pub review_date: Option<DateTime<Utc>>,
}

impl CombinedRecord {
    pub fn new(record: ReviewRecord) -> Self {
        let review_date = DateTime::from_timestamp_millis(record.timestamp);
        Self { record, review_date }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_date_from_millis() {
        let combined = CombinedRecord::new(ReviewRecord {
            timestamp: 1_267_488_000_000,
            ..ReviewRecord::default()
        });
        let date = combined.review_date.unwrap();
        assert_eq!(date.to_rfc3339(), "2010-03-02T00:00:00+00:00");
    }

    #[test]
    fn test_review_date_zero_is_epoch() {
        let combined = CombinedRecord::new(ReviewRecord::default());
        assert_eq!(combined.review_date.unwrap().timestamp(), 0);
    }

    #[test]
    fn test_review_date_out_of_range_is_none() {
        let combined = CombinedRecord::new(ReviewRecord {
            timestamp: i64::MAX,
            ..ReviewRecord::default()
        });
        assert!(combined.review_date.is_none());
    }

    #[test]
    fn test_review_date_serializes_as_millis() {
        let combined = CombinedRecord::new(ReviewRecord {
            timestamp: 1_267_488_000_000,
            ..ReviewRecord::default()
        });
        let value = serde_json::to_value(&combined).unwrap();
        assert_eq!(value["review_date"], 1_267_488_000_000_i64);

        let back: CombinedRecord = serde_json::from_value(value).unwrap();
        assert_eq!(back, combined);

        let out_of_range = CombinedRecord::new(ReviewRecord {
            timestamp: i64::MAX,
            ..ReviewRecord::default()
        });
        assert!(serde_json::to_value(&out_of_range).unwrap()["review_date"].is_null());
    }

    #[test]
    fn test_serialized_keys_follow_column_order() {
        let combined = CombinedRecord::new(ReviewRecord::default());
        let json = serde_json::to_string(&combined).unwrap();
        let mut last = 0;
        for column in COLUMNS {
            let pos = json.find(&format!("\"{}\"", column)).unwrap();
            assert!(pos >= last, "{} out of order", column);
            last = pos;
        }
    }
}

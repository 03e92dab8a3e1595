use serde::{Deserialize, Serialize};

use crate::category::UNKNOWN_CATEGORY;

/// A review (or product-only metadata row) normalized from any source format.
///
/// Every field is always populated. Sources that lack a value leave the
/// default from [`ReviewRecord::default`] in place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReviewRecord {
    /// `None` marks a metadata-only row, which is not the same as a rating of 0.
    pub rating: Option<f64>,
    pub title: String,
    pub text: String,
    pub images: Vec<String>,
    pub asin: String,
    pub parent_asin: String,
    pub user_id: String,
    /// Milliseconds since the Unix epoch, 0 when the source date was unusable
    pub timestamp: i64,
    pub helpful_vote: i64,
    pub verified_purchase: bool,
    pub category: String,
}

impl ReviewRecord {
    /// Key used to collapse duplicate reviews across sources.
    pub fn review_id(&self) -> String {
        format!("{}_{}_{}", self.user_id, self.asin, self.timestamp)
    }

    /// Record for a product with no review attached.
    pub fn product_only(asin: impl Into<String>) -> Self {
        let asin = asin.into();
        Self {
            rating: None,
            parent_asin: asin.clone(),
            asin,
            ..Self::default()
        }
    }
}

impl Default for ReviewRecord {
    fn default() -> Self {
        Self {
            rating: Some(0.0),
            title: String::new(),
            text: String::new(),
            images: Vec::new(),
            asin: String::new(),
            parent_asin: String::new(),
            user_id: String::new(),
            timestamp: 0,
            helpful_vote: 0,
            verified_purchase: false,
            category: UNKNOWN_CATEGORY.to_string(),
        }
    }
}

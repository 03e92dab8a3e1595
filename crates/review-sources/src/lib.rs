pub mod dates;
pub mod fields;
pub mod lines;
pub mod meta_json;
pub mod progress;
pub mod review_json;
pub mod text_dump;

pub use meta_json::{parse_meta_json, parse_meta_json_with_stats};
pub use progress::ParseStats;
pub use review_json::{parse_review_json, parse_review_json_with_stats};
pub use text_dump::{parse_text_dump, parse_text_dump_str, parse_text_dump_with_stats, ProductBlock};

/// True once `count` records satisfy an optional `limit`.
pub(crate) fn at_limit(count: usize, limit: Option<usize>) -> bool {
    limit.is_some_and(|limit| count >= limit)
}

use super::*;

fn review(user_id: &str, asin: &str, timestamp: i64, category: &str) -> ReviewRecord {
    ReviewRecord {
        rating: Some(5.0),
        asin: asin.to_string(),
        parent_asin: asin.to_string(),
        user_id: user_id.to_string(),
        timestamp,
        category: category.to_string(),
        ..ReviewRecord::default()
    }
}

fn product(asin: &str) -> ReviewRecord {
    ReviewRecord::product_only(asin)
}

#[test]
fn test_concatenates_in_source_order() {
    let combined = combine(
        vec![review("A1", "T1", 1, "Books")],
        vec![review("A2", "R1", 2, "Amazon Instant Video")],
        vec![product("M1")],
        None,
    );

    let asins: Vec<&str> = combined.iter().map(|c| c.record.asin.as_str()).collect();
    assert_eq!(asins, vec!["T1", "R1", "M1"]);
}

#[test]
fn test_duplicates_keep_first() {
    let mut first = review("U1", "X1", 1000, "Music");
    first.title = "first".to_string();
    let mut second = review("U1", "X1", 1000, "Music");
    second.title = "second".to_string();

    let combined = combine(vec![first], vec![second], vec![], None);

    assert_eq!(combined.len(), 1);
    assert_eq!(combined[0].record.title, "first");
}

#[test]
fn test_different_timestamp_is_not_a_duplicate() {
    let combined = combine(
        vec![review("U1", "X1", 1000, "Music"), review("U1", "X1", 2000, "Music")],
        vec![],
        vec![],
        None,
    );
    assert_eq!(combined.len(), 2);
}

#[test]
fn test_metadata_rows_with_same_asin_collapse() {
    // Product-only rows share blank user and zero timestamp
    let combined = combine(vec![], vec![], vec![product("M1"), product("M2"), product("M1")], None);

    let asins: Vec<&str> = combined.iter().map(|c| c.record.asin.as_str()).collect();
    assert_eq!(asins, vec!["M1", "M2"]);
}

#[test]
fn test_limit_truncates_before_dedup() {
    let combined = combine(
        vec![review("U1", "X1", 1, "Music"), review("U1", "X1", 1, "Music")],
        vec![review("U2", "X2", 2, "Music")],
        vec![product("M1")],
        Some(3),
    );

    // The fourth record is cut, then the duplicate pair collapses
    let asins: Vec<&str> = combined.iter().map(|c| c.record.asin.as_str()).collect();
    assert_eq!(asins, vec!["X1", "X2"]);
}

#[test]
fn test_limit_larger_than_input_keeps_everything() {
    let combined = combine(vec![review("U1", "X1", 1, "Music")], vec![], vec![product("M1")], Some(10));
    assert_eq!(combined.len(), 2);
}

#[test]
fn test_categories_rewritten() {
    let combined = combine(
        vec![review("U1", "X1", 1, "Books")],
        vec![review("U2", "X2", 2, "Amazon Instant Video")],
        vec![product("M1")],
        None,
    );

    assert_eq!(combined[0].record.category, "Books & Literature");
    assert_eq!(combined[1].record.category, "Video & Entertainment");
    assert_eq!(combined[2].record.category, "Unknown");
}

#[test]
fn test_review_date_derived() {
    let combined = combine(
        vec![review("U1", "X1", 1_267_488_000_000, "Music")],
        vec![review("U2", "X2", i64::MIN, "Music")],
        vec![],
        None,
    );

    assert_eq!(
        combined[0].review_date.map(|d| d.timestamp_millis()),
        Some(1_267_488_000_000)
    );
    assert!(combined[1].review_date.is_none());
}

#[test]
fn test_remove_duplicate_reviews_is_stable() {
    let records = vec![
        review("B", "1", 0, "c"),
        review("A", "1", 0, "c"),
        review("B", "1", 0, "c"),
        review("C", "1", 0, "c"),
        review("A", "1", 0, "c"),
    ];
    let unique = remove_duplicate_reviews(records);
    let users: Vec<&str> = unique.iter().map(|r| r.user_id.as_str()).collect();
    assert_eq!(users, vec!["B", "A", "C"]);
}

#[test]
fn test_empty_sources() {
    assert!(combine(vec![], vec![], vec![], Some(9)).is_empty());
    assert!(combine_all(vec![], None).is_empty());
}

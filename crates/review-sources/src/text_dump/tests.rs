use super::*;
use chrono::{Local, TimeZone};
use std::io::Write;
use tempfile::NamedTempFile;

const SAMPLE_DUMP: &str = "# Full information about Amazon Share the Love products
Total items: 548552

Id:   0
ASIN: 0771044445
  discontinued product

Id:   1
ASIN: 0827229534
  title: Patterns of Preaching: A Sermon Sampler
  group: Book
  salesrank: 396585
  similar: 5  0804215715  156101074X  0687023955  0687074231  082721619X
  categories: 2
   |Books[283155]|Subjects[1000]|Religion & Spirituality[22]|Christianity[12290]|Clergy[12360]|Preaching[12368]
   |Books[283155]|Subjects[1000]|Religion & Spirituality[22]|Christianity[12290]|Clergy[12360]|Sermons[12370]
  reviews: total: 2  downloaded: 2  avg rating: 5
    2000-7-28  cutomer: A2JW67OY8U6HHK  rating: 5  votes:  10  helpful:   9
    2003-12-14  cutomer: A2VE83MZF98ITY  rating: 4  votes:   6  helpful:   5

Id:   2
ASIN: 0738700797
  title: Candlemas: Feast of Flames
  group: Book
  categories: 0
  reviews: total: 1  downloaded: 1  avg rating: 5
    2001-12-16  cutomer: A11NCO6YTE4BTJ  rating: 5  votes:   5  helpful:   4
";

fn local_millis(year: i32, month: u32, day: u32) -> i64 {
    Local
        .with_ymd_and_hms(year, month, day, 0, 0, 0)
        .earliest()
        .unwrap()
        .timestamp_millis()
}

fn write_dump(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file
}

#[test]
fn test_parse_sample_dump() {
    let file = write_dump(SAMPLE_DUMP);
    let records = parse_text_dump(file.path(), None).unwrap();

    assert_eq!(records.len(), 3);

    assert_eq!(records[0].asin, "0827229534");
    assert_eq!(records[0].parent_asin, "0827229534");
    assert_eq!(records[0].user_id, "A2JW67OY8U6HHK");
    assert_eq!(records[0].rating, Some(5.0));
    assert_eq!(records[0].helpful_vote, 9);
    assert_eq!(records[0].timestamp, local_millis(2000, 7, 28));
    assert_eq!(records[0].category, "Books");

    assert_eq!(records[1].rating, Some(4.0));
    assert_eq!(records[1].timestamp, local_millis(2003, 12, 14));

    // No category paths in block 2
    assert_eq!(records[2].asin, "0738700797");
    assert_eq!(records[2].category, "Unknown");
}

#[test]
fn test_emitted_records_leave_review_text_blank() {
    let records = parse_text_dump_str(SAMPLE_DUMP, None);
    for record in &records {
        assert!(record.title.is_empty());
        assert!(record.text.is_empty());
        assert!(record.images.is_empty());
        assert!(!record.verified_purchase);
        assert!(record.rating.is_some());
    }
}

#[test]
fn test_reference_review_line() {
    let content = "Id: 7\nASIN: B001 title: x\n 2005-3-14 cutomer: A1 rating: 5 votes: 10 helpful: 3\n";
    let records = parse_text_dump_str(content, None);

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].asin, "B001");
    assert_eq!(records[0].user_id, "A1");
    assert_eq!(records[0].rating, Some(5.0));
    assert_eq!(records[0].helpful_vote, 3);
    assert_eq!(records[0].timestamp, local_millis(2005, 3, 14));
}

#[test]
fn test_block_without_asin_yields_nothing() {
    let content = "Id: 1\n  title: orphan\n    2005-3-14  cutomer: A1  rating: 5  votes: 1  helpful: 1\n";
    let records = parse_text_dump_str(content, None);
    assert!(records.is_empty());
}

#[test]
fn test_text_before_first_block_is_ignored() {
    let content = "ASIN: PREAMBLE\n 2005-3-14 cutomer: A0 rating: 1 votes: 0 helpful: 0\nId: 1\nASIN: B002\n";
    let records = parse_text_dump_str(content, None);
    assert!(records.is_empty());
}

#[test]
fn test_correctly_spelled_customer_is_not_a_review_line() {
    let content = "Id: 1\nASIN: B003\n    2005-3-14  customer: A1  rating: 5  votes: 1  helpful: 1\n";
    let records = parse_text_dump_str(content, None);
    assert!(records.is_empty());
}

#[test]
fn test_invalid_calendar_date_uses_zero_timestamp() {
    let content = "Id: 1\nASIN: B004\n    2005-2-30  cutomer: A1  rating: 3  votes: 1  helpful: 1\n";
    let records = parse_text_dump_str(content, None);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].timestamp, 0);
}

#[test]
fn test_limit_counts_records_not_blocks() {
    let records = parse_text_dump_str(SAMPLE_DUMP, Some(1));
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].user_id, "A2JW67OY8U6HHK");

    let records = parse_text_dump_str(SAMPLE_DUMP, Some(2));
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].asin, "0827229534");

    let records = parse_text_dump_str(SAMPLE_DUMP, Some(0));
    assert!(records.is_empty());
}

#[test]
fn test_product_block_fields() {
    let body = "\nASIN: 0827229534\r\n  title: Patterns of Preaching\r\n   |Books[283155]|Subjects[1000]\r\n";
    let block = ProductBlock::parse(body).unwrap();

    assert_eq!(block.asin, "0827229534");
    assert_eq!(block.title, "Patterns of Preaching");
    assert_eq!(block.main_category, "Books");
}

#[test]
fn test_invalid_utf8_in_file_is_tolerated() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"Id: 1\nASIN: B005\n  title: caf\xe9\n    2005-3-14  cutomer: A1  rating: 2  votes: 1  helpful: 0\n")
        .unwrap();

    let records = parse_text_dump(file.path(), None).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].rating, Some(2.0));
}

#[test]
fn test_invalid_byte_inside_identifier_is_dropped() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"Id: 1\nASIN: B0\xff01\n    2005-3-14  cutomer: A\xfe1  rating: 4  votes: 1  helpful: 0\n")
        .unwrap();

    let records = parse_text_dump(file.path(), None).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].asin, "B001");
    assert_eq!(records[0].user_id, "A1");
}

#[test]
fn test_skipped_blocks_are_counted() {
    let file = write_dump(SAMPLE_DUMP);
    let (records, stats) = parse_text_dump_with_stats(file.path(), None).unwrap();

    assert_eq!(records.len(), 3);
    // Block 0 is a discontinued product with an ASIN but no reviews; nothing skipped
    assert_eq!(stats.skipped(), 0);

    let file = write_dump("Id: 1\n  title: orphan\nId: 2\nASIN: B002\n");
    let (records, stats) = parse_text_dump_with_stats(file.path(), None).unwrap();
    assert!(records.is_empty());
    assert_eq!(stats.skipped(), 1);
}

#[test]
fn test_missing_file_is_an_error() {
    assert!(parse_text_dump("/nonexistent/amazon-meta.txt", None).is_err());
}

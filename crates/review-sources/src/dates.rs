use chrono::{Duration, FixedOffset, Local, LocalResult, NaiveDate, NaiveDateTime};

/// Epoch milliseconds of local midnight on `date`.
///
/// When a DST change skips midnight, the offset in force just before the
/// change is applied, so the result lands inside the gap's first hour.
pub fn local_midnight_millis(date: NaiveDate) -> Option<i64> {
    let midnight = date.and_hms_opt(0, 0, 0)?;
    match midnight.and_local_timezone(Local) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => Some(dt.timestamp_millis()),
        LocalResult::None => {
            let day_before = midnight.checked_sub_signed(Duration::days(1))?;
            let earlier = day_before.and_local_timezone(Local).earliest()?;
            Some(millis_at_offset(midnight, *earlier.offset()))
        }
    }
}

/// Epoch milliseconds of wall-clock `local` read at a fixed `offset`.
fn millis_at_offset(local: NaiveDateTime, offset: FixedOffset) -> i64 {
    local.and_utc().timestamp_millis() - i64::from(offset.local_minus_utc()) * 1000
}

/// Parse `value` with a chrono `format` and convert to local-midnight millis.
pub fn parse_local_date_millis(value: &str, format: &str) -> Option<i64> {
    NaiveDate::parse_from_str(value.trim(), format)
        .ok()
        .and_then(local_midnight_millis)
}

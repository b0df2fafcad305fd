/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Lowercase three-letter English month abbreviation ("jan".."dec")
pub fn month_abbrev(date: chrono::NaiveDate) -> String {
    date.format("%b").to_string().to_lowercase()
}

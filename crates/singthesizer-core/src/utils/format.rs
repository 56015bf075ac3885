use chrono::{DateTime, Local, Utc};

/// Format a timestamp for list rows, e.g. "Mar 4, 2025"
pub fn format_date_short(date: &DateTime<Utc>) -> String {
    date.with_timezone(&Local).format("%b %-d, %Y").to_string()
}

/// Format a timestamp for detail views, e.g. "March 4, 2025 at 09:30 PM"
pub fn format_date_long(date: &DateTime<Utc>) -> String {
    date.with_timezone(&Local)
        .format("%B %-d, %Y at %I:%M %p")
        .to_string()
}

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello", 10), "Hello");
        assert_eq!(truncate("Hello World", 8), "Hello...");
        assert_eq!(truncate("Hi", 2), "Hi");
        assert_eq!(truncate("Synthwave", 3), "Syn");
    }

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate("Sérénade nocturne", 8), "Sérén...");
    }

    #[test]
    fn test_format_dates_include_year() {
        // Midday UTC stays on the same calendar day in every timezone offset
        let date = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();
        assert!(format_date_short(&date).ends_with(", 2025"));
        assert!(format_date_long(&date).contains("2025 at "));
    }
}

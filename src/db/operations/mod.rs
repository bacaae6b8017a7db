pub mod users;
pub mod words;

use chrono::{DateTime, SecondsFormat, Utc};

/// Timestamps are stored as fixed-width RFC 3339 text so that lexicographic
/// column order matches chronological order.
pub(crate) fn format_timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn parse_timestamp(column: &str, raw: &str) -> Result<DateTime<Utc>, sqlx::Error> {
    DateTime::parse_from_rfc3339(raw)
        .map(|value| value.with_timezone(&Utc))
        .map_err(|err| sqlx::Error::ColumnDecode {
            index: column.to_string(),
            source: format!("invalid timestamp {raw:?}: {err}").into(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_round_trip() {
        // Storage precision is microseconds, so compare formatted values.
        let stored = format_timestamp(Utc::now());
        let parsed = parse_timestamp("created_at", &stored).unwrap();
        assert_eq!(format_timestamp(parsed), stored);
    }

    #[test]
    fn test_timestamp_order_matches_text_order() {
        let earlier = Utc::now();
        let later = earlier + chrono::Duration::microseconds(1);
        assert!(format_timestamp(earlier) < format_timestamp(later));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_timestamp("created_at", "yesterday").is_err());
    }
}

//! Backend timestamp parsing.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::model::ConversationError;

/// Parse a backend timestamp into a UTC instant.
///
/// Accepted, in order: RFC 3339 with any offset, chrono's `DateTime<Utc>`
/// string forms (space separator allowed), a naive date-time taken as UTC,
/// and a bare date taken as UTC midnight. Anything else is
/// [`ConversationError::MalformedTimestamp`].
pub fn parse_instant(raw: &str, field: &'static str) -> Result<DateTime<Utc>, ConversationError> {
    let trimmed = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = trimmed.parse::<DateTime<Utc>>() {
        return Ok(dt);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date.and_time(chrono::NaiveTime::MIN).and_utc());
    }

    Err(ConversationError::MalformedTimestamp {
        field,
        raw: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn accepted_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        for raw in [
            "2024-01-02T03:04:05Z",
            "2024-01-02T03:04:05.000Z",
            "2024-01-02T05:04:05+02:00",
            "2024-01-02 03:04:05Z",
            "2024-01-02T03:04:05",
        ] {
            assert_eq!(parse_instant(raw, "t").unwrap(), expected, "format: {raw}");
        }
    }

    #[test]
    fn surrealdb_nanosecond_precision() {
        let dt = parse_instant("2024-05-01T10:20:30.123456789Z", "t").unwrap();
        assert_eq!(dt.timestamp_subsec_nanos(), 123_456_789);
    }

    #[test]
    fn bare_date_is_utc_midnight() {
        assert_eq!(
            parse_instant("1970-01-01", "t").unwrap(),
            DateTime::UNIX_EPOCH
        );
    }

    #[test]
    fn garbage_is_rejected_with_field_name() {
        let err = parse_instant("last tuesday", "modified_time").unwrap_err();
        match err {
            ConversationError::MalformedTimestamp { field, raw } => {
                assert_eq!(field, "modified_time");
                assert_eq!(raw, "last tuesday");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_string_is_rejected() {
        assert!(parse_instant("", "start_time").is_err());
    }
}

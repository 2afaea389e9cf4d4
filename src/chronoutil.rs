use chrono::{format::ParseResult, DateTime, NaiveDateTime, Utc};

/// ISO 8601 basic format used by SigV4 timestamps: `YYYYMMDD'T'HHMMSS'Z'`.
pub(crate) const ISO8601_COMPACT_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Length of the date portion of a SigV4 timestamp.
pub(crate) const DATE_LEN: usize = 8;

/// Parse a timestamp in the compact ISO 8601 form SigV4 uses, e.g. `20150830T123600Z`.
pub trait ParseISO8601Compact<T> {
    /// Parse `s`, which must be exactly `YYYYMMDD'T'HHMMSS'Z'`.
    fn parse_from_iso8601_compact(s: &str) -> ParseResult<T>;
}

impl ParseISO8601Compact<DateTime<Utc>> for DateTime<Utc> {
    fn parse_from_iso8601_compact(s: &str) -> ParseResult<DateTime<Utc>> {
        NaiveDateTime::parse_from_str(s, ISO8601_COMPACT_FORMAT).map(|naive| naive.and_utc())
    }
}

/// Format a timestamp the way SigV4 expects it.
pub(crate) fn format_iso8601_compact(timestamp: &DateTime<Utc>) -> String {
    timestamp.format(ISO8601_COMPACT_FORMAT).to_string()
}

/// The `YYYYMMDD` date portion of a timestamp, or the whole timestamp if it is shorter than that.
pub(crate) fn date_part(timestamp: &str) -> &str {
    timestamp.get(..DATE_LEN).unwrap_or(timestamp)
}

#[cfg(test)]
mod tests {
    use {
        super::{date_part, format_iso8601_compact, ParseISO8601Compact},
        chrono::{DateTime, NaiveDate, Utc},
    };

    #[test_log::test]
    fn round_trip() {
        let dt = NaiveDate::from_ymd_opt(2015, 8, 30).unwrap().and_hms_opt(12, 36, 0).unwrap().and_utc();
        assert_eq!(format_iso8601_compact(&dt), "20150830T123600Z");
        assert_eq!(DateTime::<Utc>::parse_from_iso8601_compact("20150830T123600Z").unwrap(), dt);
    }

    #[test_log::test]
    fn rejects_other_formats() {
        assert!(DateTime::<Utc>::parse_from_iso8601_compact("2015-08-30T12:36:00Z").is_err());
        assert!(DateTime::<Utc>::parse_from_iso8601_compact("20150830T123600").is_err());
        assert!(DateTime::<Utc>::parse_from_iso8601_compact("20151330T123600Z").is_err());
        assert!(DateTime::<Utc>::parse_from_iso8601_compact("").is_err());
    }

    #[test_log::test]
    fn date_portion() {
        assert_eq!(date_part("20150830T123600Z"), "20150830");
        assert_eq!(date_part("2015"), "2015");
        assert_eq!(date_part(""), "");
    }
}

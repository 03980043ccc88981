//! Wire format of `orderedAt`: seconds precision with a numeric UTC offset,
//! e.g. `2006-01-02T15:04:05-07:00`. Input may carry fractional seconds.

use chrono::{DateTime, ParseError, Utc};
use serde::{Deserialize, Deserializer, Serializer};

pub const LAYOUT: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// `LAYOUT` with an optional `.fraction` after the seconds.
const PARSE_LAYOUT: &str = "%Y-%m-%dT%H:%M:%S%.f%:z";

pub fn parse(value: &str) -> Result<DateTime<Utc>, ParseError> {
    DateTime::parse_from_str(value, PARSE_LAYOUT).map(|t| t.with_timezone(&Utc))
}

pub fn format(value: &DateTime<Utc>) -> String {
    value.format(LAYOUT).to_string()
}

pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(value))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn parses_numeric_offset_into_utc() {
        let parsed = parse("2006-01-02T15:04:05-07:00").expect("valid layout");
        let expected = Utc
            .with_ymd_and_hms(2006, 1, 2, 22, 4, 5)
            .single()
            .expect("valid timestamp");
        assert_eq!(parsed, expected);
    }

    #[test]
    fn accepts_fractional_seconds() {
        let parsed = parse("2006-01-02T15:04:05.5-07:00").expect("fraction allowed");

        assert_eq!(parsed.timestamp_subsec_millis(), 500);
        assert_eq!(format(&parsed), "2006-01-02T22:04:05+00:00");
    }

    #[test]
    fn formats_with_colon_offset() {
        let t = Utc
            .with_ymd_and_hms(2024, 5, 1, 9, 30, 0)
            .single()
            .expect("valid timestamp");
        assert_eq!(format(&t), "2024-05-01T09:30:00+00:00");
    }

    #[test]
    fn rejects_other_layouts() {
        assert!(parse("2024-05-01 09:30:00").is_err());
        assert!(parse("2024-05-01T09:30:00").is_err());
        assert!(parse("not a date").is_err());
    }

    #[test]
    fn formatted_value_parses_back() {
        let t = parse("2024-12-31T23:59:59+05:30").expect("valid layout");
        assert_eq!(parse(&format(&t)).expect("reparse"), t);
    }
}

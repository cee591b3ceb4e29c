//! Wall-clock <-> wire timestamp conversion
//!
//! The admin server stores the operator's local wall-clock digits and tags them
//! with `Z`. The `Z` is a formatting artifact, not a UTC designator: encoding
//! formats the *local* naive time and appends `Z`, decoding reads the digits
//! back without applying any offset. Converting through real UTC here would
//! shift every query window by the local offset.

use chrono::{DateTime, Duration, Local, NaiveDateTime};

/// `YYYY-MM-DDTHH:mm:ss.sssZ`
pub const WIRE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";
/// Value format of `<input type="datetime-local">`
pub const INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M";
/// Human display format used in tables
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimeCodecError {
    #[error("unrecognised timestamp: {0:?}")]
    Unparseable(String),
}

/// Current local wall-clock instant
pub fn now_local() -> NaiveDateTime {
    Local::now().naive_local()
}

pub fn encode(instant: NaiveDateTime) -> String {
    instant.format(WIRE_FORMAT).to_string()
}

/// Read wire digits back as a naive wall-clock instant.
///
/// Accepts the wire format with any fractional precision (or none), the
/// minute-precision `datetime-local` value, and RFC 3339 with an explicit
/// offset, whose written digits are kept as-is.
pub fn decode(raw: &str) -> Result<NaiveDateTime, TimeCodecError> {
    let trimmed = raw.trim();
    let digits = trimmed
        .strip_suffix('Z')
        .or_else(|| trimmed.strip_suffix('z'))
        .unwrap_or(trimmed);

    if let Ok(parsed) = digits.parse::<NaiveDateTime>() {
        return Ok(parsed);
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(digits, INPUT_FORMAT) {
        return Ok(parsed);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.naive_local())
        .map_err(|_| TimeCodecError::Unparseable(raw.to_string()))
}

pub fn to_input_value(instant: NaiveDateTime) -> String {
    instant.format(INPUT_FORMAT).to_string()
}

/// `YYYY-MM-DD HH:MM:SS` of the wire digits, `-` when absent, raw text when unparseable
pub fn display(raw: Option<&str>) -> String {
    match raw.map(str::trim).filter(|value| !value.is_empty()) {
        None => "-".to_string(),
        Some(value) => decode(value)
            .map(|instant| instant.format(DISPLAY_FORMAT).to_string())
            .unwrap_or_else(|_| value.to_string()),
    }
}

pub fn elapsed_ms(start: NaiveDateTime, end: NaiveDateTime) -> i64 {
    (end - start).num_milliseconds()
}

/// A closed wall-clock window, `from <= to`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub from: NaiveDateTime,
    pub to: NaiveDateTime,
}

impl TimeRange {
    pub fn ending_at(to: NaiveDateTime, span: Duration) -> Self {
        Self { from: to - span, to }
    }

    pub fn encode(&self) -> WireRange {
        WireRange {
            from: encode(self.from),
            to: encode(self.to),
        }
    }
}

/// Both window endpoints already encoded for the query string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireRange {
    pub from: String,
    pub to: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32, ms: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_milli_opt(h, m, s, ms)
            .unwrap()
    }

    #[test]
    fn test_encode_keeps_local_digits() {
        assert_eq!(encode(at(23, 5, 7, 42)), "2024-03-09T23:05:07.042Z");
        assert_eq!(encode(at(0, 0, 0, 0)), "2024-03-09T00:00:00.000Z");
    }

    #[test]
    fn test_decode_is_offset_free() {
        let decoded = decode("2024-03-09T23:05:07.042Z").unwrap();
        assert_eq!(decoded, at(23, 5, 7, 42));
        assert_eq!(encode(decoded), "2024-03-09T23:05:07.042Z");
    }

    #[test]
    fn test_decode_accepts_server_variants() {
        assert_eq!(decode("2024-03-09T23:05:07Z").unwrap(), at(23, 5, 7, 0));
        assert_eq!(
            decode("2024-03-09T23:05:07.042123Z").unwrap(),
            at(23, 5, 7, 42) + Duration::microseconds(123)
        );
        assert_eq!(decode("2024-03-09T23:05").unwrap(), at(23, 5, 0, 0));
        assert_eq!(decode("2024-03-09T23:05:07.042+09:00").unwrap(), at(23, 5, 7, 42));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert_eq!(
            decode("yesterday"),
            Err(TimeCodecError::Unparseable("yesterday".to_string()))
        );
    }

    #[test]
    fn test_display_uses_wire_digits() {
        assert_eq!(display(Some("2024-03-09T23:05:07.042Z")), "2024-03-09 23:05:07");
        assert_eq!(display(None), "-");
        assert_eq!(display(Some("  ")), "-");
        assert_eq!(display(Some("n/a")), "n/a");
    }

    #[test]
    fn test_time_range_encodes_both_ends() {
        let range = TimeRange::ending_at(at(12, 0, 0, 0), Duration::hours(24));
        let wire = range.encode();
        assert_eq!(wire.from, "2024-03-08T12:00:00.000Z");
        assert_eq!(wire.to, "2024-03-09T12:00:00.000Z");
    }

    #[test]
    fn test_elapsed_ms() {
        assert_eq!(elapsed_ms(at(1, 0, 0, 0), at(1, 0, 1, 250)), 1_250);
        assert_eq!(elapsed_ms(at(1, 0, 1, 0), at(1, 0, 0, 0)), -1_000);
    }
}

//! # Time Codec
//!
//! Conversion between integer seconds and the two display shapes used on a
//! timeline:
//!
//! - **short**: `MM:SS` (minutes may exceed 59 when written by hand, e.g. `83:45`)
//! - **long**: `HH:MM:SS`
//!
//! Components are not bounds-checked: `1:75` parses to 135 seconds. Only the
//! number of components and their numeric-ness are validated.

use thiserror::Error;

/// Regex fragment matching a timestamp-shaped token.
///
/// Shared by the record-start pattern in [`crate::parsing`] and the inline
/// scanner so that both recognise exactly the same shapes.
pub const TIMESTAMP_PATTERN: &str = r"\d{1,2}:\d{2}(?::\d{2})?";

pub const SECONDS_PER_MINUTE: u64 = 60;
pub const SECONDS_PER_HOUR: u64 = 3600;

/// A token could not be interpreted as a timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("expected 2 or 3 colon-separated components in {text:?}, found {found}")]
    ComponentCount { text: String, found: usize },

    #[error("component {component:?} of {text:?} is not a number")]
    NotNumeric { text: String, component: String },

    #[error("timestamp {text:?} does not fit in the seconds range")]
    Overflow { text: String },
}

/// Parses `M:SS`, `MM:SS`, `H:MM:SS` or `HH:MM:SS` into seconds.
///
/// Each component is trimmed and parsed independently. Anything other than two
/// or three all-digit components is a [`FormatError`].
///
/// ```
/// use vidstamp_engine::time::parse_time;
/// assert_eq!(parse_time("1:05"), Ok(65));
/// assert_eq!(parse_time("1:02:03"), Ok(3723));
/// assert!(parse_time("123").is_err());
/// ```
pub fn parse_time(text: &str) -> Result<u64, FormatError> {
    let components = text
        .split(':')
        .map(|component| parse_component(text, component.trim()))
        .collect::<Result<Vec<_>, _>>();

    // Report a wrong shape before complaining about individual numbers.
    let found = text.split(':').count();
    if found != 2 && found != 3 {
        return Err(FormatError::ComponentCount {
            text: text.to_string(),
            found,
        });
    }

    let overflow = || FormatError::Overflow {
        text: text.to_string(),
    };

    match components?.as_slice() {
        [minutes, seconds] => minutes
            .checked_mul(SECONDS_PER_MINUTE)
            .and_then(|m| m.checked_add(*seconds))
            .ok_or_else(overflow),
        [hours, minutes, seconds] => hours
            .checked_mul(SECONDS_PER_HOUR)
            .and_then(|h| h.checked_add(minutes.checked_mul(SECONDS_PER_MINUTE)?))
            .and_then(|hm| hm.checked_add(*seconds))
            .ok_or_else(overflow),
        other => Err(FormatError::ComponentCount {
            text: text.to_string(),
            found: other.len(),
        }),
    }
}

fn parse_component(text: &str, component: &str) -> Result<u64, FormatError> {
    let not_numeric = || FormatError::NotNumeric {
        text: text.to_string(),
        component: component.to_string(),
    };

    // `u64::from_str` tolerates a leading `+`; timestamps never carry one.
    if component.is_empty() || !component.bytes().all(|b| b.is_ascii_digit()) {
        return Err(not_numeric());
    }

    component.parse::<u64>().map_err(|_| FormatError::Overflow {
        text: text.to_string(),
    })
}

/// Formats seconds for display.
///
/// Produces `HH:MM:SS` when `force_long` is set or the value reaches an hour,
/// otherwise `MM:SS`. Every field is zero-padded to two digits.
///
/// ```
/// use vidstamp_engine::time::format_time;
/// assert_eq!(format_time(65, false), "01:05");
/// assert_eq!(format_time(65, true), "00:01:05");
/// assert_eq!(format_time(3723, false), "01:02:03");
/// ```
pub fn format_time(seconds: u64, force_long: bool) -> String {
    let hours = seconds / SECONDS_PER_HOUR;
    let minutes = (seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
    let secs = seconds % SECONDS_PER_MINUTE;

    if force_long || hours > 0 {
        format!("{hours:02}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes:02}:{secs:02}")
    }
}

/// True when `text` is written with an hour field (three components).
pub fn has_hour_field(text: &str) -> bool {
    text.split(':').count() == 3
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("0:00", 0)]
    #[case("1:5", 65)]
    #[case("01:05", 65)]
    #[case("59:59", 3599)]
    #[case("83:45", 5025)]
    #[case("1:23:45", 5025)]
    #[case("00:01:30", 90)]
    #[case("10:00:00", 36000)]
    #[case(" 1 : 30 ", 90)]
    fn parses_valid_shapes(#[case] text: &str, #[case] expected: u64) {
        assert_eq!(parse_time(text), Ok(expected));
    }

    #[test]
    fn out_of_range_components_are_accepted_arithmetically() {
        assert_eq!(parse_time("1:75"), Ok(135));
        assert_eq!(parse_time("99:99:99"), Ok(99 * 3600 + 99 * 60 + 99));
    }

    #[rstest]
    #[case("123", 1)]
    #[case("1:2:3:4", 4)]
    #[case("", 1)]
    fn rejects_wrong_component_count(#[case] text: &str, #[case] found: usize) {
        assert_eq!(
            parse_time(text),
            Err(FormatError::ComponentCount {
                text: text.to_string(),
                found
            })
        );
    }

    #[rstest]
    #[case("bad:line")]
    #[case("1:")]
    #[case("+1:30")]
    #[case("-1:30")]
    #[case("1:3a")]
    fn rejects_non_numeric_components(#[case] text: &str) {
        assert!(matches!(
            parse_time(text),
            Err(FormatError::NotNumeric { .. })
        ));
    }

    #[test]
    fn rejects_overflow_instead_of_wrapping() {
        assert!(matches!(
            parse_time("99999999999999999999:00"),
            Err(FormatError::Overflow { .. })
        ));
        assert!(matches!(
            parse_time("9999999999999999:00:00"),
            Err(FormatError::Overflow { .. })
        ));
    }

    #[rstest]
    #[case(0, false, "00:00")]
    #[case(5, false, "00:05")]
    #[case(65, false, "01:05")]
    #[case(3599, false, "59:59")]
    #[case(3600, false, "01:00:00")]
    #[case(5, true, "00:00:05")]
    #[case(3723, true, "01:02:03")]
    #[case(360_000, false, "100:00:00")]
    fn formats_seconds(#[case] seconds: u64, #[case] force_long: bool, #[case] expected: &str) {
        assert_eq!(format_time(seconds, force_long), expected);
    }

    #[test]
    fn hour_values_always_get_an_hour_field() {
        for t in (3600..20_000).step_by(37) {
            let formatted = format_time(t, false);
            assert!(formatted.len() >= 8, "{formatted}");
            assert_eq!(formatted.matches(':').count(), 2, "{formatted}");
        }
    }

    #[rstest]
    #[case("1:5", false, "01:05")]
    #[case("1:5", true, "00:01:05")]
    #[case("0:05", true, "00:00:05")]
    #[case("1:02:03", false, "01:02:03")]
    #[case("00:01:30", false, "01:30")]
    fn format_after_parse_normalizes(
        #[case] text: &str,
        #[case] force_long: bool,
        #[case] expected: &str,
    ) {
        let seconds = parse_time(text).unwrap();
        assert_eq!(format_time(seconds, force_long), expected);
    }

    #[test]
    fn detects_hour_field() {
        assert!(has_hour_field("0:01:30"));
        assert!(has_hour_field("00:01:30"));
        assert!(!has_hour_field("01:30"));
    }
}

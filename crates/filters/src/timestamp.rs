//! Resolution of date operands to Unix epoch seconds.
//!
//! Absolute dates without an explicit offset are interpreted in the local
//! offset of the process, falling back to UTC when it cannot be determined
//! (for example on Unix hosts running multiple threads).

use std::sync::OnceLock;

use regex::Regex;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, Duration, OffsetDateTime, PrimitiveDateTime, UtcOffset};

use crate::FilterError;

/// Numeric operands up to this value, negative ones included, are offsets
/// relative to now.
pub const RELATIVE_SECONDS_LIMIT: i64 = 31_557_600;

const DAY: i64 = 86_400;

/// Resolves `text` to Unix epoch seconds relative to the current time.
///
/// Accepted forms:
///
/// - integer epoch seconds (values up to one year, and every negative value,
///   are offsets from now)
/// - `now`, `today`, `yesterday`, `tomorrow`
/// - `+N unit`, `-N unit`, `N unit ago` for seconds, minutes, hours, days, weeks
/// - RFC 3339, `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS`, `YYYY-MM-DD HH:MM`,
///   and `YYYY-MM-DD`
///
/// # Examples
///
/// ```
/// use filters::parse_timestamp;
///
/// assert_eq!(parse_timestamp("1700000000").unwrap(), 1_700_000_000);
/// assert_eq!(parse_timestamp("2001-09-09T01:46:40Z").unwrap(), 1_000_000_000);
/// assert!(parse_timestamp("not a date").is_err());
/// ```
pub fn parse_timestamp(text: &str) -> Result<i64, FilterError> {
    parse_timestamp_at(text, OffsetDateTime::now_utc(), local_offset())
}

/// Resolves `text` against an explicit clock and local offset.
pub fn parse_timestamp_at(
    text: &str,
    now: OffsetDateTime,
    offset: UtcOffset,
) -> Result<i64, FilterError> {
    let trimmed = text.trim();
    let invalid = || FilterError::InvalidDate(text.to_owned());
    if trimmed.is_empty() {
        return Err(invalid());
    }

    if let Ok(number) = trimmed.parse::<i64>() {
        return if number <= RELATIVE_SECONDS_LIMIT {
            Ok(now.unix_timestamp() + number)
        } else {
            Ok(number)
        };
    }

    let lowered = trimmed.to_ascii_lowercase();
    let midnight = now.to_offset(offset).date().midnight().assume_offset(offset);
    match lowered.as_str() {
        "now" => return Ok(now.unix_timestamp()),
        "today" => return Ok(midnight.unix_timestamp()),
        "yesterday" => return Ok(midnight.unix_timestamp() - DAY),
        "tomorrow" => return Ok(midnight.unix_timestamp() + DAY),
        _ => {}
    }

    if let Some(delta) = relative_offset(&lowered) {
        let delta = delta.ok_or_else(invalid)?;
        return now
            .checked_add(delta)
            .map(OffsetDateTime::unix_timestamp)
            .ok_or_else(invalid);
    }

    absolute(trimmed, offset).ok_or_else(invalid)
}

fn local_offset() -> UtcOffset {
    UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC)
}

fn relative_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([+-]?)\s*(\d+)\s*(sec|second|min|minute|hour|day|week)s?(\s+ago)?$")
            .expect("valid regex")
    })
}

/// Returns `None` when `text` is not a relative phrase, `Some(None)` when it
/// is one but the amount overflows.
fn relative_offset(text: &str) -> Option<Option<Duration>> {
    let captures = relative_pattern().captures(text)?;
    let amount = captures[2].parse::<i64>().ok();
    let unit = match &captures[3] {
        "sec" | "second" => 1,
        "min" | "minute" => 60,
        "hour" => 3_600,
        "day" => DAY,
        _ => 7 * DAY,
    };
    let negative = &captures[1] == "-" || captures.get(4).is_some();

    Some(amount.and_then(|amount| amount.checked_mul(unit)).map(|seconds| {
        if negative {
            Duration::seconds(-seconds)
        } else {
            Duration::seconds(seconds)
        }
    }))
}

fn absolute(text: &str, offset: UtcOffset) -> Option<i64> {
    if let Ok(parsed) = OffsetDateTime::parse(text, &Rfc3339) {
        return Some(parsed.unix_timestamp());
    }

    let with_seconds = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    let iso_seconds = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
    let with_minutes = format_description!("[year]-[month]-[day] [hour]:[minute]");
    for format in [with_seconds, iso_seconds, with_minutes] {
        if let Ok(parsed) = PrimitiveDateTime::parse(text, &format) {
            return Some(parsed.assume_offset(offset).unix_timestamp());
        }
    }

    let date_only = format_description!("[year]-[month]-[day]");
    Date::parse(text, &date_only)
        .ok()
        .map(|date| date.midnight().assume_offset(offset).unix_timestamp())
}

//! Helpers for turning the platform's UTC timestamp strings into text in the
//! organization's own timezone. The timezone is always passed in; nothing here
//! reads the host locale or zone.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// `Friday, April 4`
pub const HEADLINE_DAY: &str = "%A, %B %-d";
/// `Apr 1, 2025 10:00 AM`
pub const DATE_TIME: &str = "%b %-d, %Y %-I:%M %p";
/// `Apr 01, 2025`
pub const DATE_ONLY: &str = "%b %d, %Y";
/// `10:00 EDT`
pub const TIME_WITH_ZONE: &str = "%H:%M %Z";
/// `Friday, April 4, 2025 10:00 AM`
pub const FULL_DATE_TIME: &str = "%A, %B %-d, %Y %-I:%M %p";

pub fn parse_timezone(name: &str) -> anyhow::Result<Tz> {
    name.parse::<Tz>()
        .map_err(|err| anyhow::anyhow!("unknown timezone {}: {}", name, err))
}

/// Parse an RFC 3339 timestamp. Strings without an offset, and bare dates,
/// are taken as UTC.
pub fn parse_utc(raw: &str) -> anyhow::Result<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }
    anyhow::bail!("timestamp '{}' is not RFC 3339", raw)
}

pub fn format_in_timezone(raw: &str, tz: Tz, fmt: &str) -> anyhow::Result<String> {
    let utc = parse_utc(raw)?;
    Ok(format_utc_in_timezone(utc, tz, fmt))
}

pub fn format_utc_in_timezone(utc: DateTime<Utc>, tz: Tz, fmt: &str) -> String {
    utc.with_timezone(&tz).format(fmt).to_string()
}

/// Like [`format_in_timezone`], but a missing timestamp yields `placeholder`.
pub fn format_optional(raw: Option<&str>, tz: Tz, fmt: &str, placeholder: &str) -> anyhow::Result<String> {
    match raw.map(str::trim).filter(|r| !r.is_empty()) {
        None => Ok(placeholder.to_string()),
        Some(raw) => format_in_timezone(raw, tz, fmt),
    }
}

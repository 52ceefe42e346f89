use std::time::{SystemTime, UNIX_EPOCH};

use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, UtcOffset};

const NANOS_PER_MILLI: i128 = 1_000_000;
const CALENDAR_DATE_LEN: usize = "YYYY-MM-DD".len();

#[must_use]
pub fn unix_timestamp_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| {
            u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
        })
}

/// Renders `YYYY-MM-DDTHH:MM:SS.mmmZ`; out-of-range inputs clamp to the epoch.
#[must_use]
pub fn format_unix_ms(timestamp_unix_ms: u64) -> String {
    let nanos = i128::from(timestamp_unix_ms)
        .checked_mul(NANOS_PER_MILLI)
        .unwrap_or(0);
    let dt = OffsetDateTime::from_unix_timestamp_nanos(nanos)
        .unwrap_or(OffsetDateTime::UNIX_EPOCH)
        .to_offset(UtcOffset::UTC);
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}Z",
        dt.year(),
        u8::from(dt.month()),
        dt.day(),
        dt.hour(),
        dt.minute(),
        dt.second(),
        dt.millisecond()
    )
}

/// Calendar date of a stored timestamp, in UTC.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS` and RFC 3339 forms (`T` or a
/// space between date and time). A timestamp carrying a UTC offset is shifted
/// to UTC first, the same way SQLite's `DATE()` reads it; otherwise only the
/// leading date is read.
#[must_use]
pub fn parse_calendar_date(raw: &str) -> Option<Date> {
    let candidate = raw.trim();
    if let Some(instant) = parse_offset_timestamp(candidate) {
        return Some(instant.to_offset(UtcOffset::UTC).date());
    }
    let prefix = candidate.get(..CALENDAR_DATE_LEN)?;
    Date::parse(prefix, format_description!("[year]-[month]-[day]")).ok()
}

fn parse_offset_timestamp(candidate: &str) -> Option<OffsetDateTime> {
    let normalized = match candidate.as_bytes().get(CALENDAR_DATE_LEN) {
        Some(b' ') => format!(
            "{}T{}",
            &candidate[..CALENDAR_DATE_LEN],
            &candidate[CALENDAR_DATE_LEN + 1..]
        ),
        _ => candidate.to_string(),
    };
    OffsetDateTime::parse(&normalized, &Rfc3339)
        .or_else(|_| {
            OffsetDateTime::parse(
                &normalized,
                format_description!(
                    "[year]-[month]-[day]T[hour]:[minute][offset_hour sign:mandatory]:[offset_minute]"
                ),
            )
        })
        .ok()
}

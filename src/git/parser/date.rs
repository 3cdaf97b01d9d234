//! Date parser for git header dates

use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::{Iso8601, Rfc2822, Rfc3339};
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime, UtcOffset};

/// git's default date format (`--date=default`)
/// Example: `Mon Jan 15 10:30:00 2024 +0100` (day of month is not padded)
const GIT_DEFAULT_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[weekday repr:short] [month repr:short] [day padding:none] [hour]:[minute]:[second] [year] [offset_hour sign:mandatory][offset_minute]"
);

/// `--date=iso` format
/// Example: `2024-01-15 10:30:00 +0100`
const GIT_ISO_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[year]-[month]-[day] [hour]:[minute]:[second] [offset_hour sign:mandatory][offset_minute]"
);

/// `--date=local` drops the offset from the default format
/// Example: `Mon Jan 15 09:30:00 2024`
const GIT_LOCAL_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[weekday repr:short] [month repr:short] [day padding:none] [hour]:[minute]:[second] [year]"
);

/// `--date=short`
/// Example: `2024-01-15`
const GIT_SHORT_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// Offset suffix of `--date=raw`
/// Example: `+0100`
const RAW_OFFSET_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[offset_hour sign:mandatory][offset_minute]");

/// Parse a date as printed in a `git log` header
///
/// Accepts git's default format, `--date=iso`, RFC 2822 (`--date=rfc`),
/// RFC 3339 and ISO 8601 (`--date=iso-strict`), `--date=raw`, and the
/// offset-less `--date=local` and `--date=short`. Dates without an offset
/// are taken as UTC. Returns `None` for anything else.
pub fn parse_git_date(text: &str) -> Option<OffsetDateTime> {
    let text = text.trim();

    OffsetDateTime::parse(text, GIT_DEFAULT_FORMAT)
        .or_else(|_| OffsetDateTime::parse(text, GIT_ISO_FORMAT))
        .or_else(|_| OffsetDateTime::parse(text, &Rfc2822))
        .or_else(|_| OffsetDateTime::parse(text, &Rfc3339))
        .or_else(|_| OffsetDateTime::parse(text, &Iso8601::DEFAULT))
        .ok()
        .or_else(|| parse_raw(text))
        .or_else(|| {
            PrimitiveDateTime::parse(text, GIT_LOCAL_FORMAT)
                .ok()
                .map(PrimitiveDateTime::assume_utc)
        })
        .or_else(|| {
            Date::parse(text, GIT_SHORT_FORMAT)
                .ok()
                .map(|date| date.midnight().assume_utc())
        })
}

/// `--date=raw`: seconds since the epoch, then the author's offset
/// Example: `1705311000 +0100`
fn parse_raw(text: &str) -> Option<OffsetDateTime> {
    let (seconds, offset) = match text.split_once(' ') {
        Some((seconds, offset)) => (seconds, Some(offset.trim())),
        None => (text, None),
    };
    if seconds.is_empty() || !seconds.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let instant = OffsetDateTime::from_unix_timestamp(seconds.parse().ok()?).ok()?;
    match offset {
        Some(offset) => {
            let offset = UtcOffset::parse(offset, RAW_OFFSET_FORMAT).ok()?;
            Some(instant.to_offset(offset))
        }
        None => Some(instant),
    }
}

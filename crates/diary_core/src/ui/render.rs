//! Entry rendering for the browse view.

use crate::model::entry::Entry;
use chrono::{DateTime, TimeZone};
use std::fmt::Display;

/// Long, locale-independent form: `Monday March 04, 2024 09:05PM`.
pub const TIMESTAMP_FORMAT: &str = "%A %B %d, %Y %I:%M%p";

/// Navigation lines shown under each entry.
pub const BROWSE_COMMANDS: [&str; 3] = ["n) next entry", "d) delete entry", "q) return to main menu"];

/// Formats epoch milliseconds in `tz` using [`TIMESTAMP_FORMAT`].
pub fn format_timestamp<Tz>(timestamp_ms: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match DateTime::from_timestamp_millis(timestamp_ms) {
        Some(utc) => utc.with_timezone(tz).format(TIMESTAMP_FORMAT).to_string(),
        None => format!("@{timestamp_ms}ms"),
    }
}

/// Renders one entry with its header, body and the browse commands.
pub fn render_entry<Tz>(entry: &Entry, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let timestamp = format_timestamp(entry.timestamp, tz);
    let rule = "=".repeat(timestamp.chars().count());
    let mut out = format!("{timestamp}\n{rule}\n{}\n\n\n{rule}\n", entry.content.trim_end());
    for line in BROWSE_COMMANDS {
        out.push_str(line);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{format_timestamp, render_entry};
    use crate::model::entry::Entry;
    use chrono::{FixedOffset, Utc};
    use uuid::Uuid;

    #[test]
    fn formats_epoch_in_long_english_form() {
        assert_eq!(format_timestamp(0, &Utc), "Thursday January 01, 1970 12:00AM");
        // 2024-03-04T21:05:00Z
        assert_eq!(
            format_timestamp(1_709_586_300_000, &Utc),
            "Monday March 04, 2024 09:05PM"
        );
    }

    #[test]
    fn formats_in_requested_zone() {
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(
            format_timestamp(1_709_586_300_000, &plus_two),
            "Monday March 04, 2024 11:05PM"
        );
    }

    #[test]
    fn render_underlines_header_and_lists_commands() {
        let entry = Entry::with_timestamp(Uuid::new_v4(), "dear diary\n", 0);
        let rendered = render_entry(&entry, &Utc);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "Thursday January 01, 1970 12:00AM");
        assert_eq!(lines[1], "=".repeat(lines[0].len()));
        assert_eq!(lines[2], "dear diary");
        assert!(rendered.ends_with("n) next entry\nd) delete entry\nq) return to main menu\n"));
    }
}

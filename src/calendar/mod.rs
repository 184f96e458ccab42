// src/calendar/mod.rs

//! iCalendar (RFC 5545) output: one all-day `VEVENT` per release.

use chrono::{DateTime, Days, NaiveDate, Utc};
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::Path,
};
use tracing::info;

use crate::error::ScrapeError;
use crate::schedule::ReleaseEntry;

const PRODID: &str = "-//movie_calendar//Release Schedule//EN";
/// Content lines longer than this many octets are folded.
const FOLD_AT: usize = 75;

/// Calendar-wide settings for rendering.
#[derive(Debug, Clone)]
pub struct CalendarMeta<'a> {
    pub name: &'a str,
    pub source_label: &'a str,
    pub generated_at: DateTime<Utc>,
}

/// Render `entries` as a complete calendar document.
pub fn render(entries: &[ReleaseEntry], meta: &CalendarMeta<'_>) -> String {
    let mut out = String::new();
    let dtstamp = meta.generated_at.format("%Y%m%dT%H%M%SZ").to_string();

    push_line(&mut out, "BEGIN:VCALENDAR");
    push_line(&mut out, "VERSION:2.0");
    push_line(&mut out, &format!("PRODID:{}", PRODID));
    push_line(&mut out, "CALSCALE:GREGORIAN");
    push_line(&mut out, &format!("X-WR-CALNAME:{}", escape_text(meta.name)));

    for entry in entries {
        push_line(&mut out, "BEGIN:VEVENT");
        push_line(&mut out, &format!("UID:{}", escape_text(entry.uid())));
        push_line(&mut out, &format!("DTSTAMP:{}", dtstamp));
        push_line(
            &mut out,
            &format!("DTSTART;VALUE=DATE:{}", ical_date(entry.date())),
        );
        if let Some(end) = entry.date().checked_add_days(Days::new(1)) {
            push_line(&mut out, &format!("DTEND;VALUE=DATE:{}", ical_date(end)));
        }
        push_line(
            &mut out,
            &format!("SUMMARY:{}", escape_text(&entry.display_name())),
        );
        push_line(
            &mut out,
            &format!(
                "DESCRIPTION:{}",
                escape_text(&entry.description(meta.source_label))
            ),
        );
        push_line(&mut out, "TRANSP:TRANSPARENT");
        push_line(&mut out, "END:VEVENT");
    }

    push_line(&mut out, "END:VCALENDAR");
    out
}

/// Render and write the calendar to `path`.
///
/// The text goes to a `.tmp` sibling first and is renamed into place, so an
/// interrupted write never leaves a half-written calendar behind.
pub fn write_calendar(
    path: &Path,
    entries: &[ReleaseEntry],
    meta: &CalendarMeta<'_>,
) -> Result<(), ScrapeError> {
    let text = render(entries, meta);

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| ScrapeError::write(dir, e))?;
    }
    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp = Path::new(&tmp_name);

    let file = File::create(tmp).map_err(|e| ScrapeError::write(tmp, e))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(text.as_bytes())
        .and_then(|_| writer.flush())
        .map_err(|e| ScrapeError::write(tmp, e))?;
    drop(writer);
    fs::rename(tmp, path).map_err(|e| ScrapeError::write(path, e))?;

    info!(path = %path.display(), events = entries.len(), "wrote calendar");
    Ok(())
}

fn ical_date(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// Escape a TEXT value: backslash, semicolon, comma and newlines.
pub fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(ch),
        }
    }
    out
}

/// Append one content line, folded at 75 octets and terminated by CRLF.
/// Folds never split a UTF-8 sequence.
fn push_line(out: &mut String, line: &str) {
    let mut width = 0;
    for ch in line.chars() {
        let len = ch.len_utf8();
        if width + len > FOLD_AT {
            out.push_str("\r\n ");
            // the leading space counts toward the continuation line
            width = 1;
        }
        out.push(ch);
        width += len;
    }
    out.push_str("\r\n");
}

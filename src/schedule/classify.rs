// src/schedule/classify.rs

use once_cell::sync::Lazy;
use regex::Regex;

/// What a single date cell says about the date context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateCell {
    /// "February 2026": a section header
    MonthYearHeader { month: u32, year: i32 },
    /// "February 15"
    MonthDay { month: u32, day: u32 },
    /// "15" or "15th"
    DayOnly(u32),
    /// Blank cell, inherits the carried date
    Empty,
    Unrecognized,
}

/// How a whole row is treated by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Header { month: u32, year: i32 },
    Data,
    /// Too few cells to carry a movie
    Discard,
}

/// Headers with extra decoration ("March, 2026", "May 2026 (tentative)")
/// are only accepted when the cell is shorter than this.
const SHORT_HEADER_LEN: usize = 25;

static ORDINAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d)(?:st|nd|rd|th)\b").expect("ordinal regex"));

static MONTH_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Z][a-z]+)\.?\s+(\d+)$").expect("month-number regex"));

static DAY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{1,2}$").expect("day regex"));

static LEADING_WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Z][a-z]+)\b").expect("leading-word regex"));

static DAY_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{1,2}\b").expect("day-token regex"));

static MONTH_THEN_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Z][a-z]+)\.?\s+\d").expect("month-then-number regex"));

static YEAR_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b((?:19|20)\d{2})\b").expect("year-token regex"));

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Month number (1..=12) for a full or three-letter month name.
pub fn month_from_name(name: &str) -> Option<u32> {
    if name == "Sept" {
        return Some(9);
    }
    MONTHS
        .iter()
        .position(|full| *full == name || (name.len() == 3 && full.starts_with(name)))
        .map(|i| i as u32 + 1)
}

/// Drop ordinal suffixes that are glued to a number ("15th" → "15") and trim.
pub fn normalize_date_text(raw: &str) -> String {
    ORDINAL_RE.replace_all(raw.trim(), "$1").trim().to_string()
}

/// Classify one cell's text.
///
/// Order matters: headers win over month-day whenever the trailing number
/// could not be a day, and a short cell naming a month plus a year-looking
/// token is still a header.
pub fn classify_date(raw: &str) -> DateCell {
    let text = normalize_date_text(raw);
    if text.is_empty() {
        return DateCell::Empty;
    }

    if let Some(caps) = MONTH_NUMBER_RE.captures(&text) {
        let Some(month) = month_from_name(&caps[1]) else {
            return DateCell::Unrecognized;
        };
        let digits = &caps[2];
        if digits.len() >= 3 {
            return match digits.parse::<i32>() {
                Ok(year) if digits.len() == 4 => DateCell::MonthYearHeader { month, year },
                _ => DateCell::Unrecognized,
            };
        }
        return match digits.parse::<u32>() {
            Ok(day) if (1..=31).contains(&day) => DateCell::MonthDay { month, day },
            _ => DateCell::Unrecognized,
        };
    }

    if DAY_RE.is_match(&text) {
        return match text.parse::<u32>() {
            Ok(day) if (1..=31).contains(&day) => DateCell::DayOnly(day),
            _ => DateCell::Unrecognized,
        };
    }

    if let Some(header) = loose_header(&text) {
        return header;
    }

    DateCell::Unrecognized
}

/// "February, 2026" and friends: short, leads with a month, has a year.
/// A full date ("June 5, 2026") is not a header.
fn loose_header(text: &str) -> Option<DateCell> {
    if text.chars().count() >= SHORT_HEADER_LEN || DAY_TOKEN_RE.is_match(text) {
        return None;
    }
    let word = LEADING_WORD_RE.captures(text)?;
    let month = month_from_name(&word[1])?;
    let year = YEAR_TOKEN_RE.captures(text)?[1].parse().ok()?;
    Some(DateCell::MonthYearHeader { month, year })
}

/// True for text that names a month followed by a number, such as a date
/// in a layout [`classify_date`] does not read ("June 5, 2026", "May 5-7").
/// Titles that merely start with a month word ("May December") are not
/// dates.
pub fn looks_like_date(raw: &str) -> bool {
    let text = normalize_date_text(raw);
    MONTH_THEN_NUMBER_RE
        .captures(&text)
        .and_then(|caps| month_from_name(&caps[1]))
        .is_some()
}

/// Decide whether a row is a section header, a data row, or unusable.
pub fn classify_row<S: AsRef<str>>(cells: &[S]) -> RowKind {
    let first = cells.first().map(|c| classify_date(c.as_ref()));

    if let Some(DateCell::MonthYearHeader { month, year }) = first {
        return RowKind::Header { month, year };
    }

    // a stated day in the first cell means the rest is movie data, even if
    // the title happens to look like a year ("March 3" | "2012")
    let first_is_day = matches!(
        first,
        Some(DateCell::MonthDay { .. } | DateCell::DayOnly(_))
    );
    if cells.len() < 3 && !first_is_day {
        let joined = cells
            .iter()
            .map(|c| c.as_ref().trim())
            .filter(|c| !c.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if let DateCell::MonthYearHeader { month, year } = classify_date(&joined) {
            return RowKind::Header { month, year };
        }
    }

    if cells.len() < 2 {
        return RowKind::Discard;
    }
    RowKind::Data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_year_header() {
        assert_eq!(
            classify_date("February 2026"),
            DateCell::MonthYearHeader {
                month: 2,
                year: 2026
            }
        );
        assert_eq!(
            classify_date("  Dec 2025 "),
            DateCell::MonthYearHeader {
                month: 12,
                year: 2025
            }
        );
    }

    #[test]
    fn month_day_with_and_without_ordinal() {
        assert_eq!(
            classify_date("February 15"),
            DateCell::MonthDay { month: 2, day: 15 }
        );
        assert_eq!(
            classify_date("Aug 1st"),
            DateCell::MonthDay { month: 8, day: 1 }
        );
        assert_eq!(
            classify_date("Sept. 22nd"),
            DateCell::MonthDay { month: 9, day: 22 }
        );
    }

    #[test]
    fn august_is_not_mangled_by_suffix_stripping() {
        // "st" inside the month name must survive
        assert_eq!(
            classify_date("August 3rd"),
            DateCell::MonthDay { month: 8, day: 3 }
        );
    }

    #[test]
    fn ordinals_strip_for_every_day() {
        for day in 1..=31u32 {
            let suffix = match (day % 10, day % 100) {
                (_, 11..=13) => "th",
                (1, _) => "st",
                (2, _) => "nd",
                (3, _) => "rd",
                _ => "th",
            };
            let text = format!("{day}{suffix}");
            assert_eq!(classify_date(&text), DateCell::DayOnly(day), "{text}");
            assert_eq!(normalize_date_text(&text), day.to_string());
        }
    }

    #[test]
    fn day_only_bounds() {
        assert_eq!(classify_date("15"), DateCell::DayOnly(15));
        assert_eq!(classify_date("0"), DateCell::Unrecognized);
        assert_eq!(classify_date("32"), DateCell::Unrecognized);
        assert_eq!(classify_date("March 40"), DateCell::Unrecognized);
    }

    #[test]
    fn empty_and_unrecognized() {
        assert_eq!(classify_date(""), DateCell::Empty);
        assert_eq!(classify_date("   \u{a0} "), DateCell::Empty);
        assert_eq!(classify_date("Movie B"), DateCell::Unrecognized);
        assert_eq!(classify_date("TBD"), DateCell::Unrecognized);
        assert_eq!(classify_date("Smarch 12"), DateCell::Unrecognized);
    }

    #[test]
    fn long_numbers_prefer_header() {
        assert_eq!(classify_date("February 202"), DateCell::Unrecognized);
        assert_eq!(
            classify_date("February 2020"),
            DateCell::MonthYearHeader {
                month: 2,
                year: 2020
            }
        );
        assert_eq!(
            classify_date("February 20"),
            DateCell::MonthDay { month: 2, day: 20 }
        );
    }

    #[test]
    fn decorated_short_header() {
        assert_eq!(
            classify_date("March, 2026"),
            DateCell::MonthYearHeader {
                month: 3,
                year: 2026
            }
        );
        assert_eq!(
            classify_date("May 2026 (tentative)"),
            DateCell::MonthYearHeader { month: 5, year: 2026 }
        );
        // too long to be a header
        assert_eq!(
            classify_date("May the Fourth Be With You 2026"),
            DateCell::Unrecognized
        );
    }

    #[test]
    fn full_date_is_not_a_header() {
        assert_eq!(classify_date("June 5, 2026"), DateCell::Unrecognized);
        assert_eq!(classify_date("June 5th, 2026"), DateCell::Unrecognized);
        assert_eq!(
            classify_row(&["June 5, 2026", "Movie Z", "Studio Z"]),
            RowKind::Data
        );
    }

    #[test]
    fn date_like_text() {
        assert!(looks_like_date("June 5, 2026"));
        assert!(looks_like_date("May 5-7"));
        assert!(!looks_like_date("May December"));
        assert!(!looks_like_date("Movie B"));
        assert!(!looks_like_date("10 Cloverfield Lane"));
    }

    #[test]
    fn month_names() {
        assert_eq!(month_from_name("January"), Some(1));
        assert_eq!(month_from_name("Jan"), Some(1));
        assert_eq!(month_from_name("Sep"), Some(9));
        assert_eq!(month_from_name("Sept"), Some(9));
        assert_eq!(month_from_name("jan"), None);
        assert_eq!(month_from_name("Ja"), None);
        assert_eq!(month_from_name("Janu"), None);
    }

    #[test]
    fn header_rows_in_both_shapes() {
        assert_eq!(
            classify_row(&["February 2026"]),
            RowKind::Header {
                month: 2,
                year: 2026
            }
        );
        assert_eq!(
            classify_row(&["February", "2026"]),
            RowKind::Header {
                month: 2,
                year: 2026
            }
        );
        assert_eq!(
            classify_row(&["March 2026", "", "", ""]),
            RowKind::Header {
                month: 3,
                year: 2026
            }
        );
    }

    #[test]
    fn data_and_discard_rows() {
        assert_eq!(classify_row(&["15", "Movie A", "Studio X"]), RowKind::Data);
        assert_eq!(classify_row(&["20", "Movie C"]), RowKind::Data);
        assert_eq!(classify_row(&["March 3", "2012"]), RowKind::Data);
        assert_eq!(classify_row(&["Movie"]), RowKind::Discard);
        assert_eq!(classify_row::<&str>(&[]), RowKind::Discard);
    }
}

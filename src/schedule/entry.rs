// src/schedule/entry.rs

use chrono::NaiveDate;
use std::collections::HashSet;

/// Distributor used when the row has no distributor cell.
pub const UNKNOWN_DISTRIBUTOR: &str = "Unknown";

/// Prefix for the calendar display name.
pub const TITLE_MARKER: &str = "🎬";

/// One dated movie release.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReleaseEntry {
    date: NaiveDate,
    title: String,
    distributor: String,
    uid: String,
}

impl ReleaseEntry {
    /// Build an entry; `None` when the title is blank after trimming.
    pub fn new(date: NaiveDate, title: &str, distributor: Option<&str>) -> Option<Self> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }
        let distributor = distributor
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .unwrap_or(UNKNOWN_DISTRIBUTOR);
        Some(Self {
            date,
            uid: make_uid(date, title),
            title: title.to_string(),
            distributor: distributor.to_string(),
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn distributor(&self) -> &str {
        &self.distributor
    }

    pub fn uid(&self) -> &str {
        &self.uid
    }

    /// Calendar display name, e.g. "🎬 Movie A".
    pub fn display_name(&self) -> String {
        format!("{} {}", TITLE_MARKER, self.title)
    }

    /// Two-line event description.
    pub fn description(&self, source_label: &str) -> String {
        format!(
            "Distributor: {}\nSource: {}",
            self.distributor, source_label
        )
    }
}

/// `YYYY-MM-DD-<alphanumerics of the title>`
pub fn make_uid(date: NaiveDate, title: &str) -> String {
    let key: String = title.trim().chars().filter(|c| c.is_alphanumeric()).collect();
    format!("{}-{}", date.format("%Y-%m-%d"), key)
}

/// Ordered, uid-deduplicated collection of entries.
#[derive(Debug, Default, Clone)]
pub struct Schedule {
    entries: Vec<ReleaseEntry>,
    seen: HashSet<String>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `entry` unless its uid is already present. Returns whether it
    /// was added.
    pub fn insert(&mut self, entry: ReleaseEntry) -> bool {
        if !self.seen.insert(entry.uid.clone()) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ReleaseEntry] {
        &self.entries
    }
}

// src/schedule/mod.rs

//! Turns the rows of the release table into dated entries.
//!
//! The table only states a full date now and then: month headers set the
//! month and year, a row may give just a day, and a blank date cell means
//! "same day as the row above". [`state::step`] carries that context from
//! row to row; [`Schedule::ingest`] runs a whole pass and deduplicates.

use chrono::NaiveDate;
use tracing::{debug, info};

pub mod classify;
pub mod entry;
pub mod state;

pub use classify::{classify_date, classify_row, DateCell, RowKind};
pub use entry::{make_uid, ReleaseEntry, Schedule};
pub use state::{step, DateContext};

/// One table row: the text of each cell, in column order.
pub type Row = Vec<String>;

/// Counters from one parse pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ParseReport {
    pub rows: usize,
    pub headers: usize,
    pub added: usize,
    pub discarded: usize,
    pub duplicates: usize,
}

impl Schedule {
    /// Run one pass over `rows` in document order, starting from a fresh
    /// context dated `today`, and add every resolved entry.
    pub fn ingest(&mut self, rows: &[Row], today: NaiveDate) -> ParseReport {
        let mut ctx = DateContext::starting(today);
        let mut report = ParseReport {
            rows: rows.len(),
            ..ParseReport::default()
        };

        for (idx, row) in rows.iter().enumerate() {
            let (next, outcome) = step(ctx, row.as_slice());
            ctx = next;
            match outcome {
                Ok(None) => {
                    report.headers += 1;
                    debug!(row = idx, year = ?ctx.year, month = ?ctx.month, "section header");
                }
                Ok(Some(entry)) => {
                    if self.insert(entry) {
                        report.added += 1;
                    } else {
                        report.duplicates += 1;
                        debug!(row = idx, "duplicate entry skipped");
                    }
                }
                Err(reason) => {
                    report.discarded += 1;
                    debug!(row = idx, %reason, "row skipped");
                }
            }
        }

        info!(
            rows = report.rows,
            headers = report.headers,
            added = report.added,
            discarded = report.discarded,
            duplicates = report.duplicates,
            "parsed release table"
        );
        report
    }
}

/// Parse a table into a fresh schedule.
pub fn parse_rows(rows: &[Row], today: NaiveDate) -> (Schedule, ParseReport) {
    let mut schedule = Schedule::new();
    let report = schedule.ingest(rows, today);
    (schedule, report)
}

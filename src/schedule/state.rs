// src/schedule/state.rs

use chrono::{Datelike, NaiveDate};

use super::classify::{classify_date, classify_row, looks_like_date, DateCell, RowKind};
use super::entry::ReleaseEntry;
use crate::error::RowParseError;

/// The date the table is currently "in", carried from row to row.
///
/// `day` only means something once `month` is set, and a header row always
/// clears it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateContext {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

/// What a single row did.
pub type StepResult = Result<Option<ReleaseEntry>, RowParseError>;

impl DateContext {
    /// Fresh context for a parse pass: the year is assumed to be `today`'s
    /// until a header says otherwise.
    pub fn starting(today: NaiveDate) -> Self {
        Self {
            year: Some(today.year()),
            month: None,
            day: None,
        }
    }

    fn with_header(self, month: u32, year: i32) -> Self {
        Self {
            year: Some(year),
            month: Some(month),
            day: None,
        }
    }

    /// The carried date, if the triple is complete.
    ///
    /// `Some(Err(..))` when all three parts are set but do not name a real
    /// day, e.g. February 30.
    pub fn resolve(&self) -> Option<Result<NaiveDate, RowParseError>> {
        let (year, month, day) = (self.year?, self.month?, self.day?);
        Some(
            NaiveDate::from_ymd_opt(year, month, day)
                .ok_or(RowParseError::InvalidDate { year, month, day }),
        )
    }
}

/// Advance the context over one row.
///
/// Header rows return `Ok(None)`. A data row either yields an entry or the
/// reason it was dropped; a dropped row may still have moved the context
/// (an invalid "February 30" keeps day 30).
pub fn step<S: AsRef<str>>(ctx: DateContext, row: &[S]) -> (DateContext, StepResult) {
    match classify_row(row) {
        RowKind::Header { month, year } => (ctx.with_header(month, year), Ok(None)),
        RowKind::Discard => (ctx, Err(RowParseError::TooFewCells(row.len()))),
        RowKind::Data => step_data(ctx, row),
    }
}

fn step_data<S: AsRef<str>>(ctx: DateContext, row: &[S]) -> (DateContext, StepResult) {
    let date_cell = row[0].as_ref();

    // column of the title; the distributor follows it
    let (next, title_at) = match classify_date(date_cell) {
        DateCell::MonthYearHeader { month, year } => {
            return (ctx.with_header(month, year), Ok(None));
        }
        DateCell::MonthDay { month, day } => (
            DateContext {
                month: Some(month),
                day: Some(day),
                ..ctx
            },
            1,
        ),
        DateCell::DayOnly(day) => {
            if ctx.month.is_none() {
                return (ctx, Err(RowParseError::NoMonth(day)));
            }
            (
                DateContext {
                    day: Some(day),
                    ..ctx
                },
                1,
            )
        }
        DateCell::Empty => (ctx, 1),
        // a date we can't read ("June 5, 2026") drops the row untouched
        DateCell::Unrecognized if looks_like_date(date_cell) => {
            return (
                ctx,
                Err(RowParseError::UnrecognizedDate(date_cell.trim().to_string())),
            );
        }
        // no date column at all: the row starts with the title
        DateCell::Unrecognized => (ctx, 0),
    };

    let date = match next.resolve() {
        Some(Ok(date)) => date,
        Some(Err(e)) => return (next, Err(e)),
        None => return (next, Err(RowParseError::NoResolvedDate)),
    };

    let title = row.get(title_at).map(|c| c.as_ref()).unwrap_or_default();
    let distributor = row.get(title_at + 1).map(|c| c.as_ref());
    match ReleaseEntry::new(date, title, distributor) {
        Some(entry) => (next, Ok(Some(entry))),
        None => (next, Err(RowParseError::MissingTitle)),
    }
}

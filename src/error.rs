// src/error.rs

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Fatal failures of a scrape run. Anything that ends up here aborts the
/// run before an output file is written.
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// Network or HTTP failure while fetching the schedule page
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The HTTP client could not be set up (e.g. a malformed user agent)
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Neither the expected container nor any other table was found
    #[error("no release table found on the page")]
    TableNotFound,

    /// Configuration file or override could not be used
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Writing the calendar file failed
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ScrapeError {
    pub fn fetch(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Fetch {
            url: url.into(),
            source,
        }
    }

    pub fn write<P: AsRef<Path>>(path: P, source: std::io::Error) -> Self {
        Self::Write {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

/// Why a single table row produced no entry. These never escape a parse
/// pass; the row is dropped and parsing moves on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowParseError {
    #[error("row has {0} cell(s), need at least 2")]
    TooFewCells(usize),

    #[error("unrecognized date cell {0:?}")]
    UnrecognizedDate(String),

    #[error("day {0} given before any month header")]
    NoMonth(u32),

    #[error("no earlier date to inherit")]
    NoResolvedDate,

    #[error("{year:04}-{month:02}-{day:02} is not a calendar date")]
    InvalidDate { year: i32, month: u32, day: u32 },

    #[error("title cell is empty")]
    MissingTitle,
}

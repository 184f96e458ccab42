// src/lib.rs

pub mod calendar;
pub mod config;
pub mod error;
pub mod fetch;
pub mod pipeline;
pub mod schedule;

pub use config::Config;
pub use error::{RowParseError, ScrapeError};
pub use schedule::{ReleaseEntry, Schedule};

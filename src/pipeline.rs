// src/pipeline.rs

use chrono::{DateTime, Utc};
use tracing::info;

use crate::calendar::{self, CalendarMeta};
use crate::config::Config;
use crate::error::ScrapeError;
use crate::fetch;
use crate::schedule::{parse_rows, ParseReport, Schedule};

/// Outcome of a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub written: usize,
    pub report: ParseReport,
}

/// Locate the table in `html` and parse it. Dates without a stated year
/// fall back to the year of `now`.
pub fn schedule_from_html(
    html: &str,
    now: DateTime<Utc>,
) -> Result<(Schedule, ParseReport), ScrapeError> {
    let rows = fetch::extract_rows(html)?;
    info!("scanning {} rows", rows.len());
    Ok(parse_rows(&rows, now.date_naive()))
}

/// Fetch, parse and write. Nothing is written unless the fetch and table
/// lookup both succeed.
pub async fn run(cfg: &Config, now: DateTime<Utc>) -> Result<RunSummary, ScrapeError> {
    let client = fetch::build_client(&cfg.user_agent, cfg.timeout())?;
    let html = fetch::fetch_page(&client, &cfg.url).await?;
    let (schedule, report) = schedule_from_html(&html, now)?;

    let meta = CalendarMeta {
        name: &cfg.calendar_name,
        source_label: &cfg.source_label,
        generated_at: now,
    };
    calendar::write_calendar(&cfg.output, schedule.entries(), &meta)?;

    Ok(RunSummary {
        written: schedule.len(),
        report,
    })
}

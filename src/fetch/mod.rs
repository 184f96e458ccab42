// src/fetch/mod.rs

use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, instrument};
use url::Url;

use crate::error::ScrapeError;

pub mod table;

pub use table::{extract_rows, CHART_CONTAINER};

/// Build the HTTP client used for the schedule page.
pub fn build_client(user_agent: &str, timeout: Duration) -> Result<Client, ScrapeError> {
    Client::builder()
        .timeout(timeout)
        .user_agent(user_agent)
        .build()
        .map_err(ScrapeError::Client)
}

/// GET `url` once and return the body. Non-2xx responses are errors; there
/// is no retry.
#[instrument(level = "info", skip(client), fields(url = %url))]
pub async fn fetch_page(client: &Client, url: &Url) -> Result<String, ScrapeError> {
    debug!("requesting schedule page");
    let body = client
        .get(url.clone())
        .send()
        .await
        .and_then(|resp| resp.error_for_status())
        .map_err(|e| ScrapeError::fetch(url.as_str(), e))?
        .text()
        .await
        .map_err(|e| ScrapeError::fetch(url.as_str(), e))?;
    info!(bytes = body.len(), "fetched schedule page");
    Ok(body)
}

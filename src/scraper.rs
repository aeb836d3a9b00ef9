use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::Client;
use tracing::info;

use crate::error::ScrapeError;
use crate::model::Chamber;
use crate::parser::{self, Extraction};
use crate::settings::Settings;

pub fn client(settings: &Settings) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(settings.fetch_timeout_secs))
        .user_agent(settings.user_agent.as_str())
        .build()
        .context("Failed to build HTTP client")
}

/// GET a chamber's result page. Any non-success status is fatal.
pub async fn fetch_page(client: &Client, chamber: Chamber, url: &str) -> Result<String, ScrapeError> {
    let transport = |source: reqwest::Error| ScrapeError::Transport {
        chamber,
        url: url.to_string(),
        source,
    };

    info!(%chamber, url, "fetching result page");
    let start = Instant::now();
    let response = client.get(url).send().await.map_err(transport)?;

    let status = response.status();
    if !status.is_success() {
        return Err(ScrapeError::HttpStatus {
            chamber,
            url: url.to_string(),
            status,
        });
    }

    let html = response.text().await.map_err(transport)?;
    info!(
        %chamber,
        bytes = html.len(),
        latency_ms = start.elapsed().as_millis() as u64,
        "fetched result page"
    );
    Ok(html)
}

/// Fetch then extract one chamber.
pub async fn scrape_chamber(
    client: &Client,
    chamber: Chamber,
    url: &str,
    max_year: i32,
) -> Result<Extraction, ScrapeError> {
    let html = fetch_page(client, chamber, url).await?;
    parser::extract_chamber(chamber, &html, max_year)
}

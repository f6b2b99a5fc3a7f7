// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Refreshing the bookmark snapshot from the Raindrop.io API.
//!
//! This is a separate stage that runs before scaffolding. The scaffold and
//! email steps only ever read the snapshot file this writes.

use crate::bookmarks::{SnapshotEntry, parse_timestamp};
use crate::config::FetchConfig;
use crate::error::{Error, Result};
use chrono::SecondsFormat;
use diagnostics::*;
use serde::Deserialize;
use std::io::Write as _;
use std::path::Path;
use std::time::Duration;

/// Raindrops across all collections.
pub const DEFAULT_API_URL: &str = "https://api.raindrop.io/rest/v1/raindrops/0";

/// One item of the API response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RaindropItem {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RaindropResponse {
    items: Option<Vec<RaindropItem>>,
}

/// Blocking Raindrop.io client
pub struct RaindropClient {
    http_client: reqwest::blocking::Client,
    api_url: String,
    token: String,
}

impl RaindropClient {
    /// Build a client, reading the token from the configured environment
    /// variable.
    pub fn from_config(config: &FetchConfig) -> Result<Self> {
        let token = std::env::var(&config.token_env)
            .ok()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                Error::Config(format!("environment variable {} is not set", config.token_env))
            })?;
        Self::new(&config.api_url, token, config.timeout_seconds)
    }

    pub fn new(api_url: &str, token: String, timeout_seconds: u64) -> Result<Self> {
        let http_client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| Error::Fetch(format!("failed to create HTTP client: {}", e)))?;
        Ok(Self {
            http_client,
            api_url: api_url.to_string(),
            token,
        })
    }

    /// Fetch the newest `per_page` items tagged `tag`.
    pub fn fetch(&self, tag: &str, per_page: usize) -> Result<Vec<RaindropItem>> {
        let url = request_url(&self.api_url, tag, per_page)?;
        log_info!("Fetching bookmarks tagged {tag}", tag);

        let response = self
            .http_client
            .get(url.as_str())
            .bearer_auth(&self.token)
            .send()
            .map_err(|e| Error::Fetch(format!("failed to send request to {}: {}", self.api_url, e)))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| Error::Fetch(format!("failed to read response body: {}", e)))?;
        if !status.is_success() {
            return Err(Error::Fetch(format!(
                "HTTP {} from {}: {}",
                status, self.api_url, body
            )));
        }

        let items = parse_response(&body)?;
        log_info!("Fetched {count} item(s)", count: items.len());
        Ok(items)
    }
}

/// Request URL with the search, sort and page size parameters.
pub fn request_url(api_url: &str, tag: &str, per_page: usize) -> Result<url::Url> {
    url::Url::parse_with_params(
        api_url,
        &[
            ("search", format!("#{}", tag)),
            ("sort", "-created".to_string()),
            ("perpage", per_page.to_string()),
        ],
    )
    .map_err(|e| Error::Config(format!("invalid fetch.api_url '{}': {}", api_url, e)))
}

fn parse_response(body: &str) -> Result<Vec<RaindropItem>> {
    let response: RaindropResponse = serde_json::from_str(body)
        .map_err(|e| Error::Fetch(format!("failed to parse response: {}", e)))?;
    response
        .items
        .ok_or_else(|| Error::Fetch("response has no \"items\" array".to_string()))
}

/// Convert API items to snapshot entries.
///
/// The search guarantees every item carries `tag`, so it is added when the
/// API leaves it out of the item's own tag list.
pub fn normalize_items(items: Vec<RaindropItem>, tag: &str) -> Vec<SnapshotEntry> {
    items
        .into_iter()
        .map(|item| {
            let date_added = item.created.map(|raw| {
                parse_timestamp(&raw)
                    .map(|t| t.to_rfc3339_opts(SecondsFormat::Millis, true))
                    .unwrap_or(raw)
            });
            let mut tags = item.tags;
            if !tags.iter().any(|t| t == tag) {
                tags.push(tag.to_string());
            }
            SnapshotEntry {
                title: item.title,
                url: item.link,
                excerpt: item.excerpt.filter(|e| !e.trim().is_empty()),
                note: item.note.filter(|n| !n.trim().is_empty()),
                date_added,
                tags,
            }
        })
        .collect()
}

/// Replace the snapshot at `path` without ever leaving a partial file.
pub fn write_snapshot_atomic(path: &Path, entries: &[SnapshotEntry]) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;

    let json = serde_json::to_string_pretty(entries)
        .map_err(|e| Error::Fetch(format!("failed to serialize snapshot: {}", e)))?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;
    tmp.write_all(json.as_bytes())
        .and_then(|_| tmp.write_all(b"\n"))
        .map_err(|e| Error::io(tmp.path(), e))?;
    tmp.persist(path).map_err(|e| Error::io(path, e.error))?;

    log_info!(
        "Wrote {count} bookmark(s) to {path}",
        count: entries.len(),
        path: path.display().to_string()
    );
    Ok(())
}

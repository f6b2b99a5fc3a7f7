// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Bookmark snapshot reader.
//!
//! The snapshot is a JSON array written by `retro fetch` (or any other
//! exporter) with one object per bookmark:
//!
//! ```json
//! [{ "title": "…", "url": "https://…", "excerpt": "…", "note": "…",
//!    "dateAdded": "2025-12-15T10:00:00.000Z", "tags": ["to-share"] }]
//! ```
//!
//! Entries that cannot be normalized are dropped and counted; they never
//! fail the run.

use crate::error::{Error, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use diagnostics::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// One entry as it is stored in the snapshot file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotEntry {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default)]
    pub date_added: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A normalized bookmark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookmarkRecord {
    pub title: String,
    /// Always a valid absolute URL
    pub url: String,
    /// Excerpt, else note, else empty
    pub excerpt_or_note: String,
    pub added_at: DateTime<Utc>,
    pub tags: BTreeSet<String>,
}

impl BookmarkRecord {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }
}

/// Normalized records in snapshot order.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub records: Vec<BookmarkRecord>,
    /// Entries dropped as malformed
    pub skipped: usize,
}

/// Load and normalize the snapshot at `path`.
pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::not_found("bookmark snapshot", path)
        } else {
            Error::io(path, e)
        }
    })?;
    let snapshot = parse_snapshot(&content).map_err(|reason| Error::InvalidSnapshot {
        path: path.to_path_buf(),
        reason,
    })?;
    log_info!(
        "Loaded {count} bookmark(s), skipped {skipped}",
        count: snapshot.records.len(),
        skipped: snapshot.skipped
    );
    Ok(snapshot)
}

/// Parse snapshot JSON. Fails only when the document is not an array.
pub fn parse_snapshot(content: &str) -> std::result::Result<Snapshot, String> {
    let entries: Vec<serde_json::Value> =
        serde_json::from_str(content).map_err(|e| format!("expected a JSON array: {}", e))?;

    let mut snapshot = Snapshot::default();
    for (index, value) in entries.into_iter().enumerate() {
        let item = format!("#{}", index);
        let normalized = serde_json::from_value::<SnapshotEntry>(value)
            .map_err(|e| Error::malformed(item.as_str(), e))
            .and_then(|entry| normalize_entry(&item, entry));
        match normalized {
            Ok(record) => snapshot.records.push(record),
            Err(e) => {
                let reason = e.to_string();
                log_warn!("Dropping bookmark {item}: {reason}", item: item.as_str(), reason);
                snapshot.skipped += 1;
            }
        }
    }
    Ok(snapshot)
}

/// Validate and normalize one snapshot entry.
pub fn normalize_entry(item: &str, entry: SnapshotEntry) -> Result<BookmarkRecord> {
    let title = non_empty(entry.title).ok_or_else(|| Error::malformed(item, "missing title"))?;
    let raw_url = non_empty(entry.url).ok_or_else(|| Error::malformed(item, "missing url"))?;
    let url = url::Url::parse(&raw_url)
        .map_err(|e| Error::malformed(item, format!("invalid url '{}': {}", raw_url, e)))?;
    if url.cannot_be_a_base() {
        return Err(Error::malformed(item, format!("not an absolute url '{}'", raw_url)));
    }

    let raw_date =
        non_empty(entry.date_added).ok_or_else(|| Error::malformed(item, "missing dateAdded"))?;
    let added_at = parse_timestamp(&raw_date)
        .ok_or_else(|| Error::malformed(item, format!("bad dateAdded '{}'", raw_date)))?;

    let excerpt_or_note = non_empty(entry.excerpt)
        .or_else(|| non_empty(entry.note))
        .unwrap_or_default();

    let tags = entry
        .tags
        .into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();

    Ok(BookmarkRecord {
        title,
        url: raw_url,
        excerpt_or_note,
        added_at,
        tags,
    })
}

/// RFC 3339, or a bare date / naive date-time taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

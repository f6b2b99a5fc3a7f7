// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Content filter and ranker for bookmarked reads.

use crate::bookmarks::BookmarkRecord;
use crate::window::TargetMonth;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Commentary strings that start with this marker are unfinished
/// scaffold placeholders. They stay in the draft until an author replaces
/// them, and are never shown to readers.
pub const PLACEHOLDER_MARKER: &str = "[TODO";

/// Author commentary keyed by bookmark URL.
pub type CommentaryByUrl = BTreeMap<String, String>;

/// True when `text` is an unfinished scaffold placeholder.
pub fn is_placeholder(text: &str) -> bool {
    text.trim_start().starts_with(PLACEHOLDER_MARKER)
}

/// One read selected for an issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadEntry {
    pub title: String,
    pub url: String,
    /// Author commentary, else the bookmark's excerpt or note, else empty.
    /// May still be a placeholder; use [`ReadEntry::display_commentary`].
    pub commentary: String,
    /// The bookmark's own excerpt or note
    pub excerpt: String,
    pub added_at: DateTime<Utc>,
}

impl ReadEntry {
    /// Commentary fit for readers: `None` when empty or a placeholder.
    pub fn display_commentary(&self) -> Option<&str> {
        let text = self.commentary.trim();
        if text.is_empty() || is_placeholder(text) {
            None
        } else {
            Some(text)
        }
    }
}

/// Select the reads for a window.
///
/// Keeps records tagged `required_tag` whose `added_at` lies inside the
/// content window, newest first. Records added at the same instant keep
/// their snapshot order. `limit` truncates after sorting.
pub fn select_reads(
    window: &TargetMonth,
    bookmarks: &[BookmarkRecord],
    required_tag: &str,
    limit: Option<usize>,
    commentary: Option<&CommentaryByUrl>,
) -> Vec<ReadEntry> {
    let mut selected: Vec<&BookmarkRecord> = bookmarks
        .iter()
        .filter(|b| b.has_tag(required_tag) && window.contains(&b.added_at))
        .collect();

    // Stable: ties keep snapshot order.
    selected.sort_by(|a, b| b.added_at.cmp(&a.added_at));

    if let Some(limit) = limit {
        selected.truncate(limit);
    }

    selected
        .into_iter()
        .map(|b| {
            let authored = commentary
                .and_then(|c| c.get(&b.url))
                .map(|c| c.trim())
                .filter(|c| !c.is_empty());
            ReadEntry {
                title: b.title.clone(),
                url: b.url.clone(),
                commentary: authored
                    .map(str::to_string)
                    .unwrap_or_else(|| b.excerpt_or_note.clone()),
                excerpt: b.excerpt_or_note.clone(),
                added_at: b.added_at,
            }
        })
        .collect()
}

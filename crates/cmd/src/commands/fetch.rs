// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use anyhow::{Context, Result};
use newsletter::fetch::{RaindropClient, normalize_items, write_snapshot_atomic};

use crate::common::{CommandContext, display_path};

/// Refresh the bookmark snapshot from Raindrop.io.
pub fn fetch_command<F>(ctx: &CommandContext, per_page: Option<usize>, mut output: F) -> Result<()>
where
    F: FnMut(&str),
{
    let config = ctx.load_config()?;
    let per_page = per_page.unwrap_or(config.fetch.per_page);
    anyhow::ensure!(per_page > 0, "--per-page must be greater than 0");

    let client = RaindropClient::from_config(&config.fetch)?;
    output(&format!("Fetching bookmarks tagged #{}", config.required_tag));

    let items = client
        .fetch(&config.required_tag, per_page)
        .with_context(|| "Bookmark fetch failed; the existing snapshot was left untouched")?;
    let entries = normalize_items(items, &config.required_tag);
    write_snapshot_atomic(&config.snapshot_path, &entries)?;

    output(&format!(
        "Wrote {} bookmark(s) to {}",
        entries.len(),
        display_path(&config.snapshot_path, &ctx.working_dir)
    ));
    Ok(())
}

// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;

use crate::common::{CommandContext, display_path};

/// Scaffold the draft for `month` (default: the current month).
///
/// Progress lines are handed to `output`; the caller decides where they go.
pub fn scaffold_command<F>(
    ctx: &CommandContext,
    month: Option<&str>,
    force: bool,
    mut output: F,
) -> Result<()>
where
    F: FnMut(&str),
{
    let config = ctx.load_config()?;
    let report = newsletter::run_scaffold(&config, month, force, ctx.clock.as_ref())?;
    let target = &report.target;

    output(&format!(
        "Newsletter for {} {}",
        target.publication_month_name(),
        target.publication_year
    ));
    output(&format!(
        "Featuring content from: {} {}",
        target.content_month_name(),
        target.content_year
    ));

    match &report.featured {
        Some(post) => output(&format!("Featured post: \"{}\" ({})", post.title, post.url)),
        None => output(&format!(
            "No blog post found for {} {}",
            target.content_month_name(),
            target.content_year
        )),
    }
    output(&format!("Reads found: {}", report.reads.len()));

    if report.skipped_posts > 0 {
        output(&format!("Skipped {} malformed post file(s)", report.skipped_posts));
    }
    if report.skipped_bookmarks > 0 {
        output(&format!("Skipped {} malformed bookmark(s)", report.skipped_bookmarks));
    }

    output(&format!(
        "Draft created: {}",
        display_path(&report.draft_path, &ctx.working_dir)
    ));
    output("Next: fill in the TODO placeholders, then run `retro email` with the draft's slug");
    output(&format!("  retro email {}", target.slug()));
    Ok(())
}

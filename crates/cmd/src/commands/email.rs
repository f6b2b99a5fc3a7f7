// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;

use crate::common::{CommandContext, display_path};

/// Render the email for the draft named by `slug`.
pub fn email_command<F>(ctx: &CommandContext, slug: &str, mut output: F) -> Result<()>
where
    F: FnMut(&str),
{
    let config = ctx.load_config()?;
    let report = newsletter::run_email(&config, slug)?;

    output(&format!("Newsletter: {}", report.draft.title));
    match &report.featured {
        Some(post) => output(&format!("Featured post: \"{}\"", post.title)),
        None => output("No featured post for this issue"),
    }
    output(&format!("Reads: {}", report.reads.len()));

    let pending = report.draft.unfinished_parts();
    if !pending.is_empty() {
        output(&format!("Warning: unfinished placeholders in {}", pending.join(", ")));
    }
    if report.skipped_posts > 0 {
        output(&format!("Skipped {} malformed post file(s)", report.skipped_posts));
    }
    if report.skipped_bookmarks > 0 {
        output(&format!("Skipped {} malformed bookmark(s)", report.skipped_bookmarks));
    }

    output(&format!(
        "Email HTML generated: {}",
        display_path(&report.email_path, &ctx.working_dir)
    ));
    output(&format!("Online version: {}", report.newsletter_url));
    Ok(())
}

// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! The two monthly runs: scaffolding a draft and rendering its email.

use crate::bookmarks::load_snapshot;
use crate::clock::Clock;
use crate::config::PipelineConfig;
use crate::draft::{DraftComposer, NewsletterDraft, load_draft, write_draft};
use crate::email::{render_email, write_email};
use crate::error::Result;
use crate::posts::{BlogPostRef, PostLocator};
use crate::reads::{ReadEntry, select_reads};
use crate::window::{TargetMonth, resolve_target_month};
use diagnostics::*;
use std::fmt;
use std::path::PathBuf;

/// Where a run is. Skipped items never move a run to `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    ResolvingWindow,
    LocatingPost,
    FilteringReads,
    Composing,
    LoadingDraft,
    Rendering,
    Done,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Idle => "idle",
            Stage::ResolvingWindow => "resolving-window",
            Stage::LocatingPost => "locating-post",
            Stage::FilteringReads => "filtering-reads",
            Stage::Composing => "composing",
            Stage::LoadingDraft => "loading-draft",
            Stage::Rendering => "rendering",
            Stage::Done => "done",
            Stage::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Tracks and logs stage transitions for one run.
#[derive(Debug)]
struct Run {
    stage: Stage,
}

impl Run {
    fn new() -> Self {
        Self { stage: Stage::Idle }
    }

    fn enter(&mut self, next: Stage) {
        let from = self.stage.to_string();
        let to = next.to_string();
        log_debug!("Stage {from} -> {to}", from, to);
        self.stage = next;
    }

    /// Run `step` in `stage`, moving to `Failed` if it errors.
    fn step<T>(&mut self, stage: Stage, step: impl FnOnce() -> Result<T>) -> Result<T> {
        self.enter(stage);
        step().inspect_err(|e| {
            let message = e.to_string();
            log_error!("Failed while {stage}: {message}", stage: stage.to_string(), message);
            self.enter(Stage::Failed);
        })
    }
}

/// What a scaffold run found and wrote.
#[derive(Debug, Clone)]
pub struct ScaffoldReport {
    pub target: TargetMonth,
    pub featured: Option<BlogPostRef>,
    pub reads: Vec<ReadEntry>,
    pub draft_path: PathBuf,
    pub skipped_posts: usize,
    pub skipped_bookmarks: usize,
}

/// What an email run rendered.
#[derive(Debug, Clone)]
pub struct EmailReport {
    pub draft: NewsletterDraft,
    pub featured: Option<BlogPostRef>,
    pub reads: Vec<ReadEntry>,
    pub email_path: PathBuf,
    pub newsletter_url: String,
    pub skipped_posts: usize,
    pub skipped_bookmarks: usize,
}

/// Scaffold the draft for `month_arg` (or the current month).
pub fn run_scaffold(
    config: &PipelineConfig,
    month_arg: Option<&str>,
    force: bool,
    clock: &dyn Clock,
) -> Result<ScaffoldReport> {
    let mut run = Run::new();

    let target = run.step(Stage::ResolvingWindow, || resolve_target_month(month_arg, clock))?;
    log_info!(
        "Scaffolding {slug} with content from {month} {year}",
        slug: target.slug(),
        month: target.content_month_name(),
        year: target.content_year
    );

    let scan = run.step(Stage::LocatingPost, || {
        PostLocator::new(&config.posts_dir)
            .with_index_file(config.posts_index.as_str())
            .find_featured(&target)
    })?;

    let (snapshot, reads) = run.step(Stage::FilteringReads, || {
        let snapshot = load_snapshot(&config.snapshot_path)?;
        // The draft lists every read; `reads_limit` only applies to the email.
        let reads = select_reads(&target, &snapshot.records, &config.required_tag, None, None);
        Ok((snapshot, reads))
    })?;
    log_info!("Selected {count} read(s)", count: reads.len());

    let draft_path = run.step(Stage::Composing, || {
        let composer = DraftComposer {
            newsletter_name: &config.site.newsletter_name,
            generated_at: clock.now(),
        };
        let doc = composer.compose(&target, scan.featured.as_ref(), &reads)?;
        write_draft(&doc, &config.drafts_dir, force)
    })?;

    run.enter(Stage::Done);
    Ok(ScaffoldReport {
        target,
        featured: scan.featured,
        reads,
        draft_path,
        skipped_posts: scan.skipped,
        skipped_bookmarks: snapshot.skipped,
    })
}

/// Render the email for the draft named by `slug`.
///
/// The content window comes from the slug, so editing the draft's month
/// or year never changes which posts and reads are pulled in.
pub fn run_email(config: &PipelineConfig, slug: &str) -> Result<EmailReport> {
    let mut run = Run::new();

    let target = run.step(Stage::ResolvingWindow, || TargetMonth::from_slug(slug))?;
    let draft = run.step(Stage::LoadingDraft, || load_draft(&config.drafts_dir, slug))?;
    let pending = draft.unfinished_parts();
    if !pending.is_empty() {
        let parts = pending.join(", ");
        log_warn!("Draft {slug} still has placeholders: {parts}", slug, parts);
    }

    let scan = run.step(Stage::LocatingPost, || {
        PostLocator::new(&config.posts_dir)
            .with_index_file(config.posts_index.as_str())
            .find_featured(&target)
    })?;

    let (snapshot, reads) = run.step(Stage::FilteringReads, || {
        let snapshot = load_snapshot(&config.snapshot_path)?;
        let reads = select_reads(
            &target,
            &snapshot.records,
            &config.required_tag,
            config.reads_limit,
            Some(&draft.commentary_by_url),
        );
        Ok((snapshot, reads))
    })?;

    let email_path = config.email_path(slug);
    run.step(Stage::Rendering, || {
        let html = render_email(&draft, scan.featured.as_ref(), &reads, &config.site)?;
        write_email(&html, &email_path)
    })?;

    run.enter(Stage::Done);
    Ok(EmailReport {
        newsletter_url: config.site.newsletter_url(slug),
        draft,
        featured: scan.featured,
        reads,
        email_path,
        skipped_posts: scan.skipped,
        skipped_bookmarks: snapshot.skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_names() {
        assert_eq!(Stage::ResolvingWindow.to_string(), "resolving-window");
        assert_eq!(Stage::Failed.to_string(), "failed");
    }

    #[test]
    fn test_failed_step_moves_to_failed() {
        let mut run = Run::new();
        let result: Result<()> = run.step(Stage::LocatingPost, || {
            Err(crate::error::Error::InvalidArgument("boom".to_string()))
        });
        assert!(result.is_err());
        assert_eq!(run.stage, Stage::Failed);

        let mut run = Run::new();
        run.step(Stage::Composing, || Ok(())).unwrap();
        assert_eq!(run.stage, Stage::Composing);
    }

    #[test]
    fn test_bad_draft_fails_while_loading_draft() {
        let tmp = tempfile::tempdir().unwrap();
        let config = PipelineConfig::default().resolve_paths(tmp.path());
        std::fs::create_dir_all(&config.drafts_dir).unwrap();
        std::fs::write(config.drafts_dir.join("2026-01-january.md"), "no front matter").unwrap();

        let mut run = Run::new();
        let err = run
            .step(Stage::LoadingDraft, || load_draft(&config.drafts_dir, "2026-01-january"))
            .unwrap_err();
        assert!(matches!(err, crate::error::Error::InvalidDraft { .. }));
        assert_eq!(run.stage, Stage::Failed);
        assert_eq!(Stage::LoadingDraft.to_string(), "loading-draft");
    }
}

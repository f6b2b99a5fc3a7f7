// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! # Newsletter: monthly retro pipeline
//!
//! Each issue is published in one month and features the month before it
//! (the content month). The pipeline runs twice per issue:
//!
//! 1. **Scaffold**: resolve the window, pick the featured post, select the
//!    tagged bookmarks, and write an editable markdown draft.
//! 2. **Email**: read the finished draft back and render a self-contained,
//!    inline-styled HTML email for it.
//!
//! ## Usage
//!
//! ```bash
//! retro fetch
//! retro scaffold --month 2026-01
//! retro email 2026-01-january
//! ```

pub mod bookmarks;
pub mod clock;
pub mod config;
pub mod draft;
pub mod email;
pub mod error;
pub mod fetch;
mod frontmatter;
pub mod markdown;
pub mod pipeline;
pub mod posts;
pub mod reads;
pub mod window;

pub use bookmarks::{BookmarkRecord, Snapshot, load_snapshot};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{PipelineConfig, SiteProfile, load_config};
pub use draft::{DraftDocument, NewsletterDraft, compose_draft, load_draft, write_draft};
pub use email::{render_email, write_email};
pub use error::{Error, Result};
pub use pipeline::{EmailReport, ScaffoldReport, Stage, run_email, run_scaffold};
pub use posts::{BlogPostRef, PostLocator, find_featured_post};
pub use reads::{CommentaryByUrl, ReadEntry, select_reads};
pub use window::{TargetMonth, resolve_target_month};

// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Blog post locator.
//!
//! Post files are named with a date prefix (`2025-12-15-some-title.md`), so
//! sorting file names in reverse approximates newest-first. The first post
//! whose front-matter `date` lies inside the content window is featured.

use crate::error::{Error, Result};
use crate::frontmatter::{parse_frontmatter, scalar_to_string, split_frontmatter};
use crate::window::TargetMonth;
use chrono::NaiveDate;
use diagnostics::*;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Listing page that lives beside the posts and is never featured.
pub const DEFAULT_INDEX_FILE: &str = "index.md";

const UNTITLED: &str = "Untitled";

/// A post selected from the posts directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogPostRef {
    pub title: String,
    pub subtitle: Option<String>,
    pub publish_date: NaiveDate,
    /// Site-relative, `/blog/<file stem>/`
    pub url: String,
    /// File name the post was read from
    pub source_file: String,
}

impl BlogPostRef {
    /// Join the site-relative URL onto a site base URL.
    pub fn absolute_url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.url)
    }
}

#[derive(Debug, Deserialize)]
struct PostFrontmatter {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    subtitle: Option<String>,
    #[serde(default)]
    date: Option<serde_yaml_ng::Value>,
}

/// Outcome of scanning the posts directory.
#[derive(Debug, Clone, Default)]
pub struct PostScan {
    pub featured: Option<BlogPostRef>,
    /// Files that were examined and skipped as malformed
    pub skipped: usize,
}

/// Scans one posts directory.
#[derive(Debug, Clone)]
pub struct PostLocator {
    posts_dir: PathBuf,
    index_file: String,
}

impl PostLocator {
    pub fn new<P: Into<PathBuf>>(posts_dir: P) -> Self {
        Self {
            posts_dir: posts_dir.into(),
            index_file: DEFAULT_INDEX_FILE.to_string(),
        }
    }

    pub fn with_index_file<S: Into<String>>(mut self, index_file: S) -> Self {
        self.index_file = index_file.into();
        self
    }

    /// Candidate post file names, newest-looking first.
    pub fn list_posts(&self) -> Result<Vec<String>> {
        let entries = std::fs::read_dir(&self.posts_dir).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::not_found("posts directory", &self.posts_dir)
            } else {
                Error::io(&self.posts_dir, e)
            }
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| Error::io(&self.posts_dir, e))?;
            if entry.file_type().map(|t| t.is_dir()).unwrap_or(true) {
                continue;
            }
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if name.ends_with(".md") && name != self.index_file {
                names.push(name);
            }
        }
        names.sort_unstable_by(|a, b| b.cmp(a));
        Ok(names)
    }

    /// Find the most recent post published inside the content window.
    ///
    /// Malformed files are skipped; only a missing directory is an error.
    pub fn find_featured(&self, window: &TargetMonth) -> Result<PostScan> {
        let mut scan = PostScan::default();

        for name in self.list_posts()? {
            let path = self.posts_dir.join(&name);
            let parsed = std::fs::read_to_string(&path)
                .map_err(|e| Error::malformed(name.as_str(), e))
                .and_then(|content| parse_post(&name, &content));

            match parsed {
                Ok(post) if window.contains_date(post.publish_date) => {
                    log_debug!("Featured post {file}", file: name.as_str());
                    scan.featured = Some(post);
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    let reason = e.to_string();
                    log_warn!("Skipping post {file}: {reason}", file: name.as_str(), reason);
                    scan.skipped += 1;
                }
            }
        }

        if scan.skipped > 0 {
            log_info!("Skipped {count} malformed post(s)", count: scan.skipped);
        }
        Ok(scan)
    }
}

/// Find the featured post in `posts_dir` for the window, ignoring `index.md`.
pub fn find_featured_post(window: &TargetMonth, posts_dir: &Path) -> Result<Option<BlogPostRef>> {
    Ok(PostLocator::new(posts_dir).find_featured(window)?.featured)
}

/// Parse one post file. The URL comes from the file name alone.
pub fn parse_post(file_name: &str, content: &str) -> Result<BlogPostRef> {
    let (yaml, _body) =
        split_frontmatter(content).ok_or_else(|| Error::malformed(file_name, "no front matter"))?;
    let fm: PostFrontmatter =
        parse_frontmatter(yaml).map_err(|e| Error::malformed(file_name, e))?;

    let raw_date = fm
        .date
        .as_ref()
        .and_then(scalar_to_string)
        .ok_or_else(|| Error::malformed(file_name, "missing date"))?;
    let publish_date = parse_post_date(&raw_date)
        .ok_or_else(|| Error::malformed(file_name, format!("bad date '{}'", raw_date)))?;

    let title = fm
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| UNTITLED.to_string());
    let subtitle = fm
        .subtitle
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    let stem = file_name.strip_suffix(".md").unwrap_or(file_name);

    Ok(BlogPostRef {
        title,
        subtitle,
        publish_date,
        url: format!("/blog/{}/", stem),
        source_file: file_name.to_string(),
    })
}

/// Accepts `YYYY-MM-DD`, optionally followed by a time part.
fn parse_post_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let day = raw.get(..10)?;
    if raw.len() > 10 && !raw[10..].starts_with(['T', ' ']) {
        return None;
    }
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::window::resolve_target_month;
    use chrono::Utc;
    use tempfile::tempdir;

    fn january_2026() -> TargetMonth {
        resolve_target_month(Some("2026-01"), &FixedClock(Utc::now())).unwrap()
    }

    fn write(dir: &Path, name: &str, content: &str) {
        std::fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_returns_none_for_empty_directory() {
        let tmp = tempdir().unwrap();
        let found = find_featured_post(&january_2026(), tmp.path()).unwrap();
        assert!(found.is_none());
    }

    #[test]
    fn test_missing_directory_is_not_found() {
        let tmp = tempdir().unwrap();
        let err = find_featured_post(&january_2026(), &tmp.path().join("nope")).unwrap_err();
        assert!(matches!(err, Error::ResourceNotFound { .. }));
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn test_finds_post_in_content_month() {
        let tmp = tempdir().unwrap();
        write(
            tmp.path(),
            "2025-12-15-test-post.md",
            "---\ntitle: \"Test Blog Post\"\nsubtitle: 'A test subtitle'\ndate: 2025-12-15\n---\n\nBody.\n",
        );

        let post = find_featured_post(&january_2026(), tmp.path()).unwrap().unwrap();
        assert_eq!(post.title, "Test Blog Post");
        assert_eq!(post.subtitle.as_deref(), Some("A test subtitle"));
        assert_eq!(post.publish_date, NaiveDate::from_ymd_opt(2025, 12, 15).unwrap());
        assert_eq!(post.url, "/blog/2025-12-15-test-post/");
        assert_eq!(post.source_file, "2025-12-15-test-post.md");
    }

    #[test]
    fn test_ignores_other_months() {
        let tmp = tempdir().unwrap();
        write(tmp.path(), "2025-11-15-november.md", "---\ntitle: November\ndate: 2025-11-15\n---\n");
        write(tmp.path(), "2026-01-02-january.md", "---\ntitle: January\ndate: 2026-01-02\n---\n");
        assert!(find_featured_post(&january_2026(), tmp.path()).unwrap().is_none());
    }

    #[test]
    fn test_picks_latest_file_name_first() {
        let tmp = tempdir().unwrap();
        write(tmp.path(), "2025-12-01-early.md", "---\ntitle: Early\ndate: 2025-12-01\n---\n");
        write(tmp.path(), "2025-12-20-late.md", "---\ntitle: Late\ndate: 2025-12-20\n---\n");
        let post = find_featured_post(&january_2026(), tmp.path()).unwrap().unwrap();
        assert_eq!(post.title, "Late");
    }

    #[test]
    fn test_skips_malformed_and_keeps_scanning() {
        let tmp = tempdir().unwrap();
        write(tmp.path(), "2025-12-30-no-date.md", "---\ntitle: No date\n---\n");
        write(tmp.path(), "2025-12-29-no-frontmatter.md", "# Just text\n");
        write(tmp.path(), "2025-12-28-bad-yaml.md", "---\ntitle: [unclosed\n---\n");
        write(tmp.path(), "2025-12-10-good.md", "---\ndate: 2025-12-10\n---\n");
        write(tmp.path(), "index.md", "---\ntitle: Blog\ndate: 2025-12-31\n---\n");
        write(tmp.path(), "notes.txt", "not a post");

        let scan = PostLocator::new(tmp.path()).find_featured(&january_2026()).unwrap();
        let post = scan.featured.unwrap();
        assert_eq!(post.source_file, "2025-12-10-good.md");
        assert_eq!(post.title, "Untitled");
        assert_eq!(post.subtitle, None);
        assert_eq!(scan.skipped, 3);
    }

    #[test]
    fn test_custom_index_file_is_excluded() {
        let tmp = tempdir().unwrap();
        write(tmp.path(), "2025-12-31-listing.md", "---\ntitle: Listing\ndate: 2025-12-31\n---\n");
        let locator = PostLocator::new(tmp.path()).with_index_file("2025-12-31-listing.md");
        assert!(locator.find_featured(&january_2026()).unwrap().featured.is_none());
    }

    #[test]
    fn test_parse_post_date_forms() {
        assert!(parse_post_date("2025-12-15").is_some());
        assert!(parse_post_date("2025-12-15T08:00:00Z").is_some());
        assert!(parse_post_date("2025-12-15 08:00").is_some());
        assert!(parse_post_date("2025-12-155").is_none());
        assert!(parse_post_date("Dec 15").is_none());
    }

    #[test]
    fn test_quoted_date_is_accepted() {
        let post = parse_post("2025-12-15-q.md", "---\ndate: \"2025-12-15\"\n---\n").unwrap();
        assert_eq!(post.publish_date, NaiveDate::from_ymd_opt(2025, 12, 15).unwrap());
    }

    #[test]
    fn test_absolute_url() {
        let post = parse_post("2025-12-15-q.md", "---\ndate: 2025-12-15\n---\n").unwrap();
        assert_eq!(
            post.absolute_url("https://example.com/"),
            "https://example.com/blog/2025-12-15-q/"
        );
    }
}

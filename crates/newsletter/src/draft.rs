// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Newsletter drafts: scaffolding a new one, and reading a finished one.
//!
//! A scaffolded draft is a markdown file whose front matter is complete
//! but full of `[TODO: …]` placeholders, followed by HTML comments that
//! tell the author what the pipeline found (featured post, reads). The
//! comments never reach readers; the placeholders are detected by the
//! email renderer and suppressed.

use crate::error::{Error, Result};
use crate::frontmatter::{parse_frontmatter, scalar_to_string, split_frontmatter};
use crate::posts::BlogPostRef;
use crate::reads::{CommentaryByUrl, PLACEHOLDER_MARKER, ReadEntry, is_placeholder};
use crate::window::TargetMonth;
use chrono::{DateTime, Utc};
use diagnostics::*;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt::{self, Write as _};
use std::io::Write as _;
use std::path::{Path, PathBuf};

const SUBTITLE_PLACEHOLDER: &str = "Add a catchy subtitle that captures this month's theme]";
const DESCRIPTION_PLACEHOLDER: &str =
    "Write a 1-2 sentence description for SEO and social cards]";
const COMMENTARY_PLACEHOLDER: &str =
    "Add your commentary - why does this matter? What's the key insight?]";

const RULE: &str =
    "================================================================================";

/// Scaffolded draft text, addressed by its issue slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftDocument {
    pub slug: String,
    pub contents: String,
}

/// Builds draft documents.
#[derive(Debug, Clone)]
pub struct DraftComposer<'a> {
    pub newsletter_name: &'a str,
    /// Provides the front-matter `date` and the "Generated on" stamp
    pub generated_at: DateTime<Utc>,
}

/// Compose a draft with the default newsletter name.
pub fn compose_draft(
    target: &TargetMonth,
    featured: Option<&BlogPostRef>,
    reads: &[ReadEntry],
    generated_at: DateTime<Utc>,
) -> Result<DraftDocument> {
    DraftComposer {
        newsletter_name: "The Monthly Retro",
        generated_at,
    }
    .compose(target, featured, reads)
}

impl DraftComposer<'_> {
    pub fn compose(
        &self,
        target: &TargetMonth,
        featured: Option<&BlogPostRef>,
        reads: &[ReadEntry],
    ) -> Result<DraftDocument> {
        let mut out = String::new();
        self.write_document(&mut out, target, featured, reads)
            .map_err(|e| Error::Render(format!("composing draft {}: {}", target.slug(), e)))?;

        Ok(DraftDocument {
            slug: target.slug(),
            contents: out,
        })
    }

    fn write_document(
        &self,
        out: &mut String,
        target: &TargetMonth,
        featured: Option<&BlogPostRef>,
        reads: &[ReadEntry],
    ) -> fmt::Result {
        self.write_frontmatter(out, target, reads)?;
        self.write_instructions(out, target)?;
        write_featured_reference(out, target, featured)?;
        write_reads_reference(out, target, reads)
    }

    fn write_frontmatter(
        &self,
        out: &mut String,
        target: &TargetMonth,
        reads: &[ReadEntry],
    ) -> fmt::Result {
        let month = target.publication_month_name();
        let year = target.publication_year;

        writeln!(out, "---")?;
        writeln!(
            out,
            "title: {}",
            yaml_quote(&format!("{} - {} {}", self.newsletter_name, month, year))
        )?;
        writeln!(out, "subtitle: {}", placeholder_value(SUBTITLE_PLACEHOLDER))?;
        writeln!(out, "date: {}", self.generated_at.format("%Y-%m-%d"))?;
        writeln!(out, "month: {}", yaml_quote(month))?;
        writeln!(out, "year: {}", year)?;
        writeln!(out, "description: {}", placeholder_value(DESCRIPTION_PLACEHOLDER))?;

        if reads.is_empty() {
            writeln!(out, "commentaryByUrl: {{}}")?;
        } else {
            writeln!(out, "commentaryByUrl:")?;
            for (index, read) in reads.iter().enumerate() {
                writeln!(
                    out,
                    "  # {}. {}",
                    index + 1,
                    comment_safe(&truncate(&one_line(&read.title), 60))
                )?;
                writeln!(
                    out,
                    "  {}: {}",
                    yaml_quote(&read.url),
                    placeholder_value(COMMENTARY_PLACEHOLDER)
                )?;
            }
        }
        writeln!(out, "---\n")
    }

    fn write_instructions(&self, out: &mut String, target: &TargetMonth) -> fmt::Result {
        let content = target.content_month_name();
        write!(
            out,
            "<!--
{RULE}
NEWSLETTER DRAFT - {pub_month} {pub_year}
Featuring content from: {content} {content_year}
{RULE}

This is an auto-generated draft. Complete the following sections before publishing:

1. FRONTMATTER (above)
   - Update the subtitle
   - Update the description
   - Verify the date
   - Edit 'commentaryByUrl' to add your insights for each read

2. THE RETROSPECTIVE (below)
   - Write 1-2 paragraphs of prose reflecting on {content}
   - Should be distinct from blog content
   - Provide a \"behind-the-scenes\" look at the month's themes

3. READS COMMENTARY (in frontmatter 'commentaryByUrl' section)
   - Replace {PLACEHOLDER_MARKER}] placeholders with your original insights
   - Commentary left as a placeholder is not shown in the email
   - Commentary should answer: \"Why does this matter?\"

Generated on: {generated}
{RULE}
-->

{PLACEHOLDER_MARKER}: Write your retrospective here. This should be 1-2 paragraphs reflecting on {content}. Consider discussing:]

- [What were you thinking about in {content}?]
- [Any leadership challenges or insights?]
- [Personal growth reflections?]
- [What themes connect this month's content?]

[Delete this placeholder and write your retrospective prose above]

",
            pub_month = target.publication_month_name().to_uppercase(),
            pub_year = target.publication_year,
            content_year = target.content_year,
            generated = self.generated_at.to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        )
    }
}

fn write_featured_reference(
    out: &mut String,
    target: &TargetMonth,
    featured: Option<&BlogPostRef>,
) -> fmt::Result {
    let month = target.content_month_name();
    let year = target.content_year;
    writeln!(out, "<!--\n{RULE}")?;
    writeln!(out, "BLOG POST FROM {} {}", month.to_uppercase(), year)?;
    writeln!(out, "{RULE}\n")?;

    match featured {
        Some(post) => {
            writeln!(out, "Found blog post from {} {}:", month, year)?;
            writeln!(out, "- Title: {}", comment_safe(&post.title))?;
            writeln!(
                out,
                "- Subtitle: {}",
                post.subtitle.as_deref().map(comment_safe).unwrap_or_else(|| "(none)".to_string())
            )?;
            writeln!(out, "- URL: {}", comment_safe(&post.url))?;
            writeln!(out, "- Date: {}", post.publish_date.format("%Y-%m-%d"))?;
            writeln!(out, "- File: {}", comment_safe(&post.source_file))?;
            writeln!(out, "\nThis post will be featured in the email. No changes needed.")?;
        }
        None => {
            writeln!(out, "No blog posts found for {} {}.", month, year)?;
            writeln!(out, "The email will not have a \"Latest Essay\" section.")?;
            writeln!(out, "Consider publishing a blog post before sending this newsletter.")?;
        }
    }
    writeln!(out, "{RULE}\n-->\n")
}

fn write_reads_reference(out: &mut String, target: &TargetMonth, reads: &[ReadEntry]) -> fmt::Result {
    let month = target.content_month_name();
    let year = target.content_year;
    writeln!(out, "<!--\n{RULE}")?;
    writeln!(out, "READS FROM {} {} - CUSTOM COMMENTARY", month.to_uppercase(), year)?;
    writeln!(out, "{RULE}\n")?;

    if reads.is_empty() {
        writeln!(out, "No reads found for {} {}.", month, year)?;
        writeln!(out, "Consider tagging more bookmarks for sharing.")?;
    } else {
        writeln!(out, "READS REFERENCE ({} found for {} {}):\n", reads.len(), month, year)?;
        for (index, read) in reads.iter().enumerate() {
            let excerpt = if read.excerpt.is_empty() {
                "(none)".to_string()
            } else {
                comment_safe(&truncate(&one_line(&read.excerpt), 100))
            };
            writeln!(out, "{}. \"{}\"", index + 1, comment_safe(&one_line(&read.title)))?;
            writeln!(out, "   URL: {}", comment_safe(&read.url))?;
            writeln!(out, "   Date Added: {}", read.added_at.format("%b %-d"))?;
            writeln!(out, "   Original Excerpt: {}\n", excerpt)?;
        }
    }
    writeln!(out, "{RULE}\n-->")
}

/// Write a draft into `drafts_dir` as `<slug>.md`.
///
/// Without `force`, the file is created exclusively: an existing draft is
/// never touched and `AlreadyExists` is returned.
pub fn write_draft(doc: &DraftDocument, drafts_dir: &Path, force: bool) -> Result<PathBuf> {
    std::fs::create_dir_all(drafts_dir).map_err(|e| Error::io(drafts_dir, e))?;
    let path = drafts_dir.join(format!("{}.md", doc.slug));

    let mut options = std::fs::OpenOptions::new();
    options.write(true);
    if force {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }

    let mut file = options.open(&path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::AlreadyExists {
            Error::already_exists(&path)
        } else {
            Error::io(&path, e)
        }
    })?;
    file.write_all(doc.contents.as_bytes())
        .map_err(|e| Error::io(&path, e))?;

    log_info!("Wrote draft {path}", path: path.display().to_string());
    Ok(path)
}

// ─── Reading a finished draft ────────────────────────────────────────────────

/// A draft as edited by its author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsletterDraft {
    /// From the file name, not the front matter
    pub slug: String,
    pub title: String,
    pub subtitle: String,
    pub date: Option<String>,
    pub month: String,
    pub year: String,
    pub description: String,
    pub commentary_by_url: CommentaryByUrl,
    pub body_prose: String,
}

#[derive(Debug, Deserialize)]
struct DraftFrontmatter {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    subtitle: Option<String>,
    #[serde(default)]
    date: Option<serde_yaml_ng::Value>,
    #[serde(default)]
    month: Option<serde_yaml_ng::Value>,
    #[serde(default)]
    year: Option<serde_yaml_ng::Value>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default, rename = "commentaryByUrl", alias = "readCommentary")]
    commentary_by_url: Option<BTreeMap<String, Option<String>>>,
}

impl NewsletterDraft {
    /// Parse draft text. Month and year fall back to the slug's
    /// publication month when the author removed them.
    pub fn parse(slug: &str, text: &str) -> std::result::Result<Self, String> {
        let (yaml, body) = split_frontmatter(text).ok_or("missing front matter")?;
        let fm: DraftFrontmatter = parse_frontmatter(yaml)?;

        let title = fm
            .title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or("front matter has no title")?;

        let from_slug = TargetMonth::from_slug(slug).ok();
        let month = fm
            .month
            .as_ref()
            .and_then(scalar_to_string)
            .or_else(|| from_slug.map(|t| t.publication_month_name().to_string()))
            .unwrap_or_default();
        let year = fm
            .year
            .as_ref()
            .and_then(scalar_to_string)
            .or_else(|| from_slug.map(|t| t.publication_year.to_string()))
            .unwrap_or_default();

        let commentary_by_url = fm
            .commentary_by_url
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(url, text)| text.map(|t| (url, t)))
            .collect();

        Ok(Self {
            slug: slug.to_string(),
            title,
            subtitle: fm.subtitle.unwrap_or_default().trim().to_string(),
            date: fm.date.as_ref().and_then(scalar_to_string),
            month,
            year,
            description: fm.description.unwrap_or_default().trim().to_string(),
            commentary_by_url,
            body_prose: body.to_string(),
        })
    }

    /// Names of the parts the author has not finished yet.
    pub fn unfinished_parts(&self) -> Vec<String> {
        let mut parts = Vec::new();
        if is_placeholder(&self.subtitle) {
            parts.push("subtitle".to_string());
        }
        if is_placeholder(&self.description) {
            parts.push("description".to_string());
        }
        if self.body_prose.contains(PLACEHOLDER_MARKER) {
            parts.push("retrospective".to_string());
        }
        let pending = self
            .commentary_by_url
            .values()
            .filter(|c| is_placeholder(c))
            .count();
        if pending > 0 {
            parts.push(format!("{} read commentary placeholder(s)", pending));
        }
        parts
    }
}

/// Read `<drafts_dir>/<slug>.md`.
pub fn load_draft(drafts_dir: &Path, slug: &str) -> Result<NewsletterDraft> {
    let path = drafts_dir.join(format!("{}.md", slug));
    let text = std::fs::read_to_string(&path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::not_found("newsletter draft", &path)
        } else {
            Error::io(&path, e)
        }
    })?;
    NewsletterDraft::parse(slug, &text).map_err(|reason| Error::InvalidDraft { path, reason })
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// Double-quoted YAML scalar.
fn yaml_quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for ch in value.chars() {
        match ch {
            '\\' => quoted.push_str("\\\\"),
            '"' => quoted.push_str("\\\""),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c if c.is_control() => {
                quoted.push_str(&format!("\\u{:04X}", c as u32));
            }
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

fn placeholder_value(instruction: &str) -> String {
    yaml_quote(&format!("{}: {}", PLACEHOLDER_MARKER, instruction))
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

fn one_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Keep reference text from closing the surrounding HTML comment.
fn comment_safe(text: &str) -> String {
    text.replace("-->", "-- >")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::window::resolve_target_month;
    use chrono::{NaiveDate, TimeZone};
    use tempfile::tempdir;

    fn january_2026() -> TargetMonth {
        resolve_target_month(Some("2026-01"), &FixedClock(Utc::now())).unwrap()
    }

    fn generated_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 2, 9, 30, 0).unwrap()
    }

    fn read(title: &str, url: &str, day: u32) -> ReadEntry {
        ReadEntry {
            title: title.to_string(),
            url: url.to_string(),
            commentary: String::new(),
            excerpt: format!("{} excerpt", title),
            added_at: Utc.with_ymd_and_hms(2025, 12, day, 10, 0, 0).unwrap(),
        }
    }

    fn post() -> BlogPostRef {
        BlogPostRef {
            title: "Test Post".to_string(),
            subtitle: Some("Test Subtitle".to_string()),
            publish_date: NaiveDate::from_ymd_opt(2025, 12, 15).unwrap(),
            url: "/blog/2025-12-15-test-post/".to_string(),
            source_file: "2025-12-15-test-post.md".to_string(),
        }
    }

    #[test]
    fn test_frontmatter_fields() {
        let doc = compose_draft(&january_2026(), None, &[], generated_at()).unwrap();
        assert_eq!(doc.slug, "2026-01-january");
        assert!(doc.contents.starts_with("---\n"));
        assert!(doc.contents.contains("title: \"The Monthly Retro - January 2026\""));
        assert!(doc.contents.contains("month: \"January\""));
        assert!(doc.contents.contains("year: 2026"));
        assert!(doc.contents.contains("date: 2026-01-02"));
        assert!(doc.contents.contains("subtitle: \"[TODO: Add a catchy subtitle"));
        assert!(doc.contents.contains("description: \"[TODO: Write a 1-2 sentence"));
        assert!(doc.contents.contains("Featuring content from: December 2025"));
        assert!(doc.contents.contains("READS FROM DECEMBER 2025"));
        assert!(doc.contents.contains("No blog posts found for December 2025."));
        assert!(doc.contents.contains("No reads found for December 2025."));
    }

    #[test]
    fn test_sections_are_joined_in_order() {
        let doc = compose_draft(&january_2026(), Some(&post()), &[], generated_at()).unwrap();
        assert!(doc.contents.contains("commentaryByUrl: {}\n---\n\n<!--\n"));

        let instructions = doc.contents.find("NEWSLETTER DRAFT - JANUARY 2026").unwrap();
        let featured = doc.contents.find("BLOG POST FROM DECEMBER 2025").unwrap();
        let reads = doc.contents.find("READS FROM DECEMBER 2025").unwrap();
        assert!(instructions < featured && featured < reads);
        assert!(doc.contents.ends_with("-->\n"));
    }

    #[test]
    fn test_scaffold_parses_back() {
        let reads = vec![
            read("Article Two", "https://example.com/two", 20),
            read("Article One", "https://example.com/one", 15),
        ];
        let post = post();
        let doc = compose_draft(&january_2026(), Some(&post), &reads, generated_at()).unwrap();

        let draft = NewsletterDraft::parse(&doc.slug, &doc.contents).unwrap();
        assert_eq!(draft.title, "The Monthly Retro - January 2026");
        assert_eq!(draft.month, "January");
        assert_eq!(draft.year, "2026");
        assert_eq!(draft.date.as_deref(), Some("2026-01-02"));
        assert!(is_placeholder(&draft.subtitle));
        assert!(is_placeholder(&draft.description));
        assert_eq!(draft.commentary_by_url.len(), 2);
        for url in ["https://example.com/one", "https://example.com/two"] {
            assert!(is_placeholder(&draft.commentary_by_url[url]));
        }
        assert_eq!(
            draft.unfinished_parts(),
            vec![
                "subtitle".to_string(),
                "description".to_string(),
                "retrospective".to_string(),
                "2 read commentary placeholder(s)".to_string(),
            ]
        );
    }

    #[test]
    fn test_commentary_entries_keep_read_order() {
        let reads = vec![
            read("Newest", "https://example.com/b", 20),
            read("Oldest", "https://example.com/a", 15),
        ];
        let doc = compose_draft(&january_2026(), None, &reads, generated_at()).unwrap();
        let newest = doc.contents.find("\"https://example.com/b\":").unwrap();
        let oldest = doc.contents.find("\"https://example.com/a\":").unwrap();
        assert!(newest < oldest);
        assert!(doc.contents.contains("  # 1. Newest\n"));
        assert!(doc.contents.contains("  # 2. Oldest\n"));
    }

    #[test]
    fn test_quoted_url_stays_parseable() {
        let url = r#"https://example.com/path?foo="bar"&x=\y"#;
        let reads = vec![read("Article with Quote", url, 15)];
        let doc = compose_draft(&january_2026(), None, &reads, generated_at()).unwrap();
        assert!(doc.contents.contains(r#""https://example.com/path?foo=\"bar\"&x=\\y""#));

        let draft = NewsletterDraft::parse(&doc.slug, &doc.contents).unwrap();
        assert!(draft.commentary_by_url.contains_key(url));
    }

    #[test]
    fn test_long_title_is_truncated_in_comment() {
        let title = "x".repeat(80);
        let reads = vec![read(&title, "https://example.com/long", 15)];
        let doc = compose_draft(&january_2026(), None, &reads, generated_at()).unwrap();
        assert!(doc.contents.contains(&format!("  # 1. {}...\n", "x".repeat(60))));
    }

    #[test]
    fn test_featured_reference() {
        let post = post();
        let doc = compose_draft(&january_2026(), Some(&post), &[], generated_at()).unwrap();
        assert!(doc.contents.contains("Found blog post from December 2025"));
        assert!(doc.contents.contains("- Title: Test Post"));
        assert!(doc.contents.contains("- Subtitle: Test Subtitle"));
        assert!(doc.contents.contains("- URL: /blog/2025-12-15-test-post/"));
        assert!(doc.contents.contains("- Date: 2025-12-15"));
    }

    #[test]
    fn test_reads_reference() {
        let mut r = read("Article One", "https://example.com/one", 5);
        r.excerpt = "e".repeat(120);
        let doc = compose_draft(&january_2026(), None, &[r], generated_at()).unwrap();
        assert!(doc.contents.contains("READS REFERENCE (1 found for December 2025)"));
        assert!(doc.contents.contains("1. \"Article One\""));
        assert!(doc.contents.contains("Date Added: Dec 5"));
        assert!(doc.contents.contains(&format!("Original Excerpt: {}...", "e".repeat(100))));
    }

    #[test]
    fn test_reference_text_cannot_close_comment() {
        let r = read("Sneaky --> title", "https://example.com/s", 5);
        let doc = compose_draft(&january_2026(), None, &[r], generated_at()).unwrap();
        assert!(!doc.contents.contains("Sneaky -->"));
        // Every comment opened is closed exactly once
        assert_eq!(doc.contents.matches("<!--").count(), doc.contents.matches("-->").count());
    }

    #[test]
    fn test_write_draft_refuses_overwrite() {
        let tmp = tempdir().unwrap();
        let first = DraftDocument {
            slug: "2026-01-january".to_string(),
            contents: "first".to_string(),
        };
        let path = write_draft(&first, tmp.path(), false).unwrap();
        assert_eq!(path, tmp.path().join("2026-01-january.md"));

        let second = DraftDocument {
            contents: "second".to_string(),
            ..first.clone()
        };
        let err = write_draft(&second, tmp.path(), false).unwrap_err();
        assert!(matches!(err, Error::AlreadyExists { .. }));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first");

        write_draft(&second, tmp.path(), true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn test_write_draft_creates_directory() {
        let tmp = tempdir().unwrap();
        let dir = tmp.path().join("src").join("newsletter");
        let doc = compose_draft(&january_2026(), None, &[], generated_at()).unwrap();
        let path = write_draft(&doc, &dir, false).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_parse_legacy_commentary_key_and_string_year() {
        let text = "---\ntitle: Retro\nyear: \"2026\"\nmonth: January\nreadCommentary:\n  \"https://a.example/\": Great read\n  \"https://b.example/\": ~\n---\nBody text\n";
        let draft = NewsletterDraft::parse("2026-01-january", text).unwrap();
        assert_eq!(draft.year, "2026");
        assert_eq!(draft.commentary_by_url.len(), 1);
        assert_eq!(draft.commentary_by_url["https://a.example/"], "Great read");
        assert_eq!(draft.body_prose, "Body text\n");
        assert_eq!(draft.subtitle, "");
        assert!(draft.unfinished_parts().is_empty());
    }

    #[test]
    fn test_parse_falls_back_to_slug_month() {
        let draft = NewsletterDraft::parse("2026-02-february", "---\ntitle: Retro\n---\n").unwrap();
        assert_eq!(draft.month, "February");
        assert_eq!(draft.year, "2026");
    }

    #[test]
    fn test_parse_rejects_bad_drafts() {
        assert!(NewsletterDraft::parse("s", "no front matter").is_err());
        assert!(NewsletterDraft::parse("s", "---\nsubtitle: x\n---\n").is_err());
        assert!(NewsletterDraft::parse("s", "---\ntitle: [x\n---\n").is_err());
    }

    #[test]
    fn test_load_draft_errors_name_the_file() {
        let tmp = tempdir().unwrap();
        let err = load_draft(tmp.path(), "2026-01-january").unwrap_err();
        assert!(matches!(err, Error::ResourceNotFound { .. }));
        assert!(err.to_string().contains("2026-01-january.md"));

        std::fs::write(tmp.path().join("2026-02-february.md"), "nope").unwrap();
        let err = load_draft(tmp.path(), "2026-02-february").unwrap_err();
        assert!(matches!(err, Error::InvalidDraft { .. }));
        assert!(err.to_string().contains("2026-02-february.md"));
    }

    #[test]
    fn test_yaml_quote() {
        assert_eq!(yaml_quote("plain"), "\"plain\"");
        assert_eq!(yaml_quote("a\"b\\c"), "\"a\\\"b\\\\c\"");
        assert_eq!(yaml_quote("line\nbreak"), "\"line\\nbreak\"");
    }
}

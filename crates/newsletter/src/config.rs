// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Pipeline configuration, parsed from a YAML file such as `retro.yaml`.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration. Every field has a default that matches the
/// usual site layout, so an empty file is a valid config.
///
/// ```yaml
/// posts_dir: "src/blog"
/// snapshot_path: "src/_data/raindrop.json"
/// drafts_dir: "src/newsletter"
/// output_dir: "_site/newsletter"
/// required_tag: "to-share"
/// reads_limit: 5
///
/// site:
///   base_url: "https://example.com"
///   author: "Jane Doe"
///   reply_email: "jane@example.com"
///   social:
///     - label: "Bluesky"
///       url: "https://bsky.app/profile/jane.example.com"
///
/// fetch:
///   per_page: 50
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Directory of date-prefixed post files
    pub posts_dir: PathBuf,
    /// Listing page inside `posts_dir` that is never featured
    pub posts_index: String,
    /// Bookmark snapshot JSON
    pub snapshot_path: PathBuf,
    /// Where drafts are scaffolded and read back from
    pub drafts_dir: PathBuf,
    /// Email artifacts land in `<output_dir>/<slug>/email.html`
    pub output_dir: PathBuf,
    /// Only bookmarks carrying this tag are considered
    pub required_tag: String,
    /// Maximum reads in the email
    pub reads_limit: Option<usize>,
    pub site: SiteProfile,
    pub fetch: FetchConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            posts_dir: PathBuf::from("src/blog"),
            posts_index: crate::posts::DEFAULT_INDEX_FILE.to_string(),
            snapshot_path: PathBuf::from("src/_data/raindrop.json"),
            drafts_dir: PathBuf::from("src/newsletter"),
            output_dir: PathBuf::from("_site/newsletter"),
            required_tag: "to-share".to_string(),
            reads_limit: Some(5),
            site: SiteProfile::default(),
            fetch: FetchConfig::default(),
        }
    }
}

/// Identity of the site the newsletter belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteProfile {
    pub base_url: String,
    pub newsletter_name: String,
    pub author: String,
    pub reply_email: Option<String>,
    pub location: Option<String>,
    pub social: Vec<SocialLink>,
}

impl Default for SiteProfile {
    fn default() -> Self {
        Self {
            base_url: "https://example.com".to_string(),
            newsletter_name: "The Monthly Retro".to_string(),
            author: "Retro".to_string(),
            reply_email: None,
            location: None,
            social: Vec::new(),
        }
    }
}

impl SiteProfile {
    /// Base URL without a trailing slash.
    pub fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Host part of the base URL, for display.
    pub fn display_host(&self) -> String {
        url::Url::parse(&self.base_url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_else(|| self.base().to_string())
    }

    /// Canonical web URL of an issue.
    pub fn newsletter_url(&self, slug: &str) -> String {
        format!("{}/newsletter/{}/", self.base(), slug)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialLink {
    pub label: String,
    pub url: String,
}

/// Settings for `retro fetch`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub api_url: String,
    /// Environment variable holding the API token
    pub token_env: String,
    pub per_page: usize,
    pub timeout_seconds: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            api_url: crate::fetch::DEFAULT_API_URL.to_string(),
            token_env: "RAINDROP_TOKEN".to_string(),
            per_page: 50,
            timeout_seconds: 60,
        }
    }
}

impl PipelineConfig {
    /// Make relative paths relative to `base`.
    pub fn resolve_paths(mut self, base: &Path) -> Self {
        for path in [
            &mut self.posts_dir,
            &mut self.snapshot_path,
            &mut self.drafts_dir,
            &mut self.output_dir,
        ] {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
        self
    }

    /// Path of the draft for an issue slug.
    pub fn draft_path(&self, slug: &str) -> PathBuf {
        self.drafts_dir.join(format!("{}.md", slug))
    }

    /// Path of the email artifact for an issue slug.
    pub fn email_path(&self, slug: &str) -> PathBuf {
        self.output_dir.join(slug).join("email.html")
    }
}

/// Load configuration from a YAML file. Relative paths in the file are
/// resolved against the file's directory.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<PipelineConfig> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::not_found("config file", path)
        } else {
            Error::io(path, e)
        }
    })?;

    let config = parse_config(&content).map_err(|e| match e {
        Error::Config(msg) => Error::Config(format!("{}: {}", path.display(), msg)),
        other => other,
    })?;

    let base = path.parent().unwrap_or_else(|| Path::new("."));
    Ok(config.resolve_paths(base))
}

/// Parse and validate configuration text.
pub fn parse_config(content: &str) -> Result<PipelineConfig> {
    let config: PipelineConfig = if content.trim().is_empty() {
        PipelineConfig::default()
    } else {
        serde_yaml_ng::from_str(content)
            .map_err(|e| Error::Config(format!("failed to parse YAML: {}", e)))?
    };
    validate_config(&config)?;
    Ok(config)
}

/// Validate configuration
pub fn validate_config(config: &PipelineConfig) -> Result<()> {
    if config.required_tag.trim().is_empty() {
        return Err(Error::Config("required_tag cannot be empty".to_string()));
    }
    if config.posts_index.trim().is_empty() {
        return Err(Error::Config("posts_index cannot be empty".to_string()));
    }
    if config.reads_limit == Some(0) {
        return Err(Error::Config("reads_limit must be greater than 0".to_string()));
    }
    if config.fetch.per_page == 0 {
        return Err(Error::Config("fetch.per_page must be greater than 0".to_string()));
    }

    let base = url::Url::parse(&config.site.base_url).map_err(|e| {
        Error::Config(format!("site.base_url '{}' is invalid: {}", config.site.base_url, e))
    })?;
    if !matches!(base.scheme(), "http" | "https") {
        return Err(Error::Config(format!(
            "site.base_url '{}' must be http or https",
            config.site.base_url
        )));
    }

    for link in &config.site.social {
        if link.label.trim().is_empty() {
            return Err(Error::Config(format!("social link {} has no label", link.url)));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config, PipelineConfig::default());
        assert_eq!(config.required_tag, "to-share");
        assert_eq!(config.reads_limit, Some(5));
    }

    #[test]
    fn test_parse_partial_config() {
        let yaml = r#"
posts_dir: "content/posts"
required_tag: "newsletter"
site:
  base_url: "https://blog.example.org/"
  author: "Jane"
  social:
    - label: "Bluesky"
      url: "https://bsky.app/profile/jane"
"#;
        let config = parse_config(yaml).unwrap();
        assert_eq!(config.posts_dir, PathBuf::from("content/posts"));
        assert_eq!(config.required_tag, "newsletter");
        assert_eq!(config.snapshot_path, PathBuf::from("src/_data/raindrop.json"));
        assert_eq!(config.site.base(), "https://blog.example.org");
        assert_eq!(config.site.display_host(), "blog.example.org");
        assert_eq!(config.site.newsletter_name, "The Monthly Retro");
        assert_eq!(config.site.social.len(), 1);
        assert_eq!(
            config.site.newsletter_url("2026-01-january"),
            "https://blog.example.org/newsletter/2026-01-january/"
        );
    }

    #[test]
    fn test_validation_failures() {
        for yaml in [
            "required_tag: \"\"",
            "reads_limit: 0",
            "site:\n  base_url: \"not a url\"",
            "site:\n  base_url: \"ftp://example.com\"",
            "fetch:\n  per_page: 0",
            "posts_dir: [1, 2]",
        ] {
            let err = parse_config(yaml).unwrap_err();
            assert!(matches!(err, Error::Config(_)), "{yaml}: {err}");
        }
    }

    #[test]
    fn test_load_config_resolves_relative_paths() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("retro.yaml");
        std::fs::write(&path, "posts_dir: posts\noutput_dir: /abs/out\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.posts_dir, tmp.path().join("posts"));
        assert_eq!(config.output_dir, PathBuf::from("/abs/out"));
        assert_eq!(config.drafts_dir, tmp.path().join("src/newsletter"));
        assert_eq!(
            config.draft_path("2026-01-january"),
            tmp.path().join("src/newsletter/2026-01-january.md")
        );
        assert_eq!(
            config.email_path("2026-01-january"),
            PathBuf::from("/abs/out/2026-01-january/email.html")
        );
    }

    #[test]
    fn test_load_config_missing() {
        let tmp = tempdir().unwrap();
        let err = load_config(tmp.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(err, Error::ResourceNotFound { .. }));
    }
}

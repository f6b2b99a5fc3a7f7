// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Front matter: a leading `---` delimited YAML block.

use serde::de::DeserializeOwned;

/// Split a document into its front matter and body.
///
/// Returns `None` when the document does not open with a `---` line or the
/// block is never closed.
pub fn split_frontmatter(content: &str) -> Option<(&str, &str)> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let first_line_end = content.find('\n')?;
    if content[..first_line_end].trim_end() != "---" {
        return None;
    }
    let after = &content[first_line_end + 1..];

    let mut offset = 0;
    for line in after.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let yaml = &after[..offset];
            let body = &after[offset + line.len()..];
            return Some((yaml, body));
        }
        offset += line.len();
    }
    None
}

/// Parse a front-matter block into a typed mapping.
pub fn parse_frontmatter<T: DeserializeOwned>(yaml: &str) -> Result<T, String> {
    if yaml.trim().is_empty() {
        return Err("front matter is empty".to_string());
    }
    serde_yaml_ng::from_str(yaml).map_err(|e| e.to_string())
}

/// Render a scalar YAML value the way a human wrote it.
///
/// `year: 2026` and `year: "2026"` both become `2026`.
pub fn scalar_to_string(value: &serde_yaml_ng::Value) -> Option<String> {
    use serde_yaml_ng::Value;
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_frontmatter() {
        let (fm, body) = split_frontmatter("---\ntitle: Hi\n---\n\n# Body").unwrap();
        assert_eq!(fm, "title: Hi\n");
        assert_eq!(body, "\n# Body");
    }

    #[test]
    fn test_split_frontmatter_crlf_and_trailing_space() {
        let (fm, body) = split_frontmatter("--- \r\ntitle: Hi\r\n---\r\nBody").unwrap();
        assert_eq!(fm, "title: Hi\r\n");
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_split_frontmatter_none() {
        assert!(split_frontmatter("# Just markdown").is_none());
        assert!(split_frontmatter("---\ntitle: never closed\n").is_none());
        assert!(split_frontmatter("title: x\n---\n").is_none());
    }

    #[test]
    fn test_dashes_inside_values_do_not_close() {
        let (fm, _) = split_frontmatter("---\ntitle: a --- b\n---\nbody").unwrap();
        assert_eq!(fm, "title: a --- b\n");
    }

    #[test]
    fn test_scalar_to_string() {
        let v: serde_yaml_ng::Value = serde_yaml_ng::from_str("2026").unwrap();
        assert_eq!(scalar_to_string(&v).as_deref(), Some("2026"));
        let v: serde_yaml_ng::Value = serde_yaml_ng::from_str("\"January\"").unwrap();
        assert_eq!(scalar_to_string(&v).as_deref(), Some("January"));
        let v: serde_yaml_ng::Value = serde_yaml_ng::from_str("[1, 2]").unwrap();
        assert!(scalar_to_string(&v).is_none());
    }
}

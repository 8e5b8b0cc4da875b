//! Front-matter parsing

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use std::path::Path;

use crate::error::{Error, Result};

/// Front-matter attributes, in the order they appear in the file
pub type Attributes = IndexMap<String, serde_yaml::Value>;

/// Front-matter data from a post
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrontMatter {
    pub attributes: Attributes,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse<'a>(path: &Path, content: &'a str) -> Result<(Self, &'a str)> {
        let content = content.trim_start();

        if content.starts_with("---") {
            return Self::parse_yaml(path, content);
        }

        if content.starts_with(";;;") || content.starts_with('{') {
            return Self::parse_json(path, content);
        }

        Ok((FrontMatter::default(), content))
    }

    fn parse_yaml<'a>(path: &Path, content: &'a str) -> Result<(Self, &'a str)> {
        let rest = &content[3..];
        let rest = rest.trim_start_matches(['\n', '\r']);

        let Some(end_pos) = rest.find("\n---") else {
            // No closing fence, the leading --- is a thematic break
            return Ok((FrontMatter::default(), content));
        };

        let yaml_content = &rest[..end_pos];
        let remaining = &rest[end_pos + 4..];
        let remaining = remaining.trim_start_matches(['\n', '\r']);

        if yaml_content.trim().is_empty() {
            return Ok((FrontMatter::default(), remaining));
        }

        // Markdown that merely uses --- as a separator has no `key: value` line
        if !yaml_content.lines().any(looks_like_yaml_key) {
            return Ok((FrontMatter::default(), content));
        }

        let attributes: Attributes =
            serde_yaml::from_str(yaml_content).map_err(|e| Error::FrontMatter {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        Ok((FrontMatter { attributes }, remaining))
    }

    fn parse_json<'a>(path: &Path, content: &'a str) -> Result<(Self, &'a str)> {
        let invalid = |message: String| Error::FrontMatter {
            path: path.to_path_buf(),
            message,
        };

        // JSON front-matter fenced by ;;;
        if let Some(rest) = content.strip_prefix(";;;") {
            if let Some(end_pos) = rest.find(";;;") {
                let json_content = &rest[..end_pos];
                let remaining = &rest[end_pos + 3..];
                let remaining = remaining.trim_start_matches(['\n', '\r']);

                let attributes: Attributes =
                    serde_json::from_str(json_content).map_err(|e| invalid(e.to_string()))?;

                return Ok((FrontMatter { attributes }, remaining));
            }
        }

        // Bare JSON object at the start
        if content.starts_with('{') {
            let mut depth = 0;
            let mut end_pos = 0;
            for (i, c) in content.char_indices() {
                match c {
                    '{' => depth += 1,
                    '}' => {
                        depth -= 1;
                        if depth == 0 {
                            end_pos = i + 1;
                            break;
                        }
                    }
                    _ => {}
                }
            }

            if end_pos > 0 {
                let json_content = &content[..end_pos];
                let remaining = &content[end_pos..];
                let remaining = remaining.trim_start_matches(['\n', '\r']);

                let attributes: Attributes =
                    serde_json::from_str(json_content).map_err(|e| invalid(e.to_string()))?;

                return Ok((FrontMatter { attributes }, remaining));
            }
        }

        Err(invalid("unterminated JSON front-matter".to_string()))
    }
}

/// Whether a line has the `key: value` shape of a YAML mapping entry
fn looks_like_yaml_key(line: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return false;
    }

    let Some(colon_pos) = trimmed.find(':') else {
        return false;
    };

    let key = &trimmed[..colon_pos];
    let is_valid_key = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        && key != "http"
        && key != "https"
        && key != "ftp";

    let after_colon = &trimmed[colon_pos + 1..];
    is_valid_key && (after_colon.is_empty() || after_colon.starts_with(' '))
}

/// Read a front-matter value as a calendar date
pub fn parse_date_value(value: &serde_yaml::Value) -> Option<NaiveDate> {
    value.as_str().and_then(parse_date_string)
}

/// Parse a date string in various formats
pub fn parse_date_string(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];

    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }

    // RFC 3339 keeps the calendar date as written
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_yaml::Value;

    fn parse(content: &str) -> Result<(FrontMatter, &str)> {
        FrontMatter::parse(Path::new("post.md"), content)
    }

    #[test]
    fn test_parse_yaml_frontmatter() {
        let content = r#"---
title: Hello World
date: 2024-01-15 10:30:00
tags:
  - rust
  - blog
---

This is the content.
"#;

        let (fm, remaining) = parse(content).unwrap();
        assert_eq!(
            fm.attributes.get("title"),
            Some(&Value::String("Hello World".to_string()))
        );
        let tags = fm.attributes.get("tags").unwrap().as_sequence().unwrap();
        assert_eq!(tags.len(), 2);
        assert!(remaining.contains("This is the content."));
        assert!(!remaining.contains("title:"));
    }

    #[test]
    fn test_attribute_order_is_preserved() {
        let content = "---\nzeta: 1\nalpha: 2\nmid: 3\n---\nbody\n";
        let (fm, _) = parse(content).unwrap();
        let keys: Vec<_> = fm.attributes.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_parse_json_frontmatter() {
        let content = r#"{"title": "Test Post", "tags": ["a", "b"]}

This is content.
"#;

        let (fm, remaining) = parse(content).unwrap();
        assert_eq!(
            fm.attributes.get("title").and_then(Value::as_str),
            Some("Test Post")
        );
        assert!(remaining.contains("This is content."));
    }

    #[test]
    fn test_fenced_json_frontmatter() {
        let content = ";;;\n{\"title\": \"Fenced\"}\n;;;\nBody";
        let (fm, remaining) = parse(content).unwrap();
        assert_eq!(
            fm.attributes.get("title").and_then(Value::as_str),
            Some("Fenced")
        );
        assert_eq!(remaining, "Body");
    }

    #[test]
    fn test_no_frontmatter() {
        let (fm, remaining) = parse("plain text").unwrap();
        assert!(fm.attributes.is_empty());
        assert_eq!(remaining, "plain text");
    }

    #[test]
    fn test_markdown_separator_not_yaml() {
        let content = r#"
---

Some random text with markdown lists:
- Item 1
- Item 2

---
More content here.
"#;

        let (fm, remaining) = parse(content).unwrap();
        assert!(fm.attributes.is_empty());
        assert!(remaining.contains("Some random text"));
    }

    #[test]
    fn test_content_with_url_not_yaml() {
        let content = r#"
---

Check out https://example.com/path and http://test.com

---
More content.
"#;

        let (fm, remaining) = parse(content).unwrap();
        assert!(fm.attributes.is_empty());
        assert!(remaining.contains("https://example.com"));
    }

    #[test]
    fn test_malformed_yaml_is_an_error() {
        let content = "---\ntitle: [unclosed\n---\nbody";
        let err = parse(content).unwrap_err();
        assert!(matches!(err, Error::FrontMatter { .. }));
    }

    #[test]
    fn test_parse_date_string() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15);
        assert_eq!(parse_date_string("2024-01-15"), expected);
        assert_eq!(parse_date_string("2024/01/15 10:30"), expected);
        assert_eq!(parse_date_string("2024-01-15 10:30:00"), expected);
        assert_eq!(parse_date_string("2024-01-15T23:30:00+09:00"), expected);
        assert_eq!(parse_date_string("last tuesday"), None);
    }
}

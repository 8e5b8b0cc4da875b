//! Post models

use chrono::{DateTime, Local, NaiveDate, TimeZone};
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;

use super::frontmatter::Attributes;

/// Keys written after the other metadata, from the front-matter value when
/// present and from the typed field otherwise
const RESERVED_FIELDS: [&str; 3] = ["slug", "date", "body"];

/// A post as read from the content root, before normalization
#[derive(Debug, Clone, PartialEq)]
pub struct RawContentItem {
    /// Path relative to the content root, without the Markdown extension
    pub identifier: String,

    /// Raw markdown body (front-matter removed)
    pub body: String,

    /// Front-matter attributes
    pub attributes: Attributes,
}

impl RawContentItem {
    pub fn new(identifier: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            body: body.into(),
            attributes: Attributes::new(),
        }
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }
}

/// A render-ready post
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedPost {
    /// URL-safe name, used for the `/posts/<slug>` route
    pub slug: String,

    /// Publication date
    pub date: Option<NaiveDate>,

    /// Front-matter attributes, merged onto the post
    pub metadata: Attributes,

    /// Rendered HTML content
    pub body: String,
}

impl NormalizedPost {
    /// Publication date at local midnight
    pub fn published_at(&self) -> Option<DateTime<Local>> {
        let midnight = self.date?.and_hms_opt(0, 0, 0)?;
        Local.from_local_datetime(&midnight).earliest()
    }

    /// Title from the front-matter, if any
    pub fn title(&self) -> Option<&str> {
        self.metadata.get("title").and_then(|v| v.as_str())
    }

    pub fn get(&self, key: &str) -> Option<&serde_yaml::Value> {
        self.metadata.get(key)
    }
}

impl Serialize for NormalizedPost {
    /// Front-matter values are written as they were given. The typed `slug`
    /// and `date` fill in only when the front-matter has no such key, and
    /// the rendered body is written unless a non-string `body` attribute
    /// was given.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (key, value) in &self.metadata {
            if !RESERVED_FIELDS.contains(&key.as_str()) {
                map.serialize_entry(key, value)?;
            }
        }

        match self.metadata.get("slug") {
            Some(value) => map.serialize_entry("slug", value)?,
            None => map.serialize_entry("slug", &self.slug)?,
        }

        match (self.metadata.get("date"), self.date) {
            (Some(value), _) => map.serialize_entry("date", value)?,
            (None, Some(date)) => {
                map.serialize_entry("date", &date.format("%Y-%m-%d").to_string())?
            }
            (None, None) => {}
        }

        match self.metadata.get("body") {
            Some(value) if !value.is_string() => map.serialize_entry("body", value)?,
            _ => map.serialize_entry("body", &self.body)?,
        }

        map.end()
    }
}

/// A post record from the content API
///
/// Only the slug is interpreted; every other field is kept verbatim so the
/// downloaded data round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Deserialize, serde::Serialize)]
pub struct RemotePost {
    pub slug: String,

    #[serde(flatten)]
    pub fields: IndexMap<String, serde_json::Value>,
}

impl RemotePost {
    /// Title as plain text (`title.rendered` for WordPress records)
    pub fn title(&self) -> Option<&str> {
        rendered_or_str(self.fields.get("title")?)
    }

    /// Publication timestamp as sent by the API
    pub fn date(&self) -> Option<&str> {
        self.fields.get("date")?.as_str()
    }

    /// Rendered HTML content
    pub fn content(&self) -> Option<&str> {
        rendered_or_str(self.fields.get("content")?)
    }
}

fn rendered_or_str(value: &serde_json::Value) -> Option<&str> {
    value
        .get("rendered")
        .and_then(|v| v.as_str())
        .or_else(|| value.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_yaml::Value;

    #[test]
    fn test_serialize_flattens_metadata() {
        let mut metadata = Attributes::new();
        metadata.insert("title".to_string(), Value::String("Hello".to_string()));
        metadata.insert("slug".to_string(), Value::String("hello".to_string()));

        let post = NormalizedPost {
            slug: "hello".to_string(),
            date: NaiveDate::from_ymd_opt(2023, 4, 5),
            metadata,
            body: "<h1>Hi</h1>\n".to_string(),
        };

        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "title": "Hello",
                "slug": "hello",
                "date": "2023-04-05",
                "body": "<h1>Hi</h1>\n",
            })
        );
        assert!(json.get("attributes").is_none());
    }

    #[test]
    fn test_serialize_omits_missing_date() {
        let post = NormalizedPost {
            slug: "about".to_string(),
            date: None,
            metadata: Attributes::new(),
            body: String::new(),
        };
        let json = serde_json::to_value(&post).unwrap();
        assert!(json.get("date").is_none());
    }

    fn with_metadata(pairs: &[(&str, Value)]) -> NormalizedPost {
        NormalizedPost {
            slug: "derived".to_string(),
            date: NaiveDate::from_ymd_opt(2023, 4, 5),
            metadata: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
            body: "<p>rendered</p>\n".to_string(),
        }
    }

    #[test]
    fn test_serialize_keeps_unreadable_date_attribute() {
        let mut post = with_metadata(&[("date", Value::String("someday".to_string()))]);
        post.date = None;
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["date"], "someday");
    }

    #[test]
    fn test_serialize_keeps_date_attribute_with_time() {
        let post = with_metadata(&[("date", Value::String("2019-07-08 10:30".to_string()))]);
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["date"], "2019-07-08 10:30");
    }

    #[test]
    fn test_serialize_keeps_non_scalar_slug_attribute() {
        let slug = Value::Sequence(vec![Value::String("a".to_string())]);
        let post = with_metadata(&[("slug", slug)]);
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["slug"], serde_json::json!(["a"]));
    }

    #[test]
    fn test_serialize_body_attribute() {
        let post = with_metadata(&[("body", Value::Number(7.into()))]);
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["body"], 7);

        let post = with_metadata(&[("body", Value::String("*md*".to_string()))]);
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["body"], "<p>rendered</p>\n");
    }

    #[test]
    fn test_published_at_is_local_midnight() {
        let post = NormalizedPost {
            slug: "x".to_string(),
            date: NaiveDate::from_ymd_opt(2023, 4, 5),
            metadata: Attributes::new(),
            body: String::new(),
        };
        let at = post.published_at().unwrap();
        assert_eq!(at.format("%Y-%m-%d %H:%M:%S").to_string(), "2023-04-05 00:00:00");
    }

    #[test]
    fn test_remote_post_keeps_fields() {
        let json = r#"{"id": 7, "slug": "hello", "date": "2017-03-01T10:00:00",
            "title": {"rendered": "Hello &amp; welcome"}, "content": {"rendered": "<p>Hi</p>"}}"#;
        let post: RemotePost = serde_json::from_str(json).unwrap();
        assert_eq!(post.slug, "hello");
        assert_eq!(post.title(), Some("Hello &amp; welcome"));
        assert_eq!(post.date(), Some("2017-03-01T10:00:00"));
        assert_eq!(post.content(), Some("<p>Hi</p>"));

        let back = serde_json::to_value(&post).unwrap();
        assert_eq!(back["id"], 7);
        assert_eq!(back["slug"], "hello");
    }
}

//! Post normalization: identifier parsing, front-matter merge, body rendering

use chrono::{Duration, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;

use super::frontmatter::{parse_date_value, Attributes};
use super::markdown::MarkdownRenderer;
use super::post::{NormalizedPost, RawContentItem};
use crate::error::Result;

lazy_static! {
    static ref DATED_IDENTIFIER: Regex = Regex::new(r"^(\d{4})-(\d{2})-(\d{2})-(.*)$").unwrap();
}

/// Split a `YYYY-MM-DD-rest` identifier into its date and slug.
///
/// Identifiers without the prefix are returned unchanged with no date. The
/// date components are not range checked: they go through calendar rollover,
/// so `2023-13-01` is January 1st 2024 and `2023-02-30` is March 2nd. Years
/// `0000` to `0099` are read as 1900 to 1999, so `0023-01-01` is 1923.
pub fn parse_identifier(identifier: &str) -> (String, Option<NaiveDate>) {
    let Some(caps) = DATED_IDENTIFIER.captures(identifier) else {
        return (identifier.to_string(), None);
    };

    // Two and four digit captures always fit
    let year: i32 = caps[1].parse().unwrap_or_default();
    let month: i64 = caps[2].parse().unwrap_or_default();
    let day: i64 = caps[3].parse().unwrap_or_default();

    match rollover_date(year, month - 1, day) {
        Some(date) => (caps[4].to_string(), Some(date)),
        None => (identifier.to_string(), None),
    }
}

/// Build a date from a 0-based month index and a day, carrying overflow
/// into the following months and years
fn rollover_date(year: i32, month_index: i64, day: i64) -> Option<NaiveDate> {
    let year = if (0..=99).contains(&year) { year + 1900 } else { year };
    let months = i64::from(year) * 12 + month_index;
    let year = i32::try_from(months.div_euclid(12)).ok()?;
    let month = u32::try_from(months.rem_euclid(12)).ok()? + 1;
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    first.checked_add_signed(Duration::days(day - 1))
}

/// Normalize one raw post.
///
/// The steps run in a fixed order:
/// 1. the identifier yields the slug and, if date-prefixed, the date;
/// 2. every front-matter attribute is merged onto the post, so `slug`,
///    `date` and `body` attributes override what step 1 and the file body
///    provided;
/// 3. the body is rendered to HTML.
pub fn normalize(
    identifier: &str,
    raw_body: &str,
    attributes: Attributes,
    renderer: &MarkdownRenderer,
) -> Result<NormalizedPost> {
    let (mut slug, mut date) = parse_identifier(identifier);
    let mut body = raw_body.to_string();

    for (key, value) in &attributes {
        match key.as_str() {
            "slug" => {
                if let Some(s) = scalar_to_string(value) {
                    slug = s;
                }
            }
            "date" => date = parse_date_value(value),
            "body" => {
                if let Some(s) = value.as_str() {
                    body = s.to_string();
                }
            }
            _ => {}
        }
    }

    let body = renderer.render(&body)?;

    Ok(NormalizedPost {
        slug,
        date,
        metadata: attributes,
        body,
    })
}

/// Normalize a raw item, consuming it
pub fn normalize_item(item: RawContentItem, renderer: &MarkdownRenderer) -> Result<NormalizedPost> {
    normalize(&item.identifier, &item.body, item.attributes, renderer)
}

/// Normalize every item in order, stopping at the first failure
pub fn normalize_all<I>(items: I, renderer: &MarkdownRenderer) -> Result<Vec<NormalizedPost>>
where
    I: IntoIterator<Item = RawContentItem>,
{
    items
        .into_iter()
        .map(|item| {
            let identifier = item.identifier.clone();
            normalize_item(item, renderer).inspect_err(|e| {
                tracing::error!("Failed to render post {}: {}", identifier, e);
            })
        })
        .collect()
}

fn scalar_to_string(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

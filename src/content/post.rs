//! Post models

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Parse a Prismic timestamp (`2021-03-25T19:25:28+0000`) or an RFC 3339 one
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::<FixedOffset>::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%z")
        .or_else(|_| DateTime::parse_from_rfc3339(value))
        .ok()
        .map(|d| d.with_timezone(&Utc))
}

/// Deserializer for nullable publication timestamps
pub(crate) fn nullable_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(s) => parse_timestamp(&s)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", s))),
    }
}

/// A post as shown in the listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostSummary {
    /// Slug
    pub id: String,

    #[serde(deserialize_with = "nullable_timestamp", default)]
    pub publication_date: Option<DateTime<Utc>>,

    pub title: String,
    pub subtitle: String,
    pub author: String,
}

/// One paragraph of a section body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    pub text: String,
}

impl Paragraph {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// A headed section of a post
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ContentSection {
    pub heading: String,
    #[serde(default)]
    pub body: Vec<Paragraph>,
}

/// The full content of a single post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostContent {
    #[serde(deserialize_with = "nullable_timestamp", default)]
    pub publication_date: Option<DateTime<Utc>>,

    pub title: String,
    pub banner_url: String,
    pub banner_alt: String,
    pub author: String,

    #[serde(default)]
    pub sections: Vec<ContentSection>,
}

impl PostContent {
    /// Estimated reading time in minutes
    pub fn reading_time(&self) -> u32 {
        super::reading::estimate(&self.sections)
    }
}

/// One page of a paginated post feed
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PageResult {
    pub items: Vec<PostSummary>,
    /// Opaque locator of the next page; `None` when the feed is exhausted
    pub next_cursor: Option<String>,
}

impl PageResult {
    pub fn new(items: Vec<PostSummary>, next_cursor: Option<String>) -> Self {
        Self { items, next_cursor }
    }
}

//! Tool record types
//!
//! A [`WebTool`] is a single bookmarked link with its tags, note and visit
//! counter. Records serialize in camelCase so stored snapshots and backup files
//! keep the same JSON shape across versions.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// A bookmarked web tool
///
/// Deserialization is lenient: snapshots and imports are only required to be
/// arrays of objects, so a missing, null or wrongly typed field falls back to
/// its default instead of rejecting the record. A record without an identifier
/// receives a freshly generated one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebTool {
    /// Opaque unique identifier, never changed after creation
    #[serde(default = "new_tool_id", deserialize_with = "lenient_id")]
    pub id: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub url: String,

    /// Ordered tag list without exact duplicates
    #[serde(default, deserialize_with = "lenient_tags")]
    pub tags: Vec<String>,

    /// Number of recorded visits, only ever incremented
    #[serde(default, deserialize_with = "lenient_count")]
    pub visits: u64,

    #[serde(default, deserialize_with = "lenient_string")]
    pub note: String,

    /// Creation time in epoch milliseconds
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: i64,
}

/// Generates a new random tool identifier
pub fn new_tool_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn lenient_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => new_tool_id(),
    })
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

/// Keeps the string entries of a tag array; anything else yields no tags
fn lenient_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

fn lenient_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite() && *f > 0.0).map(|f| f as u64))
            .unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
            .unwrap_or(0),
        _ => 0,
    })
}

impl WebTool {
    /// Builds a fresh record from user-supplied fields
    pub fn from_draft(draft: ToolDraft, id: String, created_at: i64) -> Self {
        Self {
            id,
            title: draft.title,
            url: draft.url,
            tags: draft.tags,
            visits: 0,
            note: draft.note,
            created_at,
        }
    }

    /// Extracts the user-editable fields, e.g. to prefill an edit
    pub fn to_draft(&self) -> ToolDraft {
        ToolDraft {
            title: self.title.clone(),
            url: self.url.clone(),
            tags: self.tags.clone(),
            note: self.note.clone(),
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// The mutable fields of a tool record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDraft {
    pub title: String,
    pub url: String,
    pub tags: Vec<String>,
    pub note: String,
}

impl ToolDraft {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            ..Default::default()
        }
    }

    /// Adds each tag through [`add_tag`], dropping blanks and duplicates
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for tag in tags {
            add_tag(&mut self.tags, tag.as_ref());
        }
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }
}

/// Appends a trimmed tag unless it is empty or already present
///
/// Matching is exact and case-sensitive. Returns `true` when the tag was added.
pub fn add_tag(tags: &mut Vec<String>, input: &str) -> bool {
    let trimmed = input.trim();
    if trimmed.is_empty() || tags.iter().any(|t| t == trimmed) {
        return false;
    }
    tags.push(trimmed.to_string());
    true
}

/// Removes an exact tag match. Returns `true` when something was removed.
pub fn remove_tag(tags: &mut Vec<String>, tag: &str) -> bool {
    let before = tags.len();
    tags.retain(|t| t != tag);
    tags.len() != before
}

/// Heading of a group in the grouped view
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "tag", rename_all = "snake_case")]
pub enum GroupLabel {
    Tag(String),
    Untagged,
    SearchResults,
}

impl fmt::Display for GroupLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupLabel::Tag(tag) => write!(f, "{}", tag),
            GroupLabel::Untagged => write!(f, "Uncategorized"),
            GroupLabel::SearchResults => write!(f, "Search results"),
        }
    }
}

/// A labelled slice of the collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryGroup {
    pub label: GroupLabel,
    pub tools: Vec<WebTool>,
}

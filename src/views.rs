//! Derived views over the tool collection
//!
//! All functions here are pure: they take the collection (and the search query
//! where relevant) and recompute the view from scratch, so there is no cached
//! state to invalidate when the collection changes.

use crate::tool::{CategoryGroup, GroupLabel, WebTool};
use std::collections::BTreeSet;

/// Number of entries in the most-visited view
pub const TOP_TOOLS_LIMIT: usize = 4;

/// Maximum number of tag suggestions for a partial input
pub const TAG_SUGGESTION_LIMIT: usize = 8;

/// Suggestions shown when nothing matched an empty input
pub const TAG_FALLBACK_LIMIT: usize = 5;

/// Every distinct tag in the collection, sorted
///
/// Order is by Unicode code point, case-sensitive, so `"Zed"` sorts before
/// `"alpha"`. This can differ from UTF-16 code unit order for characters
/// outside the Basic Multilingual Plane.
pub fn all_tags(tools: &[WebTool]) -> Vec<String> {
    tools
        .iter()
        .flat_map(|t| t.tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// The most visited records, highest first
///
/// Uses a stable sort so records with equal visit counts keep their collection
/// order.
pub fn top_tools(tools: &[WebTool]) -> Vec<&WebTool> {
    let mut sorted: Vec<&WebTool> = tools.iter().collect();
    sorted.sort_by(|a, b| b.visits.cmp(&a.visits));
    sorted.truncate(TOP_TOOLS_LIMIT);
    sorted
}

/// Case-insensitive substring match against title, note and tags
pub fn matches_query(tool: &WebTool, query: &str) -> bool {
    let needle = query.to_lowercase();
    tool.title.to_lowercase().contains(&needle)
        || tool.note.to_lowercase().contains(&needle)
        || tool.tags.iter().any(|tag| tag.to_lowercase().contains(&needle))
}

/// Groups the collection for display
///
/// With a non-empty query the matching records form a single search group.
/// Without one, every tag gets a group (a record appears once per tag) in tag
/// order, followed by the group of untagged records. Empty groups are omitted.
pub fn grouped_tools(tools: &[WebTool], query: Option<&str>) -> Vec<CategoryGroup> {
    if let Some(query) = query.filter(|q| !q.is_empty()) {
        let matched: Vec<WebTool> = tools
            .iter()
            .filter(|t| matches_query(t, query))
            .cloned()
            .collect();
        if matched.is_empty() {
            return Vec::new();
        }
        return vec![CategoryGroup {
            label: GroupLabel::SearchResults,
            tools: matched,
        }];
    }

    let mut groups: Vec<CategoryGroup> = all_tags(tools)
        .into_iter()
        .map(|tag| {
            let members = tools.iter().filter(|t| t.has_tag(&tag)).cloned().collect();
            CategoryGroup {
                label: GroupLabel::Tag(tag),
                tools: members,
            }
        })
        .collect();

    let untagged: Vec<WebTool> = tools.iter().filter(|t| t.tags.is_empty()).cloned().collect();
    if !untagged.is_empty() {
        groups.push(CategoryGroup {
            label: GroupLabel::Untagged,
            tools: untagged,
        });
    }

    groups
}

/// Tags to offer while the user types a new tag
///
/// Already selected tags are never suggested.
pub fn suggest_tags(all: &[String], selected: &[String], input: &str) -> Vec<String> {
    let needle = input.to_lowercase();
    let unselected = all.iter().filter(|t| !selected.contains(t));

    let matched: Vec<String> = unselected
        .clone()
        .filter(|t| t.to_lowercase().contains(&needle))
        .take(TAG_SUGGESTION_LIMIT)
        .cloned()
        .collect();

    if matched.is_empty() && input.is_empty() {
        return unselected.take(TAG_FALLBACK_LIMIT).cloned().collect();
    }
    matched
}

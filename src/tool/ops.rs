//! Collection mutations
//!
//! Each operation takes the current collection and returns the next one. The
//! caller decides when to persist; nothing here touches storage.

use super::types::{ToolDraft, WebTool};

/// Prepends a new record built from `draft`
pub fn create(tools: &[WebTool], draft: ToolDraft, id: String, created_at: i64) -> Vec<WebTool> {
    let mut next = Vec::with_capacity(tools.len() + 1);
    next.push(WebTool::from_draft(draft, id, created_at));
    next.extend_from_slice(tools);
    next
}

/// Replaces title, url, tags and note of the record with `id`
///
/// Identifier, visit count and creation time are preserved. Unknown ids leave
/// the collection unchanged.
pub fn update(tools: &[WebTool], id: &str, draft: &ToolDraft) -> Vec<WebTool> {
    tools
        .iter()
        .map(|t| {
            if t.id == id {
                WebTool {
                    title: draft.title.clone(),
                    url: draft.url.clone(),
                    tags: draft.tags.clone(),
                    note: draft.note.clone(),
                    ..t.clone()
                }
            } else {
                t.clone()
            }
        })
        .collect()
}

pub fn delete(tools: &[WebTool], id: &str) -> Vec<WebTool> {
    tools.iter().filter(|t| t.id != id).cloned().collect()
}

/// Increments the visit count of exactly one record
pub fn record_visit(tools: &[WebTool], id: &str) -> Vec<WebTool> {
    tools
        .iter()
        .map(|t| {
            if t.id == id {
                WebTool {
                    visits: t.visits.saturating_add(1),
                    ..t.clone()
                }
            } else {
                t.clone()
            }
        })
        .collect()
}

pub fn find<'a>(tools: &'a [WebTool], id: &str) -> Option<&'a WebTool> {
    tools.iter().find(|t| t.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<WebTool> {
        vec![
            WebTool::from_draft(
                ToolDraft::new("GitHub", "https://github.com").with_tags(["dev"]),
                "a".into(),
                1,
            ),
            WebTool::from_draft(ToolDraft::new("Figma", "https://figma.com"), "b".into(), 2),
        ]
    }

    #[test]
    fn test_create_prepends_with_zero_visits() {
        let tools = sample();
        let next = create(&tools, ToolDraft::new("New", "https://new.dev"), "c".into(), 99);
        assert_eq!(next.len(), 3);
        assert_eq!(next[0].id, "c");
        assert_eq!(next[0].visits, 0);
        assert_eq!(next[0].created_at, 99);
        assert_eq!(&next[1..], &tools[..]);
    }

    #[test]
    fn test_update_keeps_identity_fields() {
        let mut tools = sample();
        tools[0].visits = 7;
        let draft = ToolDraft::new("GitHub Enterprise", "https://ghe.io").with_note("work");
        let next = update(&tools, "a", &draft);
        assert_eq!(next[0].title, "GitHub Enterprise");
        assert_eq!(next[0].note, "work");
        assert!(next[0].tags.is_empty());
        assert_eq!(next[0].visits, 7);
        assert_eq!(next[0].created_at, 1);
        assert_eq!(next[1], tools[1]);
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let tools = sample();
        let next = update(&tools, "missing", &ToolDraft::new("x", "y"));
        assert_eq!(next, tools);
    }

    #[test]
    fn test_delete_removes_only_target() {
        let next = delete(&sample(), "a");
        assert_eq!(next.len(), 1);
        assert_eq!(next[0].id, "b");
    }

    #[test]
    fn test_record_visit_touches_only_target() {
        let tools = sample();
        let next = record_visit(&tools, "b");
        assert_eq!(next[1].visits, tools[1].visits + 1);
        assert_eq!(next[0], tools[0]);
    }

    #[test]
    fn test_find() {
        let tools = sample();
        assert_eq!(find(&tools, "b").map(|t| t.title.as_str()), Some("Figma"));
        assert!(find(&tools, "z").is_none());
    }
}

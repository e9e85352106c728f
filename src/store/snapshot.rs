//! Snapshot persistence of the whole collection
//!
//! The collection is stored as one JSON array under a single key and rewritten
//! in full after every change. Storage problems never reach the caller: a
//! failed read falls back to the seed dataset and a failed write is logged.

use super::backend::KeyValueStore;
use crate::tool::WebTool;
use serde_json::Value;
use tracing::{debug, error, warn};

/// Where the loaded collection came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A non-empty snapshot was read from the store
    Stored,
    /// The store was empty, unreadable or held no records; the seed was used
    Seeded,
}

struct SeedTool {
    id: &'static str,
    title: &'static str,
    url: &'static str,
    tags: &'static [&'static str],
    visits: u64,
    note: &'static str,
}

const SEED_TOOLS: &[SeedTool] = &[
    SeedTool {
        id: "init-1",
        title: "Google Gemini",
        url: "https://gemini.google.com",
        tags: &["AI", "Google", "助手"],
        visits: 124,
        note: "Google 最强大的多模态 AI 模型",
    },
    SeedTool {
        id: "init-2",
        title: "GitHub",
        url: "https://github.com",
        tags: &["开发", "代码", "工具"],
        visits: 89,
        note: "全球最大的代码托管平台",
    },
    SeedTool {
        id: "init-3",
        title: "Tailwind CSS",
        url: "https://tailwindcss.com",
        tags: &["开发", "CSS", "文档"],
        visits: 76,
        note: "原子化 CSS 框架文档",
    },
    SeedTool {
        id: "init-4",
        title: "Figma",
        url: "https://www.figma.com",
        tags: &["设计", "UI/UX", "工具"],
        visits: 55,
        note: "在线界面设计协作工具",
    },
    SeedTool {
        id: "init-5",
        title: "Vercel",
        url: "https://vercel.com",
        tags: &["开发", "部署", "Serverless"],
        visits: 42,
        note: "前端应用部署和托管平台",
    },
    SeedTool {
        id: "init-6",
        title: "YouTube",
        url: "https://youtube.com",
        tags: &["娱乐", "视频"],
        visits: 310,
        note: "视频分享和观看平台",
    },
    SeedTool {
        id: "init-7",
        title: "Excalidraw",
        url: "https://excalidraw.com",
        tags: &["工具", "绘图", "开源"],
        visits: 28,
        note: "手绘风格的虚拟白板",
    },
    SeedTool {
        id: "init-8",
        title: "React",
        url: "https://react.dev",
        tags: &["开发", "框架", "文档"],
        visits: 95,
        note: "用于构建 Web 和原生用户界面的库",
    },
    SeedTool {
        id: "init-9",
        title: "Notion",
        url: "https://www.notion.so",
        tags: &["工具", "笔记", "生产力"],
        visits: 150,
        note: "多合一笔记和协作工作区",
    },
];

/// The example collection shown when nothing has been stored yet
pub fn seed_tools(created_at: i64) -> Vec<WebTool> {
    SEED_TOOLS
        .iter()
        .map(|seed| WebTool {
            id: seed.id.to_string(),
            title: seed.title.to_string(),
            url: seed.url.to_string(),
            tags: seed.tags.iter().map(|t| t.to_string()).collect(),
            visits: seed.visits,
            note: seed.note.to_string(),
            created_at,
        })
        .collect()
}

/// Reads the stored collection, falling back to the seed dataset
pub fn load(store: &dyn KeyValueStore, key: &str) -> (Vec<WebTool>, LoadOutcome) {
    let seed = || {
        (
            seed_tools(chrono::Utc::now().timestamp_millis()),
            LoadOutcome::Seeded,
        )
    };

    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!(key, "No snapshot stored, using seed data");
            return seed();
        }
        Err(e) => {
            error!(key, error = %e, "Failed to load tools from storage");
            return seed();
        }
    };

    let items = match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Array(items)) => items,
        Ok(_) => {
            warn!(key, "Stored snapshot is not an array, using seed data");
            return seed();
        }
        Err(e) => {
            warn!(key, error = %e, "Stored snapshot is not valid JSON, using seed data");
            return seed();
        }
    };

    let total = items.len();
    let tools: Vec<WebTool> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();
    if tools.len() < total {
        warn!(key, skipped = total - tools.len(), "Dropped stored entries that are not tool objects");
    }

    if tools.is_empty() {
        debug!(key, "Stored snapshot holds no tools, using seed data");
        return seed();
    }
    debug!(key, count = tools.len(), "Loaded snapshot");
    (tools, LoadOutcome::Stored)
}

/// Replaces the stored snapshot with `tools`; failures are logged and dropped
pub fn save(store: &dyn KeyValueStore, key: &str, tools: &[WebTool]) {
    let serialized = match serde_json::to_string(tools) {
        Ok(s) => s,
        Err(e) => {
            error!(key, error = %e, "Failed to serialize tools");
            return;
        }
    };

    match store.set(key, &serialized) {
        Ok(()) => debug!(key, count = tools.len(), "Saved snapshot"),
        Err(e) => error!(key, error = %e, "Failed to save tools to storage"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::backend::{MemoryStore, StoreError};
    use crate::tool::ToolDraft;

    const KEY: &str = "tools";

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Unavailable("disk on fire".into()))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("disk on fire".into()))
        }
    }

    #[test]
    fn test_seed_dataset_shape() {
        let seed = seed_tools(7);
        assert_eq!(seed.len(), 9);
        assert_eq!(seed[0].id, "init-1");
        assert_eq!(seed[5].visits, 310);
        assert!(seed.iter().all(|t| t.created_at == 7));
    }

    #[test]
    fn test_seed_keeps_original_labels() {
        let seed = seed_tools(0);
        assert_eq!(seed[0].tags, vec!["AI", "Google", "助手"]);
        assert_eq!(seed[1].note, "全球最大的代码托管平台");
        assert_eq!(seed.iter().filter(|t| t.has_tag("开发")).count(), 4);
    }

    #[test]
    fn test_load_absent_returns_seed() {
        let (tools, outcome) = load(&MemoryStore::new(), KEY);
        assert_eq!(outcome, LoadOutcome::Seeded);
        assert_eq!(tools.len(), 9);
    }

    #[test]
    fn test_load_empty_array_returns_seed() {
        let store = MemoryStore::with_value(KEY, "[]");
        let (_, outcome) = load(&store, KEY);
        assert_eq!(outcome, LoadOutcome::Seeded);
    }

    #[test]
    fn test_load_garbage_returns_seed() {
        for raw in ["not json", "{\"a\":1}", "42", "[1,2,3]"] {
            let store = MemoryStore::with_value(KEY, raw);
            let (_, outcome) = load(&store, KEY);
            assert_eq!(outcome, LoadOutcome::Seeded, "input: {}", raw);
        }
    }

    #[test]
    fn test_load_store_error_returns_seed() {
        let (tools, outcome) = load(&BrokenStore, KEY);
        assert_eq!(outcome, LoadOutcome::Seeded);
        assert!(!tools.is_empty());
    }

    #[test]
    fn test_save_then_load_roundtrip() {
        let store = MemoryStore::new();
        let mut tool = WebTool::from_draft(
            ToolDraft::new("Docs", "https://docs.rs").with_tags(["rust"]).with_note("crate docs"),
            "abc".into(),
            1_700_000_000_000,
        );
        tool.visits = 3;
        let tools = vec![tool];

        save(&store, KEY, &tools);
        let (loaded, outcome) = load(&store, KEY);
        assert_eq!(outcome, LoadOutcome::Stored);
        assert_eq!(loaded, tools);
    }

    #[test]
    fn test_load_keeps_records_with_null_fields() {
        let raw = r#"[{"id":"mine","title":"Mine","url":"https://mine.dev","tags":null,"visits":2,"note":null,"createdAt":5}]"#;
        let store = MemoryStore::with_value(KEY, raw);

        let (tools, outcome) = load(&store, KEY);
        assert_eq!(outcome, LoadOutcome::Stored);
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].id, "mine");
        assert_eq!(tools[0].visits, 2);
        assert_eq!(tools[0].note, "");
        assert!(tools[0].tags.is_empty());
    }

    #[test]
    fn test_load_skips_non_object_entries() {
        let store = MemoryStore::with_value(KEY, r#"[{"id":"a","title":"A"}, 5, "x"]"#);
        let (tools, outcome) = load(&store, KEY);
        assert_eq!(outcome, LoadOutcome::Stored);
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].id, "a");
    }

    #[test]
    fn test_save_swallows_errors() {
        save(&BrokenStore, KEY, &seed_tools(0));
    }
}

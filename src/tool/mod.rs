//! Tool records and the operations that change them

pub mod ops;
pub mod types;

pub use types::{add_tag, new_tool_id, remove_tag, CategoryGroup, GroupLabel, ToolDraft, WebTool};

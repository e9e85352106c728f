//! ppx-toolbox - personal bookmark and tool organizer
//!
//! Keeps a collection of web tools (title, URL, tags, note, visit count) in a
//! local key-value store, derives grouped and ranked views from it, and
//! round-trips the whole collection through JSON backups.
//!
//! # Core Concepts
//!
//! - **Tool record**: a bookmarked link with metadata, see [`WebTool`]
//! - **Snapshot persistence**: the full collection is rewritten on every
//!   change, see [`store::snapshot`]
//! - **Derived views**: tag list, most visited tools and tag groups are pure
//!   functions of the collection and the search query, see [`views`]
//!
//! # Example Usage
//!
//! ```
//! use ppx_toolbox::interact::{AssumeYes, NoOpOpener};
//! use ppx_toolbox::store::MemoryStore;
//! use ppx_toolbox::{ToolDraft, ToolboxService};
//!
//! let mut service = ToolboxService::open(
//!     Box::new(MemoryStore::new()),
//!     "tools",
//!     Box::new(AssumeYes),
//!     Box::new(NoOpOpener),
//! );
//!
//! service.create(ToolDraft::new("docs.rs", "https://docs.rs").with_tags(["rust"]));
//! let groups = service.grouped(Some("rust"));
//! assert_eq!(groups[0].tools[0].title, "docs.rs");
//! ```

pub mod cli;
pub mod config;
pub mod interact;
pub mod service;
pub mod store;
pub mod tool;
pub mod util;
pub mod views;

pub use config::{ConfigError, ToolboxConfig};
pub use service::{ImportOutcome, ServiceError, ToolboxService};
pub use tool::{CategoryGroup, GroupLabel, ToolDraft, WebTool};
pub use util::{init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

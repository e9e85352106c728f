//! Toolbox service orchestration
//!
//! [`ToolboxService`] owns the in-memory collection together with the store it
//! mirrors. Every mutation computes the next collection with the pure
//! operations in [`crate::tool::ops`], swaps it in, and writes the full
//! snapshot back to the store.
//!
//! # Example
//!
//! ```no_run
//! use ppx_toolbox::interact::{AssumeYes, NoOpOpener};
//! use ppx_toolbox::store::FileStore;
//! use ppx_toolbox::tool::ToolDraft;
//! use ppx_toolbox::ToolboxService;
//!
//! let store = FileStore::new("/tmp/toolbox");
//! let mut service = ToolboxService::open(
//!     Box::new(store),
//!     "ppx_toolbox_data_v2",
//!     Box::new(AssumeYes),
//!     Box::new(NoOpOpener),
//! );
//!
//! let id = service
//!     .create(ToolDraft::new("docs.rs", "https://docs.rs").with_tags(["rust"]))
//!     .id
//!     .clone();
//! service.visit(&id).expect("visit");
//! ```

use crate::interact::{Confirmer, UrlOpener};
use crate::store::backup::{self, ImportError};
use crate::store::snapshot::{self, LoadOutcome};
use crate::store::KeyValueStore;
use crate::tool::{new_tool_id, ops, CategoryGroup, ToolDraft, WebTool};
use crate::views;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during toolbox operations
#[derive(Debug, Error)]
pub enum ServiceError {
    /// No tool with the given identifier
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// Backup file could not be imported
    #[error("Import failed: {0}")]
    Import(#[from] ImportError),

    /// Backup file could not be written
    #[error("Export failed: {0}")]
    Export(String),

    /// The URL handler could not be launched
    #[error("Failed to open {url}: {message}")]
    Open { url: String, message: String },

    /// The confirmation prompt itself failed
    #[error("Confirmation failed: {0}")]
    Confirmation(String),
}

impl ServiceError {
    /// Returns a user-friendly error message with troubleshooting hints
    pub fn help_message(&self) -> String {
        match self {
            ServiceError::NotFound(id) => {
                format!(
                    "Error: Tool not found\nId: {}\n\n\
                    Help: List tools with their ids:\n\
                    - toolbox list --format json",
                    id
                )
            }
            ServiceError::Import(err) => {
                format!(
                    "Import failed: invalid file format\n\n\
                    Help: The backup must be a JSON array of tools, as written by\n\
                    'toolbox export'. Current data was left unchanged.\n\n\
                    Details: {}",
                    err
                )
            }
            ServiceError::Export(msg) => {
                format!(
                    "Error: Export failed\n\n\
                    Help: Check that the output directory is writable:\n\
                    - toolbox export --output-dir <DIR>\n\
                    - TOOLBOX_EXPORT_DIR\n\n\
                    Details: {}",
                    msg
                )
            }
            ServiceError::Open { url, message } => {
                format!(
                    "Error: Could not open {}\n\n\
                    Help: The visit was recorded. Set TOOLBOX_OPEN_COMMAND to the\n\
                    program that should open links, or pass --no-open.\n\n\
                    Details: {}",
                    url, message
                )
            }
            ServiceError::Confirmation(msg) => format!("Error: Could not read confirmation: {}", msg),
        }
    }
}

/// Result of an import request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOutcome {
    /// The collection was replaced with this many records
    Replaced(usize),
    /// The user declined; nothing changed
    Declined,
}

/// Collection manager backed by a key-value store
pub struct ToolboxService {
    store: Box<dyn KeyValueStore>,
    key: String,
    tools: Vec<WebTool>,
    confirmer: Box<dyn Confirmer>,
    opener: Box<dyn UrlOpener>,
}

impl ToolboxService {
    /// Loads the collection from `store`
    ///
    /// When the store yields no records the seed dataset is loaded and written
    /// back immediately.
    pub fn open(
        store: Box<dyn KeyValueStore>,
        key: impl Into<String>,
        confirmer: Box<dyn Confirmer>,
        opener: Box<dyn UrlOpener>,
    ) -> Self {
        let key = key.into();
        let (tools, outcome) = snapshot::load(store.as_ref(), &key);
        let service = Self {
            store,
            key,
            tools,
            confirmer,
            opener,
        };
        if outcome == LoadOutcome::Seeded {
            info!(count = service.tools.len(), "Initialized toolbox with example tools");
            service.persist();
        }
        service
    }

    pub fn tools(&self) -> &[WebTool] {
        &self.tools
    }

    pub fn get(&self, id: &str) -> Option<&WebTool> {
        ops::find(&self.tools, id)
    }

    pub fn all_tags(&self) -> Vec<String> {
        views::all_tags(&self.tools)
    }

    pub fn top_tools(&self) -> Vec<&WebTool> {
        views::top_tools(&self.tools)
    }

    pub fn grouped(&self, query: Option<&str>) -> Vec<CategoryGroup> {
        views::grouped_tools(&self.tools, query)
    }

    fn persist(&self) {
        snapshot::save(self.store.as_ref(), &self.key, &self.tools);
    }

    fn replace(&mut self, next: Vec<WebTool>) {
        self.tools = next;
        self.persist();
    }

    fn require(&self, id: &str) -> Result<&WebTool, ServiceError> {
        self.get(id).ok_or_else(|| ServiceError::NotFound(id.to_string()))
    }

    fn confirm(&self, message: &str) -> Result<bool, ServiceError> {
        self.confirmer
            .confirm(message)
            .map_err(|e| ServiceError::Confirmation(e.to_string()))
    }

    /// Adds a new tool at the front of the collection
    pub fn create(&mut self, draft: ToolDraft) -> &WebTool {
        let id = new_tool_id();
        let now = chrono::Utc::now().timestamp_millis();
        info!(id = %id, title = %draft.title, "Creating tool");
        let next = ops::create(&self.tools, draft, id, now);
        self.replace(next);
        &self.tools[0]
    }

    /// Replaces the editable fields of an existing tool
    pub fn update(&mut self, id: &str, draft: &ToolDraft) -> Result<&WebTool, ServiceError> {
        self.require(id)?;
        info!(id, title = %draft.title, "Updating tool");
        let next = ops::update(&self.tools, id, draft);
        self.replace(next);
        self.require(id)
    }

    /// Removes a tool after confirmation
    ///
    /// Returns `Ok(false)` when the user declined.
    pub fn delete(&mut self, id: &str) -> Result<bool, ServiceError> {
        let title = self.require(id)?.title.clone();
        if !self.confirm(&format!("Delete '{}'?", title))? {
            debug!(id, "Delete declined");
            return Ok(false);
        }
        info!(id, title = %title, "Deleting tool");
        let next = ops::delete(&self.tools, id);
        self.replace(next);
        Ok(true)
    }

    /// Counts a visit and opens the tool's URL
    ///
    /// The incremented count is persisted before the URL handler runs, so an
    /// opener failure still leaves the visit recorded.
    pub fn visit(&mut self, id: &str) -> Result<&WebTool, ServiceError> {
        self.require(id)?;
        let next = ops::record_visit(&self.tools, id);
        self.replace(next);

        let tool = self.require(id)?;
        info!(id, visits = tool.visits, "Recorded visit");
        if let Err(e) = self.opener.open(&tool.url) {
            warn!(id, url = %tool.url, error = %e, "Failed to open tool URL");
            return Err(ServiceError::Open {
                url: tool.url.clone(),
                message: format!("{:#}", e),
            });
        }
        Ok(tool)
    }

    /// Replaces the collection with the contents of a backup file
    ///
    /// A malformed file leaves the collection untouched. A valid file is only
    /// applied after confirmation.
    pub async fn import(&mut self, path: &Path) -> Result<ImportOutcome, ServiceError> {
        let imported = backup::import(path).await.map_err(|e| {
            warn!(path = %path.display(), error = %e, "Import failed");
            e
        })?;
        self.apply_import(imported)
    }

    /// Confirms and applies an already parsed backup
    pub fn apply_import(&mut self, imported: Vec<WebTool>) -> Result<ImportOutcome, ServiceError> {
        let count = imported.len();
        let message = format!(
            "Import {} tools? This will overwrite current data.",
            count
        );
        if !self.confirm(&message)? {
            debug!(count, "Import declined");
            return Ok(ImportOutcome::Declined);
        }
        info!(count, "Importing tools");
        self.replace(imported);
        Ok(ImportOutcome::Replaced(count))
    }

    /// Writes a dated backup into `dir`
    pub fn export(&self, dir: &Path) -> Result<PathBuf, ServiceError> {
        backup::export(&self.tools, dir).map_err(|e| ServiceError::Export(format!("{:#}", e)))
    }
}

//! JSON backup export and import
//!
//! Exports are pretty-printed arrays named after the current UTC date. Imports
//! only insist that the file holds a JSON array of objects; field values are
//! not validated, and missing, null or mistyped fields take their defaults.

use crate::tool::WebTool;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde_json::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while importing a backup
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid file format: expected an array of tools, found {found}")]
    NotAnArray { found: &'static str },

    /// An array element that is not a JSON object cannot become a tool record
    #[error("Invalid tool at index {index}: {message}")]
    InvalidRecord { index: usize, message: String },
}

/// Backup file name for the given day, e.g. `ppx_toolbox_backup_2024-05-01.json`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("ppx_toolbox_backup_{}.json", date.format("%Y-%m-%d"))
}

/// Pretty-printed JSON for a backup file
pub fn to_backup_json(tools: &[WebTool]) -> Result<String> {
    serde_json::to_string_pretty(tools).context("Failed to serialize tools for export")
}

/// Writes a dated backup of `tools` into `dir` and returns the file path
pub fn export(tools: &[WebTool], dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory {}", dir.display()))?;

    let path = dir.join(export_file_name(chrono::Utc::now().date_naive()));
    let contents = to_backup_json(tools)?;
    fs::write(&path, contents)
        .with_context(|| format!("Failed to write backup file {}", path.display()))?;

    info!(path = %path.display(), count = tools.len(), "Exported tools");
    Ok(path)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Parses backup text into a tool list
pub fn parse_import(text: &str) -> Result<Vec<WebTool>, ImportError> {
    let value: Value = serde_json::from_str(text)?;
    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(ImportError::NotAnArray {
                found: json_kind(&other),
            })
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            if !item.is_object() {
                return Err(ImportError::InvalidRecord {
                    index,
                    message: format!("expected an object, found {}", json_kind(&item)),
                });
            }
            serde_json::from_value(item).map_err(|e| ImportError::InvalidRecord {
                index,
                message: e.to_string(),
            })
        })
        .collect()
}

/// Reads and parses a backup file
pub async fn import(path: &Path) -> Result<Vec<WebTool>, ImportError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ImportError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    let tools = parse_import(&text)?;
    debug!(path = %path.display(), count = tools.len(), "Parsed backup file");
    Ok(tools)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_export_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(export_file_name(date), "ppx_toolbox_backup_2024-03-09.json");
    }

    #[test]
    fn test_parse_import_rejects_object() {
        let err = parse_import(r#"{"a":1}"#).unwrap_err();
        assert!(matches!(err, ImportError::NotAnArray { found: "an object" }));
    }

    #[test]
    fn test_parse_import_rejects_invalid_json() {
        assert!(matches!(parse_import("[{"), Err(ImportError::Parse(_))));
    }

    #[test]
    fn test_parse_import_accepts_empty_array() {
        assert!(parse_import("[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_import_rejects_non_object_elements() {
        let err = parse_import(r#"[{"title":"ok"}, 5]"#).unwrap_err();
        match err {
            ImportError::InvalidRecord { index, message } => {
                assert_eq!(index, 1);
                assert_eq!(message, "expected an object, found a number");
            }
            other => panic!("Expected InvalidRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_import_accepts_null_and_mistyped_fields() {
        let tools = parse_import(
            r#"[{"id":"a","title":"A","note":null,"tags":null,"visits":"7"},
                {"id":"b","title":false,"url":null,"createdAt":null}]"#,
        )
        .unwrap();
        assert_eq!(tools.len(), 2);
        assert_eq!(tools[0].note, "");
        assert!(tools[0].tags.is_empty());
        assert_eq!(tools[0].visits, 7);
        assert_eq!(tools[1].id, "b");
        assert_eq!(tools[1].title, "");
        assert_eq!(tools[1].created_at, 0);
    }

    #[test]
    fn test_parse_import_keeps_partial_records() {
        let tools = parse_import(r#"[{"id":"x","title":"Partial","visits":3}]"#).unwrap();
        assert_eq!(tools[0].id, "x");
        assert_eq!(tools[0].visits, 3);
        assert!(tools[0].url.is_empty());
    }

    #[test]
    fn test_export_is_pretty_and_reimportable() {
        let dir = TempDir::new().unwrap();
        let tools = crate::store::snapshot::seed_tools(5);

        let path = export(&tools, &dir.path().join("backups")).unwrap();
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("ppx_toolbox_backup_"));
        assert!(name.ends_with(".json"));

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("[\n  {"));
        assert_eq!(parse_import(&text).unwrap(), tools);
    }

    #[tokio::test]
    async fn test_import_missing_file() {
        let err = import(Path::new("/nonexistent/backup.json")).await.unwrap_err();
        assert!(matches!(err, ImportError::Read { .. }));
    }
}

//! Reading logsheet and team records

use serde_json::Value;
use std::fs;
use std::path::Path;

use crate::error::{Result, SyncError};

/// The two fields of a record that decide where it is stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: String,
    pub version: String,
}

/// Read `id` and `version` from a JSON record on disk
pub fn read_record(path: &Path) -> Result<Record> {
    let content = fs::read_to_string(path).map_err(|e| SyncError::MalformedDocument {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    parse_record(&content, path)
}

/// Parse record content. `path` is only used for error messages.
pub fn parse_record(content: &str, path: &Path) -> Result<Record> {
    let document: Value =
        serde_json::from_str(content).map_err(|e| SyncError::MalformedDocument {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let object = document
        .as_object()
        .ok_or_else(|| SyncError::MalformedDocument {
            path: path.to_path_buf(),
            message: "expected a JSON object".to_string(),
        })?;

    let field = |name: &'static str| {
        object
            .get(name)
            .map(field_text)
            .ok_or_else(|| SyncError::MissingField {
                path: path.to_path_buf(),
                field: name,
            })
    };

    Ok(Record {
        id: field("id")?,
        version: field("version")?,
    })
}

/// Strings are taken without quotes; anything else in its JSON text form
fn field_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

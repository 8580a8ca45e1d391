use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// A single substitution made while rewriting a schema document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "change", rename_all = "snake_case")]
pub enum RewriteChange {
    EnumRemoved { name: String },
    FieldRetyped { type_name: String, default: String },
    TypeReplaced { type_name: String },
}

impl RewriteChange {
    /// Human-readable description of this change.
    pub fn describe(&self) -> String {
        match self {
            RewriteChange::EnumRemoved { name } => {
                format!("Enum '{}' removed", name)
            }
            RewriteChange::FieldRetyped { type_name, default } => {
                format!(
                    "'{} @default({})' -> 'String @default(\"{}\")'",
                    type_name, default, default
                )
            }
            RewriteChange::TypeReplaced { type_name } => {
                format!("'{}' -> 'String'", type_name)
            }
        }
    }

    /// The enum type this change belongs to
    pub fn type_name(&self) -> &str {
        match self {
            RewriteChange::EnumRemoved { name } => name,
            RewriteChange::FieldRetyped { type_name, .. } => type_name,
            RewriteChange::TypeReplaced { type_name } => type_name,
        }
    }
}

/// Outcome of rewriting one schema file
#[derive(Debug, Clone, Serialize)]
pub struct RewriteReport {
    pub path: PathBuf,
    /// False for dry runs
    pub written: bool,
    pub changes: Vec<RewriteChange>,
}

impl RewriteReport {
    /// True when no rule matched anything
    pub fn is_noop(&self) -> bool {
        self.changes.is_empty()
    }

    /// Names of the enum declarations that were deleted, in document order.
    pub fn removed_enums(&self) -> Vec<&str> {
        self.changes
            .iter()
            .filter_map(|c| match c {
                RewriteChange::EnumRemoved { name } => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Count of field rewrites per enum type. Removed declarations are not counted.
    pub fn retyped_counts(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for change in &self.changes {
            if matches!(change, RewriteChange::EnumRemoved { .. }) {
                continue;
            }
            *counts.entry(change.type_name()).or_insert(0) += 1;
        }
        counts
    }

    /// Summary suitable for printing with serde_json or serde_yaml.
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::json!({
            "path": self.path.display().to_string(),
            "written": self.written,
            "enums_removed": self.removed_enums(),
            "fields_retyped": self.retyped_counts(),
            "changes": self.changes.iter().map(|c| c.describe()).collect::<Vec<_>>(),
        })
    }
}

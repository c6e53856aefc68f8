use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A document known to the store, identified by its vault-relative path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRef {
    pub path: String,
    pub modified: Option<DateTime<Utc>>,
}

impl DocumentRef {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            modified: None,
        }
    }

    pub fn with_modified(mut self, modified: DateTime<Utc>) -> Self {
        self.modified = Some(modified);
        self
    }
}

/// A requested tag mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "lowercase")]
pub enum TagOperation {
    Add {
        tags: Vec<String>,
    },
    Remove {
        tags: Vec<String>,
    },
    Replace {
        find: Vec<String>,
        replacement: Vec<String>,
        replace_all: bool,
    },
}

impl TagOperation {
    pub fn name(&self) -> &'static str {
        match self {
            TagOperation::Add { .. } => "add",
            TagOperation::Remove { .. } => "remove",
            TagOperation::Replace { .. } => "replace",
        }
    }
}

/// One document whose tag list actually changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub path: String,
    pub old_tags: Vec<String>,
    pub new_tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified: Option<DateTime<Utc>>,
}

/// Outcome of one batch run.
///
/// `considered` is the number of resolved targets, regardless of failures,
/// skips or cancellation. `processed` counts the targets actually visited
/// before the batch finished or was cancelled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResult {
    pub changed: Vec<ChangeRecord>,
    pub considered: usize,
    #[serde(default)]
    pub processed: usize,
    #[serde(default)]
    pub failed: Vec<String>,
    #[serde(default)]
    pub cancelled: bool,
}

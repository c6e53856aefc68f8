use super::DocumentStore;
use crate::error::{RetagError, Result};
use crate::model::DocumentRef;
use chrono::Utc;
use std::collections::HashSet;

/// In-memory document store for testing.
///
/// Documents are listed in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    documents: Vec<(DocumentRef, String)>,
    failing_reads: HashSet<String>,
    failing_writes: HashSet<String>,
    writes: Vec<String>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a document.
    pub fn insert(&mut self, path: &str, content: &str) {
        match self.documents.iter_mut().find(|(d, _)| d.path == path) {
            Some((_, existing)) => *existing = content.to_string(),
            None => self
                .documents
                .push((DocumentRef::new(path), content.to_string())),
        }
    }

    pub fn with_document(mut self, path: &str, content: &str) -> Self {
        self.insert(path, content);
        self
    }

    pub fn content(&self, path: &str) -> Option<&str> {
        self.documents
            .iter()
            .find(|(d, _)| d.path == path)
            .map(|(_, c)| c.as_str())
    }

    /// Make every read of `path` fail.
    pub fn fail_reads_of(&mut self, path: &str) {
        self.failing_reads.insert(path.to_string());
    }

    /// Make every write of `path` fail.
    pub fn fail_writes_of(&mut self, path: &str) {
        self.failing_writes.insert(path.to_string());
    }

    /// Paths written so far, in order.
    pub fn writes(&self) -> &[String] {
        &self.writes
    }
}

impl DocumentStore for InMemoryStore {
    fn list_documents(&self) -> Result<Vec<DocumentRef>> {
        Ok(self.documents.iter().map(|(d, _)| d.clone()).collect())
    }

    fn read_document(&self, doc: &DocumentRef) -> Result<String> {
        if self.failing_reads.contains(&doc.path) {
            return Err(RetagError::Store(format!("Simulated read error: {}", doc.path)));
        }
        self.content(&doc.path)
            .map(str::to_string)
            .ok_or_else(|| RetagError::DocumentNotFound(doc.path.clone()))
    }

    fn write_document(&mut self, doc: &DocumentRef, content: &str) -> Result<()> {
        if self.failing_writes.contains(&doc.path) {
            return Err(RetagError::Store(format!("Simulated write error: {}", doc.path)));
        }
        let entry = self
            .documents
            .iter_mut()
            .find(|(d, _)| d.path == doc.path)
            .ok_or_else(|| RetagError::DocumentNotFound(doc.path.clone()))?;
        entry.0.modified = Some(Utc::now());
        entry.1 = content.to_string();
        self.writes.push(doc.path.clone());
        Ok(())
    }
}

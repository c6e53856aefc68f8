//! # Storage Layer
//!
//! The batch engine never touches the filesystem directly. Everything it
//! needs from the host is captured by the [`DocumentStore`] trait:
//!
//! - list every document in the collection,
//! - read one document's text,
//! - write one document's text back.
//!
//! ## Implementations
//!
//! - [`fs::VaultStore`]: a directory on disk (the vault). Hidden entries such
//!   as `.obsidian/` or `.retag/` are not part of the collection. Writes go
//!   through a temp file and a rename so a document is never half-written.
//!
//! - [`memory::InMemoryStore`]: documents held in memory for tests, with
//!   switches to make individual reads or writes fail.
//!
//! ## Consistency
//!
//! Each document is read, transformed and written on its own. There is no
//! cross-document transaction, and no check that a document was left alone
//! between its read and its write: the last writer wins.

use crate::error::Result;
use crate::model::DocumentRef;

pub mod fs;
pub mod memory;

/// Host capability the batch engine operates through.
pub trait DocumentStore {
    /// Every document in the collection, in a stable order.
    fn list_documents(&self) -> Result<Vec<DocumentRef>>;

    /// Full text of one document.
    fn read_document(&self, doc: &DocumentRef) -> Result<String>;

    /// Replace the full text of one document.
    fn write_document(&mut self, doc: &DocumentRef, content: &str) -> Result<()>;
}

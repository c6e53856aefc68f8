use super::DocumentStore;
use crate::error::{RetagError, Result};
use crate::model::DocumentRef;
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Component, Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// A vault directory on disk.
///
/// Symlinks to files are documents like any other: they are listed under the
/// link's own path, and writes go to the file the link points at so the link
/// itself survives. Symlinked directories are not descended into.
pub struct VaultStore {
    root: PathBuf,
}

impl VaultStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a vault-relative path onto the filesystem, refusing anything that
    /// would escape the root.
    fn document_path(&self, doc: &DocumentRef) -> Result<PathBuf> {
        let relative = Path::new(&doc.path);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));
        if doc.path.is_empty() || escapes {
            return Err(RetagError::Store(format!(
                "Invalid document path: {}",
                doc.path
            )));
        }
        Ok(self.root.join(relative))
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .map(|name| name.starts_with('.'))
            .unwrap_or(false)
}

fn vault_relative(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Option<Vec<&str>> = relative.components().map(|c| c.as_os_str().to_str()).collect();
    Some(parts?.join("/"))
}

impl DocumentStore for VaultStore {
    fn list_documents(&self) -> Result<Vec<DocumentRef>> {
        if !self.root.is_dir() {
            return Err(RetagError::Store(format!(
                "Vault directory not found: {}",
                self.root.display()
            )));
        }

        let mut docs = Vec::new();
        let walker = WalkDir::new(&self.root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| !is_hidden(e));
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping unreadable vault entry");
                    continue;
                }
            };
            let linked_file = entry.path_is_symlink() && entry.path().is_file();
            if !entry.file_type().is_file() && !linked_file {
                continue;
            }
            let Some(path) = vault_relative(&self.root, entry.path()) else {
                tracing::warn!(path = %entry.path().display(), "Skipping non UTF-8 path");
                continue;
            };
            let mut doc = DocumentRef::new(path);
            let modified = fs::metadata(entry.path()).and_then(|m| m.modified());
            if let Ok(modified) = modified {
                doc = doc.with_modified(DateTime::<Utc>::from(modified));
            }
            docs.push(doc);
        }

        docs.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(docs)
    }

    fn read_document(&self, doc: &DocumentRef) -> Result<String> {
        let path = self.document_path(doc)?;
        if !path.is_file() {
            return Err(RetagError::DocumentNotFound(doc.path.clone()));
        }
        Ok(fs::read_to_string(path)?)
    }

    fn write_document(&mut self, doc: &DocumentRef, content: &str) -> Result<()> {
        let mut path = self.document_path(doc)?;
        if fs::symlink_metadata(&path)?.file_type().is_symlink() {
            path = fs::canonicalize(&path)?;
        }
        let permissions = fs::metadata(&path)?.permissions();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| RetagError::Store(format!("Invalid document path: {}", doc.path)))?;
        let tmp = path.with_file_name(format!(".{}.retag-tmp", file_name));

        fs::write(&tmp, content)?;
        let replaced = fs::set_permissions(&tmp, permissions).and_then(|_| fs::rename(&tmp, &path));
        if let Err(e) = replaced {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn vault() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("notes/sub")).unwrap();
        fs::create_dir_all(root.join(".obsidian")).unwrap();
        fs::write(root.join("notes/a.md"), "a").unwrap();
        fs::write(root.join("notes/sub/b.md"), "b").unwrap();
        fs::write(root.join("notes/.draft.md"), "hidden").unwrap();
        fs::write(root.join(".obsidian/app.md"), "{}").unwrap();
        fs::write(root.join("root.md"), "r").unwrap();
        fs::write(root.join("picture.png"), "png").unwrap();
        dir
    }

    #[test]
    fn test_lists_relative_sorted_paths_without_hidden() {
        let dir = vault();
        let store = VaultStore::new(dir.path());
        let paths: Vec<String> = store
            .list_documents()
            .unwrap()
            .into_iter()
            .map(|d| d.path)
            .collect();
        assert_eq!(
            paths,
            vec!["notes/a.md", "notes/sub/b.md", "picture.png", "root.md"]
        );
    }

    #[test]
    fn test_list_reports_modification_time() {
        let dir = vault();
        let store = VaultStore::new(dir.path());
        let docs = store.list_documents().unwrap();
        assert!(docs.iter().all(|d| d.modified.is_some()));
    }

    #[test]
    fn test_read_and_write() {
        let dir = vault();
        let mut store = VaultStore::new(dir.path());
        let doc = DocumentRef::new("notes/sub/b.md");
        assert_eq!(store.read_document(&doc).unwrap(), "b");

        store.write_document(&doc, "changed").unwrap();
        assert_eq!(
            fs::read_to_string(dir.path().join("notes/sub/b.md")).unwrap(),
            "changed"
        );
        assert!(!dir.path().join("notes/sub/.b.md.retag-tmp").exists());
    }

    #[test]
    fn test_read_missing_document() {
        let dir = vault();
        let store = VaultStore::new(dir.path());
        let result = store.read_document(&DocumentRef::new("nope.md"));
        assert!(matches!(result, Err(RetagError::DocumentNotFound(_))));
    }

    #[test]
    fn test_rejects_paths_outside_vault() {
        let dir = vault();
        let mut store = VaultStore::new(dir.path().join("notes"));
        let doc = DocumentRef::new("../root.md");
        assert!(store.read_document(&doc).is_err());
        assert!(store.write_document(&doc, "x").is_err());
        assert_eq!(fs::read_to_string(dir.path().join("root.md")).unwrap(), "r");
    }

    #[cfg(unix)]
    #[test]
    fn test_write_keeps_file_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = vault();
        let file = dir.path().join("notes/a.md");
        fs::set_permissions(&file, fs::Permissions::from_mode(0o600)).unwrap();

        let mut store = VaultStore::new(dir.path());
        store
            .write_document(&DocumentRef::new("notes/a.md"), "changed")
            .unwrap();

        let mode = fs::metadata(&file).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(fs::read_to_string(&file).unwrap(), "changed");
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_documents_are_listed_and_written_through() {
        let dir = vault();
        let root = dir.path();
        let outside = TempDir::new().unwrap();
        let target = outside.path().join("shared.md");
        fs::write(&target, "shared").unwrap();
        std::os::unix::fs::symlink(&target, root.join("notes/link.md")).unwrap();
        std::os::unix::fs::symlink(outside.path(), root.join("linked-dir")).unwrap();

        let mut store = VaultStore::new(root);
        let docs = store.list_documents().unwrap();
        let link = docs
            .iter()
            .find(|d| d.path == "notes/link.md")
            .expect("symlinked file is listed");
        assert!(link.modified.is_some());
        assert!(!docs.iter().any(|d| d.path.starts_with("linked-dir/")));

        store
            .write_document(&DocumentRef::new("notes/link.md"), "changed")
            .unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "changed");
        assert!(fs::symlink_metadata(root.join("notes/link.md"))
            .unwrap()
            .file_type()
            .is_symlink());
    }

    #[test]
    fn test_missing_vault() {
        let store = VaultStore::new("/definitely/not/a/vault");
        assert!(store.list_documents().is_err());
    }
}

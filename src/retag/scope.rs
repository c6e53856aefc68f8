//! # Scope Resolution
//!
//! A batch never runs against "whatever is in the vault" implicitly. The
//! caller names a [`ScopeSpec`], and [`resolve`] turns it into the concrete,
//! ordered list of documents the batch will visit:
//!
//! - [`ScopeSpec::EntireCollection`]: every document.
//! - [`ScopeSpec::PathPrefix`]: a single document when the path names one
//!   (with or without its extension), otherwise every document under that
//!   prefix.
//! - [`ScopeSpec::ExplicitList`]: exactly the listed documents, in the listed
//!   order. Unknown paths are dropped.
//!
//! Only paths ending in the document extension are ever candidates. An empty
//! result is an error ([`RetagError::NoTargets`]) so that a typo in a folder
//! name can't masquerade as "nothing needed changing".

use crate::error::{RetagError, Result};
use crate::model::DocumentRef;
use std::collections::HashSet;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const FOLDER_DISPLAY_WIDTH: usize = 40;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeSpec {
    EntireCollection,
    PathPrefix(String),
    ExplicitList(Vec<String>),
}

impl ScopeSpec {
    /// Builds a scope from the raw folder and files fields.
    ///
    /// The files field is split on commas and newlines. A non-empty file list
    /// wins over the folder; with neither, the whole collection is in scope.
    pub fn from_inputs(folder: Option<&str>, files: Option<&str>) -> Self {
        let files: Vec<String> = files
            .unwrap_or_default()
            .split([',', '\n'])
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if !files.is_empty() {
            return ScopeSpec::ExplicitList(files);
        }

        match folder.map(str::trim) {
            Some(f) if !f.is_empty() => ScopeSpec::PathPrefix(f.to_string()),
            _ => ScopeSpec::EntireCollection,
        }
    }

    pub fn is_entire_collection(&self) -> bool {
        matches!(self, ScopeSpec::EntireCollection)
    }

    /// Human-readable suffix for summaries, e.g. ` in "notes"`.
    pub fn describe(&self) -> String {
        match self {
            ScopeSpec::EntireCollection => " (entire vault)".to_string(),
            ScopeSpec::PathPrefix(p) => format!(" in \"{}\"", shorten_front(p)),
            ScopeSpec::ExplicitList(files) => format!(
                " in {} specified file{}",
                files.len(),
                if files.len() == 1 { "" } else { "s" }
            ),
        }
    }
}

impl std::fmt::Display for ScopeSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScopeSpec::EntireCollection => write!(f, "entire vault"),
            ScopeSpec::PathPrefix(p) => write!(f, "{}", p),
            ScopeSpec::ExplicitList(files) => write!(f, "{}", files.join(", ")),
        }
    }
}

fn strip_slashes(path: &str) -> &str {
    path.trim_matches('/')
}

/// Keeps the tail of a long path: `...` plus the last columns that fit.
fn shorten_front(path: &str) -> String {
    if path.width() <= FOLDER_DISPLAY_WIDTH {
        return path.to_string();
    }
    let budget = FOLDER_DISPLAY_WIDTH - 3;
    let mut width = 0;
    let mut tail: Vec<char> = Vec::new();
    for c in path.chars().rev() {
        let w = c.width().unwrap_or(0);
        if width + w > budget {
            break;
        }
        width += w;
        tail.push(c);
    }
    let tail: String = tail.into_iter().rev().collect();
    format!("...{}", tail)
}

/// Resolves `spec` against the full document index.
pub fn resolve(spec: &ScopeSpec, index: &[DocumentRef], ext: &str) -> Result<Vec<DocumentRef>> {
    let documents: Vec<&DocumentRef> = index.iter().filter(|d| d.path.ends_with(ext)).collect();

    let targets: Vec<DocumentRef> = match spec {
        ScopeSpec::EntireCollection => documents.into_iter().cloned().collect(),
        ScopeSpec::ExplicitList(paths) => {
            let mut seen = HashSet::new();
            paths
                .iter()
                .map(|p| strip_slashes(p))
                .filter_map(|p| documents.iter().find(|d| d.path == p))
                .filter(|d| seen.insert(d.path.as_str()))
                .map(|d| (*d).clone())
                .collect()
        }
        ScopeSpec::PathPrefix(p) => {
            let prefix = strip_slashes(p);
            if prefix.is_empty() {
                documents.into_iter().cloned().collect()
            } else {
                let with_ext = format!("{}{}", prefix, ext);
                match documents
                    .iter()
                    .find(|d| d.path == prefix || d.path == with_ext)
                {
                    Some(doc) => vec![(*doc).clone()],
                    None => documents
                        .into_iter()
                        .filter(|d| d.path.starts_with(prefix))
                        .cloned()
                        .collect(),
                }
            }
        }
    };

    if targets.is_empty() {
        return Err(RetagError::NoTargets);
    }
    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(paths: &[&str]) -> Vec<DocumentRef> {
        paths.iter().map(|p| DocumentRef::new(*p)).collect()
    }

    fn paths(docs: &[DocumentRef]) -> Vec<&str> {
        docs.iter().map(|d| d.path.as_str()).collect()
    }

    fn vault() -> Vec<DocumentRef> {
        index(&[
            "notes/a.md",
            "notes/sub/b.md",
            "notes/image.png",
            "other/c.md",
            "readme.md",
        ])
    }

    #[test]
    fn test_folder_prefix() {
        let docs = resolve(&ScopeSpec::PathPrefix("notes".into()), &vault(), ".md").unwrap();
        assert_eq!(paths(&docs), vec!["notes/a.md", "notes/sub/b.md"]);
    }

    #[test]
    fn test_folder_prefix_strips_slashes() {
        let docs = resolve(&ScopeSpec::PathPrefix("/notes/sub/".into()), &vault(), ".md").unwrap();
        assert_eq!(paths(&docs), vec!["notes/sub/b.md"]);
    }

    #[test]
    fn test_single_file_with_and_without_extension() {
        let exact = resolve(&ScopeSpec::PathPrefix("notes/a.md".into()), &vault(), ".md").unwrap();
        assert_eq!(paths(&exact), vec!["notes/a.md"]);

        let bare = resolve(&ScopeSpec::PathPrefix("notes/a".into()), &vault(), ".md").unwrap();
        assert_eq!(paths(&bare), vec!["notes/a.md"]);
    }

    #[test]
    fn test_entire_collection_filters_extension() {
        let docs = resolve(&ScopeSpec::EntireCollection, &vault(), ".md").unwrap();
        assert_eq!(
            paths(&docs),
            vec!["notes/a.md", "notes/sub/b.md", "other/c.md", "readme.md"]
        );
    }

    #[test]
    fn test_empty_prefix_is_entire_collection() {
        let docs = resolve(&ScopeSpec::PathPrefix("/".into()), &vault(), ".md").unwrap();
        assert_eq!(docs.len(), 4);
    }

    #[test]
    fn test_explicit_list_keeps_order_and_drops_unknown() {
        let spec = ScopeSpec::ExplicitList(vec![
            "/other/c.md".into(),
            "missing.md".into(),
            "notes/a.md".into(),
            "other/c.md".into(),
        ]);
        let docs = resolve(&spec, &vault(), ".md").unwrap();
        assert_eq!(paths(&docs), vec!["other/c.md", "notes/a.md"]);
    }

    #[test]
    fn test_non_documents_are_never_targets() {
        let spec = ScopeSpec::ExplicitList(vec!["notes/image.png".into()]);
        assert!(matches!(
            resolve(&spec, &vault(), ".md"),
            Err(RetagError::NoTargets)
        ));
    }

    #[test]
    fn test_no_match_is_error() {
        let result = resolve(&ScopeSpec::PathPrefix("nowhere".into()), &vault(), ".md");
        assert!(matches!(result, Err(RetagError::NoTargets)));
        assert!(matches!(
            resolve(&ScopeSpec::EntireCollection, &[], ".md"),
            Err(RetagError::NoTargets)
        ));
    }

    #[test]
    fn test_from_inputs() {
        assert_eq!(ScopeSpec::from_inputs(None, None), ScopeSpec::EntireCollection);
        assert_eq!(
            ScopeSpec::from_inputs(Some("  "), Some(" , ")),
            ScopeSpec::EntireCollection
        );
        assert_eq!(
            ScopeSpec::from_inputs(Some(" notes "), None),
            ScopeSpec::PathPrefix("notes".into())
        );
        assert_eq!(
            ScopeSpec::from_inputs(Some("notes"), Some("a.md,\n b.md")),
            ScopeSpec::ExplicitList(vec!["a.md".into(), "b.md".into()])
        );
    }

    #[test]
    fn test_describe() {
        assert_eq!(ScopeSpec::EntireCollection.describe(), " (entire vault)");
        assert_eq!(
            ScopeSpec::ExplicitList(vec!["a.md".into()]).describe(),
            " in 1 specified file"
        );
        assert_eq!(
            ScopeSpec::PathPrefix("notes".into()).describe(),
            " in \"notes\""
        );

        let long = "projects/2024/clients/acme/meetings/weekly/notes";
        let described = ScopeSpec::PathPrefix(long.into()).describe();
        assert_eq!(described, " in \"...24/clients/acme/meetings/weekly/notes\"");
    }
}

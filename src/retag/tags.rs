//! # Tag Set Transformer
//!
//! Pure functions computing a document's new tag list. No I/O happens here.
//!
//! Tags compare case-insensitively but are stored with the casing they were
//! first written with. Every transformation returns a list in which no two
//! entries are equal ignoring case, keeping the first occurrence.
//!
//! [`transform`] returns `None` when the operation leaves the list exactly as
//! it was, which is how the batch decides whether a document changed. Applying
//! the same operation to its own output always yields `None`.

use crate::frontmatter::{Frontmatter, FrontmatterValue};
use crate::model::TagOperation;
use std::collections::HashSet;

pub const TAGS_KEY: &str = "tags";

fn fold(tag: &str) -> String {
    tag.to_lowercase()
}

fn same_tag(a: &str, b: &str) -> bool {
    a == b || fold(a) == fold(b)
}

/// Removes case-insensitive duplicates, keeping the first occurrence.
pub fn dedupe(tags: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    tags.into_iter()
        .filter(|tag| seen.insert(fold(tag)))
        .collect()
}

/// Splits comma-separated user input into trimmed, non-empty tags.
pub fn parse_tag_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Reads the current tags of a document.
///
/// A sequence keeps its order, a scalar becomes a single tag. Entries are
/// trimmed, empties dropped and case-insensitive duplicates removed.
pub fn extract_tags(frontmatter: Option<&Frontmatter>) -> Vec<String> {
    let raw: Vec<String> = match frontmatter.and_then(|fm| fm.get(TAGS_KEY)) {
        Some(FrontmatterValue::Sequence(items)) => items.clone(),
        Some(FrontmatterValue::Scalar(s)) => vec![s.clone()],
        None => Vec::new(),
    };
    dedupe(
        raw.into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty()),
    )
}

/// Computes the new tag list for `current` under `op`, or `None` if nothing changes.
pub fn transform(current: &[String], op: &TagOperation) -> Option<Vec<String>> {
    let new_tags = match op {
        TagOperation::Add { tags } => add(current, tags),
        TagOperation::Remove { tags } => remove(current, tags),
        TagOperation::Replace {
            find,
            replacement,
            replace_all: false,
        } => replace_pairwise(current, find, replacement),
        TagOperation::Replace {
            find,
            replacement,
            replace_all: true,
        } => replace_all(current, find, replacement)?,
    };

    if new_tags.as_slice() == current {
        None
    } else {
        Some(new_tags)
    }
}

fn add(current: &[String], tags: &[String]) -> Vec<String> {
    let requested = tags.iter().map(|t| t.trim()).filter(|t| !t.is_empty());
    dedupe(
        current
            .iter()
            .cloned()
            .chain(requested.map(str::to_string)),
    )
}

fn remove(current: &[String], tags: &[String]) -> Vec<String> {
    let remove: HashSet<String> = tags.iter().map(|t| fold(t.trim())).collect();
    dedupe(
        current
            .iter()
            .filter(|t| !remove.contains(&fold(t)))
            .cloned(),
    )
}

/// Each `find[i]` maps to `replacement[i]`. A single replacement covers every
/// find entry without its own pair; otherwise unpaired matches are deleted.
/// Rules apply in order, so a tag rewritten by one rule can be matched by a
/// later one.
fn replace_pairwise(current: &[String], find: &[String], replacement: &[String]) -> Vec<String> {
    let mut tags = current.to_vec();
    for (i, needle) in find.iter().enumerate() {
        let substitute = replacement
            .get(i)
            .or(if replacement.len() == 1 {
                replacement.first()
            } else {
                None
            });
        match substitute {
            Some(r) => {
                for tag in tags.iter_mut().filter(|t| same_tag(t.as_str(), needle)) {
                    *tag = r.clone();
                }
            }
            None => tags.retain(|t| !same_tag(t, needle)),
        }
    }
    dedupe(tags)
}

/// Discards the whole list in favour of `replacement` when any tag matches any
/// find entry. Returns `None` when nothing matches.
fn replace_all(current: &[String], find: &[String], replacement: &[String]) -> Option<Vec<String>> {
    let matched = find
        .iter()
        .any(|needle| current.iter().any(|t| same_tag(t, needle)));
    matched.then(|| dedupe(replacement.iter().cloned()))
}

//! # Batch Processor
//!
//! Drives one tag operation across every document in a scope:
//!
//! 1. Resolve the scope into targets (an empty scope is an error).
//! 2. For each target, in order: read it, decode its frontmatter, compute the
//!    new tags, and if they differ re-encode the document and write it back.
//! 3. Collect a [`ChangeRecord`] for every document whose tags changed.
//!
//! A dry run takes exactly the same path and only skips the write, so a
//! preview always matches what applying would do.
//!
//! A failure on one document (unreadable file, rejected write) is logged and
//! recorded in [`BatchResult::failed`]; the batch carries on with the next
//! document. Documents already written stay written.
//!
//! The cancel token is checked before each document. A cancelled batch
//! returns what it finished so far, flagged with [`BatchResult::cancelled`].

use crate::cancel::CancelToken;
use crate::error::{RetagError, Result};
use crate::frontmatter::{self, FrontmatterValue};
use crate::model::{BatchResult, ChangeRecord, DocumentRef, TagOperation};
use crate::scope::{self, ScopeSpec};
use crate::store::DocumentStore;
use crate::tags::{self, TAGS_KEY};

/// Rejects operations that could never do anything.
pub fn validate(operation: &TagOperation) -> Result<()> {
    let has_any = |list: &[String]| list.iter().any(|t| !t.trim().is_empty());
    match operation {
        TagOperation::Add { tags } | TagOperation::Remove { tags } if !has_any(tags) => {
            Err(RetagError::NoTags("No tags provided".to_string()))
        }
        TagOperation::Replace { find, .. } if !has_any(find) => {
            Err(RetagError::NoTags("No find tags provided".to_string()))
        }
        _ => Ok(()),
    }
}

pub fn run<S: DocumentStore>(
    store: &mut S,
    operation: &TagOperation,
    scope: &ScopeSpec,
    document_ext: &str,
    dry_run: bool,
    cancel: Option<&CancelToken>,
) -> Result<BatchResult> {
    validate(operation)?;

    let index = store.list_documents()?;
    let targets = scope::resolve(scope, &index, document_ext)?;
    tracing::debug!(
        operation = operation.name(),
        scope = %scope,
        targets = targets.len(),
        dry_run,
        "Starting tag batch"
    );

    let mut result = BatchResult {
        considered: targets.len(),
        ..BatchResult::default()
    };

    for doc in &targets {
        if cancel.is_some_and(CancelToken::is_cancelled) {
            result.cancelled = true;
            break;
        }
        result.processed += 1;

        match process_document(store, doc, operation, dry_run) {
            Ok(Some(change)) => result.changed.push(change),
            Ok(None) => tracing::debug!(path = %doc.path, "Tags unchanged"),
            Err(e) => {
                tracing::warn!(path = %doc.path, error = %e, "Failed to process document");
                result.failed.push(doc.path.clone());
            }
        }
    }

    tracing::info!(
        considered = result.considered,
        changed = result.changed.len(),
        failed = result.failed.len(),
        cancelled = result.cancelled,
        dry_run,
        "Tag batch finished"
    );
    Ok(result)
}

/// Read, transform and (unless `dry_run`) write one document.
fn process_document<S: DocumentStore>(
    store: &mut S,
    doc: &DocumentRef,
    operation: &TagOperation,
    dry_run: bool,
) -> Result<Option<ChangeRecord>> {
    let content = store.read_document(doc)?;
    let parsed = frontmatter::parse(&content);
    let old_tags = tags::extract_tags(parsed.frontmatter.as_ref());

    let Some(new_tags) = tags::transform(&old_tags, operation) else {
        return Ok(None);
    };

    let mut front = parsed.frontmatter.unwrap_or_default();
    if new_tags.is_empty() {
        front.remove(TAGS_KEY);
    } else {
        front.insert(TAGS_KEY, FrontmatterValue::Sequence(new_tags.clone()));
    }
    let updated = frontmatter::serialize(Some(&front), &parsed.body);

    if !dry_run {
        store.write_document(doc, &updated)?;
    }

    Ok(Some(ChangeRecord {
        path: doc.path.clone(),
        old_tags,
        new_tags,
        modified: doc.modified,
    }))
}

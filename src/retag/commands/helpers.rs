use crate::commands::{CmdMessage, CmdResult, RunOptions};
use crate::error::Result;
use crate::model::{BatchResult, TagOperation};
use crate::scope::ScopeSpec;
use crate::store::DocumentStore;

use super::batch;

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

/// One-line outcome of a batch, e.g. `3 of 10 files would change in "notes"`.
pub fn summarize(batch: &BatchResult, scope: &ScopeSpec, dry_run: bool) -> String {
    let changed = batch.changed.len();
    if dry_run {
        format!(
            "{} of {} files would change{}",
            changed,
            batch.considered,
            scope.describe()
        )
    } else {
        format!(
            "{} file{} updated{}",
            changed,
            plural(changed),
            scope.describe()
        )
    }
}

/// Runs a batch and wraps its outcome with user-facing messages.
pub fn run_batch<S: DocumentStore>(
    store: &mut S,
    operation: &TagOperation,
    scope: &ScopeSpec,
    options: &RunOptions,
) -> Result<CmdResult> {
    let batch = batch::run(
        store,
        operation,
        scope,
        &options.document_ext,
        options.dry_run,
        options.cancel.as_ref(),
    )?;

    let mut result = CmdResult::default();
    if batch.cancelled {
        result.add_message(CmdMessage::warning(format!(
            "Cancelled after {} of {} files",
            batch.processed, batch.considered
        )));
    }
    if !batch.failed.is_empty() {
        result.add_message(CmdMessage::warning(format!(
            "{} file{} could not be processed",
            batch.failed.len(),
            plural(batch.failed.len())
        )));
    }
    let summary = summarize(&batch, scope, options.dry_run);
    if batch.changed.is_empty() {
        result.add_message(CmdMessage::info(summary));
    } else {
        result.add_message(CmdMessage::success(summary));
    }

    Ok(result.with_batch(batch, options.dry_run))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::model::ChangeRecord;
    use crate::store::memory::InMemoryStore;

    fn batch_with(changed: usize, considered: usize) -> BatchResult {
        BatchResult {
            changed: (0..changed)
                .map(|i| ChangeRecord {
                    path: format!("{}.md", i),
                    old_tags: Vec::new(),
                    new_tags: vec!["t".to_string()],
                    modified: None,
                })
                .collect(),
            considered,
            ..BatchResult::default()
        }
    }

    #[test]
    fn test_summary_dry_run() {
        let scope = ScopeSpec::PathPrefix("notes".into());
        assert_eq!(
            summarize(&batch_with(2, 5), &scope, true),
            "2 of 5 files would change in \"notes\""
        );
    }

    #[test]
    fn test_summary_applied() {
        assert_eq!(
            summarize(&batch_with(1, 5), &ScopeSpec::EntireCollection, false),
            "1 file updated (entire vault)"
        );
        assert_eq!(
            summarize(
                &batch_with(0, 5),
                &ScopeSpec::ExplicitList(vec!["a.md".into(), "b.md".into()]),
                false
            ),
            "0 files updated in 2 specified files"
        );
    }

    #[test]
    fn test_run_batch_reports_failures() {
        let mut store = InMemoryStore::new()
            .with_document("a.md", "")
            .with_document("b.md", "");
        store.fail_reads_of("a.md");
        let op = TagOperation::Add {
            tags: vec!["t".into()],
        };
        let result = run_batch(
            &mut store,
            &op,
            &ScopeSpec::EntireCollection,
            &RunOptions::new(".md", false),
        )
        .unwrap();

        assert_eq!(result.messages.len(), 2);
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
        assert!(result.messages[0].content.contains("1 file could not"));
        assert_eq!(result.messages[1].level, MessageLevel::Success);
        assert!(!result.dry_run);
        assert_eq!(result.batch.unwrap().changed.len(), 1);
    }
}

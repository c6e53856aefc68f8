use crate::commands::{CmdResult, RunOptions};
use crate::error::Result;
use crate::model::TagOperation;
use crate::scope::ScopeSpec;
use crate::store::DocumentStore;

use super::helpers::run_batch;

/// Adds `tags` to every document in `scope`. Tags already present under any
/// casing are left alone.
pub fn run<S: DocumentStore>(
    store: &mut S,
    scope: &ScopeSpec,
    tags: &[String],
    options: &RunOptions,
) -> Result<CmdResult> {
    let operation = TagOperation::Add {
        tags: tags.to_vec(),
    };
    run_batch(store, &operation, scope, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn adds_to_folder() {
        let mut store = InMemoryStore::new()
            .with_document("work/a.md", "---\ntags: [x]\n---\n")
            .with_document("home/b.md", "");
        let result = run(
            &mut store,
            &ScopeSpec::PathPrefix("work".into()),
            &["y".to_string()],
            &RunOptions::new(".md", false),
        )
        .unwrap();

        assert_eq!(result.batch.unwrap().changed.len(), 1);
        assert!(result.messages[0].content.contains("1 file updated"));
        assert_eq!(store.content("home/b.md").unwrap(), "");
    }
}

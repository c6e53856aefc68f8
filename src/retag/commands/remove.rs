use crate::commands::{CmdResult, RunOptions};
use crate::error::Result;
use crate::model::TagOperation;
use crate::scope::ScopeSpec;
use crate::store::DocumentStore;

use super::helpers::run_batch;

/// Removes `tags` (matched ignoring case) from every document in `scope`.
pub fn run<S: DocumentStore>(
    store: &mut S,
    scope: &ScopeSpec,
    tags: &[String],
    options: &RunOptions,
) -> Result<CmdResult> {
    let operation = TagOperation::Remove {
        tags: tags.to_vec(),
    };
    run_batch(store, &operation, scope, options)
}

use crate::commands::{CmdResult, RunOptions};
use crate::error::Result;
use crate::model::TagOperation;
use crate::scope::ScopeSpec;
use crate::store::DocumentStore;

use super::helpers::run_batch;

/// Rewrites tags across `scope`.
///
/// Pairwise, `find[i]` becomes `replacement[i]`. With `replace_all`, any
/// document holding one of the `find` tags gets `replacement` as its whole
/// tag list.
pub fn run<S: DocumentStore>(
    store: &mut S,
    scope: &ScopeSpec,
    find: &[String],
    replacement: &[String],
    replace_all: bool,
    options: &RunOptions,
) -> Result<CmdResult> {
    let operation = TagOperation::Replace {
        find: find.to_vec(),
        replacement: replacement.to_vec(),
        replace_all,
    };
    run_batch(store, &operation, scope, options)
}

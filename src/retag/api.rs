//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for retag operations, whichever UI drives them.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Normalizes inputs**: comma-separated tag strings become tag lists
//! - **Enforces settings**: default dry-run mode and the whole-vault policy
//!   from [`RetagConfig`]
//! - **Dispatches** to the matching command function
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no printing and no formatting beyond the messages carried in
//! [`CmdResult`].
//!
//! ## Generic Over DocumentStore
//!
//! `RetagApi<S: DocumentStore>` is generic over the storage backend:
//! - Production: `RetagApi<VaultStore>`
//! - Testing: `RetagApi<InMemoryStore>`

use crate::cancel::CancelToken;
use crate::commands::{self, batch, RunOptions};
use crate::config::RetagConfig;
use crate::error::Result;
use crate::model::TagOperation;
use crate::scope::ScopeSpec;
use crate::store::DocumentStore;
use crate::tags::parse_tag_list;
use std::path::PathBuf;

/// The main API facade for retag operations.
pub struct RetagApi<S: DocumentStore> {
    store: S,
    config: RetagConfig,
    config_dir: PathBuf,
    global_config_dir: Option<PathBuf>,
    cancel: Option<CancelToken>,
}

impl<S: DocumentStore> RetagApi<S> {
    pub fn new(store: S, config: RetagConfig, config_dir: PathBuf) -> Self {
        Self {
            store,
            config,
            config_dir,
            global_config_dir: None,
            cancel: None,
        }
    }

    /// Config directory consulted when `config_dir` holds no config.
    pub fn with_global_config_dir(mut self, dir: PathBuf) -> Self {
        self.global_config_dir = Some(dir);
        self
    }

    /// Runs started from now on stop early once `token` is cancelled.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn config_settings(&self) -> &RetagConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validates the request against settings and fixes the run mode.
    fn prepare(
        &self,
        operation: &TagOperation,
        scope: &ScopeSpec,
        dry_run: Option<bool>,
    ) -> Result<RunOptions> {
        batch::validate(operation)?;
        let dry_run = dry_run.unwrap_or(self.config.dry_run_by_default);
        if scope.is_entire_collection() {
            self.config.check_entire_vault(dry_run)?;
        }
        let options = RunOptions::new(self.config.document_ext.clone(), dry_run);
        Ok(match &self.cancel {
            Some(token) => options.with_cancel(token.clone()),
            None => options,
        })
    }

    pub fn add_tags(
        &mut self,
        tags: &str,
        scope: &ScopeSpec,
        dry_run: Option<bool>,
    ) -> Result<commands::CmdResult> {
        let tags = parse_tag_list(tags);
        let options = self.prepare(&TagOperation::Add { tags: tags.clone() }, scope, dry_run)?;
        commands::add::run(&mut self.store, scope, &tags, &options)
    }

    pub fn remove_tags(
        &mut self,
        tags: &str,
        scope: &ScopeSpec,
        dry_run: Option<bool>,
    ) -> Result<commands::CmdResult> {
        let tags = parse_tag_list(tags);
        let options =
            self.prepare(&TagOperation::Remove { tags: tags.clone() }, scope, dry_run)?;
        commands::remove::run(&mut self.store, scope, &tags, &options)
    }

    pub fn replace_tags(
        &mut self,
        find: &str,
        replacement: &str,
        replace_all: bool,
        scope: &ScopeSpec,
        dry_run: Option<bool>,
    ) -> Result<commands::CmdResult> {
        let find = parse_tag_list(find);
        let replacement = parse_tag_list(replacement);
        let operation = TagOperation::Replace {
            find: find.clone(),
            replacement: replacement.clone(),
            replace_all,
        };
        let options = self.prepare(&operation, scope, dry_run)?;
        commands::replace::run(
            &mut self.store,
            scope,
            &find,
            &replacement,
            replace_all,
            &options,
        )
    }

    pub fn config(&mut self, action: ConfigAction) -> Result<commands::CmdResult> {
        let result = commands::config::run(
            &self.config_dir,
            self.global_config_dir.as_deref(),
            action,
        )?;
        if let Some(config) = &result.config {
            self.config = config.clone();
        }
        Ok(result)
    }
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};

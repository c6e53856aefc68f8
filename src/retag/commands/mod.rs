use crate::cancel::CancelToken;
use crate::config::RetagConfig;
use crate::model::BatchResult;

pub mod add;
pub mod batch;
pub mod config;
pub mod helpers;
pub mod remove;
pub mod replace;

/// Settings shared by every tag command.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub document_ext: String,
    pub dry_run: bool,
    pub cancel: Option<CancelToken>,
}

impl RunOptions {
    pub fn new(document_ext: impl Into<String>, dry_run: bool) -> Self {
        Self {
            document_ext: document_ext.into(),
            dry_run,
            cancel: None,
        }
    }

    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub batch: Option<BatchResult>,
    pub dry_run: bool,
    pub config: Option<RetagConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_batch(mut self, batch: BatchResult, dry_run: bool) -> Self {
        self.batch = Some(batch);
        self.dry_run = dry_run;
        self
    }

    pub fn with_config(mut self, config: RetagConfig) -> Self {
        self.config = Some(config);
        self
    }
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RetagError {
    #[error("No files found matching criteria")]
    NoTargets,

    #[error("{0}")]
    NoTags(String),

    #[error("Scope required: specify a folder or file, or disable require-scope in the config")]
    ScopeRequired,

    #[error("Vault-wide changes not allowed: enable allow-root-changes in the config or specify a scope")]
    RootChangesNotAllowed,

    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, RetagError>;

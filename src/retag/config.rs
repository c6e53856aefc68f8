use crate::error::{RetagError, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_DIR: &str = ".retag";
const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_DOCUMENT_EXT: &str = ".md";

pub const CONFIG_KEYS: &[&str] = &[
    "require-scope",
    "allow-root-changes",
    "dry-run-by-default",
    "debug-mode",
    "document-ext",
];

/// Configuration for retag, stored in `<vault>/.retag/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RetagConfig {
    /// Refuse to run without a folder or file scope
    #[serde(default = "default_true")]
    pub require_scope: bool,

    /// Allow operations over the entire vault
    #[serde(default)]
    pub allow_root_changes: bool,

    /// Preview changes unless told to apply them
    #[serde(default = "default_true")]
    pub dry_run_by_default: bool,

    /// Verbose logging
    #[serde(default)]
    pub debug_mode: bool,

    /// Extension of documents that carry frontmatter (e.g. ".md")
    #[serde(default = "default_document_ext")]
    pub document_ext: String,
}

fn default_true() -> bool {
    true
}

fn default_document_ext() -> String {
    DEFAULT_DOCUMENT_EXT.to_string()
}

impl Default for RetagConfig {
    fn default() -> Self {
        Self {
            require_scope: true,
            allow_root_changes: false,
            dry_run_by_default: true,
            debug_mode: false,
            document_ext: default_document_ext(),
        }
    }
}

fn parse_bool(value: &str) -> std::result::Result<bool, String> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        other => Err(format!("Invalid boolean value: {}", other)),
    }
}

impl RetagConfig {
    /// Directory holding the config of the vault at `vault_root`.
    pub fn vault_dir<P: AsRef<Path>>(vault_root: P) -> PathBuf {
        vault_root.as_ref().join(CONFIG_DIR)
    }

    /// User-wide config directory, used when a vault has no config of its own.
    pub fn global_dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "retag", "retag").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        serde_json::from_str(&content)
            .map_err(|e| RetagError::Config(format!("{}: {}", config_path.display(), e)))
    }

    /// Load the vault's config, falling back to the global one, then to defaults.
    pub fn load_for_vault<P: AsRef<Path>>(vault_root: P) -> Result<Self> {
        Self::load_layered(Self::vault_dir(vault_root), Self::global_dir())
    }

    /// Load from `config_dir` if it holds a config, else from `fallback_dir`,
    /// else defaults.
    pub fn load_layered<P: AsRef<Path>, F: AsRef<Path>>(
        config_dir: P,
        fallback_dir: Option<F>,
    ) -> Result<Self> {
        let config_dir = config_dir.as_ref();
        if config_dir.join(CONFIG_FILENAME).exists() {
            return Self::load(config_dir);
        }
        match fallback_dir {
            Some(dir) => Self::load(dir),
            None => Ok(Self::default()),
        }
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_path, content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "require-scope" => Some(self.require_scope.to_string()),
            "allow-root-changes" => Some(self.allow_root_changes.to_string()),
            "dry-run-by-default" => Some(self.dry_run_by_default.to_string()),
            "debug-mode" => Some(self.debug_mode.to_string()),
            "document-ext" => Some(self.document_ext.clone()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "require-scope" => self.require_scope = parse_bool(value)?,
            "allow-root-changes" => self.allow_root_changes = parse_bool(value)?,
            "dry-run-by-default" => self.dry_run_by_default = parse_bool(value)?,
            "debug-mode" => self.debug_mode = parse_bool(value)?,
            "document-ext" => self.set_document_ext(value),
            other => return Err(format!("Unknown config key: {}", other)),
        }
        Ok(())
    }

    /// Set the document extension (normalizes to start with a dot)
    pub fn set_document_ext(&mut self, ext: &str) {
        let ext = ext.trim();
        if ext.starts_with('.') {
            self.document_ext = ext.to_string();
        } else {
            self.document_ext = format!(".{}", ext);
        }
    }

    /// Rejects a whole-vault scope when the settings don't allow one.
    pub fn check_entire_vault(&self, dry_run: bool) -> Result<()> {
        if self.require_scope && !self.allow_root_changes {
            return Err(RetagError::ScopeRequired);
        }
        if !self.allow_root_changes && !dry_run {
            return Err(RetagError::RootChangesNotAllowed);
        }
        Ok(())
    }
}

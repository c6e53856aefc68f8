use crate::commands::{CmdMessage, CmdResult};
use crate::config::RetagConfig;
use crate::error::Result;
use std::path::Path;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

/// Reads or updates the config stored in `config_dir`.
///
/// Reads see the config in effect: `config_dir`, else `fallback_dir`, else
/// defaults. A set starts from that same config and saves the result to
/// `config_dir`, so settings inherited from the fallback carry over.
pub fn run(
    config_dir: &Path,
    fallback_dir: Option<&Path>,
    action: ConfigAction,
) -> Result<CmdResult> {
    let mut config = RetagConfig::load_layered(config_dir, fallback_dir)?;
    match action {
        ConfigAction::ShowAll => Ok(CmdResult::default().with_config(config)),
        ConfigAction::ShowKey(key) => {
            let mut result = CmdResult::default();
            match config.get(&key) {
                Some(val) => result.add_message(CmdMessage::info(val)),
                None => {
                    result.add_message(CmdMessage::error(format!("Unknown config key: {}", key)))
                }
            }
            Ok(result)
        }
        ConfigAction::Set(key, value) => {
            if let Err(e) = config.set(&key, &value) {
                let mut res = CmdResult::default();
                res.add_message(CmdMessage::error(e));
                return Ok(res);
            }
            config.save(config_dir)?;
            let display_val = config.get(&key).unwrap_or_else(|| value.clone());
            let mut result = CmdResult::default().with_config(config);
            result.add_message(CmdMessage::success(format!(
                "{} set to {}",
                key, display_val
            )));
            Ok(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use tempfile::TempDir;

    #[test]
    fn show_all_returns_defaults() {
        let dir = TempDir::new().unwrap();
        let result = run(dir.path(), None, ConfigAction::ShowAll).unwrap();
        assert_eq!(result.config, Some(RetagConfig::default()));
    }

    #[test]
    fn set_persists_normalized_value() {
        let dir = TempDir::new().unwrap();
        let result = run(
            dir.path(),
            None,
            ConfigAction::Set("document-ext".into(), "txt".into()),
        )
        .unwrap();
        assert_eq!(result.messages[0].content, "document-ext set to .txt");

        let shown = run(dir.path(), None, ConfigAction::ShowKey("document-ext".into())).unwrap();
        assert_eq!(shown.messages[0].content, ".txt");
    }

    #[test]
    fn unknown_key_is_reported() {
        let dir = TempDir::new().unwrap();
        let result = run(dir.path(), None, ConfigAction::ShowKey("nope".into())).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Error);

        let result = run(dir.path(), None, ConfigAction::Set("nope".into(), "1".into())).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Error);
        assert!(!dir.path().join("config.json").exists());
    }

    #[test]
    fn set_keeps_settings_inherited_from_fallback() {
        let dir = TempDir::new().unwrap();
        let global = TempDir::new().unwrap();
        let mut inherited = RetagConfig::default();
        inherited.allow_root_changes = true;
        inherited.set_document_ext("txt");
        inherited.save(global.path()).unwrap();

        let shown = run(dir.path(), Some(global.path()), ConfigAction::ShowAll).unwrap();
        assert_eq!(shown.config, Some(inherited.clone()));

        run(
            dir.path(),
            Some(global.path()),
            ConfigAction::Set("debug-mode".into(), "true".into()),
        )
        .unwrap();

        let saved = RetagConfig::load(dir.path()).unwrap();
        assert!(saved.debug_mode);
        assert!(saved.allow_root_changes);
        assert_eq!(saved.document_ext, ".txt");
    }
}

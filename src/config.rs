use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const DEFAULT_EDITOR: &str = "vi";
const DEFAULT_PAGER: &str = "less";

/// Persisted `{editor, pager}` settings, human-editable YAML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub editor: String,
    pub pager: String,
}

impl Config {
    /// Defaults taken from the environment. Consulted only when no config
    /// file exists yet; later runs read the file verbatim.
    pub fn from_env() -> Self {
        Self {
            editor: env::var("EDITOR").unwrap_or_else(|_| DEFAULT_EDITOR.to_string()),
            pager: env::var("PAGER").unwrap_or_else(|_| DEFAULT_PAGER.to_string()),
        }
    }

    pub fn path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("notebook")
            .join("config.yaml")
    }

    pub fn load_or_init() -> Result<Self> {
        Self::load_or_init_at(&Self::path(), Self::from_env())
    }

    /// An existing file is decoded as-is; `defaults` are never merged into
    /// it. A file that cannot be read or decoded is fatal.
    pub fn load_or_init_at(path: &Path, defaults: Config) -> Result<Self> {
        if path.exists() {
            let raw = fs::read_to_string(path).map_err(|e| Error::Config {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
            return serde_yaml::from_str(&raw).map_err(|e| Error::Config {
                path: path.to_path_buf(),
                reason: e.to_string(),
            });
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_yaml::to_string(&defaults).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        fs::write(path, raw)?;
        log::debug!("wrote initial configuration to {}", path.display());
        Ok(defaults)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn defaults() -> Config {
        Config {
            editor: "vi".to_string(),
            pager: "less".to_string(),
        }
    }

    #[test]
    fn first_run_persists_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("conf/config.yaml");

        let config = Config::load_or_init_at(&path, defaults()).unwrap();
        assert_eq!(config, defaults());
        assert!(path.exists());
    }

    #[test]
    fn second_run_reads_file_not_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");

        Config::load_or_init_at(&path, defaults()).unwrap();
        let other = Config {
            editor: "emacs".to_string(),
            pager: "more".to_string(),
        };
        let config = Config::load_or_init_at(&path, other).unwrap();
        assert_eq!(config, defaults());
    }

    #[test]
    fn user_edits_survive_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");

        fs::write(&path, "editor: nano\npager: bat\n").unwrap();
        let config = Config::load_or_init_at(&path, defaults()).unwrap();
        assert_eq!(config.editor, "nano");
        assert_eq!(config.pager, "bat");
    }

    #[test]
    fn corrupt_file_is_fatal() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");

        fs::write(&path, "editor: [unclosed\n").unwrap();
        assert!(matches!(
            Config::load_or_init_at(&path, defaults()),
            Err(Error::Config { .. })
        ));
    }
}

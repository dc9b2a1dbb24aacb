//! Memory-size configuration.
//!
//! The machine needs two sizes at construction: the main memory region and
//! the reserved video region. Each is resolved through a chain of sources,
//! first match wins:
//!
//! 1. Command-line flag (applied by the binary)
//! 2. Environment variable (`REGVM_STACK_SIZE`, `REGVM_VIDEO_SIZE`)
//! 3. `regvm.toml` in the working directory
//! 4. `config.toml` under the user config directory (`~/.config/regvm/`)
//! 5. Built-in default (1024 bytes each)
//!
//! A config file may set either or both keys:
//!
//! ```toml
//! stack_size = 65536
//! video_size = 4096
//! ```

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::Deserialize;

/// Default main memory size in bytes.
pub const DEFAULT_STACK_SIZE: usize = 1024;

/// Default video region size in bytes.
pub const DEFAULT_VIDEO_SIZE: usize = 1024;

/// Name of the project-local config file.
const LOCAL_CONFIG: &str = "regvm.toml";

static CONFIG: OnceLock<Config> = OnceLock::new();

/// Fully resolved memory sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Main memory size in bytes.
    pub stack_size: usize,
    /// Reserved video region size in bytes.
    pub video_size: usize,
}

/// On-disk form of the configuration. Both keys are optional so a file can
/// set just one of them.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    stack_size: Option<usize>,
    video_size: Option<usize>,
}

impl Config {
    /// The resolved configuration, computed once per process.
    pub fn get() -> &'static Config {
        CONFIG.get_or_init(|| {
            let config = Self::resolve();
            log::debug!("Resolved configuration: {:?}", config);
            config
        })
    }

    /// Walk the source chain for each size.
    fn resolve() -> Self {
        Self::from_sources(
            ConfigFile::discover(),
            env_size("REGVM_STACK_SIZE"),
            env_size("REGVM_VIDEO_SIZE"),
        )
    }

    fn from_sources(file: ConfigFile, stack_env: Option<usize>, video_env: Option<usize>) -> Self {
        Self {
            stack_size: stack_env.or(file.stack_size).unwrap_or(DEFAULT_STACK_SIZE),
            video_size: video_env.or(file.video_size).unwrap_or(DEFAULT_VIDEO_SIZE),
        }
    }

    /// Location of the per-user config file.
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("regvm").join("config.toml"))
    }
}

impl ConfigFile {
    /// Combine the project-local and per-user files key by key; the local
    /// file wins where both set a value.
    fn discover() -> Self {
        let local = Self::read(Path::new(LOCAL_CONFIG)).unwrap_or_default();
        let user = Config::user_config_path()
            .and_then(|path| Self::read(&path))
            .unwrap_or_default();
        Self {
            stack_size: local.stack_size.or(user.stack_size),
            video_size: local.video_size.or(user.video_size),
        }
    }

    /// Parse one file. A missing file is silent; an unreadable or malformed
    /// one is skipped with a warning.
    fn read(path: &Path) -> Option<Self> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
            Err(err) => {
                log::warn!("Cannot read {}: {}", path.display(), err);
                return None;
            }
        };

        match toml::from_str(&text) {
            Ok(file) => {
                log::info!("Applying settings from {}", path.display());
                Some(file)
            }
            Err(err) => {
                log::warn!("Skipping malformed {}: {}", path.display(), err);
                None
            }
        }
    }
}

/// A byte count from the environment. Malformed values are ignored with a
/// warning.
fn env_size(var: &str) -> Option<usize> {
    let raw = std::env::var(var).ok()?;
    match raw.parse() {
        Ok(size) => Some(size),
        Err(_) => {
            log::warn!("Ignoring {}: '{}' is not a byte count", var, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = Config::from_sources(ConfigFile::default(), None, None);
        assert_eq!(config.stack_size, DEFAULT_STACK_SIZE);
        assert_eq!(config.video_size, DEFAULT_VIDEO_SIZE);
    }

    #[test]
    fn test_env_beats_file() {
        let file = ConfigFile {
            stack_size: Some(2048),
            video_size: Some(512),
        };
        let config = Config::from_sources(file, Some(8192), None);
        assert_eq!(config.stack_size, 8192);
        assert_eq!(config.video_size, 512);
    }

    #[test]
    fn test_file_fills_unset_fields() {
        let file = ConfigFile {
            stack_size: None,
            video_size: Some(256),
        };
        let config = Config::from_sources(file, None, None);
        assert_eq!(config.stack_size, DEFAULT_STACK_SIZE);
        assert_eq!(config.video_size, 256);
    }

    #[test]
    fn test_partial_toml_leaves_other_key_unset() {
        let file: ConfigFile = toml::from_str("stack_size = 9000\n").unwrap();
        assert_eq!(file.stack_size, Some(9000));
        assert_eq!(file.video_size, None);
    }

    #[test]
    fn test_full_toml() {
        let file: ConfigFile = toml::from_str("stack_size = 4096\nvideo_size = 128\n").unwrap();
        let config = Config::from_sources(file, None, None);
        assert_eq!(config.stack_size, 4096);
        assert_eq!(config.video_size, 128);
    }
}

//! Configuration loading for Summon.
//!
//! Reads `~/.summon/config.toml` (or the file named by `SUMMON_CONFIG`) and
//! turns it into [`LaunchOptions`] for a launcher.
//!
//! ```toml
//! [launcher]
//! singleton = true
//!
//! [launcher.transition]
//! enter = "pop_scale"
//! leave = "slide_up"
//! duration_ms = 180
//!
//! [app]
//! reduced_motion = false
//! ```

use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;
use summon_types::LaunchOptions;
use thiserror::Error;

/// Environment variable that overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "SUMMON_CONFIG";

#[derive(Debug, Default, Deserialize)]
pub struct SummonConfig {
    pub launcher: Option<LaunchOptions>,
    pub app: Option<AppConfig>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// Disable enter/leave effects regardless of `[launcher.transition]`.
    #[serde(default)]
    pub reduced_motion: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config at {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

impl SummonConfig {
    /// Load from the default location.
    ///
    /// A missing file is not an error and yields `Ok(None)`.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(None),
        }
    }

    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {}: {err}", path.display());
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(Some(config)),
            Err(err) => {
                tracing::warn!("Failed to parse config at {}: {err}", path.display());
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    /// Resolved config file path, if a home directory is known.
    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    #[must_use]
    pub fn reduced_motion(&self) -> bool {
        self.app.as_ref().is_some_and(|app| app.reduced_motion)
    }

    /// Launch options for a launcher, with transitions stripped under
    /// reduced motion.
    #[must_use]
    pub fn launch_options(&self) -> LaunchOptions {
        let mut options = self.launcher.clone().unwrap_or_default();
        if self.reduced_motion() {
            options.transition = None;
        }
        options
    }
}

#[must_use]
pub fn config_path() -> Option<PathBuf> {
    if let Ok(raw) = env::var(CONFIG_PATH_ENV)
        && !raw.trim().is_empty()
    {
        return Some(PathBuf::from(raw));
    }
    dirs::home_dir().map(|home| home.join(".summon").join("config.toml"))
}

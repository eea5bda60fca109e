use std::path::{Path, PathBuf};

use thiserror::Error;

mod loader;
mod paths;

pub use loader::ConfigLoader;
pub use paths::ConfigPaths;

use crate::core::parse::Limits;
use crate::process::{DEFAULT_STACK_SIZE, MIN_STACK_SIZE};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Home directory not found")]
    HomeDirNotFound,
    #[error("Config file not found: {0}")]
    ConfigFileNotFound(String),
    #[error("line {line}: expected `key = value`, got {content:?}")]
    InvalidLine { line: usize, content: String },
    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: String, value: String },
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Runtime settings. Defaults match the fixed capacities of the classic
/// clone-based shell this one reproduces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    pub prompt: String,
    pub stack_size: usize,
    pub limits: Limits,
    pub show_timing: bool,
    pub banner: bool,
    pub history: bool,
    pub history_path: Option<PathBuf>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: String::from("shell> "),
            stack_size: DEFAULT_STACK_SIZE,
            limits: Limits::default(),
            show_timing: true,
            banner: true,
            history: true,
            history_path: None,
        }
    }
}

impl ShellConfig {
    /// Defaults, then the rc file in `$HOME` (or `explicit` when given).
    /// A missing rc file is fine; a missing explicit file is not.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let paths = ConfigPaths::new().ok();
        config.history_path = paths.as_ref().map(|p| p.history_path.clone());

        match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::ConfigFileNotFound(path.display().to_string()));
                }
                ConfigLoader::new(&mut config).load(path)?;
            }
            None => {
                if let Some(paths) = &paths {
                    ConfigLoader::new(&mut config).load_if_exists(&paths.rc_path)?;
                }
            }
        }
        Ok(config)
    }

    /// Sets one key. `Ok(false)` when the key is not known.
    pub fn set(&mut self, key: &str, value: &str) -> Result<bool, ConfigError> {
        let invalid = || ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };

        match key {
            "prompt" => self.prompt = value.to_string(),
            "stack_size" => {
                let size: usize = value.parse().map_err(|_| invalid())?;
                if size < MIN_STACK_SIZE {
                    return Err(invalid());
                }
                self.stack_size = size;
            }
            "max_args" => {
                let max: usize = value.parse().map_err(|_| invalid())?;
                if max < 2 {
                    return Err(invalid());
                }
                self.limits.max_args = max;
            }
            "max_line_length" => {
                let max: usize = value.parse().map_err(|_| invalid())?;
                if max < 2 {
                    return Err(invalid());
                }
                self.limits.max_line_length = max;
            }
            "show_timing" => self.show_timing = parse_bool(value).ok_or_else(invalid)?,
            "banner" => self.banner = parse_bool(value).ok_or_else(invalid)?,
            "history" => self.history = parse_bool(value).ok_or_else(invalid)?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

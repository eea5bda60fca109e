use super::ConfigError;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub rc_path: PathBuf,
    pub history_path: PathBuf,
}

impl ConfigPaths {
    pub fn new() -> Result<Self, ConfigError> {
        let home = env::var_os("HOME")
            .map(PathBuf::from)
            .or_else(dirs::home_dir)
            .ok_or(ConfigError::HomeDirNotFound)?;

        Ok(ConfigPaths {
            rc_path: home.join(".cloneshrc"),
            history_path: home.join(".clonesh_history"),
        })
    }
}

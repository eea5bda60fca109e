use std::{fs, path::Path};

use log::{debug, warn};

use super::{ConfigError, ShellConfig};

/// Reads `key = value` files into a [`ShellConfig`].
pub struct ConfigLoader<'a> {
    config: &'a mut ShellConfig,
}

impl<'a> ConfigLoader<'a> {
    pub fn new(config: &'a mut ShellConfig) -> Self {
        Self { config }
    }

    /// Applies `path` if it exists. Returns whether it did.
    pub fn load_if_exists(&mut self, path: &Path) -> Result<bool, ConfigError> {
        if !path.exists() {
            debug!("no config at {}", path.display());
            return Ok(false);
        }
        self.load(path)?;
        Ok(true)
    }

    pub fn load(&mut self, path: &Path) -> Result<(), ConfigError> {
        let content = fs::read_to_string(path)?;
        for (index, line) in content.lines().enumerate() {
            self.process_line(index + 1, line)?;
        }
        debug!("loaded config from {}", path.display());
        Ok(())
    }

    fn process_line(&mut self, number: usize, line: &str) -> Result<(), ConfigError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }

        let (key, value) = line.split_once('=').ok_or_else(|| ConfigError::InvalidLine {
            line: number,
            content: line.to_string(),
        })?;
        let key = key.trim();
        let value = unquote(value.trim());

        if self.config.set(key, value)? {
            debug!("config {} = {:?}", key, value);
        } else {
            warn!("ignoring unknown config key {:?} on line {}", key, number);
        }
        Ok(())
    }
}

fn unquote(value: &str) -> &str {
    let quoted = value.len() >= 2
        && ((value.starts_with('"') && value.ends_with('"'))
            || (value.starts_with('\'') && value.ends_with('\'')));
    if quoted {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_values() {
        let file = write_config(
            r#"
            # comment
            prompt = "$ "
            stack_size = 2097152
            max_args = 8
            show_timing = false
            banner = no
        "#,
        );
        let mut config = ShellConfig::default();
        ConfigLoader::new(&mut config).load(file.path()).unwrap();

        assert_eq!(config.prompt, "$ ");
        assert_eq!(config.stack_size, 2 * 1024 * 1024);
        assert_eq!(config.limits.max_args, 8);
        assert!(!config.show_timing);
        assert!(!config.banner);
        assert!(config.history);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let file = write_config("colour = blue\nprompt = >\n");
        let mut config = ShellConfig::default();
        ConfigLoader::new(&mut config).load(file.path()).unwrap();
        assert_eq!(config.prompt, ">");
    }

    #[test]
    fn test_malformed_line() {
        let file = write_config("prompt\n");
        let mut config = ShellConfig::default();
        let result = ConfigLoader::new(&mut config).load(file.path());
        assert!(matches!(result, Err(ConfigError::InvalidLine { line: 1, .. })));
    }

    #[test]
    fn test_invalid_value() {
        let file = write_config("stack_size = 12\n");
        let mut config = ShellConfig::default();
        let result = ConfigLoader::new(&mut config).load(file.path());
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = ShellConfig::default();
        let loaded = ConfigLoader::new(&mut config)
            .load_if_exists(&dir.path().join("absent"))
            .unwrap();
        assert!(!loaded);
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("\"a b\""), "a b");
        assert_eq!(unquote("'x'"), "x");
        assert_eq!(unquote("\""), "\"");
        assert_eq!(unquote("plain"), "plain");
    }
}

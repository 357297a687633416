mod defaults;
mod types;

pub use types::*;

use crate::error::ConfigError;
use defaults::*;
use std::path::Path;
use tracing::debug;

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            agent_command: default_agent_command(),
            poll_interval_sec: default_poll_interval_sec(),
            target: None,
            tmux: TmuxConfig::default(),
        }
    }
}

impl Config {
    /// Load config from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load config if the file exists, otherwise fall back to defaults
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            debug!("Config {:?} not found, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Validate the config
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.agent_command.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "agent_command must not be empty".to_string(),
            ));
        }

        if self.tmux.binary.as_os_str().is_empty() {
            return Err(ConfigError::Invalid(
                "tmux.binary must not be empty".to_string(),
            ));
        }

        if self.poll_interval_sec == 0 {
            return Err(ConfigError::Invalid(
                "poll_interval_sec must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Target name passed to role materialization
    pub fn target_name(&self, cwd: &Path) -> String {
        if let Some(target) = self.target.as_deref().map(str::trim) {
            if !target.is_empty() {
                return target.to_string();
            }
        }

        cwd.file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| cwd.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: Config = serde_yaml::from_str("agent_command: claude\n").unwrap();

        assert_eq!(config.agent_command, "claude");
        assert_eq!(config.poll_interval_sec, 3);
        assert_eq!(config.tmux.binary, default_tmux_binary());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_agent_command() {
        let config = Config {
            agent_command: "   ".to_string(),
            ..Config::default()
        };

        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_zero_interval() {
        let config = Config {
            poll_interval_sec: 0,
            ..Config::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("lattice.yaml")).unwrap();

        assert_eq!(config.agent_command, default_agent_command());
    }

    #[test]
    fn test_target_name_falls_back_to_dir_name() {
        let config = Config::default();
        assert_eq!(config.target_name(Path::new("/work/shop-frontend")), "shop-frontend");

        let config = Config {
            target: Some("storefront".to_string()),
            ..Config::default()
        };
        assert_eq!(config.target_name(Path::new("/work/shop-frontend")), "storefront");
    }
}

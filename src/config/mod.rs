use anyhow::{Context, Result};
use html_options::{Attributes, RenderKind};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Kind used when a request does not name one
    #[serde(default)]
    pub default_kind: RenderKind,

    /// Terminate rendered output with a newline
    #[serde(default = "default_true")]
    pub trailing_newline: bool,

    /// Attributes applied under every request's own attributes
    #[serde(default)]
    pub attributes: Attributes,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_kind: RenderKind::default(),
            trailing_newline: true,
            attributes: Attributes::new(),
        }
    }
}

impl AppConfig {
    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join("html-options");

        Ok(config_dir.join("config.toml"))
    }

    /// Load config from `path` (or the default location), falling back to defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::config_path() {
                Ok(p) => p,
                Err(_) => return Ok(AppConfig::default()),
            },
        };

        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(content) => match Self::parse(&content) {
                    Ok(config) => return Ok(config),
                    Err(e) => tracing::warn!("Failed to parse config {}: {:#}", path.display(), e),
                },
                Err(e) => tracing::warn!("Failed to read config {}: {}", path.display(), e),
            }
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
        }

        Ok(AppConfig::default())
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid config file")
    }

    /// Save config to `path` (or the default location)
    pub fn save(&self, path: Option<&Path>) -> Result<PathBuf> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };

        if let Some(dir) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(dir) {
                tracing::warn!("Could not create config directory: {}", e);
            }
        }

        std::fs::write(&path, self.to_toml()?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serialization() {
        let config = AppConfig {
            default_kind: RenderKind::CheckboxList,
            trailing_newline: false,
            attributes: Attributes::new()
                .with("class", "form-check")
                .with("required", true),
        };

        let serialized = config.to_toml().unwrap();
        let deserialized = AppConfig::parse(&serialized).unwrap();

        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_config_defaults() {
        let config = AppConfig::parse("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(config.trailing_newline);
        assert_eq!(config.default_kind, RenderKind::Select);
    }

    #[test]
    fn test_config_rejects_unknown_kind() {
        assert!(AppConfig::parse("default_kind = \"textarea\"").is_err());
    }

    #[test]
    fn test_load_falls_back_on_bad_file() {
        let path = std::env::temp_dir().join(format!("html-options-bad-{}.toml", std::process::id()));
        std::fs::write(&path, "default_kind = [").unwrap();
        let config = AppConfig::load(Some(&path)).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir()
            .join(format!("html-options-{}", std::process::id()))
            .join("config.toml");
        let config = AppConfig {
            default_kind: RenderKind::Radio,
            ..AppConfig::default()
        };
        config.save(Some(&path)).unwrap();
        let loaded = AppConfig::load(Some(&path)).unwrap();
        std::fs::remove_dir_all(path.parent().unwrap()).ok();
        assert_eq!(loaded, config);
    }
}

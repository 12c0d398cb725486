//! Configuration management for CLI tools.
//!
//! Configuration is stored in ~/.facedb/{app_name}/config.yaml and holds named
//! contexts, one per copy of a dataset on disk.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default base configuration directory name.
pub const DEFAULT_BASE_DIR: &str = ".facedb";
/// Default configuration filename.
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Application name (not serialized).
    #[serde(skip)]
    pub app_name: String,

    /// Name of the currently active context.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub current_context: String,

    /// Map of context name to context configuration.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub contexts: HashMap<String, Context>,

    /// Path to the config file (not serialized).
    #[serde(skip)]
    config_path: PathBuf,
}

/// Where one copy of a dataset lives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    /// Context name.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Root directory of the images.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub directory: String,

    /// File extension including the leading dot (e.g. ".pgm").
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub extension: String,
}

impl Config {
    /// Gets the default config directory.
    pub fn default_config_dir(app_name: &str) -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(DEFAULT_BASE_DIR).join(app_name))
    }

    /// Gets the default config file path.
    pub fn default_config_path(app_name: &str) -> Option<PathBuf> {
        Self::default_config_dir(app_name).map(|dir| dir.join(DEFAULT_CONFIG_FILE))
    }

    /// Returns the config file path.
    pub fn path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Saves the configuration to disk.
    pub fn save(&self) -> anyhow::Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(&self.config_path, content)?;
        Ok(())
    }

    /// Adds a new context, replacing any context of the same name.
    pub fn add_context(&mut self, name: &str, mut ctx: Context) -> anyhow::Result<()> {
        ctx.name = name.to_string();
        self.contexts.insert(name.to_string(), ctx);
        self.save()
    }

    /// Deletes a context.
    pub fn delete_context(&mut self, name: &str) -> anyhow::Result<()> {
        if self.contexts.remove(name).is_none() {
            anyhow::bail!("context '{}' not found", name);
        }
        if self.current_context == name {
            self.current_context.clear();
        }
        self.save()
    }

    /// Sets the current context.
    pub fn use_context(&mut self, name: &str) -> anyhow::Result<()> {
        if !self.contexts.contains_key(name) {
            anyhow::bail!("context '{}' not found", name);
        }
        self.current_context = name.to_string();
        self.save()
    }

    pub fn get_context(&self, name: &str) -> Option<&Context> {
        self.contexts.get(name)
    }

    pub fn get_current_context(&self) -> Option<&Context> {
        if self.current_context.is_empty() {
            return None;
        }
        self.contexts.get(&self.current_context)
    }

    /// Resolves the context by name, or current context if name is empty.
    pub fn resolve_context(&self, name: Option<&str>) -> Option<&Context> {
        match name {
            Some(n) if !n.is_empty() => self.get_context(n),
            _ => self.get_current_context(),
        }
    }

    /// Lists all context names, sorted.
    pub fn list_contexts(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.contexts.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }
}

impl Context {
    /// Directory, or None when unset.
    pub fn directory(&self) -> Option<&str> {
        Some(self.directory.as_str()).filter(|d| !d.is_empty())
    }

    /// Extension, or None when unset.
    pub fn extension(&self) -> Option<&str> {
        Some(self.extension.as_str()).filter(|e| !e.is_empty())
    }
}

fn config_path(app_name: &str, custom_path: Option<&str>) -> anyhow::Result<PathBuf> {
    match custom_path {
        Some(p) => Ok(PathBuf::from(p)),
        None => Config::default_config_path(app_name)
            .ok_or_else(|| anyhow::anyhow!("cannot determine config path")),
    }
}

/// Loads configuration for the specified app, creating an empty file if none exists.
pub fn load_config(app_name: &str, custom_path: Option<&str>) -> anyhow::Result<Config> {
    let config_path = config_path(app_name, custom_path)?;

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut cfg = if config_path.exists() {
        let content = std::fs::read_to_string(&config_path)?;
        serde_yaml::from_str(&content)?
    } else {
        let cfg = Config::default();
        let content = serde_yaml::to_string(&cfg)?;
        std::fs::write(&config_path, content)?;
        cfg
    };

    cfg.app_name = app_name.to_string();
    cfg.config_path = config_path;

    Ok(cfg)
}

/// Reads configuration for the specified app without touching the disk when
/// no file exists. A missing file reads as an empty configuration.
pub fn read_config(app_name: &str, custom_path: Option<&str>) -> anyhow::Result<Config> {
    let config_path = match custom_path {
        Some(p) => PathBuf::from(p),
        None => match Config::default_config_path(app_name) {
            Some(p) => p,
            None => return Ok(Config::default()),
        },
    };

    let mut cfg = if config_path.is_file() {
        let content = std::fs::read_to_string(&config_path)?;
        serde_yaml::from_str(&content)?
    } else {
        Config::default()
    };

    cfg.app_name = app_name.to_string();
    cfg.config_path = config_path;

    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config(dir: &tempfile::TempDir) -> Config {
        let path = dir.path().join("atnt").join("config.yaml");
        load_config("atnt", path.to_str()).unwrap()
    }

    #[test]
    fn test_load_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = temp_config(&dir);
        assert_eq!(cfg.app_name, "atnt");
        assert!(cfg.path().exists());
        assert!(cfg.contexts.is_empty());
        assert!(cfg.get_current_context().is_none());
    }

    #[test]
    fn test_context_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = temp_config(&dir);

        let ctx = Context {
            directory: "/data/atnt".into(),
            extension: ".pgm".into(),
            ..Default::default()
        };
        cfg.add_context("local", ctx).unwrap();
        cfg.use_context("local").unwrap();

        let reloaded = temp_config(&dir);
        assert_eq!(reloaded.current_context, "local");
        let ctx = reloaded.resolve_context(None).unwrap();
        assert_eq!(ctx.name, "local");
        assert_eq!(ctx.directory(), Some("/data/atnt"));
        assert_eq!(ctx.extension(), Some(".pgm"));
        assert_eq!(reloaded.list_contexts(), ["local"]);
    }

    #[test]
    fn test_delete_context() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = temp_config(&dir);

        cfg.add_context("a", Context::default()).unwrap();
        cfg.add_context("b", Context::default()).unwrap();
        cfg.use_context("a").unwrap();
        cfg.delete_context("a").unwrap();

        assert!(cfg.current_context.is_empty());
        assert_eq!(cfg.list_contexts(), ["b"]);
        assert!(cfg.delete_context("a").is_err());
        assert!(cfg.use_context("missing").is_err());
    }

    #[test]
    fn test_read_config_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("atnt").join("config.yaml");

        let cfg = read_config("atnt", path.to_str()).unwrap();
        assert!(cfg.contexts.is_empty());
        assert!(cfg.resolve_context(None).is_none());
        assert!(!path.exists());
        assert!(!dir.path().join("atnt").exists());
    }

    #[test]
    fn test_read_config_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = temp_config(&dir);
        let ctx = Context {
            directory: "/data/atnt".into(),
            ..Default::default()
        };
        cfg.add_context("local", ctx).unwrap();
        cfg.use_context("local").unwrap();

        let path = dir.path().join("atnt").join("config.yaml");
        let read = read_config("atnt", path.to_str()).unwrap();
        assert_eq!(read.resolve_context(None).unwrap().directory(), Some("/data/atnt"));
    }

    #[test]
    fn test_empty_affixes() {
        let ctx = Context::default();
        assert_eq!(ctx.directory(), None);
        assert_eq!(ctx.extension(), None);
    }
}

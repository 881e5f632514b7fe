use catalog_navigation::{TagCatalog, TagLabel};
use catalog_protocol::ALL_TAG;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading `catalog.toml`
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    /// Closed tag set with display labels, in tab order
    pub tags: Vec<TagLabel>,

    /// Default snapshot locations used when no path is given on the command line
    pub snapshot: SnapshotPaths,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SnapshotPaths {
    pub categories: Option<PathBuf>,
    pub content: Option<PathBuf>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            tags: TagCatalog::default().entries().to_vec(),
            snapshot: SnapshotPaths::default(),
        }
    }
}

impl CatalogConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&raw)?;

        // Snapshot paths are relative to the config file
        if let Some(base) = path.parent() {
            config.snapshot.categories = config.snapshot.categories.map(|p| base.join(p));
            config.snapshot.content = config.snapshot.content.map(|p| base.join(p));
        }
        log::debug!("Loaded config {} ({} tags)", path.display(), config.tags.len());
        Ok(config)
    }

    /// Load from `path` when given, otherwise fall back to defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for entry in &self.tags {
            let key = entry.key.as_str();
            if key.trim().is_empty() {
                return Err(ConfigError::Invalid("tag key must not be empty".to_string()));
            }
            if key.eq_ignore_ascii_case(ALL_TAG) {
                return Err(ConfigError::Invalid(format!("tag key {key:?} is reserved")));
            }
            if !seen.insert(key) {
                return Err(ConfigError::Invalid(format!("duplicate tag key {key:?}")));
            }
            if entry.label.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("tag {key:?} has an empty label")));
            }
        }
        Ok(())
    }

    pub fn tag_catalog(&self) -> TagCatalog {
        TagCatalog::new(self.tags.clone())
    }
}

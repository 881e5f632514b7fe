use crate::error::{ProtocolError, Result};
use crate::types::{CategoryRecord, ContentItem};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Point-in-time copy of the category table, in repository order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategorySnapshot {
    pub records: Vec<CategoryRecord>,
}

/// Point-in-time copy of the content table, in repository order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentSnapshot {
    pub items: Vec<ContentItem>,
}

impl CategorySnapshot {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| ProtocolError::io(path, e))?;
        Self::from_json_str(&raw)
    }
}

impl ContentSnapshot {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| ProtocolError::io(path, e))?;
        Self::from_json_str(&raw)
    }
}

impl From<Vec<CategoryRecord>> for CategorySnapshot {
    fn from(records: Vec<CategoryRecord>) -> Self {
        Self { records }
    }
}

impl From<Vec<ContentItem>> for ContentSnapshot {
    fn from(items: Vec<ContentItem>) -> Self {
        Self { items }
    }
}

use crate::config::resolve_path;
use anyhow::Context;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageDriver {
    #[default]
    Sqlite,
    Memory,
}

#[derive(Deserialize, Debug, Clone)]
pub struct StorageConfig {
    #[serde(default)]
    pub driver: StorageDriver,
    pub storage_path: Option<String>,
}

impl StorageConfig {
    /// Creates the storage directory when it does not exist yet.
    pub fn parse_dir(&self) -> anyhow::Result<PathBuf> {
        let storage_path = self
            .storage_path
            .as_deref()
            .context("'storage.storage_path' is required by the sqlite driver")?;
        let path = resolve_path(storage_path);
        std::fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create storage directory {:?}", path))?;
        path.canonicalize()
            .with_context(|| format!("Failed to parse storage directory {:?}", path))
    }
}

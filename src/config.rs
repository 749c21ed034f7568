//! Process configuration, loaded from the environment at startup.

use crate::core::{PasteError, Result};

/// Connection settings for the storage collaborator.
///
/// Every field is required; a missing variable is a startup-fatal
/// [`PasteError::Config`], never a runtime error.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub endpoint: String,
    pub key: String,
    pub database_name: String,
    pub container_name: String,
    pub partition_key_path: String,
}

impl StoreConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            endpoint: require_env("PASTEBOX_ENDPOINT")?,
            key: require_env("PASTEBOX_KEY")?,
            database_name: require_env("PASTEBOX_DATABASE")?,
            container_name: require_env("PASTEBOX_CONTAINER")?,
            partition_key_path: require_env("PASTEBOX_PARTITION_KEY_PATH")?,
        })
    }
}

fn require_env(name: &str) -> Result<String> {
    std::env::var(name)
        .map_err(|_| PasteError::Config(format!("{name} environment variable not set")))
}

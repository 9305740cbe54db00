//! Registry configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{AccountId, DadiError, Result};

/// Deployment-time settings for an auction registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Administrator holding the pause switch.
    pub admin: AccountId,
    /// Whether create/bid start out blocked.
    #[serde(default)]
    pub start_paused: bool,
}

impl RegistryConfig {
    /// Running registry administered by `admin`.
    #[must_use]
    pub fn new(admin: AccountId) -> Self {
        Self {
            admin,
            start_paused: false,
        }
    }

    /// Parse a JSON config document.
    ///
    /// # Errors
    /// Returns `Configuration` if the document is malformed.
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| DadiError::Configuration(e.to_string()))
    }

    /// Read and parse a JSON config file.
    ///
    /// # Errors
    /// Returns `Io` if the file can't be read, `Configuration` if it
    /// can't be parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }
}

// ⚙️ Registry Configuration - Policy as data
// Defaults are the regulated constants; a JSON file may override any of them

use crate::details::DEFAULT_DETAILS_FILE;
use crate::ledger::SuspensionPolicy;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Where the five-line details snapshot is written
    pub details_path: PathBuf,

    /// Minimum age (whole years, as of today) to change address
    pub address_change_min_age: i32,

    /// Demerit thresholds and window length
    pub suspension: SuspensionPolicy,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        RegistryConfig {
            details_path: PathBuf::from(DEFAULT_DETAILS_FILE),
            address_change_min_age: 18,
            suspension: SuspensionPolicy::default(),
        }
    }
}

impl RegistryConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Failed to parse config JSON")
    }
}

// ============================================================================
// TESTS
// ============================================================================

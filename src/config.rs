//! Configuration for the viewer, statistics and acquisition components.
//!
//! Every section has sensible defaults and can be loaded from JSON with
//! omitted fields falling back to those defaults.

use crate::error::{MemsightError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Master configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemsightConfig {
    /// Paged dump settings.
    pub viewer: ViewerConfig,
    /// Statistics settings.
    pub stats: StatsConfig,
    /// Staging settings for packaged resources.
    pub acquire: AcquireConfig,
}

impl MemsightConfig {
    /// Parses and validates a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| MemsightError::Serialization(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| MemsightError::Serialization(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        self.viewer.validate()
    }
}

/// Paged dump configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Bytes shown per page.
    pub page_size: usize,
    /// Bytes shown per dump line.
    pub line_length: usize,
    /// Radix for the address column and byte tokens (2..=36).
    pub radix: u32,
    /// Minimum digits in the address column.
    pub address_width: usize,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            page_size: 512,
            line_length: 16,
            radix: 16,
            address_width: 8,
        }
    }
}

impl ViewerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(MemsightError::InvalidConfig(
                "page_size must be positive".to_string(),
            ));
        }
        if self.line_length == 0 {
            return Err(MemsightError::InvalidConfig(
                "line_length must be positive".to_string(),
            ));
        }
        if !(2..=36).contains(&self.radix) {
            return Err(MemsightError::InvalidConfig(format!(
                "radix {} is outside 2..=36",
                self.radix
            )));
        }
        Ok(())
    }
}

/// Statistics configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    /// Path whose filesystem is reported in snapshots.
    pub filesystem_path: PathBuf,
    /// Upper bound a sane resident size should stay under.
    pub resident_ceiling_bytes: u64,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            filesystem_path: PathBuf::from("."),
            resident_ceiling_bytes: 4 * 1024 * 1024 * 1024, // 4GB
        }
    }
}

/// Staging configuration for packaged resources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcquireConfig {
    /// Maximum time allowed for a single fetch.
    pub timeout_secs: u64,
}

impl Default for AcquireConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

impl AcquireConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

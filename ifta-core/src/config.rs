//! Calculator configuration.
//!
//! Loaded from a TOML file; every key is optional.
//!
//! ```toml
//! jurisdictions = ["Alabama", "California", "Texas", "Ontario"]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Jurisdictions offered when no configuration file overrides them.
pub const DEFAULT_JURISDICTIONS: [&str; 4] = ["Alabama", "California", "Texas", "Ontario"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IftaConfig {
    /// Names offered for selection. Rows are never validated against this list.
    pub jurisdictions: Vec<String>,
}

impl Default for IftaConfig {
    fn default() -> Self {
        Self {
            jurisdictions: DEFAULT_JURISDICTIONS
                .iter()
                .map(|j| j.to_string())
                .collect(),
        }
    }
}

impl IftaConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml_str(&contents)?;
        debug!(
            path = %path.display(),
            jurisdictions = config.jurisdictions.len(),
            "loaded config"
        );
        Ok(config)
    }

    /// Exact, case-sensitive membership check.
    pub fn is_known(
        &self,
        jurisdiction: &str,
    ) -> bool {
        self.jurisdictions.iter().any(|j| j == jurisdiction)
    }
}

//! Serializable boolean defaults, loaded from TOML.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use gstate_types::{DefaultOptions, GlobalStateError, Result};

/// The boolean defaults, as they appear in a configuration file.
///
/// Hooks cannot be expressed in a file; a registry seeded from a config
/// starts with no default hooks.
///
/// ```toml
/// protected = true
/// silent = false
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DefaultsConfig {
    /// Whether new writes mark their entry protected.
    pub protected: bool,
    /// Whether writes bypass protection.
    pub force: bool,
    /// Whether hooks are suppressed.
    pub silent: bool,
}

impl DefaultsConfig {
    /// Parse a config from TOML. Unknown keys are rejected.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| GlobalStateError::Config(e.to_string()))
    }

    /// Read and parse a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| GlobalStateError::Config(e.to_string()))
    }
}

impl From<DefaultsConfig> for DefaultOptions {
    fn from(config: DefaultsConfig) -> Self {
        Self {
            protected: config.protected,
            force: config.force,
            silent: config.silent,
            on_update: None,
            on_delete: None,
        }
    }
}

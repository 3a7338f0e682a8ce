//! The process-wide default options.
//!
//! [`DefaultOptionsRegistry`] keeps the current defaults behind a `RwLock`
//! together with the snapshot captured at construction, which
//! [`reset_default_options`](DefaultOptionsRegistry::reset_default_options)
//! restores.

use std::sync::{PoisonError, RwLock};

use tracing::debug;

use gstate_types::{DefaultOption, DefaultOptions, OptionName, Result};

use crate::config::DefaultsConfig;

/// Holds the fallback value for every per-call option.
#[derive(Debug)]
pub struct DefaultOptionsRegistry {
    current: RwLock<DefaultOptions>,
    initial: DefaultOptions,
}

impl DefaultOptionsRegistry {
    /// Create a registry with every flag `false` and no hooks.
    pub fn new() -> Self {
        Self::with_defaults(DefaultOptions::default())
    }

    /// Create a registry whose initial snapshot comes from a config.
    pub fn with_config(config: DefaultsConfig) -> Self {
        Self::with_defaults(config.into())
    }

    /// Create a registry whose initial snapshot is `initial`.
    pub fn with_defaults(initial: DefaultOptions) -> Self {
        Self {
            current: RwLock::new(initial.clone()),
            initial,
        }
    }

    /// Overwrite one default. Other defaults are untouched.
    pub fn set_default_option(&self, option: DefaultOption) {
        debug!(option = %option.name(), ?option, "default option set");
        self.current
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .apply(option);
    }

    /// Overwrite a boolean default by name.
    ///
    /// Fails with `InvalidOption` if `name` is unknown or names a hook.
    pub fn set_default_flag(&self, name: &str, value: bool) -> Result<()> {
        let name: OptionName = name.parse()?;
        self.set_default_option(DefaultOption::flag(name, value)?);
        Ok(())
    }

    /// A copy of the current defaults.
    ///
    /// Changing the returned value does not change the registry.
    pub fn get_default_options(&self) -> DefaultOptions {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Restore the snapshot captured at construction.
    pub fn reset_default_options(&self) {
        debug!("default options reset");
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = self.initial.clone();
    }
}

impl Default for DefaultOptionsRegistry {
    fn default() -> Self {
        Self::new()
    }
}

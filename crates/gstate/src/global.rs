//! The process-wide instance and free functions that operate on it.
//!
//! The instance is created with the fixed initial defaults the first time
//! any function here is called. It is shared by the whole process; prefer
//! an owned [`GlobalState`] wherever a value can be passed explicitly.

use std::any::Any;
use std::sync::Arc;

use once_cell::sync::Lazy;
use tracing::debug;

use gstate_types::{
    DefaultOption, DefaultOptions, Entry, FlushOptions, Result, SetOptions, UnsetOptions, Value,
};

use crate::state::GlobalState;

static GLOBAL: Lazy<GlobalState> = Lazy::new(|| {
    debug!("process-wide state initialized");
    GlobalState::new()
});

/// The process-wide [`GlobalState`].
pub fn global() -> &'static GlobalState {
    &GLOBAL
}

pub fn set_value<T: Any + Send + Sync>(key: &str, value: T, options: SetOptions) -> Value {
    GLOBAL.set_value(key, value, options)
}

pub fn get_value<T: Any + Send + Sync>(key: &str) -> Option<Arc<T>> {
    GLOBAL.get_value(key)
}

pub fn get_metadata(key: &str) -> Option<Entry> {
    GLOBAL.get_metadata(key)
}

pub fn get_all_values() -> Vec<(String, Value)> {
    GLOBAL.get_all_values()
}

pub fn get_all_metadata() -> Vec<(String, Entry)> {
    GLOBAL.get_all_metadata()
}

pub fn is_set(key: &str) -> bool {
    GLOBAL.is_set(key)
}

pub fn is_protected(key: &str) -> bool {
    GLOBAL.is_protected(key)
}

pub fn unset_value(key: &str, options: UnsetOptions) {
    GLOBAL.unset_value(key, options)
}

pub fn flush(options: FlushOptions) {
    GLOBAL.flush(options)
}

pub fn set_default_option(option: DefaultOption) {
    GLOBAL.set_default_option(option)
}

pub fn set_default_flag(name: &str, value: bool) -> Result<()> {
    GLOBAL.set_default_flag(name, value)
}

pub fn get_default_options() -> DefaultOptions {
    GLOBAL.get_default_options()
}

pub fn reset_default_options() {
    GLOBAL.reset_default_options()
}

//! [`GlobalState`], the composition point that builds a defaults registry
//! and the entry store resolving against it.

use std::any::Any;
use std::sync::Arc;

use gstate_defaults::{DefaultOptionsRegistry, DefaultsConfig};
use gstate_store::{EntryStore, InMemoryEntryStore};
use gstate_types::{
    DefaultOption, DefaultOptions, Entry, FlushOptions, Result, SetOptions, UnsetOptions, Value,
};

/// A defaults registry and the entry store that falls back to it.
#[derive(Debug)]
pub struct GlobalState {
    defaults: Arc<DefaultOptionsRegistry>,
    store: InMemoryEntryStore,
}

impl GlobalState {
    /// Create empty state with the fixed initial defaults.
    pub fn new() -> Self {
        Self::with_registry(DefaultOptionsRegistry::new())
    }

    /// Create empty state whose defaults (and reset target) come from `config`.
    pub fn with_config(config: DefaultsConfig) -> Self {
        Self::with_registry(DefaultOptionsRegistry::with_config(config))
    }

    /// Create empty state whose defaults (and reset target) are `defaults`.
    pub fn with_defaults(defaults: DefaultOptions) -> Self {
        Self::with_registry(DefaultOptionsRegistry::with_defaults(defaults))
    }

    fn with_registry(registry: DefaultOptionsRegistry) -> Self {
        let defaults = Arc::new(registry);
        let store = InMemoryEntryStore::new(Arc::clone(&defaults));
        Self { defaults, store }
    }

    pub fn store(&self) -> &InMemoryEntryStore {
        &self.store
    }

    pub fn defaults(&self) -> &DefaultOptionsRegistry {
        &self.defaults
    }

    // ---- Entry operations ----

    /// Store `value` at `key` and return the value now stored.
    ///
    /// If the existing entry is protected and the write is not forced, the
    /// store is unchanged and the existing value is returned instead.
    pub fn set_value<T: Any + Send + Sync>(
        &self,
        key: &str,
        value: T,
        options: SetOptions,
    ) -> Value {
        self.store.set(key, Value::new(value), options)
    }

    /// Like [`set_value`](Self::set_value) for a value that is already wrapped.
    pub fn set(&self, key: &str, value: Value, options: SetOptions) -> Value {
        self.store.set(key, value, options)
    }

    /// The value at `key` as a `T`.
    ///
    /// `None` if the key is absent or holds some other type.
    pub fn get_value<T: Any + Send + Sync>(&self, key: &str) -> Option<Arc<T>> {
        self.store.get(key)?.downcast::<T>()
    }

    /// The untyped value at `key`.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.store.get(key)
    }

    pub fn get_metadata(&self, key: &str) -> Option<Entry> {
        self.store.get_metadata(key)
    }

    /// Every key with its value, in insertion order.
    pub fn get_all_values(&self) -> Vec<(String, Value)> {
        self.store.get_all_values()
    }

    /// Every key with a copy of its entry, in insertion order.
    pub fn get_all_metadata(&self) -> Vec<(String, Entry)> {
        self.store.get_all_metadata()
    }

    pub fn is_set(&self, key: &str) -> bool {
        self.store.is_set(key)
    }

    pub fn is_protected(&self, key: &str) -> bool {
        self.store.is_protected(key)
    }

    /// Remove `key`, protected or not. Missing keys are ignored.
    pub fn unset_value(&self, key: &str, options: UnsetOptions) {
        self.store.unset(key, options)
    }

    /// Remove every key, protected or not.
    pub fn flush(&self, options: FlushOptions) {
        self.store.flush(options)
    }

    // ---- Default options ----

    pub fn set_default_option(&self, option: DefaultOption) {
        self.defaults.set_default_option(option)
    }

    /// Set a boolean default by name, e.g. `"protected"`.
    pub fn set_default_flag(&self, name: &str, value: bool) -> Result<()> {
        self.defaults.set_default_flag(name, value)
    }

    pub fn get_default_options(&self) -> DefaultOptions {
        self.defaults.get_default_options()
    }

    pub fn reset_default_options(&self) {
        self.defaults.reset_default_options()
    }
}

impl Default for GlobalState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use gstate_types::GlobalStateError;

    use super::*;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::TRACE)
            .try_init();
    }

    #[test]
    fn typed_roundtrip() {
        init_tracing();
        let state = GlobalState::new();
        let stored = state.set_value("count", 3u64, SetOptions::new());
        assert_eq!(stored.downcast_ref::<u64>(), Some(&3));
        assert_eq!(state.get_value::<u64>("count").as_deref(), Some(&3));
        assert!(state.get_value::<String>("count").is_none());
        assert!(state.get_value::<u64>("missing").is_none());
    }

    #[test]
    fn protected_then_forced() {
        init_tracing();
        let state = GlobalState::new();
        state.set_value("k", String::from("v1"), SetOptions::new().with_protected(true));

        let kept = state.set_value("k", String::from("v2"), SetOptions::new());
        assert_eq!(kept.downcast_ref::<String>().unwrap(), "v1");

        let forced = state.set_value(
            "k",
            String::from("v2"),
            SetOptions::new().with_force(true),
        );
        assert_eq!(forced.downcast_ref::<String>().unwrap(), "v2");
        assert!(!state.is_protected("k"));
    }

    #[test]
    fn rejected_write_may_return_other_type() {
        let state = GlobalState::new();
        state.set_value("k", 1i32, SetOptions::new().with_protected(true));
        let kept = state.set_value("k", "text", SetOptions::new());
        assert!(kept.is::<i32>());
    }

    #[test]
    fn set_accepts_prewrapped_value() {
        let state = GlobalState::new();
        let value = Value::new(vec![1u8, 2, 3]);
        let stored = state.set("bytes", value.clone(), SetOptions::new());
        assert!(stored.ptr_eq(&value));
        assert!(state.get("bytes").unwrap().ptr_eq(&value));
    }

    #[test]
    fn update_hook_fires_once_per_overwrite() {
        init_tracing();
        let state = GlobalState::new();
        let calls = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&calls);
        state.set_value(
            "k",
            "a",
            SetOptions::new().with_on_update(move |key, new, old| {
                log.lock().unwrap().push((
                    key.to_string(),
                    *new.downcast_ref::<&str>().unwrap(),
                    old.and_then(|v| v.downcast_ref::<&str>().copied()),
                ));
            }),
        );
        state.set_value("k", "b", SetOptions::new());
        state.set_value("k", "c", SetOptions::new().with_silent(true));
        state.set_value("k", "d", SetOptions::new());

        assert_eq!(
            *calls.lock().unwrap(),
            vec![
                ("k".to_string(), "b", Some("a")),
                ("k".to_string(), "d", Some("c")),
            ]
        );
    }

    #[test]
    fn flush_removes_protected_and_fires_hooks() {
        let state = GlobalState::new();
        let fired = Arc::new(AtomicUsize::new(0));
        for (key, value) in [("a", 1i32), ("b", 2i32)] {
            let fired = Arc::clone(&fired);
            state.set_value(
                key,
                value,
                SetOptions::new()
                    .with_protected(true)
                    .with_on_delete(move |_, _| {
                        fired.fetch_add(1, Ordering::SeqCst);
                    }),
            );
        }

        state.flush(FlushOptions::new());
        assert_eq!(fired.load(Ordering::SeqCst), 2);
        assert!(state.get_all_values().is_empty());
    }

    #[test]
    fn silent_flush_fires_nothing() {
        let state = GlobalState::new();
        let fired = Arc::new(AtomicUsize::new(0));
        let hook_fired = Arc::clone(&fired);
        state.set_value(
            "a",
            1i32,
            SetOptions::new().with_on_delete(move |_, _| {
                hook_fired.fetch_add(1, Ordering::SeqCst);
            }),
        );

        state.flush(FlushOptions::new().with_silent(true));
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        assert!(!state.is_set("a"));
    }

    #[test]
    fn default_propagation_and_reset() {
        init_tracing();
        let state = GlobalState::new();
        state.set_default_flag("protected", true).unwrap();
        state.set_value("k", 1i32, SetOptions::new());
        assert!(state.is_protected("k"));

        state.reset_default_options();
        state.set_value("k2", 2i32, SetOptions::new());
        assert!(!state.is_protected("k2"));
        assert!(state.is_protected("k"));
    }

    #[test]
    fn invalid_default_name_is_rejected() {
        let state = GlobalState::new();
        let err = state.set_default_flag("protect", true).unwrap_err();
        assert!(matches!(err, GlobalStateError::InvalidOption { .. }));
        assert!(!state.get_default_options().protected);
    }

    #[test]
    fn configured_defaults_survive_reset() {
        let state = GlobalState::with_config(DefaultsConfig {
            silent: true,
            ..Default::default()
        });
        state.set_default_option(DefaultOption::Silent(false));
        state.reset_default_options();
        assert!(state.get_default_options().silent);
    }

    #[test]
    fn instances_are_independent() {
        let a = GlobalState::new();
        let b = GlobalState::new();
        a.set_value("k", 1i32, SetOptions::new());
        a.set_default_option(DefaultOption::Protected(true));

        assert!(!b.is_set("k"));
        assert!(!b.get_default_options().protected);
    }

    #[test]
    fn metadata_listing() {
        let state = GlobalState::new();
        state.set_value("x", 1i32, SetOptions::new().with_protected(true));
        state.set_value("y", 2i32, SetOptions::new());

        let all = state.get_all_metadata();
        let summary: Vec<_> = all.iter().map(|(k, e)| (k.as_str(), e.protected)).collect();
        assert_eq!(summary, vec![("x", true), ("y", false)]);
        let x = state.get_metadata("x").unwrap();
        assert!(x.created_at <= x.updated_at);
    }

    #[test]
    fn unset_value_removes_entry() {
        let state = GlobalState::new();
        state.set_value("k", 1i32, SetOptions::new().with_protected(true));
        state.unset_value("k", UnsetOptions::new());
        assert!(!state.is_set("k"));
        assert!(state.get_metadata("k").is_none());
    }
}

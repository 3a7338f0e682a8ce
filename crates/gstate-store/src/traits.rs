//! The [`EntryStore`] trait defining the entry storage interface.

use gstate_types::{Entry, FlushOptions, SetOptions, UnsetOptions, Value};

/// Storage backend for entries.
///
/// None of these operations fail: a rejected write, a read of a missing key,
/// and removal of a missing key are all ordinary outcomes.
pub trait EntryStore: Send + Sync {
    /// Write `value` at `key`.
    ///
    /// Returns the value now stored: `value` on success, or the existing
    /// value if the entry is protected and the write is not forced.
    fn set(&self, key: &str, value: Value, options: SetOptions) -> Value;

    /// Read the value at `key`.
    fn get(&self, key: &str) -> Option<Value>;

    /// Read the full entry at `key`.
    fn get_metadata(&self, key: &str) -> Option<Entry>;

    /// Every key with its entry, in insertion order.
    ///
    /// The entries are copies; changing them does not change the store.
    fn get_all_metadata(&self) -> Vec<(String, Entry)>;

    /// Every key, in insertion order.
    fn keys(&self) -> Vec<String>;

    /// Remove the entry at `key`. Missing keys are ignored.
    fn unset(&self, key: &str, options: UnsetOptions);

    /// Every key with its value, in insertion order.
    fn get_all_values(&self) -> Vec<(String, Value)> {
        self.get_all_metadata()
            .into_iter()
            .map(|(key, entry)| (key, entry.value))
            .collect()
    }

    fn is_set(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Returns `false` for a missing key.
    fn is_protected(&self, key: &str) -> bool {
        self.get_metadata(key).is_some_and(|entry| entry.protected)
    }

    /// Remove every entry, protected or not, as if by `unset` with `options`.
    ///
    /// Keys are taken up front; keys a hook inserts while the flush runs are
    /// not removed.
    fn flush(&self, options: FlushOptions) {
        for key in self.keys() {
            self.unset(&key, options);
        }
    }

    fn len(&self) -> usize {
        self.keys().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

//! In-memory entry store.
//!
//! [`InMemoryEntryStore`] keeps entries in a `HashMap` behind a `RwLock`.
//! Each key carries the sequence number it was inserted with, and a
//! `BTreeMap` from sequence number to key records insertion order for
//! listing, so removal never scans the key list. Data is lost when the store
//! is dropped.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use tracing::{debug, trace};

use gstate_defaults::DefaultOptionsRegistry;
use gstate_types::{Entry, ResolvedSetOptions, SetOptions, UnsetOptions, Value};

use crate::traits::EntryStore;

/// Entries plus the order their keys were first inserted in.
#[derive(Debug, Default)]
struct Entries {
    map: HashMap<String, (u64, Entry)>,
    order: BTreeMap<u64, String>,
    next_seq: u64,
}

impl Entries {
    fn get(&self, key: &str) -> Option<&Entry> {
        self.map.get(key).map(|(_, entry)| entry)
    }

    fn insert(&mut self, key: &str, entry: Entry) {
        let seq = self.next_seq;
        self.next_seq += 1;
        if let Some((old_seq, _)) = self.map.insert(key.to_string(), (seq, entry)) {
            self.order.remove(&old_seq);
        }
        self.order.insert(seq, key.to_string());
    }

    fn remove(&mut self, key: &str) -> Option<Entry> {
        let (seq, entry) = self.map.remove(key)?;
        self.order.remove(&seq);
        Some(entry)
    }

    fn iter(&self) -> impl Iterator<Item = (&String, &Entry)> {
        self.order
            .values()
            .filter_map(|key| self.map.get_key_value(key))
            .map(|(key, (_, entry))| (key, entry))
    }

    fn keys(&self) -> Vec<String> {
        self.order.values().cloned().collect()
    }

    /// Apply a write that has already passed the protection check.
    fn write(&mut self, key: &str, value: Value, options: ResolvedSetOptions) {
        let now = Utc::now();
        match self.map.get_mut(key) {
            Some((_, entry)) => entry.overwrite(
                value,
                options.protected,
                options.on_update,
                options.on_delete,
                now,
            ),
            None => self.insert(
                key,
                Entry::new(
                    value,
                    options.protected,
                    options.on_update,
                    options.on_delete,
                    now,
                ),
            ),
        }
    }
}

/// An in-memory implementation of [`EntryStore`].
///
/// Omitted options are resolved against the shared registry on every call,
/// so a default changed between two calls applies to the second.
///
/// Hooks are invoked after the lock is released. A hook may read or mutate
/// the store, including the key being written; the write that follows the
/// hook applies to the store as the hook left it. Mutating the store from a
/// delete hook during [`flush`](EntryStore::flush) has no specified outcome
/// beyond the per-key `unset` contract.
#[derive(Debug)]
pub struct InMemoryEntryStore {
    defaults: Arc<DefaultOptionsRegistry>,
    entries: RwLock<Entries>,
}

impl InMemoryEntryStore {
    /// Create an empty store resolving omitted options against `defaults`.
    pub fn new(defaults: Arc<DefaultOptionsRegistry>) -> Self {
        Self {
            defaults,
            entries: RwLock::new(Entries::default()),
        }
    }

    /// The registry this store falls back to.
    pub fn defaults(&self) -> &Arc<DefaultOptionsRegistry> {
        &self.defaults
    }

    fn read(&self) -> RwLockReadGuard<'_, Entries> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Entries> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for InMemoryEntryStore {
    fn default() -> Self {
        Self::new(Arc::new(DefaultOptionsRegistry::new()))
    }
}

impl EntryStore for InMemoryEntryStore {
    fn set(&self, key: &str, value: Value, options: SetOptions) -> Value {
        let options = options.resolve(&self.defaults.get_default_options());
        let protected = options.protected;

        let mut entries = self.write();
        let pending = match entries.get(key) {
            Some(existing) if existing.protected && !options.force => {
                debug!(key = %key, "write rejected: entry is protected");
                return existing.value.clone();
            }
            Some(existing) if !options.silent => existing
                .on_update
                .clone()
                .map(|hook| (hook, existing.value.clone())),
            _ => None,
        };

        if let Some((hook, previous)) = pending {
            drop(entries);
            trace!(key = %key, "firing update hook");
            hook(key, &value, Some(&previous));
            entries = self.write();
        }

        entries.write(key, value.clone(), options);
        trace!(key = %key, protected, value = ?value, "entry written");
        value
    }

    fn get(&self, key: &str) -> Option<Value> {
        self.read().get(key).map(|entry| entry.value.clone())
    }

    fn get_metadata(&self, key: &str) -> Option<Entry> {
        self.read().get(key).cloned()
    }

    fn get_all_metadata(&self) -> Vec<(String, Entry)> {
        self.read()
            .iter()
            .map(|(key, entry)| (key.clone(), entry.clone()))
            .collect()
    }

    fn get_all_values(&self) -> Vec<(String, Value)> {
        self.read()
            .iter()
            .map(|(key, entry)| (key.clone(), entry.value.clone()))
            .collect()
    }

    fn keys(&self) -> Vec<String> {
        self.read().keys()
    }

    fn is_set(&self, key: &str) -> bool {
        self.read().map.contains_key(key)
    }

    fn is_protected(&self, key: &str) -> bool {
        self.read().get(key).is_some_and(|entry| entry.protected)
    }

    fn unset(&self, key: &str, options: UnsetOptions) {
        let silent = options.resolve_silent(&self.defaults.get_default_options());

        let mut entries = self.write();
        let pending = match entries.get(key) {
            None => {
                trace!(key = %key, "unset of missing key ignored");
                return;
            }
            Some(existing) if !silent => existing
                .on_delete
                .clone()
                .map(|hook| (hook, existing.value.clone())),
            Some(_) => None,
        };

        if let Some((hook, value)) = pending {
            drop(entries);
            trace!(key = %key, "firing delete hook");
            hook(key, &value);
            entries = self.write();
        }

        if entries.remove(key).is_some() {
            debug!(key = %key, "entry removed");
        }
    }

    fn len(&self) -> usize {
        self.read().map.len()
    }
}

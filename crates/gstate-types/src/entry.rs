//! The stored record for one key.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::hooks::{describe, DeleteHook, UpdateHook};
use crate::value::Value;

/// Wall-clock timestamp recorded on entries.
pub type Timestamp = DateTime<Utc>;

/// An entry in the store, one per key.
///
/// Invariant: `created_at <= updated_at`.
#[derive(Clone)]
pub struct Entry {
    /// The stored payload.
    pub value: Value,
    /// When `true`, `set` refuses to overwrite unless forced. Never blocks removal.
    pub protected: bool,
    /// Set once, when the key is first inserted.
    pub created_at: Timestamp,
    /// Set on every successful write, including the first.
    pub updated_at: Timestamp,
    /// Fired before a successful overwrite unless silenced.
    pub on_update: Option<UpdateHook>,
    /// Fired before removal unless silenced.
    pub on_delete: Option<DeleteHook>,
}

impl Entry {
    /// Create a freshly inserted entry.
    pub fn new(
        value: Value,
        protected: bool,
        on_update: Option<UpdateHook>,
        on_delete: Option<DeleteHook>,
        now: Timestamp,
    ) -> Self {
        Self {
            value,
            protected,
            created_at: now,
            updated_at: now,
            on_update,
            on_delete,
        }
    }

    /// Apply a successful write to an existing entry.
    ///
    /// Protection is recomputed from the incoming write, not merged. Hooks
    /// are attached only where the entry has none yet, so a hook attached
    /// by an earlier write survives later writes that omit it.
    pub fn overwrite(
        &mut self,
        value: Value,
        protected: bool,
        on_update: Option<UpdateHook>,
        on_delete: Option<DeleteHook>,
        now: Timestamp,
    ) {
        self.value = value;
        self.protected = protected;
        if self.on_update.is_none() {
            self.on_update = on_update;
        }
        if self.on_delete.is_none() {
            self.on_delete = on_delete;
        }
        // Keep created_at <= updated_at if the wall clock stepped back.
        self.updated_at = now.max(self.created_at);
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("value", &self.value)
            .field("protected", &self.protected)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .field("on_update", &describe(&self.on_update))
            .field("on_delete", &describe(&self.on_delete))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Duration;

    use super::*;

    fn noop_update() -> UpdateHook {
        Arc::new(|_: &str, _: &Value, _: Option<&Value>| {})
    }

    fn noop_delete() -> DeleteHook {
        Arc::new(|_: &str, _: &Value| {})
    }

    #[test]
    fn new_entry_has_equal_timestamps() {
        let now = Utc::now();
        let entry = Entry::new(Value::new(1u8), false, None, None, now);
        assert_eq!(entry.created_at, now);
        assert_eq!(entry.updated_at, now);
    }

    #[test]
    fn overwrite_keeps_created_at() {
        let t0 = Utc::now();
        let t1 = t0 + Duration::seconds(5);
        let mut entry = Entry::new(Value::new("a"), false, None, None, t0);
        entry.overwrite(Value::new("b"), false, None, None, t1);
        assert_eq!(entry.created_at, t0);
        assert_eq!(entry.updated_at, t1);
        assert_eq!(*entry.value.downcast_ref::<&str>().unwrap(), "b");
    }

    #[test]
    fn overwrite_recomputes_protection() {
        let now = Utc::now();
        let mut entry = Entry::new(Value::new(1u8), true, None, None, now);
        entry.overwrite(Value::new(2u8), false, None, None, now);
        assert!(!entry.protected);
    }

    #[test]
    fn overwrite_preserves_attached_hooks() {
        let now = Utc::now();
        let first = noop_update();
        let mut entry = Entry::new(Value::new(1u8), false, Some(first.clone()), None, now);

        entry.overwrite(Value::new(2u8), false, Some(noop_update()), None, now);
        assert!(Arc::ptr_eq(entry.on_update.as_ref().unwrap(), &first));

        entry.overwrite(Value::new(3u8), false, None, None, now);
        assert!(Arc::ptr_eq(entry.on_update.as_ref().unwrap(), &first));
    }

    #[test]
    fn overwrite_attaches_missing_hooks() {
        let now = Utc::now();
        let mut entry = Entry::new(Value::new(1u8), false, None, None, now);
        entry.overwrite(Value::new(2u8), false, None, Some(noop_delete()), now);
        assert!(entry.on_delete.is_some());
        assert!(entry.on_update.is_none());
    }

    #[test]
    fn overwrite_clamps_backwards_clock() {
        let t0 = Utc::now();
        let mut entry = Entry::new(Value::new(1u8), false, None, None, t0);
        entry.overwrite(Value::new(2u8), false, None, None, t0 - Duration::seconds(10));
        assert!(entry.created_at <= entry.updated_at);
        assert_eq!(entry.updated_at, t0);
    }

    #[test]
    fn debug_hides_closures() {
        let entry = Entry::new(Value::new(1u8), false, Some(noop_update()), None, Utc::now());
        let out = format!("{entry:?}");
        assert!(out.contains("on_update: \"set\""));
        assert!(out.contains("on_delete: \"unset\""));
    }
}

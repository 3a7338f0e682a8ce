//! Notification callbacks attached to entries.
//!
//! Hooks are plain synchronous closures. They are shared (`Arc`) so that an
//! entry, the defaults registry, and any snapshot can all hold the same
//! callback without cloning its captured state.

use std::sync::Arc;

use crate::value::Value;

/// Called before an entry is overwritten, with `(key, new_value, old_value)`.
pub type UpdateHook = Arc<dyn Fn(&str, &Value, Option<&Value>) + Send + Sync>;

/// Called before an entry is removed, with `(key, value)`.
pub type DeleteHook = Arc<dyn Fn(&str, &Value) + Send + Sync>;

/// Label used in `Debug` output in place of a closure.
pub(crate) fn describe<T: ?Sized>(hook: &Option<Arc<T>>) -> &'static str {
    if hook.is_some() {
        "set"
    } else {
        "unset"
    }
}

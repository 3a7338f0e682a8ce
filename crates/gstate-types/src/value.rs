//! The type-erased payload stored under each key.

use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

/// A type-erased stored payload.
///
/// The store never interprets values; it only hands them back. Cloning a
/// `Value` clones the handle, not the payload, so snapshots and hook
/// arguments share the same allocation.
#[derive(Clone)]
pub struct Value {
    inner: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl Value {
    /// Wrap a payload.
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            inner: Arc::new(value),
            type_name: type_name::<T>(),
        }
    }

    /// Wrap a payload that is already behind an `Arc`.
    pub fn from_arc<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        Self {
            inner: value,
            type_name: type_name::<T>(),
        }
    }

    /// Returns `true` if the payload is a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.inner.is::<T>()
    }

    /// Borrow the payload as a `T`, if it is one.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    /// Get a shared handle to the payload as a `T`, if it is one.
    pub fn downcast<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        Arc::clone(&self.inner).downcast::<T>().ok()
    }

    /// The Rust type name of the payload, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns `true` if both handles point at the same payload.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Value<{}>", self.type_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downcast_to_stored_type() {
        let v = Value::new(String::from("hello"));
        assert!(v.is::<String>());
        assert_eq!(v.downcast_ref::<String>().unwrap(), "hello");
        assert_eq!(*v.downcast::<String>().unwrap(), "hello");
    }

    #[test]
    fn downcast_to_wrong_type_is_none() {
        let v = Value::new(42u32);
        assert!(!v.is::<i64>());
        assert!(v.downcast_ref::<i64>().is_none());
        assert!(v.downcast::<String>().is_none());
    }

    #[test]
    fn clone_shares_payload() {
        let a = Value::new(vec![1, 2, 3]);
        let b = a.clone();
        assert!(a.ptr_eq(&b));
        assert!(!a.ptr_eq(&Value::new(vec![1, 2, 3])));
    }

    #[test]
    fn from_arc_keeps_allocation() {
        let shared = Arc::new(7u8);
        let v = Value::from_arc(Arc::clone(&shared));
        assert!(Arc::ptr_eq(&v.downcast::<u8>().unwrap(), &shared));
    }

    #[test]
    fn debug_names_payload_type() {
        let v = Value::new(1.5f64);
        assert_eq!(format!("{v:?}"), "Value<f64>");
        assert_eq!(v.type_name(), "f64");
    }
}

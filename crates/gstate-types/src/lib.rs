//! Foundation types for gstate.
//!
//! This crate provides the record, value, and option types shared by the
//! default-options registry and the entry store. Every other gstate crate
//! depends on `gstate-types`.
//!
//! # Key Types
//!
//! - [`Value`] — Type-erased, cheaply clonable stored payload
//! - [`Entry`] — The stored record for one key: value, protection, timestamps, hooks
//! - [`UpdateHook`] / [`DeleteHook`] — Notification callbacks attached to entries
//! - [`SetOptions`] / [`UnsetOptions`] — Per-call option bags
//! - [`DefaultOptions`] — Process-wide fallback values for omitted options
//! - [`DefaultOption`] / [`OptionName`] — Typed and by-name option updates

pub mod entry;
pub mod error;
pub mod hooks;
pub mod options;
pub mod value;

pub use entry::{Entry, Timestamp};
pub use error::{GlobalStateError, Result};
pub use hooks::{DeleteHook, UpdateHook};
pub use options::{
    DefaultOption, DefaultOptions, FlushOptions, OptionName, ResolvedSetOptions, SetOptions,
    UnsetOptions,
};
pub use value::Value;

//! Process-wide key/value state for gstate.
//!
//! Provides a single composition point, [`GlobalState`], that owns a
//! [`DefaultOptionsRegistry`] and an [`InMemoryEntryStore`] resolving against
//! it. Applications that want one shared namespace use the lazily created
//! process-wide instance through [`global()`] or the free functions in
//! [`global`]; tests and embedders construct independent instances instead.
//!
//! ```
//! use gstate::{GlobalState, SetOptions};
//!
//! let state = GlobalState::new();
//! state.set_value("mode", "dark", SetOptions::new().with_protected(true));
//!
//! // Protected: the write is rejected and the stored value comes back.
//! let kept = state.set_value("mode", "light", SetOptions::new());
//! assert_eq!(kept.downcast_ref::<&str>(), Some(&"dark"));
//!
//! state.set_value("mode", "light", SetOptions::new().with_force(true));
//! assert_eq!(state.get_value::<&str>("mode").as_deref(), Some(&"light"));
//! ```

pub mod global;
pub mod state;

pub use global::global;
pub use state::GlobalState;

// Re-export key types
pub use gstate_defaults::{DefaultOptionsRegistry, DefaultsConfig};
pub use gstate_store::{EntryStore, InMemoryEntryStore};
pub use gstate_types::{
    DefaultOption, DefaultOptions, DeleteHook, Entry, FlushOptions, GlobalStateError, OptionName,
    Result, SetOptions, Timestamp, UnsetOptions, UpdateHook, Value,
};

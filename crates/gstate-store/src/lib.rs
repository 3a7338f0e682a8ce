//! Entry storage for gstate.
//!
//! The store maps string keys to [`Entry`] records. Every operation first
//! resolves its per-call options against the shared
//! [`DefaultOptionsRegistry`], then reads or mutates the map, firing the
//! entry's hook where the contract calls for it.
//!
//! # Design Rules
//!
//! 1. A protected entry rejects `set` unless the write is forced. The
//!    rejected call returns the stored value and changes nothing.
//! 2. Protection never blocks `unset` or `flush`.
//! 3. Hooks run before the mutation they announce, so an update hook sees
//!    the true previous value and a delete hook sees the value being removed.
//! 4. Hooks run with no lock held and may call back into the store.
//! 5. A hook attached to an entry stays attached until the entry is removed.
//!
//! [`Entry`]: gstate_types::Entry
//! [`DefaultOptionsRegistry`]: gstate_defaults::DefaultOptionsRegistry

pub mod memory;
pub mod traits;

pub use memory::InMemoryEntryStore;
pub use traits::EntryStore;

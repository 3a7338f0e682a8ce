//! Default options registry for gstate.
//!
//! The registry holds the fallback value for every per-call option. Store
//! operations read a snapshot of it when a caller omits an option; nothing
//! in this crate depends on the store.
//!
//! # Modules
//!
//! - [`config`] — [`DefaultsConfig`], the serializable boolean defaults
//! - [`registry`] — [`DefaultOptionsRegistry`] with get/set/reset

pub mod config;
pub mod registry;

pub use config::DefaultsConfig;
pub use registry::DefaultOptionsRegistry;

//! Per-call option bags and the process-wide defaults they fall back to.
//!
//! Every option on a call is optional. An omitted option resolves to the
//! corresponding field of [`DefaultOptions`]; a supplied one always wins.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::{GlobalStateError, Result};
use crate::hooks::{describe, DeleteHook, UpdateHook};
use crate::value::Value;

/// Options accepted by `set`.
#[derive(Clone, Default)]
pub struct SetOptions {
    /// Mark the entry protected after this write.
    pub protected: Option<bool>,
    /// Overwrite even if the existing entry is protected.
    pub force: Option<bool>,
    /// Suppress the existing entry's update hook for this write.
    pub silent: Option<bool>,
    /// Hook to attach if the entry has none yet.
    pub on_update: Option<UpdateHook>,
    /// Hook to attach if the entry has none yet.
    pub on_delete: Option<DeleteHook>,
}

impl SetOptions {
    /// Options with nothing set; every option falls back to its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether the entry is protected after this write.
    pub fn with_protected(mut self, protected: bool) -> Self {
        self.protected = Some(protected);
        self
    }

    /// Bypass protection on an existing entry.
    pub fn with_force(mut self, force: bool) -> Self {
        self.force = Some(force);
        self
    }

    /// Suppress the existing entry's update hook.
    pub fn with_silent(mut self, silent: bool) -> Self {
        self.silent = Some(silent);
        self
    }

    /// Attach an update hook, unless the entry already has one.
    pub fn with_on_update<F>(mut self, hook: F) -> Self
    where
        F: Fn(&str, &Value, Option<&Value>) + Send + Sync + 'static,
    {
        self.on_update = Some(Arc::new(hook));
        self
    }

    /// Attach a delete hook, unless the entry already has one.
    pub fn with_on_delete<F>(mut self, hook: F) -> Self
    where
        F: Fn(&str, &Value) + Send + Sync + 'static,
    {
        self.on_delete = Some(Arc::new(hook));
        self
    }

    /// Fill every omitted option from `defaults`.
    pub fn resolve(self, defaults: &DefaultOptions) -> ResolvedSetOptions {
        ResolvedSetOptions {
            protected: self.protected.unwrap_or(defaults.protected),
            force: self.force.unwrap_or(defaults.force),
            silent: self.silent.unwrap_or(defaults.silent),
            on_update: self.on_update.or_else(|| defaults.on_update.clone()),
            on_delete: self.on_delete.or_else(|| defaults.on_delete.clone()),
        }
    }
}

impl fmt::Debug for SetOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SetOptions")
            .field("protected", &self.protected)
            .field("force", &self.force)
            .field("silent", &self.silent)
            .field("on_update", &describe(&self.on_update))
            .field("on_delete", &describe(&self.on_delete))
            .finish()
    }
}

/// [`SetOptions`] with every option decided.
#[derive(Clone)]
pub struct ResolvedSetOptions {
    pub protected: bool,
    pub force: bool,
    pub silent: bool,
    pub on_update: Option<UpdateHook>,
    pub on_delete: Option<DeleteHook>,
}

/// Options accepted by `unset` and `flush`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UnsetOptions {
    /// Suppress the entry's delete hook for this removal.
    pub silent: Option<bool>,
}

/// `flush` takes the same options as `unset` and applies them to every key.
pub type FlushOptions = UnsetOptions;

impl UnsetOptions {
    /// Options with nothing set; `silent` falls back to its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppress the entry's delete hook.
    pub fn with_silent(mut self, silent: bool) -> Self {
        self.silent = Some(silent);
        self
    }

    pub fn resolve_silent(&self, defaults: &DefaultOptions) -> bool {
        self.silent.unwrap_or(defaults.silent)
    }
}

/// Process-wide fallback values for omitted per-call options.
#[derive(Clone, Default)]
pub struct DefaultOptions {
    pub protected: bool,
    pub force: bool,
    pub silent: bool,
    pub on_update: Option<UpdateHook>,
    pub on_delete: Option<DeleteHook>,
}

impl DefaultOptions {
    /// Overwrite the one field named by `option`.
    pub fn apply(&mut self, option: DefaultOption) {
        match option {
            DefaultOption::Protected(v) => self.protected = v,
            DefaultOption::Force(v) => self.force = v,
            DefaultOption::Silent(v) => self.silent = v,
            DefaultOption::OnUpdate(hook) => self.on_update = hook,
            DefaultOption::OnDelete(hook) => self.on_delete = hook,
        }
    }
}

impl fmt::Debug for DefaultOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultOptions")
            .field("protected", &self.protected)
            .field("force", &self.force)
            .field("silent", &self.silent)
            .field("on_update", &describe(&self.on_update))
            .field("on_delete", &describe(&self.on_delete))
            .finish()
    }
}

/// A single default option together with its new value.
#[derive(Clone)]
pub enum DefaultOption {
    Protected(bool),
    Force(bool),
    Silent(bool),
    /// `None` clears the default hook.
    OnUpdate(Option<UpdateHook>),
    /// `None` clears the default hook.
    OnDelete(Option<DeleteHook>),
}

impl DefaultOption {
    pub fn name(&self) -> OptionName {
        match self {
            DefaultOption::Protected(_) => OptionName::Protected,
            DefaultOption::Force(_) => OptionName::Force,
            DefaultOption::Silent(_) => OptionName::Silent,
            DefaultOption::OnUpdate(_) => OptionName::OnUpdate,
            DefaultOption::OnDelete(_) => OptionName::OnDelete,
        }
    }

    /// Build a boolean option from its name.
    ///
    /// Fails for the hook options, which cannot hold a boolean.
    pub fn flag(name: OptionName, value: bool) -> Result<Self> {
        match name {
            OptionName::Protected => Ok(DefaultOption::Protected(value)),
            OptionName::Force => Ok(DefaultOption::Force(value)),
            OptionName::Silent => Ok(DefaultOption::Silent(value)),
            OptionName::OnUpdate | OptionName::OnDelete => Err(GlobalStateError::InvalidOption {
                name: name.to_string(),
                reason: "expects a callback, not a boolean".into(),
            }),
        }
    }
}

impl fmt::Debug for DefaultOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultOption::Protected(v) => f.debug_tuple("Protected").field(v).finish(),
            DefaultOption::Force(v) => f.debug_tuple("Force").field(v).finish(),
            DefaultOption::Silent(v) => f.debug_tuple("Silent").field(v).finish(),
            DefaultOption::OnUpdate(h) => f.debug_tuple("OnUpdate").field(&describe(h)).finish(),
            DefaultOption::OnDelete(h) => f.debug_tuple("OnDelete").field(&describe(h)).finish(),
        }
    }
}

/// The recognized default option names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OptionName {
    Protected,
    Force,
    Silent,
    OnUpdate,
    OnDelete,
}

impl OptionName {
    pub const ALL: [OptionName; 5] = [
        OptionName::Protected,
        OptionName::Force,
        OptionName::Silent,
        OptionName::OnUpdate,
        OptionName::OnDelete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OptionName::Protected => "protected",
            OptionName::Force => "force",
            OptionName::Silent => "silent",
            OptionName::OnUpdate => "onUpdate",
            OptionName::OnDelete => "onDelete",
        }
    }
}

impl FromStr for OptionName {
    type Err = GlobalStateError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "protected" => Ok(OptionName::Protected),
            "force" => Ok(OptionName::Force),
            "silent" => Ok(OptionName::Silent),
            "onUpdate" | "on_update" => Ok(OptionName::OnUpdate),
            "onDelete" | "on_delete" => Ok(OptionName::OnDelete),
            other => Err(GlobalStateError::InvalidOption {
                name: other.to_string(),
                reason: "unknown option".into(),
            }),
        }
    }
}

impl fmt::Display for OptionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//! The option registry engine.
//!
//! Leaf options live in a flat map keyed by the full dotted key; namespace
//! structure is derived from the key strings for collision checks and prefix
//! enumeration. A side table records deprecated keys and their routing
//! metadata, consulted on every access.

mod describe;


use crate::validators::Validator;
use crate::{ConfigError, Prefixed};
use log::debug;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Doc text substituted when an option is registered without one.
pub(crate) const NO_DESCRIPTION: &str = "description not available.";

/// A single registered leaf option.
#[derive(Debug, Clone)]
pub(crate) struct OptionSlot {
    pub(crate) default: Value,
    pub(crate) current: Value,
    pub(crate) doc: String,
    pub(crate) validator: Option<Validator>,
}

/// Deprecation routing metadata for one dotted key.
#[derive(Debug, Clone)]
pub(crate) struct Deprecation {
    pub(crate) reroute_to: Option<String>,
    pub(crate) removal_version: Option<String>,
    pub(crate) message: Option<String>,
}

impl Deprecation {
    /// Warning text for an access to this key. A custom message wins
    /// verbatim; otherwise the wording is synthesized from the metadata.
    fn notice(&self, key: &str) -> String {
        if let Some(message) = &self.message {
            return message.clone();
        }
        let mut notice = format!("'{key}' is deprecated");
        if let Some(version) = &self.removal_version {
            notice.push_str(&format!(", and will be removed in {version}"));
        }
        if let Some(target) = &self.reroute_to {
            notice.push_str(&format!(", please use '{target}' instead"));
        }
        notice
    }
}

/// Mutable registry contents, guarded by the registry lock.
#[derive(Debug, Clone, Default)]
pub(crate) struct RegistryState {
    /// Leaf options by full dotted key; the ordered map gives prefix
    /// enumeration a deterministic lexicographic order.
    pub(crate) options: BTreeMap<String, OptionSlot>,
    /// Deprecated keys and their routing metadata.
    pub(crate) deprecated: HashMap<String, Deprecation>,
}

/// Full-state capture used to save and reinstall a registry (test isolation).
#[derive(Debug, Clone)]
pub struct RegistrySnapshot(RegistryState);

/// Key substitution produced by deprecation interception.
struct Resolved {
    /// The live key to operate on (the reroute target when one exists).
    key: String,
    /// Warning to emit once the lock is released, if the key was deprecated.
    notice: Option<String>,
}

/// Intercept one access: a deprecated key yields its warning text and, when
/// rerouted, is substituted exactly once. The substituted key is looked up
/// directly, so chains of deprecations do not resolve transitively.
fn resolve(state: &RegistryState, key: &str) -> Resolved {
    match state.deprecated.get(key) {
        Some(entry) => Resolved {
            notice: Some(entry.notice(key)),
            key: entry.reroute_to.clone().unwrap_or_else(|| key.to_string()),
        },
        None => Resolved {
            key: key.to_string(),
            notice: None,
        },
    }
}

/// Lower-case a dotted key and reject empty keys or empty segments.
pub(crate) fn normalize_key(key: &str) -> Result<String, ConfigError> {
    let key = key.to_lowercase();
    if key.is_empty() || key.split('.').any(|segment| segment.is_empty()) {
        return Err(ConfigError::Invalid(format!("malformed option key: '{key}'")));
    }
    Ok(key)
}

/// Proper ancestor prefixes of a dotted key (`"a.b.c"` -> `"a"`, `"a.b"`).
fn ancestors(key: &str) -> impl Iterator<Item = &str> {
    key.match_indices('.').map(|(idx, _)| &key[..idx])
}

type WarnSink = Box<dyn Fn(&str) + Send + Sync>;

/// A hierarchical option registry.
///
/// One process-wide instance backs the crate-level free functions, but
/// registries are plain values and can be constructed and passed around
/// explicitly. All operations take `&self`; the state is guarded by a single
/// reader/writer lock so that the multi-step resolution inside get/set
/// (normalize, deprecation intercept, reroute, lookup, mutate) is atomic
/// with respect to concurrent registration and deprecation.
pub struct ConfigRegistry {
    state: RwLock<RegistryState>,
    warn: WarnSink,
}

impl ConfigRegistry {
    /// Create a registry whose deprecation warnings go to `log::warn!`.
    pub fn new() -> Self {
        Self::with_warning_sink(|notice| log::warn!("{notice}"))
    }

    /// Create a registry with a custom deprecation-warning sink.
    pub fn with_warning_sink(sink: impl Fn(&str) + Send + Sync + 'static) -> Self {
        Self {
            state: RwLock::new(RegistryState::default()),
            warn: Box::new(sink),
        }
    }

    /// Register a new leaf option with its default value.
    ///
    /// An empty `doc` falls back to the stock "description not available."
    /// text. The validator, when given, must accept the default; it then
    /// gates every later write to this option.
    pub fn register_option(
        &self,
        key: &str,
        default: impl Into<Value>,
        doc: &str,
        validator: Option<Validator>,
    ) -> Result<(), ConfigError> {
        let key = normalize_key(key)?;
        let default = default.into();
        if let Some(validator) = &validator {
            validator
                .check(&default)
                .map_err(|message| ConfigError::Validation {
                    key: key.clone(),
                    message,
                })?;
        }

        let mut state = self.state.write();
        if state.options.contains_key(&key) {
            return Err(ConfigError::DuplicateKey(key));
        }
        // A key is a leaf or a namespace prefix, never both: "a.b" cannot be
        // registered while "a" is a leaf, and vice versa.
        for ancestor in ancestors(&key) {
            if state.options.contains_key(ancestor) {
                return Err(ConfigError::PathCollision {
                    key: key.clone(),
                    message: format!("'{ancestor}' is already a registered option"),
                });
            }
        }
        let prefix = format!("{key}.");
        if let Some(descendant) = state
            .options
            .keys()
            .find(|existing| existing.starts_with(&prefix))
            .cloned()
        {
            return Err(ConfigError::PathCollision {
                key: key.clone(),
                message: format!("'{descendant}' is already registered under this namespace"),
            });
        }

        debug!("registered option '{key}'");
        state.options.insert(
            key,
            OptionSlot {
                current: default.clone(),
                default,
                doc: doc.to_string(),
                validator,
            },
        );
        Ok(())
    }

    /// Read the current value of an option, following a deprecation reroute
    /// when one exists.
    pub fn get_option(&self, key: &str) -> Result<Value, ConfigError> {
        let key = normalize_key(key)?;
        let (result, notice) = {
            let state = self.state.read();
            let Resolved { key: live, notice } = resolve(&state, &key);
            let result = match state.options.get(&live) {
                Some(slot) => Ok(slot.current.clone()),
                None => Err(ConfigError::OptionNotFound(live)),
            };
            (result, notice)
        };
        if let Some(notice) = notice {
            (self.warn)(&notice);
        }
        result
    }

    /// Overwrite the current value of an option.
    ///
    /// Writes go through deprecation rerouting, so setting a deprecated key
    /// mutates its live replacement. A rejected value leaves the stored one
    /// untouched.
    pub fn set_option(&self, key: &str, value: impl Into<Value>) -> Result<(), ConfigError> {
        let key = normalize_key(key)?;
        let value = value.into();
        let (result, notice) = {
            let mut state = self.state.write();
            let Resolved { key: live, notice } = resolve(&state, &key);
            let result = match state.options.get_mut(&live) {
                Some(slot) => {
                    let checked = slot
                        .validator
                        .as_ref()
                        .map(|validator| validator.check(&value))
                        .unwrap_or(Ok(()));
                    match checked {
                        Ok(()) => {
                            slot.current = value;
                            Ok(())
                        }
                        Err(message) => Err(ConfigError::Validation { key: live, message }),
                    }
                }
                None => Err(ConfigError::OptionNotFound(live)),
            };
            (result, notice)
        };
        if let Some(notice) = notice {
            (self.warn)(&notice);
        }
        result
    }

    /// Restore one option to its registered default, following a deprecation
    /// reroute when one exists.
    pub fn reset_option(&self, key: &str) -> Result<(), ConfigError> {
        let key = normalize_key(key)?;
        let (result, notice) = {
            let mut state = self.state.write();
            let Resolved { key: live, notice } = resolve(&state, &key);
            let result = match state.options.get_mut(&live) {
                Some(slot) => {
                    slot.current = slot.default.clone();
                    Ok(())
                }
                None => Err(ConfigError::OptionNotFound(live)),
            };
            (result, notice)
        };
        if let Some(notice) = notice {
            (self.warn)(&notice);
        }
        result
    }

    /// Restore every registered option to its default in one pass.
    ///
    /// Registrations and deprecations stay in place.
    pub fn reset_all_options(&self) {
        let mut state = self.state.write();
        for slot in state.options.values_mut() {
            slot.current = slot.default.clone();
        }
        debug!("reset all options to their defaults");
    }

    /// Format the description of a leaf, a deprecated key, or every leaf
    /// under a namespace prefix (lexicographic order). The empty key
    /// describes every registered option.
    pub fn describe_options(&self, key: &str) -> Result<String, ConfigError> {
        let state = self.state.read();
        describe::render(&state, key)
    }

    /// Mark a key as deprecated, optionally rerouting its traffic.
    ///
    /// The key does not have to be registered: an owner may deprecate a key
    /// before or after removing its registration. `reroute_to` is resolved
    /// lazily at access time and must point at a registered option by then.
    pub fn deprecate_option(
        &self,
        key: &str,
        message: Option<&str>,
        reroute_to: Option<&str>,
        removal_version: Option<&str>,
    ) -> Result<(), ConfigError> {
        let key = normalize_key(key)?;
        let reroute_to = reroute_to.map(normalize_key).transpose()?;
        let mut state = self.state.write();
        if state.deprecated.contains_key(&key) {
            return Err(ConfigError::AlreadyDeprecated(key));
        }
        debug!("deprecated option '{key}'");
        state.deprecated.insert(
            key,
            Deprecation {
                reroute_to,
                removal_version: removal_version.map(str::to_string),
                message: message.map(str::to_string),
            },
        );
        Ok(())
    }

    /// Whether a key has been deprecated. Pure query, never warns.
    pub fn is_deprecated(&self, key: &str) -> bool {
        let Ok(key) = normalize_key(key) else {
            return false;
        };
        self.state.read().deprecated.contains_key(&key)
    }

    /// Scope subsequent register/get/set calls under `prefix`.
    pub fn with_prefix(&self, prefix: &str) -> Prefixed<'_> {
        Prefixed::new(self, prefix)
    }

    /// Capture the full registry state for a later [`restore`](Self::restore).
    pub fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot(self.state.read().clone())
    }

    /// Reinstall a previously captured state, discarding the current one.
    pub fn restore(&self, snapshot: RegistrySnapshot) {
        *self.state.write() = snapshot.0;
    }

    /// Drop every registration and deprecation. Test teardown only; normal
    /// operation never unregisters options.
    pub fn clear(&self) {
        *self.state.write() = RegistryState::default();
    }
}

impl Default for ConfigRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ConfigRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("ConfigRegistry")
            .field("options", &state.options.len())
            .field("deprecated", &state.deprecated.len())
            .finish()
    }
}

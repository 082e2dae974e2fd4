//! Scoped key prefixing.

use crate::validators::Validator;
use crate::{ConfigError, ConfigRegistry};
use serde_json::Value;

/// Registry view that prepends a fixed prefix to every key it is given.
///
/// Obtained from [`ConfigRegistry::with_prefix`]; convenient for registering
/// or accessing a whole namespace without repeating its prefix at each call
/// site. Prefixing is purely textual concatenation applied before
/// resolution. The prefix applies only to calls made through this handle, so
/// dropping it (normally or during a panic) leaves no ambient state behind,
/// and nested handles compose by plain concatenation.
#[derive(Debug)]
pub struct Prefixed<'a> {
    registry: &'a ConfigRegistry,
    prefix: String,
}

impl<'a> Prefixed<'a> {
    pub(crate) fn new(registry: &'a ConfigRegistry, prefix: &str) -> Self {
        Self {
            registry,
            prefix: prefix.to_string(),
        }
    }

    /// The active prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn qualify(&self, key: &str) -> String {
        format!("{}.{key}", self.prefix)
    }

    /// Nest a further prefix under this one.
    pub fn with_prefix(&self, prefix: &str) -> Prefixed<'a> {
        Prefixed::new(self.registry, &self.qualify(prefix))
    }

    /// Register `prefix.key`; see [`ConfigRegistry::register_option`].
    pub fn register_option(
        &self,
        key: &str,
        default: impl Into<Value>,
        doc: &str,
        validator: Option<Validator>,
    ) -> Result<(), ConfigError> {
        self.registry
            .register_option(&self.qualify(key), default, doc, validator)
    }

    /// Read `prefix.key`; see [`ConfigRegistry::get_option`].
    pub fn get_option(&self, key: &str) -> Result<Value, ConfigError> {
        self.registry.get_option(&self.qualify(key))
    }

    /// Write `prefix.key`; see [`ConfigRegistry::set_option`].
    pub fn set_option(&self, key: &str, value: impl Into<Value>) -> Result<(), ConfigError> {
        self.registry.set_option(&self.qualify(key), value)
    }

    /// Restore `prefix.key` to its default; see
    /// [`ConfigRegistry::reset_option`].
    pub fn reset_option(&self, key: &str) -> Result<(), ConfigError> {
        self.registry.reset_option(&self.qualify(key))
    }

    /// Describe `prefix.key`; see [`ConfigRegistry::describe_options`].
    pub fn describe_options(&self, key: &str) -> Result<String, ConfigError> {
        self.registry.describe_options(&self.qualify(key))
    }
}

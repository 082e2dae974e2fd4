//! Process-wide hierarchical option registry.
//!
//! Libraries declare named, documented, validated settings under dotted
//! namespaces (`display.max_rows`), callers read and mutate them at runtime,
//! and namespace owners retire keys gradually by deprecating or rerouting
//! them without breaking existing call sites right away.
//!
//! A default process-wide registry backs the free functions in this crate;
//! [`ConfigRegistry`] values can also be constructed and passed around
//! explicitly, which is how the test suite isolates itself.

mod error;
mod registry;
mod scope;
pub mod validators;

/// Public error type for registration, access, and deprecation APIs.
pub use error::ConfigError;
/// The registry engine and its full-state capture.
pub use registry::{ConfigRegistry, RegistrySnapshot};
/// Scoped key-prefix handle.
pub use scope::Prefixed;
/// Value check attached to registered options.
pub use validators::Validator;

/// Dynamic value type stored for every option.
pub use serde_json::Value;

use std::sync::LazyLock;

static GLOBAL: LazyLock<ConfigRegistry> = LazyLock::new(ConfigRegistry::new);

/// The process-wide default registry backing the free functions below.
pub fn registry() -> &'static ConfigRegistry {
    &GLOBAL
}

/// Register an option on the default registry; see
/// [`ConfigRegistry::register_option`].
pub fn register_option(
    key: &str,
    default: impl Into<Value>,
    doc: &str,
    validator: Option<Validator>,
) -> Result<(), ConfigError> {
    GLOBAL.register_option(key, default, doc, validator)
}

/// Read an option from the default registry; see
/// [`ConfigRegistry::get_option`].
pub fn get_option(key: &str) -> Result<Value, ConfigError> {
    GLOBAL.get_option(key)
}

/// Write an option on the default registry; see
/// [`ConfigRegistry::set_option`].
pub fn set_option(key: &str, value: impl Into<Value>) -> Result<(), ConfigError> {
    GLOBAL.set_option(key, value)
}

/// Restore one option to its default on the default registry; see
/// [`ConfigRegistry::reset_option`].
pub fn reset_option(key: &str) -> Result<(), ConfigError> {
    GLOBAL.reset_option(key)
}

/// Restore every option to its default on the default registry; see
/// [`ConfigRegistry::reset_all_options`].
pub fn reset_all_options() {
    GLOBAL.reset_all_options()
}

/// Describe options on the default registry; see
/// [`ConfigRegistry::describe_options`].
pub fn describe_options(key: &str) -> Result<String, ConfigError> {
    GLOBAL.describe_options(key)
}

/// Deprecate a key on the default registry; see
/// [`ConfigRegistry::deprecate_option`].
pub fn deprecate_option(
    key: &str,
    message: Option<&str>,
    reroute_to: Option<&str>,
    removal_version: Option<&str>,
) -> Result<(), ConfigError> {
    GLOBAL.deprecate_option(key, message, reroute_to, removal_version)
}

/// Whether a key is deprecated on the default registry; see
/// [`ConfigRegistry::is_deprecated`].
pub fn is_deprecated(key: &str) -> bool {
    GLOBAL.is_deprecated(key)
}

/// Scope register/get/set calls on the default registry under `prefix`.
pub fn with_prefix(prefix: &str) -> Prefixed<'static> {
    GLOBAL.with_prefix(prefix)
}

//! Formatting for `describe_options`.

use super::{NO_DESCRIPTION, RegistryState, normalize_key};
use crate::ConfigError;
use std::fmt::Write;

/// Render the description for a leaf, a deprecated key, or a namespace
/// prefix. The empty key renders every registered option.
pub(super) fn render(state: &RegistryState, key: &str) -> Result<String, ConfigError> {
    if key.is_empty() {
        let mut out = String::new();
        for leaf in state.options.keys() {
            render_leaf(state, leaf, &mut out);
        }
        return Ok(out);
    }

    let key = normalize_key(key)?;
    if state.options.contains_key(&key) || state.deprecated.contains_key(&key) {
        let mut out = String::new();
        render_leaf(state, &key, &mut out);
        return Ok(out);
    }

    // Not a leaf; describe everything under it as a namespace prefix. The
    // ordered option map keeps the enumeration lexicographic.
    let prefix = format!("{key}.");
    let mut out = String::new();
    for leaf in state.options.keys().filter(|leaf| leaf.starts_with(&prefix)) {
        render_leaf(state, leaf, &mut out);
    }
    if out.is_empty() {
        return Err(ConfigError::OptionNotFound(key));
    }
    Ok(out)
}

/// Append the description block for one key: the key, its doc text (or the
/// "not available" sentinel), and a deprecation line when applicable.
fn render_leaf(state: &RegistryState, key: &str, out: &mut String) {
    let doc = state
        .options
        .get(key)
        .map(|slot| slot.doc.trim())
        .filter(|doc| !doc.is_empty())
        .unwrap_or(NO_DESCRIPTION);
    let _ = writeln!(out, "{key}");
    for line in doc.lines() {
        let _ = writeln!(out, "    {line}");
    }
    if let Some(entry) = state.deprecated.get(key) {
        let mut line = String::from("deprecated");
        if let Some(message) = &entry.message {
            let _ = write!(line, ": {message}");
        }
        if let Some(version) = &entry.removal_version {
            let _ = write!(line, ", will be removed in {version}");
        }
        if let Some(target) = &entry.reroute_to {
            let _ = write!(line, ", rerouted to '{target}'");
        }
        let _ = writeln!(out, "    ({line})");
    }
}

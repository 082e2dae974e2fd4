//! Value checks attached to registered options.
//!
//! A [`Validator`] either returns normally to accept a candidate value or
//! rejects it with a reason string. The stock validators here cover the
//! common scalar shapes; anything else can be expressed with
//! [`Validator::new`] or [`Validator::from_predicate`].

use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Check applied to candidate values before they are stored.
#[derive(Clone)]
pub struct Validator(Arc<dyn Fn(&Value) -> Result<(), String> + Send + Sync>);

impl Validator {
    /// Wrap a check that rejects with a reason string.
    pub fn new(check: impl Fn(&Value) -> Result<(), String> + Send + Sync + 'static) -> Self {
        Self(Arc::new(check))
    }

    /// Wrap a boolean predicate; `false` becomes a generic rejection.
    pub fn from_predicate(pred: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        Self::new(move |value| {
            if pred(value) {
                Ok(())
            } else {
                Err(format!("value {value} was rejected"))
            }
        })
    }

    /// Apply the check to a candidate value.
    pub fn check(&self, value: &Value) -> Result<(), String> {
        (self.0)(value)
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Validator(..)")
    }
}

/// Accept integer numbers only.
pub fn is_int() -> Validator {
    Validator::new(|value| match value {
        Value::Number(number) if number.is_i64() || number.is_u64() => Ok(()),
        other => Err(format!("expected an integer, got {other}")),
    })
}

/// Accept any numeric value.
pub fn is_float() -> Validator {
    Validator::new(|value| match value {
        Value::Number(_) => Ok(()),
        other => Err(format!("expected a number, got {other}")),
    })
}

/// Accept booleans only.
pub fn is_bool() -> Validator {
    Validator::new(|value| match value {
        Value::Bool(_) => Ok(()),
        other => Err(format!("expected a boolean, got {other}")),
    })
}

/// Accept strings only.
pub fn is_text() -> Validator {
    Validator::new(|value| match value {
        Value::String(_) => Ok(()),
        other => Err(format!("expected a string, got {other}")),
    })
}

/// Accept only values drawn from a fixed set.
pub fn one_of<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> Validator {
    let allowed: Vec<Value> = values.into_iter().map(Into::into).collect();
    Validator::new(move |value| {
        if allowed.contains(value) {
            Ok(())
        } else {
            Err(format!("{value} is not one of the allowed values"))
        }
    })
}

/// Accept `null` in addition to whatever `inner` accepts.
pub fn nullable(inner: Validator) -> Validator {
    Validator::new(move |value| {
        if value.is_null() {
            Ok(())
        } else {
            inner.check(value)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn stock_validators_accept_their_shape() {
        assert!(is_int().check(&json!(3)).is_ok());
        assert!(is_int().check(&json!(3.5)).is_err());
        assert!(is_float().check(&json!(3.5)).is_ok());
        assert!(is_bool().check(&json!(true)).is_ok());
        assert!(is_bool().check(&json!("true")).is_err());
        assert!(is_text().check(&json!("hullo")).is_ok());
        assert!(is_text().check(&json!(1)).is_err());
    }

    #[test]
    fn one_of_restricts_to_the_set() {
        let justify = one_of(["left", "right"]);
        assert!(justify.check(&json!("right")).is_ok());
        assert!(justify.check(&json!("center")).is_err());
    }

    #[test]
    fn nullable_admits_null() {
        let check = nullable(is_int());
        assert!(check.check(&json!(null)).is_ok());
        assert!(check.check(&json!(7)).is_ok());
        assert!(check.check(&json!("7")).is_err());
    }

    #[test]
    fn predicate_false_is_a_generic_rejection() {
        let even = Validator::from_predicate(|value| {
            value.as_i64().is_some_and(|number| number % 2 == 0)
        });
        assert!(even.check(&json!(2)).is_ok());
        let reason = even.check(&json!(3)).unwrap_err();
        assert!(reason.contains("rejected"));
    }
}

//! Per-evaluation key/value scratchpad
//!
//! A `Context` is created by the caller for every runtime event, handed to
//! [`matches`] calls, and discarded afterwards. Predicates may write derived
//! values into it for downstream predicates of the same tree, so it is never
//! shared across concurrently running evaluations.

use crate::error::{EvalError, EvalResult};
use crate::value::Value;
use std::collections::HashMap;

/// String-keyed value bag passed through every evaluation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    values: HashMap<String, Value>,
}

impl Context {
    /// Create an empty context.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a context holding a single entry.
    pub fn of(key: impl Into<String>, value: impl Into<Value>) -> Self {
        let mut values = HashMap::new();
        values.insert(key.into(), value.into());
        Self { values }
    }

    /// Create a context from an existing map.
    pub fn from_map(values: HashMap<String, Value>) -> Self {
        Self { values }
    }

    /// Builder method to add an entry.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Insert or overwrite an entry.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn values(&self) -> &HashMap<String, Value> {
        &self.values
    }

    /// Fetch a required value; absence is a [`EvalError::MissingKey`] failure.
    pub fn must_var(&self, key: &str) -> EvalResult<&Value> {
        self.values
            .get(key)
            .ok_or_else(|| EvalError::MissingKey(key.to_string()))
    }

    /// Required integer value. Absence and a wrong type fail differently.
    pub fn must_int(&self, key: &str) -> EvalResult<i64> {
        let value = self.must_var(key)?;
        value.as_int().ok_or_else(|| EvalError::WrongType {
            key: key.to_string(),
            expected: "int",
            actual: value.type_name(),
        })
    }

    /// Required numeric value, promoted to `f64`.
    pub fn must_float(&self, key: &str) -> EvalResult<f64> {
        let value = self.must_var(key)?;
        value.as_f64().ok_or_else(|| EvalError::WrongType {
            key: key.to_string(),
            expected: "float",
            actual: value.type_name(),
        })
    }

    /// Required string value.
    pub fn must_str(&self, key: &str) -> EvalResult<&str> {
        let value = self.must_var(key)?;
        value.as_str().ok_or_else(|| EvalError::WrongType {
            key: key.to_string(),
            expected: "string",
            actual: value.type_name(),
        })
    }

    /// Required boolean value.
    pub fn must_bool(&self, key: &str) -> EvalResult<bool> {
        let value = self.must_var(key)?;
        value.as_bool().ok_or_else(|| EvalError::WrongType {
            key: key.to_string(),
            expected: "bool",
            actual: value.type_name(),
        })
    }

    /// Optional integer lookup; absent and mismatched both come back `None`.
    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.values.get(key).and_then(Value::as_int)
    }

    pub fn get_float(&self, key: &str) -> Option<f64> {
        self.values.get(key).and_then(Value::as_f64)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.values.get(key).and_then(Value::as_bool)
    }

    /// Merge contexts by copying entries in argument order; contexts that
    /// come later take preference on key conflict.
    pub fn merge(contexts: impl IntoIterator<Item = Context>) -> Context {
        let mut result = HashMap::new();
        for context in contexts {
            result.extend(context.values);
        }
        Context { values: result }
    }
}

//! Runtime value types carried through condition evaluation
//!
//! The `Value` enum represents every value a context can hold and an
//! expression operand can resolve to. Scalars parsed from configuration
//! text go through the ladder in [`Value::parse_scalar`].

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Time-of-day format accepted by the scalar parse ladder.
const TIME_FORMAT: &str = "%H:%M:%S";

/// Runtime value type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Null value
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Floating-point value
    Float(f64),
    /// Time-of-day value
    Time(NaiveTime),
    /// String value
    String(String),
    /// Array of values
    Array(Vec<Value>),
    /// Object (key-value map)
    Object(HashMap<String, Value>),
}

impl Value {
    /// Parse a scalar token, trying signed integer, float and time-of-day
    /// before falling back to the raw string. The same ladder re-types a
    /// variable's resolved text at evaluation time.
    pub fn parse_scalar(input: &str) -> Value {
        if let Ok(i) = input.parse::<i64>() {
            return Value::Int(i);
        }
        if let Ok(f) = input.parse::<f64>() {
            return Value::Float(f);
        }
        if let Ok(t) = NaiveTime::parse_from_str(input, TIME_FORMAT) {
            return Value::Time(t);
        }
        Value::String(input.to_string())
    }

    /// Returns true for `Int` and `Float` values.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }

    /// Numeric promotion to `f64`; `None` for non-numeric values.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_time(&self) -> Option<NaiveTime> {
        match self {
            Value::Time(t) => Some(*t),
            _ => None,
        }
    }

    /// Name of the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Time(_) => "time",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Time(t) => write!(f, "{}", t.format(TIME_FORMAT)),
            Value::String(s) => write!(f, "{s}"),
            Value::Array(values) => {
                let rendered: Vec<String> = values.iter().map(Value::to_string).collect();
                write!(f, "[{}]", rendered.join(", "))
            }
            Value::Object(map) => {
                let mut rendered: Vec<String> =
                    map.iter().map(|(k, v)| format!("{k}: {v}")).collect();
                rendered.sort();
                write!(f, "{{{}}}", rendered.join(", "))
            }
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<NaiveTime> for Value {
    fn from(value: NaiveTime) -> Self {
        Value::Time(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scalar_integer() {
        assert_eq!(Value::parse_scalar("42"), Value::Int(42));
        assert_eq!(Value::parse_scalar("-7"), Value::Int(-7));
    }

    #[test]
    fn test_parse_scalar_float() {
        assert_eq!(Value::parse_scalar("3.5"), Value::Float(3.5));
        assert_eq!(Value::parse_scalar("-0.25"), Value::Float(-0.25));
    }

    #[test]
    fn test_parse_scalar_time() {
        let expected = NaiveTime::from_hms_opt(8, 30, 0).unwrap();
        assert_eq!(Value::parse_scalar("08:30:00"), Value::Time(expected));
        // Single-digit fields parse too
        assert_eq!(
            Value::parse_scalar("8:5:3"),
            Value::Time(NaiveTime::from_hms_opt(8, 5, 3).unwrap())
        );
    }

    #[test]
    fn test_parse_scalar_string_fallback() {
        assert_eq!(
            Value::parse_scalar("DIAMOND_PICKAXE"),
            Value::String("DIAMOND_PICKAXE".to_string())
        );
    }

    #[test]
    fn test_numeric_promotion() {
        assert_eq!(Value::Int(5).as_f64(), Some(5.0));
        assert_eq!(Value::Float(5.5).as_f64(), Some(5.5));
        assert_eq!(Value::String("5".to_string()).as_f64(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Int(10).to_string(), "10");
        assert_eq!(Value::Float(1.5).to_string(), "1.5");
        assert_eq!(Value::String("hello".to_string()).to_string(), "hello");
        assert_eq!(
            Value::Time(NaiveTime::from_hms_opt(17, 0, 0).unwrap()).to_string(),
            "17:00:00"
        );
    }

    #[test]
    fn test_value_serde_json() {
        let val = Value::Object({
            let mut map = HashMap::new();
            map.insert("count".to_string(), Value::Int(42));
            map.insert("active".to_string(), Value::Bool(true));
            map
        });

        let json = serde_json::to_string(&val).unwrap();
        assert!(json.contains("count"));
        assert!(json.contains("42"));

        let deserialized: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(val, deserialized);
    }
}

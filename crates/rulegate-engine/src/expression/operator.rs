//! Relational operators for two-operand expressions

use rulegate_core::error::EvalResult;
use rulegate_core::{EvalError, Value};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Relational operator applied to two resolved operand values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    /// Equal (==)
    Eq,
    /// Not equal (!=)
    Ne,
    /// Greater than (>)
    Gt,
    /// Greater than or equal (>=)
    Ge,
    /// Less than (<)
    Lt,
    /// Less than or equal (<=)
    Le,
}

impl Operator {
    /// Operator symbols in match order: two-character symbols come first so
    /// a scan never mistakes `>=` for `>`.
    pub const SYMBOLS: [(&'static str, Operator); 6] = [
        (">=", Operator::Ge),
        ("<=", Operator::Le),
        ("==", Operator::Eq),
        ("!=", Operator::Ne),
        ("<", Operator::Lt),
        (">", Operator::Gt),
    ];

    /// Parse an operator symbol.
    pub fn parse(symbol: &str) -> Option<Operator> {
        Self::SYMBOLS
            .iter()
            .find(|(s, _)| *s == symbol)
            .map(|(_, op)| *op)
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Eq => "==",
            Operator::Ne => "!=",
            Operator::Gt => ">",
            Operator::Ge => ">=",
            Operator::Lt => "<",
            Operator::Le => "<=",
        }
    }

    /// Apply the operator to two resolved values.
    ///
    /// Equality compares structurally after numeric promotion and is always
    /// defined. Ordering is defined for numeric pairs and time-of-day pairs;
    /// anything else fails with [`EvalError::TypeMismatch`].
    pub fn evaluate(&self, left: &Value, right: &Value) -> EvalResult<bool> {
        match self {
            Operator::Eq => Ok(equal(left, right)),
            Operator::Ne => Ok(!equal(left, right)),
            Operator::Gt => Ok(compare(self, left, right)? == Ordering::Greater),
            Operator::Ge => Ok(compare(self, left, right)? != Ordering::Less),
            Operator::Lt => Ok(compare(self, left, right)? == Ordering::Less),
            Operator::Le => Ok(compare(self, left, right)? != Ordering::Greater),
        }
    }
}

fn equal(left: &Value, right: &Value) -> bool {
    if let (Some(l), Some(r)) = (left.as_f64(), right.as_f64()) {
        return l == r;
    }
    left == right
}

fn compare(operator: &Operator, left: &Value, right: &Value) -> EvalResult<Ordering> {
    if let (Some(l), Some(r)) = (left.as_f64(), right.as_f64()) {
        return l
            .partial_cmp(&r)
            .ok_or_else(|| mismatch(operator, left, right));
    }
    if let (Value::Time(l), Value::Time(r)) = (left, right) {
        return Ok(l.cmp(r));
    }
    Err(mismatch(operator, left, right))
}

fn mismatch(operator: &Operator, left: &Value, right: &Value) -> EvalError {
    EvalError::TypeMismatch {
        left: left.to_string(),
        operator: operator.symbol().to_string(),
        right: right.to_string(),
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    #[test]
    fn test_parse_symbols() {
        assert_eq!(Operator::parse(">="), Some(Operator::Ge));
        assert_eq!(Operator::parse("=="), Some(Operator::Eq));
        assert_eq!(Operator::parse("<"), Some(Operator::Lt));
        assert_eq!(Operator::parse("=>"), None);
    }

    #[test]
    fn test_numeric_ordering_promotes() {
        assert!(Operator::Gt
            .evaluate(&Value::Int(10), &Value::Float(5.5))
            .unwrap());
        assert!(Operator::Le
            .evaluate(&Value::Float(5.0), &Value::Int(5))
            .unwrap());
    }

    #[test]
    fn test_equality_promotes_numbers() {
        assert!(Operator::Eq
            .evaluate(&Value::Int(5), &Value::Float(5.0))
            .unwrap());
        assert!(Operator::Ne
            .evaluate(&Value::Int(5), &Value::Float(5.5))
            .unwrap());
    }

    #[test]
    fn test_equality_across_types_is_false_not_an_error() {
        assert!(!Operator::Eq
            .evaluate(&Value::String("5".to_string()), &Value::Int(5))
            .unwrap());
        assert!(Operator::Ne
            .evaluate(&Value::String("5".to_string()), &Value::Int(5))
            .unwrap());
    }

    #[test]
    fn test_ordering_rejects_mixed_types() {
        let result = Operator::Gt.evaluate(&Value::String("abc".to_string()), &Value::Int(5));
        assert!(matches!(result, Err(EvalError::TypeMismatch { .. })));
    }

    #[test]
    fn test_times_order_chronologically() {
        let morning = Value::Time(NaiveTime::from_hms_opt(8, 30, 0).unwrap());
        let evening = Value::Time(NaiveTime::from_hms_opt(17, 0, 0).unwrap());

        assert!(Operator::Lt.evaluate(&morning, &evening).unwrap());
        assert!(!Operator::Ge.evaluate(&morning, &evening).unwrap());
    }
}

use std::borrow::Cow;

use rql_core::{SQL, SQLParam, ToSQL};

/// A bound parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Integer(i64),
    Real(f64),
    Bool(bool),
}

impl Value {
    /// Normalizes a number: integral values that fit in `i64` become
    /// `Integer`, everything else stays `Real`.
    pub fn number(value: f64) -> Self {
        const MIN: f64 = i64::MIN as f64;
        const MAX: f64 = i64::MAX as f64;
        if value.fract() == 0.0 && (MIN..MAX).contains(&value) {
            Value::Integer(value as i64)
        } else {
            Value::Real(value)
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl SQLParam for Value {}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Text(s) => write!(f, "'{}'", s),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Real(r) => write!(f, "{}", r),
            Value::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl<'a> From<Value> for Cow<'a, Value> {
    fn from(value: Value) -> Self {
        Cow::Owned(value)
    }
}

impl<'a> From<&'a Value> for Cow<'a, Value> {
    fn from(value: &'a Value) -> Self {
        Cow::Borrowed(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_owned())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::Integer(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Real(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl<'a> ToSQL<'a, Value> for Value {
    fn to_sql(&self) -> SQL<'a, Value> {
        SQL::param(self.clone())
    }

    fn into_sql(self) -> SQL<'a, Value> {
        SQL::param(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_numbers_normalize_to_integer() {
        assert_eq!(Value::number(1000.0), Value::Integer(1000));
        assert_eq!(Value::number(-3.0), Value::Integer(-3));
        assert_eq!(Value::number(2.5), Value::Real(2.5));
        assert_eq!(Value::number(1e300), Value::Real(1e300));
    }

    #[test]
    fn unsigned_values_saturate() {
        assert_eq!(Value::from(u64::MAX), Value::Integer(i64::MAX));
        assert_eq!(Value::from(50u64), Value::Integer(50));
    }
}

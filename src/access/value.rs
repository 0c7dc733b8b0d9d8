use serde::{Deserialize, Serialize};
use std::fmt;

/// Data types a row value can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    Boolean,
    Int64,
    Double,
    Varchar,
}

impl DataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Boolean => "boolean",
            DataType::Int64 => "integer",
            DataType::Double => "double",
            DataType::Varchar => "string",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dynamically typed row value.
///
/// Display coercion is defined once, by [`Value::to_display_string`]:
///
/// - `Null` renders as the empty string
/// - booleans render as `true` / `false`
/// - integers render in decimal
/// - doubles use Rust's `Display`, with `.0` appended to integral values
///   so `2.0` never reads like an integer
/// - strings render verbatim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    Boolean(bool),
    Int64(i64),
    Double(f64),
    String(String),
}

impl Value {
    /// Get the data type of this value
    pub fn data_type(&self) -> Option<DataType> {
        match self {
            Value::Null => None,
            Value::Boolean(_) => Some(DataType::Boolean),
            Value::Int64(_) => Some(DataType::Int64),
            Value::Double(_) => Some(DataType::Double),
            Value::String(_) => Some(DataType::Varchar),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric view of the value, if it has one
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int64(n) => Some(*n as f64),
            Value::Double(d) => Some(*d),
            _ => None,
        }
    }

    /// Coerce the value to the string shown in a preview
    pub fn to_display_string(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Boolean(b) => b.to_string(),
            Value::Int64(n) => n.to_string(),
            Value::Double(d) => format_double(*d),
            Value::String(s) => s.clone(),
        }
    }
}

fn format_double(d: f64) -> String {
    let text = d.to_string();
    if d.is_finite() && !text.contains(|c: char| c == '.' || c == 'e') {
        text + ".0"
    } else {
        text
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display_string())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int64(n)
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Value::Double(d)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_type() {
        assert_eq!(Value::Null.data_type(), None);
        assert_eq!(Value::Boolean(true).data_type(), Some(DataType::Boolean));
        assert_eq!(Value::Int64(7).data_type(), Some(DataType::Int64));
        assert_eq!(Value::Double(0.5).data_type(), Some(DataType::Double));
        assert_eq!(
            Value::String("x".to_string()).data_type(),
            Some(DataType::Varchar)
        );
    }

    #[test]
    fn test_large_integral_doubles_keep_decimal_point() {
        assert_eq!(Value::Double(1e16).to_display_string(), "10000000000000000.0");
        assert_eq!(
            Value::Double(1e20).to_display_string(),
            "100000000000000000000.0"
        );
        assert_eq!(Value::Double(-1e16).to_display_string(), "-10000000000000000.0");
        assert_ne!(
            Value::Double(1e16).to_display_string(),
            Value::Int64(10_000_000_000_000_000).to_display_string()
        );
    }

    #[test]
    fn test_display_coercion() {
        assert_eq!(Value::Null.to_display_string(), "");
        assert_eq!(Value::Boolean(false).to_display_string(), "false");
        assert_eq!(Value::Int64(-42).to_display_string(), "-42");
        assert_eq!(Value::Double(2.0).to_display_string(), "2.0");
        assert_eq!(Value::Double(2.5).to_display_string(), "2.5");
        assert_eq!(Value::Double(-0.0).to_display_string(), "-0.0");
        assert_eq!(Value::Double(f64::INFINITY).to_display_string(), "inf");
        assert_eq!(Value::from("Alice").to_display_string(), "Alice");
        assert_eq!(format!("{}", Value::Int64(3)), "3");
    }

    #[test]
    fn test_from_conversions() {
        assert_eq!(Value::from(true), Value::Boolean(true));
        assert_eq!(Value::from(5i64), Value::Int64(5));
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some("a")), Value::String("a".to_string()));
    }
}

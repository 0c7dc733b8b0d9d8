//! Row schema and row values.

use crate::access::Value;

/// A column of the active result set, identified by its label
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Attribute {
    name: String,
    position: usize,
}

impl Attribute {
    pub fn new(name: impl Into<String>, position: usize) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ordinal position in the row (0-based)
    pub fn position(&self) -> usize {
        self.position
    }
}

/// One record of the result set, position-aligned with its attributes
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    pub values: Vec<Value>,
}

impl Row {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }
}

impl From<Vec<Value>> for Row {
    fn from(values: Vec<Value>) -> Self {
        Row::new(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute() {
        let attr = Attribute::new("price", 3);
        assert_eq!(attr.name(), "price");
        assert_eq!(attr.position(), 3);
    }

    #[test]
    fn test_row_access() {
        let row = Row::from(vec![Value::Int64(1), Value::Null]);
        assert_eq!(row.len(), 2);
        assert!(!row.is_empty());
        assert_eq!(row.get(0), Some(&Value::Int64(1)));
        assert_eq!(row.get(1), Some(&Value::Null));
        assert_eq!(row.get(2), None);
        assert!(Row::default().is_empty());
    }
}

//! In-memory result set with a current-row selection.

use crate::access::Value;
use crate::result_set::{Attribute, ResultSetSource, Row};
use anyhow::{bail, Result};

#[derive(Debug, Clone, Default)]
pub struct ResultSetModel {
    attributes: Vec<Attribute>,
    rows: Vec<Row>,
    current: Option<usize>,
}

impl ResultSetModel {
    /// Create an empty model; attribute positions follow the order given
    pub fn new<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Result<Self> {
        let mut attributes: Vec<Attribute> = Vec::new();
        for (position, name) in names.into_iter().enumerate() {
            let name = name.into();
            if attributes.iter().any(|a| a.name() == name) {
                bail!("Duplicate attribute name '{}'", name);
            }
            attributes.push(Attribute::new(name, position));
        }
        Ok(Self {
            attributes,
            rows: Vec::new(),
            current: None,
        })
    }

    /// Append a row, returning its index
    pub fn push_row(&mut self, values: Vec<Value>) -> Result<usize> {
        if values.len() != self.attributes.len() {
            bail!(
                "Row has {} values but the result set has {} attributes",
                values.len(),
                self.attributes.len()
            );
        }
        self.rows.push(Row::new(values));
        Ok(self.rows.len() - 1)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn select(&mut self, index: usize) -> Result<()> {
        if index >= self.row_count() {
            bail!(
                "Row index {} out of bounds for result set with {} rows",
                index,
                self.row_count()
            );
        }
        self.current = Some(index);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.current = None;
    }
}

impl ResultSetSource for ResultSetModel {
    fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    fn current_row(&self) -> Option<&Row> {
        self.current.and_then(|i| self.rows.get(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_basic_operations() -> Result<()> {
        let mut model = ResultSetModel::new(["id", "name"])?;
        assert_eq!(model.attributes().len(), 2);
        assert_eq!(model.attributes()[1].position(), 1);
        assert!(model.current_row().is_none());

        model.push_row(vec![Value::Int64(1), Value::from("Alice")])?;
        let second = model.push_row(vec![Value::Int64(2), Value::from("Bob")])?;
        assert_eq!(second, 1);
        assert_eq!(model.row_count(), 2);

        model.select(1)?;
        assert_eq!(
            model.current_row().and_then(|r| r.get(1)),
            Some(&Value::from("Bob"))
        );

        model.clear_selection();
        assert!(model.current_row().is_none());
        Ok(())
    }

    #[test]
    fn test_model_rejects_bad_input() -> Result<()> {
        assert!(ResultSetModel::new(["id", "id"]).is_err());

        let mut model = ResultSetModel::new(["id"])?;
        assert!(model.push_row(vec![]).is_err());
        assert!(model.select(0).is_err());
        Ok(())
    }
}

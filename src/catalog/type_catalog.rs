use crate::catalog::{DataKind, DataTypeProvider, LocalDataType};
use anyhow::{bail, Result};
use std::collections::HashMap;

/// In-memory data-type catalog.
///
/// Names are matched case-insensitively and keep the spelling they were
/// registered with.
#[derive(Debug, Clone, Default)]
pub struct TypeCatalog {
    types: Vec<LocalDataType>,
    defaults: HashMap<DataKind, String>,
}

impl TypeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A small SQL type set with defaults for the common kinds
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        let types = [
            ("bigint", DataKind::Numeric),
            ("boolean", DataKind::Boolean),
            ("bytea", DataKind::Binary),
            ("date", DataKind::Datetime),
            ("double precision", DataKind::Numeric),
            ("integer", DataKind::Numeric),
            ("numeric", DataKind::Numeric),
            ("text", DataKind::String),
            ("timestamp", DataKind::Datetime),
            ("varchar", DataKind::String),
        ];
        for (name, kind) in types {
            catalog.types.push(LocalDataType::new(name, kind));
        }
        for (kind, name) in [
            (DataKind::String, "varchar"),
            (DataKind::Numeric, "numeric"),
            (DataKind::Boolean, "boolean"),
            (DataKind::Datetime, "timestamp"),
            (DataKind::Binary, "bytea"),
        ] {
            catalog.defaults.insert(kind, name.to_string());
        }
        catalog
    }

    pub fn register(&mut self, name: impl Into<String>, kind: DataKind) -> Result<()> {
        let name = name.into();
        if name.trim().is_empty() {
            bail!("Data type name must not be empty");
        }
        if self.find(&name).is_some() {
            bail!("Data type '{}' already exists", name);
        }
        self.types.push(LocalDataType::new(name, kind));
        Ok(())
    }

    /// Make `name` the default type for `kind`; the type must be registered
    pub fn set_default(&mut self, kind: DataKind, name: &str) -> Result<()> {
        let Some(data_type) = self.find(name) else {
            bail!("Data type '{}' does not exist", name);
        };
        let full_name = data_type.full_type_name().to_string();
        self.defaults.insert(kind, full_name);
        Ok(())
    }

    fn find(&self, name: &str) -> Option<&LocalDataType> {
        self.types
            .iter()
            .find(|t| t.full_type_name().eq_ignore_ascii_case(name.trim()))
    }
}

impl DataTypeProvider for TypeCatalog {
    fn local_data_types(&self) -> Vec<LocalDataType> {
        self.types.clone()
    }

    fn local_data_type(&self, name: &str) -> Option<LocalDataType> {
        self.find(name).cloned()
    }

    fn default_data_type_name(&self, kind: DataKind) -> Option<String> {
        self.defaults.get(&kind).cloned()
    }
}

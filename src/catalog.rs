//! Data-type catalog used to fill the type and kind choices of a virtual
//! attribute. The evaluator never consults it.

pub mod data_kind;
pub mod type_catalog;

pub use data_kind::DataKind;
pub use type_catalog::TypeCatalog;

/// A data type known to the data source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalDataType {
    full_type_name: String,
    data_kind: DataKind,
}

impl LocalDataType {
    pub fn new(full_type_name: impl Into<String>, data_kind: DataKind) -> Self {
        Self {
            full_type_name: full_type_name.into(),
            data_kind,
        }
    }

    pub fn full_type_name(&self) -> &str {
        &self.full_type_name
    }

    pub fn data_kind(&self) -> DataKind {
        self.data_kind
    }
}

/// Catalog of the data source's local types
pub trait DataTypeProvider {
    fn local_data_types(&self) -> Vec<LocalDataType>;

    fn local_data_type(&self, name: &str) -> Option<LocalDataType>;

    /// Preferred type name for columns of `kind`
    fn default_data_type_name(&self, kind: DataKind) -> Option<String>;
}

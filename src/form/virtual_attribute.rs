//! Virtual attribute records and their owning entity.

use crate::catalog::DataKind;
use serde::{Deserialize, Serialize};

/// A user-defined computed column
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VirtualAttribute {
    pub name: String,
    pub type_name: Option<String>,
    pub data_kind: DataKind,
    pub expression: Option<String>,
}

impl VirtualAttribute {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_type(mut self, type_name: impl Into<String>, data_kind: DataKind) -> Self {
        self.type_name = Some(type_name.into());
        self.data_kind = data_kind;
        self
    }

    pub fn with_expression(mut self, expression: impl Into<String>) -> Self {
        self.expression = Some(expression.into());
        self
    }
}

/// The set of virtual attributes defined on one entity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VirtualEntity {
    attributes: Vec<VirtualAttribute>,
}

impl VirtualEntity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an attribute, returning its index
    pub fn add(&mut self, attribute: VirtualAttribute) -> usize {
        self.attributes.push(attribute);
        self.attributes.len() - 1
    }

    pub fn attributes(&self) -> &[VirtualAttribute] {
        &self.attributes
    }

    pub fn get(&self, index: usize) -> Option<&VirtualAttribute> {
        self.attributes.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut VirtualAttribute> {
        self.attributes.get_mut(index)
    }

    /// Index of the first attribute called `name`
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.attributes.iter().position(|a| a.name == name)
    }

    /// Derive a name for an attribute that no other attribute resolves to:
    /// `base`, then `base2`, `base3`, ...
    ///
    /// `index` is the edited attribute's own slot, or `None` for an attribute
    /// not yet added. A name is free when lookup by name finds nothing or
    /// finds the edited attribute itself.
    pub fn unique_name(&self, index: Option<usize>, base: &str) -> String {
        let taken = |candidate: &str| match self.position_of(candidate) {
            Some(position) => Some(position) != index,
            None => false,
        };

        let mut name = base.to_string();
        let mut suffix = 1;
        while taken(&name) {
            suffix += 1;
            name = format!("{}{}", base, suffix);
        }
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders() {
        let attr = VirtualAttribute::new("total")
            .with_type("numeric", DataKind::Numeric)
            .with_expression("qty * price");
        assert_eq!(attr.name, "total");
        assert_eq!(attr.type_name.as_deref(), Some("numeric"));
        assert_eq!(attr.data_kind, DataKind::Numeric);
        assert_eq!(attr.expression.as_deref(), Some("qty * price"));

        let bare = VirtualAttribute::new("x");
        assert_eq!(bare.data_kind, DataKind::String);
        assert!(bare.type_name.is_none());
    }

    #[test]
    fn test_entity_lookup() {
        let mut entity = VirtualEntity::new();
        let first = entity.add(VirtualAttribute::new("a"));
        let second = entity.add(VirtualAttribute::new("b"));
        assert_eq!((first, second), (0, 1));
        assert_eq!(entity.position_of("b"), Some(1));
        assert_eq!(entity.position_of("c"), None);
        assert_eq!(entity.get(0).map(|a| a.name.as_str()), Some("a"));
        assert!(entity.get(2).is_none());
    }

    #[test]
    fn test_unique_name() {
        let mut entity = VirtualEntity::new();
        entity.add(VirtualAttribute::new("column"));
        entity.add(VirtualAttribute::new("column2"));
        let index = entity.add(VirtualAttribute::new("column"));

        // Its own name does not count as taken
        assert_eq!(entity.unique_name(Some(1), "column2"), "column2");
        assert_eq!(entity.unique_name(Some(index), "column"), "column3");
        assert_eq!(entity.unique_name(Some(index), "fresh"), "fresh");

        // Not yet added: every existing name is taken
        assert_eq!(entity.unique_name(None, "column"), "column3");
        assert_eq!(entity.unique_name(None, "fresh"), "fresh");
    }

    #[test]
    fn test_unique_name_first_of_duplicates_keeps_name() {
        let mut entity = VirtualEntity::new();
        let first = entity.add(VirtualAttribute::new("total"));
        let second = entity.add(VirtualAttribute::new("total"));

        // Lookup by name finds the first one, so only the second is renamed
        assert_eq!(entity.unique_name(Some(first), "total"), "total");
        assert_eq!(entity.unique_name(Some(second), "total"), "total2");
    }

    #[test]
    fn test_serde_round_trip() {
        let mut entity = VirtualEntity::new();
        entity.add(
            VirtualAttribute::new("label")
                .with_type("varchar", DataKind::String)
                .with_expression("upper(name)"),
        );
        let bytes = bincode::serialize(&entity).unwrap();
        let restored: VirtualEntity = bincode::deserialize(&bytes).unwrap();
        assert_eq!(restored, entity);
    }
}

//! Headless editor for one virtual attribute.
//!
//! Holds the editable fields, recomputes the preview whenever the expression
//! or the name changes, and writes the result back on commit. Dropping the
//! form without committing leaves the entity untouched.

use crate::catalog::{DataKind, DataTypeProvider};
use crate::expression::FUNCTION_NAMES;
use crate::form::{VirtualAttribute, VirtualEntity};
use crate::preview::{ExpressionPreviewEvaluator, Preview};
use crate::result_set::ResultSetSource;
use anyhow::{anyhow, Result};
use log::debug;

pub struct VirtualAttributeForm<'a> {
    source: &'a dyn ResultSetSource,
    provider: Option<&'a dyn DataTypeProvider>,
    evaluator: ExpressionPreviewEvaluator,
    /// Slot of the edited attribute in its entity; `None` until a new one is committed
    index: Option<usize>,
    name: String,
    type_name: String,
    data_kind: String,
    expression: String,
    type_choices: Vec<String>,
    preview: Preview,
}

impl<'a> VirtualAttributeForm<'a> {
    /// Open the editor on attribute `index` of `entity`
    pub fn open(
        entity: &VirtualEntity,
        index: usize,
        source: &'a dyn ResultSetSource,
        provider: Option<&'a dyn DataTypeProvider>,
    ) -> Result<Self> {
        let attribute = entity
            .get(index)
            .ok_or_else(|| anyhow!("Virtual attribute {} does not exist", index))?;
        Ok(Self::with_attribute(entity, attribute, Some(index), source, provider))
    }

    /// Open the editor on an attribute that is not part of `entity` yet.
    /// Committing adds it.
    pub fn open_new(
        entity: &VirtualEntity,
        attribute: &VirtualAttribute,
        source: &'a dyn ResultSetSource,
        provider: Option<&'a dyn DataTypeProvider>,
    ) -> Self {
        Self::with_attribute(entity, attribute, None, source, provider)
    }

    fn with_attribute(
        entity: &VirtualEntity,
        attribute: &VirtualAttribute,
        index: Option<usize>,
        source: &'a dyn ResultSetSource,
        provider: Option<&'a dyn DataTypeProvider>,
    ) -> Self {
        let name = entity.unique_name(index, &attribute.name);

        let mut type_choices = Vec::new();
        let mut type_name = attribute.type_name.clone().unwrap_or_default();
        if let Some(provider) = provider {
            let mut types = provider.local_data_types();
            types.sort_by(|a, b| a.full_type_name().cmp(b.full_type_name()));
            type_choices = types
                .iter()
                .map(|t| t.full_type_name().to_string())
                .collect();
            if type_name.is_empty() {
                type_name = provider
                    .default_data_type_name(DataKind::String)
                    .unwrap_or_default();
            }
        }

        let mut form = Self {
            source,
            provider,
            evaluator: ExpressionPreviewEvaluator::new(),
            index,
            name,
            type_name,
            data_kind: attribute.data_kind.name().to_string(),
            expression: attribute.expression.clone().unwrap_or_default(),
            type_choices,
            preview: Preview::Unavailable,
        };
        form.refresh_preview();
        form
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn data_kind(&self) -> &str {
        &self.data_kind
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn preview(&self) -> &Preview {
        &self.preview
    }

    /// Type names offered by the catalog, sorted
    pub fn type_choices(&self) -> &[String] {
        &self.type_choices
    }

    /// Kind names offered for selection
    pub fn kind_choices(&self) -> Vec<&'static str> {
        DataKind::selectable().map(|k| k.name()).collect()
    }

    /// Suggestions while typing an expression: attribute labels in result set
    /// order, then built-in function names
    pub fn expression_proposals(&self) -> Vec<String> {
        let mut proposals: Vec<String> = self
            .source
            .attributes()
            .iter()
            .map(|a| a.name().to_string())
            .collect();
        for function in FUNCTION_NAMES {
            if !proposals.iter().any(|p| p == function) {
                proposals.push(function.to_string());
            }
        }
        proposals
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.refresh_preview();
    }

    /// Change the type; a type the catalog knows also sets the kind
    pub fn set_type_name(&mut self, type_name: impl Into<String>) {
        self.type_name = type_name.into();
        if let Some(data_type) = self
            .provider
            .and_then(|p| p.local_data_type(&self.type_name))
        {
            self.data_kind = data_type.data_kind().name().to_string();
        }
    }

    pub fn set_data_kind(&mut self, data_kind: impl Into<String>) {
        self.data_kind = data_kind.into();
    }

    pub fn set_expression(&mut self, expression: impl Into<String>) {
        self.expression = expression.into();
        self.refresh_preview();
    }

    fn refresh_preview(&mut self) {
        self.preview = self.evaluator.preview(
            &self.expression,
            self.source.attributes(),
            self.source.current_row(),
            &self.name,
        );
    }

    /// Write the edited fields into `entity`, returning the attribute's slot.
    ///
    /// An attribute opened with [`open`](Self::open) is updated in place; one
    /// opened with [`open_new`](Self::open_new) is appended.
    pub fn commit(self, entity: &mut VirtualEntity) -> Result<usize> {
        let edited = VirtualAttribute {
            name: self.name,
            type_name: non_empty(&self.type_name),
            data_kind: DataKind::parse_or(&self.data_kind, DataKind::String),
            expression: non_empty(&self.expression),
        };

        let index = match self.index {
            Some(index) => {
                let attribute = entity
                    .get_mut(index)
                    .ok_or_else(|| anyhow!("Virtual attribute {} no longer exists", index))?;
                *attribute = edited;
                index
            }
            None => entity.add(edited),
        };

        if let Some(committed) = entity.get(index) {
            debug!(
                "Committed virtual attribute {} '{}' ({:?}, {})",
                index, committed.name, committed.type_name, committed.data_kind
            );
        }
        Ok(index)
    }
}

fn non_empty(text: &str) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

//! Result-set side of the preview: the attribute labels of the active
//! schema and the currently selected row.

pub mod attribute;
pub mod model;

pub use attribute::{Attribute, Row};
pub use model::ResultSetModel;

/// Source of attribute labels and the current row, owned by the viewer
pub trait ResultSetSource {
    fn attributes(&self) -> &[Attribute];

    /// The selected row, or `None` when nothing is selected
    fn current_row(&self) -> Option<&Row>;
}

//! Form layer for defining virtual attributes.
//!
//! - **VirtualAttribute** / **VirtualEntity**: the records being edited
//! - **VirtualAttributeForm**: field state, choices, live preview and commit

pub mod editor;
pub mod virtual_attribute;

pub use editor::VirtualAttributeForm;
pub use virtual_attribute::{VirtualAttribute, VirtualEntity};

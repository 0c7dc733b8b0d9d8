pub mod access;
pub mod catalog;
pub mod expression;
pub mod form;
pub mod preview;
pub mod result_set;
pub mod syntax;

//! Expression evaluation for virtual attributes.
//!
//! This module provides:
//! - Expression AST representation
//! - Expression evaluation against a single row
//! - Built-in scalar functions
//!
//! Parsing lives in [`crate::syntax`]; this module only sees trees.

pub mod error;
pub mod eval;
pub mod expr;
pub mod function;
pub mod operator;

pub use error::{EvalResult, ExpressionError};
pub use eval::{evaluate_expression, ExpressionEvaluator};
pub use expr::{ColumnRef, Expression, Literal};
pub use function::{call_function, FUNCTION_NAMES};
pub use operator::{BinaryOperator, UnaryOperator};

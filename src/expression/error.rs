//! Error types for expression evaluation.

use crate::access::DataType;
use thiserror::Error;

fn type_name(data_type: &Option<DataType>) -> &'static str {
    data_type.map(|t| t.as_str()).unwrap_or("null")
}

/// Errors that can occur while evaluating a parsed expression
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExpressionError {
    /// Identifier does not name any attribute of the row
    #[error("Unknown attribute '{name}'")]
    UnknownAttribute { name: String },

    /// Invalid operand types for operator
    #[error(
        "Invalid operand types for operator {operator}: {}, {}",
        type_name(.left_type),
        type_name(.right_type)
    )]
    InvalidOperandTypes {
        operator: String,
        left_type: Option<DataType>,
        right_type: Option<DataType>,
    },

    /// Operand is not usable as a condition
    #[error("Expected boolean in {context}, got {}", type_name(.actual))]
    NotABoolean {
        context: String,
        actual: Option<DataType>,
    },

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Arithmetic overflow in operator {operator}")]
    Overflow { operator: String },

    #[error("Unknown function: {name}")]
    UnknownFunction { name: String },

    /// Wrong number of function arguments
    #[error("Function {function} expects {expected} arguments, got {actual}")]
    FunctionArgumentCount {
        function: String,
        expected: String,
        actual: usize,
    },

    /// Argument has the wrong type or an out-of-range value
    #[error("Invalid argument to {function}: {message}")]
    InvalidArgument { function: String, message: String },

    /// Row does not line up with its attribute list
    #[error("Row has {values} values but {attributes} attributes")]
    RowShapeMismatch { attributes: usize, values: usize },
}

/// Result type for expression evaluation
pub type EvalResult<T> = Result<T, ExpressionError>;

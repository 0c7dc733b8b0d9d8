//! Live preview of a virtual attribute expression.
//!
//! [`ExpressionPreviewEvaluator`] is the boundary between the form layer and
//! the expression engine: it parses and evaluates against one row and turns
//! every outcome into display text. Nothing fails past this point.
//!
//! Conventions:
//! - an empty or whitespace-only expression previews as an empty value
//! - parse failures read `Parse error: ...`, runtime failures read
//!   `Evaluation error: ...`
//! - with no selected row the preview is [`Preview::Unavailable`], whose text
//!   is [`NO_ROW_MESSAGE`]

use crate::access::Value;
use crate::expression::{ExpressionError, ExpressionEvaluator};
use crate::result_set::{Attribute, Row};
use crate::syntax::{parse_expression, ParseError};
use log::{debug, trace};
use std::fmt;

/// Shown instead of a preview when no row is selected
pub const NO_ROW_MESSAGE: &str = "Select a row in data viewer to see expression results";

/// Outcome of one preview evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpressionResult {
    /// Result coerced to its display string
    Value(String),
    /// Human readable diagnostic
    Error(String),
}

impl ExpressionResult {
    pub fn is_error(&self) -> bool {
        matches!(self, ExpressionResult::Error(_))
    }

    pub fn text(&self) -> &str {
        match self {
            ExpressionResult::Value(text) | ExpressionResult::Error(text) => text,
        }
    }
}

/// What the preview field shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    /// No current row to evaluate against
    Unavailable,
    Ready(ExpressionResult),
}

impl Preview {
    pub fn text(&self) -> &str {
        match self {
            Preview::Unavailable => NO_ROW_MESSAGE,
            Preview::Ready(result) => result.text(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Preview::Ready(result) if result.is_error())
    }
}

impl fmt::Display for Preview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Why a preview could not produce a value
#[derive(Debug)]
enum PreviewFailure {
    Parse(ParseError),
    Evaluation(ExpressionError),
}

impl fmt::Display for PreviewFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreviewFailure::Parse(e) => write!(f, "Parse error: {}", e),
            PreviewFailure::Evaluation(e) => write!(f, "Evaluation error: {}", e),
        }
    }
}

/// Stateless expression preview. Every call is independent.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpressionPreviewEvaluator;

impl ExpressionPreviewEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate `expression` against `row` and render the outcome.
    ///
    /// `candidate_name` is the name of the virtual attribute being defined;
    /// referring to it yields NULL unless a real attribute has that label.
    pub fn evaluate(
        &self,
        expression: &str,
        attributes: &[Attribute],
        row: &Row,
        candidate_name: &str,
    ) -> ExpressionResult {
        trace!("Evaluating preview expression {:?}", expression);
        if expression.trim().is_empty() {
            return ExpressionResult::Value(String::new());
        }

        match Self::try_evaluate(expression, attributes, row, candidate_name) {
            Ok(value) => ExpressionResult::Value(value.to_display_string()),
            Err(failure) => {
                debug!("Preview of {:?} failed: {}", expression, failure);
                ExpressionResult::Error(failure.to_string())
            }
        }
    }

    /// Like [`evaluate`](Self::evaluate), but tolerates a missing row
    pub fn preview(
        &self,
        expression: &str,
        attributes: &[Attribute],
        row: Option<&Row>,
        candidate_name: &str,
    ) -> Preview {
        match row {
            Some(row) => Preview::Ready(self.evaluate(expression, attributes, row, candidate_name)),
            None => Preview::Unavailable,
        }
    }

    fn try_evaluate(
        expression: &str,
        attributes: &[Attribute],
        row: &Row,
        candidate_name: &str,
    ) -> Result<Value, PreviewFailure> {
        let parsed = parse_expression(expression).map_err(|e| {
            trace!("Parse stopped at character {} of {:?}", e.offset(), expression);
            PreviewFailure::Parse(e)
        })?;
        let evaluator = ExpressionEvaluator::new(attributes, &row.values)
            .map_err(PreviewFailure::Evaluation)?
            .with_self_name(candidate_name);
        evaluator.evaluate(&parsed).map_err(PreviewFailure::Evaluation)
    }
}

/// Convenience wrapper around [`ExpressionPreviewEvaluator::evaluate`]
pub fn evaluate(
    expression: &str,
    attributes: &[Attribute],
    row: &Row,
    candidate_name: &str,
) -> ExpressionResult {
    ExpressionPreviewEvaluator.evaluate(expression, attributes, row, candidate_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn people() -> (Vec<Attribute>, Row) {
        (
            vec![Attribute::new("id", 0), Attribute::new("name", 1)],
            Row::new(vec![Value::Int64(1), Value::from("Alice")]),
        )
    }

    #[test]
    fn test_value_results() {
        let (attributes, row) = people();
        assert_eq!(
            evaluate("name + '!'", &attributes, &row, "greeting"),
            ExpressionResult::Value("Alice!".to_string())
        );
        assert_eq!(
            evaluate("id * 10", &attributes, &row, "x"),
            ExpressionResult::Value("10".to_string())
        );
        assert_eq!(
            evaluate("id / 4.0", &attributes, &row, "x"),
            ExpressionResult::Value("0.25".to_string())
        );
        assert_eq!(
            evaluate("null", &attributes, &row, "x"),
            ExpressionResult::Value(String::new())
        );
    }

    #[test]
    fn test_empty_expression() {
        let (attributes, row) = people();
        assert_eq!(
            evaluate("", &attributes, &row, "x"),
            ExpressionResult::Value(String::new())
        );
        assert_eq!(
            evaluate(" \n\t", &attributes, &row, "x"),
            ExpressionResult::Value(String::new())
        );
    }

    #[test]
    fn test_parse_and_evaluation_errors_are_distinguished() {
        let (attributes, row) = people();

        let parse = evaluate("1 + (", &attributes, &row, "x");
        assert!(parse.is_error());
        assert!(parse.text().starts_with("Parse error: "));

        let eval = evaluate("id / 0", &attributes, &row, "x");
        assert_eq!(
            eval,
            ExpressionResult::Error("Evaluation error: Division by zero".to_string())
        );

        let unknown = evaluate("salary * 2", &attributes, &row, "x");
        assert_eq!(
            unknown,
            ExpressionResult::Error("Evaluation error: Unknown attribute 'salary'".to_string())
        );
    }

    #[test]
    fn test_candidate_name_reference() {
        let (attributes, row) = people();
        assert_eq!(
            evaluate("total", &attributes, &row, "total"),
            ExpressionResult::Value(String::new())
        );
        assert_eq!(
            evaluate("coalesce(total, name)", &attributes, &row, "total"),
            ExpressionResult::Value("Alice".to_string())
        );
    }

    #[test]
    fn test_row_shape_mismatch_is_reported() {
        let attributes = vec![Attribute::new("id", 0)];
        let row = Row::default();
        let result = evaluate("1", &attributes, &row, "x");
        assert!(result.is_error());
    }

    #[test]
    fn test_preview_without_row() {
        let (attributes, row) = people();
        let evaluator = ExpressionPreviewEvaluator::new();

        let unavailable = evaluator.preview("id", &attributes, None, "x");
        assert_eq!(unavailable, Preview::Unavailable);
        assert_eq!(unavailable.text(), NO_ROW_MESSAGE);
        assert!(!unavailable.is_error());

        let ready = evaluator.preview("id", &attributes, Some(&row), "x");
        assert_eq!(ready.to_string(), "1");
    }
}

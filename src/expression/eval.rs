//! Expression evaluation implementation.

use crate::access::Value;
use crate::expression::function::call_function;
use crate::expression::{
    BinaryOperator, ColumnRef, EvalResult, Expression, ExpressionError, UnaryOperator,
};
use crate::result_set::Attribute;
use std::cmp::Ordering;

/// Evaluator for expressions against a single row
pub struct ExpressionEvaluator<'a> {
    /// Attribute labels, position-aligned with `values`
    attributes: &'a [Attribute],
    /// The row values to evaluate against
    values: &'a [Value],
    /// Name of the attribute being defined; references to it yield NULL
    self_name: Option<&'a str>,
}

impl<'a> ExpressionEvaluator<'a> {
    /// Create a new evaluator over a row.
    ///
    /// Fails when the row and its attribute list have different lengths.
    pub fn new(attributes: &'a [Attribute], values: &'a [Value]) -> EvalResult<Self> {
        if attributes.len() != values.len() {
            return Err(ExpressionError::RowShapeMismatch {
                attributes: attributes.len(),
                values: values.len(),
            });
        }
        Ok(Self {
            attributes,
            values,
            self_name: None,
        })
    }

    /// Treat `name` as the attribute under definition
    pub fn with_self_name(mut self, name: &'a str) -> Self {
        self.self_name = Some(name);
        self
    }

    /// Evaluate an expression and return the result
    pub fn evaluate(&self, expr: &Expression) -> EvalResult<Value> {
        match expr {
            Expression::Literal(lit) => Ok(lit.value.clone()),

            Expression::ColumnRef(col) => self.evaluate_column_ref(col),

            Expression::BinaryOp { op, left, right } if op.is_logical() => {
                self.evaluate_logical(*op, left, right)
            }

            Expression::BinaryOp { op, left, right } => {
                let left_val = self.evaluate(left)?;
                let right_val = self.evaluate(right)?;
                self.evaluate_binary_op(*op, left_val, right_val)
            }

            Expression::UnaryOp { op, operand } => {
                let operand_val = self.evaluate(operand)?;
                self.evaluate_unary_op(*op, operand_val)
            }

            Expression::FunctionCall { name, args } => {
                let arg_values = args
                    .iter()
                    .map(|arg| self.evaluate(arg))
                    .collect::<EvalResult<Vec<_>>>()?;
                call_function(name, arg_values)
            }

            Expression::Conditional {
                condition,
                then_branch,
                else_branch,
            } => {
                let cond = self.evaluate(condition)?;
                if truthy(&cond, "?:")? {
                    self.evaluate(then_branch)
                } else {
                    self.evaluate(else_branch)
                }
            }
        }
    }

    /// Resolve an attribute by label; real attributes shadow the self name
    fn evaluate_column_ref(&self, col: &ColumnRef) -> EvalResult<Value> {
        if let Some(pos) = self.attributes.iter().position(|a| a.name() == col.name) {
            return Ok(self.values[pos].clone());
        }
        if self.self_name == Some(col.name.as_str()) {
            return Ok(Value::Null);
        }
        Err(ExpressionError::UnknownAttribute {
            name: col.name.clone(),
        })
    }

    /// `&&` and `||` with short-circuit; NULL counts as false
    fn evaluate_logical(
        &self,
        op: BinaryOperator,
        left: &Expression,
        right: &Expression,
    ) -> EvalResult<Value> {
        let left_val = truthy(&self.evaluate(left)?, op.as_str())?;
        match (op, left_val) {
            (BinaryOperator::And, false) => Ok(Value::Boolean(false)),
            (BinaryOperator::Or, true) => Ok(Value::Boolean(true)),
            _ => {
                let right_val = truthy(&self.evaluate(right)?, op.as_str())?;
                Ok(Value::Boolean(right_val))
            }
        }
    }

    /// Evaluate a binary operation
    fn evaluate_binary_op(
        &self,
        op: BinaryOperator,
        left: Value,
        right: Value,
    ) -> EvalResult<Value> {
        // Equality is defined for NULL, everything else propagates it
        match op {
            BinaryOperator::Eq => return Ok(Value::Boolean(values_equal(&left, &right))),
            BinaryOperator::Ne => return Ok(Value::Boolean(!values_equal(&left, &right))),
            _ => {}
        }

        if op == BinaryOperator::Add
            && (matches!(left, Value::String(_)) || matches!(right, Value::String(_)))
        {
            if left.is_null() || right.is_null() {
                return Ok(Value::Null);
            }
            return Ok(Value::String(format!(
                "{}{}",
                left.to_display_string(),
                right.to_display_string()
            )));
        }

        if left.is_null() || right.is_null() {
            return Ok(Value::Null);
        }

        if op.is_comparison() {
            let ordering = compare_values(op, &left, &right)?;
            let result = match op {
                BinaryOperator::Lt => ordering == Ordering::Less,
                BinaryOperator::Le => ordering != Ordering::Greater,
                BinaryOperator::Gt => ordering == Ordering::Greater,
                _ => ordering != Ordering::Less,
            };
            return Ok(Value::Boolean(result));
        }

        match (&left, &right) {
            (Value::Int64(a), Value::Int64(b)) => integer_arithmetic(op, *a, *b),
            _ => match (left.as_f64(), right.as_f64()) {
                (Some(a), Some(b)) => double_arithmetic(op, a, b),
                _ => Err(invalid_operands(op.as_str(), &left, &right)),
            },
        }
    }

    /// Evaluate a unary operation
    fn evaluate_unary_op(&self, op: UnaryOperator, operand: Value) -> EvalResult<Value> {
        match (op, operand) {
            (_, Value::Null) => Ok(Value::Null),
            (UnaryOperator::Not, Value::Boolean(b)) => Ok(Value::Boolean(!b)),
            (UnaryOperator::Plus, v @ (Value::Int64(_) | Value::Double(_))) => Ok(v),
            (UnaryOperator::Minus, Value::Int64(n)) => {
                n.checked_neg()
                    .map(Value::Int64)
                    .ok_or_else(|| ExpressionError::Overflow {
                        operator: op.as_str().to_string(),
                    })
            }
            (UnaryOperator::Minus, Value::Double(d)) => Ok(Value::Double(-d)),
            (_, operand) => Err(ExpressionError::InvalidOperandTypes {
                operator: op.as_str().to_string(),
                left_type: operand.data_type(),
                right_type: None,
            }),
        }
    }
}

/// Interpret a condition value; NULL is false
fn truthy(value: &Value, context: &str) -> EvalResult<bool> {
    match value {
        Value::Boolean(b) => Ok(*b),
        Value::Null => Ok(false),
        other => Err(ExpressionError::NotABoolean {
            context: context.to_string(),
            actual: other.data_type(),
        }),
    }
}

fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Null, Value::Null) => true,
        (Value::Null, _) | (_, Value::Null) => false,
        (Value::Int64(a), Value::Int64(b)) => a == b,
        (Value::Boolean(a), Value::Boolean(b)) => a == b,
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Double(a), Value::Double(b)) => a == b,
        (Value::Int64(a), Value::Double(b)) | (Value::Double(b), Value::Int64(a)) => {
            compare_int_double(*a, *b) == Some(Ordering::Equal)
        }
        _ => false,
    }
}

fn compare_values(op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Ordering> {
    let ordering = match (left, right) {
        (Value::Int64(a), Value::Int64(b)) => Some(a.cmp(b)),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Boolean(a), Value::Boolean(b)) => Some(a.cmp(b)),
        (Value::Double(a), Value::Double(b)) => a.partial_cmp(b),
        (Value::Int64(a), Value::Double(b)) => compare_int_double(*a, *b),
        (Value::Double(a), Value::Int64(b)) => compare_int_double(*b, *a).map(Ordering::reverse),
        _ => None,
    };
    ordering.ok_or_else(|| invalid_operands(op.as_str(), left, right))
}

/// Order an integer against a double without rounding the integer to `f64`
fn compare_int_double(a: i64, b: f64) -> Option<Ordering> {
    const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;

    if b.is_nan() {
        return None;
    }
    if b >= TWO_POW_63 {
        return Some(Ordering::Less);
    }
    if b < -TWO_POW_63 {
        return Some(Ordering::Greater);
    }
    let whole = b.trunc();
    match a.cmp(&(whole as i64)) {
        Ordering::Equal => 0.0_f64.partial_cmp(&(b - whole)),
        other => Some(other),
    }
}

fn integer_arithmetic(op: BinaryOperator, a: i64, b: i64) -> EvalResult<Value> {
    let result = match op {
        BinaryOperator::Add => a.checked_add(b),
        BinaryOperator::Sub => a.checked_sub(b),
        BinaryOperator::Mul => a.checked_mul(b),
        BinaryOperator::Div | BinaryOperator::Mod if b == 0 => {
            return Err(ExpressionError::DivisionByZero)
        }
        BinaryOperator::Div => a.checked_div(b),
        BinaryOperator::Mod => a.checked_rem(b),
        _ => unreachable!("non-arithmetic operator {:?}", op),
    };
    result.map(Value::Int64).ok_or_else(|| ExpressionError::Overflow {
        operator: op.as_str().to_string(),
    })
}

fn double_arithmetic(op: BinaryOperator, a: f64, b: f64) -> EvalResult<Value> {
    let result = match op {
        BinaryOperator::Add => a + b,
        BinaryOperator::Sub => a - b,
        BinaryOperator::Mul => a * b,
        BinaryOperator::Div | BinaryOperator::Mod if b == 0.0 => {
            return Err(ExpressionError::DivisionByZero)
        }
        BinaryOperator::Div => a / b,
        BinaryOperator::Mod => a % b,
        _ => unreachable!("non-arithmetic operator {:?}", op),
    };
    Ok(Value::Double(result))
}

fn invalid_operands(operator: &str, left: &Value, right: &Value) -> ExpressionError {
    ExpressionError::InvalidOperandTypes {
        operator: operator.to_string(),
        left_type: left.data_type(),
        right_type: right.data_type(),
    }
}

/// Helper function to evaluate an expression against one row
pub fn evaluate_expression(
    expr: &Expression,
    attributes: &[Attribute],
    values: &[Value],
) -> EvalResult<Value> {
    ExpressionEvaluator::new(attributes, values)?.evaluate(expr)
}

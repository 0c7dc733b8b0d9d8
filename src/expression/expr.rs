//! Expression AST definitions.

use crate::access::Value;
use crate::expression::operator::{BinaryOperator, UnaryOperator};

/// Reference to a row attribute by label
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnRef {
    pub name: String,
}

impl ColumnRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Literal value in an expression
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub value: Value,
}

impl Literal {
    pub fn new(value: Value) -> Self {
        Self { value }
    }
}

/// Expression tree node
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Literal constant value
    Literal(Literal),

    /// Attribute reference
    ColumnRef(ColumnRef),

    /// Binary operation
    BinaryOp {
        op: BinaryOperator,
        left: Box<Expression>,
        right: Box<Expression>,
    },

    /// Unary operation
    UnaryOp {
        op: UnaryOperator,
        operand: Box<Expression>,
    },

    /// Built-in function call
    FunctionCall { name: String, args: Vec<Expression> },

    /// `condition ? then_branch : else_branch`
    Conditional {
        condition: Box<Expression>,
        then_branch: Box<Expression>,
        else_branch: Box<Expression>,
    },
}

impl Expression {
    /// Create a literal expression
    pub fn literal(value: Value) -> Self {
        Expression::Literal(Literal::new(value))
    }

    /// Create an attribute reference expression
    pub fn column(name: impl Into<String>) -> Self {
        Expression::ColumnRef(ColumnRef::new(name))
    }

    /// Create a binary operation expression
    pub fn binary_op(op: BinaryOperator, left: Expression, right: Expression) -> Self {
        Expression::BinaryOp {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Create a unary operation expression
    pub fn unary_op(op: UnaryOperator, operand: Expression) -> Self {
        Expression::UnaryOp {
            op,
            operand: Box::new(operand),
        }
    }

    /// Create a function call expression
    pub fn function(name: impl Into<String>, args: Vec<Expression>) -> Self {
        Expression::FunctionCall {
            name: name.into(),
            args,
        }
    }

    /// Create a conditional (`?:`) expression
    pub fn conditional(condition: Expression, then_branch: Expression, else_branch: Expression) -> Self {
        Expression::Conditional {
            condition: Box::new(condition),
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
        }
    }

    /// Create an AND expression
    pub fn and(left: Expression, right: Expression) -> Self {
        Self::binary_op(BinaryOperator::And, left, right)
    }

    /// Create an OR expression
    pub fn or(left: Expression, right: Expression) -> Self {
        Self::binary_op(BinaryOperator::Or, left, right)
    }

    /// Create a NOT expression
    pub fn not_expr(operand: Expression) -> Self {
        Self::unary_op(UnaryOperator::Not, operand)
    }

    /// Create an equality expression
    pub fn eq(left: Expression, right: Expression) -> Self {
        Self::binary_op(BinaryOperator::Eq, left, right)
    }

    /// Create a greater-than expression
    pub fn gt(left: Expression, right: Expression) -> Self {
        Self::binary_op(BinaryOperator::Gt, left, right)
    }

    /// Create an addition expression
    pub fn add_expr(left: Expression, right: Expression) -> Self {
        Self::binary_op(BinaryOperator::Add, left, right)
    }

    /// Create a subtraction expression
    pub fn sub_expr(left: Expression, right: Expression) -> Self {
        Self::binary_op(BinaryOperator::Sub, left, right)
    }

    /// Create a multiplication expression
    pub fn mul_expr(left: Expression, right: Expression) -> Self {
        Self::binary_op(BinaryOperator::Mul, left, right)
    }

    /// Create a division expression
    pub fn div_expr(left: Expression, right: Expression) -> Self {
        Self::binary_op(BinaryOperator::Div, left, right)
    }

    /// Check if this expression is a constant (contains no attribute references)
    pub fn is_constant(&self) -> bool {
        match self {
            Expression::Literal(_) => true,
            Expression::ColumnRef(_) => false,
            Expression::BinaryOp { left, right, .. } => left.is_constant() && right.is_constant(),
            Expression::UnaryOp { operand, .. } => operand.is_constant(),
            Expression::FunctionCall { args, .. } => args.iter().all(|arg| arg.is_constant()),
            Expression::Conditional {
                condition,
                then_branch,
                else_branch,
            } => condition.is_constant() && then_branch.is_constant() && else_branch.is_constant(),
        }
    }

    /// Number of nodes on the longest root-to-leaf path
    pub fn depth(&self) -> usize {
        let children = match self {
            Expression::Literal(_) | Expression::ColumnRef(_) => 0,
            Expression::BinaryOp { left, right, .. } => left.depth().max(right.depth()),
            Expression::UnaryOp { operand, .. } => operand.depth(),
            Expression::FunctionCall { args, .. } => {
                args.iter().map(Expression::depth).max().unwrap_or(0)
            }
            Expression::Conditional {
                condition,
                then_branch,
                else_branch,
            } => condition
                .depth()
                .max(then_branch.depth())
                .max(else_branch.depth()),
        };
        children + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_constant() {
        assert!(Expression::literal(Value::Int64(42)).is_constant());
        assert!(!Expression::column("id").is_constant());

        assert!(Expression::add_expr(
            Expression::literal(Value::Int64(1)),
            Expression::literal(Value::Int64(2))
        )
        .is_constant());

        assert!(!Expression::function(
            "upper",
            vec![Expression::column("name")]
        )
        .is_constant());

        assert!(!Expression::conditional(
            Expression::literal(Value::Boolean(true)),
            Expression::literal(Value::Int64(1)),
            Expression::column("id"),
        )
        .is_constant());
    }

    #[test]
    fn test_depth() {
        assert_eq!(Expression::column("id").depth(), 1);

        // Left-deep chain: ((a + b) + c) + d
        let chain = Expression::add_expr(
            Expression::add_expr(
                Expression::add_expr(Expression::column("a"), Expression::column("b")),
                Expression::column("c"),
            ),
            Expression::column("d"),
        );
        assert_eq!(chain.depth(), 4);

        let expr = Expression::conditional(
            Expression::gt(Expression::column("qty"), Expression::literal(Value::Int64(0))),
            Expression::function("abs", vec![Expression::not_expr(Expression::column("x"))]),
            Expression::column("fallback"),
        );
        assert_eq!(expr.depth(), 4);
        assert_eq!(Expression::function("coalesce", vec![]).depth(), 1);
    }
}

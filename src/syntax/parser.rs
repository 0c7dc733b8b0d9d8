// Expression parser - converts tokens to an expression tree

use super::error::{ParseError, ParseResult};
use super::lexer::Lexer;
use super::token::{SpannedToken, Token};
use crate::access::Value;
use crate::expression::{BinaryOperator, Expression, UnaryOperator};

/// Upper bound on operators and calls in one expression
pub const MAX_OPERATORS: usize = 1024;

/// Upper bound on parenthesis / unary / ternary nesting
pub const MAX_NESTING: usize = 128;

/// Upper bound on the depth of the resulting tree, so evaluating it stays
/// within a small thread stack
pub const MAX_DEPTH: usize = 256;

pub struct Parser {
    tokens: Vec<SpannedToken>,
    position: usize,
    depth: usize,
    operators: usize,
}

impl Parser {
    pub fn new(input: &str) -> ParseResult<Self> {
        let tokens = Lexer::new(input).tokenize()?;
        Ok(Parser {
            tokens,
            position: 0,
            depth: 0,
            operators: 0,
        })
    }

    /// Parse the whole input as one expression
    pub fn parse(&mut self) -> ParseResult<Expression> {
        let expr = self.parse_expression()?;
        if self.current_token() != Token::Eof {
            return Err(self.unexpected("end of expression"));
        }
        if expr.depth() > MAX_DEPTH {
            return Err(ParseError::TooComplex {
                limit: format!("{} levels of depth", MAX_DEPTH),
                offset: 0,
            });
        }
        Ok(expr)
    }

    /// Parse expression
    fn parse_expression(&mut self) -> ParseResult<Expression> {
        self.enter()?;
        let expr = self.parse_conditional();
        self.depth -= 1;
        expr
    }

    /// Parse `cond ? a : b`, right associative
    fn parse_conditional(&mut self) -> ParseResult<Expression> {
        let condition = self.parse_or()?;

        if self.match_token(&Token::Question) {
            self.count_operator()?;
            self.advance();
            let then_branch = self.parse_expression()?;
            self.expect_token(Token::Colon)?;
            let else_branch = self.parse_expression()?;
            return Ok(Expression::conditional(condition, then_branch, else_branch));
        }

        Ok(condition)
    }

    /// Parse OR expression
    fn parse_or(&mut self) -> ParseResult<Expression> {
        let mut left = self.parse_and()?;

        while matches!(self.current_token(), Token::PipePipe | Token::Or) {
            self.count_operator()?;
            self.advance();
            let right = self.parse_and()?;
            left = Expression::binary_op(BinaryOperator::Or, left, right);
        }

        Ok(left)
    }

    /// Parse AND expression
    fn parse_and(&mut self) -> ParseResult<Expression> {
        let mut left = self.parse_equality()?;

        while matches!(self.current_token(), Token::AmpAmp | Token::And) {
            self.count_operator()?;
            self.advance();
            let right = self.parse_equality()?;
            left = Expression::binary_op(BinaryOperator::And, left, right);
        }

        Ok(left)
    }

    /// Parse `==` / `!=`
    fn parse_equality(&mut self) -> ParseResult<Expression> {
        let mut left = self.parse_relational()?;

        loop {
            let op = match self.current_token() {
                Token::EqualEqual | Token::Eq => BinaryOperator::Eq,
                Token::BangEqual | Token::Ne => BinaryOperator::Ne,
                _ => break,
            };
            self.count_operator()?;
            self.advance();
            let right = self.parse_relational()?;
            left = Expression::binary_op(op, left, right);
        }

        Ok(left)
    }

    /// Parse ordering comparisons
    fn parse_relational(&mut self) -> ParseResult<Expression> {
        let mut left = self.parse_addition()?;

        loop {
            let op = match self.current_token() {
                Token::Less | Token::Lt => BinaryOperator::Lt,
                Token::LessEqual | Token::Le => BinaryOperator::Le,
                Token::Greater | Token::Gt => BinaryOperator::Gt,
                Token::GreaterEqual | Token::Ge => BinaryOperator::Ge,
                _ => break,
            };
            self.count_operator()?;
            self.advance();
            let right = self.parse_addition()?;
            left = Expression::binary_op(op, left, right);
        }

        Ok(left)
    }

    /// Parse addition/subtraction expression
    fn parse_addition(&mut self) -> ParseResult<Expression> {
        let mut left = self.parse_multiplication()?;

        loop {
            let op = match self.current_token() {
                Token::Plus => BinaryOperator::Add,
                Token::Minus => BinaryOperator::Sub,
                _ => break,
            };
            self.count_operator()?;
            self.advance();
            let right = self.parse_multiplication()?;
            left = Expression::binary_op(op, left, right);
        }

        Ok(left)
    }

    /// Parse multiplication/division expression
    fn parse_multiplication(&mut self) -> ParseResult<Expression> {
        let mut left = self.parse_unary()?;

        loop {
            let op = match self.current_token() {
                Token::Star => BinaryOperator::Mul,
                Token::Slash | Token::Div => BinaryOperator::Div,
                Token::Percent | Token::Mod => BinaryOperator::Mod,
                _ => break,
            };
            self.count_operator()?;
            self.advance();
            let right = self.parse_unary()?;
            left = Expression::binary_op(op, left, right);
        }

        Ok(left)
    }

    /// Parse unary expression
    fn parse_unary(&mut self) -> ParseResult<Expression> {
        let op = match self.current_token() {
            Token::Plus => UnaryOperator::Plus,
            Token::Minus => UnaryOperator::Minus,
            Token::Bang | Token::Not => UnaryOperator::Not,
            _ => return self.parse_primary(),
        };
        self.count_operator()?;
        self.enter()?;
        self.advance();

        let operand = self.parse_unary();
        self.depth -= 1;
        Ok(Expression::unary_op(op, operand?))
    }

    /// Parse primary expression
    fn parse_primary(&mut self) -> ParseResult<Expression> {
        match self.current_token() {
            Token::Integer(n) => {
                self.advance();
                Ok(Expression::literal(Value::Int64(n)))
            }
            Token::Decimal(d) => {
                self.advance();
                Ok(Expression::literal(Value::Double(d)))
            }
            Token::String(s) => {
                self.advance();
                Ok(Expression::literal(Value::String(s)))
            }
            Token::True => {
                self.advance();
                Ok(Expression::literal(Value::Boolean(true)))
            }
            Token::False => {
                self.advance();
                Ok(Expression::literal(Value::Boolean(false)))
            }
            Token::Null => {
                self.advance();
                Ok(Expression::literal(Value::Null))
            }
            Token::Identifier(name) => {
                self.advance();

                // Check for function call
                if self.match_token(&Token::LeftParen) {
                    self.count_operator()?;
                    self.advance();
                    let args = if self.match_token(&Token::RightParen) {
                        vec![]
                    } else {
                        self.parse_expression_list()?
                    };
                    self.expect_token(Token::RightParen)?;
                    Ok(Expression::function(name, args))
                } else {
                    Ok(Expression::column(name))
                }
            }
            Token::LeftParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect_token(Token::RightParen)?;
                Ok(expr)
            }
            _ => Err(self.unexpected("an operand")),
        }
    }

    /// Parse list of expressions
    fn parse_expression_list(&mut self) -> ParseResult<Vec<Expression>> {
        let mut expressions = vec![];

        loop {
            expressions.push(self.parse_expression()?);
            if !self.match_token(&Token::Comma) {
                break;
            }
            self.advance();
        }

        Ok(expressions)
    }

    // Helper methods

    fn enter(&mut self) -> ParseResult<()> {
        if self.depth >= MAX_NESTING {
            return Err(ParseError::TooComplex {
                limit: format!("{} levels of nesting", MAX_NESTING),
                offset: self.current_offset(),
            });
        }
        self.depth += 1;
        Ok(())
    }

    fn count_operator(&mut self) -> ParseResult<()> {
        self.operators += 1;
        if self.operators > MAX_OPERATORS {
            return Err(ParseError::TooComplex {
                limit: format!("{} operators", MAX_OPERATORS),
                offset: self.current_offset(),
            });
        }
        Ok(())
    }

    /// Get current token
    fn current_token(&self) -> Token {
        self.tokens
            .get(self.position)
            .map(|t| t.token.clone())
            .unwrap_or(Token::Eof)
    }

    fn current_offset(&self) -> usize {
        self.tokens
            .get(self.position)
            .or_else(|| self.tokens.last())
            .map(|t| t.offset)
            .unwrap_or(0)
    }

    /// Advance to next token
    fn advance(&mut self) {
        if self.position + 1 < self.tokens.len() {
            self.position += 1;
        }
    }

    /// Check if current token matches
    fn match_token(&self, token: &Token) -> bool {
        self.current_token() == *token
    }

    /// Expect a specific token
    fn expect_token(&mut self, token: Token) -> ParseResult<()> {
        if self.current_token() == token {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(&token.describe()))
        }
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        ParseError::UnexpectedToken {
            expected: expected.to_string(),
            found: self.current_token().describe(),
            offset: self.current_offset(),
        }
    }
}

/// Parse expression text into a tree
pub fn parse_expression(input: &str) -> ParseResult<Expression> {
    Parser::new(input)?.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(v: impl Into<Value>) -> Expression {
        Expression::literal(v.into())
    }

    #[test]
    fn test_parse_simple() {
        assert_eq!(
            parse_expression("name + '!'").unwrap(),
            Expression::add_expr(Expression::column("name"), lit("!"))
        );
        assert_eq!(parse_expression("null").unwrap(), lit(Value::Null));
        assert_eq!(parse_expression("2.5").unwrap(), lit(2.5));
    }

    #[test]
    fn test_operator_precedence() {
        // 1 + 2 * 3 parses as 1 + (2 * 3)
        assert_eq!(
            parse_expression("1 + 2 * 3").unwrap(),
            Expression::add_expr(lit(1i64), Expression::mul_expr(lit(2i64), lit(3i64)))
        );

        // Subtraction is left associative
        assert_eq!(
            parse_expression("10 - 4 - 3").unwrap(),
            Expression::sub_expr(Expression::sub_expr(lit(10i64), lit(4i64)), lit(3i64))
        );

        // a || b && c parses as a || (b && c)
        assert_eq!(
            parse_expression("a || b and c").unwrap(),
            Expression::or(
                Expression::column("a"),
                Expression::and(Expression::column("b"), Expression::column("c"))
            )
        );

        // Comparison binds tighter than equality
        assert_eq!(
            parse_expression("a > 1 == true").unwrap(),
            Expression::eq(
                Expression::gt(Expression::column("a"), lit(1i64)),
                lit(true)
            )
        );
    }

    #[test]
    fn test_parse_conditional() {
        assert_eq!(
            parse_expression("qty > 0 ? 'in stock' : 'sold out'").unwrap(),
            Expression::conditional(
                Expression::gt(Expression::column("qty"), lit(0i64)),
                lit("in stock"),
                lit("sold out"),
            )
        );

        // Right associative
        assert_eq!(
            parse_expression("a ? 1 : b ? 2 : 3").unwrap(),
            Expression::conditional(
                Expression::column("a"),
                lit(1i64),
                Expression::conditional(Expression::column("b"), lit(2i64), lit(3i64)),
            )
        );
    }

    #[test]
    fn test_parse_unary_and_functions() {
        assert_eq!(
            parse_expression("-5").unwrap(),
            Expression::unary_op(UnaryOperator::Minus, lit(5i64))
        );
        assert_eq!(
            parse_expression("!done").unwrap(),
            Expression::not_expr(Expression::column("done"))
        );
        assert_eq!(
            parse_expression("-(a)").unwrap(),
            Expression::unary_op(UnaryOperator::Minus, Expression::column("a"))
        );
        assert_eq!(
            parse_expression("substring(name, 0, 2)").unwrap(),
            Expression::function(
                "substring",
                vec![Expression::column("name"), lit(0i64), lit(2i64)]
            )
        );
        assert_eq!(
            parse_expression("coalesce()").unwrap(),
            Expression::function("coalesce", vec![])
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            parse_expression("1 + ("),
            Err(ParseError::UnexpectedToken {
                expected: "an operand".to_string(),
                found: "end of expression".to_string(),
                offset: 5,
            })
        );
        assert_eq!(
            parse_expression("(a + b"),
            Err(ParseError::UnexpectedToken {
                expected: "')'".to_string(),
                found: "end of expression".to_string(),
                offset: 6,
            })
        );
        assert!(matches!(
            parse_expression("a b"),
            Err(ParseError::UnexpectedToken { offset: 2, .. })
        ));
        assert!(matches!(
            parse_expression("a ? b"),
            Err(ParseError::UnexpectedToken { .. })
        ));
        assert!(matches!(
            parse_expression(""),
            Err(ParseError::UnexpectedToken { offset: 0, .. })
        ));
        assert!(matches!(
            parse_expression("'open"),
            Err(ParseError::UnterminatedString { offset: 0 })
        ));
    }

    #[test]
    fn test_complexity_limits() {
        let nested = format!("{}1{}", "(".repeat(MAX_NESTING + 1), ")".repeat(MAX_NESTING + 1));
        assert!(matches!(
            parse_expression(&nested),
            Err(ParseError::TooComplex { .. })
        ));

        let negations = format!("{}x", "!".repeat(MAX_NESTING + 1));
        assert!(matches!(
            parse_expression(&negations),
            Err(ParseError::TooComplex { .. })
        ));

        let long_chain = vec!["1"; MAX_OPERATORS + 2].join(" + ");
        assert!(matches!(
            parse_expression(&long_chain),
            Err(ParseError::TooComplex { .. })
        ));

        let deepest = vec!["1"; MAX_DEPTH].join(" + ");
        assert_eq!(parse_expression(&deepest).unwrap().depth(), MAX_DEPTH);

        let too_deep = vec!["1"; MAX_DEPTH + 1].join(" + ");
        assert_eq!(
            parse_expression(&too_deep),
            Err(ParseError::TooComplex {
                limit: format!("{} levels of depth", MAX_DEPTH),
                offset: 0,
            })
        );

        // Many operators in a shallow tree stay within the depth limit
        let wide = format!("concat({})", vec!["1 + 1"; 500].join(", "));
        assert_eq!(parse_expression(&wide).unwrap().depth(), 3);
    }
}

// Syntax module - expression text to expression tree

pub mod error;
pub mod lexer;
pub mod parser;
pub mod token;

pub use error::{ParseError, ParseResult};
pub use lexer::Lexer;
pub use parser::{parse_expression, Parser, MAX_DEPTH, MAX_NESTING, MAX_OPERATORS};
pub use token::{SpannedToken, Token};

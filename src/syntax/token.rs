// Expression tokens for lexical analysis

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    Identifier(String),
    Integer(i64),
    Decimal(f64),
    String(String),

    // Keywords
    True,
    False,
    Null,
    And,
    Or,
    Not,
    Div,
    Mod,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    EqualEqual,
    BangEqual,
    Bang,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
    AmpAmp,
    PipePipe,
    Question,
    Colon,

    // Delimiters
    LeftParen,
    RightParen,
    Comma,

    // Special
    Eof,
}

impl Token {
    /// Convert a word to its keyword token, if it is one.
    ///
    /// Keywords are case-sensitive, like the rest of the language.
    pub fn keyword_from_str(s: &str) -> Option<Token> {
        match s {
            "true" => Some(Token::True),
            "false" => Some(Token::False),
            "null" => Some(Token::Null),
            "and" => Some(Token::And),
            "or" => Some(Token::Or),
            "not" => Some(Token::Not),
            "div" => Some(Token::Div),
            "mod" => Some(Token::Mod),
            "eq" => Some(Token::Eq),
            "ne" => Some(Token::Ne),
            "lt" => Some(Token::Lt),
            "le" => Some(Token::Le),
            "gt" => Some(Token::Gt),
            "ge" => Some(Token::Ge),
            _ => None,
        }
    }

    /// Human readable form used in parse diagnostics
    pub fn describe(&self) -> String {
        match self {
            Token::Identifier(name) => format!("identifier '{}'", name),
            Token::Integer(n) => format!("number {}", n),
            Token::Decimal(d) => format!("number {}", d),
            Token::String(s) => format!("string '{}'", s),
            Token::Eof => "end of expression".to_string(),
            other => format!("'{}'", other.symbol()),
        }
    }

    fn symbol(&self) -> &'static str {
        match self {
            Token::True => "true",
            Token::False => "false",
            Token::Null => "null",
            Token::And => "and",
            Token::Or => "or",
            Token::Not => "not",
            Token::Div => "div",
            Token::Mod => "mod",
            Token::Eq => "eq",
            Token::Ne => "ne",
            Token::Lt => "lt",
            Token::Le => "le",
            Token::Gt => "gt",
            Token::Ge => "ge",
            Token::Plus => "+",
            Token::Minus => "-",
            Token::Star => "*",
            Token::Slash => "/",
            Token::Percent => "%",
            Token::EqualEqual => "==",
            Token::BangEqual => "!=",
            Token::Bang => "!",
            Token::Less => "<",
            Token::Greater => ">",
            Token::LessEqual => "<=",
            Token::GreaterEqual => ">=",
            Token::AmpAmp => "&&",
            Token::PipePipe => "||",
            Token::Question => "?",
            Token::Colon => ":",
            Token::LeftParen => "(",
            Token::RightParen => ")",
            Token::Comma => ",",
            Token::Identifier(_)
            | Token::Integer(_)
            | Token::Decimal(_)
            | Token::String(_)
            | Token::Eof => "",
        }
    }
}

/// A token and the character offset it starts at
#[derive(Debug, Clone, PartialEq)]
pub struct SpannedToken {
    pub token: Token,
    pub offset: usize,
}

// Expression lexer - tokenizes expression text

use super::error::{ParseError, ParseResult};
use super::token::{SpannedToken, Token};

pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
        }
    }

    /// Get the next token from the input
    pub fn next_token(&mut self) -> ParseResult<SpannedToken> {
        self.skip_whitespace_and_comments();

        let offset = self.position;
        let Some(ch) = self.current_char() else {
            return Ok(SpannedToken {
                token: Token::Eof,
                offset,
            });
        };

        let token = match ch {
            '+' => self.single(Token::Plus),
            '-' => self.single(Token::Minus),
            '*' => self.single(Token::Star),
            '/' => self.single(Token::Slash),
            '%' => self.single(Token::Percent),
            '?' => self.single(Token::Question),
            ':' => self.single(Token::Colon),
            '(' => self.single(Token::LeftParen),
            ')' => self.single(Token::RightParen),
            ',' => self.single(Token::Comma),
            '=' => {
                self.advance();
                if self.current_char() == Some('=') {
                    self.advance();
                    Token::EqualEqual
                } else {
                    return Err(ParseError::UnexpectedCharacter { ch: '=', offset });
                }
            }
            '!' => {
                self.advance();
                if self.current_char() == Some('=') {
                    self.advance();
                    Token::BangEqual
                } else {
                    Token::Bang
                }
            }
            '<' => {
                self.advance();
                if self.current_char() == Some('=') {
                    self.advance();
                    Token::LessEqual
                } else {
                    Token::Less
                }
            }
            '>' => {
                self.advance();
                if self.current_char() == Some('=') {
                    self.advance();
                    Token::GreaterEqual
                } else {
                    Token::Greater
                }
            }
            '&' => self.double('&', Token::AmpAmp, offset)?,
            '|' => self.double('|', Token::PipePipe, offset)?,
            '\'' | '"' => self.read_string(ch, offset)?,
            '`' => self.read_quoted_identifier(offset)?,
            c if c.is_ascii_digit() => self.read_number(offset)?,
            c if is_identifier_start(c) => self.read_identifier(),
            c => return Err(ParseError::UnexpectedCharacter { ch: c, offset }),
        };

        Ok(SpannedToken { token, offset })
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek at the next character without advancing
    fn peek(&self) -> Option<char> {
        self.input.get(self.position + 1).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn single(&mut self, token: Token) -> Token {
        self.advance();
        token
    }

    /// Two-character operator such as `&&`; a lone first character is an error
    fn double(&mut self, second: char, token: Token, offset: usize) -> ParseResult<Token> {
        let first = self.current_char().unwrap_or(second);
        self.advance();
        if self.current_char() == Some(second) {
            self.advance();
            Ok(token)
        } else {
            Err(ParseError::UnexpectedCharacter { ch: first, offset })
        }
    }

    /// Skip whitespace and `//` line comments
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            while matches!(self.current_char(), Some(ch) if ch.is_whitespace()) {
                self.advance();
            }
            if self.current_char() == Some('/') && self.peek() == Some('/') {
                while let Some(ch) = self.current_char() {
                    self.advance();
                    if ch == '\n' {
                        break;
                    }
                }
            } else {
                break;
            }
        }
    }

    /// Read an identifier or keyword
    fn read_identifier(&mut self) -> Token {
        let mut identifier = String::new();

        while let Some(ch) = self.current_char() {
            if is_identifier_part(ch) {
                identifier.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        Token::keyword_from_str(&identifier).unwrap_or_else(|| Token::Identifier(identifier))
    }

    /// Read a backtick-quoted identifier (e.g., `unit price`)
    fn read_quoted_identifier(&mut self, offset: usize) -> ParseResult<Token> {
        self.advance(); // Skip opening backtick
        let mut identifier = String::new();

        while let Some(ch) = self.current_char() {
            self.advance();
            if ch == '`' {
                return Ok(Token::Identifier(identifier));
            }
            identifier.push(ch);
        }

        Err(ParseError::UnterminatedIdentifier { offset })
    }

    /// Read a string literal delimited by `quote`
    fn read_string(&mut self, quote: char, offset: usize) -> ParseResult<Token> {
        self.advance(); // Skip opening quote
        let mut string = String::new();

        while let Some(ch) = self.current_char() {
            self.advance();
            match ch {
                c if c == quote => return Ok(Token::String(string)),
                '\\' => {
                    let Some(escaped) = self.current_char() else {
                        break;
                    };
                    self.advance();
                    string.push(match escaped {
                        'n' => '\n',
                        't' => '\t',
                        'r' => '\r',
                        other => other,
                    });
                }
                c => string.push(c),
            }
        }

        Err(ParseError::UnterminatedString { offset })
    }

    /// Read a number (integer or decimal, optional exponent)
    fn read_number(&mut self, offset: usize) -> ParseResult<Token> {
        let mut number = String::new();
        let mut is_decimal = false;

        self.read_digits(&mut number);

        if self.current_char() == Some('.') && matches!(self.peek(), Some(c) if c.is_ascii_digit())
        {
            is_decimal = true;
            number.push('.');
            self.advance();
            self.read_digits(&mut number);
        }

        if matches!(self.current_char(), Some('e' | 'E')) {
            is_decimal = true;
            number.push('e');
            self.advance();
            if let Some(sign @ ('+' | '-')) = self.current_char() {
                number.push(sign);
                self.advance();
            }
            self.read_digits(&mut number);
        }

        // Reject things like `12abc`
        if matches!(self.current_char(), Some(c) if is_identifier_part(c)) {
            while matches!(self.current_char(), Some(c) if is_identifier_part(c)) {
                number.extend(self.current_char());
                self.advance();
            }
            return Err(ParseError::InvalidNumber {
                text: number,
                offset,
            });
        }

        let token = if is_decimal {
            number.parse::<f64>().ok().map(Token::Decimal)
        } else {
            number.parse::<i64>().ok().map(Token::Integer)
        };
        token.ok_or(ParseError::InvalidNumber {
            text: number,
            offset,
        })
    }

    fn read_digits(&mut self, into: &mut String) {
        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                into.push(ch);
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Tokenize the entire input, ending with `Eof`
    pub fn tokenize(&mut self) -> ParseResult<Vec<SpannedToken>> {
        let mut tokens = Vec::new();

        loop {
            let spanned = self.next_token()?;
            let done = spanned.token == Token::Eof;
            tokens.push(spanned);
            if done {
                break;
            }
        }

        Ok(tokens)
    }
}

fn is_identifier_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_' || ch == '$'
}

fn is_identifier_part(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '$'
}

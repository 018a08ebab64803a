use log::{debug, trace};
use thiserror::Error;
use tokens::{Token, TokenType, Value};

pub mod tokens;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScanError {
    /// `line` is where the scan stood when input ran out, not where the string opened
    #[error("Unterminated string.")]
    UnterminatedString { line: usize },
    #[error("Unexpected character")]
    UnexpectedCharacter { line: usize, character: char },
}

impl ScanError {
    pub fn line(&self) -> usize {
        match self {
            ScanError::UnterminatedString { line } => *line,
            ScanError::UnexpectedCharacter { line, .. } => *line,
        }
    }
}

/// Sink for lexical errors. The scanner never stops on an error, it hands each one over here
/// and carries on, so the reporter decides what a failed scan means for the run.
pub trait ErrorReporter {
    fn error(&mut self, line: usize, message: &str);
}

fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn is_alpha(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_alphanumeric(c: char) -> bool {
    is_alpha(c) || is_digit(c)
}

/// Scan `source` into tokens, always ending with a single `Eof` token. Lexical errors go to
/// `reporter` and the offending lexeme is dropped.
pub fn scan(source: &str, reporter: &mut dyn ErrorReporter) -> Vec<Token> {
    Scanner::new(source, reporter).scan_tokens()
}

pub struct Scanner<'r> {
    source: Vec<char>,
    tokens: Vec<Token>,
    reporter: &'r mut dyn ErrorReporter,
    // first character in current lexeme
    start: usize,
    // next unread character
    current: usize,
    // current line, 1-based
    line: usize,
    errors: usize,
}

impl<'r> Scanner<'r> {
    pub fn new(source: &str, reporter: &'r mut dyn ErrorReporter) -> Self {
        Scanner {
            source: source.chars().collect(),
            tokens: vec![],
            reporter,
            start: 0,
            current: 0,
            line: 1,
            errors: 0,
        }
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn advance(&mut self) -> char {
        let c = self.source[self.current];
        self.current += 1;
        c
    }

    fn peek(&self) -> char {
        self.source.get(self.current).copied().unwrap_or('\0')
    }

    fn peek_next(&self) -> char {
        self.source.get(self.current + 1).copied().unwrap_or('\0')
    }

    /// consume the next character only if it is `target`
    fn match_next(&mut self, target: char) -> bool {
        if self.is_at_end() || self.source[self.current] != target {
            return false;
        }
        self.current += 1;
        true
    }

    // converts current lexeme from slice of chars to String
    fn current_to_string(&self) -> String {
        String::from_iter(&self.source[self.start..self.current])
    }

    fn add_token(&mut self, token_type: TokenType, literal: Option<Value>) {
        let token = Token::new(token_type, self.current_to_string(), literal, self.line);
        trace!("scanned {token}");
        self.tokens.push(token);
    }

    fn report(&mut self, error: ScanError) {
        self.errors += 1;
        self.reporter.error(error.line(), &error.to_string());
    }

    fn scan_token(&mut self) -> Result<(), ScanError> {
        let c = self.advance();
        match c {
            // single-character tokens
            '(' => self.add_token(TokenType::LeftParen, None),
            ')' => self.add_token(TokenType::RightParen, None),
            '{' => self.add_token(TokenType::LeftBrace, None),
            '}' => self.add_token(TokenType::RightBrace, None),
            ',' => self.add_token(TokenType::Comma, None),
            '.' => self.add_token(TokenType::Dot, None),
            '-' => self.add_token(TokenType::Minus, None),
            '+' => self.add_token(TokenType::Plus, None),
            ';' => self.add_token(TokenType::Semicolon, None),
            '*' => self.add_token(TokenType::Star, None),

            // one-or-two character tokens
            '!' => {
                let token_type = if self.match_next('=') {
                    TokenType::BangEqual
                } else {
                    TokenType::Bang
                };
                self.add_token(token_type, None)
            }
            '=' => {
                let token_type = if self.match_next('=') {
                    TokenType::EqualEqual
                } else {
                    TokenType::Equal
                };
                self.add_token(token_type, None)
            }
            '>' => {
                let token_type = if self.match_next('=') {
                    TokenType::GreaterEqual
                } else {
                    TokenType::Greater
                };
                self.add_token(token_type, None)
            }
            '<' => {
                let token_type = if self.match_next('=') {
                    TokenType::LessEqual
                } else {
                    TokenType::Less
                };
                self.add_token(token_type, None)
            }

            '/' => {
                // double slash means comment, which runs to the end of the line
                if self.match_next('/') {
                    while self.peek() != '\n' && !self.is_at_end() {
                        self.advance();
                    }
                } else {
                    self.add_token(TokenType::Slash, None)
                }
            }

            '"' => self.string()?,

            // increment line number on new-line
            '\n' => self.line += 1,
            // ignore irrelevant chars
            '\r' | ' ' | '\t' => {}

            c if is_digit(c) => self.number(),
            c if is_alpha(c) => self.identifier(),

            // any other character is invalid
            character => {
                return Err(ScanError::UnexpectedCharacter {
                    line: self.line,
                    character,
                })
            }
        }
        Ok(())
    }

    fn string(&mut self) -> Result<(), ScanError> {
        while self.peek() != '"' && !self.is_at_end() {
            if self.peek() == '\n' {
                self.line += 1;
            }
            self.advance();
        }

        if self.is_at_end() {
            return Err(ScanError::UnterminatedString { line: self.line });
        }
        // account for closing quote mark
        self.advance();
        let val = String::from_iter(&self.source[self.start + 1..self.current - 1]);
        self.add_token(TokenType::String, Some(Value::String(val)));
        Ok(())
    }

    fn number(&mut self) {
        while is_digit(self.peek()) {
            self.advance();
        }

        // a trailing '.' without a digit after it is left for the next token
        if self.peek() == '.' && is_digit(self.peek_next()) {
            self.advance();
            while is_digit(self.peek()) {
                self.advance();
            }
        }

        let val = self
            .current_to_string()
            .parse::<f64>()
            .expect("digit runs with an optional fraction always parse as f64");
        self.add_token(TokenType::Number, Some(Value::Number(val)))
    }

    fn identifier(&mut self) {
        while is_alphanumeric(self.peek()) {
            self.advance();
        }

        let token_type =
            TokenType::keyword(&self.current_to_string()).unwrap_or(TokenType::Identifier);
        self.add_token(token_type, None)
    }

    pub fn scan_tokens(mut self) -> Vec<Token> {
        // iterate through source until we've scanned all tokens
        while !self.is_at_end() {
            self.start = self.current;
            // report and carry on so we catch as many errors as possible in 1 pass
            if let Err(e) = self.scan_token() {
                self.report(e);
            }
        }

        debug!(
            "scanned {} tokens over {} lines with {} errors",
            self.tokens.len(),
            self.line,
            self.errors
        );
        self.tokens
            .push(Token::new(TokenType::Eof, String::new(), None, self.line));
        self.tokens
    }
}

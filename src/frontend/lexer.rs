use std::{collections::BTreeMap, str::Chars};

use colored::Colorize;
use itertools::{PeekNth, peek_nth};
use once_cell::sync::Lazy;
use strum::{Display, EnumString};
use thiserror::Error;

#[derive(Debug)]
pub struct Lexer<'source> {
    chars: PeekNth<Chars<'source>>,
    line: usize,
    column: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /* Words */
    Keyword(Keyword), // CIRCUIT
    Identifier,       // Sum

    /* Constants */
    Literal, // 0 or 1

    /* Delimiters */
    OpenBrace,  // {
    CloseBrace, // }
    OpenParen,  // (
    CloseParen, // )
    Semicolon,  // ;
    Comma,      // ,
    Equals,     // =
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Keyword {
    Circuit,
    Input,
    Output,
    Wire,
    And,
    Or,
    Xor,
    Nand,
    Nor,
    Not,
}

impl Keyword {
    pub fn is_gate_operator(self) -> bool {
        matches!(
            self,
            Self::And | Self::Or | Self::Xor | Self::Nand | Self::Nor | Self::Not
        )
    }
}

/// Table of single char tokens
static SINGLE_TOKENS: Lazy<BTreeMap<char, TokenKind>> = Lazy::new(|| {
    BTreeMap::from([
        ('{', TokenKind::OpenBrace),
        ('}', TokenKind::CloseBrace),
        ('(', TokenKind::OpenParen),
        (')', TokenKind::CloseParen),
        (';', TokenKind::Semicolon),
        (',', TokenKind::Comma),
        ('=', TokenKind::Equals),
    ])
});

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unexpected `{text}` at line {line}, column {column}")]
pub struct LexicalError {
    pub line: usize,
    pub column: usize,
    /// First character of the offending text
    pub character: char,
    /// A stray character, or a whole digit run that is not `0` or `1`
    pub text: String,
}

impl<'source> Lexer<'source> {
    pub fn new(source: &'source str) -> Self {
        Self {
            chars: peek_nth(source.chars()),
            line: 1,
            column: 1,
        }
    }

    /// Scans the whole source, stopping at the first character that does not
    /// start any token.
    pub fn tokenize(source: &str) -> Result<Vec<Token>, LexicalError> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();

        while let Some(token) = lexer.next_token()? {
            tokens.push(token);
        }

        Ok(tokens)
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.chars.next()?;

        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(c)
    }

    fn ignore_whitespace(&mut self) {
        while let Some(c) = self.chars.peek().copied() {
            if !c.is_ascii_whitespace() {
                break;
            }

            self.advance();
        }
    }

    fn ignore_line(&mut self) {
        while let Some(c) = self.chars.peek().copied() {
            if c == '\n' {
                break;
            }

            self.advance();
        }
    }

    // Keyword or identifier
    fn read_word(&mut self) -> Token {
        let (line, column) = (self.line, self.column);
        let mut text = String::new();

        while let Some(c) = self.chars.peek().copied() {
            if !(c.is_ascii_alphanumeric() || c == '_') {
                break;
            }

            text.push(c);
            self.advance();
        }

        let kind = match text.parse() {
            Ok(keyword) => TokenKind::Keyword(keyword),
            Err(_) => TokenKind::Identifier,
        };

        Token {
            kind,
            text,
            line,
            column,
        }
    }

    /// Constant operands are exactly `0` or `1`. Any other digit run is
    /// rejected as a whole.
    fn read_literal(&mut self) -> Result<Token, LexicalError> {
        let (line, column) = (self.line, self.column);
        let mut text = String::new();

        while let Some(c) = self.chars.peek().copied() {
            if !c.is_ascii_digit() {
                break;
            }

            text.push(c);
            self.advance();
        }

        if text != "0" && text != "1" {
            return Err(LexicalError {
                line,
                column,
                character: text.chars().next().unwrap_or_default(),
                text,
            });
        }

        Ok(Token {
            kind: TokenKind::Literal,
            text,
            line,
            column,
        })
    }

    fn read_single(&mut self, kind: TokenKind) -> Token {
        let (line, column) = (self.line, self.column);
        let c = self.advance().unwrap_or_default();

        Token {
            kind,
            text: c.to_string(),
            line,
            column,
        }
    }

    pub fn next_token(&mut self) -> Result<Option<Token>, LexicalError> {
        while let Some(c) = self.chars.peek().copied() {
            let token = match c {
                // Ignore whitespace
                c if c.is_ascii_whitespace() => {
                    self.ignore_whitespace();
                    continue;
                }
                // Ignore comments
                '/' if self.chars.peek_nth(1).is_some_and(|c| *c == '/') => {
                    self.ignore_line();
                    continue;
                }

                // Constant operands
                d if d.is_ascii_digit() => self.read_literal()?,

                // Keywords are matched against the whole word before falling
                // back to an identifier
                a if a.is_ascii_alphabetic() || a == '_' => self.read_word(),

                s if SINGLE_TOKENS.contains_key(&s) => self.read_single(SINGLE_TOKENS[&s]),

                character => {
                    return Err(LexicalError {
                        line: self.line,
                        column: self.column,
                        character,
                        text: character.to_string(),
                    });
                }
            };

            return Ok(Some(token));
        }

        Ok(None)
    }
}

impl core::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Keyword(keyword) => write!(f, "keyword `{keyword}`"),
            TokenKind::Identifier => f.write_str("identifier"),
            TokenKind::Literal => f.write_str("literal"),
            TokenKind::OpenBrace => f.write_str("`{`"),
            TokenKind::CloseBrace => f.write_str("`}`"),
            TokenKind::OpenParen => f.write_str("`(`"),
            TokenKind::CloseParen => f.write_str("`)`"),
            TokenKind::Semicolon => f.write_str("`;`"),
            TokenKind::Comma => f.write_str("`,`"),
            TokenKind::Equals => f.write_str("`=`"),
        }
    }
}

impl core::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.kind {
            TokenKind::Keyword(_) => "Keyword".magenta(),
            TokenKind::Identifier => "Identifier".blue(),
            TokenKind::Literal => "Literal".purple(),
            _ => "Punctuation".white(),
        };

        write!(
            f,
            "{:>4}:{:<4} {:<12} {}",
            self.line,
            self.column,
            kind,
            self.text.yellow()
        )
    }
}

use thiserror::Error;

use crate::frontend::{
    ast::{Category, Declaration, GateDef, GateOperator, Operand, Program},
    lexer::{Keyword, Token, TokenKind},
};

/// Recursive descent parser with a single token of lookahead.
///
/// The parser is purely structural: operator arity, duplicate names and
/// undeclared signals are left to semantic analysis.
#[derive(Debug)]
pub struct Parser<'tokens> {
    tokens: &'tokens [Token],
    index: usize,
}

/// What the parser was looking for when it gave up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    Token(TokenKind),
    GateOperator,
    Operand,
    GateOrEnd,
    EndOfInput,
}

impl core::fmt::Display for Expected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expected::Token(kind) => write!(f, "{kind}"),
            Expected::GateOperator => f.write_str("gate operator"),
            Expected::Operand => f.write_str("identifier or literal"),
            Expected::GateOrEnd => f.write_str("gate definition or `}`"),
            Expected::EndOfInput => f.write_str("end of input"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected {expected} but found {found} `{text}` at line {line}, column {column}")]
    Unexpected {
        expected: Expected,
        found: TokenKind,
        text: String,
        line: usize,
        column: usize,
    },
    #[error("expected {expected} but reached end of input")]
    UnexpectedEof { expected: Expected },
    #[error(
        "nested gate calls are not supported: found `{operator}` where an operand was expected \
         at line {line}, column {column}; use an intermediate WIRE instead"
    )]
    NestedGate {
        operator: Keyword,
        line: usize,
        column: usize,
    },
}

impl ParseError {
    /// Line of the offending token, if there was one
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::Unexpected { line, .. } | ParseError::NestedGate { line, .. } => {
                Some(*line)
            }
            ParseError::UnexpectedEof { .. } => None,
        }
    }

    pub fn column(&self) -> Option<usize> {
        match self {
            ParseError::Unexpected { column, .. } | ParseError::NestedGate { column, .. } => {
                Some(*column)
            }
            ParseError::UnexpectedEof { .. } => None,
        }
    }

    fn unexpected(expected: Expected, token: &Token) -> Self {
        ParseError::Unexpected {
            expected,
            found: token.kind,
            text: token.text.clone(),
            line: token.line,
            column: token.column,
        }
    }
}

impl<'tokens> Parser<'tokens> {
    pub fn parse_program(tokens: &'tokens [Token]) -> Result<Program, ParseError> {
        let mut parser = Self { tokens, index: 0 };

        let program = parser.parse_circuit()?;

        if let Some(token) = parser.peek() {
            return Err(ParseError::unexpected(Expected::EndOfInput, token));
        }

        Ok(program)
    }

    fn peek(&self) -> Option<&'tokens Token> {
        self.tokens.get(self.index)
    }

    fn expect_peek(&self, expected: Expected) -> Result<&'tokens Token, ParseError> {
        self.peek()
            .ok_or(ParseError::UnexpectedEof { expected })
    }

    fn expect_next(&mut self, expected: Expected) -> Result<&'tokens Token, ParseError> {
        let token = self.expect_peek(expected)?;
        self.index += 1;

        Ok(token)
    }

    fn expect_next_to_be(&mut self, kind: TokenKind) -> Result<&'tokens Token, ParseError> {
        let expected = Expected::Token(kind);
        let token = self.expect_peek(expected)?;

        if token.kind != kind {
            return Err(ParseError::unexpected(expected, token));
        }

        self.index += 1;
        Ok(token)
    }

    fn expect_identifier(&mut self) -> Result<String, ParseError> {
        self.expect_next_to_be(TokenKind::Identifier)
            .map(|token| token.text.clone())
    }

    /// 'CIRCUIT' Identifier '{' Declaration* GateDef* '}'
    fn parse_circuit(&mut self) -> Result<Program, ParseError> {
        self.expect_next_to_be(TokenKind::Keyword(Keyword::Circuit))?;
        let name = self.expect_identifier()?;
        self.expect_next_to_be(TokenKind::OpenBrace)?;

        let mut declarations = Vec::new();

        while let Some(category) = self.peek_declaration() {
            self.index += 1;
            declarations.push(self.parse_declaration(category)?);
        }

        // Once the first non-declaration token is seen only gate definitions
        // may follow
        let mut gates = Vec::new();

        loop {
            let token = self.expect_peek(Expected::GateOrEnd)?;

            match token.kind {
                TokenKind::Identifier => gates.push(self.parse_gate()?),
                TokenKind::CloseBrace => {
                    self.index += 1;
                    break;
                }
                _ => return Err(ParseError::unexpected(Expected::GateOrEnd, token)),
            }
        }

        Ok(Program {
            name,
            declarations,
            gates,
        })
    }

    fn peek_declaration(&self) -> Option<Category> {
        match self.peek()?.kind {
            TokenKind::Keyword(keyword) => Category::from_keyword(keyword),
            _ => None,
        }
    }

    /// ('INPUT'|'OUTPUT'|'WIRE') IdentList ';'
    ///
    /// The category keyword has already been consumed.
    fn parse_declaration(&mut self, category: Category) -> Result<Declaration, ParseError> {
        let mut identifiers = vec![self.expect_identifier()?];

        while self.peek().is_some_and(|t| t.kind == TokenKind::Comma) {
            self.index += 1;
            identifiers.push(self.expect_identifier()?);
        }

        self.expect_next_to_be(TokenKind::Semicolon)?;

        Ok(Declaration {
            category,
            identifiers,
        })
    }

    /// Identifier '=' GateOp '(' OperandList ')' ';'
    fn parse_gate(&mut self) -> Result<GateDef, ParseError> {
        let output = self.expect_next_to_be(TokenKind::Identifier)?;
        self.expect_next_to_be(TokenKind::Equals)?;
        let operator = self.parse_gate_operator()?;
        self.expect_next_to_be(TokenKind::OpenParen)?;

        let mut inputs = vec![self.parse_operand()?];

        while self.peek().is_some_and(|t| t.kind == TokenKind::Comma) {
            self.index += 1;
            inputs.push(self.parse_operand()?);
        }

        self.expect_next_to_be(TokenKind::CloseParen)?;
        self.expect_next_to_be(TokenKind::Semicolon)?;

        Ok(GateDef {
            output: output.text.clone(),
            operator,
            inputs,
            line: output.line,
        })
    }

    fn parse_gate_operator(&mut self) -> Result<GateOperator, ParseError> {
        let token = self.expect_next(Expected::GateOperator)?;

        let operator = match token.kind {
            TokenKind::Keyword(keyword) => GateOperator::from_keyword(keyword),
            _ => None,
        };

        operator.ok_or_else(|| ParseError::unexpected(Expected::GateOperator, token))
    }

    fn parse_operand(&mut self) -> Result<Operand, ParseError> {
        let token = self.expect_next(Expected::Operand)?;

        match token.kind {
            TokenKind::Identifier => Ok(Operand::Signal(token.text.clone())),
            TokenKind::Literal => Ok(Operand::Literal(token.text == "1")),
            TokenKind::Keyword(keyword) if keyword.is_gate_operator() => {
                Err(ParseError::NestedGate {
                    operator: keyword,
                    line: token.line,
                    column: token.column,
                })
            }
            _ => Err(ParseError::unexpected(Expected::Operand, token)),
        }
    }
}

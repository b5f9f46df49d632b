use colored::Colorize;
use itertools::Itertools;
use strum::Display;

use crate::frontend::lexer::Keyword;

/// A single circuit definition. Every compilation unit holds exactly one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    pub name: String,
    /// Declarations always precede gate definitions in the source
    pub declarations: Vec<Declaration>,
    pub gates: Vec<GateDef>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub category: Category,
    /// Never empty, in source order
    pub identifiers: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Category {
    Input,
    Output,
    Wire,
}

impl Category {
    pub fn from_keyword(keyword: Keyword) -> Option<Self> {
        match keyword {
            Keyword::Input => Some(Self::Input),
            Keyword::Output => Some(Self::Output),
            Keyword::Wire => Some(Self::Wire),
            _ => None,
        }
    }
}

/// `output = OPERATOR(inputs...);`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateDef {
    pub output: String,
    pub operator: GateOperator,
    pub inputs: Vec<Operand>,
    /// Line of the output identifier
    pub line: usize,
}

impl GateDef {
    /// Names of the signals this gate reads, skipping constant operands
    pub fn input_signals(&self) -> impl Iterator<Item = &str> {
        self.inputs.iter().filter_map(Operand::as_signal)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum GateOperator {
    And,
    Or,
    Xor,
    Nand,
    Nor,
    Not,
}

impl GateOperator {
    pub fn from_keyword(keyword: Keyword) -> Option<Self> {
        match keyword {
            Keyword::And => Some(Self::And),
            Keyword::Or => Some(Self::Or),
            Keyword::Xor => Some(Self::Xor),
            Keyword::Nand => Some(Self::Nand),
            Keyword::Nor => Some(Self::Nor),
            Keyword::Not => Some(Self::Not),
            _ => None,
        }
    }

    /// Number of operands the operator requires
    pub fn arity(self) -> usize {
        match self {
            Self::Not => 1,
            Self::And | Self::Or | Self::Xor | Self::Nand | Self::Nor => 2,
        }
    }
}

/// A gate operand: either a named signal or one of the constants `0`/`1`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operand {
    Signal(String),
    Literal(bool),
}

impl Operand {
    pub fn as_signal(&self) -> Option<&str> {
        match self {
            Operand::Signal(name) => Some(name),
            Operand::Literal(_) => None,
        }
    }

    pub fn is_literal(&self, value: bool) -> bool {
        matches!(self, Operand::Literal(v) if *v == value)
    }
}

impl core::fmt::Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operand::Signal(name) => f.write_str(name),
            Operand::Literal(value) => write!(f, "{}", u8::from(*value)),
        }
    }
}

impl core::fmt::Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} {}", "CIRCUIT".magenta(), self.name.blue())?;

        for declaration in &self.declarations {
            writeln!(
                f,
                "    {} {}",
                declaration.category.to_string().magenta(),
                declaration.identifiers.iter().join(", ")
            )?;
        }

        for gate in &self.gates {
            writeln!(
                f,
                "    {} {} {}({})",
                gate.output,
                "=".white(),
                gate.operator.to_string().cyan(),
                gate.inputs.iter().join(", ")
            )?;
        }

        Ok(())
    }
}

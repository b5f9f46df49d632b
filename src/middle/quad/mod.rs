//! Quads are the flat intermediate form of a circuit: one four-address
//! instruction (operator, up to two operands, result) per gate. There are no
//! temporaries and no control flow, since every gate in the source is already
//! a single operator application.

use strum::Display;

use crate::frontend::ast::{GateOperator, Operand};

pub mod ast_lowering;
pub mod pretty_print;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Quad {
    pub operator: QuadOperator,
    pub arg1: Option<Operand>,
    /// Absent for `NOT` and `ASSIGN`
    pub arg2: Option<Operand>,
    pub result: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum QuadOperator {
    And,
    Or,
    Xor,
    Nand,
    Nor,
    Not,
    Assign,
}

impl From<GateOperator> for QuadOperator {
    fn from(operator: GateOperator) -> Self {
        match operator {
            GateOperator::And => Self::And,
            GateOperator::Or => Self::Or,
            GateOperator::Xor => Self::Xor,
            GateOperator::Nand => Self::Nand,
            GateOperator::Nor => Self::Nor,
            GateOperator::Not => Self::Not,
        }
    }
}

impl Quad {
    pub fn binary(
        operator: QuadOperator,
        lhs: Operand,
        rhs: Operand,
        result: impl Into<String>,
    ) -> Self {
        Self {
            operator,
            arg1: Some(lhs),
            arg2: Some(rhs),
            result: result.into(),
        }
    }

    pub fn not(operand: Operand, result: impl Into<String>) -> Self {
        Self {
            operator: QuadOperator::Not,
            arg1: Some(operand),
            arg2: None,
            result: result.into(),
        }
    }

    pub fn assign(source: Operand, result: impl Into<String>) -> Self {
        Self {
            operator: QuadOperator::Assign,
            arg1: Some(source),
            arg2: None,
            result: result.into(),
        }
    }
}

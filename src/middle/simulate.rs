//! A reference evaluator for quads. It computes the same truth table the
//! generated simulation prints, without leaving the process.

use hashbrown::HashMap;
use itertools::Itertools;

use crate::{
    frontend::ast::Operand,
    middle::{
        quad::{Quad, QuadOperator},
        symbol_table::SymbolTable,
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruthTable {
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
    /// One row per input vector, in increasing binary order
    pub rows: Vec<TruthTableRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruthTableRow {
    pub inputs: Vec<bool>,
    pub outputs: Vec<bool>,
}

impl TruthTable {
    /// The row for a given input vector, first input first
    pub fn row(&self, inputs: &[bool]) -> Option<&TruthTableRow> {
        self.rows.iter().find(|row| row.inputs == inputs)
    }
}

/// Expands `vector` into `width` bits, most significant bit first
pub fn input_vector(vector: u64, width: usize) -> Vec<bool> {
    (0..width)
        .map(|bit| (vector >> (width - 1 - bit)) & 1 == 1)
        .collect()
}

/// Evaluates the quads once for every combination of the circuit's inputs.
///
/// Inputs and outputs are taken in symbol table order. A signal read before
/// any quad has written it evaluates to `0`.
pub fn truth_table(quads: &[Quad], symbol_table: &SymbolTable) -> TruthTable {
    let inputs = symbol_table.inputs();
    let outputs = symbol_table.outputs();

    let rows = (0..1u64 << inputs.len())
        .map(|vector| {
            let bits = input_vector(vector, inputs.len());

            let mut values: HashMap<&str, bool> =
                inputs.iter().copied().zip(bits.iter().copied()).collect();

            for quad in quads {
                let value = evaluate(quad, &values);
                values.insert(quad.result.as_str(), value);
            }

            TruthTableRow {
                inputs: bits,
                outputs: outputs
                    .iter()
                    .map(|name| values.get(name).copied().unwrap_or_default())
                    .collect(),
            }
        })
        .collect();

    TruthTable {
        inputs: inputs.into_iter().map(str::to_owned).collect(),
        outputs: outputs.into_iter().map(str::to_owned).collect(),
        rows,
    }
}

fn evaluate(quad: &Quad, values: &HashMap<&str, bool>) -> bool {
    let read = |operand: &Option<Operand>| match operand {
        Some(Operand::Signal(name)) => values.get(name.as_str()).copied().unwrap_or_default(),
        Some(Operand::Literal(value)) => *value,
        None => false,
    };

    let (a, b) = (read(&quad.arg1), read(&quad.arg2));

    match quad.operator {
        QuadOperator::And => a & b,
        QuadOperator::Or => a | b,
        QuadOperator::Xor => a ^ b,
        QuadOperator::Nand => !(a & b),
        QuadOperator::Nor => !(a | b),
        QuadOperator::Not => !a,
        QuadOperator::Assign => a,
    }
}

fn bits(values: &[bool]) -> String {
    values.iter().map(|&bit| u8::from(bit)).join(" | ")
}

impl core::fmt::Display for TruthTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{} || {}",
            self.inputs.join(" | "),
            self.outputs.join(" | ")
        )?;
        writeln!(f, "{}", "-".repeat(40))?;

        for row in &self.rows {
            writeln!(f, "{} || {}", bits(&row.inputs), bits(&row.outputs))?;
        }

        Ok(())
    }
}

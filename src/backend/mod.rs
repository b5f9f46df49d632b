//! The backend turns optimized quads into the source text of a standalone
//! simulation: a procedure computing every output from the inputs, followed
//! by a driver that prints the full truth table. The text is only emitted,
//! never executed here.

use tracing::debug;

use crate::{
    frontend::ast::{Category, Operand},
    middle::{quad::Quad, symbol_table::SymbolTable},
};

pub mod targets;

pub use targets::{CodeGenerator, Target};

/// Everything a code generator needs to know about one circuit.
///
/// Names are kept as written in the source. Generators pass them through
/// [`signal_name`] before emitting them as identifiers.
#[derive(Debug)]
pub struct Simulation<'a> {
    pub circuit_name: &'a str,
    /// Procedure parameters, in symbol table order
    pub inputs: Vec<&'a str>,
    /// Procedure results, in symbol table order
    pub outputs: Vec<&'a str>,
    /// Every other signal, in symbol table order. Like the outputs these
    /// start out as `0`, so reading one before (or without) a gate driving
    /// it is well defined.
    pub locals: Vec<&'a str>,
    pub quads: &'a [Quad],
}

impl<'a> Simulation<'a> {
    pub fn new(quads: &'a [Quad], symbol_table: &'a SymbolTable, circuit_name: &'a str) -> Self {
        let mut locals: Vec<&str> = symbol_table
            .iter()
            .filter(|(_, info)| info.category == Category::Wire)
            .map(|(name, _)| name)
            .collect();

        for quad in quads {
            if !symbol_table.contains(&quad.result) && !locals.contains(&quad.result.as_str()) {
                locals.push(&quad.result);
            }
        }

        Self {
            circuit_name,
            inputs: symbol_table.inputs(),
            outputs: symbol_table.outputs(),
            locals,
            quads,
        }
    }
}

/// The identifier a signal gets in generated code. The prefix keeps signal
/// names apart from target keywords and from the driver's own variables,
/// none of which start with `s_`.
pub(crate) fn signal_name(name: &str) -> String {
    format!("s_{name}")
}

/// Renders an operand that should always be present after semantic analysis
pub(crate) fn operand_text(operand: &Option<Operand>) -> String {
    match operand {
        Some(Operand::Signal(name)) => signal_name(name),
        Some(literal) => literal.to_string(),
        None => "0".to_owned(),
    }
}

/// The quad in plain quadruple notation, for comments in generated code
pub(crate) fn quad_comment(quad: &Quad) -> String {
    strip_ansi_escapes::strip_str(quad.to_string())
}

pub fn generate(
    quads: &[Quad],
    symbol_table: &SymbolTable,
    circuit_name: &str,
    target: Target,
) -> String {
    let simulation = Simulation::new(quads, symbol_table, circuit_name);
    let code = target.get_code_generator().generate(&simulation);

    debug!(%target, bytes = code.len(), "generated simulation for {circuit_name}");

    code
}

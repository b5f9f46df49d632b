use tracing::debug;

use crate::{
    frontend::ast::{GateDef, GateOperator, Program},
    middle::quad::Quad,
};

/// Lowers a validated program to quads: one per gate, in source order.
///
/// Operand counts are assumed to have been checked by semantic analysis.
pub fn lower_program(program: &Program) -> Vec<Quad> {
    let quads = program.gates.iter().map(lower_gate).collect::<Vec<_>>();

    debug!(quads = quads.len(), "lowered {} to quads", program.name);

    quads
}

fn lower_gate(gate: &GateDef) -> Quad {
    let mut inputs = gate.inputs.iter().cloned();
    let arg1 = inputs.next();
    let arg2 = match gate.operator {
        GateOperator::Not => None,
        _ => inputs.next(),
    };

    Quad {
        operator: gate.operator.into(),
        arg1,
        arg2,
        result: gate.output.clone(),
    }
}

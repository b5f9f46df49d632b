use tracing::debug;

use crate::{
    frontend::ast::{Category, Operand},
    middle::{
        quad::{Quad, QuadOperator},
        symbol_table::SymbolTable,
    },
};

/// Single pass peephole optimization over the quads of a circuit.
///
/// Each quad is looked at on its own, with these rules in priority order:
///
/// 1. `AND(0, x)` becomes `ASSIGN 0`
/// 2. `OR(1, x)` becomes `ASSIGN 1`
/// 3. `OR(x, 0)` becomes `ASSIGN x`
/// 4. Otherwise, a quad whose result is not an `OUTPUT` and is read by no
///    gate is dropped.
///
/// There is no iteration to a fixed point, so simplifications never chain
/// across quads. Quads that are already plain assignments are left alone,
/// which makes running the pass on its own output a no-op.
pub fn optimize(quads: &[Quad], symbol_table: &SymbolTable) -> Vec<Quad> {
    let optimized = quads
        .iter()
        .filter_map(|quad| match simplify(quad) {
            Some(rewritten) => Some(rewritten),
            None if is_dead(quad, symbol_table) => None,
            None => Some(quad.clone()),
        })
        .collect::<Vec<_>>();

    debug!(
        before = quads.len(),
        after = optimized.len(),
        "optimization finished"
    );

    optimized
}

fn simplify(quad: &Quad) -> Option<Quad> {
    let is_literal = |operand: &Option<Operand>, value| {
        operand.as_ref().is_some_and(|operand| operand.is_literal(value))
    };

    match quad.operator {
        QuadOperator::And if is_literal(&quad.arg1, false) => {
            Some(Quad::assign(Operand::Literal(false), quad.result.clone()))
        }
        QuadOperator::Or if is_literal(&quad.arg1, true) => {
            Some(Quad::assign(Operand::Literal(true), quad.result.clone()))
        }
        QuadOperator::Or if is_literal(&quad.arg2, false) => Some(Quad::assign(
            quad.arg1.clone()?,
            quad.result.clone(),
        )),
        _ => None,
    }
}

fn is_dead(quad: &Quad, symbol_table: &SymbolTable) -> bool {
    if quad.operator == QuadOperator::Assign {
        return false;
    }

    symbol_table
        .get(&quad.result)
        .is_some_and(|info| info.category != Category::Output && info.used_by.is_empty())
}

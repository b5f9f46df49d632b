use itertools::Itertools;

use crate::{
    backend::{CodeGenerator, Simulation, operand_text, quad_comment, signal_name, targets::Target},
    middle::quad::{Quad, QuadOperator},
};

pub struct CodeGeneratorPython;

impl CodeGenerator for CodeGeneratorPython {
    fn generate(&self, simulation: &Simulation) -> String {
        let outputs = simulation
            .outputs
            .iter()
            .map(|output| signal_name(output))
            .collect::<Vec<_>>();

        let body = simulation
            .outputs
            .iter()
            .chain(&simulation.locals)
            .map(|name| format!("    {} = 0", signal_name(name)))
            .chain(
                simulation
                    .quads
                    .iter()
                    .map(|quad| format!("    {}  # {}", statement(quad), quad_comment(quad))),
            )
            .chain(std::iter::once(format!("    return ({})", tuple_items(&outputs))))
            .join("\n");

        format!(
            indoc::indoc! {r#"
            # Generated by gatec ({target} target)
            # Circuit: {name}

            def simulate({parameters}):
            {body}


            # Truth table
            INPUT_COUNT = {input_count}
            print("{header}")
            print("-" * 40)
            for vector in range(2 ** INPUT_COUNT):
                bits = [(vector >> (INPUT_COUNT - 1 - i)) & 1 for i in range(INPUT_COUNT)]
                result = simulate(*bits)
                print(" | ".join(map(str, bits)) + " || " + " | ".join(map(str, result)))
            "#},
            target = Target::Python,
            name = simulation.circuit_name,
            parameters = simulation.inputs.iter().map(|input| signal_name(input)).join(", "),
            body = body,
            input_count = simulation.inputs.len(),
            header = format!(
                "{} || {}",
                simulation.inputs.join(" | "),
                simulation.outputs.join(" | ")
            ),
        )
    }
}

fn statement(quad: &Quad) -> String {
    let a = operand_text(&quad.arg1);
    let b = operand_text(&quad.arg2);

    let expression = match quad.operator {
        QuadOperator::Assign => a,
        QuadOperator::Not => format!("int(not {a})"),
        QuadOperator::And => format!("{a} & {b}"),
        QuadOperator::Or => format!("{a} | {b}"),
        QuadOperator::Xor => format!("{a} ^ {b}"),
        QuadOperator::Nand => format!("int(not ({a} & {b}))"),
        QuadOperator::Nor => format!("int(not ({a} | {b}))"),
    };

    format!("{} = {expression}", signal_name(&quad.result))
}

/// Python needs a trailing comma for single element tuples
fn tuple_items(items: &[String]) -> String {
    match items {
        [single] => format!("{single},"),
        _ => items.join(", "),
    }
}

use itertools::Itertools;

use crate::{
    backend::{CodeGenerator, Simulation, operand_text, quad_comment, signal_name, targets::Target},
    middle::quad::{Quad, QuadOperator},
};

pub struct CodeGeneratorC;

impl CodeGenerator for CodeGeneratorC {
    fn generate(&self, simulation: &Simulation) -> String {
        let inputs = simulation
            .inputs
            .iter()
            .map(|input| signal_name(input))
            .collect::<Vec<_>>();

        let outputs = simulation
            .outputs
            .iter()
            .map(|output| signal_name(output))
            .collect::<Vec<_>>();

        let parameters = inputs
            .iter()
            .map(|input| format!("int {input}"))
            .chain(outputs.iter().map(|output| format!("int *out_{output}")))
            .join(", ");

        let declarations = outputs
            .iter()
            .cloned()
            .chain(simulation.locals.iter().map(|local| signal_name(local)))
            .map(|name| format!("    int {name} = 0;"))
            .join("\n");

        let statements = simulation
            .quads
            .iter()
            .map(|quad| format!("    {} /* {} */", statement(quad), quad_comment(quad)))
            .join("\n");

        let stores = outputs
            .iter()
            .map(|output| format!("    *out_{output} = {output};"))
            .join("\n");

        let input_count = inputs.len();

        let unpack = inputs
            .iter()
            .enumerate()
            .map(|(i, input)| {
                format!(
                    "        int {input} = (int)((vector >> {}) & 1ul);",
                    input_count - 1 - i
                )
            })
            .join("\n");

        let results = outputs
            .iter()
            .map(|output| format!("        int {output} = 0;"))
            .join("\n");

        let call_arguments = inputs
            .iter()
            .cloned()
            .chain(outputs.iter().map(|output| format!("&{output}")))
            .join(", ");

        let row_format = format!(
            "{} || {}\\n",
            vec!["%d"; input_count].join(" | "),
            vec!["%d"; outputs.len()].join(" | ")
        );

        let row_arguments = inputs
            .iter()
            .chain(&outputs)
            .map(|name| format!(", {name}"))
            .join("");

        format!(
            indoc::indoc! {r#"
            /* Generated by gatec ({target} target) */
            /* Circuit: {name} */

            #include <stdio.h>

            static void simulate({parameters})
            {{
            {declarations}

            {statements}

            {stores}
            }}

            int main(void)
            {{
                printf("{header}\n");
                printf("----------------------------------------\n");

                for (unsigned long vector = 0; vector < (1ul << {input_count}); vector++) {{
            {unpack}
            {results}

                    simulate({call_arguments});
                    printf("{row_format}"{row_arguments});
                }}

                return 0;
            }}
            "#},
            target = Target::C,
            name = simulation.circuit_name,
            parameters = if parameters.is_empty() {
                "void".to_owned()
            } else {
                parameters
            },
            declarations = declarations,
            statements = statements,
            stores = stores,
            header = format!(
                "{} || {}",
                simulation.inputs.join(" | "),
                simulation.outputs.join(" | ")
            ),
            input_count = input_count,
            unpack = unpack,
            results = results,
            call_arguments = call_arguments,
            row_format = row_format,
            row_arguments = row_arguments,
        )
    }
}

fn statement(quad: &Quad) -> String {
    let a = operand_text(&quad.arg1);
    let b = operand_text(&quad.arg2);

    let expression = match quad.operator {
        QuadOperator::Assign => a,
        QuadOperator::Not => format!("!{a}"),
        QuadOperator::And => format!("{a} & {b}"),
        QuadOperator::Or => format!("{a} | {b}"),
        QuadOperator::Xor => format!("{a} ^ {b}"),
        QuadOperator::Nand => format!("!({a} & {b})"),
        QuadOperator::Nor => format!("!({a} | {b})"),
    };

    format!("{} = {expression};", signal_name(&quad.result))
}

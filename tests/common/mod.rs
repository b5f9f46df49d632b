//! Random well-formed circuits shared by the property tests.

use proptest::{prelude::*, sample::Index};

const OPERATORS: [&str; 6] = ["AND", "OR", "XOR", "NAND", "NOR", "NOT"];

/// A gate as (operator index, first operand, second operand)
type GateSeed = (usize, Index, Index);

/// Renders an acyclic circuit where every gate only reads inputs, literals or
/// earlier gates. The last gate drives the single output.
fn render(input_count: usize, gates: &[GateSeed]) -> String {
    let inputs = (0..input_count).map(|i| format!("I{i}")).collect::<Vec<_>>();
    let names = (0..gates.len()).map(|i| format!("W{i}")).collect::<Vec<_>>();

    let mut source = format!("CIRCUIT Generated {{\n    INPUT {};\n", inputs.join(", "));
    source += &format!("    OUTPUT {};\n", names[names.len() - 1]);

    if names.len() > 1 {
        source += &format!("    WIRE {};\n", names[..names.len() - 1].join(", "));
    }

    let mut available = vec!["0".to_owned(), "1".to_owned()];
    available.extend(inputs);

    for ((operator, a, b), name) in gates.iter().zip(&names) {
        let operator = OPERATORS[*operator];
        let a = a.get(&available);

        let operands = if operator == "NOT" {
            a.clone()
        } else {
            format!("{a}, {}", b.get(&available))
        };

        source += &format!("    {name} = {operator}({operands});\n");
        available.push(name.clone());
    }

    source + "}\n"
}

/// Yields the input count together with the circuit source
pub fn circuit() -> impl Strategy<Value = (usize, String)> {
    (
        1usize..=5,
        prop::collection::vec((0..OPERATORS.len(), any::<Index>(), any::<Index>()), 1..16),
    )
        .prop_map(|(input_count, gates)| (input_count, render(input_count, &gates)))
}

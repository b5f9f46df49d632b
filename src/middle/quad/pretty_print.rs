use colored::Colorize;

use crate::{frontend::ast::Operand, middle::quad::Quad};

pub fn pretty_print_quads(title: &str, quads: &[Quad]) {
    println!("{}", format!("{title}:").bright_red());

    for (index, quad) in quads.iter().enumerate() {
        println!("    {:>3}: {quad}", index + 1);
    }
}

impl core::fmt::Display for Quad {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let operand = |operand: &Option<Operand>| match operand {
            Some(operand) => format!("{operand}").white(),
            None => "-".white(),
        };

        write!(
            f,
            "({}, {}, {}, {})",
            self.operator.to_string().cyan(),
            operand(&self.arg1),
            operand(&self.arg2),
            self.result.blue()
        )
    }
}

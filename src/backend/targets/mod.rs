use strum::{Display, EnumString};

use crate::backend::Simulation;

mod c;
mod python;

pub trait CodeGenerator {
    fn generate(&self, simulation: &Simulation) -> String;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, clap::ValueEnum)]
#[strum(serialize_all = "lowercase")]
pub enum Target {
    #[default]
    Python,
    C,
}

impl Target {
    pub fn get_code_generator(self) -> Box<dyn CodeGenerator> {
        match self {
            Target::Python => Box::new(python::CodeGeneratorPython),
            Target::C => Box::new(c::CodeGeneratorC),
        }
    }
}

use colored::Colorize;
use indexmap::{IndexMap, IndexSet};
use itertools::Itertools;

use crate::frontend::ast::{Category, GateDef};

/// Every signal known to a circuit, in first-declaration order.
///
/// Iteration order is significant: code generation uses it to order the
/// simulation procedure's parameters and results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    symbols: IndexMap<String, SymbolInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolInfo {
    pub category: Category,
    /// Inputs are defined from the moment they are declared. Outputs and
    /// wires become defined once some gate drives them.
    pub defined: bool,
    /// Outputs of the gates that read this signal
    pub used_by: IndexSet<String>,
    /// The gate that computes this signal
    pub defining_gate: Option<GateDef>,
}

impl SymbolInfo {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            defined: category == Category::Input,
            used_by: IndexSet::new(),
            defining_gate: None,
        }
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a symbol, returning the entry it replaced if the name was
    /// already present. A replaced entry keeps its original position.
    pub fn declare(&mut self, name: impl Into<String>, category: Category) -> Option<SymbolInfo> {
        self.symbols.insert(name.into(), SymbolInfo::new(category))
    }

    pub fn get(&self, name: &str) -> Option<&SymbolInfo> {
        self.symbols.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut SymbolInfo> {
        self.symbols.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SymbolInfo)> {
        self.symbols.iter().map(|(name, info)| (name.as_str(), info))
    }

    pub fn names_in(&self, category: Category) -> impl Iterator<Item = &str> {
        self.iter()
            .filter(move |(_, info)| info.category == category)
            .map(|(name, _)| name)
    }

    pub fn inputs(&self) -> Vec<&str> {
        self.names_in(Category::Input).collect()
    }

    pub fn outputs(&self) -> Vec<&str> {
        self.names_in(Category::Output).collect()
    }
}

impl core::fmt::Display for SymbolTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (name, info) in self.iter() {
            let used_by = if info.used_by.is_empty() {
                "-".to_owned()
            } else {
                info.used_by.iter().join(", ")
            };

            writeln!(
                f,
                "{:<16} {:<8} {:<8} used by [{}]",
                name.blue(),
                info.category.to_string().magenta(),
                if info.defined {
                    "defined".green()
                } else {
                    "undefined".red()
                },
                used_by
            )?;
        }

        Ok(())
    }
}

//! Semantic analysis builds the symbol table for a parsed circuit and checks
//! everything the grammar cannot express:
//!
//! 1. Every declared name is registered once (duplicates are reported, the
//!    last declaration wins).
//! 2. Gates are visited in source order. A gate output with no declaration
//!    is registered as an implicit `WIRE`; gate inputs must already be known.
//! 3. Operators get exactly as many operands as they take.
//! 4. The signal dependency graph has no combinational cycles.
//!
//! Analysis never stops early. All diagnostics are collected and returned
//! next to a best-effort symbol table; the caller decides whether to halt.

use hashbrown::HashSet;
use indexmap::IndexMap;
use thiserror::Error;
use tracing::debug;

use crate::{
    frontend::ast::{Category, GateOperator, Program},
    middle::symbol_table::SymbolTable,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticError {
    #[error("identifier '{name}' already declared")]
    DuplicateDeclaration { name: String },
    #[error("undeclared identifier '{name}' used in gate '{gate}' (line {line})")]
    UndeclaredIdentifier {
        name: String,
        gate: String,
        line: usize,
    },
    #[error(
        "gate {operator} requires {expected} input(s), got {actual} in gate '{gate}' (line {line})"
    )]
    ArityMismatch {
        operator: GateOperator,
        expected: usize,
        actual: usize,
        gate: String,
        line: usize,
    },
    #[error("cycle detected involving '{from}' and '{to}': {}", .path.join(" -> "))]
    Cycle {
        from: String,
        to: String,
        path: Vec<String>,
    },
    #[error("OUTPUT '{name}' never assigned")]
    UnassignedOutput { name: String },
    #[error("cannot assign to INPUT '{name}' (line {line})")]
    AssignmentToInput { name: String, line: usize },
}

#[derive(Debug, Clone)]
pub struct Analysis {
    pub symbol_table: SymbolTable,
    pub diagnostics: Vec<SemanticError>,
}

impl Analysis {
    pub fn is_ok(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

#[derive(Debug)]
pub struct SemanticAnalyzer<'ast> {
    program: &'ast Program,
    symbol_table: SymbolTable,
    diagnostics: Vec<SemanticError>,
}

impl<'ast> SemanticAnalyzer<'ast> {
    pub fn analyze(program: &'ast Program) -> Analysis {
        let mut analyzer = Self {
            program,
            symbol_table: SymbolTable::new(),
            diagnostics: Vec::new(),
        };

        analyzer.register_declarations();
        analyzer.resolve_gates();
        analyzer.check_arity();
        analyzer.check_outputs_assigned();
        analyzer.detect_cycles();

        debug!(
            symbols = analyzer.symbol_table.len(),
            diagnostics = analyzer.diagnostics.len(),
            "semantic analysis finished"
        );

        Analysis {
            symbol_table: analyzer.symbol_table,
            diagnostics: analyzer.diagnostics,
        }
    }

    fn register_declarations(&mut self) {
        for declaration in &self.program.declarations {
            for name in &declaration.identifiers {
                if self
                    .symbol_table
                    .declare(name.as_str(), declaration.category)
                    .is_some()
                {
                    self.diagnostics
                        .push(SemanticError::DuplicateDeclaration { name: name.clone() });
                }
            }
        }
    }

    fn resolve_gates(&mut self) {
        for gate in &self.program.gates {
            // Undeclared gate outputs are accepted as implicit wires
            if !self.symbol_table.contains(&gate.output) {
                self.symbol_table.declare(gate.output.as_str(), Category::Wire);
            }

            if let Some(info) = self.symbol_table.get_mut(&gate.output) {
                if info.category == Category::Input {
                    self.diagnostics.push(SemanticError::AssignmentToInput {
                        name: gate.output.clone(),
                        line: gate.line,
                    });
                }

                info.defined = true;
                info.defining_gate = Some(gate.clone());
            }

            for input in gate.input_signals() {
                match self.symbol_table.get_mut(input) {
                    Some(info) => {
                        info.used_by.insert(gate.output.clone());
                    }
                    None => self.diagnostics.push(SemanticError::UndeclaredIdentifier {
                        name: input.to_owned(),
                        gate: gate.output.clone(),
                        line: gate.line,
                    }),
                }
            }
        }
    }

    fn check_arity(&mut self) {
        for gate in &self.program.gates {
            let expected = gate.operator.arity();

            if gate.inputs.len() != expected {
                self.diagnostics.push(SemanticError::ArityMismatch {
                    operator: gate.operator,
                    expected,
                    actual: gate.inputs.len(),
                    gate: gate.output.clone(),
                    line: gate.line,
                });
            }
        }
    }

    fn check_outputs_assigned(&mut self) {
        for (name, info) in self.symbol_table.iter() {
            if info.category == Category::Output && !info.defined {
                self.diagnostics.push(SemanticError::UnassignedOutput {
                    name: name.to_owned(),
                });
            }
        }
    }

    /// Depth-first search over the "is computed from" relation using an
    /// explicit stack. Reaching a node that is still on the stack closes a
    /// cycle; that edge is reported and not followed, and the search carries
    /// on with the remaining edges and components.
    fn detect_cycles(&mut self) {
        let graph: IndexMap<&str, Vec<&str>> = self
            .symbol_table
            .iter()
            .filter_map(|(name, info)| {
                let gate = info.defining_gate.as_ref()?;
                Some((name, gate.input_signals().collect()))
            })
            .collect();

        let mut visited: HashSet<&str> = HashSet::new();
        let mut on_stack: HashSet<&str> = HashSet::new();
        let mut cycles = Vec::new();

        for &root in graph.keys() {
            if visited.contains(root) {
                continue;
            }

            visited.insert(root);
            on_stack.insert(root);

            // (node, index of the next dependency to explore)
            let mut stack: Vec<(&str, usize)> = vec![(root, 0)];

            while let Some((node, next_edge)) = stack.last_mut() {
                let node = *node;
                let Some(&dependency) = graph.get(node).and_then(|edges| edges.get(*next_edge))
                else {
                    on_stack.remove(node);
                    stack.pop();
                    continue;
                };
                *next_edge += 1;

                if on_stack.contains(dependency) {
                    let start = stack
                        .iter()
                        .position(|(n, _)| *n == dependency)
                        .unwrap_or_default();

                    let mut path: Vec<String> =
                        stack[start..].iter().map(|(n, _)| (*n).to_owned()).collect();
                    path.push(dependency.to_owned());

                    cycles.push(SemanticError::Cycle {
                        from: node.to_owned(),
                        to: dependency.to_owned(),
                        path,
                    });
                    continue;
                }

                if visited.insert(dependency) && graph.contains_key(dependency) {
                    on_stack.insert(dependency);
                    stack.push((dependency, 0));
                }
            }
        }

        self.diagnostics.extend(cycles);
    }
}

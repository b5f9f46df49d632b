//! `gatec` compiles a small circuit description language into a runnable
//! simulation with a truth-table driver.
//!
//! ```text
//! CIRCUIT HalfAdder {
//!     INPUT A, B;
//!     OUTPUT Sum, Carry;
//!     Sum = XOR(A, B);
//!     Carry = AND(A, B);
//! }
//! ```
//!
//! The pipeline is linear: lexing, parsing, semantic analysis, lowering to
//! quads, optimization and code generation. It stops at the first stage that
//! reports a problem.

use strum::Display;
use tracing::{debug, info};

use crate::{
    backend::Target,
    frontend::{
        ast::Program,
        lexer::{Lexer, Token},
        parser::Parser,
    },
    middle::{
        optimization::optimize,
        quad::{Quad, ast_lowering::lower_program},
        semantic::SemanticAnalyzer,
        simulate::{TruthTable, truth_table},
        symbol_table::SymbolTable,
    },
};

pub mod backend;
pub mod frontend;
pub mod middle;

/// The stage a failed compilation stopped at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Stage {
    Lexical,
    Syntax,
    Semantic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileOptions {
    pub target: Target,
    /// When disabled the optimized quads are a copy of the unoptimized ones
    pub optimize: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            target: Target::Python,
            optimize: true,
        }
    }
}

/// Every artifact of a successful compilation
#[derive(Debug, Clone)]
pub struct Compilation {
    pub tokens: Vec<Token>,
    pub ast: Program,
    pub symbol_table: SymbolTable,
    pub quads: Vec<Quad>,
    pub optimized_quads: Vec<Quad>,
    pub generated_code: String,
}

impl Compilation {
    /// Evaluates the optimized quads for every input vector
    pub fn truth_table(&self) -> TruthTable {
        truth_table(&self.optimized_quads, &self.symbol_table)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileFailure {
    pub stage: Stage,
    pub diagnostics: Vec<String>,
    /// Line and column of the offending token, for lexical and syntax errors
    pub location: Option<(usize, usize)>,
}

#[derive(Debug, Clone)]
pub enum CompileResult {
    Success(Box<Compilation>),
    Failure(CompileFailure),
}

impl CompileResult {
    pub fn is_success(&self) -> bool {
        matches!(self, CompileResult::Success(_))
    }

    pub fn success(&self) -> Option<&Compilation> {
        match self {
            CompileResult::Success(compilation) => Some(compilation),
            CompileResult::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&CompileFailure> {
        match self {
            CompileResult::Success(_) => None,
            CompileResult::Failure(failure) => Some(failure),
        }
    }
}

/// Compiles `source` with the default options
pub fn compile(source: &str) -> CompileResult {
    compile_with(source, &CompileOptions::default())
}

pub fn compile_with(source: &str, options: &CompileOptions) -> CompileResult {
    let result = run_pipeline(source, options);

    match &result {
        Ok(compilation) => info!(
            circuit = %compilation.ast.name,
            quads = compilation.optimized_quads.len(),
            "compilation succeeded"
        ),
        Err(failure) => info!(
            stage = %failure.stage,
            diagnostics = failure.diagnostics.len(),
            "compilation failed"
        ),
    }

    match result {
        Ok(compilation) => CompileResult::Success(Box::new(compilation)),
        Err(failure) => CompileResult::Failure(failure),
    }
}

fn run_pipeline(source: &str, options: &CompileOptions) -> Result<Compilation, CompileFailure> {
    let tokens = Lexer::tokenize(source).map_err(|error| CompileFailure {
        stage: Stage::Lexical,
        location: Some((error.line, error.column)),
        diagnostics: vec![error.to_string()],
    })?;

    debug!(tokens = tokens.len(), "lexing finished");

    let ast = Parser::parse_program(&tokens).map_err(|error| CompileFailure {
        stage: Stage::Syntax,
        location: error.line().zip(error.column()),
        diagnostics: vec![error.to_string()],
    })?;

    debug!(
        declarations = ast.declarations.len(),
        gates = ast.gates.len(),
        "parsing finished"
    );

    let analysis = SemanticAnalyzer::analyze(&ast);

    if !analysis.is_ok() {
        return Err(CompileFailure {
            stage: Stage::Semantic,
            location: None,
            diagnostics: analysis
                .diagnostics
                .iter()
                .map(ToString::to_string)
                .collect(),
        });
    }

    let symbol_table = analysis.symbol_table;
    let quads = lower_program(&ast);

    let optimized_quads = if options.optimize {
        optimize(&quads, &symbol_table)
    } else {
        quads.clone()
    };

    let generated_code =
        backend::generate(&optimized_quads, &symbol_table, &ast.name, options.target);

    Ok(Compilation {
        tokens,
        ast,
        symbol_table,
        quads,
        optimized_quads,
        generated_code,
    })
}

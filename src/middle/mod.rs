//! Semantic analysis turns the AST into a symbol table, after which the
//! circuit is lowered to quads, optimized, and can be evaluated directly.

pub mod optimization;
pub mod quad;
pub mod semantic;
pub mod simulate;
pub mod symbol_table;

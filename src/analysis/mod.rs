// src/analysis/mod.rs
// Shallow, pattern-based local analysis. Intentionally not a parser: the
// contract is defined in terms of line-pattern counts, and the remote
// service owns all semantic work.

pub mod complexity;
pub mod indent;

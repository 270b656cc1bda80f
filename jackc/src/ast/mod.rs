//! Abstract syntax tree.
//!
//! Nodes are immutable values built bottom-up during parsing. Each node
//! knows how to emit its own VM instruction sequence; the tagged-enum
//! match keeps code generation exhaustiveness-checked when a new term
//! or statement kind is added.
mod class;
mod expr;
mod stmt;
mod subroutine;

pub use class::*;
pub use expr::*;
pub use stmt::*;
pub use subroutine::*;

//! loci-sem - Script-Block Semantics
//!
//! ============================================================================
//! OVERVIEW
//! ============================================================================
//!
//! The semantic layer over the parsed simulation file: turning each block
//! subtree into a [`ScriptBlock`] (kind, generation range, id, callback
//! parameters, compound statement) and computing its conservative
//! symbol-use summary ([`SymbolUses`]).
//!
//! Construction validates what the grammar alone cannot: generation bounds
//! and ordering, callback arities, id ranges, the mandatory compound
//! statement, and the rule that `initialize()` callbacks carry no
//! generation range. Failures are positioned and fail-fast; no partial
//! block is ever produced.
//!
//! The symbol summary lets the evaluator skip binding globals a block
//! cannot reference. It has no false negatives; wildcard identifiers like
//! `executeLambda` force every bit.

mod block;
mod scan;

pub use block::{blocks_from_file, BlockKind, ScriptBlock};
pub use scan::{scan_symbols, SymbolUses};

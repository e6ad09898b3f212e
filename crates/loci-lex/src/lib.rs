//! loci-lex - Lexical Analyzer
//!
//! ============================================================================
//! OVERVIEW
//! ============================================================================
//!
//! Turns loci script text into an ordered token stream. The recognised
//! lexical classes:
//!
//! - identifiers `[A-Za-z_][A-Za-z0-9_]*`, reclassified as keywords
//!   (`if else do while for in next break return`) by post-scan lookup
//! - integer literals `[0-9]+` and float literals with a fraction and/or
//!   exponent (`3.14`, `1e-7`, `2.5E+3`)
//! - string literals, single- or double-quoted, with escape sequences
//! - line (`//`) and block (`/* */`) comments, skipped unless the caller
//!   asks to keep non-significant tokens
//! - the punctuator/operator set: arithmetic `+ - * / % ^`, comparison
//!   `== != < <= > >=`, logical `& | !`, assignment `=`, grouping
//!   `( ) [ ] { }`, sequencing `: ; , .`
//!
//! ============================================================================
//! POLICIES
//! ============================================================================
//!
//! Longest match; one left-to-right pass; no backtracking across a
//! completed token. Every successful tokenization ends with a single
//! zero-length EOF token. Unterminated literals/comments and unknown
//! characters fail fast with a positioned lexical error.
//!
//! Positions are reported in the coordinates of the enclosing buffer: a
//! nested block's lexer is constructed with the block's start offset and
//! every span already includes it.

pub mod cursor;
pub mod token;

mod lexer;

#[cfg(test)]
mod edge_cases;

pub use lexer::{add_optional_semicolon, tokenize};
pub use token::{keyword_from_ident, Token, TokenKind};

//! loci-par - Parser
//!
//! ============================================================================
//! OVERVIEW
//! ============================================================================
//!
//! Recursive-descent parser for the loci script language, plus the extended
//! simulation-file grammar layered on top of it.
//!
//! The base grammar is the usual C-like tower:
//!
//! ```text
//! assignment < logical-or < logical-and < equality < relational
//!            < additive < multiplicative < sequence < exponent
//!            < unary < postfix < primary
//! ```
//!
//! with statements `{...}`, expression statement, `if`/`else`, `do`/`while`,
//! `while`, `for (id in expr)`, `next`, `break`, and `return`.
//!
//! The extended grammar parses a whole simulation file as a sequence of
//! script blocks, each an optional `sN` identifier, an optional generation
//! range, an optional callback signature, and a mandatory compound
//! statement:
//!
//! ```text
//! File     := Block* EOF
//! Block    := Identifier? Number (":" Number)? Callback? CompoundStatement
//! Callback := "initialize" "(" ")"
//!           | "fitness" "(" Identifier ("," Identifier)? ")"
//!           | "mateChoice" "(" Identifier? ")"
//!           | "modifyChild" "(" Identifier? ")"
//! ```
//!
//! ============================================================================
//! DESIGN
//! ============================================================================
//!
//! The parser is a plain value with a token cursor and one-token lookahead;
//! the extended grammar is a set of additional entry points on the same
//! value that call into the base grammar (`parse_sim_file` ends every block
//! with `parse_compound_statement`). Parsing is fail-fast: the first
//! unexpected token aborts with a positioned syntax error carrying the
//! caller-supplied context label, and the partially built tree is dropped.
//!
//! Entry points live on [`Script`], which owns the text, the token stream,
//! and the resulting tree.

pub mod ast;

mod expr;
mod file;
mod script;
mod stmt;

#[cfg(test)]
mod edge_cases;

pub use ast::{optimize_tree, Node, Value};
pub use script::Script;

use loci_lex::{Token, TokenKind};
use loci_util::{Result, ScriptError};

/// Recursive-descent parser over a significant-only token stream.
///
/// The stream must end with an EOF token (every stream produced by
/// `loci_lex::tokenize` does).
pub struct Parser<'a> {
    /// Token stream from the lexer.
    tokens: &'a [Token],

    /// Current position in the token stream.
    position: usize,
}

impl<'a> Parser<'a> {
    /// Create a parser over `tokens`.
    pub fn new(tokens: &'a [Token]) -> Self {
        debug_assert!(
            tokens.last().map(|t| t.kind) == Some(TokenKind::Eof),
            "token streams end with EOF"
        );
        Self { tokens, position: 0 }
    }

    /// The current token; the trailing EOF once the stream is exhausted.
    pub(crate) fn current(&self) -> &Token {
        let last = self.tokens.len().saturating_sub(1);
        &self.tokens[self.position.min(last)]
    }

    /// The current token's kind.
    #[inline]
    pub(crate) fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    /// Step past the current token. The trailing EOF is never consumed.
    pub(crate) fn consume(&mut self) {
        if self.current_kind() != TokenKind::Eof {
            self.position += 1;
        }
    }

    /// Consume the current token if it has the given kind.
    pub(crate) fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.current_kind() == kind {
            self.consume();
            true
        } else {
            false
        }
    }

    /// Consume and return the current token, which must have the given
    /// kind; otherwise fail with a syntax error labelled `context`.
    pub(crate) fn expect(&mut self, kind: TokenKind, context: &str) -> Result<Token> {
        if self.current_kind() == kind {
            let token = self.current().clone();
            self.consume();
            Ok(token)
        } else {
            Err(self.syntax_error(
                format!("unexpected token {}; expected {}", self.current(), kind),
                context,
            ))
        }
    }

    /// A syntax error positioned at the current token.
    pub(crate) fn syntax_error(&self, message: String, context: &str) -> ScriptError {
        ScriptError::Syntax {
            message,
            context: context.to_string(),
            span: self.current().span,
        }
    }
}

//! The `Script` object: text, token stream, and tree, owned together.
//!
//! A script is constructed from text, optionally tokenized, optionally
//! parsed. Tokens and tree live exactly as long as the script. When the
//! script is a nested block of a larger file, `start_character_index`
//! anchors every reported position in the enclosing buffer's coordinates.

use std::fmt::{self, Write};
use std::rc::Rc;

use loci_lex::{add_optional_semicolon, tokenize, Token};
use loci_util::diagnostic;
use loci_util::Result;

use crate::ast::{optimize_tree, Node};
use crate::Parser;

/// A script and all of its tokenization and parsing baggage.
#[derive(Debug)]
pub struct Script {
    /// The full script text.
    text: String,

    /// Index of the script's first character in the enclosing buffer.
    start_character_index: usize,

    /// Owned token stream; empty until [`tokenize`](Script::tokenize).
    tokens: Vec<Token>,

    /// Owned tree; `None` until one of the parse entry points succeeds.
    parse_root: Option<Rc<Node>>,
}

impl Script {
    /// Create a script from its text. `start_character_index` is 0 for a
    /// standalone script, or the block's offset inside an enclosing file.
    pub fn new(text: impl Into<String>, start_character_index: usize) -> Self {
        Self {
            text: text.into(),
            start_character_index,
            tokens: Vec::new(),
            parse_root: None,
        }
    }

    /// The backing text.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The script's offset in the enclosing buffer.
    #[inline]
    pub fn start_character_index(&self) -> usize {
        self.start_character_index
    }

    /// The token stream (empty before tokenization).
    #[inline]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// The tree root (None before a successful parse).
    #[inline]
    pub fn ast(&self) -> Option<&Rc<Node>> {
        self.parse_root.as_ref()
    }

    /// Generate the token stream from the text.
    ///
    /// With `keep_nonsignificant` set, whitespace and comments are kept in
    /// the stream (the parse entry points filter them back out).
    pub fn tokenize(&mut self, keep_nonsignificant: bool) -> Result<()> {
        self.tokens = tokenize(&self.text, self.start_character_index, keep_nonsignificant)?;

        if log::log_enabled!(log::Level::Trace) {
            let mut listing = String::new();
            let _ = self.print_tokens(&mut listing);
            log::trace!("tokens:\n{listing}");
        }

        diagnostic::clear_error_span();
        Ok(())
    }

    /// Append a synthetic semicolon before EOF, so single-expression input
    /// like `6 + 7` works in a console.
    pub fn add_optional_semicolon(&mut self) {
        add_optional_semicolon(&mut self.tokens);
    }

    /// Parse the token stream as an interpreter block (`statement* EOF`).
    pub fn parse_interpreter_block_to_ast(&mut self) -> Result<()> {
        self.parse_with(|parser| parser.parse_interpreter_block())
    }

    /// Parse the token stream as a simulation file (`Block* EOF`).
    pub fn parse_sim_file_to_ast(&mut self) -> Result<()> {
        self.parse_with(|parser| parser.parse_sim_file())
    }

    fn parse_with(
        &mut self,
        entry: impl FnOnce(&mut Parser<'_>) -> Result<Rc<Node>>,
    ) -> Result<()> {
        // drop any previous tree; on failure no partial tree survives
        self.parse_root = None;

        let significant: Vec<Token> = self
            .tokens
            .iter()
            .filter(|t| !t.kind.is_nonsignificant())
            .cloned()
            .collect();

        let mut parser = Parser::new(&significant);
        let result = entry(&mut parser).and_then(|root| {
            optimize_tree(&root)?;
            Ok(root)
        });

        match result {
            Ok(root) => {
                if log::log_enabled!(log::Level::Debug) {
                    log::debug!("AST:\n{}", root.tree_string());
                }
                self.parse_root = Some(root);
                diagnostic::clear_error_span();
                Ok(())
            }
            Err(err) => Err(diagnostic::publish(err)),
        }
    }

    /// Write the token listing, one token per line with its range.
    pub fn print_tokens(&self, out: &mut dyn Write) -> fmt::Result {
        for token in &self.tokens {
            writeln!(out, "{} {}", token, token.span)?;
        }
        Ok(())
    }

    /// Write the tree as an indented listing with positions.
    pub fn print_ast(&self, out: &mut dyn Write) -> fmt::Result {
        if let Some(root) = &self.parse_root {
            out.write_str(&root.tree_string())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loci_lex::TokenKind;
    use loci_util::{ScriptError, Span};

    #[test]
    fn test_tokenize_then_parse() {
        let mut script = Script::new("x = 1; y = x + 2;", 0);
        script.tokenize(false).unwrap();
        script.parse_interpreter_block_to_ast().unwrap();

        let root = script.ast().unwrap();
        assert_eq!(root.kind(), TokenKind::ContextFile);
        assert_eq!(root.children().len(), 2);
    }

    #[test]
    fn test_parse_failure_drops_partial_tree() {
        let mut script = Script::new("x = 1;", 0);
        script.tokenize(false).unwrap();
        script.parse_interpreter_block_to_ast().unwrap();
        assert!(script.ast().is_some());

        script = Script::new("x = ;", 0);
        script.tokenize(false).unwrap();
        assert!(script.parse_interpreter_block_to_ast().is_err());
        assert!(script.ast().is_none());
    }

    #[test]
    fn test_nested_script_offsets() {
        // a block at offset 20 of some enclosing file
        let mut script = Script::new("{ q = 1; }", 20);
        script.tokenize(false).unwrap();
        script.parse_interpreter_block_to_ast().unwrap();

        let compound = script.ast().unwrap().child(0).unwrap();
        assert_eq!(compound.span(), Span::new(20, 30));
    }

    #[test]
    fn test_nested_script_error_positions() {
        let mut script = Script::new("q = ;", 100);
        script.tokenize(false).unwrap();
        let err = script.parse_interpreter_block_to_ast().unwrap_err();
        match err {
            ScriptError::Syntax { span, .. } => {
                assert_eq!(span, Span::new(104, 105), "enclosing-buffer coordinates");
            }
            other => panic!("expected Syntax, got {other:?}"),
        }
    }

    #[test]
    fn test_add_optional_semicolon_repl_input() {
        let mut script = Script::new("6 + 7", 0);
        script.tokenize(false).unwrap();
        script.add_optional_semicolon();
        script.parse_interpreter_block_to_ast().unwrap();

        let root = script.ast().unwrap();
        assert_eq!(root.child(0).unwrap().kind(), TokenKind::Plus);
    }

    #[test]
    fn test_parse_with_nonsignificant_tokens_kept() {
        let mut script = Script::new("x = 1; // set x\n", 0);
        script.tokenize(true).unwrap();
        assert!(script.tokens().iter().any(|t| t.kind == TokenKind::Comment));
        script.parse_interpreter_block_to_ast().unwrap();
        assert!(script.ast().is_some());
    }

    #[test]
    fn test_sim_file_entry_point() {
        let mut script = Script::new("initialize() { } 1 { x; }", 0);
        script.tokenize(false).unwrap();
        script.parse_sim_file_to_ast().unwrap();
        assert_eq!(script.ast().unwrap().children().len(), 2);
    }

    #[test]
    fn test_print_tokens_lists_ranges() {
        let mut script = Script::new("x;", 0);
        script.tokenize(false).unwrap();
        let mut listing = String::new();
        script.print_tokens(&mut listing).unwrap();
        assert!(listing.contains("'x' [0, 1)"));
        assert!(listing.contains("';' [1, 2)"));
        assert!(listing.contains("EOF [2, 2)"));
    }

    #[test]
    fn test_print_ast() {
        let mut script = Script::new("a + b;", 0);
        script.tokenize(false).unwrap();
        script.parse_interpreter_block_to_ast().unwrap();
        let mut listing = String::new();
        script.print_ast(&mut listing).unwrap();
        assert!(listing.contains("'+'"));
        assert!(listing.contains("'a'"));
    }
}

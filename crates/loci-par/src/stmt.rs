//! Statement parsing - compound, selection, iteration, and jump statements.

use std::rc::Rc;

use loci_lex::TokenKind;
use loci_util::Result;

use crate::ast::Node;
use crate::Parser;

impl<'a> Parser<'a> {
    /// `statement* EOF`, rooted at a synthetic file node. The entry point
    /// for REPL-style interpreter blocks.
    pub fn parse_interpreter_block(&mut self) -> Result<Rc<Node>> {
        let mut root = Node::synthetic(TokenKind::ContextFile);

        while self.current_kind() != TokenKind::Eof {
            root.add_child(self.parse_statement()?);
        }
        self.expect(TokenKind::Eof, "interpreter block")?;

        Ok(Rc::new(root))
    }

    /// `'{' statement* '}'`, anchored at the opening brace; the node's span
    /// includes the closing brace.
    pub fn parse_compound_statement(&mut self) -> Result<Rc<Node>> {
        let open = self.expect(TokenKind::LBrace, "compound statement")?;
        let mut node = Node::new(open);

        while !matches!(self.current_kind(), TokenKind::RBrace | TokenKind::Eof) {
            node.add_child(self.parse_statement()?);
        }
        let close = self.expect(TokenKind::RBrace, "compound statement")?;
        node.extend_span(close.span);

        Ok(Rc::new(node))
    }

    pub fn parse_statement(&mut self) -> Result<Rc<Node>> {
        match self.current_kind() {
            TokenKind::LBrace => self.parse_compound_statement(),
            TokenKind::If => self.parse_selection_statement(),
            TokenKind::Do => self.parse_do_while_statement(),
            TokenKind::While => self.parse_while_statement(),
            TokenKind::For => self.parse_for_statement(),
            TokenKind::Next | TokenKind::Break | TokenKind::Return => {
                self.parse_jump_statement()
            }
            _ => self.parse_expr_statement(),
        }
    }

    /// An expression terminated by `';'`, or the empty statement `';'`.
    /// The semicolon itself is not kept in the tree.
    fn parse_expr_statement(&mut self) -> Result<Rc<Node>> {
        if self.current_kind() == TokenKind::Semicolon {
            let token = self.current().clone();
            self.consume();
            return Ok(Rc::new(Node::new(token)));
        }

        let expr = self.parse_expr()?;
        self.expect(TokenKind::Semicolon, "expression statement")?;
        Ok(expr)
    }

    /// `if (expr) statement (else statement)?` - children are the
    /// condition, the true branch, and optionally the false branch.
    fn parse_selection_statement(&mut self) -> Result<Rc<Node>> {
        let anchor = self.expect(TokenKind::If, "if statement")?;
        let mut node = Node::new(anchor);

        self.expect(TokenKind::LParen, "if statement")?;
        node.add_child(self.parse_expr()?);
        self.expect(TokenKind::RParen, "if statement")?;

        node.add_child(self.parse_statement()?);

        if self.match_token(TokenKind::Else) {
            node.add_child(self.parse_statement()?);
        }

        Ok(Rc::new(node))
    }

    /// `do statement while (expr) ;` - children are body then condition.
    fn parse_do_while_statement(&mut self) -> Result<Rc<Node>> {
        let anchor = self.expect(TokenKind::Do, "do/while statement")?;
        let mut node = Node::new(anchor);

        node.add_child(self.parse_statement()?);

        self.expect(TokenKind::While, "do/while statement")?;
        self.expect(TokenKind::LParen, "do/while statement")?;
        node.add_child(self.parse_expr()?);
        self.expect(TokenKind::RParen, "do/while statement")?;
        let close = self.expect(TokenKind::Semicolon, "do/while statement")?;
        node.extend_span(close.span);

        Ok(Rc::new(node))
    }

    /// `while (expr) statement` - children are condition then body.
    fn parse_while_statement(&mut self) -> Result<Rc<Node>> {
        let anchor = self.expect(TokenKind::While, "while statement")?;
        let mut node = Node::new(anchor);

        self.expect(TokenKind::LParen, "while statement")?;
        node.add_child(self.parse_expr()?);
        self.expect(TokenKind::RParen, "while statement")?;

        node.add_child(self.parse_statement()?);

        Ok(Rc::new(node))
    }

    /// `for (identifier in expr) statement` - children are the loop
    /// variable, the range expression, and the body.
    fn parse_for_statement(&mut self) -> Result<Rc<Node>> {
        let anchor = self.expect(TokenKind::For, "for statement")?;
        let mut node = Node::new(anchor);

        self.expect(TokenKind::LParen, "for statement")?;
        let variable = self.expect(TokenKind::Identifier, "for statement")?;
        node.add_child(Rc::new(Node::new(variable)));
        self.expect(TokenKind::In, "for statement")?;
        node.add_child(self.parse_expr()?);
        self.expect(TokenKind::RParen, "for statement")?;

        node.add_child(self.parse_statement()?);

        Ok(Rc::new(node))
    }

    /// `next ;`, `break ;`, or `return expr? ;`
    fn parse_jump_statement(&mut self) -> Result<Rc<Node>> {
        let anchor = self.current().clone();
        let context = match anchor.kind {
            TokenKind::Next => "next statement",
            TokenKind::Break => "break statement",
            _ => "return statement",
        };
        self.consume();
        let mut node = Node::new(anchor);

        if node.kind() == TokenKind::Return && self.current_kind() != TokenKind::Semicolon {
            node.add_child(self.parse_expr()?);
        }
        let close = self.expect(TokenKind::Semicolon, context)?;
        node.extend_span(close.span);

        Ok(Rc::new(node))
    }
}

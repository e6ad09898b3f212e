//! Expression parsing - the precedence tower.
//!
//! One method per precedence level, lowest binding first. Binary levels
//! left-fold, building a node anchored at each operator token; assignment
//! and exponentiation are right-associative. Postfix covers member access,
//! call, and subscript.

use std::rc::Rc;

use loci_lex::TokenKind;
use loci_util::Result;

use crate::ast::Node;
use crate::Parser;

impl<'a> Parser<'a> {
    /// Expression entry point.
    pub fn parse_expr(&mut self) -> Result<Rc<Node>> {
        self.parse_assignment_expr()
    }

    /// `lvalue = expr` (right-associative).
    fn parse_assignment_expr(&mut self) -> Result<Rc<Node>> {
        let left = self.parse_logical_or_expr()?;

        if self.current_kind() == TokenKind::Assign {
            let op = self.current().clone();
            self.consume();
            let right = self.parse_assignment_expr()?;

            let mut node = Node::new(op);
            node.add_child(left);
            node.add_child(right);
            return Ok(Rc::new(node));
        }

        Ok(left)
    }

    fn parse_logical_or_expr(&mut self) -> Result<Rc<Node>> {
        let mut left = self.parse_logical_and_expr()?;

        while self.current_kind() == TokenKind::Or {
            let op = self.current().clone();
            self.consume();
            let right = self.parse_logical_and_expr()?;

            let mut node = Node::new(op);
            node.add_child(left);
            node.add_child(right);
            left = Rc::new(node);
        }

        Ok(left)
    }

    fn parse_logical_and_expr(&mut self) -> Result<Rc<Node>> {
        let mut left = self.parse_equality_expr()?;

        while self.current_kind() == TokenKind::And {
            let op = self.current().clone();
            self.consume();
            let right = self.parse_equality_expr()?;

            let mut node = Node::new(op);
            node.add_child(left);
            node.add_child(right);
            left = Rc::new(node);
        }

        Ok(left)
    }

    fn parse_equality_expr(&mut self) -> Result<Rc<Node>> {
        let mut left = self.parse_relational_expr()?;

        while matches!(self.current_kind(), TokenKind::Eq | TokenKind::NotEq) {
            let op = self.current().clone();
            self.consume();
            let right = self.parse_relational_expr()?;

            let mut node = Node::new(op);
            node.add_child(left);
            node.add_child(right);
            left = Rc::new(node);
        }

        Ok(left)
    }

    fn parse_relational_expr(&mut self) -> Result<Rc<Node>> {
        let mut left = self.parse_add_expr()?;

        while matches!(
            self.current_kind(),
            TokenKind::Lt | TokenKind::LtEq | TokenKind::Gt | TokenKind::GtEq
        ) {
            let op = self.current().clone();
            self.consume();
            let right = self.parse_add_expr()?;

            let mut node = Node::new(op);
            node.add_child(left);
            node.add_child(right);
            left = Rc::new(node);
        }

        Ok(left)
    }

    fn parse_add_expr(&mut self) -> Result<Rc<Node>> {
        let mut left = self.parse_mult_expr()?;

        while matches!(self.current_kind(), TokenKind::Plus | TokenKind::Minus) {
            let op = self.current().clone();
            self.consume();
            let right = self.parse_mult_expr()?;

            let mut node = Node::new(op);
            node.add_child(left);
            node.add_child(right);
            left = Rc::new(node);
        }

        Ok(left)
    }

    fn parse_mult_expr(&mut self) -> Result<Rc<Node>> {
        let mut left = self.parse_seq_expr()?;

        while matches!(
            self.current_kind(),
            TokenKind::Mult | TokenKind::Div | TokenKind::Mod
        ) {
            let op = self.current().clone();
            self.consume();
            let right = self.parse_seq_expr()?;

            let mut node = Node::new(op);
            node.add_child(left);
            node.add_child(right);
            left = Rc::new(node);
        }

        Ok(left)
    }

    /// `a : b` - the sequence operator.
    fn parse_seq_expr(&mut self) -> Result<Rc<Node>> {
        let mut left = self.parse_exp_expr()?;

        while self.current_kind() == TokenKind::Colon {
            let op = self.current().clone();
            self.consume();
            let right = self.parse_exp_expr()?;

            let mut node = Node::new(op);
            node.add_child(left);
            node.add_child(right);
            left = Rc::new(node);
        }

        Ok(left)
    }

    /// `a ^ b` (right-associative).
    fn parse_exp_expr(&mut self) -> Result<Rc<Node>> {
        let left = self.parse_unary_expr()?;

        if self.current_kind() == TokenKind::Exp {
            let op = self.current().clone();
            self.consume();
            let right = self.parse_exp_expr()?;

            let mut node = Node::new(op);
            node.add_child(left);
            node.add_child(right);
            return Ok(Rc::new(node));
        }

        Ok(left)
    }

    fn parse_unary_expr(&mut self) -> Result<Rc<Node>> {
        if matches!(
            self.current_kind(),
            TokenKind::Not | TokenKind::Minus | TokenKind::Plus
        ) {
            let op = self.current().clone();
            self.consume();
            let operand = self.parse_unary_expr()?;

            let mut node = Node::new(op);
            node.add_child(operand);
            return Ok(Rc::new(node));
        }

        self.parse_postfix_expr()
    }

    /// Member access, call, and subscript, applied left to right.
    fn parse_postfix_expr(&mut self) -> Result<Rc<Node>> {
        let mut base = self.parse_primary_expr()?;

        loop {
            match self.current_kind() {
                TokenKind::LBracket => {
                    let op = self.current().clone();
                    self.consume();
                    let index = self.parse_expr()?;
                    let close = self.expect(TokenKind::RBracket, "subscript")?;

                    let mut node = Node::new(op);
                    node.add_child(base);
                    node.add_child(index);
                    node.extend_span(close.span);
                    base = Rc::new(node);
                }
                TokenKind::LParen => {
                    let op = self.current().clone();
                    self.consume();

                    let mut node = Node::new(op);
                    node.add_child(base);
                    if self.current_kind() != TokenKind::RParen {
                        for argument in self.parse_argument_expr_list()? {
                            node.add_child(argument);
                        }
                    }
                    let close = self.expect(TokenKind::RParen, "call")?;
                    node.extend_span(close.span);
                    base = Rc::new(node);
                }
                TokenKind::Dot => {
                    let op = self.current().clone();
                    self.consume();
                    let member = self.expect(TokenKind::Identifier, "member access")?;

                    let mut node = Node::new(op);
                    node.add_child(base);
                    node.add_child(Rc::new(Node::new(member)));
                    base = Rc::new(node);
                }
                _ => return Ok(base),
            }
        }
    }

    /// Identifier, literal, parenthesised expression, or block.
    fn parse_primary_expr(&mut self) -> Result<Rc<Node>> {
        match self.current_kind() {
            TokenKind::Number | TokenKind::String => self.parse_constant(),
            TokenKind::Identifier => {
                let token = self.current().clone();
                self.consume();
                Ok(Rc::new(Node::new(token)))
            }
            TokenKind::LParen => {
                self.consume();
                let inner = self.parse_expr()?;
                self.expect(TokenKind::RParen, "parenthesized expression")?;
                Ok(inner)
            }
            TokenKind::LBrace => self.parse_compound_statement(),
            _ => Err(self.syntax_error(
                format!("unexpected token {}; expected an expression", self.current()),
                "expression",
            )),
        }
    }

    /// `expr (',' expr)*`
    fn parse_argument_expr_list(&mut self) -> Result<Vec<Rc<Node>>> {
        let mut arguments = vec![self.parse_expr()?];
        while self.match_token(TokenKind::Comma) {
            arguments.push(self.parse_expr()?);
        }
        Ok(arguments)
    }

    /// A number or string literal.
    pub(crate) fn parse_constant(&mut self) -> Result<Rc<Node>> {
        match self.current_kind() {
            TokenKind::Number | TokenKind::String => {
                let token = self.current().clone();
                self.consume();
                Ok(Rc::new(Node::new(token)))
            }
            _ => Err(self.syntax_error(
                format!("unexpected token {}; expected a constant", self.current()),
                "constant",
            )),
        }
    }
}

//! The simulation-file grammar.
//!
//! A simulation file is a sequence of script blocks. Each block is an
//! optional `sN` identifier, an optional generation number or range,
//! an optional callback signature, and a mandatory compound statement.
//! The parse produces a synthetic file root whose children are synthetic
//! block nodes; inside each block node the children appear in that fixed
//! order, with the callback's argument identifiers as children of a
//! callback-info node anchored at the callback's name token.
//!
//! The identifier is taken as a block id only when it has the exact `sN`
//! shape (`s` followed by digits); anything else - `subpop`, `fitness` -
//! is left for the callback rule, which either recognises it or reports
//! the expected alternatives.

use std::rc::Rc;

use loci_lex::TokenKind;
use loci_util::ids::has_id_shape;
use loci_util::{strings, Result};

use crate::ast::Node;
use crate::Parser;

impl<'a> Parser<'a> {
    /// `Block* EOF`, rooted at a synthetic file node.
    pub fn parse_sim_file(&mut self) -> Result<Rc<Node>> {
        let mut root = Node::synthetic(TokenKind::ContextFile);

        while self.current_kind() != TokenKind::Eof {
            root.add_child(self.parse_sim_block()?);
        }
        self.expect(TokenKind::Eof, "simulation file")?;

        Ok(Rc::new(root))
    }

    /// One script block, as a synthetic block node.
    pub fn parse_sim_block(&mut self) -> Result<Rc<Node>> {
        let mut block = Node::synthetic(TokenKind::ContextBlock);

        // Optional block id. Only the exact sN shape is taken here; other
        // identifiers fall through to the callback rule below.
        if self.current_kind() == TokenKind::Identifier
            && has_id_shape(&self.current().text, 's')
        {
            let id = self.expect(TokenKind::Identifier, "script block")?;
            block.add_child(Rc::new(Node::new(id)));
        }

        // Optional generation number or range.
        if self.current_kind() == TokenKind::Number {
            block.add_child(self.parse_constant()?);

            if self.match_token(TokenKind::Colon) {
                if self.current_kind() == TokenKind::Number {
                    block.add_child(self.parse_constant()?);
                } else {
                    return Err(self.syntax_error(
                        format!(
                            "unexpected token {}; expected an integer for the generation range end",
                            self.current()
                        ),
                        "script block",
                    ));
                }
            }
        }

        // Optional callback signature.
        if self.current_kind() == TokenKind::Identifier {
            block.add_child(self.parse_callback_info()?);
        }

        // Every block ends with a compound statement.
        block.add_child(self.parse_compound_statement()?);

        Ok(Rc::new(block))
    }

    /// The callback-info node: anchored at the callback's name token, with
    /// the argument identifiers as children.
    fn parse_callback_info(&mut self) -> Result<Rc<Node>> {
        let name = self.current().clone();
        let spelling = name.text.clone();

        match spelling.as_str() {
            strings::STR_INITIALIZE => {
                let mut info = Node::new(name);
                self.consume();
                self.expect(TokenKind::LParen, "initialize() callback")?;
                let close = self.expect(TokenKind::RParen, "initialize() callback")?;
                info.extend_span(close.span);
                Ok(Rc::new(info))
            }

            strings::STR_FITNESS => {
                let mut info = Node::new(name);
                self.consume();
                self.expect(TokenKind::LParen, "fitness() callback")?;

                // The mutation type id is required, but its absence is a
                // shape violation reported at block construction, where the
                // error can point at the callback's name token.
                if self.current_kind() == TokenKind::Identifier {
                    let mutation_type = self.expect(TokenKind::Identifier, "fitness() callback")?;
                    info.add_child(Rc::new(Node::new(mutation_type)));

                    // optional subpopulation id
                    if self.match_token(TokenKind::Comma) {
                        if self.current_kind() == TokenKind::Identifier {
                            let subpop =
                                self.expect(TokenKind::Identifier, "fitness() callback")?;
                            info.add_child(Rc::new(Node::new(subpop)));
                        } else {
                            return Err(self.syntax_error(
                                format!(
                                    "unexpected token {}; subpopulation id expected",
                                    self.current()
                                ),
                                "fitness() callback",
                            ));
                        }
                    }
                }

                let close = self.expect(TokenKind::RParen, "fitness() callback")?;
                info.extend_span(close.span);
                Ok(Rc::new(info))
            }

            strings::STR_MATE_CHOICE | strings::STR_MODIFY_CHILD => {
                let context = if spelling == strings::STR_MATE_CHOICE {
                    "mateChoice() callback"
                } else {
                    "modifyChild() callback"
                };
                let mut info = Node::new(name);
                self.consume();
                self.expect(TokenKind::LParen, context)?;

                // optional subpopulation id
                if self.current_kind() == TokenKind::Identifier {
                    let subpop = self.expect(TokenKind::Identifier, context)?;
                    info.add_child(Rc::new(Node::new(subpop)));
                }

                let close = self.expect(TokenKind::RParen, context)?;
                info.extend_span(close.span);
                Ok(Rc::new(info))
            }

            _ => Err(self.syntax_error(
                format!(
                    "unexpected identifier {}; expected a callback declaration (initialize, fitness, mateChoice, or modifyChild) or a compound statement",
                    self.current()
                ),
                "script block",
            )),
        }
    }
}

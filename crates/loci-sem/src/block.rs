//! Script-block construction.
//!
//! A [`ScriptBlock`] is the semantic object behind one top-level unit of a
//! simulation file: its kind, generation range, id, callback parameters,
//! the compound-statement subtree, and the conservative symbol-use summary.
//!
//! Blocks are built along two paths. [`ScriptBlock::from_node`] consumes
//! the children of a parsed block node in their fixed order, borrowing the
//! subtree (via `Rc`) from the script that owns the file tree - that script
//! must outlive the block's use of it. [`ScriptBlock::from_source`] lexes
//! and parses its own text with caller-supplied id, kind, and range, and
//! owns the resulting script. A block is never both.
//!
//! Every validation failure is positioned and fail-fast; no partial block
//! is ever returned.

use std::fmt;
use std::rc::Rc;

use loci_lex::{Token, TokenKind};
use loci_par::{Node, Script};
use loci_util::diagnostic;
use loci_util::ids::{extract_id_from_prefix, is_id_with_prefix};
use loci_util::{
    integer_for_string, strings, Generation, ObjectId, Result, ScriptError, Span,
    MAX_GENERATION,
};

use crate::scan::SymbolUses;

/// What a script block is: an event, or one of the named callback kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockKind {
    Event,
    Initialize,
    Fitness,
    MateChoice,
    ModifyChild,
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BlockKind::Event => strings::STR_EVENT,
            BlockKind::Initialize => strings::STR_INITIALIZE,
            BlockKind::Fitness => strings::STR_FITNESS,
            BlockKind::MateChoice => strings::STR_MATE_CHOICE,
            BlockKind::ModifyChild => strings::STR_MODIFY_CHILD,
        };
        f.write_str(name)
    }
}

/// One top-level unit of a simulation: generation-scoped code tagged as an
/// event or as a callback.
#[derive(Debug)]
pub struct ScriptBlock {
    /// The block's `sN` id; `None` for anonymous blocks.
    block_id: Option<ObjectId>,

    kind: BlockKind,

    /// First generation the block is eligible to run (inclusive).
    start_generation: Generation,
    /// Last generation the block is eligible to run (inclusive).
    end_generation: Generation,

    /// Required for `fitness` callbacks.
    mutation_type_id: Option<ObjectId>,
    /// Optional for `fitness`, `mateChoice`, and `modifyChild` callbacks.
    subpopulation_id: Option<ObjectId>,

    /// The block's code. Shared with the owning script's tree, or with
    /// `script` below when the block was built from source.
    compound_statement: Rc<Node>,

    /// The callback's name token, kept for diagnostics.
    identifier_token: Option<Token>,

    /// Conservative free-symbol summary.
    uses: SymbolUses,

    /// Owned script when built from source; `None` for tree-built blocks.
    script: Option<Script>,

    /// User-settable: nonzero means the block runs. The evaluator may zero
    /// it mid-generation.
    active: i64,
    /// User-settable tag, 0 by default.
    tag_value: i64,
}

impl ScriptBlock {
    /// Build a block from a parsed block node (fixed child order: optional
    /// id, optional start, optional end, optional callback-info, compound
    /// statement). The subtree is shared, not copied; the script that owns
    /// it must stay alive for as long as the block is used.
    pub fn from_node(block_node: &Rc<Node>) -> Result<ScriptBlock> {
        match Self::build_from_node(block_node) {
            Ok(mut block) => {
                block.rescan_symbols();
                diagnostic::clear_error_span();
                Ok(block)
            }
            Err(err) => Err(diagnostic::publish(err)),
        }
    }

    /// Build a block from its own source text with caller-supplied id,
    /// kind, and range. The text must parse to exactly one compound
    /// statement; the block owns the resulting script.
    pub fn from_source(
        block_id: Option<ObjectId>,
        source: &str,
        kind: BlockKind,
        start_generation: Generation,
        end_generation: Generation,
    ) -> Result<ScriptBlock> {
        match Self::build_from_source(block_id, source, kind, start_generation, end_generation) {
            Ok(mut block) => {
                block.rescan_symbols();
                diagnostic::clear_error_span();
                Ok(block)
            }
            Err(err) => Err(diagnostic::publish(err)),
        }
    }

    fn build_from_node(block_node: &Rc<Node>) -> Result<ScriptBlock> {
        if block_node.kind() != TokenKind::ContextBlock {
            return Err(ScriptError::Shape {
                message: "expected a script block node".to_string(),
                span: block_node.span(),
            });
        }

        let children = block_node.children();
        let mut index = 0;

        // optional script id; an identifier is taken as an id here exactly
        // when it follows the sN convention, as in the parse code
        let mut block_id = None;
        if let Some(child) = children.get(index) {
            let token = child.token();
            if token.kind == TokenKind::Identifier && is_id_with_prefix(&token.text, 's') {
                block_id = Some(extract_id_from_prefix(&token.text, 's', token.span)?);
                index += 1;
            }
        }

        // optional start generation
        let mut explicit_range = false;
        let mut start_generation: Generation = 1;
        let mut end_generation: Generation = MAX_GENERATION;
        if let Some(child) = children.get(index) {
            let token = child.token();
            if token.kind == TokenKind::Number {
                let start = integer_for_string(&token.text, token.span)?;
                if !(1..=MAX_GENERATION).contains(&start) {
                    return Err(ScriptError::Range {
                        message: format!(
                            "the start generation {} is out of range",
                            token.text
                        ),
                        span: token.span,
                    });
                }
                start_generation = start;
                // with only a start given, the end matches the start
                end_generation = start;
                explicit_range = true;
                index += 1;
            }
        }

        // optional end generation
        if let Some(child) = children.get(index) {
            let token = child.token();
            if token.kind == TokenKind::Number {
                let end = integer_for_string(&token.text, token.span)?;
                if !(1..=MAX_GENERATION).contains(&end) {
                    return Err(ScriptError::Range {
                        message: format!("the end generation {} is out of range", token.text),
                        span: token.span,
                    });
                }
                if end < start_generation {
                    return Err(ScriptError::Range {
                        message: format!(
                            "the end generation {} is less than the start generation",
                            token.text
                        ),
                        span: token.span,
                    });
                }
                end_generation = end;
                index += 1;
            }
        }

        // optional callback-info node
        let mut kind = BlockKind::Event;
        let mut identifier_token = None;
        let mut mutation_type_id = None;
        let mut subpopulation_id = None;
        if let Some(child) = children.get(index) {
            let token = child.token();
            if token.kind != TokenKind::LBrace {
                identifier_token = Some(token.clone());
                let callback_arguments = child.children();
                let argument_count = callback_arguments.len();

                match (token.kind, token.text.as_str()) {
                    (TokenKind::Identifier, strings::STR_INITIALIZE) => {
                        if argument_count != 0 {
                            return Err(ScriptError::Shape {
                                message: "initialize() callback needs 0 parameters".to_string(),
                                span: token.span,
                            });
                        }
                        if explicit_range {
                            return Err(ScriptError::Shape {
                                message:
                                    "a generation range cannot be specified for an initialize() callback"
                                        .to_string(),
                                span: token.span,
                            });
                        }
                        start_generation = 0;
                        end_generation = 0;
                        kind = BlockKind::Initialize;
                    }

                    (TokenKind::Identifier, strings::STR_FITNESS) => {
                        if !(1..=2).contains(&argument_count) {
                            return Err(ScriptError::Shape {
                                message: "fitness() callback needs 1 or 2 parameters"
                                    .to_string(),
                                span: token.span,
                            });
                        }
                        let mutation_type_token = callback_arguments[0].token();
                        mutation_type_id = Some(extract_id_from_prefix(
                            &mutation_type_token.text,
                            'm',
                            mutation_type_token.span,
                        )?);
                        if argument_count == 2 {
                            let subpop_token = callback_arguments[1].token();
                            subpopulation_id = Some(extract_id_from_prefix(
                                &subpop_token.text,
                                'p',
                                subpop_token.span,
                            )?);
                        }
                        kind = BlockKind::Fitness;
                    }

                    (TokenKind::Identifier, strings::STR_MATE_CHOICE)
                    | (TokenKind::Identifier, strings::STR_MODIFY_CHILD) => {
                        let name = &token.text;
                        if argument_count > 1 {
                            return Err(ScriptError::Shape {
                                message: format!("{name}() callback needs 0 or 1 parameters"),
                                span: token.span,
                            });
                        }
                        if argument_count == 1 {
                            let subpop_token = callback_arguments[0].token();
                            subpopulation_id = Some(extract_id_from_prefix(
                                &subpop_token.text,
                                'p',
                                subpop_token.span,
                            )?);
                        }
                        kind = if token.text == strings::STR_MATE_CHOICE {
                            BlockKind::MateChoice
                        } else {
                            BlockKind::ModifyChild
                        };
                    }

                    _ => {
                        return Err(ScriptError::Shape {
                            message: "unknown callback type".to_string(),
                            span: token.span,
                        });
                    }
                }

                index += 1;
            }
        }

        // the compound statement must be present
        let compound_statement = match children.get(index) {
            Some(child) if child.kind() == TokenKind::LBrace => {
                index += 1;
                Rc::clone(child)
            }
            _ => {
                let blame = if index > 0 {
                    children[index - 1].token().span
                } else {
                    block_node.span()
                };
                return Err(ScriptError::Shape {
                    message: "no compound statement found for script block".to_string(),
                    span: blame,
                });
            }
        };

        if index != children.len() {
            return Err(ScriptError::Shape {
                message: "unexpected node in script block".to_string(),
                span: children[index].token().span,
            });
        }

        Ok(ScriptBlock {
            block_id,
            kind,
            start_generation,
            end_generation,
            mutation_type_id,
            subpopulation_id,
            compound_statement,
            identifier_token,
            uses: SymbolUses::new(),
            script: None,
            active: -1,
            tag_value: 0,
        })
    }

    fn build_from_source(
        block_id: Option<ObjectId>,
        source: &str,
        kind: BlockKind,
        start_generation: Generation,
        end_generation: Generation,
    ) -> Result<ScriptBlock> {
        if kind == BlockKind::Initialize {
            // initialize blocks run only at generation 0, on this path too
            if start_generation != 0 || end_generation != 0 {
                return Err(ScriptError::Shape {
                    message:
                        "a generation range cannot be specified for an initialize() callback"
                            .to_string(),
                    span: Span::point(0),
                });
            }
        } else if !(1..=MAX_GENERATION).contains(&start_generation)
            || end_generation > MAX_GENERATION
            || start_generation > end_generation
        {
            return Err(ScriptError::Range {
                message: format!(
                    "the generation range {start_generation}:{end_generation} is out of range"
                ),
                span: Span::point(0),
            });
        }

        let mut script = Script::new(source, 0);
        script.tokenize(false)?;
        script.parse_interpreter_block_to_ast()?;

        let root = script.ast().cloned().ok_or_else(|| ScriptError::Shape {
            message: "script blocks must be compound statements".to_string(),
            span: Span::new(0, source.len()),
        })?;

        let compound_statement = match (root.children().len(), root.child(0)) {
            (1, Some(only)) if only.kind() == TokenKind::LBrace => Rc::clone(only),
            _ => {
                return Err(ScriptError::Shape {
                    message: "script blocks must be compound statements".to_string(),
                    span: Span::new(0, source.len()),
                });
            }
        };

        Ok(ScriptBlock {
            block_id,
            kind,
            start_generation,
            end_generation,
            mutation_type_id: None,
            subpopulation_id: None,
            compound_statement,
            identifier_token: None,
            uses: SymbolUses::new(),
            script: Some(script),
            active: -1,
            tag_value: 0,
        })
    }

    /// The block's `sN` id, or `None` for anonymous blocks.
    #[inline]
    pub fn block_id(&self) -> Option<ObjectId> {
        self.block_id
    }

    #[inline]
    pub fn kind(&self) -> BlockKind {
        self.kind
    }

    #[inline]
    pub fn start_generation(&self) -> Generation {
        self.start_generation
    }

    #[inline]
    pub fn end_generation(&self) -> Generation {
        self.end_generation
    }

    /// The fitness callback's mutation type id.
    #[inline]
    pub fn mutation_type_id(&self) -> Option<ObjectId> {
        self.mutation_type_id
    }

    /// The callback's subpopulation id, when one was given.
    #[inline]
    pub fn subpopulation_id(&self) -> Option<ObjectId> {
        self.subpopulation_id
    }

    /// The block's code.
    #[inline]
    pub fn compound_statement(&self) -> &Rc<Node> {
        &self.compound_statement
    }

    /// The callback's name token, for diagnostics.
    #[inline]
    pub fn identifier_token(&self) -> Option<&Token> {
        self.identifier_token.as_ref()
    }

    /// The conservative free-symbol summary.
    #[inline]
    pub fn uses(&self) -> &SymbolUses {
        &self.uses
    }

    /// Recompute the symbol summary: the block's code plus its callback
    /// parameters (which are reconstructed from the stored ids, so the
    /// result is identical to the construction-time scan).
    pub fn rescan_symbols(&mut self) {
        let mut uses = SymbolUses::new();
        uses.observe_tree(&self.compound_statement);
        if let Some(id) = self.mutation_type_id {
            uses.observe_identifier(&loci_util::ids::format_id_with_prefix('m', id));
        }
        if let Some(id) = self.subpopulation_id {
            uses.observe_identifier(&loci_util::ids::format_id_with_prefix('p', id));
        }
        uses.apply_wildcard();
        self.uses = uses;
    }

    /// The block's source text, available when the block owns its script.
    pub fn source_text(&self) -> Option<&str> {
        let script = self.script.as_ref()?;
        let span = self.compound_statement.span();
        script.text().get(span.start..span.end)
    }

    /// Nonzero while the block is eligible to run.
    #[inline]
    pub fn active(&self) -> i64 {
        self.active
    }

    pub fn set_active(&mut self, active: i64) {
        self.active = active;
    }

    /// The user tag.
    #[inline]
    pub fn tag_value(&self) -> i64 {
        self.tag_value
    }

    pub fn set_tag_value(&mut self, tag_value: i64) {
        self.tag_value = tag_value;
    }

    /// The block's `sN` name, when it has an id.
    pub fn block_name(&self) -> Option<String> {
        self.block_id
            .map(|id| loci_util::ids::format_id_with_prefix('s', id))
    }
}

impl fmt::Display for ScriptBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<")?;
        if self.start_generation > 0 {
            write!(f, "{}", self.start_generation)?;
            if self.end_generation != self.start_generation {
                write!(f, ":{}", self.end_generation)?;
            }
            write!(f, " : ")?;
        }
        write!(f, "{}>", self.kind)
    }
}

/// Construct every block of a parsed simulation file, in file order.
///
/// The script must have been parsed with the simulation-file entry point;
/// its tree stays shared with the returned blocks.
pub fn blocks_from_file(script: &Script) -> Result<Vec<ScriptBlock>> {
    let root = script.ast().ok_or_else(|| ScriptError::Shape {
        message: "the script has not been parsed".to_string(),
        span: Span::point(script.start_character_index()),
    })?;

    log::debug!("constructing {} script block(s)", root.children().len());

    let mut blocks = Vec::with_capacity(root.children().len());
    for child in root.children() {
        blocks.push(ScriptBlock::from_node(child)?);
    }
    Ok(blocks)
}

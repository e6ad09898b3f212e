//! AST node and tree utilities.
//!
//! A node owns one anchor token and an ordered list of children; the
//! anchor's kind, together with the arity and order of the children,
//! carries the node's meaning. There is no separate enum of node shapes -
//! a `'+'`-anchored node with two children *is* the addition.
//!
//! Virtual anchors ([`TokenKind::ContextFile`], [`TokenKind::ContextBlock`])
//! root synthetic groupings where no single source token represents the
//! construct; they have no source characters of their own and take their
//! span from their children.
//!
//! Trees are shared immutably through [`Rc`], so a script block can hold
//! its compound-statement subtree while the owning script keeps the root.
//! Nodes are only mutated while the parser is still assembling them.

use std::cell::OnceCell;
use std::fmt::{self, Write};
use std::rc::Rc;

use loci_lex::{Token, TokenKind};
use loci_util::{integer_for_string, Result, ScriptError, Span};

/// A literal constant folded out of the tree ahead of evaluation.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Integer(i64),
    Float(f64),
    String(String),
}

/// One node of the syntax tree.
pub struct Node {
    /// Anchor token. Virtual nodes own a synthetic anchor with no source
    /// characters behind it.
    token: Token,
    /// Source range covered by this node and its children.
    span: Span,
    /// Ordered children; order is semantically significant (operand order,
    /// the fixed preamble order of a script block).
    children: Vec<Rc<Node>>,
    /// Pre-evaluated constant, populated by [`optimize_tree`].
    cached_value: OnceCell<Value>,
    /// True for synthetic grouping nodes.
    is_virtual: bool,
}

impl Node {
    /// Node anchored at a real source token.
    pub fn new(token: Token) -> Self {
        let span = token.span;
        Self {
            token,
            span,
            children: Vec::new(),
            cached_value: OnceCell::new(),
            is_virtual: false,
        }
    }

    /// Synthetic grouping node; `kind` must be one of the virtual kinds.
    pub fn synthetic(kind: TokenKind) -> Self {
        debug_assert!(kind.is_virtual(), "synthetic nodes need a virtual kind");
        Self {
            token: Token::new(kind, "", Span::point(0)),
            span: Span::point(0),
            children: Vec::new(),
            cached_value: OnceCell::new(),
            is_virtual: true,
        }
    }

    /// Append a child, growing this node's span to cover it.
    pub fn add_child(&mut self, child: Rc<Node>) {
        if self.is_virtual && self.children.is_empty() {
            // a virtual anchor has no span of its own
            self.span = child.span;
        } else {
            self.span = self.span.merge(child.span);
        }
        self.children.push(child);
    }

    /// Grow the span to cover `span` (e.g. a compound statement's closing
    /// brace, which is not kept as a child).
    pub fn extend_span(&mut self, span: Span) {
        self.span = self.span.merge(span);
    }

    /// The anchor token.
    #[inline]
    pub fn token(&self) -> &Token {
        &self.token
    }

    /// The anchor token's kind.
    #[inline]
    pub fn kind(&self) -> TokenKind {
        self.token.kind
    }

    /// Source range covered by the node.
    #[inline]
    pub fn span(&self) -> Span {
        self.span
    }

    /// The ordered children.
    #[inline]
    pub fn children(&self) -> &[Rc<Node>] {
        &self.children
    }

    /// The `index`th child, if present.
    #[inline]
    pub fn child(&self, index: usize) -> Option<&Rc<Node>> {
        self.children.get(index)
    }

    /// True for synthetic grouping nodes.
    #[inline]
    pub fn is_virtual(&self) -> bool {
        self.is_virtual
    }

    /// The folded constant, when [`optimize_tree`] has produced one.
    #[inline]
    pub fn cached_value(&self) -> Option<&Value> {
        self.cached_value.get()
    }

    /// Render the subtree, one node per line, children indented.
    fn write_tree(&self, out: &mut dyn Write, depth: usize) -> fmt::Result {
        for _ in 0..depth {
            out.write_str("  ")?;
        }
        writeln!(out, "{} {}", self.token, self.span)?;
        for child in &self.children {
            child.write_tree(out, depth + 1)?;
        }
        Ok(())
    }

    /// The subtree rendered as an indented listing with positions.
    pub fn tree_string(&self) -> String {
        let mut out = String::new();
        let _ = self.write_tree(&mut out, 0);
        out
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("token", &self.token)
            .field("span", &self.span)
            .field("children", &self.children.len())
            .field("is_virtual", &self.is_virtual)
            .finish()
    }
}

/// Fold constant sub-expressions, caching each literal's value on its node
/// so evaluation can short-circuit.
///
/// Post-order over the whole tree. Number literals become
/// [`Value::Integer`] or [`Value::Float`] (a 64-bit overflow here is a
/// positioned range error); string literals become [`Value::String`].
/// Idempotent: already-cached nodes are left alone.
pub fn optimize_tree(node: &Node) -> Result<()> {
    for child in node.children() {
        optimize_tree(child)?;
    }

    if node.cached_value().is_some() {
        return Ok(());
    }

    match node.kind() {
        TokenKind::Number => {
            let text = &node.token().text;
            let value = if text.contains(['.', 'e', 'E']) {
                let parsed = text.parse::<f64>().map_err(|_| ScriptError::Range {
                    message: format!("the number literal \"{text}\" could not be read"),
                    span: node.token().span,
                })?;
                Value::Float(parsed)
            } else {
                Value::Integer(integer_for_string(text, node.token().span)?)
            };
            let _ = node.cached_value.set(value);
        }
        TokenKind::String => {
            let _ = node
                .cached_value
                .set(Value::String(node.token().text.clone()));
        }
        _ => {}
    }

    Ok(())
}

//! The closed error set for the script front-end.
//!
//! Every failure in the pipeline is one of five kinds. All but [`Config`]
//! carry a [`Span`] in the coordinates of the enclosing source buffer, per
//! the diagnostics contract: a human-readable message plus a highlightable
//! `[start, end)` range.
//!
//! Parsing is fail-fast: the first error aborts the parse, the partially
//! built tree is dropped, and the error's span is published to the
//! process-wide highlight slots (see [`crate::diagnostic`]) before the
//! error value reaches the caller.
//!
//! [`Config`]: ScriptError::Config

use thiserror::Error;

use crate::Span;

/// Any error the script front-end can produce.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// Bad or unknown character, unterminated string or comment.
    #[error("lexical error at {span}: {message}")]
    Lexical {
        /// Human-readable description of the failure.
        message: String,
        /// The offending character range.
        span: Span,
    },

    /// Unexpected token for the current grammar rule.
    ///
    /// `context` is the label supplied by the caller of the parser's
    /// `expect`, e.g. `"fitness() callback"`, so the message names the
    /// construct being parsed rather than the internal rule.
    #[error("syntax error in {context} at {span}: {message}")]
    Syntax {
        message: String,
        context: String,
        span: Span,
    },

    /// Numeric literal or entity id outside its documented range.
    #[error("range error at {span}: {message}")]
    Range { message: String, span: Span },

    /// Structural violation at script-block construction.
    #[error("malformed script block at {span}: {message}")]
    Shape { message: String, span: Span },

    /// Registry double-registration or other startup misuse.
    #[error("configuration error: {message}")]
    Config { message: String },
}

impl ScriptError {
    /// The source range to highlight, when the error has one.
    pub fn span(&self) -> Option<Span> {
        match self {
            ScriptError::Lexical { span, .. }
            | ScriptError::Syntax { span, .. }
            | ScriptError::Range { span, .. }
            | ScriptError::Shape { span, .. } => Some(*span),
            ScriptError::Config { .. } => None,
        }
    }
}

/// Result alias used throughout the front-end.
pub type Result<T> = std::result::Result<T, ScriptError>;

//! loci-util - Foundation Types for the Script Front-End
//!
//! ============================================================================
//! OVERVIEW
//! ============================================================================
//!
//! Shared leaf types used by every phase of the loci script front-end:
//!
//! - [`Span`] - half-open `[start, end)` source ranges
//! - [`ScriptError`] - the closed error set (lexical, syntax, range, shape,
//!   config), all positioned in enclosing-buffer coordinates
//! - [`diagnostic`] - the published parse-error position pair read by
//!   editor shells to highlight the failing region
//! - [`registry`] - the process-wide string-to-ID table, populated once at
//!   startup and read without blocking afterwards
//! - [`strings`] - the canonical spellings the pipeline treats specially
//! - [`ids`] - prefix-identifier helpers (`s1`, `m2`, `p3`, `g4`)
//!
//! Everything here is deliberately independent of the lexer and parser so
//! that the token stream, the AST, and script-block construction can share
//! one vocabulary of positions and failures.
//!
//! ============================================================================
//! LIMITS
//! ============================================================================
//!
//! Generation numbers and entity ids are plain signed 64-bit integers with
//! documented inclusive ranges: generations live in
//! `1..=`[`MAX_GENERATION`] (0 is reserved for `initialize` callbacks) and
//! ids in `0..=`[`MAX_ID_VALUE`]. Overflow at tokenisation or at block
//! construction is a positioned [`ScriptError::Range`].

pub mod diagnostic;
pub mod ids;
pub mod registry;
pub mod strings;

mod error;
mod span;

pub use error::{Result, ScriptError};
pub use registry::{GlobalStringId, StringRegistry, STRING_REGISTRY};
pub use span::Span;

/// A simulation tick number.
pub type Generation = i64;

/// An entity instance id (script block, mutation type, subpopulation,
/// genomic element type).
pub type ObjectId = i64;

/// Largest legal generation number.
pub const MAX_GENERATION: Generation = 1_000_000;

/// Largest legal entity instance id.
pub const MAX_ID_VALUE: ObjectId = 1_000_000;

/// Parse a number literal's text as a signed 64-bit integer.
///
/// Used wherever the grammar requires an integer (generation bounds,
/// constant folding). Fails with a [`ScriptError::Range`] positioned at
/// `blame` when the text is not an integer or does not fit in 64 bits.
///
/// # Examples
///
/// ```
/// use loci_util::{integer_for_string, Span};
///
/// assert_eq!(integer_for_string("200", Span::new(0, 3)).unwrap(), 200);
/// assert!(integer_for_string("1.5", Span::new(0, 3)).is_err());
/// assert!(integer_for_string("99999999999999999999", Span::new(0, 20)).is_err());
/// ```
pub fn integer_for_string(text: &str, blame: Span) -> Result<i64> {
    text.parse::<i64>().map_err(|_| ScriptError::Range {
        message: format!("the number literal \"{text}\" could not be read as an integer"),
        span: blame,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_for_string() {
        assert_eq!(integer_for_string("0", Span::new(0, 1)).unwrap(), 0);
        assert_eq!(integer_for_string("1000000", Span::new(0, 7)).unwrap(), 1_000_000);
    }

    #[test]
    fn test_integer_for_string_rejects_floats() {
        let err = integer_for_string("1e-7", Span::new(5, 9)).unwrap_err();
        match err {
            ScriptError::Range { span, .. } => assert_eq!(span, Span::new(5, 9)),
            other => panic!("expected Range, got {other:?}"),
        }
    }
}

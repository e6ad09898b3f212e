//! Published parse-error positions.
//!
//! Editor shells highlight the script region that caused the last failure.
//! The contract is a pair of process-wide integers holding the failing
//! token's `[start, end)` range, or −1/−1 when no failure is pending.
//! They are written from the failing-parse path only, immediately before
//! the error value is returned, and reset when a parse succeeds.
//!
//! The front-end is single-threaded by design, so there is exactly one
//! writer at a time; the atomics exist to make the process-wide slots safe
//! to expose, not to coordinate concurrent parsers.

use std::sync::atomic::{AtomicI64, Ordering};

use crate::{Result, ScriptError, Span};

static PARSE_ERROR_START: AtomicI64 = AtomicI64::new(-1);
static PARSE_ERROR_END: AtomicI64 = AtomicI64::new(-1);

/// Publish a span to the highlight slots.
pub fn set_error_span(span: Span) {
    PARSE_ERROR_START.store(span.start as i64, Ordering::Relaxed);
    PARSE_ERROR_END.store(span.end as i64, Ordering::Relaxed);
}

/// Reset the highlight slots to the no-error state (−1/−1).
pub fn clear_error_span() {
    PARSE_ERROR_START.store(-1, Ordering::Relaxed);
    PARSE_ERROR_END.store(-1, Ordering::Relaxed);
}

/// Read the currently published `(start, end)` pair; −1/−1 means none.
pub fn error_span() -> (i64, i64) {
    (
        PARSE_ERROR_START.load(Ordering::Relaxed),
        PARSE_ERROR_END.load(Ordering::Relaxed),
    )
}

/// Fail with `err`, publishing its span (if any) first.
///
/// Every raise site in the lexer, parser, and block construction funnels
/// through here so the highlight contract cannot be missed.
///
/// # Examples
///
/// ```
/// use loci_util::{diagnostic, ScriptError, Span};
///
/// let result: loci_util::Result<()> = diagnostic::raise(ScriptError::Range {
///     message: "the start generation 0 is out of range".to_string(),
///     span: Span::new(3, 4),
/// });
/// assert!(result.is_err());
/// assert_eq!(diagnostic::error_span(), (3, 4));
/// ```
pub fn raise<T>(err: ScriptError) -> Result<T> {
    Err(publish(err))
}

/// Publish `err`'s span (if any) and hand the error back.
///
/// Shaped for `map_err` at the public entry points of the lexer, the
/// parsers, and block construction.
pub fn publish(err: ScriptError) -> ScriptError {
    if let Some(span) = err.span() {
        set_error_span(span);
    }
    err
}

#[cfg(test)]
mod tests {
    use super::*;

    // The slots are process-wide, so a single test exercises the full
    // lifecycle rather than racing sibling tests for them.
    #[test]
    fn test_publish_lifecycle() {
        clear_error_span();
        assert_eq!(error_span(), (-1, -1));

        let err = ScriptError::Lexical {
            message: "bad character".to_string(),
            span: Span::new(11, 12),
        };
        let result: Result<()> = raise(err);
        assert!(result.is_err());
        assert_eq!(error_span(), (11, 12));

        // Config errors have no span and leave the slots untouched.
        let _ = publish(ScriptError::Config {
            message: "already registered".to_string(),
        });
        assert_eq!(error_span(), (11, 12));

        clear_error_span();
        assert_eq!(error_span(), (-1, -1));
    }
}

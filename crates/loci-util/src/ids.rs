//! Prefix-identifier helpers.
//!
//! Simulation entities are named by prefix identifiers: a single lowercase
//! letter selecting the entity class followed by a decimal instance id -
//! `s1` (script block), `m2` (mutation type), `p3` (subpopulation), `g4`
//! (genomic element type).
//!
//! The check/extract split is deliberately asymmetric. [`is_id_with_prefix`]
//! is loose (first character only) so that anything that *looks like* it
//! was meant as an id enters the extraction path, where
//! [`extract_id_from_prefix`] validates strictly and reports the precise
//! failure, instead of the malformed id being silently reinterpreted as an
//! ordinary identifier. The extended parser's block-id rule uses the strict
//! [`has_id_shape`] instead, so that identifiers such as `subpop` fall
//! through to the callback rule.

use crate::{ObjectId, Result, ScriptError, Span, MAX_ID_VALUE};

/// Loose gate: true iff `string` begins with `prefix`.
///
/// Deliberately accepts malformed ids such as `s` or `sfoo`; callers follow
/// up with [`extract_id_from_prefix`], which rejects them with a precise
/// message.
#[inline]
pub fn is_id_with_prefix(string: &str, prefix: char) -> bool {
    string.chars().next() == Some(prefix)
}

/// Strict syntactic test: `prefix` followed by one or more decimal digits.
///
/// # Examples
///
/// ```
/// use loci_util::ids::has_id_shape;
///
/// assert!(has_id_shape("s1", 's'));
/// assert!(has_id_shape("s007", 's'));
/// assert!(!has_id_shape("s", 's'));
/// assert!(!has_id_shape("subpop", 's'));
/// assert!(!has_id_shape("s1x", 's'));
/// ```
pub fn has_id_shape(string: &str, prefix: char) -> bool {
    if !is_id_with_prefix(string, prefix) {
        return false;
    }
    let suffix = &string[prefix.len_utf8()..];
    !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit())
}

/// Parse the instance id out of a prefix identifier.
///
/// Fails if the prefix does not match, the digit suffix is empty or
/// contains a non-digit, or the value is outside `[0, MAX_ID_VALUE]`.
/// Errors are positioned at `blame`, the span of the identifier's token.
pub fn extract_id_from_prefix(string: &str, prefix: char, blame: Span) -> Result<ObjectId> {
    if !is_id_with_prefix(string, prefix) {
        return Err(ScriptError::Syntax {
            message: format!("an identifier prefix \"{prefix}\" was expected"),
            context: "entity id".to_string(),
            span: blame,
        });
    }

    let suffix = &string[prefix.len_utf8()..];
    if suffix.is_empty() {
        return Err(ScriptError::Syntax {
            message: format!("an integer id was expected after the \"{prefix}\" prefix"),
            context: "entity id".to_string(),
            span: blame,
        });
    }
    if !suffix.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ScriptError::Syntax {
            message: format!(
                "the id after the \"{prefix}\" prefix must be a simple integer"
            ),
            context: "entity id".to_string(),
            span: blame,
        });
    }

    match suffix.parse::<ObjectId>() {
        Ok(id) if id <= MAX_ID_VALUE => Ok(id),
        _ => Err(ScriptError::Range {
            message: format!("the identifier {string} is out of range"),
            span: blame,
        }),
    }
}

/// Format an instance id as a prefix identifier; the left inverse of
/// [`extract_id_from_prefix`] for all in-range ids.
#[inline]
pub fn format_id_with_prefix(prefix: char, id: ObjectId) -> String {
    format!("{prefix}{id}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const BLAME: Span = Span { start: 0, end: 2 };

    #[test]
    fn test_loose_gate() {
        assert!(is_id_with_prefix("s1", 's'));
        assert!(is_id_with_prefix("s", 's'));
        assert!(is_id_with_prefix("subpop", 's'));
        assert!(!is_id_with_prefix("p1", 's'));
        assert!(!is_id_with_prefix("", 's'));
    }

    #[test]
    fn test_strict_shape() {
        assert!(has_id_shape("m1", 'm'));
        assert!(has_id_shape("p10", 'p'));
        assert!(!has_id_shape("mut", 'm'));
        assert!(!has_id_shape("m", 'm'));
        assert!(!has_id_shape("m1a", 'm'));
    }

    #[test]
    fn test_extract_valid() {
        assert_eq!(extract_id_from_prefix("s1", 's', BLAME).unwrap(), 1);
        assert_eq!(extract_id_from_prefix("p0", 'p', BLAME).unwrap(), 0);
        assert_eq!(
            extract_id_from_prefix("g007", 'g', BLAME).unwrap(),
            7,
            "leading zeros are legal"
        );
        assert_eq!(
            extract_id_from_prefix(&format!("m{MAX_ID_VALUE}"), 'm', BLAME).unwrap(),
            MAX_ID_VALUE
        );
    }

    #[test]
    fn test_extract_wrong_prefix() {
        let err = extract_id_from_prefix("p1", 's', BLAME).unwrap_err();
        assert!(matches!(err, ScriptError::Syntax { .. }));
    }

    #[test]
    fn test_extract_empty_suffix() {
        let err = extract_id_from_prefix("s", 's', BLAME).unwrap_err();
        assert!(matches!(err, ScriptError::Syntax { .. }));
    }

    #[test]
    fn test_extract_non_digit_suffix() {
        // "subpop" passes the loose gate but fails extraction with a
        // message naming the real problem.
        let err = extract_id_from_prefix("subpop", 's', BLAME).unwrap_err();
        match err {
            ScriptError::Syntax { message, span, .. } => {
                assert!(message.contains("simple integer"));
                assert_eq!(span, BLAME);
            }
            other => panic!("expected Syntax, got {other:?}"),
        }
    }

    #[test]
    fn test_extract_out_of_range() {
        let err = extract_id_from_prefix("s999999999999", 's', BLAME).unwrap_err();
        assert!(matches!(err, ScriptError::Range { .. }));

        let err =
            extract_id_from_prefix(&format!("s{}", MAX_ID_VALUE + 1), 's', BLAME).unwrap_err();
        assert!(matches!(err, ScriptError::Range { .. }));

        // Overflow past i64 must not panic.
        let err = extract_id_from_prefix("s99999999999999999999999", 's', BLAME).unwrap_err();
        assert!(matches!(err, ScriptError::Range { .. }));
    }

    proptest! {
        // extract is the left inverse of format for all valid ids.
        #[test]
        fn prop_extract_inverts_format(id in 0..=MAX_ID_VALUE, prefix in prop::sample::select(vec!['s', 'm', 'p', 'g'])) {
            let formatted = format_id_with_prefix(prefix, id);
            prop_assert!(has_id_shape(&formatted, prefix));
            prop_assert_eq!(extract_id_from_prefix(&formatted, prefix, BLAME).unwrap(), id);
        }
    }
}

//! Edge case tests for loci-lex

#[cfg(test)]
mod tests {
    use crate::{tokenize, Token, TokenKind};
    use proptest::prelude::*;

    fn lex_all(source: &str) -> Vec<Token> {
        let mut tokens = tokenize(source, 0, false).unwrap();
        tokens.pop(); // drop EOF
        tokens
    }

    // ==================== EDGE CASES ====================

    #[test]
    fn test_edge_whitespace_only() {
        assert!(lex_all(" \t\n\r  ").is_empty());
    }

    #[test]
    fn test_edge_single_char_ident() {
        let t = lex_all("s");
        assert_eq!(t[0].kind, TokenKind::Identifier);
        assert_eq!(t[0].text, "s");
    }

    #[test]
    fn test_edge_underscore_ident() {
        let t = lex_all("_x x_1 __");
        assert!(t.iter().all(|t| t.kind == TokenKind::Identifier));
    }

    #[test]
    fn test_edge_long_identifier() {
        let name = "a".repeat(10_000);
        let t = lex_all(&name);
        assert_eq!(t.len(), 1);
        assert_eq!(t[0].text, name);
        assert_eq!(t[0].span.len(), 10_000);
    }

    #[test]
    fn test_edge_keyword_prefix_idents() {
        // identifiers that merely start with a keyword stay identifiers
        let t = lex_all("iffy dowhile nextGen");
        assert!(t.iter().all(|t| t.kind == TokenKind::Identifier));
    }

    #[test]
    fn test_edge_adjacent_operators() {
        let t = lex_all("a<=b==c");
        let kinds: Vec<_> = t.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Identifier,
                TokenKind::LtEq,
                TokenKind::Identifier,
                TokenKind::Eq,
                TokenKind::Identifier,
            ]
        );
    }

    #[test]
    fn test_edge_empty_string_literal() {
        let t = lex_all("\"\"");
        assert_eq!(t[0].kind, TokenKind::String);
        assert_eq!(t[0].text, "");
        assert_eq!(t[0].span.len(), 2);
    }

    #[test]
    fn test_edge_string_with_other_quote() {
        let t = lex_all(r#""it's" '"ok"'"#);
        assert_eq!(t[0].text, "it's");
        assert_eq!(t[1].text, "\"ok\"");
    }

    #[test]
    fn test_edge_comment_to_eof_without_newline() {
        let t = lex_all("x // no newline");
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn test_edge_block_comment_with_stars() {
        let t = lex_all("a /* ** * // */ b");
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn test_edge_zero_and_leading_zeros() {
        let t = lex_all("0 007");
        assert_eq!(t[0].text, "0");
        assert_eq!(t[1].text, "007");
    }

    #[test]
    fn test_edge_huge_integer_lexes() {
        // overflow is detected where the value is needed, not at scan time
        let t = lex_all("999999999999999999999999999");
        assert_eq!(t[0].kind, TokenKind::Number);
    }

    #[test]
    fn test_edge_colon_range() {
        let kinds: Vec<_> = lex_all("100:200").iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![TokenKind::Number, TokenKind::Colon, TokenKind::Number]
        );
    }

    // ==================== PROPERTIES ====================

    proptest! {
        // Any tokenization that succeeds tiles the buffer exactly:
        // spans are in order, gap-free, and end at the EOF point span.
        #[test]
        fn prop_spans_tile_source(source in "[-+*/%^&|!<>=;:,.(){}\\[\\]a-zA-Z0-9_\"' \n\t]{0,60}") {
            if let Ok(tokens) = tokenize(&source, 0, true) {
                let mut expected_start = 0;
                for token in &tokens {
                    prop_assert_eq!(token.span.start, expected_start);
                    prop_assert!(token.span.start <= token.span.end);
                    expected_start = token.span.end;
                }
                prop_assert_eq!(expected_start, source.len());

                // exactly one EOF, and it is last
                let eof_count = tokens.iter().filter(|t| t.kind == TokenKind::Eof).count();
                prop_assert_eq!(eof_count, 1);
                prop_assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);

                // every token except strings reproduces its source slice
                for token in &tokens {
                    if token.kind != TokenKind::String && token.kind != TokenKind::Eof {
                        prop_assert_eq!(&source[token.span.start..token.span.end], &token.text);
                    }
                }
            }
        }

        // Lexing twice is deterministic.
        #[test]
        fn prop_deterministic(source in "[a-z0-9 ;{}()=+.]{0,40}") {
            let first = tokenize(&source, 0, false);
            let second = tokenize(&source, 0, false);
            match (first, second) {
                (Ok(a), Ok(b)) => prop_assert_eq!(a, b),
                (Err(_), Err(_)) => {}
                _ => prop_assert!(false, "lexing was not deterministic"),
            }
        }
    }
}

//! Edge case tests for loci-par

#[cfg(test)]
mod tests {
    use crate::test_util::{assert_span_containment, lex};
    use crate::{Parser, Script};
    use loci_lex::TokenKind;
    use loci_util::{ScriptError, Span};

    // ==================== EDGE CASES ====================

    #[test]
    fn test_edge_empty_file() {
        let tokens = lex("");
        let mut parser = Parser::new(&tokens);
        let root = parser.parse_sim_file().unwrap();
        assert!(root.children().is_empty());
    }

    #[test]
    fn test_edge_empty_interpreter_block() {
        let tokens = lex("  // nothing\n");
        let mut parser = Parser::new(&tokens);
        let root = parser.parse_interpreter_block().unwrap();
        assert!(root.children().is_empty());
    }

    #[test]
    fn test_edge_deeply_nested_parens() {
        let source = format!("{}x{};", "(".repeat(40), ")".repeat(40));
        let tokens = lex(&source);
        let mut parser = Parser::new(&tokens);
        let root = parser.parse_interpreter_block().unwrap();
        assert_eq!(root.child(0).unwrap().token().text, "x");
    }

    #[test]
    fn test_edge_deeply_nested_blocks() {
        let source = format!("{}{}", "{".repeat(30), "}".repeat(30));
        let tokens = lex(&source);
        let mut parser = Parser::new(&tokens);
        let root = parser.parse_interpreter_block().unwrap();
        assert_span_containment(&root);
    }

    #[test]
    fn test_edge_block_as_primary() {
        // a block is a legal primary expression
        let tokens = lex("x = { 1; };");
        let mut parser = Parser::new(&tokens);
        let root = parser.parse_interpreter_block().unwrap();
        let assign = root.child(0).unwrap();
        assert_eq!(assign.child(1).unwrap().kind(), TokenKind::LBrace);
    }

    #[test]
    fn test_edge_for_over_call() {
        let tokens = lex("for (g in sim.subpopulations.genomes) count = count + 1;");
        let mut parser = Parser::new(&tokens);
        let root = parser.parse_interpreter_block().unwrap();
        assert_span_containment(&root);
    }

    #[test]
    fn test_edge_keyword_as_identifier_fails() {
        let tokens = lex("for = 1;");
        let mut parser = Parser::new(&tokens);
        assert!(parser.parse_interpreter_block().is_err());
    }

    #[test]
    fn test_edge_stray_rbrace() {
        let tokens = lex("}");
        let mut parser = Parser::new(&tokens);
        let err = parser.parse_interpreter_block().unwrap_err();
        match err {
            ScriptError::Syntax { span, .. } => assert_eq!(span, Span::new(0, 1)),
            other => panic!("expected Syntax, got {other:?}"),
        }
    }

    #[test]
    fn test_edge_error_does_not_consume_past_eof() {
        let tokens = lex("1 {");
        let mut parser = Parser::new(&tokens);
        assert!(parser.parse_sim_file().is_err());
    }

    #[test]
    fn test_edge_sim_file_error_positions_published() {
        // the public Script entry point publishes the failing span
        let mut script = Script::new("s2 10: { }", 0);
        script.tokenize(false).unwrap();
        let err = script.parse_sim_file_to_ast().unwrap_err();
        assert_eq!(err.span(), Some(Span::new(7, 8)));
    }

    #[test]
    fn test_edge_block_id_requires_digit_shape() {
        // 's' alone is not an id; as a bare identifier it reaches the
        // callback rule and fails there
        let mut script = Script::new("s 1 { }", 0);
        script.tokenize(false).unwrap();
        let err = script.parse_sim_file_to_ast().unwrap_err();
        match err {
            ScriptError::Syntax { message, .. } => {
                assert!(message.contains("callback declaration"));
            }
            other => panic!("expected Syntax, got {other:?}"),
        }
    }

    #[test]
    fn test_edge_generation_number_overflow_found_by_folding() {
        let mut script = Script::new("99999999999999999999999 { }", 0);
        script.tokenize(false).unwrap();
        let err = script.parse_sim_file_to_ast().unwrap_err();
        assert!(matches!(err, ScriptError::Range { .. }));
    }

    #[test]
    fn test_edge_whole_pipeline_round_trip_positions() {
        let source = "s1 100:200 fitness(m1) { return relFitness * 2.0; }";
        let mut script = Script::new(source, 0);
        script.tokenize(false).unwrap();
        script.parse_sim_file_to_ast().unwrap();

        let root = script.ast().unwrap();
        assert_span_containment(root);

        // the file node spans the whole significant source
        assert_eq!(root.span(), Span::new(0, source.len()));
    }
}

//! End-to-end tests: statement text in, integer (or error) out

use simplescript::{
    evaluate_script, tokenize, Error, Evaluator, Node, NodeKind, Parser, Scanner, TokenKind,
};

fn parse(source: &str) -> simplescript::Result<Node> {
    Parser::new(Scanner::new(source).scan_tokens()).parse()
}

// =============================================================================
// TOKENIZER
// =============================================================================

#[test]
fn test_declaration_tokens() {
    let tokens = Scanner::new("int a = 1 + 2;").scan_tokens();
    let rendered: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();
    assert_eq!(
        rendered,
        vec![
            "IntKeyword(int)",
            "Identifier(a)",
            "Assignment(=)",
            "IntLiteral(1)",
            "Plus(+)",
            "IntLiteral(2)",
            "SemiColon(;)",
        ]
    );
}

#[test]
fn test_keyword_prefix_is_one_identifier() {
    let tokens = Scanner::new("interest").scan_tokens();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].text, "interest");
}

#[test]
fn test_tokenize_returns_reader_at_start() {
    let mut reader = tokenize("x = 1;");
    assert_eq!(reader.position(), 0);
    assert_eq!(reader.len(), 4);
    assert_eq!(reader.read().map(|t| t.kind), Some(TokenKind::Identifier));
    reader.unread();
    assert_eq!(reader.position(), 0);
}

// =============================================================================
// PARSER + EVALUATOR
// =============================================================================

#[test]
fn test_precedence_tree_and_value() {
    let program = parse("3 + 4 * 5;").unwrap();
    let statement = &program.children[0];
    assert_eq!(statement.kind, NodeKind::AdditiveExpr);
    assert_eq!(statement.text, "+");
    assert_eq!(statement.children[0], Node::new(NodeKind::IntLiteral, "3"));
    assert_eq!(statement.children[1].kind, NodeKind::MultiplicativeExpr);
    assert_eq!(statement.children[1].text, "*");

    assert_eq!(Evaluator::new().evaluate(&program).unwrap(), 23);
}

#[test]
fn test_left_associativity() {
    assert_eq!(evaluate_script("10 - 2 - 3;").unwrap(), 5);
    assert_eq!(evaluate_script("64 / 4 / 2;").unwrap(), 8);
    assert_eq!(evaluate_script("2 * 3 / 4;").unwrap(), 1);
}

#[test]
fn test_grouping_overrides_precedence() {
    assert_eq!(evaluate_script("(1 + 2) * 3;").unwrap(), 9);
    assert_eq!(evaluate_script("((2));").unwrap(), 2);
    assert_eq!(evaluate_script("10 - (2 - 3);").unwrap(), 11);
}

#[test]
fn test_declaration_without_initializer() {
    let program = parse("int x;").unwrap();
    assert_eq!(program.children[0], Node::new(NodeKind::IntDeclaration, "x"));
    assert_eq!(Evaluator::new().evaluate(&program).unwrap(), 0);
}

#[test]
fn test_multiple_statements_yield_last_value() {
    assert_eq!(
        evaluate_script("int a = 5; b = 6 * 7; 1 + 1;").unwrap(),
        2
    );
    assert_eq!(evaluate_script("int a = 5; b = 6 * 7;").unwrap(), 42);
}

#[test]
fn test_statement_spread_over_lines() {
    assert_eq!(evaluate_script("int total =\n  1 +\n  2;").unwrap(), 3);
}

#[test]
fn test_division_by_zero_is_a_runtime_failure() {
    let program = parse("5 / 0;").unwrap();
    assert_eq!(
        Evaluator::new().evaluate(&program),
        Err(Error::DivisionByZero)
    );
}

#[test]
fn test_missing_right_operand() {
    let err = parse("1 + ;").unwrap_err();
    assert!(err.is_syntax_error());
    assert!(err.to_string().contains("expecting the right part"));
    // The `;` that could not start an operand
    assert_eq!(err.position(), Some(2));
}

#[test]
fn test_fatal_parse_errors() {
    let cases = [
        ("int = 3;", "variable name expected"),
        ("int a = ;", "invalid variable initialization"),
        ("(1 + 2;", "expecting right parenthesis"),
        ("( );", "expecting an additive expression inside parenthesis"),
        ("3 3;", "unknown statement"),
        ("a = 1", "expecting semicolon"),
        ("int a", "expecting semicolon"),
    ];

    for (source, expected) in cases {
        match parse(source) {
            Err(Error::SyntaxError { message, .. }) => {
                assert!(
                    message.contains(expected),
                    "{:?}: {:?} does not contain {:?}",
                    source,
                    message,
                    expected
                );
            }
            other => panic!("{:?}: expected syntax error, got {:?}", source, other),
        }
    }
}

#[test]
fn test_comparisons_tokenize_but_do_not_parse() {
    let tokens = Scanner::new("1 <= 2;").scan_tokens();
    assert_eq!(tokens[1].kind, TokenKind::Le);
    assert!(parse("1 <= 2;").is_err());
}

#[test]
fn test_identifiers_have_no_value() {
    assert_eq!(
        evaluate_script("x;"),
        Err(Error::UndefinedVariable {
            name: "x".to_string()
        })
    );
}

#[test]
fn test_ast_dump() {
    let program = parse("int a = (1 + 2) * 3;").unwrap();
    assert_eq!(
        program.dump(),
        "Program\n\
         \tIntDeclaration a\n\
         \t\tMultiplicativeExpr *\n\
         \t\t\tAdditiveExpr +\n\
         \t\t\t\tIntLiteral 1\n\
         \t\t\t\tIntLiteral 2\n\
         \t\t\tIntLiteral 3\n"
    );
}

#[test]
fn test_ast_json_round_trip() {
    let program = parse("x = 2 - 1;").unwrap();
    let json = serde_json::to_string(&program).unwrap();
    let back: Node = serde_json::from_str(&json).unwrap();
    assert_eq!(back, program);
}

// =============================================================================
// NESTING LIMITS
// =============================================================================

#[test]
fn test_deeply_nested_parentheses_fail_cleanly() {
    let source = format!("{}1{};", "(".repeat(5000), ")".repeat(5000));
    assert_eq!(
        evaluate_script(&source),
        Err(Error::NestingTooDeep {
            limit: simplescript::parser::DEFAULT_MAX_DEPTH
        })
    );
}

#[test]
fn test_long_addition_chain_fails_cleanly() {
    let source = format!("1{};", " + 1".repeat(200_000));
    let err = evaluate_script(&source).unwrap_err();
    assert_eq!(
        err.to_string(),
        format!(
            "Expression nested too deeply (limit: {})",
            simplescript::parser::DEFAULT_MAX_DEPTH
        )
    );
}

#[test]
fn test_nesting_up_to_the_limit_evaluates() {
    let depth = simplescript::parser::DEFAULT_MAX_DEPTH;

    let source = format!("{}7{};", "(".repeat(depth), ")".repeat(depth));
    assert_eq!(evaluate_script(&source), Ok(7));

    let source = format!("1{};", " + 1".repeat(depth - 1));
    assert_eq!(evaluate_script(&source), Ok(depth as i64));
}

// =============================================================================
// LITERAL RANGE
// =============================================================================

#[test]
fn test_literal_range() {
    assert_eq!(evaluate_script("9223372036854775807;"), Ok(i64::MAX));
    assert_eq!(
        evaluate_script("9223372036854775808;"),
        Err(Error::InvalidIntLiteral {
            text: "9223372036854775808".to_string()
        })
    );
}

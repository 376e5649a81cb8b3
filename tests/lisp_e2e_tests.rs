/// End-to-end integration tests
/// Demonstrates: Lexer → Parser → Evaluator working together
use serde_json::json;
use tinylisp::lexer::{tokenize, SExprScanner};
use tinylisp::parser::{parse, parse_expression, Expression, SExprParser};
use tinylisp::runtime::{evaluate, evaluate_str, Environment, LispEvaluator, Value};
use tinylisp::{Error, ErrorCategory};

fn lexemes(source: &str) -> Vec<&str> {
    tokenize(source).iter().map(|t| t.as_str()).collect()
}

fn parse_one(source: &str) -> Expression {
    parse_expression(&tokenize(source)).unwrap()
}

// =============================================================================
// TOKENIZE
// =============================================================================

#[test]
fn test_tokenize_significant_characters() {
    assert_eq!(lexemes("(* 5 5)"), vec!["(", "*", "5", "5", ")"]);
    assert_eq!(
        lexemes("(* 2 (+ 8 1 3))"),
        vec!["(", "*", "2", "(", "+", "8", "1", "3", ")", ")"]
    );
    assert_eq!(
        lexemes("(/ (- 10 5) (* 2 (+ 8 1 )))"),
        vec![
            "(", "/", "(", "-", "10", "5", ")", "(", "*", "2", "(", "+", "8", "1", ")", ")", ")"
        ]
    );
}

#[test]
fn test_tokenize_multi_character_tokens() {
    assert_eq!(lexemes("(* -5 -5)"), vec!["(", "*", "-5", "-5", ")"]);
}

#[test]
fn test_scanner_matches_tokenize() {
    let source = "(define square (lambda (x) (* x x)))";
    assert_eq!(SExprScanner::new(source).scan_tokens(), tokenize(source));
}

// =============================================================================
// PARSE
// =============================================================================

#[test]
fn test_parse_atoms() {
    assert_eq!(parse_one("5"), Expression::int(5));
    assert_eq!(parse_one("-10"), Expression::int(-10));
    assert_eq!(parse_one("+"), Expression::symbol("+"));
    assert_eq!(parse_one("-"), Expression::symbol("-"));
}

#[test]
fn test_parse_unnested_expressions() {
    assert_eq!(parse_one("(+ 3 5)").to_json(), json!(["+", 3, 5]));
    assert_eq!(parse_one("(+ 3 5 2 8)").to_json(), json!(["+", 3, 5, 2, 8]));
    assert_eq!(
        parse_one("(- 2 5 0 2 4 2)").to_json(),
        json!(["-", 2, 5, 0, 2, 4, 2])
    );
}

#[test]
fn test_parse_nested_expressions() {
    assert_eq!(
        parse_one("(- 3 (+ 3 5))").to_json(),
        json!(["-", 3, ["+", 3, 5]])
    );
    assert_eq!(
        parse_one("(- 3 5 3(+ 8 0))").to_json(),
        json!(["-", 3, 5, 3, ["+", 8, 0]])
    );
}

#[test]
fn test_parse_sequential_expressions() {
    let program: Vec<_> = parse("(- 3 6) (+ 2 3)")
        .unwrap()
        .iter()
        .map(Expression::to_json)
        .collect();
    assert_eq!(program, vec![json!(["-", 3, 6]), json!(["+", 2, 3])]);

    // Parsing does not evaluate, so the division by zero is fine here
    let program: Vec<_> = parse("(- 1 0) (/ 8 0)")
        .unwrap()
        .iter()
        .map(Expression::to_json)
        .collect();
    assert_eq!(program, vec![json!(["-", 1, 0]), json!(["/", 8, 0])]);
}

#[test]
fn test_parser_cursor() {
    let tokens = tokenize("(+ 1 2) 7");
    let mut parser = SExprParser::new(&tokens);

    assert_eq!(parser.parse_expression().unwrap().to_json(), json!(["+", 1, 2]));
    assert_eq!(parser.position(), 5);
    assert!(!parser.is_at_end());
    assert_eq!(parser.parse_expression().unwrap(), Expression::int(7));
    assert!(parser.is_at_end());
}

#[test]
fn test_parse_errors() {
    for source in ["(+ 1 2", "(+ 1 2))", ")", "()", "(+ 1 ())"] {
        let err = parse(source).unwrap_err();
        assert_eq!(
            err.category(),
            ErrorCategory::MalformedInput,
            "source: {}",
            source
        );
    }
}

// =============================================================================
// CALCULATOR
// =============================================================================

#[test]
fn test_calculator() {
    assert_eq!(evaluate_str("(+ 3 4)").unwrap(), Value::Int(7));
    assert_eq!(evaluate_str("(+ 3 4 (+ 3 2))").unwrap(), Value::Int(12));
    assert_eq!(evaluate_str("(+ 3 4)(+ 3 2)").unwrap(), Value::Int(5));
    assert_eq!(
        evaluate_str("(/ (- 10 5) (* 2 (+ 8 1 )))").unwrap(),
        Value::Float(5.0 / 18.0)
    );
}

#[test]
fn test_comparators() {
    assert_eq!(evaluate_str("(> 3 2)").unwrap(), Value::Bool(true));
    assert_eq!(evaluate_str("(< 3 2)").unwrap(), Value::Bool(false));
    assert_eq!(evaluate_str("(= 2 2 2)").unwrap(), Value::Bool(true));
    assert_eq!(evaluate_str("(= 2 2 3)").unwrap(), Value::Bool(false));
}

#[test]
fn test_division_by_zero_surfaces() {
    assert_eq!(evaluate_str("(/ 8 0)").unwrap_err(), Error::DivisionByZero);
}

// =============================================================================
// DEFINE
// =============================================================================

#[test]
fn test_define_constant() {
    let env = Environment::new();
    evaluate("(define x 10)", &env).unwrap();
    assert_eq!(env.get("x"), Some(Value::Int(10)));
}

#[test]
fn test_define_multiple() {
    let env = Environment::new();
    evaluate("(define x 2)(define y 5)", &env).unwrap();
    assert_eq!(env.get("x"), Some(Value::Int(2)));
    assert_eq!(env.get("y"), Some(Value::Int(5)));
}

#[test]
fn test_definitions_used_later() {
    let env = Environment::new();
    assert_eq!(evaluate("(define x 2)(+ x 3)", &env).unwrap(), Value::Int(5));
    assert_eq!(env.get("x"), Some(Value::Int(2)));
}

#[test]
fn test_definitions_followed_through_names() {
    let env = Environment::new();
    assert_eq!(
        evaluate("(define x 2)(define y x)(+ y 5)", &env).unwrap(),
        Value::Int(7)
    );
    assert_eq!(env.get("y"), Some(Value::Int(2)));

    let env = Environment::new();
    assert_eq!(
        evaluate("(define x 4)(define y x)(define z y)(+ z 5)", &env).unwrap(),
        Value::Int(9)
    );
    for name in ["x", "y", "z"] {
        assert_eq!(env.get(name), Some(Value::Int(4)));
    }
}

// =============================================================================
// IF
// =============================================================================

#[test]
fn test_if_conditions() {
    assert_eq!(evaluate_str("(if (> 1 0) 1 0)").unwrap(), Value::Int(1));
    assert_eq!(evaluate_str("(if (< 1 0) 1 0)").unwrap(), Value::Int(0));
    assert_eq!(evaluate_str("(if (> 1 0) (+ 4 6) 0)").unwrap(), Value::Int(10));
    assert_eq!(evaluate_str("(if (< 1 0) 1 (+ 9 9))").unwrap(), Value::Int(18));
}

// =============================================================================
// LAMBDA
// =============================================================================

#[test]
fn test_lambda_saved_to_environment() {
    let env = Environment::new();
    evaluate("(define square (lambda (x) (* x x)))", &env).unwrap();
    assert!(matches!(env.get("square"), Some(Value::Closure(_))));
}

#[test]
fn test_lambda_invoked_with_constants_and_variables() {
    assert_eq!(
        evaluate_str("(define square (lambda (x) (* x x))) (square 5)").unwrap(),
        Value::Int(25)
    );
    assert_eq!(
        evaluate_str("(define x 5) (define square (lambda (x) (* x x))) (square x)").unwrap(),
        Value::Int(25)
    );
}

#[test]
fn test_lambda_distinguishes_parameters() {
    let env = Environment::new();
    evaluate("(define mult (lambda (x y) (* x y)))", &env).unwrap();
    evaluate("(define x 5)(define y 9)", &env).unwrap();
    assert_eq!(evaluate("(mult x y)", &env).unwrap(), Value::Int(45));
}

#[test]
fn test_lambda_most_specific_scope_wins() {
    let env = Environment::new();
    evaluate("(define mult (lambda (x) (* x x)))", &env).unwrap();
    evaluate("(define x 5)", &env).unwrap();
    assert_eq!(evaluate("(mult 2)", &env).unwrap(), Value::Int(4));
}

#[test]
fn test_closure_property() {
    let source = r#"
        (define make-adder (lambda (n) (lambda (x) (+ x n))))
        (define add5 (make-adder 5))
        (define add10 (make-adder 10))
        (+ (add5 1) (add10 1))
    "#;
    assert_eq!(evaluate_str(source).unwrap(), Value::Int(17));
}

#[test]
fn test_evaluator_reuses_environment_across_programs() {
    let mut evaluator = LispEvaluator::new();
    evaluator.eval_source("(define counter 41)").unwrap();
    assert_eq!(
        evaluator.eval_source("(+ counter 1)").unwrap(),
        Value::Int(42)
    );
    assert!(evaluator.env().exists("counter"));
}

#[test]
fn test_mutual_recursion() {
    let source = r#"
        (define even? (lambda (n) (if (= n 0) 1 (odd? (- n 1)))))
        (define odd? (lambda (n) (if (= n 0) 0 (even? (- n 1)))))
        (even? 10)
    "#;
    assert_eq!(evaluate_str(source).unwrap(), Value::Int(1));
}

#[test]
fn test_deeply_nested_program() {
    let depth = 100_000;
    let source = format!("{}0{}", "(+ 1 ".repeat(depth), ")".repeat(depth));
    assert_eq!(evaluate_str(&source).unwrap(), Value::Int(100_000));

    let err = evaluate_str(&"(".repeat(depth)).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::MalformedInput);
}

use rox::ast_printer::AstPrinter;
use rox::error::LoxError;
use rox::expr::{Expr, LiteralValue};
use rox::parser::Parser;
use rox::scanner::Scanner;
use rox::stmt::Stmt;

fn parse(source: &str) -> (Vec<Stmt>, Vec<LoxError>) {
    let (tokens, lex_errors) = Scanner::new(source).scan_all();
    assert!(lex_errors.is_empty(), "unexpected lexical errors");

    let mut parser = Parser::new(tokens);
    let statements = parser.parse();
    (statements, parser.take_errors())
}

fn print_program(source: &str) -> Vec<String> {
    let (statements, errors) = parse(source);
    assert!(errors.is_empty(), "unexpected parse errors: {:?}", errors);
    statements.iter().map(AstPrinter::print_stmt).collect()
}

fn print_expression(source: &str) -> String {
    let (tokens, _) = Scanner::new(source).scan_all();
    let mut parser = Parser::new(tokens);
    let expr = parser.parse_expression().expect("expression should parse");
    assert!(!parser.had_error());
    AstPrinter::print(&expr)
}

#[test]
fn precedence_climbs_from_assignment_to_primary() {
    assert_eq!(
        print_expression("-123 * (45.67)"),
        "(* (- 123.0) (group 45.67))"
    );
    assert_eq!(
        print_expression("1 + 2 * 3 - 4 / 2"),
        "(- (+ 1.0 (* 2.0 3.0)) (/ 4.0 2.0))"
    );
    assert_eq!(
        print_expression("a or b and c == d < e"),
        "(or a (and b (== c (< d e))))"
    );
    assert_eq!(print_expression("!!true"), "(! (! true))");
}

#[test]
fn assignment_is_right_associative() {
    assert_eq!(print_expression("a = b = 1"), "(= a (= b 1.0))");
}

#[test]
fn call_and_property_chains_are_left_associative() {
    assert_eq!(
        print_expression("a.b(c).d"),
        "(. (call (. a b) c) d)"
    );
    assert_eq!(print_expression("f(1)(2)"), "(call (call f 1.0) 2.0)");
    assert_eq!(print_expression("a.b.c = 3"), "(= (. (. a b) c) 3.0)");
}

#[test]
fn this_and_super_expressions() {
    assert_eq!(print_expression("this.x"), "(. this x)");
    assert_eq!(print_expression("super.go(1)"), "(call (super go) 1.0)");
}

#[test]
fn for_loop_desugars_into_scoped_while() {
    let printed = print_program("for (var i = 0; i < 3; i = i + 1) print i;");

    assert_eq!(
        printed,
        vec!["(block (var i 0.0) (while (< i 3.0) (block (print i) (; (= i (+ i 1.0))))))"]
    );
}

#[test]
fn for_loop_without_clauses_loops_on_true() {
    let (statements, errors) = parse("for (;;) print 1;");
    assert!(errors.is_empty());
    assert_eq!(statements.len(), 1);

    match &statements[0] {
        Stmt::While { condition, .. } => {
            assert_eq!(condition, &Expr::Literal(LiteralValue::True));
        }
        other => panic!("expected a bare while, got {:?}", other),
    }
}

#[test]
fn declarations_parse() {
    let printed = print_program(
        "var a; var b = \"hi\";\n\
         fun add(x, y) { return x + y; }\n\
         class B < A { init(n) { this.n = n; } get() { return super.get(); } }",
    );

    assert_eq!(
        printed,
        vec![
            "(var a)",
            "(var b hi)",
            "(fun add (x y) (return (+ x y)))",
            "(class B < A (method init (n) (; (= (. this n) n))) (method get () (return (call (super get)))))",
        ]
    );
}

#[test]
fn if_else_binds_to_nearest_if() {
    let printed = print_program("if (a) if (b) print 1; else print 2;");
    assert_eq!(printed, vec!["(if a (if b (print 1.0) (print 2.0)))"]);
}

#[test]
fn invalid_assignment_target_is_reported_without_aborting() {
    let (statements, errors) = parse("1 + 2 = 3; print 4;");

    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].to_string(),
        "[line 1] Error at '=': Invalid assignment target."
    );
    // Both statements survive: the bad one keeps its left-hand side.
    assert_eq!(statements.len(), 2);
    assert_eq!(AstPrinter::print_stmt(&statements[0]), "(; (+ 1.0 2.0))");
}

#[test]
fn recovery_reports_errors_from_several_statements() {
    let source = "var = 1;\nprint 2;\nprint (3;\nvar ok = 4;";
    let (statements, errors) = parse(source);

    assert_eq!(errors.len(), 2);
    assert_eq!(
        errors[0].to_string(),
        "[line 1] Error at '=': Expect variable name."
    );
    assert_eq!(
        errors[1].to_string(),
        "[line 3] Error at ';': Expect ')' after expression."
    );

    let printed: Vec<String> = statements.iter().map(AstPrinter::print_stmt).collect();
    assert_eq!(printed, vec!["(print 2.0)", "(var ok 4.0)"]);
}

#[test]
fn error_at_end_of_input() {
    let (_, errors) = parse("print 1");

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].location(), " at end");
    assert_eq!(
        errors[0].to_string(),
        "[line 1] Error at end: Expect ';' after value."
    );
}

#[test]
fn errors_inside_blocks_recover_at_inner_declaration() {
    let (statements, errors) = parse("{ print; print 1; }");

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message(), "Expect expression.");
    assert_eq!(
        statements.iter().map(AstPrinter::print_stmt).collect::<Vec<_>>(),
        vec!["(block (print 1.0))"]
    );
}

#[test]
fn too_many_arguments_is_reported_but_parsing_continues() {
    let args: Vec<String> = (0..256).map(|i| i.to_string()).collect();
    let source = format!("f({});\nprint 1;", args.join(", "));
    let (statements, errors) = parse(&source);

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message(), "Can't have more than 255 arguments.");
    assert_eq!(statements.len(), 2);
}

#[test]
fn too_many_parameters_is_reported() {
    let params: Vec<String> = (0..256).map(|i| format!("p{}", i)).collect();
    let source = format!("fun f({}) {{}}", params.join(", "));
    let (statements, errors) = parse(&source);

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message(), "Can't have more than 255 parameters.");
    assert_eq!(statements.len(), 1);
}

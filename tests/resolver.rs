mod common;

use common::{messages, run};

fn resolution_errors(source: &str) -> Vec<String> {
    let (output, outcome) = run(source);

    assert!(outcome.had_resolution_error, "expected a resolution error");
    assert!(!outcome.had_runtime_error);
    assert_eq!(outcome.exit_code(), 65);
    // Nothing in the unit runs once resolution fails.
    assert_eq!(output, "");
    assert!(outcome.diagnostics.iter().all(|d| d.is_static()));

    messages(&outcome)
}

#[test]
fn reading_local_in_its_own_initializer() {
    let (_, outcome) = run("var a = 1;\n{ var a = a; }");

    assert!(outcome.had_resolution_error);
    assert_eq!(
        outcome.diagnostics[0].to_string(),
        "[line 2] Error at 'a': Can't read local variable in its own initializer."
    );
}

#[test]
fn global_self_reference_is_left_to_runtime() {
    let (_, outcome) = run("var a = a;");

    assert!(!outcome.had_resolution_error);
    assert!(outcome.had_runtime_error);
    assert_eq!(messages(&outcome), vec!["Undefined variable 'a'."]);
}

#[test]
fn duplicate_local_declaration() {
    assert_eq!(
        resolution_errors("fun f() { var a = 1; var a = 2; }"),
        vec!["Already a variable with this name in this scope."]
    );
}

#[test]
fn duplicate_parameter_name() {
    assert_eq!(
        resolution_errors("fun f(a, a) {}"),
        vec!["Already a variable with this name in this scope."]
    );
}

#[test]
fn global_redeclaration_is_allowed() {
    let (output, outcome) = run("var a = 1; var a = 2; print a;");

    assert!(outcome.is_success());
    assert_eq!(output, "2\n");
}

#[test]
fn return_at_top_level() {
    let (_, outcome) = run("print 1;\nreturn 2;");

    assert!(outcome.had_resolution_error);
    assert_eq!(
        outcome.diagnostics[0].to_string(),
        "[line 2] Error at 'return': Can't return from top-level code."
    );
}

#[test]
fn returning_a_value_from_an_initializer() {
    assert_eq!(
        resolution_errors("class A { init() { return 5; } }"),
        vec!["Can't return a value from an initializer."]
    );
}

#[test]
fn bare_return_in_initializer_is_fine() {
    let (_, outcome) = run("class A { init() { return; } }");
    assert!(outcome.is_success());
}

#[test]
fn this_outside_a_class() {
    assert_eq!(
        resolution_errors("print this;"),
        vec!["Can't use 'this' outside of a class."]
    );
    assert_eq!(
        resolution_errors("fun f() { return this; }"),
        vec!["Can't use 'this' outside of a class."]
    );
}

#[test]
fn super_misuse() {
    assert_eq!(
        resolution_errors("super.m();"),
        vec!["Can't use 'super' outside of a class."]
    );
    assert_eq!(
        resolution_errors("class A { m() { super.m(); } }"),
        vec!["Can't use 'super' in a class with no superclass."]
    );
}

#[test]
fn class_inheriting_from_itself() {
    let (_, outcome) = run("class A < A {}");

    assert!(outcome.had_resolution_error);
    assert_eq!(
        outcome.diagnostics[0].to_string(),
        "[line 1] Error at 'A': A class can't inherit from itself."
    );
}

#[test]
fn every_resolution_error_is_reported() {
    let source = "print \"never\";\n\
                  return 1;\n\
                  fun f() { var x; var x; }\n\
                  print this;";

    assert_eq!(
        resolution_errors(source),
        vec![
            "Can't return from top-level code.",
            "Already a variable with this name in this scope.",
            "Can't use 'this' outside of a class.",
        ]
    );
}

#[test]
fn syntax_errors_skip_resolution() {
    let (_, outcome) = run("return 1;\nprint ;");

    assert!(outcome.had_syntax_error);
    assert!(!outcome.had_resolution_error);
    assert_eq!(messages(&outcome), vec!["Expect expression."]);
}

#[test]
fn closures_bind_to_declaration_scope() {
    let source = "var a = \"global\";\n\
                  {\n\
                    fun showA() { print a; }\n\
                    showA();\n\
                    var a = \"block\";\n\
                    showA();\n\
                    print a;\n\
                  }";

    let (output, outcome) = run(source);

    assert!(outcome.is_success());
    assert_eq!(output, "global\nglobal\nblock\n");
}

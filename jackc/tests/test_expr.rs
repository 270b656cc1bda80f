//! Expression code generation through the whole pipeline.
use jackc::error::CompileError;

/// Compile a single void function body inside a throwaway class.
fn compile_body(body: &str) -> String {
    let source = format!("class Main {{ function void run() {{ {} }} }}", body);
    jackc::compile_str(&source, "Main").unwrap()
}

fn lines(output: &str) -> Vec<&str> {
    output.lines().collect()
}

#[test]
fn test_add_constants() {
    let output = compile_body("var int x; let x = 2 + 3; return;");
    assert_eq!(
        lines(&output),
        vec![
            "function Main.run 1",
            "push constant 2",
            "push constant 3",
            "add",
            "pop local 0",
            "push constant 0",
            "return",
        ]
    );
}

#[test]
fn test_flat_left_associative_operators() {
    // Single precedence level: 1 + 2 * 3 is (1 + 2) * 3.
    let output = compile_body("var int x; let x = 1 + 2 * 3; return;");
    assert_eq!(
        lines(&output),
        vec![
            "function Main.run 1",
            "push constant 1",
            "push constant 2",
            "add",
            "push constant 3",
            "call Math.multiply 2",
            "pop local 0",
            "push constant 0",
            "return",
        ]
    );
}

#[test]
fn test_divide_calls_runtime() {
    let output = compile_body("var int x; let x = 10 / 2; return;");
    assert!(output.contains("call Math.divide 2"));
}

#[test]
fn test_keyword_constants() {
    let output = compile_body("var boolean b; let b = true; let b = false; return;");
    assert_eq!(
        lines(&output),
        vec![
            "function Main.run 1",
            "push constant 1",
            "neg",
            "pop local 0",
            "push constant 0",
            "pop local 0",
            "push constant 0",
            "return",
        ]
    );
}

#[test]
fn test_unary_operators() {
    let output = compile_body("var int x; let x = -5; let x = ~x; return;");
    assert_eq!(
        lines(&output),
        vec![
            "function Main.run 1",
            "push constant 5",
            "neg",
            "pop local 0",
            "push local 0",
            "not",
            "pop local 0",
            "push constant 0",
            "return",
        ]
    );
}

#[test]
fn test_brackets_are_transparent() {
    let output = compile_body("var int x; let x = (2 + 3); return;");
    assert_eq!(
        lines(&output),
        vec![
            "function Main.run 1",
            "push constant 2",
            "push constant 3",
            "add",
            "pop local 0",
            "push constant 0",
            "return",
        ]
    );
}

#[test]
fn test_string_constant() {
    let output = compile_body("do Output.printString(\"AB\"); return;");
    assert_eq!(
        lines(&output),
        vec![
            "function Main.run 0",
            "push constant 2",
            "call String.new 1",
            "push constant 65",
            "call String.appendChar 2",
            "push constant 66",
            "call String.appendChar 2",
            "call Output.printString 1",
            "pop temp 0",
            "push constant 0",
            "return",
        ]
    );
}

#[test]
fn test_string_constant_rejects_wide_characters() {
    // U+1F600 does not fit one VM word, so appendChar cannot carry it.
    let source =
        "class Main { function void run() { do Output.printString(\"a\u{1F600}\"); return; } }";
    assert!(matches!(
        jackc::compile_str(source, "Main"),
        Err(CompileError::TokenValueMismatch { .. })
    ));
}

#[test]
fn test_array_read_and_write() {
    let output = compile_body("var Array a; var int i; let a[i] = a[i + 1]; return;");
    assert_eq!(
        lines(&output),
        vec![
            "function Main.run 2",
            // Value: a[i + 1]
            "push local 0",
            "push local 1",
            "push constant 1",
            "add",
            "add",
            "pop pointer 1",
            "push that 0",
            // Target: a[i]
            "push local 0",
            "push local 1",
            "add",
            "pop pointer 1",
            "pop that 0",
            "push constant 0",
            "return",
        ]
    );
}

#[test]
fn test_function_call_has_no_receiver() {
    let output = compile_body("do Sys.wait(50); return;");
    assert!(output.contains("call Sys.wait 1"));
}

#[test]
fn test_deterministic_output() {
    let body = "var int x; if (x < 3) { let x = x * 2; } return;";
    assert_eq!(compile_body(body), compile_body(body));
}

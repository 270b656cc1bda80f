//! Whole-unit compilation: calling conventions, scope rules, errors.
use jackc::error::CompileError;

const POINT: &str = include_str!("point.jack");

fn lines(output: &str) -> Vec<&str> {
    output.lines().collect()
}

#[test]
fn test_compile_point() {
    let output = jackc::compile_str(POINT, "Point").unwrap();
    assert_eq!(
        lines(&output),
        vec![
            // Constructor allocates one word per field and binds `this`.
            "function Point.new 0",
            "push constant 2",
            "call Memory.alloc 1",
            "pop pointer 0",
            "push argument 0",
            "pop this 0",
            "push argument 1",
            "pop this 1",
            "push static 0",
            "push constant 1",
            "add",
            "pop static 0",
            "push pointer 0",
            "return",
            // Method binds the receiver before touching fields.
            "function Point.getX 0",
            "push argument 0",
            "pop pointer 0",
            "push this 0",
            "return",
            // Method call on a variable: receiver pushed first, the
            // emitted argument count includes it.
            "function Point.plus 0",
            "push argument 0",
            "pop pointer 0",
            "push this 0",
            "push argument 1",
            "call Point.getX 1",
            "add",
            "return",
            // Function: no prologue.
            "function Point.created 0",
            "push static 0",
            "return",
        ]
    );
}

#[test]
fn test_compile_is_deterministic() {
    let first = jackc::compile_str(POINT, "Point").unwrap();
    let second = jackc::compile_str(POINT, "Point").unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_indices_are_dense_per_kind() {
    // Statics and fields count independently of declaration interleaving.
    let source = "class Gadget {
        static int a;
        field int b;
        static int c;
        field int d, e;

        function int lastStatic() { return c; }
        method int lastField() { return e; }
    }";
    let output = jackc::compile_str(source, "Gadget").unwrap();

    assert!(output.contains("push static 1"), "c should be static 1");
    assert!(output.contains("push this 2"), "e should be this 2");
}

#[test]
fn test_method_arguments_start_at_one() {
    let source = "class Main {
        field int x;
        method int shift(int by) { return x + by; }
    }";
    let output = jackc::compile_str(source, "Main").unwrap();

    // Slot 0 belongs to the receiver.
    assert!(output.contains("push argument 1"));
}

#[test]
fn test_method_call_adds_receiver_to_arg_count() {
    let source = "class Main {
        function void f(Point p) { do p.offset(1, 2); return; }
    }";
    let output = jackc::compile_str(source, "Main").unwrap();

    assert!(output.contains("push argument 0"));
    assert!(output.contains("call Point.offset 3"));
}

#[test]
fn test_implicit_call_targets_this() {
    let source = "class Main {
        method void tick() { do step(); return; }
        method void step() { return; }
    }";
    let output = jackc::compile_str(source, "Main").unwrap();

    // Bare call resolves to a method on the enclosing object.
    assert!(output.contains("push pointer 0"));
    assert!(output.contains("call Main.step 1"));
}

#[test]
fn test_field_redeclaration_fails() {
    let source = "class Main { field int x; field int x; }";
    assert!(matches!(
        jackc::compile_str(source, "Main"),
        Err(CompileError::NameAlreadyDefined { .. })
    ));
}

#[test]
fn test_statics_and_fields_share_a_namespace() {
    let source = "class Main { field int x; static int x; }";
    assert!(matches!(
        jackc::compile_str(source, "Main"),
        Err(CompileError::NameAlreadyDefined { .. })
    ));
}

#[test]
fn test_local_shadows_field() {
    let source = "class Main {
        field int x;
        method void m() { var int x; let x = 1; return; }
    }";
    let output = jackc::compile_str(source, "Main").unwrap();

    // The assignment lands in the local, not the field.
    assert!(output.contains("pop local 0"));
    assert!(!output.contains("pop this 0"));
}

#[test]
fn test_undefined_name_fails() {
    let source = "class Main { function void f() { let y = 1; return; } }";
    assert!(matches!(
        jackc::compile_str(source, "Main"),
        Err(CompileError::UndefinedName { .. })
    ));
}

#[test]
fn test_unit_name_mismatch() {
    let source = "class Foo { }";
    assert!(matches!(
        jackc::compile_str(source, "Bar"),
        Err(CompileError::UnitNameMismatch { .. })
    ));
}

#[test]
fn test_trailing_tokens_rejected() {
    let source = "class Main { } extra";
    assert!(matches!(
        jackc::compile_str(source, "Main"),
        Err(CompileError::TokenTypeMismatch { .. })
    ));
}

#[test]
fn test_errors_carry_position() {
    let source = "class Main {\n    field int x;\n    field int x;\n}";
    match jackc::compile_str(source, "Main") {
        Err(err @ CompileError::NameAlreadyDefined { .. }) => {
            assert_eq!(err.pos().line, 3);
        }
        other => panic!("expected redeclaration error, got {:?}", other),
    }
}

#[test]
fn test_unterminated_string_position_survives_buffering() {
    // Tokens are pre-lexed through the stream's buffer; the reported
    // position must still be the end of the `=` token, not the quote.
    let source = "class Main { function void f() { var String s;\nlet s = \"ab\nreturn; } }";
    match jackc::compile_str(source, "Main") {
        Err(CompileError::UnterminatedString { pos }) => {
            assert_eq!((pos.line, pos.column), (2, 8));
        }
        other => panic!("expected unterminated string error, got {:?}", other),
    }
}

#[test]
fn test_analyze_token_dump() {
    let document = jackc::analyze_tokens("let x = 5;").unwrap();
    assert_eq!(
        lines(&document),
        vec![
            "<tokens>",
            "    <keyword> let </keyword>",
            "    <identifier> x </identifier>",
            "    <symbol> = </symbol>",
            "    <integerConstant> 5 </integerConstant>",
            "    <symbol> ; </symbol>",
            "</tokens>",
        ]
    );
}

#[test]
fn test_analyze_escapes_markup() {
    let document = jackc::analyze_tokens("a < b & c").unwrap();
    assert!(document.contains("<symbol> &lt; </symbol>"));
    assert!(document.contains("<symbol> &amp; </symbol>"));
}

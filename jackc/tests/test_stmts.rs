//! Statement code generation: control flow, labels, calling discards.

fn compile_body(body: &str) -> String {
    let source = format!("class Main {{ function void run() {{ {} }} }}", body);
    jackc::compile_str(&source, "Main").unwrap()
}

fn lines(output: &str) -> Vec<&str> {
    output.lines().collect()
}

/// All `label` instruction names in the output.
fn label_names(output: &str) -> Vec<&str> {
    output
        .lines()
        .filter_map(|line| line.strip_prefix("label "))
        .collect()
}

#[test]
fn test_if_else_shape() {
    let output = compile_body("if (true) { do Sys.halt(); } else { do Sys.wait(1); } return;");
    assert_eq!(
        lines(&output),
        vec![
            "function Main.run 0",
            "push constant 1",
            "neg",
            "if-goto IF_TRUE0",
            // Else branch sits before the true branch.
            "push constant 1",
            "call Sys.wait 1",
            "pop temp 0",
            "goto IF_END0",
            "label IF_TRUE0",
            "call Sys.halt 0",
            "pop temp 0",
            "label IF_END0",
            "push constant 0",
            "return",
        ]
    );
}

#[test]
fn test_if_without_else() {
    let output = compile_body("if (false) { do Sys.halt(); } return;");
    assert_eq!(
        lines(&output),
        vec![
            "function Main.run 0",
            "push constant 0",
            "if-goto IF_TRUE0",
            "goto IF_END0",
            "label IF_TRUE0",
            "call Sys.halt 0",
            "pop temp 0",
            "label IF_END0",
            "push constant 0",
            "return",
        ]
    );
}

#[test]
fn test_while_shape() {
    let output = compile_body("var int i; while (i < 10) { let i = i + 1; } return;");
    assert_eq!(
        lines(&output),
        vec![
            "function Main.run 1",
            "label LOOP0",
            "push local 0",
            "push constant 10",
            "lt",
            "not",
            "if-goto LOOP_END0",
            "push local 0",
            "push constant 1",
            "add",
            "pop local 0",
            "goto LOOP0",
            "label LOOP_END0",
            "push constant 0",
            "return",
        ]
    );
}

#[test]
fn test_sibling_ifs_use_distinct_labels() {
    let output = compile_body(
        "if (true) { do Sys.halt(); } \
         if (true) { do Sys.halt(); } \
         return;",
    );

    let labels = label_names(&output);
    assert!(labels.contains(&"IF_TRUE0"));
    assert!(labels.contains(&"IF_TRUE1"));

    let mut unique = labels.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), labels.len(), "duplicate labels: {:?}", labels);
}

#[test]
fn test_nested_blocks_never_collide() {
    // A while nested in the if's true branch, and another in the else
    // branch, plus a trailing sibling while.
    let output = compile_body(
        "var int i; \
         if (i = 0) { while (i < 5) { let i = i + 1; } } \
         else { while (i > 0) { let i = i - 1; } } \
         while (i < 9) { let i = i + 1; } \
         return;",
    );

    let labels = label_names(&output);
    let mut unique = labels.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), labels.len(), "duplicate labels: {:?}", labels);

    // Structural paths: the nested whiles derive from their branch,
    // the sibling while from its own statement index.
    assert!(labels.contains(&"LOOP0T0"));
    assert!(labels.contains(&"LOOP0F0"));
    assert!(labels.contains(&"LOOP1"));
}

#[test]
fn test_do_discards_return_value() {
    let output = compile_body("do Sys.wait(5); return;");
    assert_eq!(
        lines(&output),
        vec![
            "function Main.run 0",
            "push constant 5",
            "call Sys.wait 1",
            "pop temp 0",
            "push constant 0",
            "return",
        ]
    );
}

#[test]
fn test_void_return_pushes_zero() {
    let output = compile_body("return;");
    assert_eq!(
        lines(&output),
        vec!["function Main.run 0", "push constant 0", "return"]
    );
}

#[test]
fn test_bare_return_accepted_in_non_void() {
    // Accepted grammar looseness: the compiler does not reject it.
    let source = "class Main { function int answer() { return; } }";
    let output = jackc::compile_str(source, "Main").unwrap();
    assert_eq!(
        lines(&output),
        vec!["function Main.answer 0", "push constant 0", "return"]
    );
}

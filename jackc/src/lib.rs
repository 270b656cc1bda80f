pub mod ast;
pub mod error;
pub mod lex;
pub mod parsing;
pub mod scope;
pub mod token_stream;
pub mod tokens;
pub mod vm;
pub mod xml;

pub use error::CompileError;

use smol_str::SmolStr;

/// Compile one source unit into VM instruction text.
///
/// `unit_name` is the expected name of the output unit; the parsed
/// class must carry the same name. On error, no output is produced for
/// the unit.
pub fn compile_str(source: &str, unit_name: &str) -> Result<String, CompileError> {
    // Lexical analysis
    let lexer = lex::Lexer::new(source);
    let stream = token_stream::TokenStream::new(lexer);

    // Syntactic analysis; scope building and tree construction are
    // interleaved in a single pass.
    let mut parser = parsing::Parser::new(stream);
    let class = parser.parse_class()?;
    parser.expect_finished()?;

    if class.name() != unit_name {
        return Err(CompileError::UnitNameMismatch {
            class: SmolStr::from(class.name()),
            unit: unit_name.to_string(),
        });
    }

    // Code generation
    let code = class.generate();
    Ok(vm::render(&code))
}

/// Serialize one source unit's token stream as a tagged-element tree.
pub fn analyze_tokens(source: &str) -> Result<String, CompileError> {
    xml::write_tokens(source)
}

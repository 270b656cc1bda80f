//! Tagged-element output for analyze mode.
//!
//! Analyze mode reuses the lexer and serializes the token stream as a
//! nested element tree instead of emitting VM code. The writer keeps a
//! stack of open elements so starts and ends always balance.
use crate::{
    error::CompileError,
    lex::Lexer,
    tokens::{Token, TokenKind},
};

/// Indentation-aware writer for nested tagged elements.
pub struct XmlWriter {
    out: String,
    stack: Vec<String>,
    indentation: &'static str,
}

impl XmlWriter {
    pub fn new() -> Self {
        Self {
            out: String::new(),
            stack: vec![],
            indentation: "    ",
        }
    }

    /// Open a nested element.
    pub fn start(&mut self, tag: &str) {
        self.write_indentation();
        self.out.push('<');
        self.out.push_str(&escape(tag));
        self.out.push_str(">\n");
        self.stack.push(tag.to_string());
    }

    /// Close the innermost open element.
    pub fn end(&mut self) {
        let tag = self.stack.pop().expect("no element open");
        self.write_indentation();
        self.out.push_str("</");
        self.out.push_str(&escape(&tag));
        self.out.push_str(">\n");
    }

    /// Write one token as a leaf element tagged with its kind.
    pub fn write_token(&mut self, token: &Token) {
        let tag = kind_tag(token.kind);
        self.write_indentation();
        self.out.push('<');
        self.out.push_str(tag);
        self.out.push_str("> ");
        self.out.push_str(&escape(token.text()));
        self.out.push_str(" </");
        self.out.push_str(tag);
        self.out.push_str(">\n");
    }

    /// Finish writing and return the document text.
    pub fn finish(self) -> String {
        debug_assert!(self.stack.is_empty(), "unbalanced elements");
        self.out
    }

    fn write_indentation(&mut self) {
        for _ in 0..self.stack.len() {
            self.out.push_str(self.indentation);
        }
    }
}

impl Default for XmlWriter {
    fn default() -> Self {
        XmlWriter::new()
    }
}

fn kind_tag(kind: TokenKind) -> &'static str {
    use TokenKind as T;
    match kind {
        T::Keyword(_) => "keyword",
        T::Ident => "identifier",
        T::IntConst => "integerConstant",
        T::StrConst => "stringConstant",
        T::Symbol(_) => "symbol",
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\'' => escaped.push_str("&apos;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Serialize a unit's token stream as a `<tokens>` document.
pub fn write_tokens(source: &str) -> Result<String, CompileError> {
    let mut lexer = Lexer::new(source);
    let mut writer = XmlWriter::new();

    writer.start("tokens");
    while !lexer.finished() {
        let token = lexer.next_token()?;
        writer.write_token(&token);
    }
    writer.end();

    Ok(writer.finish())
}

use jackc::{
    error::CompileError,
    lex::Lexer,
    token_stream::TokenStream,
    tokens::{Keyword, TokenKind},
};

#[test]
fn test_lex_kinds_and_positions() {
    let mut lexer = Lexer::new("class Foo {");

    let token = lexer.next_token().unwrap();
    assert_eq!(token.kind, TokenKind::Keyword(Keyword::Class));
    assert_eq!(token.text(), "class");
    assert_eq!((token.pos.line, token.pos.column), (1, 1));

    let token = lexer.next_token().unwrap();
    assert_eq!(token.kind, TokenKind::Ident);
    assert_eq!(token.text(), "Foo");
    assert_eq!((token.pos.line, token.pos.column), (1, 7));

    let token = lexer.next_token().unwrap();
    assert_eq!(token.kind, TokenKind::Symbol('{'));
    assert_eq!((token.pos.line, token.pos.column), (1, 11));

    assert!(lexer.finished());
}

#[test]
fn test_lex_skips_comments() {
    let mut lexer = Lexer::new("// line comment\n/* block */ 42");

    let token = lexer.next_token().unwrap();
    assert_eq!(token.kind, TokenKind::IntConst);
    assert_eq!(token.text(), "42");
    assert_eq!((token.pos.line, token.pos.column), (2, 13));

    assert!(lexer.finished());
}

#[test]
fn test_lex_block_comment_never_nests() {
    // Scanning stops at the first `*/`; the rest is ordinary tokens.
    let mut lexer = Lexer::new("/* outer /* inner */ x");

    let token = lexer.next_token().unwrap();
    assert_eq!(token.kind, TokenKind::Ident);
    assert_eq!(token.text(), "x");
}

#[test]
fn test_lex_string_constant() {
    let mut lexer = Lexer::new("\"hello world\"");

    let token = lexer.next_token().unwrap();
    assert_eq!(token.kind, TokenKind::StrConst);
    // Text excludes the quotes.
    assert_eq!(token.text(), "hello world");
    assert_eq!((token.pos.line, token.pos.column), (1, 1));
}

#[test]
fn test_lex_unterminated_string() {
    let mut lexer = Lexer::new("let s = \"abc\ndef\"");

    lexer.next_token().unwrap(); // let
    lexer.next_token().unwrap(); // s
    lexer.next_token().unwrap(); // =

    match lexer.next_token() {
        Err(CompileError::UnterminatedString { pos }) => {
            // Reported at the end of the previous token.
            assert_eq!(pos.line, 1);
            assert_eq!(pos.column, 8);
        }
        other => panic!("expected unterminated string error, got {:?}", other),
    }
}

#[test]
fn test_lex_unexpected_character() {
    let mut lexer = Lexer::new("$");

    match lexer.next_token() {
        Err(CompileError::UnexpectedCharacter { character, pos }) => {
            assert_eq!(character, '$');
            assert_eq!((pos.line, pos.column), (1, 1));
        }
        other => panic!("expected unexpected character error, got {:?}", other),
    }
}

#[test]
fn test_lex_end_of_input() {
    let mut lexer = Lexer::new("   // only trivia left\n");

    assert!(lexer.finished());
    assert!(matches!(
        lexer.next_token(),
        Err(CompileError::EndOfInput { .. })
    ));
}

#[test]
fn test_stream_lookahead_is_idempotent() {
    let lexer = Lexer::new("foo . bar ( )");
    let mut stream = TokenStream::new(lexer);

    assert_eq!(stream.peek_ahead(2).unwrap().kind, TokenKind::Symbol('.'));
    assert_eq!(stream.peek_ahead(2).unwrap().kind, TokenKind::Symbol('.'));
    assert_eq!(stream.peek().unwrap().kind, TokenKind::Ident);

    // Peeking consumed nothing.
    let token = stream.next_token().unwrap();
    assert_eq!(token.text(), "foo");
}

#[test]
fn test_stream_consume_mismatch() {
    let lexer = Lexer::new("foo");
    let mut stream = TokenStream::new(lexer);

    // Wrong syntactic type entirely.
    assert!(matches!(
        stream.consume(TokenKind::Symbol(';')),
        Err(CompileError::TokenTypeMismatch { .. })
    ));

    // The mismatch did not consume the token.
    assert_eq!(stream.next_token().unwrap().text(), "foo");
}

#[test]
fn test_stream_consume_value_mismatch() {
    let lexer = Lexer::new("} ;");
    let mut stream = TokenStream::new(lexer);

    // Same syntactic type, wrong literal value.
    assert!(matches!(
        stream.consume(TokenKind::Symbol('{')),
        Err(CompileError::TokenValueMismatch { .. })
    ));
}

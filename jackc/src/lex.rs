//! Lexical analysis (tokenizer)
use crate::{
    error::CompileError,
    tokens::{is_symbol, Keyword, SourcePos, Token, TokenKind},
};

use itertools::{multipeek, MultiPeek};
use smol_str::SmolStr;
use std::str::{CharIndices, FromStr};

pub fn debug_print_lexer(mut lexer: Lexer) {
    println!("Source Byte Count: {}", lexer.source.original.len());

    while !lexer.finished() {
        match lexer.next_token() {
            Ok(token) => {
                println!(
                    "{:3}:{:<3} {:<16?} {}",
                    token.pos.line, token.pos.column, token.kind, token.text
                );
            }
            Err(err) => {
                println!("{}", err);
                break;
            }
        }
    }
}

/// Lexical analyzer.
///
/// Splits a source unit into tokens, skipping whitespace and both
/// comment styles. Tokens record the line and column where they start.
pub struct Lexer<'a> {
    pub(crate) source: SourceText<'a>,
    /// Position of the current token's first character.
    token_start: SourcePos,
    /// Byte offset of the current token's first character.
    token_start_offset: usize,
    /// Position just past the previously returned token. Used to report
    /// unterminated strings at the point the string started going wrong,
    /// not wherever scanning gave up.
    prev_end: SourcePos,
}

impl<'a> Lexer<'a> {
    pub fn new(source_code: &'a str) -> Self {
        Self {
            source: SourceText::new(source_code),
            token_start: SourcePos::start(),
            token_start_offset: 0,
            prev_end: SourcePos::start(),
        }
    }

    /// Consume and return the next token.
    ///
    /// Returns [`CompileError::EndOfInput`] when only whitespace and
    /// comments remain. Callers that can legally stop should check
    /// [`finished`](Self::finished) first.
    pub fn next_token(&mut self) -> Result<Token, CompileError> {
        self.skip_trivia();

        let (index, next_char) = match self.source.next_char() {
            Some(pair) => pair,
            None => {
                return Err(CompileError::EndOfInput {
                    pos: self.source.pos(),
                })
            }
        };

        self.token_start = self.source.last_pos();
        self.token_start_offset = index;

        let token = match next_char {
            '0'..='9' => self.consume_number(),
            '_' | 'a'..='z' | 'A'..='Z' => self.consume_ident(),
            '"' => self.consume_string()?,
            c if is_symbol(c) => self.make_token(TokenKind::Symbol(c)),
            c => {
                return Err(CompileError::UnexpectedCharacter {
                    character: c,
                    pos: self.token_start,
                })
            }
        };

        // Recorded only once the token completes, so trivia skipped by
        // a later call cannot move it.
        self.prev_end = self.source.pos();
        Ok(token)
    }

    /// Indicates whether only whitespace and comments remain.
    pub fn finished(&mut self) -> bool {
        self.skip_trivia();
        self.source.at_end()
    }

    /// Position of the next unread character.
    pub fn pos(&self) -> SourcePos {
        self.source.pos()
    }

    /// Erase whitespace, line comments and block comments until a
    /// token-starting character is reached.
    ///
    /// Block comments do not nest; scanning stops at the first `*/`.
    /// An unclosed block comment runs to the end of the source.
    fn skip_trivia(&mut self) {
        loop {
            self.source.reset_peek();
            match self.source.peek_char() {
                Some((_, ' ')) | Some((_, '\t')) | Some((_, '\r')) | Some((_, '\n')) => {
                    self.source.next_char();
                }
                Some((_, '/')) => match self.source.peek_char() {
                    Some((_, '/')) => {
                        self.source.next_char();
                        self.source.next_char();
                        self.consume_line_comment();
                    }
                    Some((_, '*')) => {
                        self.source.next_char();
                        self.source.next_char();
                        self.consume_block_comment();
                    }
                    _ => {
                        // A lone slash is the division symbol.
                        self.source.reset_peek();
                        return;
                    }
                },
                _ => {
                    self.source.reset_peek();
                    return;
                }
            }
        }
    }

    fn consume_line_comment(&mut self) {
        loop {
            self.source.reset_peek();
            match self.source.peek_char() {
                Some((_, '\n')) | None => return,
                Some(_) => {
                    self.source.next_char();
                }
            }
        }
    }

    fn consume_block_comment(&mut self) {
        while let Some((_, c)) = self.source.next_char() {
            if c == '*' {
                self.source.reset_peek();
                if let Some((_, '/')) = self.source.peek_char() {
                    self.source.next_char();
                    return;
                }
            }
        }
    }

    fn consume_number(&mut self) -> Token {
        self.source.reset_peek();
        while let Some((_, '0'..='9')) = self.source.peek_char() {
            self.source.next_char();
            self.source.reset_peek();
        }

        self.make_token(TokenKind::IntConst)
    }

    fn consume_ident(&mut self) -> Token {
        self.source.reset_peek();
        while let Some((_, c)) = self.source.peek_char() {
            match c {
                '_' | 'a'..='z' | 'A'..='Z' | '0'..='9' => {
                    self.source.next_char();
                    self.source.reset_peek();
                }
                _ => break,
            }
        }

        // If a valid keyword can be parsed from the source fragment, then
        // the token is a reserved word instead of a user defined identifier.
        let token_kind = Keyword::from_str(self.fragment())
            .map(TokenKind::Keyword)
            .unwrap_or(TokenKind::Ident);
        self.make_token(token_kind)
    }

    /// Scan a string constant. The opening quote has been consumed.
    ///
    /// The token's text excludes both quotes. A newline before the
    /// closing quote is a fatal error, reported at the end of the
    /// previous token.
    fn consume_string(&mut self) -> Result<Token, CompileError> {
        let content_start = self.token_start_offset + 1;

        loop {
            match self.source.next_char() {
                Some((index, '"')) => {
                    let text = SmolStr::from(&self.source.original[content_start..index]);
                    return Ok(Token {
                        kind: TokenKind::StrConst,
                        text,
                        pos: self.token_start,
                    });
                }
                Some((_, '\n')) => {
                    return Err(CompileError::UnterminatedString { pos: self.prev_end })
                }
                Some(_) => continue,
                None => {
                    return Err(CompileError::EndOfInput {
                        pos: self.source.pos(),
                    })
                }
            }
        }
    }

    fn make_token(&mut self, token_kind: TokenKind) -> Token {
        Token {
            kind: token_kind,
            text: SmolStr::from(self.fragment()),
            pos: self.token_start,
        }
    }

    fn fragment(&self) -> &str {
        &self.source.original[self.token_start_offset..self.source.offset]
    }
}

/// Wrapper for source code that keeps a cursor position.
///
/// Allows forward lookup via peeking.
pub(crate) struct SourceText<'a> {
    /// Keep reference to the source so the lexer can
    /// slice fragments from it.
    pub(crate) original: &'a str,

    /// Iterator over UTF-8 encoded source code.
    ///
    /// The `MultiPeek` wrapper allows for arbitrary lookahead by consuming
    /// the iterator internally and buffering the result. Peeking advances
    /// the internal peek cursor by one; it is restored by `next()` or
    /// `reset_peek()`.
    chars: MultiPeek<CharIndices<'a>>,

    /// Position of the next unread character.
    next_pos: SourcePos,
    /// Position of the most recently consumed character.
    last: SourcePos,
    /// Byte offset just past the most recently consumed character.
    offset: usize,
}

impl<'a> SourceText<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            original: source,
            chars: multipeek(source.char_indices()),
            next_pos: SourcePos::start(),
            last: SourcePos::start(),
            offset: 0,
        }
    }

    /// Advance the cursor and return the next byte offset and character.
    fn next_char(&mut self) -> Option<(usize, char)> {
        let (index, c) = self.chars.next()?;

        self.last = self.next_pos;
        if c == '\n' {
            self.next_pos.line += 1;
            self.next_pos.column = 1;
        } else {
            self.next_pos.column += 1;
        }
        self.offset = index + c.len_utf8();

        Some((index, c))
    }

    /// Peeks the next character in the stream.
    ///
    /// This call advances the peek cursor. Subsequent calls will look
    /// ahead by one character each call.
    fn peek_char(&mut self) -> Option<(usize, char)> {
        self.chars.peek().cloned()
    }

    /// Reset the stream peek cursor.
    fn reset_peek(&mut self) {
        self.chars.reset_peek()
    }

    /// Position of the next unread character.
    fn pos(&self) -> SourcePos {
        self.next_pos
    }

    /// Position of the most recently consumed character.
    fn last_pos(&self) -> SourcePos {
        self.last
    }

    /// Indicates if the cursor is at the end of the source.
    fn at_end(&self) -> bool {
        self.offset >= self.original.len()
    }
}

//! Buffered stream of tokens for look ahead.
use crate::{
    error::CompileError,
    lex::Lexer,
    tokens::{Keyword, Token, TokenKind},
};

use std::collections::VecDeque;

/// Buffered stream of tokens that allows arbitrary look ahead.
///
/// Tokens are lazily lexed. Peeking or consuming the next token
/// triggers the internal lexer.
///
/// Lookahead is a queue of already-computed tokens, so peeking is
/// idempotent and never re-derives lexer position state. The parser
/// relies on this to disambiguate `name(`, `name.`, and `name[` forms
/// with two-token lookahead.
pub struct TokenStream<'a> {
    lexer: Lexer<'a>,
    buffer: VecDeque<Token>,
}

impl<'a> TokenStream<'a> {
    #[inline]
    pub fn new(lexer: Lexer<'a>) -> Self {
        Self {
            lexer,
            buffer: VecDeque::new(),
        }
    }

    /// Pre-lex tokens until the buffer holds `depth` of them.
    fn fill(&mut self, depth: usize) -> Result<(), CompileError> {
        while self.buffer.len() < depth {
            if self.lexer.finished() {
                return Err(CompileError::EndOfInput {
                    pos: self.lexer.pos(),
                });
            }
            let token = self.lexer.next_token()?;
            self.buffer.push_back(token);
        }
        Ok(())
    }

    /// Return the current token without advancing the cursor.
    #[inline]
    pub fn peek(&mut self) -> Result<&Token, CompileError> {
        self.peek_ahead(1)
    }

    /// Return the k-th lookahead token (k >= 1) without consuming any.
    pub fn peek_ahead(&mut self, k: usize) -> Result<&Token, CompileError> {
        debug_assert!(k >= 1, "lookahead is 1-based");
        self.fill(k)?;
        Ok(&self.buffer[k - 1])
    }

    /// Consumes the current token regardless of type.
    pub fn next_token(&mut self) -> Result<Token, CompileError> {
        self.fill(1)?;
        match self.buffer.pop_front() {
            Some(token) => Ok(token),
            None => Err(CompileError::EndOfInput {
                pos: self.lexer.pos(),
            }),
        }
    }

    /// Return the current token and advance the cursor.
    ///
    /// The consumed token must match the given token kind. A token of a
    /// different syntactic type is a type mismatch; a keyword or symbol
    /// of the right type but the wrong value is a value mismatch. The
    /// cursor is not advanced when the kinds do not match.
    pub fn consume(&mut self, token_kind: TokenKind) -> Result<Token, CompileError> {
        let token = self.peek()?;

        if token.kind == token_kind {
            return self.next_token();
        }

        Err(Self::mismatch(token, token_kind))
    }

    fn mismatch(token: &Token, expected: TokenKind) -> CompileError {
        use TokenKind as T;
        match (expected, token.kind) {
            (T::Symbol(symbol), T::Symbol(_)) => CompileError::TokenValueMismatch {
                expected: symbol.to_string(),
                encountered: token.text.clone(),
                pos: token.pos,
            },
            (T::Keyword(keyword), T::Keyword(_)) => CompileError::TokenValueMismatch {
                expected: keyword.to_string(),
                encountered: token.text.clone(),
                pos: token.pos,
            },
            _ => CompileError::TokenTypeMismatch {
                expected: expected.to_string(),
                encountered: token.kind,
                pos: token.pos,
            },
        }
    }

    /// Consumes the current token if it is the given symbol.
    ///
    /// Returns true when matched. Does not consume the token otherwise.
    pub fn match_symbol(&mut self, symbol: char) -> Result<bool, CompileError> {
        let is_match = self.peek()?.kind == TokenKind::Symbol(symbol);
        if is_match {
            self.next_token()?;
        }
        Ok(is_match)
    }

    /// Consumes the current token if it is the given keyword.
    pub fn match_keyword(&mut self, keyword: Keyword) -> Result<bool, CompileError> {
        let is_match = self.peek()?.kind == TokenKind::Keyword(keyword);
        if is_match {
            self.next_token()?;
        }
        Ok(is_match)
    }

    /// Indicates whether the stream has no more tokens.
    pub fn finished(&mut self) -> bool {
        self.buffer.is_empty() && self.lexer.finished()
    }
}

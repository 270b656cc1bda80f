//! Statement parsing.
use super::{Parser, ScopeCtx};
use crate::{
    ast::{IfStmt, LetStmt, Stmt, WhileStmt},
    error::CompileError,
    tokens::{Keyword, TokenKind},
};

impl<'a> Parser<'a> {
    /// statement* — stops at the first token that starts no statement.
    pub(crate) fn parse_statements(&mut self, ctx: &ScopeCtx) -> Result<Vec<Stmt>, CompileError> {
        use Keyword as K;

        let mut statements = vec![];

        loop {
            let statement = match self.stream.peek()?.kind {
                TokenKind::Keyword(K::Let) => self.parse_let(ctx)?,
                TokenKind::Keyword(K::If) => self.parse_if(ctx)?,
                TokenKind::Keyword(K::While) => self.parse_while(ctx)?,
                TokenKind::Keyword(K::Do) => self.parse_do(ctx)?,
                TokenKind::Keyword(K::Return) => self.parse_return(ctx)?,
                _ => return Ok(statements),
            };
            statements.push(statement);
        }
    }

    /// letStmt := 'let' Identifier ('[' expression ']')? '=' expression ';'
    fn parse_let(&mut self, ctx: &ScopeCtx) -> Result<Stmt, CompileError> {
        self.stream.consume(TokenKind::Keyword(Keyword::Let))?;
        let target = self.parse_variable_access(ctx)?;
        self.stream.consume(TokenKind::Symbol('='))?;
        let value = self.parse_expression(ctx)?;
        self.stream.consume(TokenKind::Symbol(';'))?;

        Ok(Stmt::Let(LetStmt { target, value }))
    }

    /// ifStmt := 'if' '(' expression ')' '{' statement* '}'
    ///           ('else' '{' statement* '}')?
    fn parse_if(&mut self, ctx: &ScopeCtx) -> Result<Stmt, CompileError> {
        self.stream.consume(TokenKind::Keyword(Keyword::If))?;
        self.stream.consume(TokenKind::Symbol('('))?;
        let condition = self.parse_expression(ctx)?;
        self.stream.consume(TokenKind::Symbol(')'))?;

        self.stream.consume(TokenKind::Symbol('{'))?;
        let true_branch = self.parse_statements(ctx)?;
        self.stream.consume(TokenKind::Symbol('}'))?;

        let false_branch = if self.stream.match_keyword(Keyword::Else)? {
            self.stream.consume(TokenKind::Symbol('{'))?;
            let statements = self.parse_statements(ctx)?;
            self.stream.consume(TokenKind::Symbol('}'))?;
            Some(statements)
        } else {
            None
        };

        Ok(Stmt::If(IfStmt {
            condition,
            true_branch,
            false_branch,
        }))
    }

    /// whileStmt := 'while' '(' expression ')' '{' statement* '}'
    fn parse_while(&mut self, ctx: &ScopeCtx) -> Result<Stmt, CompileError> {
        self.stream.consume(TokenKind::Keyword(Keyword::While))?;
        self.stream.consume(TokenKind::Symbol('('))?;
        let condition = self.parse_expression(ctx)?;
        self.stream.consume(TokenKind::Symbol(')'))?;

        self.stream.consume(TokenKind::Symbol('{'))?;
        let body = self.parse_statements(ctx)?;
        self.stream.consume(TokenKind::Symbol('}'))?;

        Ok(Stmt::While(WhileStmt { condition, body }))
    }

    /// doStmt := 'do' subroutineCall ';'
    fn parse_do(&mut self, ctx: &ScopeCtx) -> Result<Stmt, CompileError> {
        self.stream.consume(TokenKind::Keyword(Keyword::Do))?;
        let call = self.parse_subroutine_call(ctx)?;
        self.stream.consume(TokenKind::Symbol(';'))?;

        Ok(Stmt::Do(call))
    }

    /// returnStmt := 'return' expression? ';'
    fn parse_return(&mut self, ctx: &ScopeCtx) -> Result<Stmt, CompileError> {
        self.stream.consume(TokenKind::Keyword(Keyword::Return))?;

        let value = if self.stream.peek()?.kind == TokenKind::Symbol(';') {
            None
        } else {
            Some(self.parse_expression(ctx)?)
        };
        self.stream.consume(TokenKind::Symbol(';'))?;

        Ok(Stmt::Return(value))
    }
}

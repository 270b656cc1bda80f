//! Expression and term parsing.
use super::{Parser, ScopeCtx};
use crate::{
    ast::{BinaryOp, Expr, KeywordConst, SubroutineCall, UnaryOp, VarAccess},
    error::CompileError,
    tokens::{Keyword, TokenKind},
};

use smol_str::SmolStr;

impl<'a> Parser<'a> {
    /// expression := term (binaryOp term)*
    ///
    /// Flat and left-associative; the object language has a single
    /// precedence level.
    pub(crate) fn parse_expression(&mut self, ctx: &ScopeCtx) -> Result<Expr, CompileError> {
        let mut expression = self.parse_term(ctx)?;

        loop {
            let op = match self.stream.peek()?.kind {
                TokenKind::Symbol(symbol) => match BinaryOp::from_symbol(symbol) {
                    Some(op) => op,
                    None => return Ok(expression),
                },
                _ => return Ok(expression),
            };
            self.stream.next_token()?;

            let rhs = self.parse_term(ctx)?;
            expression = Expr::Binary(op, Box::new(expression), Box::new(rhs));
        }
    }

    /// term := integerConstant | stringConstant | keywordConstant
    ///       | Identifier ('[' expression ']')? | subroutineCall
    ///       | '(' expression ')' | ('-'|'~') term
    pub(crate) fn parse_term(&mut self, ctx: &ScopeCtx) -> Result<Expr, CompileError> {
        use Keyword as K;

        let token = self.stream.peek()?;
        let pos = token.pos;

        match token.kind {
            TokenKind::IntConst => {
                let token = self.stream.next_token()?;
                let value =
                    token
                        .text()
                        .parse::<u16>()
                        .map_err(|_| CompileError::TokenValueMismatch {
                            expected: "integer constant in range".to_string(),
                            encountered: token.text.clone(),
                            pos: token.pos,
                        })?;
                Ok(Expr::Int(value))
            }
            TokenKind::StrConst => {
                let token = self.stream.next_token()?;
                // Each character becomes one VM word at emission.
                if token.text().chars().any(|c| c as u32 > u16::MAX as u32) {
                    return Err(CompileError::TokenValueMismatch {
                        expected: "string constant with single-word character codes".to_string(),
                        encountered: token.text.clone(),
                        pos: token.pos,
                    });
                }
                Ok(Expr::Str(token.text))
            }
            TokenKind::Keyword(K::True) => {
                self.stream.next_token()?;
                Ok(Expr::Keyword(KeywordConst::True))
            }
            TokenKind::Keyword(K::False) => {
                self.stream.next_token()?;
                Ok(Expr::Keyword(KeywordConst::False))
            }
            TokenKind::Keyword(K::Null) => {
                self.stream.next_token()?;
                Ok(Expr::Keyword(KeywordConst::Null))
            }
            TokenKind::Keyword(K::This) => {
                self.stream.next_token()?;
                Ok(Expr::Var(VarAccess {
                    variable: ctx.class.this().clone(),
                    index: None,
                }))
            }
            TokenKind::Ident => {
                // Two-token lookahead decides between a bare variable
                // and the call forms `name(` / `name.sub(`.
                match self.stream.peek_ahead(2)?.kind {
                    TokenKind::Symbol('(') | TokenKind::Symbol('.') => {
                        self.parse_subroutine_call(ctx).map(Expr::Call)
                    }
                    _ => self.parse_variable_access(ctx).map(Expr::Var),
                }
            }
            TokenKind::Symbol('(') => {
                self.stream.next_token()?;
                let inner = self.parse_expression(ctx)?;
                self.stream.consume(TokenKind::Symbol(')'))?;
                Ok(Expr::Brackets(Box::new(inner)))
            }
            TokenKind::Symbol('-') => {
                self.stream.next_token()?;
                let operand = self.parse_term(ctx)?;
                Ok(Expr::Unary(UnaryOp::Negate, Box::new(operand)))
            }
            TokenKind::Symbol('~') => {
                self.stream.next_token()?;
                let operand = self.parse_term(ctx)?;
                Ok(Expr::Unary(UnaryOp::Not, Box::new(operand)))
            }
            kind => Err(CompileError::TokenTypeMismatch {
                expected: "term".to_string(),
                encountered: kind,
                pos,
            }),
        }
    }

    /// Identifier ('[' expression ']')? — resolved against the scope
    /// chain; an unknown name is fatal here.
    pub(crate) fn parse_variable_access(
        &mut self,
        ctx: &ScopeCtx,
    ) -> Result<VarAccess, CompileError> {
        let name = self.read_identifier()?;
        let variable = ctx.resolve(&name)?;

        let index = if self.stream.match_symbol('[')? {
            let index = self.parse_expression(ctx)?;
            self.stream.consume(TokenKind::Symbol(']'))?;
            Some(Box::new(index))
        } else {
            None
        };

        Ok(VarAccess { variable, index })
    }

    /// subroutineCall := Identifier '(' expressionList ')'
    ///                 | Identifier '.' Identifier '(' expressionList ')'
    ///
    /// The leading identifier is resolved through the scope model: a
    /// variable in scope makes this a method call on that variable,
    /// with the receiver prepended to the arguments and the variable's
    /// static type as the call qualifier. Otherwise the identifier is
    /// itself the class qualifier. A bare `name(...)` is an implicit
    /// method call on `this`.
    pub(crate) fn parse_subroutine_call(
        &mut self,
        ctx: &ScopeCtx,
    ) -> Result<SubroutineCall, CompileError> {
        let first = self.read_identifier()?;

        let (receiver, qualifier, name) = if self.stream.match_symbol('.')? {
            let name = self.read_identifier()?;
            match ctx.subroutine.resolve(ctx.class, first.text()) {
                Some(variable) => {
                    let variable = variable.clone();
                    let qualifier = variable.ty.clone();
                    (Some(variable), qualifier, name.text)
                }
                None => (None, first.text, name.text),
            }
        } else {
            let this = ctx.class.this().clone();
            let qualifier = this.ty.clone();
            (Some(this), qualifier, first.text)
        };

        let mut args = vec![];
        if let Some(variable) = receiver {
            args.push(Expr::Var(VarAccess {
                variable,
                index: None,
            }));
        }

        self.stream.consume(TokenKind::Symbol('('))?;
        if self.stream.peek()?.kind != TokenKind::Symbol(')') {
            loop {
                args.push(self.parse_expression(ctx)?);
                if !self.stream.match_symbol(',')? {
                    break;
                }
            }
        }
        self.stream.consume(TokenKind::Symbol(')'))?;

        let target = SmolStr::from(format!("{}.{}", qualifier, name));
        Ok(SubroutineCall { target, args })
    }
}

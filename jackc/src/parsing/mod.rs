//! Recursive-descent parser.
//!
//! One method per grammar production. The parser populates the scope
//! model and builds the tree bottom-up in a single pass; identifier
//! resolution happens while expressions are parsed, not in a separate
//! walk. The first error aborts the unit.
mod expr;
mod stmt;

use crate::{
    ast::{Class, Subroutine, SubroutineKind},
    error::CompileError,
    scope::{ClassScope, SubroutineScope, Variable},
    token_stream::TokenStream,
    tokens::{Keyword, Token, TokenKind},
};

use smol_str::SmolStr;

pub struct Parser<'a> {
    stream: TokenStream<'a>,
}

/// Read-only view of the scope chain while a subroutine body is being
/// parsed. Declarations are finished by then; both scopes are frozen.
pub(crate) struct ScopeCtx<'c> {
    pub class: &'c ClassScope,
    pub subroutine: &'c SubroutineScope,
}

impl ScopeCtx<'_> {
    /// Resolve an identifier token that must name a variable.
    pub(crate) fn resolve(&self, token: &Token) -> Result<Variable, CompileError> {
        self.subroutine
            .resolve(self.class, token.text())
            .cloned()
            .ok_or_else(|| CompileError::UndefinedName {
                name: token.text.clone(),
                pos: token.pos,
            })
    }
}

impl<'a> Parser<'a> {
    pub fn new(stream: TokenStream<'a>) -> Self {
        Self { stream }
    }

    /// class := 'class' Identifier '{' classVarDec* subroutineDec* '}'
    pub fn parse_class(&mut self) -> Result<Class, CompileError> {
        self.stream.consume(TokenKind::Keyword(Keyword::Class))?;
        let name = self.read_identifier()?;
        let mut scope = ClassScope::new(name.text.clone());

        self.stream.consume(TokenKind::Symbol('{'))?;
        self.parse_class_vars(&mut scope)?;
        let subroutines = self.parse_subroutines(&scope)?;
        self.stream.consume(TokenKind::Symbol('}'))?;

        Ok(Class { scope, subroutines })
    }

    /// Raise if any token other than trailing trivia remains.
    pub fn expect_finished(&mut self) -> Result<(), CompileError> {
        if self.stream.finished() {
            return Ok(());
        }
        let token = self.stream.peek()?;
        Err(CompileError::TokenTypeMismatch {
            expected: "end of input".to_string(),
            encountered: token.kind,
            pos: token.pos,
        })
    }

    /// classVarDec := ('static'|'field') type Identifier (',' Identifier)* ';'
    fn parse_class_vars(&mut self, scope: &mut ClassScope) -> Result<(), CompileError> {
        loop {
            let kind = match self.stream.peek()?.kind {
                TokenKind::Keyword(keyword @ Keyword::Static)
                | TokenKind::Keyword(keyword @ Keyword::Field) => keyword,
                _ => return Ok(()),
            };
            self.stream.next_token()?;

            let ty = self.read_type()?;
            loop {
                let name = self.read_identifier()?;
                match kind {
                    Keyword::Static => {
                        scope.define_static(name.text.clone(), ty.clone(), name.pos)?
                    }
                    _ => scope.define_field(name.text.clone(), ty.clone(), name.pos)?,
                }
                if !self.stream.match_symbol(',')? {
                    break;
                }
            }
            self.stream.consume(TokenKind::Symbol(';'))?;
        }
    }

    fn parse_subroutines(&mut self, class: &ClassScope) -> Result<Vec<Subroutine>, CompileError> {
        let mut subroutines = vec![];

        loop {
            let kind = match self.stream.peek()?.kind {
                TokenKind::Keyword(Keyword::Constructor) => SubroutineKind::Constructor,
                TokenKind::Keyword(Keyword::Function) => SubroutineKind::Function,
                TokenKind::Keyword(Keyword::Method) => SubroutineKind::Method,
                _ => return Ok(subroutines),
            };
            self.stream.next_token()?;
            subroutines.push(self.parse_subroutine(class, kind)?);
        }
    }

    /// subroutineDec := ('constructor'|'function'|'method') ('void'|type)
    ///                  Identifier '(' parameterList ')' subroutineBody
    fn parse_subroutine(
        &mut self,
        class: &ClassScope,
        kind: SubroutineKind,
    ) -> Result<Subroutine, CompileError> {
        let return_type = self.read_return_type()?;
        let name = self.read_identifier()?;

        let mut scope = SubroutineScope::new();
        if kind == SubroutineKind::Method {
            // Call sites push the receiver as argument 0.
            scope.reserve_receiver_slot();
        }

        self.stream.consume(TokenKind::Symbol('('))?;
        self.parse_parameter_list(&mut scope)?;
        self.stream.consume(TokenKind::Symbol(')'))?;

        self.stream.consume(TokenKind::Symbol('{'))?;
        self.parse_var_decs(&mut scope)?;

        // Declarations are done; the scope chain is now read-only.
        let statements = {
            let ctx = ScopeCtx {
                class,
                subroutine: &scope,
            };
            self.parse_statements(&ctx)?
        };
        self.stream.consume(TokenKind::Symbol('}'))?;

        Ok(Subroutine {
            name: name.text,
            return_type,
            kind,
            scope,
            statements,
        })
    }

    /// parameterList := (type Identifier (',' type Identifier)*)?
    fn parse_parameter_list(&mut self, scope: &mut SubroutineScope) -> Result<(), CompileError> {
        if self.stream.peek()?.kind == TokenKind::Symbol(')') {
            return Ok(());
        }

        loop {
            let ty = self.read_type()?;
            let name = self.read_identifier()?;
            scope.define_argument(name.text.clone(), ty, name.pos)?;
            if !self.stream.match_symbol(',')? {
                return Ok(());
            }
        }
    }

    /// varDec := 'var' type Identifier (',' Identifier)* ';'
    fn parse_var_decs(&mut self, scope: &mut SubroutineScope) -> Result<(), CompileError> {
        while self.stream.match_keyword(Keyword::Var)? {
            let ty = self.read_type()?;
            loop {
                let name = self.read_identifier()?;
                scope.define_local(name.text.clone(), ty.clone(), name.pos)?;
                if !self.stream.match_symbol(',')? {
                    break;
                }
            }
            self.stream.consume(TokenKind::Symbol(';'))?;
        }
        Ok(())
    }

    fn read_identifier(&mut self) -> Result<Token, CompileError> {
        let token = self.stream.peek()?;
        if token.kind != TokenKind::Ident {
            return Err(CompileError::TokenTypeMismatch {
                expected: "identifier".to_string(),
                encountered: token.kind,
                pos: token.pos,
            });
        }
        self.stream.next_token()
    }

    /// A type is one of the primitive keywords or a class name.
    fn read_type(&mut self) -> Result<SmolStr, CompileError> {
        let token = self.stream.peek()?;
        match token.kind {
            TokenKind::Ident
            | TokenKind::Keyword(Keyword::Int)
            | TokenKind::Keyword(Keyword::Char)
            | TokenKind::Keyword(Keyword::Boolean) => Ok(self.stream.next_token()?.text),
            kind => Err(CompileError::TokenTypeMismatch {
                expected: "type".to_string(),
                encountered: kind,
                pos: token.pos,
            }),
        }
    }

    fn read_return_type(&mut self) -> Result<SmolStr, CompileError> {
        if self.stream.peek()?.kind == TokenKind::Keyword(Keyword::Void) {
            Ok(self.stream.next_token()?.text)
        } else {
            self.read_type()
        }
    }
}

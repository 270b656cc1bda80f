//! Scope and symbol model.
//!
//! Scopes are mutable while their owning class or subroutine is being
//! parsed, then used as read-only lookup tables during code generation.
use crate::{error::CompileError, tokens::SourcePos};

use smol_str::SmolStr;
use std::{collections::BTreeMap, fmt};

/// Named memory region in the target VM, used as an addressing
/// namespace for push and pop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Constant,
    Argument,
    Local,
    Static,
    This,
    That,
    Pointer,
    Temp,
}

impl fmt::Display for Segment {
    #[rustfmt::skip]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Segment as S;
        let name = match self {
            S::Constant => "constant",
            S::Argument => "argument",
            S::Local    => "local",
            S::Static   => "static",
            S::This     => "this",
            S::That     => "that",
            S::Pointer  => "pointer",
            S::Temp     => "temp",
        };
        write!(f, "{}", name)
    }
}

/// A declared variable bound to a memory segment and an ordinal index.
///
/// Created once when its declaration is parsed and never mutated.
/// AST nodes hold clones by value, so the tree stays free of sharing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub name: SmolStr,
    pub ty: SmolStr,
    pub segment: Segment,
    pub index: u16,
}

/// Class-level scope: statics and fields in one shared namespace, plus
/// the implicit `this` pseudo-variable typed as the class itself.
#[derive(Debug)]
pub struct ClassScope {
    name: SmolStr,
    symbols: BTreeMap<SmolStr, Variable>,
    static_count: u16,
    field_count: u16,
    this: Variable,
}

impl ClassScope {
    pub fn new(name: SmolStr) -> Self {
        let this = Variable {
            name: SmolStr::from("this"),
            ty: name.clone(),
            segment: Segment::Pointer,
            index: 0,
        };
        Self {
            name,
            symbols: BTreeMap::new(),
            static_count: 0,
            field_count: 0,
            this,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Number of fields declared so far. Sizes the constructor's
    /// allocation request.
    #[inline]
    pub fn field_count(&self) -> u16 {
        self.field_count
    }

    /// The implicit receiver variable, segment `pointer` index 0.
    #[inline]
    pub fn this(&self) -> &Variable {
        &self.this
    }

    pub fn define_static(
        &mut self,
        name: SmolStr,
        ty: SmolStr,
        pos: SourcePos,
    ) -> Result<(), CompileError> {
        let index = self.static_count;
        self.define(name, ty, Segment::Static, index, pos)?;
        self.static_count += 1;
        Ok(())
    }

    pub fn define_field(
        &mut self,
        name: SmolStr,
        ty: SmolStr,
        pos: SourcePos,
    ) -> Result<(), CompileError> {
        let index = self.field_count;
        self.define(name, ty, Segment::This, index, pos)?;
        self.field_count += 1;
        Ok(())
    }

    fn define(
        &mut self,
        name: SmolStr,
        ty: SmolStr,
        segment: Segment,
        index: u16,
        pos: SourcePos,
    ) -> Result<(), CompileError> {
        if self.symbols.contains_key(&name) {
            return Err(CompileError::NameAlreadyDefined { name, pos });
        }
        self.symbols.insert(
            name.clone(),
            Variable {
                name,
                ty,
                segment,
                index,
            },
        );
        Ok(())
    }

    /// Look up a name at class level. `this` resolves to the implicit
    /// receiver.
    pub fn resolve(&self, name: &str) -> Option<&Variable> {
        if name == "this" {
            Some(&self.this)
        } else {
            self.symbols.get(name)
        }
    }
}

/// Subroutine-level scope: arguments and locals in one shared
/// namespace, shadowing the enclosing class scope.
#[derive(Debug)]
pub struct SubroutineScope {
    symbols: BTreeMap<SmolStr, Variable>,
    arg_count: u16,
    local_count: u16,
}

impl SubroutineScope {
    pub fn new() -> Self {
        Self {
            symbols: BTreeMap::new(),
            arg_count: 0,
            local_count: 0,
        }
    }

    /// Reserve argument slot 0 for the implicit receiver of a method,
    /// so user-declared arguments begin at index 1. The slot holds no
    /// named variable; call sites push the receiver as argument 0.
    pub fn reserve_receiver_slot(&mut self) {
        debug_assert_eq!(self.arg_count, 0, "receiver slot must be reserved first");
        self.arg_count = 1;
    }

    #[inline]
    pub fn local_count(&self) -> u16 {
        self.local_count
    }

    pub fn define_argument(
        &mut self,
        name: SmolStr,
        ty: SmolStr,
        pos: SourcePos,
    ) -> Result<(), CompileError> {
        let index = self.arg_count;
        self.define(name, ty, Segment::Argument, index, pos)?;
        self.arg_count += 1;
        Ok(())
    }

    pub fn define_local(
        &mut self,
        name: SmolStr,
        ty: SmolStr,
        pos: SourcePos,
    ) -> Result<(), CompileError> {
        let index = self.local_count;
        self.define(name, ty, Segment::Local, index, pos)?;
        self.local_count += 1;
        Ok(())
    }

    fn define(
        &mut self,
        name: SmolStr,
        ty: SmolStr,
        segment: Segment,
        index: u16,
        pos: SourcePos,
    ) -> Result<(), CompileError> {
        if self.symbols.contains_key(&name) {
            return Err(CompileError::NameAlreadyDefined { name, pos });
        }
        self.symbols.insert(
            name.clone(),
            Variable {
                name,
                ty,
                segment,
                index,
            },
        );
        Ok(())
    }

    /// Walk the scope chain: subroutine scope first, then the enclosing
    /// class scope (which also answers for `this`).
    pub fn resolve<'a>(&'a self, class: &'a ClassScope, name: &str) -> Option<&'a Variable> {
        self.symbols.get(name).or_else(|| class.resolve(name))
    }
}

impl Default for SubroutineScope {
    fn default() -> Self {
        SubroutineScope::new()
    }
}

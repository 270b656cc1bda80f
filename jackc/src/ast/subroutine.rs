//! Subroutine nodes.
use super::stmt::Stmt;
use crate::{
    scope::{Segment, SubroutineScope},
    vm::Instr,
};

use smol_str::SmolStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubroutineKind {
    Constructor,
    Function,
    Method,
}

/// One subroutine of a class.
///
/// Built incrementally during parsing: created from its declaration
/// header, populated with argument and local declarations, then its
/// statement list. Immutable afterward.
#[derive(Debug)]
pub struct Subroutine {
    pub name: SmolStr,
    pub return_type: SmolStr,
    pub kind: SubroutineKind,
    /// Arguments and locals, frozen once the body's declarations end.
    pub scope: SubroutineScope,
    pub statements: Vec<Stmt>,
}

impl Subroutine {
    pub(crate) fn emit(&self, class_name: &str, field_count: u16, code: &mut Vec<Instr>) {
        use Instr as I;

        let qualified = SmolStr::from(format!("{}.{}", class_name, self.name));
        code.push(I::Function(qualified, self.scope.local_count()));

        match self.kind {
            SubroutineKind::Constructor => {
                // Allocate a block sized to the field count and bind it
                // as the new object's `this`.
                code.push(I::Push(Segment::Constant, field_count));
                code.push(I::Call(SmolStr::from("Memory.alloc"), 1));
                code.push(I::Pop(Segment::Pointer, 0));
            }
            SubroutineKind::Method => {
                // Bind the receiver, pushed by the call site as
                // argument 0, to the object-field segment.
                code.push(I::Push(Segment::Argument, 0));
                code.push(I::Pop(Segment::Pointer, 0));
            }
            SubroutineKind::Function => {}
        }

        for (i, stmt) in self.statements.iter().enumerate() {
            stmt.emit(&i.to_string(), code);
        }
    }
}

//! Statement nodes.
use super::expr::{Expr, SubroutineCall, VarAccess};
use crate::{scope::Segment, vm::Instr};

use smol_str::SmolStr;

/// A statement inside a subroutine body.
#[derive(Debug)]
pub enum Stmt {
    Let(LetStmt),
    If(IfStmt),
    While(WhileStmt),
    Do(SubroutineCall),
    Return(Option<Expr>),
}

#[derive(Debug)]
pub struct LetStmt {
    pub target: VarAccess,
    pub value: Expr,
}

#[derive(Debug)]
pub struct IfStmt {
    pub condition: Expr,
    pub true_branch: Vec<Stmt>,
    pub false_branch: Option<Vec<Stmt>>,
}

#[derive(Debug)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: Vec<Stmt>,
}

impl Stmt {
    /// Emit this statement's instructions.
    ///
    /// `path` identifies the statement's structural position within its
    /// subroutine: the parent path extended with a discriminator letter
    /// and ordinal at each nesting level. Control-flow labels derive
    /// their names from it, so sibling and nested blocks can never
    /// collide and the same tree always produces identical labels.
    pub(crate) fn emit(&self, path: &str, code: &mut Vec<Instr>) {
        match self {
            Stmt::Let(stmt) => {
                stmt.value.emit(code);
                stmt.target.emit_write(code);
            }
            Stmt::If(stmt) => stmt.emit(path, code),
            Stmt::While(stmt) => stmt.emit(path, code),
            Stmt::Do(call) => {
                call.emit(code);
                // The call's return value is unused.
                code.push(Instr::Pop(Segment::Temp, 0));
            }
            Stmt::Return(value) => {
                match value {
                    Some(expr) => expr.emit(code),
                    // Void subroutines still return a word.
                    None => code.push(Instr::Push(Segment::Constant, 0)),
                }
                code.push(Instr::Return);
            }
        }
    }
}

impl IfStmt {
    fn emit(&self, path: &str, code: &mut Vec<Instr>) {
        use Instr as I;

        let true_label = SmolStr::from(format!("IF_TRUE{}", path));
        let end_label = SmolStr::from(format!("IF_END{}", path));

        self.condition.emit(code);
        code.push(I::IfGoto(true_label.clone()));

        if let Some(false_branch) = &self.false_branch {
            for (i, stmt) in false_branch.iter().enumerate() {
                stmt.emit(&format!("{}F{}", path, i), code);
            }
        }
        code.push(I::Goto(end_label.clone()));

        code.push(I::Label(true_label));
        for (i, stmt) in self.true_branch.iter().enumerate() {
            stmt.emit(&format!("{}T{}", path, i), code);
        }
        code.push(I::Label(end_label));
    }
}

impl WhileStmt {
    fn emit(&self, path: &str, code: &mut Vec<Instr>) {
        use Instr as I;

        let loop_label = SmolStr::from(format!("LOOP{}", path));
        let end_label = SmolStr::from(format!("LOOP_END{}", path));

        code.push(I::Label(loop_label.clone()));
        self.condition.emit(code);
        code.push(I::Not);
        code.push(I::IfGoto(end_label.clone()));

        for (i, stmt) in self.body.iter().enumerate() {
            stmt.emit(&format!("{}B{}", path, i), code);
        }
        code.push(I::Goto(loop_label));
        code.push(I::Label(end_label));
    }
}

//! Expression and term nodes.
use crate::{
    scope::{Segment, Variable},
    vm::Instr,
};

use smol_str::SmolStr;

/// An expression, including the term forms.
///
/// Emission is postorder: operand code first, then the combining
/// instruction, leaving the expression's value on the stack.
#[derive(Debug)]
pub enum Expr {
    Int(u16),
    Str(SmolStr),
    Keyword(KeywordConst),
    Var(VarAccess),
    /// Parenthesized expression. Transparent for code generation.
    Brackets(Box<Expr>),
    Call(SubroutineCall),
    Unary(UnaryOp, Box<Expr>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
}

/// Keyword constants. `this` is not one of these; the parser resolves
/// it to the receiver variable and builds a [`VarAccess`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordConst {
    True,
    False,
    Null,
}

/// A variable reference, optionally indexed for array access.
#[derive(Debug)]
pub struct VarAccess {
    pub variable: Variable,
    pub index: Option<Box<Expr>>,
}

/// A subroutine call with its arguments in push order.
///
/// For method calls the receiver expression is already prepended as
/// the first argument, so the emitted argument count matches the
/// callee's runtime convention.
#[derive(Debug)]
pub struct SubroutineCall {
    /// Fully qualified `Class.subroutine` target.
    pub target: SmolStr,
    pub args: Vec<Expr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Negate,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    And,
    Or,
    LessThan,
    GreaterThan,
    Equal,
}

impl BinaryOp {
    #[rustfmt::skip]
    pub(crate) fn from_symbol(symbol: char) -> Option<Self> {
        use BinaryOp as B;
        match symbol {
            '+' => Some(B::Add),
            '-' => Some(B::Subtract),
            '*' => Some(B::Multiply),
            '/' => Some(B::Divide),
            '&' => Some(B::And),
            '|' => Some(B::Or),
            '<' => Some(B::LessThan),
            '>' => Some(B::GreaterThan),
            '=' => Some(B::Equal),
            _   => None,
        }
    }
}

impl Expr {
    pub(crate) fn emit(&self, code: &mut Vec<Instr>) {
        use Instr as I;

        match self {
            Expr::Int(value) => code.push(I::Push(Segment::Constant, *value)),
            Expr::Str(text) => emit_string(text, code),
            Expr::Keyword(KeywordConst::True) => {
                // All bits set.
                code.push(I::Push(Segment::Constant, 1));
                code.push(I::Neg);
            }
            Expr::Keyword(KeywordConst::False) | Expr::Keyword(KeywordConst::Null) => {
                code.push(I::Push(Segment::Constant, 0));
            }
            Expr::Var(access) => access.emit_read(code),
            Expr::Brackets(inner) => inner.emit(code),
            Expr::Call(call) => call.emit(code),
            Expr::Unary(op, operand) => {
                operand.emit(code);
                code.push(match op {
                    UnaryOp::Negate => I::Neg,
                    UnaryOp::Not => I::Not,
                });
            }
            Expr::Binary(op, lhs, rhs) => {
                use BinaryOp as B;

                lhs.emit(code);
                rhs.emit(code);
                match op {
                    B::Add => code.push(I::Add),
                    B::Subtract => code.push(I::Sub),
                    B::And => code.push(I::And),
                    B::Or => code.push(I::Or),
                    B::LessThan => code.push(I::Lt),
                    B::GreaterThan => code.push(I::Gt),
                    B::Equal => code.push(I::Eq),
                    // No multiply or divide instruction in the VM;
                    // these go through the runtime's math routines.
                    B::Multiply => code.push(I::Call(SmolStr::from("Math.multiply"), 2)),
                    B::Divide => code.push(I::Call(SmolStr::from("Math.divide"), 2)),
                }
            }
        }
    }
}

/// Build a runtime string object and leave its reference on the stack.
///
/// Allocates with the string's length, then appends one character per
/// call. The append routine returns the string, so the reference stays
/// on the stack throughout.
fn emit_string(text: &str, code: &mut Vec<Instr>) {
    use Instr as I;

    code.push(I::Push(Segment::Constant, text.chars().count() as u16));
    code.push(I::Call(SmolStr::from("String.new"), 1));
    for c in text.chars() {
        // Characters beyond one word are rejected at parse time.
        debug_assert!(c as u32 <= u16::MAX as u32);
        code.push(I::Push(Segment::Constant, c as u16));
        code.push(I::Call(SmolStr::from("String.appendChar"), 2));
    }
}

impl VarAccess {
    /// Push the variable's value, reading through the heap-indirection
    /// segment when indexed.
    pub(crate) fn emit_read(&self, code: &mut Vec<Instr>) {
        use Instr as I;

        match &self.index {
            None => code.push(I::Push(self.variable.segment, self.variable.index)),
            Some(index) => {
                self.emit_address(index, code);
                code.push(I::Push(Segment::That, 0));
            }
        }
    }

    /// Pop the value on top of the stack into the variable. Used by
    /// `let`; the value code must have been emitted already.
    pub(crate) fn emit_write(&self, code: &mut Vec<Instr>) {
        use Instr as I;

        match &self.index {
            None => code.push(I::Pop(self.variable.segment, self.variable.index)),
            Some(index) => {
                self.emit_address(index, code);
                code.push(I::Pop(Segment::That, 0));
            }
        }
    }

    /// Compute base + index and bind it to the `that` segment.
    fn emit_address(&self, index: &Expr, code: &mut Vec<Instr>) {
        use Instr as I;

        code.push(I::Push(self.variable.segment, self.variable.index));
        index.emit(code);
        code.push(I::Add);
        code.push(I::Pop(Segment::Pointer, 1));
    }
}

impl SubroutineCall {
    pub(crate) fn emit(&self, code: &mut Vec<Instr>) {
        for arg in &self.args {
            arg.emit(code);
        }
        code.push(Instr::Call(self.target.clone(), self.args.len() as u16));
    }
}

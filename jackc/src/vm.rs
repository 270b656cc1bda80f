//! Typed VM instructions and their textual rendering.
use crate::scope::Segment;

use smol_str::SmolStr;
use std::fmt;

/// One stack machine instruction.
///
/// Code generation produces these; the unit-level entry point renders
/// them to newline-terminated text lines, one instruction per line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instr {
    Push(Segment, u16),
    Pop(Segment, u16),
    Add,
    Sub,
    Neg,
    Eq,
    Gt,
    Lt,
    And,
    Or,
    Not,
    Label(SmolStr),
    Goto(SmolStr),
    IfGoto(SmolStr),
    /// Call target is the fully qualified `Class.subroutine` name; the
    /// argument count includes the implicit receiver for method calls.
    Call(SmolStr, u16),
    Function(SmolStr, u16),
    Return,
}

impl fmt::Display for Instr {
    #[rustfmt::skip]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Instr as I;
        match self {
            I::Push(segment, index)  => write!(f, "push {} {}", segment, index),
            I::Pop(segment, index)   => write!(f, "pop {} {}", segment, index),
            I::Add                   => write!(f, "add"),
            I::Sub                   => write!(f, "sub"),
            I::Neg                   => write!(f, "neg"),
            I::Eq                    => write!(f, "eq"),
            I::Gt                    => write!(f, "gt"),
            I::Lt                    => write!(f, "lt"),
            I::And                   => write!(f, "and"),
            I::Or                    => write!(f, "or"),
            I::Not                   => write!(f, "not"),
            I::Label(name)           => write!(f, "label {}", name),
            I::Goto(name)            => write!(f, "goto {}", name),
            I::IfGoto(name)          => write!(f, "if-goto {}", name),
            I::Call(target, args)    => write!(f, "call {} {}", target, args),
            I::Function(name, count) => write!(f, "function {} {}", name, count),
            I::Return                => write!(f, "return"),
        }
    }
}

/// Render instructions as output text, one newline-terminated line each.
pub fn render(instructions: &[Instr]) -> String {
    let mut text = String::new();
    for instr in instructions {
        text.push_str(&instr.to_string());
        text.push('\n');
    }
    text
}

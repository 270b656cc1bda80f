//! Class node, the root of the tree.
use super::subroutine::Subroutine;
use crate::{scope::ClassScope, vm::Instr};

/// A fully parsed source unit. One instance per compilation; nothing
/// persists across units.
#[derive(Debug)]
pub struct Class {
    pub scope: ClassScope,
    pub subroutines: Vec<Subroutine>,
}

impl Class {
    #[inline]
    pub fn name(&self) -> &str {
        self.scope.name()
    }

    /// Generate the unit's instructions: each subroutine's code in
    /// declaration order.
    pub fn generate(&self) -> Vec<Instr> {
        let mut code = vec![];
        for subroutine in &self.subroutines {
            subroutine.emit(self.scope.name(), self.scope.field_count(), &mut code);
        }
        code
    }
}

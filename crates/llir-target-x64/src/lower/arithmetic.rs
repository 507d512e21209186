//! Arithmetic instruction lowering.

use alloc::vec::Vec;

use llir::{Operand as IrOperand, Type, Value};
use x64_mir::{Inst, Reg};

use crate::error::LowerError;

impl<'f> super::Lowerer<'f> {
    /// Lower a subtract.
    ///
    /// The machine subtract is destructive (the result replaces its left
    /// operand), so the left operand is first moved into a fresh
    /// destination register, then the right operand is subtracted in
    /// place. The expansion is local to this arm; other operations are
    /// free to pick their own.
    pub(super) fn lower_sub(
        &mut self,
        ty: Type,
        result: Value,
        lhs: IrOperand,
        rhs: IrOperand,
        out: &mut Vec<Inst>,
    ) -> Result<(), LowerError> {
        let src = self.resolve_operand(lhs)?;
        let rhs = self.resolve_operand(rhs)?;
        let dst = self.vregs.issue();
        debug_lowering!("sub {} -> {}", result, dst);
        out.push(Inst::Mov {
            ty,
            dst: Reg::Virt(dst),
            src,
        });
        out.push(Inst::Sub {
            ty,
            lhs: Reg::Virt(dst),
            rhs,
        });
        self.bind(result, dst);
        Ok(())
    }
}

//! Control-flow terminator lowering: jumps and compare-and-branch.

use alloc::vec::Vec;

use llir::{BlockId, Cond, Operand as IrOperand, Type};
use x64_mir::Inst;

use crate::error::LowerError;

impl<'f> super::Lowerer<'f> {
    /// Lower an unconditional jump.
    pub(super) fn lower_jump(
        &mut self,
        dest: BlockId,
        out: &mut Vec<Inst>,
    ) -> Result<(), LowerError> {
        self.check_block(dest)?;
        out.push(Inst::Jmp { dest });
        Ok(())
    }

    /// Lower a compare-and-branch.
    ///
    /// Only `gt` has a translation: a compare followed by `jg` to the then
    /// target. There is no jump-if-not-greater form, so the false edge is
    /// an explicit jump.
    pub(super) fn lower_branch(
        &mut self,
        cond: Cond,
        ty: Type,
        lhs: IrOperand,
        rhs: IrOperand,
        then_dest: BlockId,
        else_dest: BlockId,
        out: &mut Vec<Inst>,
    ) -> Result<(), LowerError> {
        match cond {
            Cond::Gt => {}
            Cond::Eq | Cond::Ne | Cond::Lt | Cond::Le | Cond::Ge => {
                return Err(LowerError::UnsupportedCond { cond });
            }
        }
        self.check_block(then_dest)?;
        self.check_block(else_dest)?;
        let lhs = self.resolve_operand(lhs)?;
        let rhs = self.resolve_operand(rhs)?;
        out.push(Inst::Cmp { ty, lhs, rhs });
        out.push(Inst::Jg { dest: then_dest });
        out.push(Inst::Jmp { dest: else_dest });
        Ok(())
    }
}

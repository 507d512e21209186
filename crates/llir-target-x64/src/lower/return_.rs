//! Return lowering.

use alloc::vec::Vec;

use llir::{Operand as IrOperand, Type};
use x64_mir::{Inst, Reg};

use crate::abi::RETURN_REG;
use crate::error::LowerError;

impl<'f> super::Lowerer<'f> {
    /// Lower a return. A return value, if present, is moved into the
    /// return register first.
    pub(super) fn lower_return(
        &mut self,
        ty: Type,
        value: Option<IrOperand>,
        out: &mut Vec<Inst>,
    ) -> Result<(), LowerError> {
        if let Some(value) = value {
            let src = self.resolve_operand(value)?;
            out.push(Inst::Mov {
                ty,
                dst: Reg::Phys(RETURN_REG),
                src,
            });
        }
        out.push(Inst::Ret);
        Ok(())
    }
}

//! Machine instructions and operands.

use core::fmt;

use llir::{BlockId, Imm, Type};

use crate::regs::{Reg, VReg};

/// A machine instruction input: a register or an immediate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Operand {
    /// Register (physical or virtual).
    Reg(Reg),
    /// Inline integer constant.
    Imm(Imm),
}

impl From<Reg> for Operand {
    fn from(reg: Reg) -> Self {
        Operand::Reg(reg)
    }
}

impl From<VReg> for Operand {
    fn from(vreg: VReg) -> Self {
        Operand::Reg(Reg::Virt(vreg))
    }
}

impl From<Imm> for Operand {
    fn from(imm: Imm) -> Self {
        Operand::Imm(imm)
    }
}

/// An x86-64 machine instruction over symbolic registers.
///
/// Jump targets are IR block ids; a later emission stage turns them into
/// labels.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Inst {
    /// MOV: dst = src.
    Mov { ty: Type, dst: Reg, src: Operand },
    /// SUB: lhs = lhs - rhs. Destructive; the result replaces `lhs`.
    Sub { ty: Type, lhs: Reg, rhs: Operand },
    /// CMP: set condition flags from lhs - rhs.
    Cmp { ty: Type, lhs: Operand, rhs: Operand },
    /// JG: jump to `dest` if the preceding compare was strictly greater.
    Jg { dest: BlockId },
    /// JMP: unconditional jump to `dest`.
    Jmp { dest: BlockId },
    /// RET: return. A return value, if any, was placed in the return
    /// register by a preceding MOV.
    Ret,
}

impl Inst {
    /// The register this instruction writes, if any.
    pub fn def_reg(&self) -> Option<Reg> {
        match self {
            Inst::Mov { dst, .. } => Some(*dst),
            Inst::Sub { lhs, .. } => Some(*lhs),
            Inst::Cmp { .. } | Inst::Jg { .. } | Inst::Jmp { .. } | Inst::Ret => None,
        }
    }

    /// Whether this instruction transfers control.
    pub fn is_branch(&self) -> bool {
        matches!(self, Inst::Jg { .. } | Inst::Jmp { .. } | Inst::Ret)
    }
}

/// Render a register with the width implied by `ty` (32-bit GPR names for
/// 4-byte types, 64-bit names otherwise).
fn fmt_reg(f: &mut fmt::Formatter<'_>, reg: Reg, ty: Type) -> fmt::Result {
    match reg {
        Reg::Phys(reg) if ty.size_bytes() == 4 => f.write_str(reg.name32()),
        Reg::Phys(reg) => f.write_str(reg.name64()),
        Reg::Virt(vreg) => write!(f, "{}", vreg),
    }
}

fn fmt_operand(f: &mut fmt::Formatter<'_>, operand: Operand, ty: Type) -> fmt::Result {
    match operand {
        Operand::Reg(reg) => fmt_reg(f, reg, ty),
        Operand::Imm(imm) => write!(f, "{}", imm),
    }
}

impl fmt::Display for Inst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Inst::Mov { ty, dst, src } => {
                f.write_str("mov ")?;
                fmt_reg(f, *dst, *ty)?;
                f.write_str(", ")?;
                fmt_operand(f, *src, *ty)
            }
            Inst::Sub { ty, lhs, rhs } => {
                f.write_str("sub ")?;
                fmt_reg(f, *lhs, *ty)?;
                f.write_str(", ")?;
                fmt_operand(f, *rhs, *ty)
            }
            Inst::Cmp { ty, lhs, rhs } => {
                f.write_str("cmp ")?;
                fmt_operand(f, *lhs, *ty)?;
                f.write_str(", ")?;
                fmt_operand(f, *rhs, *ty)
            }
            Inst::Jg { dest } => write!(f, "jg {}", dest),
            Inst::Jmp { dest } => write!(f, "jmp {}", dest),
            Inst::Ret => f.write_str("ret"),
        }
    }
}

//! x86-64 machine IR.
//!
//! This crate defines the instruction forms the lowering backend produces:
//! - Register references (`PhysReg`, `VReg`, `Reg`) with the GPR name tables
//! - Machine operands (`Operand`)
//! - Machine instructions (`Inst`)
//!
//! Instructions are symbolic: virtual registers are unbounded and block
//! targets are IR block ids. Register allocation and binary or textual
//! encoding happen elsewhere.

#![no_std]

extern crate alloc;

mod inst;
mod regs;

pub use inst::{Inst, Operand};
pub use regs::{PhysReg, Reg, VReg, PHYS_REG_COUNT};

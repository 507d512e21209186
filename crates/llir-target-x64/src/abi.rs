//! Calling-convention facts the lowering needs.

use x64_mir::PhysReg;

/// The register that carries a function's return value: slot 0 of the file,
/// the accumulator (`rax`/`eax`).
pub const RETURN_REG: PhysReg = PhysReg::RAX;

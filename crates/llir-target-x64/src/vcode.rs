//! Lowered code containers.
//!
//! `VCode` is the backend's output shape: machine instructions over virtual
//! registers, still grouped into the source function's basic blocks and kept
//! in its block order. Register allocation and emission consume this form.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use llir::{BlockId, Type, Value};
use x64_mir::Inst;

/// Machine instructions lowered from one IR block.
///
/// Keeps the source block's id so jump targets in sibling blocks stay
/// meaningful without a relabeling pass.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct VCodeBlock {
    /// Id of the IR block this was lowered from.
    pub id: BlockId,
    /// Instructions in execution order; the last one is the block's
    /// control transfer.
    pub insts: Vec<Inst>,
}

impl fmt::Display for VCodeBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.id)?;
        for inst in &self.insts {
            write!(f, "\n  {}", inst)?;
        }
        Ok(())
    }
}

/// A lowered function.
///
/// Blocks appear in the same order as in the source [`llir::Function`], and
/// parameter values keep their IR indices (they lower to like-numbered
/// virtual registers).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct VCode {
    /// Source function name.
    pub name: String,
    /// Source return type.
    pub ret_ty: Type,
    /// Source parameter values, in declaration order.
    pub params: Vec<Value>,
    /// Lowered blocks, in source block order.
    pub blocks: Vec<VCodeBlock>,
}

impl VCode {
    /// Look up a lowered block by its source block id.
    pub fn block(&self, id: BlockId) -> Option<&VCodeBlock> {
        self.blocks.iter().find(|b| b.id == id)
    }

    /// Total instruction count across all blocks.
    pub fn inst_count(&self) -> usize {
        self.blocks.iter().map(|b| b.insts.len()).sum()
    }
}

impl fmt::Display for VCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fn {}(", self.name)?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", param)?;
        }
        writeln!(f, ") -> {} {{", self.ret_ty)?;
        for block in &self.blocks {
            writeln!(f, "{}", block)?;
        }
        write!(f, "}}")
    }
}

/// All functions of a module, lowered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct VCodeModule {
    /// Lowered functions, in module order.
    pub functions: Vec<VCode>,
}

impl VCodeModule {
    /// Look up a lowered function by name.
    pub fn function(&self, name: &str) -> Option<&VCode> {
        self.functions.iter().find(|f| f.name == name)
    }

    /// Number of functions.
    pub fn function_count(&self) -> usize {
        self.functions.len()
    }
}

impl fmt::Display for VCodeModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, function) in self.functions.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{}", function)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;
    use alloc::string::ToString;
    use alloc::vec;

    use x64_mir::{Reg, VReg};

    use super::*;

    fn sample_vcode() -> VCode {
        VCode {
            name: "id".to_string(),
            ret_ty: Type::I32,
            params: vec![Value::new(0)],
            blocks: vec![VCodeBlock {
                id: BlockId::new(0),
                insts: vec![
                    Inst::Mov {
                        ty: Type::I32,
                        dst: Reg::Phys(x64_mir::PhysReg::RAX),
                        src: VReg::new(0).into(),
                    },
                    Inst::Ret,
                ],
            }],
        }
    }

    #[test]
    fn test_block_lookup() {
        let vcode = sample_vcode();
        assert!(vcode.block(BlockId::new(0)).is_some());
        assert!(vcode.block(BlockId::new(1)).is_none());
    }

    #[test]
    fn test_inst_count() {
        assert_eq!(sample_vcode().inst_count(), 2);
    }

    #[test]
    fn test_vcode_display() {
        assert_eq!(
            format!("{}", sample_vcode()),
            "fn id(v0) -> i32 {\nblock0:\n  mov eax, v0\n  ret\n}"
        );
    }

    #[test]
    fn test_module_lookup() {
        let module = VCodeModule {
            functions: vec![sample_vcode()],
        };
        assert_eq!(module.function_count(), 1);
        assert!(module.function("id").is_some());
        assert!(module.function("missing").is_none());
    }
}

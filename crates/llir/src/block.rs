//! Basic blocks and their identifiers.

use alloc::vec::Vec;
use core::fmt;

use crate::inst::{Inst, Phi, Terminator};

/// A basic block identifier, function-scoped and unique within a function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BlockId(u32);

impl BlockId {
    /// Create a new block id with the given index.
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Get the index of this block id.
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "block{}", self.0)
    }
}

/// A basic block: phi nodes at the head, a straight-line body, and exactly
/// one terminator.
///
/// Phis, body and terminator live in separate fields, so the body can never
/// contain a phi or a terminator and the terminator is present by
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Block {
    /// Block identifier.
    pub id: BlockId,
    /// Phi nodes, in program order.
    pub phis: Vec<Phi>,
    /// Non-terminator instructions, in execution order.
    pub insts: Vec<Inst>,
    /// The single terminator.
    pub terminator: Terminator,
}

impl Block {
    /// Create an empty block with the given terminator.
    pub fn new(id: BlockId, terminator: Terminator) -> Self {
        Self {
            id,
            phis: Vec::new(),
            insts: Vec::new(),
            terminator,
        }
    }

    /// Append a phi node.
    pub fn push_phi(&mut self, phi: Phi) {
        self.phis.push(phi);
    }

    /// Append a body instruction.
    pub fn push_inst(&mut self, inst: Inst) {
        self.insts.push(inst);
    }

    /// Number of body instructions.
    pub fn inst_count(&self) -> usize {
        self.insts.len()
    }

    /// Number of phi nodes.
    pub fn phi_count(&self) -> usize {
        self.phis.len()
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}:", self.id)?;
        for phi in &self.phis {
            writeln!(f, "  {}", phi)?;
        }
        for inst in &self.insts {
            writeln!(f, "  {}", inst)?;
        }
        write!(f, "  {}", self.terminator)
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;

    use super::*;
    use crate::{Type, Value};

    #[test]
    fn test_block_id_display() {
        assert_eq!(format!("{}", BlockId::new(3)), "block3");
    }

    #[test]
    fn test_block_id_ordering() {
        assert!(BlockId::new(0) < BlockId::new(1));
    }

    #[test]
    fn test_new_block_is_empty() {
        let block = Block::new(
            BlockId::new(0),
            Terminator::Return {
                ty: Type::I32,
                value: None,
            },
        );
        assert_eq!(block.inst_count(), 0);
        assert_eq!(block.phi_count(), 0);
    }

    #[test]
    fn test_push_inst() {
        let mut block = Block::new(
            BlockId::new(1),
            Terminator::Jump {
                dest: BlockId::new(3),
            },
        );
        block.push_inst(Inst::Sub {
            ty: Type::I32,
            result: Value::new(2),
            lhs: Value::new(0).into(),
            rhs: Value::new(1).into(),
        });
        assert_eq!(block.inst_count(), 1);
    }

    #[test]
    fn test_block_display() {
        let mut block = Block::new(
            BlockId::new(1),
            Terminator::Jump {
                dest: BlockId::new(3),
            },
        );
        block.push_inst(Inst::Sub {
            ty: Type::I32,
            result: Value::new(2),
            lhs: Value::new(0).into(),
            rhs: Value::new(1).into(),
        });
        assert_eq!(
            format!("{}", block),
            "block1:\n  v2 = sub.i32 v0, v1\n  jump block3"
        );
    }
}

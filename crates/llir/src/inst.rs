//! Instruction forms: operands, body instructions, phi nodes, terminators.

use alloc::collections::BTreeMap;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use crate::block::BlockId;
use crate::types::Type;
use crate::value::Value;

/// An immediate integer constant, carried inline in an operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Imm(i64);

impl Imm {
    /// Create an immediate carrying the given constant.
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the constant carried by this immediate.
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for Imm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An instruction input: a previously defined SSA value or an immediate.
///
/// Operands appear only as inputs, never as destinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Operand {
    /// Reference to an SSA value.
    Value(Value),
    /// Inline integer constant.
    Imm(Imm),
}

impl From<Value> for Operand {
    fn from(value: Value) -> Self {
        Operand::Value(value)
    }
}

impl From<Imm> for Operand {
    fn from(imm: Imm) -> Self {
        Operand::Imm(imm)
    }
}

impl From<i64> for Operand {
    fn from(value: i64) -> Self {
        Operand::Imm(Imm::new(value))
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Value(v) => write!(f, "{}", v),
            Operand::Imm(imm) => write!(f, "{}", imm),
        }
    }
}

/// Comparison condition for conditional branches.
///
/// The set is closed. Only `Gt` has a machine translation today; the
/// backends reject the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Cond {
    /// Equal.
    Eq,
    /// Not equal.
    Ne,
    /// Less than.
    Lt,
    /// Less than or equal.
    Le,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Ge,
}

impl fmt::Display for Cond {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Cond::Eq => "eq",
            Cond::Ne => "ne",
            Cond::Lt => "lt",
            Cond::Le => "le",
            Cond::Gt => "gt",
            Cond::Ge => "ge",
        };
        f.write_str(name)
    }
}

/// A body instruction.
///
/// One shape today. The enum is matched exhaustively at every consumption
/// site, so adding a kind is a compile-time-checked extension.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Inst {
    /// SUB: result = lhs - rhs.
    Sub {
        ty: Type,
        result: Value,
        lhs: Operand,
        rhs: Operand,
    },
}

impl Inst {
    /// The value this instruction defines.
    pub fn result(&self) -> Value {
        match self {
            Inst::Sub { result, .. } => *result,
        }
    }

    /// The type this instruction produces.
    pub fn ty(&self) -> Type {
        match self {
            Inst::Sub { ty, .. } => *ty,
        }
    }
}

impl fmt::Display for Inst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Inst::Sub { ty, result, lhs, rhs } => {
                write!(f, "{} = sub.{} {}, {}", result, ty, lhs, rhs)
            }
        }
    }
}

/// A phi node: merges one value per predecessor at a block head.
///
/// `args` maps each predecessor block to the value that flows in along that
/// edge. For every predecessor of the owning block there must be exactly one
/// entry. All phis of a block logically read their inputs simultaneously as
/// control enters.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Phi {
    /// Type of the merged value.
    pub ty: Type,
    /// The value this phi defines.
    pub result: Value,
    /// Incoming value per predecessor block.
    pub args: BTreeMap<BlockId, Value>,
}

impl Phi {
    /// Create a phi with no arguments yet.
    pub fn new(ty: Type, result: Value) -> Self {
        Self {
            ty,
            result,
            args: BTreeMap::new(),
        }
    }

    /// Add the value flowing in from a predecessor.
    pub fn with_arg(mut self, pred: BlockId, value: Value) -> Self {
        self.args.insert(pred, value);
        self
    }
}

impl fmt::Display for Phi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = phi.{} [", self.result, self.ty)?;
        for (i, (pred, value)) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", pred, value)?;
        }
        write!(f, "]")
    }
}

/// A block terminator. Exactly one per block.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Terminator {
    /// Unconditional jump.
    Jump {
        dest: BlockId,
    },
    /// Compare-and-branch: if `lhs <cond> rhs`, continue at `then_dest`,
    /// otherwise at `else_dest`.
    Branch {
        cond: Cond,
        ty: Type,
        lhs: Operand,
        rhs: Operand,
        then_dest: BlockId,
        else_dest: BlockId,
    },
    /// Return from the function, with an optional value.
    Return {
        ty: Type,
        value: Option<Operand>,
    },
}

impl Terminator {
    /// Successor blocks of this terminator, in branch order.
    pub fn successors(&self) -> Vec<BlockId> {
        match self {
            Terminator::Jump { dest } => vec![*dest],
            Terminator::Branch {
                then_dest,
                else_dest,
                ..
            } => vec![*then_dest, *else_dest],
            Terminator::Return { .. } => Vec::new(),
        }
    }
}

impl fmt::Display for Terminator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Terminator::Jump { dest } => write!(f, "jump {}", dest),
            Terminator::Branch {
                cond,
                ty,
                lhs,
                rhs,
                then_dest,
                else_dest,
            } => write!(
                f,
                "br.{}.{} {}, {}, {}, {}",
                cond, ty, lhs, rhs, then_dest, else_dest
            ),
            Terminator::Return { ty, value } => match value {
                Some(value) => write!(f, "ret.{} {}", ty, value),
                None => write!(f, "ret"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;

    use super::*;

    #[test]
    fn test_imm() {
        let imm = Imm::new(-7);
        assert_eq!(imm.value(), -7);
        assert_eq!(format!("{}", imm), "-7");
    }

    #[test]
    fn test_operand_from() {
        assert_eq!(Operand::from(Value::new(3)), Operand::Value(Value::new(3)));
        assert_eq!(Operand::from(Imm::new(9)), Operand::Imm(Imm::new(9)));
        assert_eq!(Operand::from(9i64), Operand::Imm(Imm::new(9)));
    }

    #[test]
    fn test_operand_display() {
        assert_eq!(format!("{}", Operand::Value(Value::new(2))), "v2");
        assert_eq!(format!("{}", Operand::Imm(Imm::new(42))), "42");
    }

    #[test]
    fn test_cond_display() {
        assert_eq!(format!("{}", Cond::Gt), "gt");
        assert_eq!(format!("{}", Cond::Le), "le");
    }

    #[test]
    fn test_sub_accessors() {
        let sub = Inst::Sub {
            ty: Type::I32,
            result: Value::new(2),
            lhs: Value::new(0).into(),
            rhs: Value::new(1).into(),
        };
        assert_eq!(sub.result(), Value::new(2));
        assert_eq!(sub.ty(), Type::I32);
        assert_eq!(format!("{}", sub), "v2 = sub.i32 v0, v1");
    }

    #[test]
    fn test_phi_args() {
        let phi = Phi::new(Type::I32, Value::new(4))
            .with_arg(BlockId::new(1), Value::new(2))
            .with_arg(BlockId::new(2), Value::new(3));
        assert_eq!(phi.args.len(), 2);
        assert_eq!(phi.args.get(&BlockId::new(1)), Some(&Value::new(2)));
        assert_eq!(
            format!("{}", phi),
            "v4 = phi.i32 [block1: v2, block2: v3]"
        );
    }

    #[test]
    fn test_terminator_successors() {
        let jump = Terminator::Jump {
            dest: BlockId::new(3),
        };
        assert_eq!(jump.successors(), vec![BlockId::new(3)]);

        let branch = Terminator::Branch {
            cond: Cond::Gt,
            ty: Type::I32,
            lhs: Value::new(0).into(),
            rhs: Value::new(1).into(),
            then_dest: BlockId::new(1),
            else_dest: BlockId::new(2),
        };
        assert_eq!(
            branch.successors(),
            vec![BlockId::new(1), BlockId::new(2)]
        );

        let ret = Terminator::Return {
            ty: Type::I32,
            value: None,
        };
        assert!(ret.successors().is_empty());
    }

    #[test]
    fn test_terminator_display() {
        let branch = Terminator::Branch {
            cond: Cond::Gt,
            ty: Type::I32,
            lhs: Value::new(0).into(),
            rhs: Value::new(1).into(),
            then_dest: BlockId::new(1),
            else_dest: BlockId::new(2),
        };
        assert_eq!(
            format!("{}", branch),
            "br.gt.i32 v0, v1, block1, block2"
        );
        let ret = Terminator::Return {
            ty: Type::I32,
            value: Some(Value::new(4).into()),
        };
        assert_eq!(format!("{}", ret), "ret.i32 v4");
    }
}

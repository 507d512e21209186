//! Phi elimination planning (pass 1).
//!
//! Every phi gets one fresh destination register. Each predecessor of the
//! phi's block then owes a copy of its incoming value into that register,
//! emitted before the predecessor's control transfer; by the time control
//! reaches the phi's block, the destination holds the merged value no
//! matter which edge was taken.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use llir::{BlockId, Function, Type, Value};
use x64_mir::VReg;

use crate::error::LowerError;

/// A copy a predecessor block owes to a phi in one of its successors.
///
/// The source stays an IR value here; it is resolved to a register during
/// assembly, after selection has bound every instruction result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct PlannedCopy {
    pub ty: Type,
    /// The phi's designated destination register.
    pub dst: VReg,
    /// The value flowing in along this predecessor's edge.
    pub src: Value,
}

/// Compute the predecessors of every block by inverting the successor
/// edges of the terminators.
///
/// Every block of the function gets an entry, empty for the entry block
/// (unless it is a branch target itself). A branch with both targets on
/// the same block contributes that predecessor once.
pub fn find_predecessors(func: &Function) -> BTreeMap<BlockId, Vec<BlockId>> {
    let mut preds: BTreeMap<BlockId, Vec<BlockId>> = BTreeMap::new();
    for block in &func.blocks {
        preds.entry(block.id).or_default();
    }
    for block in &func.blocks {
        for succ in block.terminator.successors() {
            let entry = preds.entry(succ).or_default();
            if !entry.contains(&block.id) {
                entry.push(block.id);
            }
        }
    }
    preds
}

impl<'f> super::Lowerer<'f> {
    /// Pass 1: plan the phi-resolution copies for the whole function.
    ///
    /// Walks blocks and phis in program order (so destination numbering is
    /// deterministic), checks each phi against its block's predecessors,
    /// assigns the destination register and records the copy each
    /// predecessor owes.
    pub(super) fn plan_phi_copies(&mut self) -> Result<(), LowerError> {
        let func = self.func;
        let preds = find_predecessors(func);
        for block in &func.blocks {
            for phi in &block.phis {
                for (&pred, &src) in &phi.args {
                    if func.block(pred).is_none() {
                        return Err(LowerError::UnknownBlock { block: pred });
                    }
                    if !func.values.contains_key(&src) {
                        return Err(LowerError::UnknownValue { value: src });
                    }
                }
                if let Some(block_preds) = preds.get(&block.id) {
                    for &pred in block_preds {
                        if !phi.args.contains_key(&pred) {
                            return Err(LowerError::MissingPhiArg {
                                block: block.id,
                                pred,
                                phi: phi.result,
                            });
                        }
                    }
                }

                let dst = self.vregs.issue();
                debug_lowering!("phi {} in {} -> {}", phi.result, block.id, dst);
                for (&pred, &src) in &phi.args {
                    self.copies.entry(pred).or_default().push(PlannedCopy {
                        ty: phi.ty,
                        dst,
                        src,
                    });
                }
                self.bind(phi.result, dst);
            }
        }
        Ok(())
    }
}

//! Lowering driver: SSA functions to virtual-register machine code.
//!
//! Lowering runs in two passes over a function:
//!
//! 1. [`Lowerer::plan_phi_copies`] walks every phi, assigns it a fresh
//!    destination register, and records the copy each predecessor owes.
//! 2. Instruction selection translates each block's body and terminator,
//!    then assembly splices the owed copies in between, so a predecessor
//!    writes all phi destinations before it transfers control.
//!
//! Values that never get a fresh register (parameters, in practice) lower
//! to the virtual register with the same index; fresh registers are
//! numbered strictly above every value id so the two ranges cannot
//! collide.

mod arithmetic;
mod branch;
mod phi;
mod return_;

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use llir::{
    BlockId, Function, Inst as IrInst, Module, Operand as IrOperand, Terminator, Value,
};
use x64_mir::{Inst, Operand, Reg, VReg};

use crate::error::LowerError;
use crate::vcode::{VCode, VCodeBlock, VCodeModule};

use self::phi::PlannedCopy;

pub use self::phi::find_predecessors;

/// Lower every function of a module, in module order.
pub fn lower_module(module: &Module) -> Result<VCodeModule, LowerError> {
    let mut functions = Vec::with_capacity(module.functions.len());
    for function in &module.functions {
        functions.push(lower_function(function)?);
    }
    Ok(VCodeModule { functions })
}

/// Lower a single function.
pub fn lower_function(func: &Function) -> Result<VCode, LowerError> {
    Lowerer::new(func).lower()
}

/// Issues fresh virtual registers for a function.
#[derive(Debug)]
struct VRegAlloc {
    next_index: u32,
}

impl VRegAlloc {
    /// Start numbering strictly above every value id of `func`, so fresh
    /// registers never alias the like-numbered registers unbound values
    /// resolve to.
    fn for_function(func: &Function) -> Self {
        let next_index = func.max_value_index().map_or(0, |max| max + 1);
        Self { next_index }
    }

    fn issue(&mut self) -> VReg {
        let vreg = VReg::new(self.next_index);
        self.next_index += 1;
        vreg
    }
}

/// Per-function lowering state.
pub struct Lowerer<'f> {
    func: &'f Function,
    vregs: VRegAlloc,
    /// Values bound to a fresh register (phi and instruction results).
    /// Unbound values resolve to the like-numbered register.
    bindings: BTreeMap<Value, VReg>,
    /// Copies each block owes the phis of its successors.
    copies: BTreeMap<BlockId, Vec<PlannedCopy>>,
}

impl<'f> Lowerer<'f> {
    pub fn new(func: &'f Function) -> Self {
        Self {
            func,
            vregs: VRegAlloc::for_function(func),
            bindings: BTreeMap::new(),
            copies: BTreeMap::new(),
        }
    }

    /// Run both passes and assemble the lowered function.
    pub fn lower(mut self) -> Result<VCode, LowerError> {
        debug_lowering!("lowering fn {}", self.func.name);

        self.plan_phi_copies()?;

        // Select per block. Copy sources are resolved afterwards, once the
        // results of every block are bound.
        let func = self.func;
        let mut selected = Vec::with_capacity(func.blocks.len());
        for block in &func.blocks {
            let mut body = Vec::new();
            for inst in &block.insts {
                self.lower_inst(inst, &mut body)?;
            }
            let mut term = Vec::new();
            self.lower_terminator(&block.terminator, &mut term)?;
            selected.push((block.id, body, term));
        }

        let mut blocks = Vec::with_capacity(selected.len());
        for (id, body, term) in selected {
            let mut insts = body;
            if let Some(copies) = self.copies.get(&id) {
                for copy in copies {
                    insts.push(Inst::Mov {
                        ty: copy.ty,
                        dst: Reg::Virt(copy.dst),
                        src: Operand::Reg(Reg::Virt(self.vreg_for(copy.src))),
                    });
                }
            }
            insts.extend(term);
            blocks.push(VCodeBlock { id, insts });
        }

        Ok(VCode {
            name: func.name.clone(),
            ret_ty: func.ret_ty,
            params: func.params.clone(),
            blocks,
        })
    }

    fn lower_inst(&mut self, inst: &IrInst, out: &mut Vec<Inst>) -> Result<(), LowerError> {
        match inst {
            IrInst::Sub {
                ty,
                result,
                lhs,
                rhs,
            } => self.lower_sub(*ty, *result, *lhs, *rhs, out),
        }
    }

    fn lower_terminator(
        &mut self,
        term: &Terminator,
        out: &mut Vec<Inst>,
    ) -> Result<(), LowerError> {
        match term {
            Terminator::Jump { dest } => self.lower_jump(*dest, out),
            Terminator::Branch {
                cond,
                ty,
                lhs,
                rhs,
                then_dest,
                else_dest,
            } => self.lower_branch(*cond, *ty, *lhs, *rhs, *then_dest, *else_dest, out),
            Terminator::Return { ty, value } => self.lower_return(*ty, *value, out),
        }
    }

    /// The register holding a value: its bound fresh register if it has
    /// one, otherwise the like-numbered register.
    fn vreg_for(&self, value: Value) -> VReg {
        match self.bindings.get(&value) {
            Some(vreg) => *vreg,
            None => VReg::new(value.index()),
        }
    }

    /// Resolve a value used as an input, checking that it is declared.
    fn resolve_value(&self, value: Value) -> Result<VReg, LowerError> {
        if !self.func.values.contains_key(&value) {
            return Err(LowerError::UnknownValue { value });
        }
        Ok(self.vreg_for(value))
    }

    /// Resolve an IR operand to a machine operand.
    fn resolve_operand(&self, operand: IrOperand) -> Result<Operand, LowerError> {
        match operand {
            IrOperand::Value(value) => Ok(Operand::Reg(Reg::Virt(self.resolve_value(value)?))),
            IrOperand::Imm(imm) => Ok(Operand::Imm(imm)),
        }
    }

    /// Check that a control-flow target names a block of this function.
    fn check_block(&self, id: BlockId) -> Result<(), LowerError> {
        if self.func.block(id).is_none() {
            return Err(LowerError::UnknownBlock { block: id });
        }
        Ok(())
    }

    /// Bind a value to the fresh register that holds it from now on.
    fn bind(&mut self, value: Value, vreg: VReg) {
        self.bindings.insert(value, vreg);
    }
}

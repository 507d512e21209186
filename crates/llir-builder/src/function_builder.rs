//! Function builder.

use alloc::string::String;
use alloc::vec::Vec;

use llir::{Block, BlockId, Cond, Function, Inst, Operand, Phi, Terminator, Type, Value};

/// A block under construction: everything but the terminator may still grow.
#[derive(Debug)]
struct StagedBlock {
    id: BlockId,
    phis: Vec<Phi>,
    insts: Vec<Inst>,
    terminator: Option<Terminator>,
}

/// Builder for constructing functions in SSA form.
///
/// Issues sequential value and block ids, records every value's type in the
/// function's value table, and checks at [`finish`](Self::finish) that every
/// block was terminated. Misuse (an unknown block id, terminating a block
/// twice, finishing with an unterminated block) panics with a message; these
/// are programming errors in the embedder, not input errors.
#[derive(Debug)]
pub struct FunctionBuilder {
    name: String,
    ret_ty: Type,
    params: Vec<Value>,
    declared: Vec<(Value, Type)>,
    blocks: Vec<StagedBlock>,
    next_value: u32,
    next_block: u32,
}

impl FunctionBuilder {
    /// Create a builder for a function with the given name and return type.
    pub fn new(name: impl Into<String>, ret_ty: Type) -> Self {
        Self {
            name: name.into(),
            ret_ty,
            params: Vec::new(),
            declared: Vec::new(),
            blocks: Vec::new(),
            next_value: 0,
            next_block: 0,
        }
    }

    /// Declare a parameter of the given type and return its value.
    pub fn param(&mut self, ty: Type) -> Value {
        let value = self.new_value(ty);
        self.params.push(value);
        value
    }

    /// Issue a fresh value of the given type.
    pub fn new_value(&mut self, ty: Type) -> Value {
        let value = Value::new(self.next_value);
        self.next_value += 1;
        self.declared.push((value, ty));
        value
    }

    /// Create a new empty block and return its id.
    pub fn create_block(&mut self) -> BlockId {
        let id = BlockId::new(self.next_block);
        self.next_block += 1;
        self.blocks.push(StagedBlock {
            id,
            phis: Vec::new(),
            insts: Vec::new(),
            terminator: None,
        });
        id
    }

    /// Append a phi to `block`, merging one value per predecessor, and
    /// return the phi's result value.
    pub fn phi(&mut self, block: BlockId, ty: Type, args: &[(BlockId, Value)]) -> Value {
        let result = self.new_value(ty);
        let mut phi = Phi::new(ty, result);
        for &(pred, value) in args {
            phi = phi.with_arg(pred, value);
        }
        self.staged_mut(block).phis.push(phi);
        result
    }

    /// Append a subtract to `block` and return its result value.
    pub fn sub(
        &mut self,
        block: BlockId,
        ty: Type,
        lhs: impl Into<Operand>,
        rhs: impl Into<Operand>,
    ) -> Value {
        let result = self.new_value(ty);
        let inst = Inst::Sub {
            ty,
            result,
            lhs: lhs.into(),
            rhs: rhs.into(),
        };
        self.staged_mut(block).insts.push(inst);
        result
    }

    /// Terminate `block` with an unconditional jump.
    pub fn jump(&mut self, block: BlockId, dest: BlockId) {
        self.terminate(block, Terminator::Jump { dest });
    }

    /// Terminate `block` with a compare-and-branch.
    #[allow(clippy::too_many_arguments)]
    pub fn branch(
        &mut self,
        block: BlockId,
        cond: Cond,
        ty: Type,
        lhs: impl Into<Operand>,
        rhs: impl Into<Operand>,
        then_dest: BlockId,
        else_dest: BlockId,
    ) {
        self.terminate(
            block,
            Terminator::Branch {
                cond,
                ty,
                lhs: lhs.into(),
                rhs: rhs.into(),
                then_dest,
                else_dest,
            },
        );
    }

    /// Terminate `block` with a return of `value`.
    pub fn ret(&mut self, block: BlockId, ty: Type, value: impl Into<Operand>) {
        self.terminate(
            block,
            Terminator::Return {
                ty,
                value: Some(value.into()),
            },
        );
    }

    /// Terminate `block` with a valueless return.
    pub fn ret_void(&mut self, block: BlockId, ty: Type) {
        self.terminate(block, Terminator::Return { ty, value: None });
    }

    /// Finish building and return the function.
    ///
    /// Panics if any block was left without a terminator.
    pub fn finish(self) -> Function {
        let mut function = Function::new(self.name, self.ret_ty);
        for (value, ty) in self.declared {
            function.declare_value(value, ty);
        }
        function.params = self.params;
        for staged in self.blocks {
            let terminator = match staged.terminator {
                Some(terminator) => terminator,
                None => panic!("{} has no terminator", staged.id),
            };
            let mut block = Block::new(staged.id, terminator);
            block.phis = staged.phis;
            block.insts = staged.insts;
            function.add_block(block);
        }
        function
    }

    fn terminate(&mut self, block: BlockId, terminator: Terminator) {
        let staged = self.staged_mut(block);
        assert!(
            staged.terminator.is_none(),
            "{} is already terminated",
            block
        );
        staged.terminator = Some(terminator);
    }

    fn staged_mut(&mut self, block: BlockId) -> &mut StagedBlock {
        match self.blocks.iter_mut().find(|b| b.id == block) {
            Some(staged) => staged,
            None => panic!("no such block: {}", block),
        }
    }
}

//! Phi elimination tests: predecessor computation, copy placement and the
//! malformed-phi errors.

use llir::{Block, BlockId, Cond, Function, Inst as IrInst, Phi, Terminator, Type, Value};
use llir_builder::FunctionBuilder;
use llir_target_x64::{find_predecessors, lower_function, LowerError, RETURN_REG};
use x64_mir::{Inst, Operand, Reg, VReg};

fn vreg(index: u32) -> Operand {
    Operand::Reg(Reg::Virt(VReg::new(index)))
}

/// The diamond used throughout: branch in block0, subs in block1/block2,
/// phi of the two results in block3.
fn diamond() -> Function {
    let mut builder = FunctionBuilder::new("max_diff", Type::I32);
    let v0 = builder.param(Type::I32);
    let v1 = builder.param(Type::I32);
    let bb0 = builder.create_block();
    let bb1 = builder.create_block();
    let bb2 = builder.create_block();
    let bb3 = builder.create_block();
    builder.branch(bb0, Cond::Gt, Type::I32, v0, v1, bb1, bb2);
    let v2 = builder.sub(bb1, Type::I32, v0, v1);
    builder.jump(bb1, bb3);
    let v3 = builder.sub(bb2, Type::I32, v1, v0);
    builder.jump(bb2, bb3);
    let v4 = builder.phi(bb3, Type::I32, &[(bb1, v2), (bb2, v3)]);
    builder.ret(bb3, Type::I32, v4);
    builder.finish()
}

#[test]
fn test_find_predecessors_exported_shape() {
    let func = diamond();
    let preds = find_predecessors(&func);
    assert_eq!(preds.len(), 4);
    assert!(preds[&BlockId::new(0)].is_empty());
    assert_eq!(
        preds[&BlockId::new(3)],
        vec![BlockId::new(1), BlockId::new(2)]
    );
}

#[test]
fn test_one_copy_per_predecessor() {
    let vcode = lower_function(&diamond()).unwrap();

    // Phi destination is v5, the first id past the function's values.
    let phi_dst = Reg::Virt(VReg::new(5));
    let mut copies = 0;
    for block in &vcode.blocks {
        for inst in &block.insts {
            if let Inst::Mov { dst, .. } = inst {
                if *dst == phi_dst {
                    copies += 1;
                }
            }
        }
    }
    assert_eq!(copies, 2, "one copy per predecessor");
}

#[test]
fn test_copies_precede_the_terminator() {
    let vcode = lower_function(&diamond()).unwrap();
    for id in [BlockId::new(1), BlockId::new(2)] {
        let insts = &vcode.block(id).unwrap().insts;
        let last = insts.last().unwrap();
        assert!(last.is_branch(), "{}: block must end in a control transfer", id);
        assert_eq!(
            insts[insts.len() - 2],
            Inst::Mov {
                ty: Type::I32,
                dst: Reg::Virt(VReg::new(5)),
                src: vreg(if id == BlockId::new(1) { 6 } else { 7 }),
            },
            "{}: the phi copy sits right before the jump",
            id
        );
    }
}

#[test]
fn test_copy_sources_the_predecessors_value() {
    let vcode = lower_function(&diamond()).unwrap();
    // block1 computed its sub into v6, block2 into v7; each copy reads its
    // own block's result.
    let copy_in = |id: BlockId| {
        vcode.block(id).unwrap().insts.iter().find_map(|inst| match inst {
            Inst::Mov {
                dst: Reg::Virt(dst),
                src,
                ..
            } if dst.index() == 5 => Some(*src),
            _ => None,
        })
    };
    assert_eq!(copy_in(BlockId::new(1)), Some(vreg(6)));
    assert_eq!(copy_in(BlockId::new(2)), Some(vreg(7)));
}

#[test]
fn test_return_reads_the_phi_destination() {
    let vcode = lower_function(&diamond()).unwrap();
    let join = vcode.block(BlockId::new(3)).unwrap();
    assert_eq!(
        join.insts,
        vec![
            Inst::Mov {
                ty: Type::I32,
                dst: Reg::Phys(RETURN_REG),
                src: vreg(5),
            },
            Inst::Ret,
        ]
    );
}

#[test]
fn test_two_phis_form_one_copy_group() {
    // block3 merges two phis; each predecessor owes both copies, in phi
    // order, as one group before its jump.
    let mut builder = FunctionBuilder::new("f", Type::I32);
    let v0 = builder.param(Type::I32);
    let v1 = builder.param(Type::I32);
    let bb0 = builder.create_block();
    let bb1 = builder.create_block();
    let bb2 = builder.create_block();
    let bb3 = builder.create_block();
    builder.branch(bb0, Cond::Gt, Type::I32, v0, v1, bb1, bb2);
    builder.jump(bb1, bb3);
    builder.jump(bb2, bb3);
    let v2 = builder.phi(bb3, Type::I32, &[(bb1, v0), (bb2, v1)]);
    let v3 = builder.phi(bb3, Type::I32, &[(bb1, v1), (bb2, v0)]);
    let v4 = builder.sub(bb3, Type::I32, v2, v3);
    builder.ret(bb3, Type::I32, v4);

    // Ids 0..=4 taken; phi destinations are v5 and v6 in program order.
    let vcode = lower_function(&builder.finish()).unwrap();
    assert_eq!(
        vcode.block(bb1).unwrap().insts,
        vec![
            Inst::Mov {
                ty: Type::I32,
                dst: Reg::Virt(VReg::new(5)),
                src: vreg(0),
            },
            Inst::Mov {
                ty: Type::I32,
                dst: Reg::Virt(VReg::new(6)),
                src: vreg(1),
            },
            Inst::Jmp { dest: bb3 },
        ]
    );
    assert_eq!(
        vcode.block(bb2).unwrap().insts,
        vec![
            Inst::Mov {
                ty: Type::I32,
                dst: Reg::Virt(VReg::new(5)),
                src: vreg(1),
            },
            Inst::Mov {
                ty: Type::I32,
                dst: Reg::Virt(VReg::new(6)),
                src: vreg(0),
            },
            Inst::Jmp { dest: bb3 },
        ]
    );
}

#[test]
fn test_loop_phi_copies_on_both_edges() {
    // Countdown loop: block1's phi merges the parameter (entry edge) and
    // the sub result (back edge), so block1 owes a copy to itself.
    let mut func = Function::new("countdown", Type::I32);
    let v0 = Value::new(0);
    let v1 = Value::new(1); // phi result
    let v2 = Value::new(2); // sub result
    func.declare_param(v0, Type::I32);
    func.declare_value(v1, Type::I32);
    func.declare_value(v2, Type::I32);

    let bb0 = BlockId::new(0);
    let bb1 = BlockId::new(1);
    let bb2 = BlockId::new(2);
    func.add_block(Block::new(bb0, Terminator::Jump { dest: bb1 }));
    let mut body = Block::new(
        bb1,
        Terminator::Branch {
            cond: Cond::Gt,
            ty: Type::I32,
            lhs: v2.into(),
            rhs: 0i64.into(),
            then_dest: bb1,
            else_dest: bb2,
        },
    );
    body.push_phi(Phi::new(Type::I32, v1).with_arg(bb0, v0).with_arg(bb1, v2));
    body.push_inst(IrInst::Sub {
        ty: Type::I32,
        result: v2,
        lhs: v1.into(),
        rhs: 1i64.into(),
    });
    func.add_block(body);
    func.add_block(Block::new(
        bb2,
        Terminator::Return {
            ty: Type::I32,
            value: Some(v2.into()),
        },
    ));

    // Phi destination is v3, the sub destination v4.
    let vcode = lower_function(&func).unwrap();
    assert_eq!(
        vcode.block(bb0).unwrap().insts,
        vec![
            Inst::Mov {
                ty: Type::I32,
                dst: Reg::Virt(VReg::new(3)),
                src: vreg(0),
            },
            Inst::Jmp { dest: bb1 },
        ]
    );
    assert_eq!(
        vcode.block(bb1).unwrap().insts,
        vec![
            Inst::Mov {
                ty: Type::I32,
                dst: Reg::Virt(VReg::new(4)),
                src: vreg(3),
            },
            Inst::Sub {
                ty: Type::I32,
                lhs: Reg::Virt(VReg::new(4)),
                rhs: Operand::Imm(llir::Imm::new(1)),
            },
            Inst::Mov {
                ty: Type::I32,
                dst: Reg::Virt(VReg::new(3)),
                src: vreg(4),
            },
            Inst::Cmp {
                ty: Type::I32,
                lhs: vreg(4),
                rhs: Operand::Imm(llir::Imm::new(0)),
            },
            Inst::Jg { dest: bb1 },
            Inst::Jmp { dest: bb2 },
        ]
    );
}

#[test]
fn test_phi_arg_for_non_predecessor_plans_a_copy() {
    // block2 never jumps to block1, yet the phi names it; the copy is
    // planned for block2 anyway. Only dangling ids are errors.
    let mut builder = FunctionBuilder::new("f", Type::I32);
    let v0 = builder.param(Type::I32);
    let bb0 = builder.create_block();
    let bb1 = builder.create_block();
    let bb2 = builder.create_block();
    builder.jump(bb0, bb1);
    let v1 = builder.phi(bb1, Type::I32, &[(bb0, v0), (bb2, v0)]);
    builder.ret(bb1, Type::I32, v1);
    builder.ret_void(bb2, Type::I32);

    let vcode = lower_function(&builder.finish()).unwrap();
    assert_eq!(
        vcode.block(bb2).unwrap().insts,
        vec![
            Inst::Mov {
                ty: Type::I32,
                dst: Reg::Virt(VReg::new(2)),
                src: vreg(0),
            },
            Inst::Ret,
        ]
    );
}

#[test]
fn test_missing_phi_argument_rejected() {
    // Diamond whose phi only covers block1; block2 is a predecessor with
    // no incoming value.
    let mut builder = FunctionBuilder::new("f", Type::I32);
    let v0 = builder.param(Type::I32);
    let v1 = builder.param(Type::I32);
    let bb0 = builder.create_block();
    let bb1 = builder.create_block();
    let bb2 = builder.create_block();
    let bb3 = builder.create_block();
    builder.branch(bb0, Cond::Gt, Type::I32, v0, v1, bb1, bb2);
    builder.jump(bb1, bb3);
    builder.jump(bb2, bb3);
    let v2 = builder.phi(bb3, Type::I32, &[(bb1, v0)]);
    builder.ret(bb3, Type::I32, v2);

    assert_eq!(
        lower_function(&builder.finish()),
        Err(LowerError::MissingPhiArg {
            block: bb3,
            pred: bb2,
            phi: v2,
        })
    );
}

#[test]
fn test_phi_argument_naming_unknown_block_rejected() {
    let mut builder = FunctionBuilder::new("f", Type::I32);
    let v0 = builder.param(Type::I32);
    let bb0 = builder.create_block();
    let bb1 = builder.create_block();
    builder.jump(bb0, bb1);
    let v1 = builder.phi(bb1, Type::I32, &[(bb0, v0), (BlockId::new(9), v0)]);
    builder.ret(bb1, Type::I32, v1);

    assert_eq!(
        lower_function(&builder.finish()),
        Err(LowerError::UnknownBlock {
            block: BlockId::new(9)
        })
    );
}

#[test]
fn test_phi_source_naming_unknown_value_rejected() {
    let mut builder = FunctionBuilder::new("f", Type::I32);
    builder.param(Type::I32);
    let bb0 = builder.create_block();
    let bb1 = builder.create_block();
    builder.jump(bb0, bb1);
    let v1 = builder.phi(bb1, Type::I32, &[(bb0, Value::new(42))]);
    builder.ret(bb1, Type::I32, v1);

    assert_eq!(
        lower_function(&builder.finish()),
        Err(LowerError::UnknownValue {
            value: Value::new(42)
        })
    );
}

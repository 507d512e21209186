//! Low-level SSA intermediate representation (LLIR).
//!
//! This crate defines the IR consumed by the lowering backends:
//! - Type system (`i32` initially)
//! - SSA values and their type records (`Value`, `ValueData`)
//! - Instruction forms (`Inst`, `Phi`, `Terminator`, `Operand`)
//! - Containers (`Block`, `Function`, `Module`)
//!
//! The IR is pure data. Constructors perform no validation; producers uphold
//! the structural invariants documented on each type, and the lowering
//! backends check what they must read through.

#![no_std]

extern crate alloc;

mod block;
mod function;
mod inst;
mod module;
mod types;
mod value;

pub use block::{Block, BlockId};
pub use function::Function;
pub use inst::{Cond, Imm, Inst, Operand, Phi, Terminator};
pub use module::Module;
pub use types::Type;
pub use value::{Value, ValueData};

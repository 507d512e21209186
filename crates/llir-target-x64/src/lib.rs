//! x86-64 lowering backend for LLIR.
//!
//! This crate turns SSA IR functions into virtual-register machine code:
//! - Phi elimination: every phi gets a fresh destination register, and each
//!   predecessor block gets the copy group that realizes the merge
//! - Instruction selection: per-block translation of body instructions and
//!   terminators into `x64-mir` instructions
//! - `VCode` output keeping the function/block shape of the input
//!
//! Register allocation, instruction encoding and assembly printing are
//! later stages and live elsewhere.

#![no_std]

extern crate alloc;

#[macro_use]
mod debug;

mod abi;
mod error;
mod lower;
mod vcode;

pub use abi::RETURN_REG;
pub use error::LowerError;
pub use lower::{find_predecessors, lower_function, lower_module, Lowerer};
pub use vcode::{VCode, VCodeBlock, VCodeModule};

//! Builder for constructing LLIR functions.
//!
//! This crate provides [`FunctionBuilder`], which issues value and block
//! ids, keeps the function's value table complete, and assembles blocks
//! with their terminators. Programs have no textual front-end; embedders
//! and tests construct IR through this builder (or as plain data).

#![no_std]

extern crate alloc;

mod function_builder;

pub use function_builder::FunctionBuilder;

//! Functions: ordered blocks plus the value table.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::block::{Block, BlockId};
use crate::types::Type;
use crate::value::{Value, ValueData};

/// A function in SSA form.
///
/// Structural invariants, upheld by producers:
/// - the first block is the entry block
/// - every [`BlockId`] referenced by a terminator or phi names a block in
///   `blocks`
/// - `values` covers every value defined or used in the function, including
///   parameters
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Function {
    /// Function name.
    pub name: String,
    /// Return type.
    pub ret_ty: Type,
    /// Parameter values, in declaration order. Parameters have no defining
    /// instruction.
    pub params: Vec<Value>,
    /// Basic blocks, in program order.
    pub blocks: Vec<Block>,
    /// Type records for every value in the function.
    pub values: BTreeMap<Value, ValueData>,
}

impl Function {
    /// Create an empty function.
    pub fn new(name: impl Into<String>, ret_ty: Type) -> Self {
        Self {
            name: name.into(),
            ret_ty,
            params: Vec::new(),
            blocks: Vec::new(),
            values: BTreeMap::new(),
        }
    }

    /// Record a value's type.
    pub fn declare_value(&mut self, value: Value, ty: Type) {
        self.values.insert(value, ValueData::new(value, ty));
    }

    /// Record a parameter and its type.
    pub fn declare_param(&mut self, value: Value, ty: Type) {
        self.params.push(value);
        self.declare_value(value, ty);
    }

    /// Append a block.
    pub fn add_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Look up a block by id.
    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == id)
    }

    /// The entry block (the first block), if any.
    pub fn entry_block(&self) -> Option<&Block> {
        self.blocks.first()
    }

    /// The type of a value, if declared.
    pub fn value_type(&self, value: Value) -> Option<Type> {
        self.values.get(&value).map(|data| data.ty)
    }

    /// The highest value index declared in this function.
    pub fn max_value_index(&self) -> Option<u32> {
        self.values.keys().next_back().map(|v| v.index())
    }

    /// Number of blocks.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Number of declared values.
    pub fn value_count(&self) -> usize {
        self.values.len()
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fn {}(", self.name)?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match self.value_type(*param) {
                Some(ty) => write!(f, "{}: {}", param, ty)?,
                None => write!(f, "{}", param)?,
            }
        }
        writeln!(f, ") -> {} {{", self.ret_ty)?;
        for block in &self.blocks {
            writeln!(f, "{}", block)?;
        }
        write!(f, "}}")
    }
}

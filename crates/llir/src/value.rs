//! SSA value identifiers and their type records.

use core::fmt;

use crate::types::Type;

/// An SSA value identifier.
///
/// In SSA form, each value is assigned exactly once, either by an
/// instruction or as a function parameter. The identifier is function-scoped
/// and unique within its function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Value(u32);

impl Value {
    /// Create a new value with the given index.
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Get the index of this value.
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Type record for a value.
///
/// A function keeps one record for every value it defines, including its
/// parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ValueData {
    /// The value described.
    pub value: Value,
    /// Its type.
    pub ty: Type,
}

impl ValueData {
    /// Create a type record for a value.
    pub const fn new(value: Value, ty: Type) -> Self {
        Self { value, ty }
    }
}

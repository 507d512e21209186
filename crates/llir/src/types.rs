//! IR type system.

use core::fmt;

/// A value type: a name and a size in bytes.
///
/// Only `i32` is used by the current lowering, but types are plain data and
/// nothing assumes the set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Type {
    name: &'static str,
    size: u32,
}

impl Type {
    /// 32-bit signed integer.
    pub const I32: Type = Type::new("i32", 4);

    /// Create a type with the given name and size in bytes.
    pub const fn new(name: &'static str, size: u32) -> Self {
        Self { name, size }
    }

    /// Get the name of this type.
    pub const fn name(self) -> &'static str {
        self.name
    }

    /// Get the size of this type in bytes.
    pub const fn size_bytes(self) -> u32 {
        self.size
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

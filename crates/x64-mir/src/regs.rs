//! Register references: physical x86-64 GPRs and virtual registers.

use core::fmt;

/// Number of slots in the physical register file.
pub const PHYS_REG_COUNT: u8 = 16;

/// A physical x86-64 general-purpose register, identified by its index in
/// the 16-slot register file. Index 0 is the accumulator (`rax`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PhysReg(u8);

impl PhysReg {
    pub const RAX: PhysReg = PhysReg(0);
    pub const RBX: PhysReg = PhysReg(1);
    pub const RCX: PhysReg = PhysReg(2);
    pub const RDX: PhysReg = PhysReg(3);
    pub const RSI: PhysReg = PhysReg(4);
    pub const RDI: PhysReg = PhysReg(5);
    pub const RBP: PhysReg = PhysReg(6);
    pub const RSP: PhysReg = PhysReg(7);
    pub const R8: PhysReg = PhysReg(8);
    pub const R9: PhysReg = PhysReg(9);
    pub const R10: PhysReg = PhysReg(10);
    pub const R11: PhysReg = PhysReg(11);
    pub const R12: PhysReg = PhysReg(12);
    pub const R13: PhysReg = PhysReg(13);
    pub const R14: PhysReg = PhysReg(14);
    pub const R15: PhysReg = PhysReg(15);

    /// Create a physical register from its file index.
    ///
    /// Panics if `index` is outside the 16-slot file.
    pub fn new(index: u8) -> Self {
        assert!(
            index < PHYS_REG_COUNT,
            "invalid physical register index: {}",
            index
        );
        Self(index)
    }

    /// Get the file index of this register.
    pub const fn index(self) -> u8 {
        self.0
    }

    /// 32-bit name of this register (`eax`, `ebx`, ...).
    pub fn name32(self) -> &'static str {
        const NAMES: [&str; 16] = [
            "eax", "ebx", "ecx", "edx", "esi", "edi", "ebp", "esp", "r8d", "r9d", "r10d", "r11d",
            "r12d", "r13d", "r14d", "r15d",
        ];
        NAMES[self.0 as usize]
    }

    /// 64-bit name of this register (`rax`, `rbx`, ...).
    pub fn name64(self) -> &'static str {
        const NAMES: [&str; 16] = [
            "rax", "rbx", "rcx", "rdx", "rsi", "rdi", "rbp", "rsp", "r8", "r9", "r10", "r11",
            "r12", "r13", "r14", "r15",
        ];
        NAMES[self.0 as usize]
    }
}

impl fmt::Display for PhysReg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name64())
    }
}

/// A virtual register issued by the lowering backend.
///
/// Virtual registers live in their own unbounded id space, disjoint from the
/// physical file; a later allocation pass maps them onto it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct VReg(u32);

impl VReg {
    /// Create a virtual register with the given index.
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Get the index of this virtual register.
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for VReg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// A register reference: physical or virtual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Reg {
    /// Physical register.
    Phys(PhysReg),
    /// Virtual register.
    Virt(VReg),
}

impl Reg {
    /// Whether this is a virtual register.
    pub fn is_virtual(self) -> bool {
        matches!(self, Reg::Virt(_))
    }

    /// Whether this is a physical register.
    pub fn is_physical(self) -> bool {
        matches!(self, Reg::Phys(_))
    }

    /// The virtual register, if this is one.
    pub fn as_virtual(self) -> Option<VReg> {
        match self {
            Reg::Virt(vreg) => Some(vreg),
            Reg::Phys(_) => None,
        }
    }
}

impl From<PhysReg> for Reg {
    fn from(reg: PhysReg) -> Self {
        Reg::Phys(reg)
    }
}

impl From<VReg> for Reg {
    fn from(vreg: VReg) -> Self {
        Reg::Virt(vreg)
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reg::Phys(reg) => write!(f, "{}", reg),
            Reg::Virt(vreg) => write!(f, "{}", vreg),
        }
    }
}

//! Target CPU enumeration
//!
//! The disassembler is retargetable within the 6502 family and its
//! derivatives. Only the names matter to the core: they appear verbatim
//! in the `.setcpu` directive. The per-CPU opcode tables live with the
//! decoder, not here.

use std::fmt;
use std::str::FromStr;

/// Supported target CPUs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cpu {
    Mos6502,
    /// NMOS 6502 with undocumented opcodes
    Mos6502X,
    Sc65SC02,
    Wdc65C02,
    Wdc65816,
    HuC6280,
    M740,
    Csg4510,
    Csg45GS02,
}

impl Cpu {
    /// Name as it appears in the `.setcpu` directive
    pub fn name(self) -> &'static str {
        match self {
            Cpu::Mos6502 => "6502",
            Cpu::Mos6502X => "6502X",
            Cpu::Sc65SC02 => "65SC02",
            Cpu::Wdc65C02 => "65C02",
            Cpu::Wdc65816 => "65816",
            Cpu::HuC6280 => "HuC6280",
            Cpu::M740 => "m740",
            Cpu::Csg4510 => "4510",
            Cpu::Csg45GS02 => "45GS02",
        }
    }

    /// True for CPUs with runtime-variable accumulator/index widths
    pub fn has_variable_widths(self) -> bool {
        matches!(self, Cpu::Wdc65816)
    }
}

impl fmt::Display for Cpu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Cpu {
    type Err = UnknownCpu;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "6502" => Ok(Cpu::Mos6502),
            "6502X" => Ok(Cpu::Mos6502X),
            "65SC02" => Ok(Cpu::Sc65SC02),
            "65C02" => Ok(Cpu::Wdc65C02),
            "65816" => Ok(Cpu::Wdc65816),
            "HuC6280" => Ok(Cpu::HuC6280),
            "m740" => Ok(Cpu::M740),
            "4510" => Ok(Cpu::Csg4510),
            "45GS02" => Ok(Cpu::Csg45GS02),
            _ => Err(UnknownCpu(s.to_string())),
        }
    }
}

/// Error for [`Cpu::from_str`] on an unrecognized CPU name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCpu(pub String);

impl fmt::Display for UnknownCpu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown CPU '{}'", self.0)
    }
}

impl std::error::Error for UnknownCpu {}

//! # Construction-Time Configuration
//!
//! One core serves both the original NMOS 6502 and the CMOS 65C02. The
//! [`Variant`] selects silicon behaviour (the indirect-JMP bug, decimal-mode
//! flags, a handful of timing differences) and `cmos_opcodes` selects whether the
//! 65C02 instruction additions are decoded at all.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Processor silicon being simulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Variant {
    /// Original NMOS 6502.
    ///
    /// `JMP ($xxFF)` fetches the high byte of its target from `$xx00`, decimal mode
    /// leaves N/V/Z reflecting intermediate binary values, and BRK/IRQ/NMI leave the
    /// D flag untouched.
    Nmos6502,

    /// CMOS 65C02 (WDC W65C02S).
    ///
    /// The indirect JMP crosses pages correctly at the cost of one cycle, N/Z are
    /// valid after decimal arithmetic (which costs one extra cycle), and
    /// BRK/IRQ/NMI clear D.
    #[default]
    Cmos65C02,
}

impl Variant {
    /// Returns true for the CMOS part.
    pub fn is_cmos(self) -> bool {
        self == Variant::Cmos65C02
    }

    /// Returns true when `JMP (abs)` reproduces the page-wrap bug.
    pub fn has_indirect_jump_bug(self) -> bool {
        self == Variant::Nmos6502
    }
}

/// Processor configuration fixed at construction.
///
/// # Examples
///
/// ```
/// use w65sim::{CpuConfig, Variant};
///
/// let strict = CpuConfig::nmos();
/// assert_eq!(strict.variant, Variant::Nmos6502);
/// assert!(!strict.cmos_opcodes);
///
/// // NMOS timing and bugs, but with the 65C02 instructions decoded
/// let hybrid = CpuConfig::nmos().with_cmos_opcodes(true);
/// assert!(hybrid.cmos_opcodes);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CpuConfig {
    /// Silicon behaviour to reproduce.
    pub variant: Variant,

    /// Decode the 65C02 additions (BRA, PHX/PHY/PLX/PLY, STZ, TRB/TSB,
    /// BBR/BBS/RMB/SMB, WAI/STP, `(zp)` and `(abs,X)` modes). Undefined 65C02
    /// opcodes become NOPs when this is set; otherwise they fault.
    pub cmos_opcodes: bool,
}

impl CpuConfig {
    /// Strict NMOS 6502: jump bug, no 65C02 opcodes.
    pub fn nmos() -> Self {
        Self {
            variant: Variant::Nmos6502,
            cmos_opcodes: false,
        }
    }

    /// Full 65C02.
    pub fn cmos() -> Self {
        Self {
            variant: Variant::Cmos65C02,
            cmos_opcodes: true,
        }
    }

    /// Replaces the silicon variant, keeping the opcode selection.
    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    /// Enables or disables decoding of the 65C02 opcode additions.
    pub fn with_cmos_opcodes(mut self, enabled: bool) -> Self {
        self.cmos_opcodes = enabled;
        self
    }
}

impl Default for CpuConfig {
    fn default() -> Self {
        Self::cmos()
    }
}

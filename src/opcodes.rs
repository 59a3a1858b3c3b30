//! # Opcode Metadata Table
//!
//! This module contains the complete 256-entry opcode metadata table that serves as the
//! single source of truth for instruction decoding, dispatch and disassembly.
//!
//! The table covers the union of both processors:
//! - **151 NMOS instructions** - present on every part
//! - **65C02 additions** - BRA, STZ, TRB/TSB, PHX/PHY/PLX/PLY, BBR/BBS/RMB/SMB,
//!   WAI/STP, `INC A`/`DEC A`, `BIT` immediate and indexed, `(zp)` and `(abs,X)`
//! - **Undefined opcodes** - marked with "???"; on the 65C02 each behaves as a NOP
//!   of the size and timing recorded here
//!
//! Cycle counts are the NMOS values with no penalties applied. Use [`base_cycles`]
//! for the per-variant figure.

use crate::addressing::AddressingMode;
use crate::config::Variant;

/// How an instruction touches its effective address.
///
/// Indexed modes use this to decide whether the page-fix-up cycle is always spent
/// (stores and read-modify-write) or only when a page boundary is crossed (reads).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessKind {
    /// Reads the operand.
    Read,
    /// Writes the operand without reading it.
    Write,
    /// Reads, modifies and writes back the operand.
    Modify,
    /// Stack, flag, transfer and flow-control instructions.
    Control,
}

/// Which processors decode an opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpcodeSet {
    /// Documented on the NMOS 6502 and kept by the 65C02.
    Nmos,
    /// Added by the 65C02.
    Cmos,
    /// Undefined. A NOP on the 65C02, unsupported on the NMOS part.
    Undefined,
}

/// Metadata for a single opcode.
///
/// # Fields
///
/// - `mnemonic`: Instruction name (e.g., "LDA", "BBR3", "???")
/// - `addressing_mode`: How the instruction interprets operand bytes
/// - `base_cycles`: Minimum NMOS cycle cost (page-crossing and branch penalties added dynamically)
/// - `size_bytes`: Total instruction size including opcode and operands (1-3 bytes)
/// - `access`: How the effective address is used
/// - `set`: Which processors decode it
///
/// # Examples
///
/// ```
/// use w65sim::{AddressingMode, OPCODE_TABLE};
///
/// // Look up LDA immediate (opcode 0xA9)
/// let lda_imm = &OPCODE_TABLE[0xA9];
/// assert_eq!(lda_imm.mnemonic, "LDA");
/// assert_eq!(lda_imm.addressing_mode, AddressingMode::Immediate);
/// assert_eq!(lda_imm.base_cycles, 2);
/// assert_eq!(lda_imm.size_bytes, 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeMetadata {
    /// Instruction mnemonic.
    pub mnemonic: &'static str,

    /// Addressing mode for this instruction.
    pub addressing_mode: AddressingMode,

    /// Base cycle cost (before page crossing and branch penalties).
    pub base_cycles: u8,

    /// Total instruction size in bytes (opcode + operands).
    pub size_bytes: u8,

    /// How the effective address is used.
    pub access: AccessKind,

    /// Processors that decode this opcode.
    pub set: OpcodeSet,
}

impl OpcodeMetadata {
    /// True when the configured processor decodes this opcode.
    pub fn is_decoded(&self, cmos_opcodes: bool) -> bool {
        match self.set {
            OpcodeSet::Nmos => true,
            OpcodeSet::Cmos | OpcodeSet::Undefined => cmos_opcodes,
        }
    }

    /// Bit number addressed by BBR/BBS/RMB/SMB, taken from the mnemonic digit.
    pub fn bit_index(&self) -> Option<u8> {
        match self.mnemonic.as_bytes() {
            [b'B', b'B', b'R' | b'S', digit @ b'0'..=b'7']
            | [b'R' | b'S', b'M', b'B', digit @ b'0'..=b'7'] => Some(digit - b'0'),
            _ => None,
        }
    }
}

/// Cycle cost before penalties on the given silicon.
///
/// The 65C02 takes one extra cycle on `JMP (abs)` and one fewer on the absolute,X
/// shifts and rotates when no page is crossed.
///
/// # Examples
///
/// ```
/// use w65sim::opcodes::base_cycles;
/// use w65sim::Variant;
///
/// assert_eq!(base_cycles(0x6C, Variant::Nmos6502), 5);
/// assert_eq!(base_cycles(0x6C, Variant::Cmos65C02), 6);
/// assert_eq!(base_cycles(0x1E, Variant::Cmos65C02), 6);
/// ```
pub fn base_cycles(opcode: u8, variant: Variant) -> u8 {
    match (variant, opcode) {
        (Variant::Cmos65C02, 0x6C) => 6,
        (Variant::Cmos65C02, 0x1E | 0x3E | 0x5E | 0x7E) => 6,
        _ => OPCODE_TABLE[opcode as usize].base_cycles,
    }
}

const fn op(
    mnemonic: &'static str,
    addressing_mode: AddressingMode,
    base_cycles: u8,
    access: AccessKind,
    set: OpcodeSet,
) -> OpcodeMetadata {
    OpcodeMetadata {
        mnemonic,
        addressing_mode,
        base_cycles,
        size_bytes: 1 + addressing_mode.operand_bytes(),
        access,
        set,
    }
}

const fn undefined(addressing_mode: AddressingMode, base_cycles: u8) -> OpcodeMetadata {
    op("???", addressing_mode, base_cycles, AccessKind::Read, OpcodeSet::Undefined)
}

use AccessKind::{Control, Modify, Read, Write};
use AddressingMode::{
    Absolute as Abs, AbsoluteIndirectX as Iax, AbsoluteX as Abx, AbsoluteY as Aby,
    Accumulator as Acc, Immediate as Imm, Implicit as Imp, Indirect as Ind, IndirectX as Izx,
    IndirectY as Izy, IndirectZP as Izp, Relative as Rel, ZeroPage as Zp,
    ZeroPageRelative as Zpr, ZeroPageX as Zpx, ZeroPageY as Zpy,
};
use OpcodeSet::{Cmos, Nmos};

/// Complete 256-entry opcode metadata table indexed by opcode byte value.
///
/// # Examples
///
/// ```
/// use w65sim::OPCODE_TABLE;
///
/// assert_eq!(OPCODE_TABLE[0x00].mnemonic, "BRK");
/// assert_eq!(OPCODE_TABLE[0x80].mnemonic, "BRA");
/// assert_eq!(OPCODE_TABLE[0x03].mnemonic, "???");
/// ```
#[rustfmt::skip]
pub const OPCODE_TABLE: [OpcodeMetadata; 256] = [
    // 0x00
    op("BRK", Imp, 7, Control, Nmos),
    op("ORA", Izx, 6, Read, Nmos),
    undefined(Imm, 2),
    undefined(Imp, 1),
    op("TSB", Zp, 5, Modify, Cmos),
    op("ORA", Zp, 3, Read, Nmos),
    op("ASL", Zp, 5, Modify, Nmos),
    op("RMB0", Zp, 5, Modify, Cmos),
    op("PHP", Imp, 3, Control, Nmos),
    op("ORA", Imm, 2, Read, Nmos),
    op("ASL", Acc, 2, Modify, Nmos),
    undefined(Imp, 1),
    op("TSB", Abs, 6, Modify, Cmos),
    op("ORA", Abs, 4, Read, Nmos),
    op("ASL", Abs, 6, Modify, Nmos),
    op("BBR0", Zpr, 5, Control, Cmos),
    // 0x10
    op("BPL", Rel, 2, Control, Nmos),
    op("ORA", Izy, 5, Read, Nmos),
    op("ORA", Izp, 5, Read, Cmos),
    undefined(Imp, 1),
    op("TRB", Zp, 5, Modify, Cmos),
    op("ORA", Zpx, 4, Read, Nmos),
    op("ASL", Zpx, 6, Modify, Nmos),
    op("RMB1", Zp, 5, Modify, Cmos),
    op("CLC", Imp, 2, Control, Nmos),
    op("ORA", Aby, 4, Read, Nmos),
    op("INC", Acc, 2, Modify, Cmos),
    undefined(Imp, 1),
    op("TRB", Abs, 6, Modify, Cmos),
    op("ORA", Abx, 4, Read, Nmos),
    op("ASL", Abx, 7, Modify, Nmos),
    op("BBR1", Zpr, 5, Control, Cmos),
    // 0x20
    op("JSR", Abs, 6, Control, Nmos),
    op("AND", Izx, 6, Read, Nmos),
    undefined(Imm, 2),
    undefined(Imp, 1),
    op("BIT", Zp, 3, Read, Nmos),
    op("AND", Zp, 3, Read, Nmos),
    op("ROL", Zp, 5, Modify, Nmos),
    op("RMB2", Zp, 5, Modify, Cmos),
    op("PLP", Imp, 4, Control, Nmos),
    op("AND", Imm, 2, Read, Nmos),
    op("ROL", Acc, 2, Modify, Nmos),
    undefined(Imp, 1),
    op("BIT", Abs, 4, Read, Nmos),
    op("AND", Abs, 4, Read, Nmos),
    op("ROL", Abs, 6, Modify, Nmos),
    op("BBR2", Zpr, 5, Control, Cmos),
    // 0x30
    op("BMI", Rel, 2, Control, Nmos),
    op("AND", Izy, 5, Read, Nmos),
    op("AND", Izp, 5, Read, Cmos),
    undefined(Imp, 1),
    op("BIT", Zpx, 4, Read, Cmos),
    op("AND", Zpx, 4, Read, Nmos),
    op("ROL", Zpx, 6, Modify, Nmos),
    op("RMB3", Zp, 5, Modify, Cmos),
    op("SEC", Imp, 2, Control, Nmos),
    op("AND", Aby, 4, Read, Nmos),
    op("DEC", Acc, 2, Modify, Cmos),
    undefined(Imp, 1),
    op("BIT", Abx, 4, Read, Cmos),
    op("AND", Abx, 4, Read, Nmos),
    op("ROL", Abx, 7, Modify, Nmos),
    op("BBR3", Zpr, 5, Control, Cmos),
    // 0x40
    op("RTI", Imp, 6, Control, Nmos),
    op("EOR", Izx, 6, Read, Nmos),
    undefined(Imm, 2),
    undefined(Imp, 1),
    undefined(Zp, 3),
    op("EOR", Zp, 3, Read, Nmos),
    op("LSR", Zp, 5, Modify, Nmos),
    op("RMB4", Zp, 5, Modify, Cmos),
    op("PHA", Imp, 3, Control, Nmos),
    op("EOR", Imm, 2, Read, Nmos),
    op("LSR", Acc, 2, Modify, Nmos),
    undefined(Imp, 1),
    op("JMP", Abs, 3, Control, Nmos),
    op("EOR", Abs, 4, Read, Nmos),
    op("LSR", Abs, 6, Modify, Nmos),
    op("BBR4", Zpr, 5, Control, Cmos),
    // 0x50
    op("BVC", Rel, 2, Control, Nmos),
    op("EOR", Izy, 5, Read, Nmos),
    op("EOR", Izp, 5, Read, Cmos),
    undefined(Imp, 1),
    undefined(Zpx, 4),
    op("EOR", Zpx, 4, Read, Nmos),
    op("LSR", Zpx, 6, Modify, Nmos),
    op("RMB5", Zp, 5, Modify, Cmos),
    op("CLI", Imp, 2, Control, Nmos),
    op("EOR", Aby, 4, Read, Nmos),
    op("PHY", Imp, 3, Control, Cmos),
    undefined(Imp, 1),
    undefined(Abs, 8),
    op("EOR", Abx, 4, Read, Nmos),
    op("LSR", Abx, 7, Modify, Nmos),
    op("BBR5", Zpr, 5, Control, Cmos),
    // 0x60
    op("RTS", Imp, 6, Control, Nmos),
    op("ADC", Izx, 6, Read, Nmos),
    undefined(Imm, 2),
    undefined(Imp, 1),
    op("STZ", Zp, 3, Write, Cmos),
    op("ADC", Zp, 3, Read, Nmos),
    op("ROR", Zp, 5, Modify, Nmos),
    op("RMB6", Zp, 5, Modify, Cmos),
    op("PLA", Imp, 4, Control, Nmos),
    op("ADC", Imm, 2, Read, Nmos),
    op("ROR", Acc, 2, Modify, Nmos),
    undefined(Imp, 1),
    op("JMP", Ind, 5, Control, Nmos),
    op("ADC", Abs, 4, Read, Nmos),
    op("ROR", Abs, 6, Modify, Nmos),
    op("BBR6", Zpr, 5, Control, Cmos),
    // 0x70
    op("BVS", Rel, 2, Control, Nmos),
    op("ADC", Izy, 5, Read, Nmos),
    op("ADC", Izp, 5, Read, Cmos),
    undefined(Imp, 1),
    op("STZ", Zpx, 4, Write, Cmos),
    op("ADC", Zpx, 4, Read, Nmos),
    op("ROR", Zpx, 6, Modify, Nmos),
    op("RMB7", Zp, 5, Modify, Cmos),
    op("SEI", Imp, 2, Control, Nmos),
    op("ADC", Aby, 4, Read, Nmos),
    op("PLY", Imp, 4, Control, Cmos),
    undefined(Imp, 1),
    op("JMP", Iax, 6, Control, Cmos),
    op("ADC", Abx, 4, Read, Nmos),
    op("ROR", Abx, 7, Modify, Nmos),
    op("BBR7", Zpr, 5, Control, Cmos),
    // 0x80
    op("BRA", Rel, 3, Control, Cmos),
    op("STA", Izx, 6, Write, Nmos),
    undefined(Imm, 2),
    undefined(Imp, 1),
    op("STY", Zp, 3, Write, Nmos),
    op("STA", Zp, 3, Write, Nmos),
    op("STX", Zp, 3, Write, Nmos),
    op("SMB0", Zp, 5, Modify, Cmos),
    op("DEY", Imp, 2, Control, Nmos),
    op("BIT", Imm, 2, Read, Cmos),
    op("TXA", Imp, 2, Control, Nmos),
    undefined(Imp, 1),
    op("STY", Abs, 4, Write, Nmos),
    op("STA", Abs, 4, Write, Nmos),
    op("STX", Abs, 4, Write, Nmos),
    op("BBS0", Zpr, 5, Control, Cmos),
    // 0x90
    op("BCC", Rel, 2, Control, Nmos),
    op("STA", Izy, 6, Write, Nmos),
    op("STA", Izp, 5, Write, Cmos),
    undefined(Imp, 1),
    op("STY", Zpx, 4, Write, Nmos),
    op("STA", Zpx, 4, Write, Nmos),
    op("STX", Zpy, 4, Write, Nmos),
    op("SMB1", Zp, 5, Modify, Cmos),
    op("TYA", Imp, 2, Control, Nmos),
    op("STA", Aby, 5, Write, Nmos),
    op("TXS", Imp, 2, Control, Nmos),
    undefined(Imp, 1),
    op("STZ", Abs, 4, Write, Cmos),
    op("STA", Abx, 5, Write, Nmos),
    op("STZ", Abx, 5, Write, Cmos),
    op("BBS1", Zpr, 5, Control, Cmos),
    // 0xA0
    op("LDY", Imm, 2, Read, Nmos),
    op("LDA", Izx, 6, Read, Nmos),
    op("LDX", Imm, 2, Read, Nmos),
    undefined(Imp, 1),
    op("LDY", Zp, 3, Read, Nmos),
    op("LDA", Zp, 3, Read, Nmos),
    op("LDX", Zp, 3, Read, Nmos),
    op("SMB2", Zp, 5, Modify, Cmos),
    op("TAY", Imp, 2, Control, Nmos),
    op("LDA", Imm, 2, Read, Nmos),
    op("TAX", Imp, 2, Control, Nmos),
    undefined(Imp, 1),
    op("LDY", Abs, 4, Read, Nmos),
    op("LDA", Abs, 4, Read, Nmos),
    op("LDX", Abs, 4, Read, Nmos),
    op("BBS2", Zpr, 5, Control, Cmos),
    // 0xB0
    op("BCS", Rel, 2, Control, Nmos),
    op("LDA", Izy, 5, Read, Nmos),
    op("LDA", Izp, 5, Read, Cmos),
    undefined(Imp, 1),
    op("LDY", Zpx, 4, Read, Nmos),
    op("LDA", Zpx, 4, Read, Nmos),
    op("LDX", Zpy, 4, Read, Nmos),
    op("SMB3", Zp, 5, Modify, Cmos),
    op("CLV", Imp, 2, Control, Nmos),
    op("LDA", Aby, 4, Read, Nmos),
    op("TSX", Imp, 2, Control, Nmos),
    undefined(Imp, 1),
    op("LDY", Abx, 4, Read, Nmos),
    op("LDA", Abx, 4, Read, Nmos),
    op("LDX", Aby, 4, Read, Nmos),
    op("BBS3", Zpr, 5, Control, Cmos),
    // 0xC0
    op("CPY", Imm, 2, Read, Nmos),
    op("CMP", Izx, 6, Read, Nmos),
    undefined(Imm, 2),
    undefined(Imp, 1),
    op("CPY", Zp, 3, Read, Nmos),
    op("CMP", Zp, 3, Read, Nmos),
    op("DEC", Zp, 5, Modify, Nmos),
    op("SMB4", Zp, 5, Modify, Cmos),
    op("INY", Imp, 2, Control, Nmos),
    op("CMP", Imm, 2, Read, Nmos),
    op("DEX", Imp, 2, Control, Nmos),
    op("WAI", Imp, 3, Control, Cmos),
    op("CPY", Abs, 4, Read, Nmos),
    op("CMP", Abs, 4, Read, Nmos),
    op("DEC", Abs, 6, Modify, Nmos),
    op("BBS4", Zpr, 5, Control, Cmos),
    // 0xD0
    op("BNE", Rel, 2, Control, Nmos),
    op("CMP", Izy, 5, Read, Nmos),
    op("CMP", Izp, 5, Read, Cmos),
    undefined(Imp, 1),
    undefined(Zpx, 4),
    op("CMP", Zpx, 4, Read, Nmos),
    op("DEC", Zpx, 6, Modify, Nmos),
    op("SMB5", Zp, 5, Modify, Cmos),
    op("CLD", Imp, 2, Control, Nmos),
    op("CMP", Aby, 4, Read, Nmos),
    op("PHX", Imp, 3, Control, Cmos),
    op("STP", Imp, 3, Control, Cmos),
    undefined(Abs, 4),
    op("CMP", Abx, 4, Read, Nmos),
    op("DEC", Abx, 7, Modify, Nmos),
    op("BBS5", Zpr, 5, Control, Cmos),
    // 0xE0
    op("CPX", Imm, 2, Read, Nmos),
    op("SBC", Izx, 6, Read, Nmos),
    undefined(Imm, 2),
    undefined(Imp, 1),
    op("CPX", Zp, 3, Read, Nmos),
    op("SBC", Zp, 3, Read, Nmos),
    op("INC", Zp, 5, Modify, Nmos),
    op("SMB6", Zp, 5, Modify, Cmos),
    op("INX", Imp, 2, Control, Nmos),
    op("SBC", Imm, 2, Read, Nmos),
    op("NOP", Imp, 2, Control, Nmos),
    undefined(Imp, 1),
    op("CPX", Abs, 4, Read, Nmos),
    op("SBC", Abs, 4, Read, Nmos),
    op("INC", Abs, 6, Modify, Nmos),
    op("BBS6", Zpr, 5, Control, Cmos),
    // 0xF0
    op("BEQ", Rel, 2, Control, Nmos),
    op("SBC", Izy, 5, Read, Nmos),
    op("SBC", Izp, 5, Read, Cmos),
    undefined(Imp, 1),
    undefined(Zpx, 4),
    op("SBC", Zpx, 4, Read, Nmos),
    op("INC", Zpx, 6, Modify, Nmos),
    op("SMB7", Zp, 5, Modify, Cmos),
    op("SED", Imp, 2, Control, Nmos),
    op("SBC", Aby, 4, Read, Nmos),
    op("PLX", Imp, 4, Control, Cmos),
    undefined(Imp, 1),
    undefined(Abs, 4),
    op("SBC", Abx, 4, Read, Nmos),
    op("INC", Abx, 7, Modify, Nmos),
    op("BBS7", Zpr, 5, Control, Cmos),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nmos_set_has_151_opcodes() {
        let count = OPCODE_TABLE.iter().filter(|m| m.set == OpcodeSet::Nmos).count();
        assert_eq!(count, 151);
    }

    #[test]
    fn test_size_matches_mode() {
        for (opcode, metadata) in OPCODE_TABLE.iter().enumerate() {
            assert_eq!(
                metadata.size_bytes,
                1 + metadata.addressing_mode.operand_bytes(),
                "opcode 0x{:02X}",
                opcode
            );
        }
    }

    #[test]
    fn test_bit_index_from_mnemonic() {
        assert_eq!(OPCODE_TABLE[0x0F].bit_index(), Some(0));
        assert_eq!(OPCODE_TABLE[0xFF].bit_index(), Some(7));
        assert_eq!(OPCODE_TABLE[0x57].bit_index(), Some(5));
        assert_eq!(OPCODE_TABLE[0xC7].bit_index(), Some(4));
        assert_eq!(OPCODE_TABLE[0xA9].bit_index(), None);
        assert_eq!(OPCODE_TABLE[0x00].bit_index(), None);
    }

    #[test]
    fn test_bit_index_matches_opcode_bits() {
        for (opcode, metadata) in OPCODE_TABLE.iter().enumerate() {
            if let Some(bit) = metadata.bit_index() {
                assert_eq!(bit as usize, (opcode >> 4) & 0x07, "opcode 0x{:02X}", opcode);
            }
        }
    }

    #[test]
    fn test_undefined_opcodes_are_decoded_only_with_cmos_opcodes() {
        let nop = &OPCODE_TABLE[0x5C];
        assert_eq!(nop.set, OpcodeSet::Undefined);
        assert!(nop.is_decoded(true));
        assert!(!nop.is_decoded(false));
        assert!(OPCODE_TABLE[0xEA].is_decoded(false));
    }

    #[test]
    fn test_cmos_cycle_overrides() {
        assert_eq!(base_cycles(0x1E, Variant::Nmos6502), 7);
        assert_eq!(base_cycles(0x7E, Variant::Cmos65C02), 6);
        assert_eq!(base_cycles(0xFE, Variant::Cmos65C02), 7);
        assert_eq!(base_cycles(0xA9, Variant::Cmos65C02), 2);
    }
}

//! # Disassembler
//!
//! Turns machine code back into mnemonics for listings and for the trace sink.
//!
//! Decoding follows the processor's own view of the opcode map: with
//! `cmos_opcodes` off, the 65C02 additions are not instructions, and every byte
//! that does not start a complete, decoded instruction becomes a one-byte
//! `.byte` directive so the listing can resynchronise.

pub mod decoder;
pub mod formatter;

use crate::addressing::AddressingMode;

/// A single disassembled instruction with full metadata
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    /// Address of the opcode byte
    pub address: u16,

    pub opcode: u8,

    /// Instruction mnemonic (e.g., "LDA", "BBR3", ".byte")
    pub mnemonic: &'static str,

    pub addressing_mode: AddressingMode,

    /// Operand bytes as stored (little-endian for words)
    pub operand_bytes: Vec<u8>,

    /// Opcode plus operands, 1-3 bytes
    pub size_bytes: u8,

    /// Cycles before page-crossing and branch penalties
    pub base_cycles: u8,
}

impl Instruction {
    /// A `.byte` directive for a byte that does not decode.
    fn data_byte(address: u16, byte: u8) -> Self {
        Instruction {
            address,
            opcode: byte,
            mnemonic: ".byte",
            addressing_mode: AddressingMode::Implicit,
            operand_bytes: vec![byte],
            size_bytes: 1,
            base_cycles: 0,
        }
    }
}

/// Options controlling disassembly output
#[derive(Debug, Clone, Copy)]
pub struct DisassemblyOptions {
    /// Address of the first byte
    pub start_address: u16,

    /// Whether listings include the raw instruction bytes
    pub hex_dump: bool,

    /// Whether listings include the address of each instruction
    pub show_offsets: bool,

    /// Decode the 65C02 additions; otherwise they become `.byte` directives
    pub cmos_opcodes: bool,
}

impl Default for DisassemblyOptions {
    fn default() -> Self {
        Self {
            start_address: 0x0000,
            hex_dump: false,
            show_offsets: false,
            cmos_opcodes: true,
        }
    }
}

/// Lazy instruction-by-instruction walk over a byte slice.
///
/// Addresses wrap at 0xFFFF like the program counter does.
#[derive(Debug, Clone)]
pub struct Disassembly<'a> {
    bytes: &'a [u8],
    offset: usize,
    address: u16,
    cmos_opcodes: bool,
}

impl<'a> Disassembly<'a> {
    pub fn new(bytes: &'a [u8], options: DisassemblyOptions) -> Self {
        Self {
            bytes,
            offset: 0,
            address: options.start_address,
            cmos_opcodes: options.cmos_opcodes,
        }
    }
}

impl Iterator for Disassembly<'_> {
    type Item = Instruction;

    fn next(&mut self) -> Option<Instruction> {
        let rest = self.bytes.get(self.offset..).filter(|r| !r.is_empty())?;

        let instr = decoder::decode_instruction(rest, self.address, self.cmos_opcodes)
            .unwrap_or_else(|| Instruction::data_byte(self.address, rest[0]));

        self.offset += instr.size_bytes as usize;
        self.address = self.address.wrapping_add(instr.size_bytes as u16);
        Some(instr)
    }
}

/// Disassembles a whole byte slice.
///
/// # Examples
///
/// ```
/// use w65sim::{disassemble, DisassemblyOptions};
///
/// let code = [0xA9, 0x05, 0x85, 0x00, 0x00];
/// let listing = disassemble(&code, DisassemblyOptions::default());
/// assert_eq!(listing.len(), 3);
/// assert_eq!(listing[1].mnemonic, "STA");
/// ```
pub fn disassemble(bytes: &[u8], options: DisassemblyOptions) -> Vec<Instruction> {
    Disassembly::new(bytes, options).collect()
}

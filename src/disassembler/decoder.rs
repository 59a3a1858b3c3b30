//! Instruction decoder for the disassembler

use crate::disassembler::Instruction;
use crate::opcodes::{OpcodeSet, OPCODE_TABLE};

/// Decode a single instruction from a byte slice
///
/// # Arguments
///
/// * `bytes` - The byte slice starting at the instruction to decode
/// * `address` - The memory address of this instruction
/// * `cmos_opcodes` - Whether the 65C02 additions are decoded
///
/// # Returns
///
/// Some(Instruction) if the opcode is defined and complete, None otherwise
pub fn decode_instruction(bytes: &[u8], address: u16, cmos_opcodes: bool) -> Option<Instruction> {
    let (&opcode, rest) = bytes.split_first()?;
    let metadata = &OPCODE_TABLE[opcode as usize];

    if metadata.set == OpcodeSet::Undefined || !metadata.is_decoded(cmos_opcodes) {
        return None;
    }

    let operand_len = (metadata.size_bytes - 1) as usize;
    let operand_bytes = rest.get(..operand_len)?.to_vec();

    Some(Instruction {
        address,
        opcode,
        mnemonic: metadata.mnemonic,
        addressing_mode: metadata.addressing_mode,
        operand_bytes,
        size_bytes: metadata.size_bytes,
        base_cycles: metadata.base_cycles,
    })
}

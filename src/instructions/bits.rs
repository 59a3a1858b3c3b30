//! # Bit Manipulation Instructions (65C02)
//!
//! - TRB / TSB: Test and reset / set memory bits against A
//! - RMB0-7 / SMB0-7: Reset / set one bit of a zero page byte
//! - BBR0-7 / BBS0-7: Branch on one bit of a zero page byte
//!
//! The bit number is the digit in the mnemonic (bits 4-6 of the opcode). All of
//! these are read-modify-write or read-then-branch sequences on the bus.

use crate::instructions::{branches, modify};
use crate::{AddressingMode, ExecutionError, MemoryBus, CPU, OPCODE_TABLE};

fn bit_mask(opcode: u8) -> Result<u8, ExecutionError> {
    OPCODE_TABLE[opcode as usize]
        .bit_index()
        .map(|bit| 1 << bit)
        .ok_or(ExecutionError::UnsupportedOpcode(opcode))
}

/// Executes TRB (Test and Reset Bits).
///
/// Z is set from A & M, then M = M & !A.
pub(crate) fn execute_trb<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    modify(cpu, opcode, |cpu, value| {
        cpu.flag_z = cpu.a & value == 0;
        value & !cpu.a
    })
}

/// Executes TSB (Test and Set Bits).
///
/// Z is set from A & M, then M = M | A.
pub(crate) fn execute_tsb<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    modify(cpu, opcode, |cpu, value| {
        cpu.flag_z = cpu.a & value == 0;
        value | cpu.a
    })
}

/// Executes RMBn (Reset Memory Bit). No flags are affected.
pub(crate) fn execute_rmb<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    let mask = bit_mask(opcode)?;
    let address = cpu.resolve(AddressingMode::ZeroPage)?;
    cpu.read_modify_write(address, |_, value| value & !mask);
    Ok(())
}

/// Executes SMBn (Set Memory Bit). No flags are affected.
pub(crate) fn execute_smb<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    let mask = bit_mask(opcode)?;
    let address = cpu.resolve(AddressingMode::ZeroPage)?;
    cpu.read_modify_write(address, |_, value| value | mask);
    Ok(())
}

/// Executes BBRn (Branch on Bit Reset).
///
/// Cycle timing:
/// - 5 cycles if branch not taken
/// - 6 cycles if branch taken to same page
/// - 7 cycles if branch taken to different page
pub(crate) fn execute_bbr<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    let mask = bit_mask(opcode)?;
    let value = test_zero_page(cpu)?;
    branches::branch_if(cpu, value & mask == 0)
}

/// Executes BBSn (Branch on Bit Set). Timing as BBR.
pub(crate) fn execute_bbs<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    let mask = bit_mask(opcode)?;
    let value = test_zero_page(cpu)?;
    branches::branch_if(cpu, value & mask != 0)
}

/// Zero page operand fetch, the read of the tested byte and the internal
/// cycle that re-reads it. Leaves PC on the displacement byte.
fn test_zero_page<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<u8, ExecutionError> {
    let address = cpu.resolve(AddressingMode::ZeroPageRelative)?;
    let value = cpu.read(address);
    cpu.read(address);
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_mask_from_table() {
        assert_eq!(bit_mask(0x07), Ok(0x01)); // RMB0
        assert_eq!(bit_mask(0xF7), Ok(0x80)); // SMB7
        assert_eq!(bit_mask(0x5F), Ok(0x20)); // BBR5
        assert_eq!(bit_mask(0xAF), Ok(0x04)); // BBS2
    }

    #[test]
    fn test_bit_mask_every_bit_opcode() {
        for low in [0x07u8, 0x0F] {
            for bit in 0..8u8 {
                let opcode = (bit << 4) | low;
                assert_eq!(bit_mask(opcode), Ok(1 << bit), "RMB/BBR {:02X}", opcode);
                assert_eq!(bit_mask(opcode | 0x80), Ok(1 << bit), "SMB/BBS {:02X}", opcode | 0x80);
            }
        }
    }

    #[test]
    fn test_bit_mask_rejects_other_opcodes() {
        assert_eq!(bit_mask(0xEA), Err(ExecutionError::UnsupportedOpcode(0xEA)));
    }
}

//! # Load and Store Instructions
//!
//! This module implements load and store operations:
//! - LDA / LDX / LDY: Load register, updating Z and N
//! - STA / STX / STY: Store register, no flags
//! - STZ: Store zero (65C02)
//!
//! Stores never read their target. Indexed stores always spend the page fix-up
//! cycle, crossing or not.

use crate::{ExecutionError, MemoryBus, CPU, OPCODE_TABLE};

/// Executes the LDA (Load Accumulator) instruction.
///
/// # Flag Behavior
///
/// - Zero (Z): Set if A = 0
/// - Negative (N): Set if bit 7 of A is set
/// - Other flags: Not affected
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU
/// * `opcode` - The opcode byte for this LDA instruction
pub(crate) fn execute_lda<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    let metadata = &OPCODE_TABLE[opcode as usize];
    let value = cpu.operand_value(metadata.addressing_mode)?;

    cpu.a = value;
    cpu.set_nz(value);
    Ok(())
}

/// Executes the LDX (Load X Register) instruction.
pub(crate) fn execute_ldx<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    let metadata = &OPCODE_TABLE[opcode as usize];
    let value = cpu.operand_value(metadata.addressing_mode)?;

    cpu.x = value;
    cpu.set_nz(value);
    Ok(())
}

/// Executes the LDY (Load Y Register) instruction.
pub(crate) fn execute_ldy<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    let metadata = &OPCODE_TABLE[opcode as usize];
    let value = cpu.operand_value(metadata.addressing_mode)?;

    cpu.y = value;
    cpu.set_nz(value);
    Ok(())
}

fn store<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8, value: u8) -> Result<(), ExecutionError> {
    let metadata = &OPCODE_TABLE[opcode as usize];
    let address = cpu.resolve(metadata.addressing_mode)?;
    cpu.write(address, value);
    Ok(())
}

/// Executes the STA (Store Accumulator) instruction.
pub(crate) fn execute_sta<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    let value = cpu.a;
    store(cpu, opcode, value)
}

/// Executes the STX (Store X Register) instruction.
pub(crate) fn execute_stx<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    let value = cpu.x;
    store(cpu, opcode, value)
}

/// Executes the STY (Store Y Register) instruction.
pub(crate) fn execute_sty<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    let value = cpu.y;
    store(cpu, opcode, value)
}

/// Executes the STZ (Store Zero) instruction.
pub(crate) fn execute_stz<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    store(cpu, opcode, 0x00)
}

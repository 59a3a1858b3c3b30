//! # Branch Instructions
//!
//! This module implements relative branch operations:
//! - BCC / BCS: Branch on Carry Clear / Set
//! - BNE / BEQ: Branch on Zero Clear / Set
//! - BPL / BMI: Branch on Negative Clear / Set
//! - BVC / BVS: Branch on Overflow Clear / Set
//! - BRA: Branch Always (65C02)
//!
//! All branch instructions use relative addressing with a signed 8-bit offset
//! measured from the address of the following instruction.
//!
//! Cycle timing:
//! - 2 cycles if branch not taken
//! - 3 cycles if branch taken to same page
//! - 4 cycles if branch taken to different page
//!
//! No flags are affected.

use crate::{AddressingMode, ExecutionError, MemoryBus, CPU};

/// Reads the displacement and, if `taken`, moves PC, spending the extra
/// cycles as dummy reads.
pub(crate) fn branch_if<M: MemoryBus>(cpu: &mut CPU<M>, taken: bool) -> Result<(), ExecutionError> {
    let address = cpu.resolve(AddressingMode::Relative)?;
    let offset = cpu.read(address) as i8;

    if !taken {
        return Ok(());
    }

    cpu.dummy_read_pc();

    let target = cpu.pc.wrapping_add_signed(offset as i16);
    if (cpu.pc ^ target) & 0xFF00 != 0 {
        // Fix-up cycle reads the target offset on the old page
        cpu.read((cpu.pc & 0xFF00) | (target & 0x00FF));
    }

    cpu.pc = target;
    Ok(())
}

/// Executes the BCC (Branch if Carry Clear) instruction.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU
/// * `_opcode` - The opcode byte for this BCC instruction (0x90)
pub(crate) fn execute_bcc<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _opcode: u8,
) -> Result<(), ExecutionError> {
    let taken = !cpu.flag_c;
    branch_if(cpu, taken)
}

/// Executes the BCS (Branch if Carry Set) instruction.
pub(crate) fn execute_bcs<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _opcode: u8,
) -> Result<(), ExecutionError> {
    let taken = cpu.flag_c;
    branch_if(cpu, taken)
}

/// Executes the BEQ (Branch if Equal) instruction.
pub(crate) fn execute_beq<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _opcode: u8,
) -> Result<(), ExecutionError> {
    let taken = cpu.flag_z;
    branch_if(cpu, taken)
}

/// Executes the BNE (Branch if Not Equal) instruction.
pub(crate) fn execute_bne<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _opcode: u8,
) -> Result<(), ExecutionError> {
    let taken = !cpu.flag_z;
    branch_if(cpu, taken)
}

/// Executes the BMI (Branch if Minus) instruction.
pub(crate) fn execute_bmi<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _opcode: u8,
) -> Result<(), ExecutionError> {
    let taken = cpu.flag_n;
    branch_if(cpu, taken)
}

/// Executes the BPL (Branch if Plus) instruction.
pub(crate) fn execute_bpl<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _opcode: u8,
) -> Result<(), ExecutionError> {
    let taken = !cpu.flag_n;
    branch_if(cpu, taken)
}

/// Executes the BVC (Branch if Overflow Clear) instruction.
pub(crate) fn execute_bvc<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _opcode: u8,
) -> Result<(), ExecutionError> {
    let taken = !cpu.flag_v;
    branch_if(cpu, taken)
}

/// Executes the BVS (Branch if Overflow Set) instruction.
pub(crate) fn execute_bvs<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _opcode: u8,
) -> Result<(), ExecutionError> {
    let taken = cpu.flag_v;
    branch_if(cpu, taken)
}

/// Executes the BRA (Branch Always) instruction. Always at least 3 cycles.
pub(crate) fn execute_bra<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _opcode: u8,
) -> Result<(), ExecutionError> {
    branch_if(cpu, true)
}

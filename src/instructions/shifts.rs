//! # Shift and Rotate Instructions
//!
//! This module implements bit shift and rotate operations:
//! - ASL: Arithmetic Shift Left
//! - LSR: Logical Shift Right
//! - ROL: Rotate Left through carry
//! - ROR: Rotate Right through carry
//!
//! Memory forms are read-modify-write: the original value is written back once
//! before the result, with MLB held low.
//!
//! # Flag Behavior
//!
//! - Carry (C): The bit shifted out
//! - Zero (Z), Negative (N): From the result

use crate::alu;
use crate::instructions::modify;
use crate::{ExecutionError, MemoryBus, CPU};

/// Executes the ASL (Arithmetic Shift Left) instruction.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU
/// * `opcode` - The opcode byte (0x0A accumulator, or a memory form)
pub(crate) fn execute_asl<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    modify(cpu, opcode, |cpu, value| {
        let (result, carry) = alu::shift_left(value);
        cpu.flag_c = carry;
        cpu.set_nz(result);
        result
    })
}

/// Executes the LSR (Logical Shift Right) instruction. N is always cleared.
pub(crate) fn execute_lsr<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    modify(cpu, opcode, |cpu, value| {
        let (result, carry) = alu::shift_right(value);
        cpu.flag_c = carry;
        cpu.set_nz(result);
        result
    })
}

/// Executes the ROL (Rotate Left) instruction.
pub(crate) fn execute_rol<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    modify(cpu, opcode, |cpu, value| {
        let (result, carry) = alu::rotate_left(value, cpu.flag_c);
        cpu.flag_c = carry;
        cpu.set_nz(result);
        result
    })
}

/// Executes the ROR (Rotate Right) instruction.
pub(crate) fn execute_ror<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    modify(cpu, opcode, |cpu, value| {
        let (result, carry) = alu::rotate_right(value, cpu.flag_c);
        cpu.flag_c = carry;
        cpu.set_nz(result);
        result
    })
}

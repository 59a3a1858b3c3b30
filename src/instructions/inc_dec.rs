//! # Increment and Decrement Instructions
//!
//! - INC / DEC: Memory (read-modify-write) or, on the 65C02, the accumulator
//! - INX / INY / DEX / DEY: Index registers
//!
//! All wrap at 8 bits and update Z and N.

use crate::instructions::{implied, modify};
use crate::{ExecutionError, MemoryBus, CPU};

/// Executes the INC (Increment) instruction.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU
/// * `opcode` - The opcode byte (0x1A for `INC A`, or a memory form)
pub(crate) fn execute_inc<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    modify(cpu, opcode, |cpu, value| {
        let result = value.wrapping_add(1);
        cpu.set_nz(result);
        result
    })
}

/// Executes the DEC (Decrement) instruction.
pub(crate) fn execute_dec<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    modify(cpu, opcode, |cpu, value| {
        let result = value.wrapping_sub(1);
        cpu.set_nz(result);
        result
    })
}

/// Executes the INX (Increment X) instruction.
pub(crate) fn execute_inx<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _opcode: u8,
) -> Result<(), ExecutionError> {
    implied(cpu, |cpu| {
        cpu.x = cpu.x.wrapping_add(1);
        cpu.set_nz(cpu.x);
    })
}

/// Executes the INY (Increment Y) instruction.
pub(crate) fn execute_iny<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _opcode: u8,
) -> Result<(), ExecutionError> {
    implied(cpu, |cpu| {
        cpu.y = cpu.y.wrapping_add(1);
        cpu.set_nz(cpu.y);
    })
}

/// Executes the DEX (Decrement X) instruction.
pub(crate) fn execute_dex<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _opcode: u8,
) -> Result<(), ExecutionError> {
    implied(cpu, |cpu| {
        cpu.x = cpu.x.wrapping_sub(1);
        cpu.set_nz(cpu.x);
    })
}

/// Executes the DEY (Decrement Y) instruction.
pub(crate) fn execute_dey<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _opcode: u8,
) -> Result<(), ExecutionError> {
    implied(cpu, |cpu| {
        cpu.y = cpu.y.wrapping_sub(1);
        cpu.set_nz(cpu.y);
    })
}

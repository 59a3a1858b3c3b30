//! # Stack Instructions
//!
//! This module implements stack operations:
//! - PHA / PHP / PHX / PHY: Push (3 cycles)
//! - PLA / PLP / PLX / PLY: Pull (4 cycles)
//!
//! The stack lives in page one (0x0100-0x01FF) and SP wraps within it. A push
//! writes at SP then decrements; a pull increments then reads.
//!
//! PHP pushes status with B and bit 5 set. PLP ignores both.

use crate::{ExecutionError, MemoryBus, CPU};

fn push_register<M: MemoryBus>(cpu: &mut CPU<M>, value: u8) -> Result<(), ExecutionError> {
    cpu.dummy_read_pc();
    cpu.push(value);
    Ok(())
}

/// Filler read at PC, internal cycle at the stack slot, then the pull.
fn pull_register<M: MemoryBus>(cpu: &mut CPU<M>) -> u8 {
    cpu.dummy_read_pc();
    cpu.dummy_stack_read();
    cpu.pull()
}

/// Executes the PHA (Push Accumulator) instruction.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU
/// * `_opcode` - The opcode byte for this PHA instruction (0x48)
pub(crate) fn execute_pha<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _opcode: u8,
) -> Result<(), ExecutionError> {
    let value = cpu.a;
    push_register(cpu, value)
}

/// Executes the PHP (Push Processor Status) instruction.
pub(crate) fn execute_php<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _opcode: u8,
) -> Result<(), ExecutionError> {
    let value = cpu.status_flags().pushed(true);
    push_register(cpu, value)
}

/// Executes the PHX (Push X) instruction.
pub(crate) fn execute_phx<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _opcode: u8,
) -> Result<(), ExecutionError> {
    let value = cpu.x;
    push_register(cpu, value)
}

/// Executes the PHY (Push Y) instruction.
pub(crate) fn execute_phy<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _opcode: u8,
) -> Result<(), ExecutionError> {
    let value = cpu.y;
    push_register(cpu, value)
}

/// Executes the PLA (Pull Accumulator) instruction. Updates Z and N.
pub(crate) fn execute_pla<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _opcode: u8,
) -> Result<(), ExecutionError> {
    cpu.a = pull_register(cpu);
    cpu.set_nz(cpu.a);
    Ok(())
}

/// Executes the PLP (Pull Processor Status) instruction.
pub(crate) fn execute_plp<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _opcode: u8,
) -> Result<(), ExecutionError> {
    let value = pull_register(cpu);
    cpu.set_status(value);
    Ok(())
}

/// Executes the PLX (Pull X) instruction. Updates Z and N.
pub(crate) fn execute_plx<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _opcode: u8,
) -> Result<(), ExecutionError> {
    cpu.x = pull_register(cpu);
    cpu.set_nz(cpu.x);
    Ok(())
}

/// Executes the PLY (Pull Y) instruction. Updates Z and N.
pub(crate) fn execute_ply<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _opcode: u8,
) -> Result<(), ExecutionError> {
    cpu.y = pull_register(cpu);
    cpu.set_nz(cpu.y);
    Ok(())
}

//! # Status Flag Instructions
//!
//! CLC, SEC, CLI, SEI, CLD, SED and CLV. Each is 2 cycles: the opcode fetch and
//! a discarded read of the following byte.
//!
//! A change to I made by CLI or SEI is not seen by the interrupt poll at the end
//! of the same instruction.

use crate::instructions::implied;
use crate::{ExecutionError, MemoryBus, CPU};

/// Executes the CLC (Clear Carry) instruction.
pub(crate) fn execute_clc<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _opcode: u8,
) -> Result<(), ExecutionError> {
    implied(cpu, |cpu| cpu.flag_c = false)
}

/// Executes the SEC (Set Carry) instruction.
pub(crate) fn execute_sec<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _opcode: u8,
) -> Result<(), ExecutionError> {
    implied(cpu, |cpu| cpu.flag_c = true)
}

/// Executes the CLI (Clear Interrupt Disable) instruction.
pub(crate) fn execute_cli<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _opcode: u8,
) -> Result<(), ExecutionError> {
    implied(cpu, |cpu| cpu.flag_i = false)
}

/// Executes the SEI (Set Interrupt Disable) instruction.
pub(crate) fn execute_sei<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _opcode: u8,
) -> Result<(), ExecutionError> {
    implied(cpu, |cpu| cpu.flag_i = true)
}

/// Executes the CLD (Clear Decimal) instruction.
pub(crate) fn execute_cld<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _opcode: u8,
) -> Result<(), ExecutionError> {
    implied(cpu, |cpu| cpu.flag_d = false)
}

/// Executes the SED (Set Decimal) instruction.
pub(crate) fn execute_sed<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _opcode: u8,
) -> Result<(), ExecutionError> {
    implied(cpu, |cpu| cpu.flag_d = true)
}

/// Executes the CLV (Clear Overflow) instruction.
pub(crate) fn execute_clv<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _opcode: u8,
) -> Result<(), ExecutionError> {
    implied(cpu, |cpu| cpu.flag_v = false)
}

//! # Register Transfer Instructions
//!
//! TAX, TAY, TXA, TYA and TSX copy a register and update Z and N. TXS copies X
//! into SP and leaves the flags alone.

use crate::instructions::implied;
use crate::{ExecutionError, MemoryBus, CPU};

/// Executes the TAX (Transfer A to X) instruction.
pub(crate) fn execute_tax<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _opcode: u8,
) -> Result<(), ExecutionError> {
    implied(cpu, |cpu| {
        cpu.x = cpu.a;
        cpu.set_nz(cpu.x);
    })
}

/// Executes the TAY (Transfer A to Y) instruction.
pub(crate) fn execute_tay<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _opcode: u8,
) -> Result<(), ExecutionError> {
    implied(cpu, |cpu| {
        cpu.y = cpu.a;
        cpu.set_nz(cpu.y);
    })
}

/// Executes the TXA (Transfer X to A) instruction.
pub(crate) fn execute_txa<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _opcode: u8,
) -> Result<(), ExecutionError> {
    implied(cpu, |cpu| {
        cpu.a = cpu.x;
        cpu.set_nz(cpu.a);
    })
}

/// Executes the TYA (Transfer Y to A) instruction.
pub(crate) fn execute_tya<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _opcode: u8,
) -> Result<(), ExecutionError> {
    implied(cpu, |cpu| {
        cpu.a = cpu.y;
        cpu.set_nz(cpu.a);
    })
}

/// Executes the TSX (Transfer SP to X) instruction.
pub(crate) fn execute_tsx<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _opcode: u8,
) -> Result<(), ExecutionError> {
    implied(cpu, |cpu| {
        cpu.x = cpu.sp;
        cpu.set_nz(cpu.x);
    })
}

/// Executes the TXS (Transfer X to SP) instruction. No flags are affected.
pub(crate) fn execute_txs<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _opcode: u8,
) -> Result<(), ExecutionError> {
    implied(cpu, |cpu| cpu.sp = cpu.x)
}

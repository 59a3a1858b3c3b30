//! # Control Flow Instructions
//!
//! This module implements control flow operations:
//! - JMP: Jump (absolute, indirect, and 65C02 absolute indexed indirect)
//! - JSR / RTS: Subroutine call and return
//! - BRK / RTI: Software interrupt and interrupt return
//! - NOP: No operation, including the 65C02's undefined-opcode NOPs
//! - WAI / STP: Wait for interrupt / stop (65C02)
//!
//! BRK is a software interrupt that:
//! 1. Skips a padding byte, so PC+2 is pushed (high byte first, then low byte)
//! 2. Pushes processor status to stack with B set
//! 3. Sets the I (interrupt disable) flag, and on the 65C02 clears D
//! 4. Loads PC from IRQ vector at $FFFE/F

use crate::interrupts::IRQ_VECTOR;
use crate::{AddressingMode, ExecutionError, MemoryBus, CPU, OPCODE_TABLE};

/// Executes the BRK (Force Interrupt) instruction.
///
/// Cycle timing: 7 cycles (fixed)
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU
/// * `_opcode` - The opcode byte for this BRK instruction (0x00)
pub(crate) fn execute_brk<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _opcode: u8,
) -> Result<(), ExecutionError> {
    cpu.fetch_operand();

    cpu.push_word(cpu.pc);
    cpu.push(cpu.status_flags().pushed(true));
    cpu.flag_i = true;
    if cpu.config.variant.is_cmos() {
        cpu.flag_d = false;
    }
    cpu.pc = cpu.read_vector(IRQ_VECTOR);
    Ok(())
}

/// Executes the JMP (Jump) instruction.
///
/// Cycle timing:
/// - Absolute: 3 cycles
/// - Indirect: 5 cycles (NMOS, with the page-wrap bug), 6 cycles (65C02)
/// - Absolute indexed indirect: 6 cycles
pub(crate) fn execute_jmp<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    let metadata = &OPCODE_TABLE[opcode as usize];
    cpu.pc = cpu.resolve(metadata.addressing_mode)?;
    Ok(())
}

/// Executes the JSR (Jump to Subroutine) instruction.
///
/// Pushes the address of the last operand byte (return address minus one),
/// then jumps. The high target byte is fetched after the pushes.
///
/// Cycle timing: 6 cycles
pub(crate) fn execute_jsr<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _opcode: u8,
) -> Result<(), ExecutionError> {
    let lo = cpu.fetch_operand();
    cpu.dummy_stack_read();
    cpu.push_word(cpu.pc);
    let hi = cpu.read(cpu.pc);

    cpu.pc = u16::from_le_bytes([lo, hi]);
    Ok(())
}

/// Executes the RTS (Return from Subroutine) instruction.
///
/// Pulls the return address and resumes one byte past it.
///
/// Cycle timing: 6 cycles
pub(crate) fn execute_rts<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _opcode: u8,
) -> Result<(), ExecutionError> {
    cpu.dummy_read_pc();
    cpu.dummy_stack_read();
    cpu.pc = cpu.pull_word();
    cpu.dummy_read_pc();
    cpu.pc = cpu.pc.wrapping_add(1);
    Ok(())
}

/// Executes the RTI (Return from Interrupt) instruction.
///
/// Pulls status (B and bit 5 ignored) then PC. Unlike RTS, the pulled PC is
/// used as-is.
///
/// Cycle timing: 6 cycles
pub(crate) fn execute_rti<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _opcode: u8,
) -> Result<(), ExecutionError> {
    cpu.dummy_read_pc();
    cpu.dummy_stack_read();
    let status = cpu.pull();
    cpu.set_status(status);
    cpu.pc = cpu.pull_word();
    Ok(())
}

/// Executes the NOP (No Operation) instruction. 2 cycles.
pub(crate) fn execute_nop<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _opcode: u8,
) -> Result<(), ExecutionError> {
    cpu.dummy_read_pc();
    Ok(())
}

/// Executes an undefined opcode on the 65C02.
///
/// These are NOPs that still consume operand bytes and perform the reads their
/// addressing mode implies:
/// - `x3`, `xB`: 1 byte, 1 cycle
/// - `x2`: 2 bytes, 2 cycles
/// - `44`: 2 bytes, 3 cycles; `54`, `D4`, `F4`: 2 bytes, 4 cycles
/// - `DC`, `FC`: 3 bytes, 4 cycles
/// - `5C`: 3 bytes, 8 cycles
pub(crate) fn execute_undefined_nop<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    let metadata = &OPCODE_TABLE[opcode as usize];
    if metadata.addressing_mode == AddressingMode::Implicit {
        return Ok(());
    }

    let address = cpu.resolve(metadata.addressing_mode)?;
    cpu.read(address);

    if opcode == 0x5C {
        // Four more reads from the top page
        for _ in 0..4 {
            cpu.read(0xFF00 | (address & 0x00FF));
        }
    }
    Ok(())
}

/// Executes the WAI (Wait for Interrupt) instruction.
///
/// Parks the processor with RDY low until IRQB or NMIB is asserted. 3 cycles,
/// then one idle cycle per step while waiting.
pub(crate) fn execute_wai<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _opcode: u8,
) -> Result<(), ExecutionError> {
    cpu.dummy_read_pc();
    cpu.dummy_read_pc();
    cpu.enter_wait();
    Ok(())
}

/// Executes the STP (Stop) instruction.
///
/// Halts the processor with RDY low; only a reset resumes execution. 3 cycles,
/// then one idle cycle per step while stopped.
pub(crate) fn execute_stp<M: MemoryBus>(
    cpu: &mut CPU<M>,
    _opcode: u8,
) -> Result<(), ExecutionError> {
    cpu.dummy_read_pc();
    cpu.dummy_read_pc();
    cpu.enter_stop();
    Ok(())
}

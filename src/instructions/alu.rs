//! # ALU (Arithmetic Logic Unit) Instructions
//!
//! This module implements arithmetic and logical operations:
//! - ADC: Add with Carry
//! - SBC: Subtract with Carry
//! - AND, ORA, EOR: Bitwise logic
//! - CMP, CPX, CPY: Compare
//! - BIT: Bit test
//!
//! The arithmetic itself lives in [`crate::alu`]; handlers fetch the operand,
//! apply it, and copy flags back.

use crate::alu::{self, ArithmeticOutput};
use crate::{AddressingMode, ExecutionError, MemoryBus, CPU, OPCODE_TABLE};

/// Executes the ADC (Add with Carry) instruction.
///
/// Adds the operand plus the carry flag to the accumulator. With D set the
/// addition is decimal.
///
/// # Flag Behavior
///
/// - Carry (C): Carry out of bit 7 (binary) or of the high digit (decimal)
/// - Overflow (V): Signed overflow
/// - Zero (Z), Negative (N): From the result; on the NMOS part in decimal mode
///   they reflect the intermediate binary sum
///
/// The 65C02 spends one extra cycle in decimal mode.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU
/// * `opcode` - The opcode byte for this ADC instruction
pub(crate) fn execute_adc<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    let metadata = &OPCODE_TABLE[opcode as usize];
    let value = cpu.operand_value(metadata.addressing_mode)?;

    let output = alu::add(cpu.a, value, cpu.flag_c, cpu.flag_d);
    apply_arithmetic(cpu, output);
    Ok(())
}

/// Executes the SBC (Subtract with Carry) instruction.
///
/// Subtracts the operand and the borrow (inverted carry) from the accumulator.
/// Decimal mode follows ADC, including the extra 65C02 cycle.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU
/// * `opcode` - The opcode byte for this SBC instruction
pub(crate) fn execute_sbc<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    let metadata = &OPCODE_TABLE[opcode as usize];
    let value = cpu.operand_value(metadata.addressing_mode)?;

    let output = alu::subtract(cpu.a, value, cpu.flag_c, cpu.flag_d);
    apply_arithmetic(cpu, output);
    Ok(())
}

fn apply_arithmetic<M: MemoryBus>(cpu: &mut CPU<M>, mut output: ArithmeticOutput) {
    if cpu.flag_d && cpu.config.variant.is_cmos() {
        // Decimal fix-up cycle
        cpu.dummy_read_pc();
        output = output.with_result_flags();
    }

    cpu.a = output.result;
    cpu.flag_c = output.carry;
    cpu.flag_v = output.overflow;
    cpu.flag_z = output.zero;
    cpu.flag_n = output.negative;
}

/// Executes the AND (Logical AND) instruction.
///
/// A = A & M. Updates Z and N.
pub(crate) fn execute_and<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    let metadata = &OPCODE_TABLE[opcode as usize];
    let value = cpu.operand_value(metadata.addressing_mode)?;

    cpu.a &= value;
    cpu.set_nz(cpu.a);
    Ok(())
}

/// Executes the ORA (Logical Inclusive OR) instruction.
///
/// A = A | M. Updates Z and N.
pub(crate) fn execute_ora<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    let metadata = &OPCODE_TABLE[opcode as usize];
    let value = cpu.operand_value(metadata.addressing_mode)?;

    cpu.a |= value;
    cpu.set_nz(cpu.a);
    Ok(())
}

/// Executes the EOR (Exclusive OR) instruction.
///
/// A = A ^ M. Updates Z and N.
pub(crate) fn execute_eor<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    let metadata = &OPCODE_TABLE[opcode as usize];
    let value = cpu.operand_value(metadata.addressing_mode)?;

    cpu.a ^= value;
    cpu.set_nz(cpu.a);
    Ok(())
}

/// Executes the CMP (Compare Accumulator) instruction.
///
/// Computes A - M without storing the result.
///
/// # Flag Behavior
///
/// - Carry (C): Set if A >= M
/// - Zero (Z): Set if A == M
/// - Negative (N): Bit 7 of (A - M)
pub(crate) fn execute_cmp<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    let register = cpu.a;
    compare(cpu, opcode, register)
}

/// Executes the CPX (Compare X Register) instruction.
pub(crate) fn execute_cpx<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    let register = cpu.x;
    compare(cpu, opcode, register)
}

/// Executes the CPY (Compare Y Register) instruction.
pub(crate) fn execute_cpy<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    let register = cpu.y;
    compare(cpu, opcode, register)
}

fn compare<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8, register: u8) -> Result<(), ExecutionError> {
    let metadata = &OPCODE_TABLE[opcode as usize];
    let value = cpu.operand_value(metadata.addressing_mode)?;

    let (zero, carry, negative) = alu::compare(register, value);
    cpu.flag_z = zero;
    cpu.flag_c = carry;
    cpu.flag_n = negative;
    Ok(())
}

/// Executes the BIT (Bit Test) instruction.
///
/// # Flag Behavior
///
/// - Zero (Z): Set if (A & M) == 0
/// - Negative (N): Bit 7 of M
/// - Overflow (V): Bit 6 of M
///
/// The 65C02 immediate form (`BIT #imm`) only updates Z.
pub(crate) fn execute_bit<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    let metadata = &OPCODE_TABLE[opcode as usize];
    let value = cpu.operand_value(metadata.addressing_mode)?;

    cpu.flag_z = cpu.a & value == 0;
    if metadata.addressing_mode != AddressingMode::Immediate {
        cpu.flag_n = value & 0x80 != 0;
        cpu.flag_v = value & 0x40 != 0;
    }
    Ok(())
}

//! # Addressing Modes
//!
//! This module defines the addressing modes of the 6502 and 65C02 and the resolver
//! that turns a mode into an effective address, issuing exactly the operand
//! fetches, pointer reads and dummy reads the silicon performs along the way.
//!
//! Operand bytes are consumed from `PC`, which is post-incremented for every byte
//! read, so on return `PC` points at the next instruction.

use crate::opcodes::{AccessKind, OPCODE_TABLE};
use crate::{ExecutionError, MemoryBus, CPU};

/// Addressing mode enumeration.
///
/// # Operand Sizes
///
/// - **0 bytes**: Implicit, Accumulator
/// - **1 byte**: Immediate, ZeroPage, ZeroPageX, ZeroPageY, Relative, IndirectX,
///   IndirectY, IndirectZP
/// - **2 bytes**: Absolute, AbsoluteX, AbsoluteY, Indirect, AbsoluteIndirectX,
///   ZeroPageRelative
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    /// No operand, operation implied by instruction.
    ///
    /// Examples: CLC, RTS, NOP
    Implicit,

    /// Operates directly on the accumulator register.
    ///
    /// Examples: LSR A, ROL A, INC A
    Accumulator,

    /// 8-bit constant operand in instruction.
    ///
    /// Example: LDA #$10
    Immediate,

    /// 8-bit address in zero page (0x00-0xFF).
    ///
    /// Example: LDA $80
    ZeroPage,

    /// Zero page address indexed by X register, wrapping within zero page.
    ///
    /// Example: LDA $80,X
    ZeroPageX,

    /// Zero page address indexed by Y register, wrapping within zero page.
    ///
    /// Example: LDX $80,Y
    ZeroPageY,

    /// Signed 8-bit offset for branch instructions.
    ///
    /// Example: BEQ label
    Relative,

    /// Full 16-bit address.
    ///
    /// Example: JMP $1234
    Absolute,

    /// 16-bit address indexed by X register.
    ///
    /// Example: LDA $1234,X
    /// May incur +1 cycle penalty if page boundary is crossed.
    AbsoluteX,

    /// 16-bit address indexed by Y register.
    ///
    /// Example: LDA $1234,Y
    /// May incur +1 cycle penalty if page boundary is crossed.
    AbsoluteY,

    /// Indirect jump through 16-bit pointer.
    ///
    /// Example: JMP ($FFFC)
    /// Only used by JMP. The NMOS part never carries into the pointer's high byte.
    Indirect,

    /// Indexed indirect: (ZP + X) then dereference.
    ///
    /// Example: LDA ($40,X)
    IndirectX,

    /// Indirect indexed: ZP dereference then + Y.
    ///
    /// Example: LDA ($40),Y
    /// May incur +1 cycle penalty if page boundary is crossed.
    IndirectY,

    /// Zero page indirect, no index (65C02).
    ///
    /// Example: LDA ($40)
    IndirectZP,

    /// Absolute indexed indirect (65C02, JMP only).
    ///
    /// Example: JMP ($1234,X)
    AbsoluteIndirectX,

    /// Zero page operand followed by a branch displacement (65C02 BBR/BBS).
    ///
    /// Example: BBR3 $12,label
    ZeroPageRelative,
}

impl AddressingMode {
    /// Number of operand bytes following the opcode.
    pub const fn operand_bytes(self) -> u8 {
        use AddressingMode::*;
        match self {
            Implicit | Accumulator => 0,
            Immediate | ZeroPage | ZeroPageX | ZeroPageY | Relative | IndirectX | IndirectY
            | IndirectZP => 1,
            Absolute | AbsoluteX | AbsoluteY | Indirect | AbsoluteIndirectX | ZeroPageRelative => 2,
        }
    }
}

impl<M: MemoryBus> CPU<M> {
    /// Computes the effective address for `mode`.
    ///
    /// For Immediate and Relative the "address" is that of the operand byte itself;
    /// for ZeroPageRelative it is the zero page operand (the displacement is left
    /// for the caller). Implicit and Accumulator have no address and fault.
    pub(crate) fn resolve(&mut self, mode: AddressingMode) -> Result<u16, ExecutionError> {
        use AddressingMode::*;

        let address = match mode {
            Immediate | Relative => {
                let address = self.pc;
                self.pc = self.pc.wrapping_add(1);
                address
            }
            ZeroPage | ZeroPageRelative => self.fetch_operand() as u16,
            ZeroPageX => {
                let index = self.x;
                self.zero_page_indexed(index)
            }
            ZeroPageY => {
                let index = self.y;
                self.zero_page_indexed(index)
            }
            Absolute => self.fetch_operand_word(),
            AbsoluteX => {
                let base = self.fetch_operand_word();
                let index = self.x;
                self.indexed(base, index)
            }
            AbsoluteY => {
                let base = self.fetch_operand_word();
                let index = self.y;
                self.indexed(base, index)
            }
            IndirectX => {
                let pointer = self.fetch_operand();
                self.read(pointer as u16);
                self.read_zero_page_word(pointer.wrapping_add(self.x))
            }
            IndirectY => {
                let pointer = self.fetch_operand();
                let base = self.read_zero_page_word(pointer);
                let index = self.y;
                self.indexed(base, index)
            }
            IndirectZP => {
                let pointer = self.fetch_operand();
                self.read_zero_page_word(pointer)
            }
            Indirect => {
                let pointer = self.fetch_operand_word();
                let lo = self.read(pointer);
                let hi_address = if self.config.variant.has_indirect_jump_bug() {
                    // High byte comes from the same page
                    (pointer & 0xFF00) | (pointer.wrapping_add(1) & 0x00FF)
                } else {
                    self.read(self.pc.wrapping_sub(1));
                    pointer.wrapping_add(1)
                };
                let hi = self.read(hi_address);
                u16::from_le_bytes([lo, hi])
            }
            AbsoluteIndirectX => {
                let base = self.fetch_operand_word();
                self.read(self.pc.wrapping_sub(1));
                let pointer = base.wrapping_add(self.x as u16);
                let lo = self.read(pointer);
                let hi = self.read(pointer.wrapping_add(1));
                u16::from_le_bytes([lo, hi])
            }
            Implicit | Accumulator => {
                // Only a broken opcode table gets here
                debug_assert!(false, "addressing mode {:?} has no effective address", mode);
                return Err(ExecutionError::InvalidAddressingMode(mode));
            }
        };

        Ok(address)
    }

    /// Resolves `mode` and reads the operand it designates.
    pub(crate) fn operand_value(&mut self, mode: AddressingMode) -> Result<u8, ExecutionError> {
        let address = self.resolve(mode)?;
        Ok(self.read(address))
    }

    fn zero_page_indexed(&mut self, index: u8) -> u16 {
        let base = self.fetch_operand();
        self.read(base as u16);
        base.wrapping_add(index) as u16
    }

    fn read_zero_page_word(&mut self, pointer: u8) -> u16 {
        let lo = self.read(pointer as u16);
        let hi = self.read(pointer.wrapping_add(1) as u16);
        u16::from_le_bytes([lo, hi])
    }

    /// Adds an index to a 16-bit base, spending the fix-up cycle when the low
    /// byte carries into the next page, or always for stores and
    /// read-modify-write instructions.
    fn indexed(&mut self, base: u16, index: u8) -> u16 {
        let address = base.wrapping_add(index as u16);
        let crossed = (base ^ address) & 0xFF00 != 0;

        if crossed || self.always_pays_index_cycle() {
            let dummy = if self.config.variant.is_cmos() {
                self.pc.wrapping_sub(1)
            } else {
                // NMOS reads from the un-carried address
                (base & 0xFF00) | (address & 0x00FF)
            };
            self.read(dummy);
        }

        address
    }

    fn always_pays_index_cycle(&self) -> bool {
        let metadata = &OPCODE_TABLE[self.opcode as usize];
        match metadata.access {
            AccessKind::Write => true,
            // The 65C02 only charges shifts and rotates on an actual page crossing
            AccessKind::Modify => {
                !(self.config.variant.is_cmos() && matches!(self.opcode, 0x1E | 0x3E | 0x5E | 0x7E))
            }
            AccessKind::Read | AccessKind::Control => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CpuConfig, FlatMemory};

    fn setup_cpu(config: CpuConfig) -> CPU<FlatMemory> {
        let mut memory = FlatMemory::new();
        memory.set_vector(0xFFFC, 0x8000);
        let mut cpu = CPU::with_config(memory, config);
        cpu.reset_cycle_count();
        cpu
    }

    #[test]
    fn test_operand_sizes() {
        assert_eq!(AddressingMode::Implicit.operand_bytes(), 0);
        assert_eq!(AddressingMode::IndirectZP.operand_bytes(), 1);
        assert_eq!(AddressingMode::ZeroPageRelative.operand_bytes(), 2);
        assert_eq!(AddressingMode::AbsoluteIndirectX.operand_bytes(), 2);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "has no effective address")]
    fn test_implicit_mode_asserts_in_debug_builds() {
        let mut cpu = setup_cpu(CpuConfig::cmos());
        let _ = cpu.resolve(AddressingMode::Implicit);
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn test_implicit_and_accumulator_fault() {
        let mut cpu = setup_cpu(CpuConfig::cmos());

        assert_eq!(
            cpu.resolve(AddressingMode::Implicit),
            Err(ExecutionError::InvalidAddressingMode(AddressingMode::Implicit))
        );
        assert_eq!(
            cpu.resolve(AddressingMode::Accumulator),
            Err(ExecutionError::InvalidAddressingMode(AddressingMode::Accumulator))
        );
        assert_eq!(cpu.cycle_count(), 0);
        assert_eq!(cpu.pc(), 0x8000);
    }

    #[test]
    fn test_immediate_returns_pc_and_advances() {
        let mut cpu = setup_cpu(CpuConfig::cmos());

        assert_eq!(cpu.resolve(AddressingMode::Immediate), Ok(0x8000));
        assert_eq!(cpu.pc(), 0x8001);
        assert_eq!(cpu.cycle_count(), 0);
    }

    #[test]
    fn test_zero_page_x_wraps_with_dummy_read() {
        let mut cpu = setup_cpu(CpuConfig::cmos());
        cpu.memory_mut().write(0x8000, 0xF0);
        cpu.set_x(0x20);

        assert_eq!(cpu.resolve(AddressingMode::ZeroPageX), Ok(0x0010));
        // operand fetch + dummy read of the unindexed address
        assert_eq!(cpu.cycle_count(), 2);
    }

    #[test]
    fn test_indirect_jump_page_wrap_bug() {
        let mut cpu = setup_cpu(CpuConfig::nmos());
        cpu.memory_mut().load(0x8000, &[0xFF, 0x30]);
        cpu.memory_mut().write(0x30FF, 0x34);
        cpu.memory_mut().write(0x3000, 0x12);
        cpu.memory_mut().write(0x3100, 0x56);

        assert_eq!(cpu.resolve(AddressingMode::Indirect), Ok(0x1234));
        assert_eq!(cpu.cycle_count(), 4);
    }

    #[test]
    fn test_indirect_jump_fixed_on_cmos() {
        let mut cpu = setup_cpu(CpuConfig::cmos());
        cpu.memory_mut().load(0x8000, &[0xFF, 0x30]);
        cpu.memory_mut().write(0x30FF, 0x34);
        cpu.memory_mut().write(0x3000, 0x12);
        cpu.memory_mut().write(0x3100, 0x56);

        assert_eq!(cpu.resolve(AddressingMode::Indirect), Ok(0x5634));
        assert_eq!(cpu.cycle_count(), 5);
    }

    #[test]
    fn test_indirect_y_page_cross_costs_a_cycle_for_reads() {
        let mut cpu = setup_cpu(CpuConfig::nmos());
        cpu.memory_mut().write(0x8000, 0x40);
        cpu.memory_mut().write(0x0040, 0xF0);
        cpu.memory_mut().write(0x0041, 0x20);
        cpu.set_y(0x20);
        cpu.opcode = 0xB1; // LDA (zp),Y

        assert_eq!(cpu.resolve(AddressingMode::IndirectY), Ok(0x2110));
        // operand + two pointer bytes + fix-up
        assert_eq!(cpu.cycle_count(), 4);
    }
}

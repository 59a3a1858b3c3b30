//! # Instruction Implementations
//!
//! This module contains the implementations of all 6502 and 65C02 instructions,
//! organized by category. Each instruction is a standalone function that takes a
//! mutable reference to the CPU and the opcode byte, with the opcode already
//! fetched and PC pointing at the first operand byte.
//!
//! Handlers never add cycles themselves. Every operand fetch, dummy read and
//! write they perform is a bus cycle, and that is the whole of the timing model.
//!
//! ## Categories
//!
//! - **alu**: Arithmetic and logic operations (ADC, SBC, AND, ORA, EOR, CMP, CPX, CPY, BIT)
//! - **bits**: 65C02 bit operations (TRB, TSB, RMB, SMB, BBR, BBS)
//! - **branches**: Relative branches (BCC, BCS, BEQ, BNE, BMI, BPL, BVC, BVS, BRA)
//! - **shifts**: Shift and rotate operations (ASL, LSR, ROL, ROR)
//! - **load_store**: Load and store instructions (LDA, LDX, LDY, STA, STX, STY, STZ)
//! - **inc_dec**: Increment and decrement operations (INC, DEC, INX, INY, DEX, DEY)
//! - **control**: Control flow instructions (JMP, JSR, RTS, RTI, BRK, NOP, WAI, STP)
//! - **stack**: Stack operations (PHA, PHP, PLA, PLP, PHX, PHY, PLX, PLY)
//! - **flags**: Status flag manipulation (CLC, SEC, CLI, SEI, CLD, SED, CLV)
//! - **transfer**: Register transfer operations (TAX, TAY, TXA, TYA, TSX, TXS)

pub(crate) mod alu;
pub(crate) mod bits;
pub(crate) mod branches;
pub(crate) mod control;
pub(crate) mod flags;
pub(crate) mod inc_dec;
pub(crate) mod load_store;
pub(crate) mod shifts;
pub(crate) mod stack;
pub(crate) mod transfer;

use crate::config::CpuConfig;
use crate::{AddressingMode, ExecutionError, MemoryBus, CPU, OPCODE_TABLE};

/// Signature shared by every instruction handler.
pub(crate) type Handler<M> = fn(&mut CPU<M>, u8) -> Result<(), ExecutionError>;

/// Builds the opcode-indexed handler table for `config`.
///
/// Opcodes the configuration does not decode map to [`unsupported`].
pub(crate) fn build_dispatch_table<M: MemoryBus>(config: &CpuConfig) -> [Handler<M>; 256] {
    let mut table: [Handler<M>; 256] = [unsupported::<M>; 256];

    for (opcode, metadata) in OPCODE_TABLE.iter().enumerate() {
        if !metadata.is_decoded(config.cmos_opcodes) {
            continue;
        }
        if let Some(handler) = handler_for::<M>(metadata.mnemonic) {
            table[opcode] = handler;
        }
    }

    table
}

fn handler_for<M: MemoryBus>(mnemonic: &str) -> Option<Handler<M>> {
    let handler: Handler<M> = match mnemonic {
        "ADC" => alu::execute_adc::<M>,
        "SBC" => alu::execute_sbc::<M>,
        "AND" => alu::execute_and::<M>,
        "ORA" => alu::execute_ora::<M>,
        "EOR" => alu::execute_eor::<M>,
        "CMP" => alu::execute_cmp::<M>,
        "CPX" => alu::execute_cpx::<M>,
        "CPY" => alu::execute_cpy::<M>,
        "BIT" => alu::execute_bit::<M>,

        "TRB" => bits::execute_trb::<M>,
        "TSB" => bits::execute_tsb::<M>,
        "RMB0" | "RMB1" | "RMB2" | "RMB3" | "RMB4" | "RMB5" | "RMB6" | "RMB7" => {
            bits::execute_rmb::<M>
        }
        "SMB0" | "SMB1" | "SMB2" | "SMB3" | "SMB4" | "SMB5" | "SMB6" | "SMB7" => {
            bits::execute_smb::<M>
        }
        "BBR0" | "BBR1" | "BBR2" | "BBR3" | "BBR4" | "BBR5" | "BBR6" | "BBR7" => {
            bits::execute_bbr::<M>
        }
        "BBS0" | "BBS1" | "BBS2" | "BBS3" | "BBS4" | "BBS5" | "BBS6" | "BBS7" => {
            bits::execute_bbs::<M>
        }

        "BCC" => branches::execute_bcc::<M>,
        "BCS" => branches::execute_bcs::<M>,
        "BEQ" => branches::execute_beq::<M>,
        "BNE" => branches::execute_bne::<M>,
        "BMI" => branches::execute_bmi::<M>,
        "BPL" => branches::execute_bpl::<M>,
        "BVC" => branches::execute_bvc::<M>,
        "BVS" => branches::execute_bvs::<M>,
        "BRA" => branches::execute_bra::<M>,

        "ASL" => shifts::execute_asl::<M>,
        "LSR" => shifts::execute_lsr::<M>,
        "ROL" => shifts::execute_rol::<M>,
        "ROR" => shifts::execute_ror::<M>,

        "LDA" => load_store::execute_lda::<M>,
        "LDX" => load_store::execute_ldx::<M>,
        "LDY" => load_store::execute_ldy::<M>,
        "STA" => load_store::execute_sta::<M>,
        "STX" => load_store::execute_stx::<M>,
        "STY" => load_store::execute_sty::<M>,
        "STZ" => load_store::execute_stz::<M>,

        "INC" => inc_dec::execute_inc::<M>,
        "DEC" => inc_dec::execute_dec::<M>,
        "INX" => inc_dec::execute_inx::<M>,
        "INY" => inc_dec::execute_iny::<M>,
        "DEX" => inc_dec::execute_dex::<M>,
        "DEY" => inc_dec::execute_dey::<M>,

        "JMP" => control::execute_jmp::<M>,
        "JSR" => control::execute_jsr::<M>,
        "RTS" => control::execute_rts::<M>,
        "RTI" => control::execute_rti::<M>,
        "BRK" => control::execute_brk::<M>,
        "NOP" => control::execute_nop::<M>,
        "WAI" => control::execute_wai::<M>,
        "STP" => control::execute_stp::<M>,
        "???" => control::execute_undefined_nop::<M>,

        "PHA" => stack::execute_pha::<M>,
        "PHP" => stack::execute_php::<M>,
        "PHX" => stack::execute_phx::<M>,
        "PHY" => stack::execute_phy::<M>,
        "PLA" => stack::execute_pla::<M>,
        "PLP" => stack::execute_plp::<M>,
        "PLX" => stack::execute_plx::<M>,
        "PLY" => stack::execute_ply::<M>,

        "CLC" => flags::execute_clc::<M>,
        "SEC" => flags::execute_sec::<M>,
        "CLI" => flags::execute_cli::<M>,
        "SEI" => flags::execute_sei::<M>,
        "CLD" => flags::execute_cld::<M>,
        "SED" => flags::execute_sed::<M>,
        "CLV" => flags::execute_clv::<M>,

        "TAX" => transfer::execute_tax::<M>,
        "TAY" => transfer::execute_tay::<M>,
        "TXA" => transfer::execute_txa::<M>,
        "TYA" => transfer::execute_tya::<M>,
        "TSX" => transfer::execute_tsx::<M>,
        "TXS" => transfer::execute_txs::<M>,

        _ => return None,
    };
    Some(handler)
}

/// Handler for opcodes the configuration does not decode.
///
/// The fetch cycle has already been spent; nothing else happens.
pub(crate) fn unsupported<M: MemoryBus>(
    _cpu: &mut CPU<M>,
    opcode: u8,
) -> Result<(), ExecutionError> {
    Err(ExecutionError::UnsupportedOpcode(opcode))
}

/// Shared body of the read-modify-write instructions.
///
/// In accumulator mode the operation costs one filler read; otherwise the
/// effective address goes through the locked read/dummy-write/write sequence.
pub(crate) fn modify<M: MemoryBus>(
    cpu: &mut CPU<M>,
    opcode: u8,
    operation: fn(&mut CPU<M>, u8) -> u8,
) -> Result<(), ExecutionError> {
    let metadata = &OPCODE_TABLE[opcode as usize];

    if metadata.addressing_mode == AddressingMode::Accumulator {
        cpu.dummy_read_pc();
        let value = cpu.a;
        cpu.a = operation(cpu, value);
        return Ok(());
    }

    let address = cpu.resolve(metadata.addressing_mode)?;
    cpu.read_modify_write(address, operation);
    Ok(())
}

/// Shared body of single-byte register instructions: one filler read, then the
/// register update.
pub(crate) fn implied<M: MemoryBus>(
    cpu: &mut CPU<M>,
    update: impl FnOnce(&mut CPU<M>),
) -> Result<(), ExecutionError> {
    cpu.dummy_read_pc();
    update(cpu);
    Ok(())
}

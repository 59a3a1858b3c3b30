//! # 6502 / 65C02 CPU Simulator Core
//!
//! A cycle-accurate simulator of the 6502 family, including the 65C02 superset of
//! instructions and bus signals.
//!
//! The processor never owns memory. Every cycle it drives exactly one transaction
//! through the [`MemoryBus`] trait, including the "dummy" reads and writes the real
//! silicon performs, so a host can intercept every access and keep peripherals in
//! lockstep with the emulated clock.
//!
//! ## Quick Start
//!
//! ```rust
//! use w65sim::{CpuConfig, FlatMemory, CPU};
//!
//! // Create 64KB flat memory
//! let mut memory = FlatMemory::new();
//!
//! // Set reset vector to point to program start at 0x8000
//! memory.write(0xFFFC, 0x00); // Low byte
//! memory.write(0xFFFD, 0x80); // High byte
//! memory.load(0x8000, &[0xA9, 0x05, 0x85, 0x00]); // LDA #$05 / STA $00
//!
//! // Initialize CPU - it runs the power-on reset sequence immediately
//! let mut cpu = CPU::with_config(memory, CpuConfig::cmos());
//! assert_eq!(cpu.pc(), 0x8000);
//! assert_eq!(cpu.sp(), 0xFD);
//! assert!(cpu.flag_i());
//!
//! cpu.step().unwrap();
//! cpu.step().unwrap();
//! assert_eq!(cpu.memory().read(0x0000), 0x05);
//! ```
//!
//! ## Architecture
//!
//! - `memory` - the bus contract and a flat 64KB implementation
//! - `addressing` - addressing modes and the effective-address resolver
//! - `alu` - pure arithmetic, logic and shift functions
//! - `opcodes` - the 256-entry opcode metadata table
//! - `instructions` - handlers per instruction family and the dispatch table
//! - `interrupts` - reset, NMI, IRQ, WAI and STP sequencing
//! - `pins` - input edge detection and output signal snapshots
//! - `cpu` - processor state, cycle accounting and public controls

pub mod addressing;
pub mod alu;
pub mod config;
pub mod cpu;
pub mod disassembler;
pub mod interrupts;
pub mod memory;
pub mod opcodes;
pub mod pins;
pub mod status;

#[cfg(feature = "trace")]
pub mod trace;

#[cfg(feature = "wasm")]
pub mod wasm;

// Internal instruction implementations (not part of public API)
mod instructions;

// Re-export public API
pub use addressing::AddressingMode;
pub use config::{CpuConfig, Variant};
pub use cpu::{Registers, CPU};
pub use disassembler::{disassemble, Disassembly, DisassemblyOptions, Instruction};
pub use interrupts::{RunState, IRQ_VECTOR, NMI_VECTOR, RESET_VECTOR};
pub use memory::{FlatMemory, MemoryBus};
pub use opcodes::{AccessKind, OpcodeMetadata, OPCODE_TABLE};
pub use pins::{EdgeTriggered, Signals};
pub use status::StatusFlags;

#[cfg(feature = "trace")]
pub use trace::{TraceRecord, TraceSink};

/// Errors that can occur during CPU execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ExecutionError {
    /// The fetched opcode has no entry for the configured processor.
    ///
    /// The opcode byte has already been fetched, so `PC` points past it.
    #[error("opcode 0x{0:02X} is not supported by this processor configuration")]
    UnsupportedOpcode(u8),

    /// An instruction handler asked the resolver for an effective address in a
    /// mode that has none. Only reachable through a broken opcode table.
    #[error("addressing mode {0:?} has no effective address")]
    InvalidAddressingMode(AddressingMode),
}

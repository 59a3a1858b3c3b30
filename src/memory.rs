//! # Bus Abstraction
//!
//! This module provides the `MemoryBus` trait, the only way the processor touches
//! the outside world. The processor has no private address space: opcode fetches,
//! operand reads, stack traffic, vector pulls and the "dummy" cycles of
//! read-modify-write instructions all arrive here, one call per bus cycle.
//!
//! ## Design Principles
//!
//! The contract follows the hardware:
//! - No bus errors - every access completes
//! - A read returns whatever the host decides; unmapped reads may return garbage
//! - Writes to ROM/unmapped regions may be ignored
//! - Dummy accesses are real accesses; hosts with read-sensitive I/O see them

use crate::pins::Signals;

/// Host side of the processor bus.
///
/// `access` is invoked exactly once per bus cycle. For a read (`is_write ==
/// false`) the processor ignores `data` and uses the returned byte. For a write
/// the returned byte is ignored and `data` is the byte being deposited.
///
/// `tick` is invoked once per processor cycle after `access` (or in its place for
/// cycles with no bus transaction, such as a suppressed write or a parked WAI/STP
/// cycle). It receives the output pins as they stood during that cycle.
///
/// Any `FnMut(u16, u8, bool) -> u8` closure is a bus.
///
/// # Examples
///
/// ```
/// use w65sim::{FlatMemory, MemoryBus};
///
/// let mut mem = FlatMemory::new();
///
/// // Write a value
/// mem.access(0x1234, 0x42, true);
///
/// // Read it back
/// assert_eq!(mem.access(0x1234, 0x00, false), 0x42);
/// ```
///
/// ## Implementing Custom Memory
///
/// ```
/// use w65sim::MemoryBus;
///
/// struct RomRamMemory {
///     ram: [u8; 0x8000],  // 32KB RAM (0x0000-0x7FFF)
///     rom: [u8; 0x8000],  // 32KB ROM (0x8000-0xFFFF)
/// }
///
/// impl MemoryBus for RomRamMemory {
///     fn access(&mut self, address: u16, data: u8, is_write: bool) -> u8 {
///         match (address < 0x8000, is_write) {
///             (true, true) => {
///                 self.ram[address as usize] = data;
///                 data
///             }
///             (true, false) => self.ram[address as usize],
///             (false, false) => self.rom[(address - 0x8000) as usize],
///             // Writes to ROM are silently ignored
///             (false, true) => data,
///         }
///     }
/// }
/// ```
pub trait MemoryBus {
    /// Performs one bus transaction.
    ///
    /// This method must never panic and must tolerate being called for dummy
    /// cycles whose result the processor discards.
    fn access(&mut self, address: u16, data: u8, is_write: bool) -> u8;

    /// Cycle-tick hook for host-side timing (video/audio sync).
    ///
    /// The default does nothing.
    fn tick(&mut self, _signals: Signals) {}
}

impl<F> MemoryBus for F
where
    F: FnMut(u16, u8, bool) -> u8,
{
    fn access(&mut self, address: u16, data: u8, is_write: bool) -> u8 {
        self(address, data, is_write)
    }
}

/// Simple 64KB flat memory implementation.
///
/// All 65536 addresses (0x0000-0xFFFF) are mapped to a single contiguous RAM
/// array initialized to 0x00.
///
/// Useful for:
/// - Testing and development
/// - Simple programs that don't need ROM/RAM distinction
///
/// # Examples
///
/// ```
/// use w65sim::{CPU, FlatMemory};
///
/// // Create memory and set up reset vector
/// let mut memory = FlatMemory::new();
/// memory.write(0xFFFC, 0x00); // Reset vector low byte
/// memory.write(0xFFFD, 0x80); // Reset vector high byte (PC = 0x8000)
///
/// // Load a simple program at 0x8000
/// memory.write(0x8000, 0xEA); // NOP
///
/// let cpu = CPU::new(memory);
/// assert_eq!(cpu.pc(), 0x8000);
/// ```
pub struct FlatMemory {
    /// 64KB contiguous memory array
    data: Box<[u8; 65536]>,
}

impl FlatMemory {
    /// Creates a new FlatMemory instance with all bytes initialized to zero.
    pub fn new() -> Self {
        Self {
            data: Box::new([0; 65536]),
        }
    }

    /// Reads a byte without going through the processor (no cycle is spent).
    pub fn read(&self, addr: u16) -> u8 {
        self.data[addr as usize]
    }

    /// Writes a byte without going through the processor.
    pub fn write(&mut self, addr: u16, value: u8) {
        self.data[addr as usize] = value;
    }

    /// Copies `bytes` into memory starting at `start`, wrapping at 0xFFFF.
    pub fn load(&mut self, start: u16, bytes: &[u8]) {
        let mut addr = start;
        for &byte in bytes {
            self.write(addr, byte);
            addr = addr.wrapping_add(1);
        }
    }

    /// Writes a little-endian 16-bit vector (e.g. 0xFFFC for reset).
    pub fn set_vector(&mut self, vector: u16, target: u16) {
        let [lo, hi] = target.to_le_bytes();
        self.write(vector, lo);
        self.write(vector.wrapping_add(1), hi);
    }
}

impl Default for FlatMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBus for FlatMemory {
    fn access(&mut self, address: u16, data: u8, is_write: bool) -> u8 {
        if is_write {
            self.write(address, data);
            data
        } else {
            self.read(address)
        }
    }
}

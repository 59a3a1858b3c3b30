//! # Instruction Trace
//!
//! Enabled with the `trace` feature. After every executed instruction the CPU
//! hands a [`TraceRecord`] to the installed [`TraceSink`] and emits it at
//! `log::trace!` level.
//!
//! Tracing is passive: operand bytes are captured as the instruction fetches
//! them, so no extra bus cycles are issued and read-sensitive devices see the
//! same traffic with tracing on or off.
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use w65sim::{CPU, FlatMemory, TraceRecord};
//!
//! let mut mem = FlatMemory::new();
//! mem.set_vector(0xFFFC, 0x8000);
//! mem.load(0x8000, &[0xA9, 0x05]);
//!
//! let lines = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&lines);
//!
//! let mut cpu = CPU::new(mem);
//! cpu.set_trace_sink(move |record: &TraceRecord| sink.borrow_mut().push(record.to_string()));
//! cpu.step().unwrap();
//!
//! assert!(lines.borrow()[0].starts_with("8000  A9 05     LDA #$05"));
//! ```

use std::fmt;

use crate::cpu::Registers;
use crate::disassembler::formatter::{format_bytes, format_instruction};
use crate::disassembler::Instruction;
use crate::{MemoryBus, CPU, OPCODE_TABLE};

/// One executed instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceRecord {
    /// Registers before the instruction, with `pc` at the opcode.
    pub registers: Registers,
    pub opcode: u8,
    operands: [u8; 2],
    /// Cycle counter before the opcode fetch.
    pub cycle: u64,
}

impl TraceRecord {
    /// Operand bytes as fetched (0-2 bytes).
    pub fn operands(&self) -> &[u8] {
        let len = OPCODE_TABLE[self.opcode as usize].size_bytes as usize - 1;
        &self.operands[..len]
    }

    /// The instruction in disassembled form.
    pub fn instruction(&self) -> Instruction {
        let metadata = &OPCODE_TABLE[self.opcode as usize];
        Instruction {
            address: self.registers.pc,
            opcode: self.opcode,
            mnemonic: metadata.mnemonic,
            addressing_mode: metadata.addressing_mode,
            operand_bytes: self.operands().to_vec(),
            size_bytes: metadata.size_bytes,
            base_cycles: metadata.base_cycles,
        }
    }
}

impl fmt::Display for TraceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let instruction = self.instruction();
        let r = &self.registers;
        write!(
            f,
            "{:04X}  {:<8}  {:<14} A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} CYC:{}",
            r.pc,
            format_bytes(&instruction),
            format_instruction(&instruction),
            r.a,
            r.x,
            r.y,
            r.status,
            r.sp,
            self.cycle
        )
    }
}

/// Receives one record per executed instruction.
///
/// Any `FnMut(&TraceRecord)` closure is a sink.
pub trait TraceSink {
    fn record(&mut self, record: &TraceRecord);
}

impl<F> TraceSink for F
where
    F: FnMut(&TraceRecord),
{
    fn record(&mut self, record: &TraceRecord) {
        self(record)
    }
}

impl<M: MemoryBus> CPU<M> {
    /// Installs a sink, replacing any previous one.
    pub fn set_trace_sink(&mut self, sink: impl TraceSink + 'static) {
        self.tracer = Some(Box::new(sink));
    }

    /// Removes the installed sink. Records are still logged at trace level.
    pub fn clear_trace_sink(&mut self) {
        self.tracer = None;
    }

    pub(crate) fn begin_trace(&mut self) -> (Registers, u64) {
        self.trace_pc = self.pc;
        self.trace_operands = [0; 2];
        (self.registers(), self.cycles)
    }

    /// Records operand bytes as they cross the bus.
    pub(crate) fn capture_operand(&mut self, address: u16, value: u8) {
        let offset = address.wrapping_sub(self.trace_pc).wrapping_sub(1) as usize;
        if let Some(slot) = self.trace_operands.get_mut(offset) {
            *slot = value;
        }
    }

    pub(crate) fn finish_trace(&mut self, (registers, cycle): (Registers, u64)) {
        let record = TraceRecord {
            registers,
            opcode: self.opcode,
            operands: self.trace_operands,
            cycle,
        };

        log::trace!("{}", record);
        if let Some(tracer) = self.tracer.as_mut() {
            tracer.record(&record);
        }
    }
}

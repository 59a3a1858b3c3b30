//! WASM API for the simulator.
//!
//! Provides JavaScript-callable interfaces for CPU control, pin driving, state
//! inspection and disassembly over a flat 64KB memory.

use crate::disassembler::formatter::format_instruction;
use crate::{CpuConfig, Disassembly, DisassemblyOptions, FlatMemory, RunState, CPU};
use wasm_bindgen::prelude::*;

/// JavaScript-compatible error wrapper
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsError {
    message: String,
}

#[wasm_bindgen]
impl JsError {
    #[wasm_bindgen(constructor)]
    pub fn new(message: &str) -> JsError {
        JsError {
            message: message.to_string(),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn message(&self) -> String {
        self.message.clone()
    }
}

impl From<crate::ExecutionError> for JsError {
    fn from(error: crate::ExecutionError) -> Self {
        JsError {
            message: error.to_string(),
        }
    }
}

/// One disassembled instruction
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct DisassemblyLine {
    address: u16,
    bytes: Vec<u8>,
    text: String,
}

#[wasm_bindgen]
impl DisassemblyLine {
    #[wasm_bindgen(getter)]
    pub fn address(&self) -> u16 {
        self.address
    }

    #[wasm_bindgen(getter)]
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn text(&self) -> String {
        self.text.clone()
    }
}

/// Cycle counts cross to JavaScript as u32; larger counts saturate.
fn saturate_cycles(cycles: u64) -> u32 {
    u32::try_from(cycles).unwrap_or(u32::MAX)
}

/// Main emulator interface for JavaScript
#[wasm_bindgen]
pub struct Emulator65C02 {
    cpu: CPU<FlatMemory>,
}

#[wasm_bindgen]
impl Emulator65C02 {
    /// Create a processor over zeroed memory. `cmos` selects a full 65C02;
    /// otherwise a strict NMOS 6502.
    #[wasm_bindgen(constructor)]
    pub fn new(cmos: bool) -> Self {
        let config = if cmos { CpuConfig::cmos() } else { CpuConfig::nmos() };
        Emulator65C02 {
            cpu: CPU::with_config(FlatMemory::new(), config),
        }
    }

    /// Advance by one instruction, interrupt entry or idle cycle
    pub fn step(&mut self) -> Result<(), JsError> {
        self.cpu.step().map_err(JsError::from)
    }

    /// Execute multiple cycles and return actual cycles executed
    pub fn run_for_cycles(&mut self, cycles: u32) -> Result<u32, JsError> {
        self.cpu
            .run_for_cycles(cycles as u64)
            .map(saturate_cycles)
            .map_err(JsError::from)
    }

    /// Run the reset sequence now, keeping memory
    pub fn reset(&mut self) {
        self.cpu.reset();
    }

    // Pins

    pub fn set_irq(&mut self, asserted: bool) {
        self.cpu.irq_pin(asserted);
    }

    pub fn set_nmi(&mut self, asserted: bool) {
        self.cpu.nmi_pin(asserted);
    }

    pub fn set_reset(&mut self, asserted: bool) {
        self.cpu.reset_pin(asserted);
    }

    pub fn set_bus_enable(&mut self, enabled: bool) {
        self.cpu.bus_enable_pin(enabled);
    }

    // Register getters
    #[wasm_bindgen(getter)]
    pub fn a(&self) -> u8 {
        self.cpu.a()
    }

    #[wasm_bindgen(getter)]
    pub fn x(&self) -> u8 {
        self.cpu.x()
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> u8 {
        self.cpu.y()
    }

    #[wasm_bindgen(getter)]
    pub fn pc(&self) -> u16 {
        self.cpu.pc()
    }

    #[wasm_bindgen(getter)]
    pub fn sp(&self) -> u8 {
        self.cpu.sp()
    }

    #[wasm_bindgen(getter)]
    pub fn status(&self) -> u8 {
        self.cpu.status()
    }

    #[wasm_bindgen(getter)]
    pub fn cycles(&self) -> f64 {
        self.cpu.cycle_count() as f64 // Convert u64 to f64 for JavaScript
    }

    /// True while parked by WAI or halted by STP
    #[wasm_bindgen(getter)]
    pub fn halted(&self) -> bool {
        self.cpu.run_state() != RunState::Running
    }

    // Memory access methods

    /// Read a single byte from memory
    pub fn read_memory(&self, addr: u16) -> u8 {
        self.cpu.memory().read(addr)
    }

    /// Write a single byte to memory
    pub fn write_memory(&mut self, addr: u16, value: u8) {
        self.cpu.memory_mut().write(addr, value);
    }

    /// Read a 256-byte page from memory (for efficient display)
    pub fn get_memory_page(&self, page: u8) -> Vec<u8> {
        let start = (page as u16) << 8;
        (0..256).map(|i| self.cpu.memory().read(start + i)).collect()
    }

    /// Load a program into memory and jump to it
    pub fn load_program(&mut self, program: &[u8], start_addr: u16) {
        self.cpu.memory_mut().load(start_addr, program);
        self.cpu.force_pc(start_addr);
    }

    /// Disassemble memory starting at an address
    pub fn disassemble(&self, start_addr: u16, num_instructions: u32) -> Vec<JsValue> {
        // Three bytes per instruction is always enough
        let len = (num_instructions as usize * 3).min(0x10000);
        let window: Vec<u8> = (0..len)
            .map(|offset| self.cpu.memory().read(start_addr.wrapping_add(offset as u16)))
            .collect();

        let opts = DisassemblyOptions {
            start_address: start_addr,
            cmos_opcodes: self.cpu.config().cmos_opcodes,
            ..DisassemblyOptions::default()
        };

        Disassembly::new(&window, opts)
            .take(num_instructions as usize)
            .map(|instr| {
                let bytes = window
                    .iter()
                    .skip(instr.address.wrapping_sub(start_addr) as usize)
                    .take(instr.size_bytes as usize)
                    .copied()
                    .collect();
                JsValue::from(DisassemblyLine {
                    address: instr.address,
                    bytes,
                    text: format_instruction(&instr),
                })
            })
            .collect()
    }
}

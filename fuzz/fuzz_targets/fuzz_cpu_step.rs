//! Fuzz target for CPU step execution.
//!
//! Builds an arbitrary processor state, memory image and pin schedule, then
//! steps a handful of times on either variant. Every step must account for at
//! least one bus cycle and nothing may panic.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use w65sim::{CpuConfig, FlatMemory, MemoryBus, Signals, CPU};

/// Arbitrary CPU initial state for fuzzing
#[derive(Debug, Arbitrary)]
struct FuzzCpuState {
    a: u8,
    x: u8,
    y: u8,
    sp: u8,
    status: u8,
    cmos: bool,
    cmos_opcodes: bool,
}

/// Memory region for fuzzing
#[derive(Debug, Arbitrary)]
struct FuzzMemory {
    /// Bytes at the PC location
    program: [u8; 16],
    zero_page: [u8; 256],
    stack_page: [u8; 256],
    /// Placed at 0x4000 for absolute addressing
    main_memory: [u8; 256],
}

/// Pin levels applied before one step
#[derive(Debug, Arbitrary)]
struct FuzzPins {
    irq: bool,
    nmi: bool,
    reset: bool,
    bus_enable: bool,
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    cpu_state: FuzzCpuState,
    memory: FuzzMemory,
    pins: Vec<FuzzPins>,
}

/// Flat memory that checks the output pins it is handed.
struct CheckedBus {
    memory: FlatMemory,
}

impl MemoryBus for CheckedBus {
    fn access(&mut self, address: u16, data: u8, is_write: bool) -> u8 {
        self.memory.access(address, data, is_write)
    }

    fn tick(&mut self, signals: Signals) {
        // An opcode fetch is never a vector pull or a locked cycle
        if signals.sync {
            assert!(signals.vpb && signals.mlb);
        }
    }
}

fuzz_target!(|input: FuzzInput| {
    let mut memory = FlatMemory::new();
    memory.set_vector(0xFFFC, 0x8000);
    memory.set_vector(0xFFFA, 0x9000);
    memory.set_vector(0xFFFE, 0xA000);
    memory.load(0x8000, &input.memory.program);
    memory.load(0x0000, &input.memory.zero_page);
    memory.load(0x0100, &input.memory.stack_page);
    memory.load(0x4000, &input.memory.main_memory);

    let state = &input.cpu_state;
    let config = if state.cmos {
        CpuConfig::cmos()
    } else {
        CpuConfig::nmos()
    }
    .with_cmos_opcodes(state.cmos_opcodes);

    let mut cpu = CPU::with_config(CheckedBus { memory }, config);
    cpu.set_a(state.a);
    cpu.set_x(state.x);
    cpu.set_y(state.y);
    cpu.set_sp(state.sp);
    cpu.set_status(state.status);

    for pins in input.pins.iter().take(32) {
        cpu.irq_pin(pins.irq);
        cpu.nmi_pin(pins.nmi);
        cpu.reset_pin(pins.reset);
        cpu.bus_enable_pin(pins.bus_enable);

        let before = cpu.cycle_count();
        // Unsupported opcodes are reported, never panics
        let _ = cpu.step();
        assert!(cpu.cycle_count() > before);
        assert_eq!(cpu.status() & 0x30, 0x20);
    }
});

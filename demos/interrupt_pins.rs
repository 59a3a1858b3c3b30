//! Interrupt pin example
//!
//! A host-side interval timer drives IRQB while a 65C02 sleeps in WAI between
//! interrupts.
//!
//! # Timer Registers
//!
//! ```text
//! 0xD000: STATUS (read)   bit 7 set while the interrupt is pending
//! 0xD001: ACK    (write)  any write clears the pending interrupt
//! ```
//!
//! The timer counts processor cycles through [`MemoryBus::tick`], so it stays in
//! lockstep with the emulated clock even while the processor is parked.
//!
//! Run with: `cargo run --example interrupt_pins`

use w65sim::{CpuConfig, FlatMemory, MemoryBus, RunState, Signals, CPU};

const TIMER_STATUS: u16 = 0xD000;
const TIMER_ACK: u16 = 0xD001;

/// Flat RAM with an interval timer mapped at 0xD000.
struct TimerSystem {
    ram: FlatMemory,
    period: u32,
    countdown: u32,
    pending: bool,
    parked_cycles: u64,
}

impl TimerSystem {
    fn new(period: u32) -> Self {
        Self {
            ram: FlatMemory::new(),
            period,
            countdown: period,
            pending: false,
            parked_cycles: 0,
        }
    }
}

impl MemoryBus for TimerSystem {
    fn access(&mut self, address: u16, data: u8, is_write: bool) -> u8 {
        match (address, is_write) {
            (TIMER_STATUS, false) => {
                if self.pending {
                    0x80
                } else {
                    0x00
                }
            }
            (TIMER_ACK, true) => {
                self.pending = false;
                data
            }
            _ => self.ram.access(address, data, is_write),
        }
    }

    fn tick(&mut self, signals: Signals) {
        if !signals.rdy {
            self.parked_cycles += 1;
        }
        self.countdown -= 1;
        if self.countdown == 0 {
            self.countdown = self.period;
            self.pending = true;
        }
    }
}

fn main() {
    println!("65C02 Interrupt Pins - WAI Timer Example");
    println!("========================================\n");

    let mut system = TimerSystem::new(100);
    system.ram.set_vector(0xFFFC, 0x8000);
    system.ram.set_vector(0xFFFE, 0x9000);

    // Main loop: CLI / loop: WAI / JMP loop
    system.ram.load(0x8000, &[0x58, 0xCB, 0x4C, 0x01, 0x80]);

    // ISR: INC $10 / STA $D001 / RTI
    system.ram.load(0x9000, &[0xE6, 0x10, 0x8D, 0x01, 0xD0, 0x40]);

    let mut cpu = CPU::with_config(system, CpuConfig::cmos());
    cpu.reset_cycle_count();

    let mut last_state = cpu.run_state();
    while cpu.cycle_count() < 1_000 {
        // The host samples the device and drives the pin between steps
        let pending = cpu.memory().pending;
        cpu.irq_pin(pending);

        if let Err(error) = cpu.step() {
            println!("error: {}", error);
            return;
        }

        let state = cpu.run_state();
        if state != last_state {
            match state {
                RunState::Waiting => println!("cycle {:>4}: WAI, parked", cpu.cycle_count()),
                RunState::Running => println!("cycle {:>4}: woken by IRQB", cpu.cycle_count()),
                RunState::Stopped => println!("cycle {:>4}: stopped", cpu.cycle_count()),
            }
            last_state = state;
        }
    }

    println!();
    println!("Interrupts serviced: {}", cpu.memory().ram.read(0x0010));
    println!("Cycles parked in WAI: {}", cpu.memory().parked_cycles);
    println!("Total cycles: {}", cpu.cycle_count());
}

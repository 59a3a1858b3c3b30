//! Tests for relative branches and their timing.
//!
//! Tests cover:
//! - Not taken: 2 cycles, displacement consumed
//! - Taken within the page: 3 cycles
//! - Taken across a page: 4 cycles, with the fix-up read on the old page
//! - Backward displacements and 16-bit wraparound

use std::cell::RefCell;
use std::rc::Rc;
use w65sim::{CpuConfig, MemoryBus, CPU};

/// 64KB of RAM that records every access.
struct RecordingBus {
    ram: Vec<u8>,
    log: Rc<RefCell<Vec<(u16, bool)>>>,
}

impl MemoryBus for RecordingBus {
    fn access(&mut self, address: u16, data: u8, is_write: bool) -> u8 {
        self.log.borrow_mut().push((address, is_write));
        if is_write {
            self.ram[address as usize] = data;
        }
        self.ram[address as usize]
    }
}

fn setup_cpu(start: u16, program: &[u8]) -> (CPU<RecordingBus>, Rc<RefCell<Vec<(u16, bool)>>>) {
    let mut ram = vec![0u8; 0x10000];
    ram[0xFFFC..0xFFFE].copy_from_slice(&start.to_le_bytes());
    for (offset, byte) in program.iter().enumerate() {
        ram[start.wrapping_add(offset as u16) as usize] = *byte;
    }

    let log = Rc::new(RefCell::new(Vec::new()));
    let bus = RecordingBus {
        ram,
        log: Rc::clone(&log),
    };
    let mut cpu = CPU::with_config(bus, CpuConfig::cmos());
    cpu.reset_cycle_count();
    log.borrow_mut().clear();
    (cpu, log)
}

// ========== BEQ Timing ==========

#[test]
fn test_beq_not_taken() {
    let (mut cpu, _) = setup_cpu(0x8000, &[0xF0, 0x10]);
    cpu.set_flag_z(false);

    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x8002);
    assert_eq!(cpu.cycle_count(), 2);
}

#[test]
fn test_beq_taken_same_page() {
    let (mut cpu, _) = setup_cpu(0x8000, &[0xF0, 0x10]);
    cpu.set_flag_z(true);

    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x8012);
    assert_eq!(cpu.cycle_count(), 3);
}

#[test]
fn test_beq_taken_page_cross() {
    let (mut cpu, log) = setup_cpu(0x80F0, &[0xF0, 0x20]);
    cpu.set_flag_z(true);

    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x8112);
    assert_eq!(cpu.cycle_count(), 4);
    // Fix-up read lands on the old page at the target offset
    assert_eq!(log.borrow().last(), Some(&(0x8012, false)));
}

#[test]
fn test_backward_branch_across_page() {
    let (mut cpu, _) = setup_cpu(0x8100, &[0xD0, 0xFC]);
    cpu.set_flag_z(false);

    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x80FE);
    assert_eq!(cpu.cycle_count(), 4);
}

#[test]
fn test_branch_wraps_around_address_space() {
    let (mut cpu, _) = setup_cpu(0xFFF0, &[0x80, 0x20]);

    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x0012);
}

// ========== Conditions ==========

#[test]
fn test_each_condition() {
    // (opcode, setup, taken)
    type Setup = fn(&mut CPU<RecordingBus>);
    let cases: [(u8, Setup, bool); 8] = [
        (0x90, |cpu| cpu.set_flag_c(false), true),
        (0xB0, |cpu| cpu.set_flag_c(false), false),
        (0xD0, |cpu| cpu.set_flag_z(true), false),
        (0xF0, |cpu| cpu.set_flag_z(true), true),
        (0x10, |cpu| cpu.set_flag_n(true), false),
        (0x30, |cpu| cpu.set_flag_n(true), true),
        (0x50, |cpu| cpu.set_flag_v(true), false),
        (0x70, |cpu| cpu.set_flag_v(true), true),
    ];

    for (opcode, setup, taken) in cases {
        let (mut cpu, _) = setup_cpu(0x8000, &[opcode, 0x04]);
        setup(&mut cpu);
        cpu.step().unwrap();

        let expected = if taken { 0x8006 } else { 0x8002 };
        assert_eq!(cpu.pc(), expected, "opcode 0x{:02X}", opcode);
    }
}

#[test]
fn test_bra_always_taken() {
    let (mut cpu, _) = setup_cpu(0x8000, &[0x80, 0xFE]);

    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x8000);
    assert_eq!(cpu.cycle_count(), 3);
}

#[test]
fn test_branch_leaves_flags_alone() {
    let (mut cpu, _) = setup_cpu(0x8000, &[0xF0, 0x04]);
    cpu.set_flag_z(true);
    cpu.set_flag_c(true);
    let status = cpu.status();

    cpu.step().unwrap();

    assert_eq!(cpu.status(), status);
}

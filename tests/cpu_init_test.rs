//! Tests for CPU construction and the power-on reset.

use w65sim::{CpuConfig, FlatMemory, RunState, Signals, CPU};

fn memory_with_reset_vector(target: u16) -> FlatMemory {
    let mut memory = FlatMemory::new();
    memory.set_vector(0xFFFC, target);
    memory
}

#[test]
fn test_power_on_state() {
    let cpu = CPU::new(memory_with_reset_vector(0x8000));

    assert_eq!(cpu.pc(), 0x8000);
    assert_eq!(cpu.sp(), 0xFD);
    assert_eq!(cpu.a(), 0x00);
    assert_eq!(cpu.x(), 0x00);
    assert_eq!(cpu.y(), 0x00);
    assert!(cpu.flag_i());
    assert!(!cpu.flag_d());
    assert_eq!(cpu.run_state(), RunState::Running);
    assert_eq!(cpu.signals(), Signals::IDLE);
}

#[test]
fn test_power_on_reset_costs_seven_cycles() {
    let cpu = CPU::new(memory_with_reset_vector(0x1234));
    assert_eq!(cpu.cycle_count(), 7);
    assert_eq!(cpu.pc(), 0x1234);
}

#[test]
fn test_reset_vector_is_little_endian() {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0xCD);
    memory.write(0xFFFD, 0xAB);

    let cpu = CPU::new(memory);
    assert_eq!(cpu.pc(), 0xABCD);
}

#[test]
fn test_status_after_reset_has_unused_bit() {
    let cpu = CPU::new(memory_with_reset_vector(0x8000));
    // I and the always-one bit
    assert_eq!(cpu.status(), 0x24);
}

#[test]
fn test_config_is_retained() {
    let cpu = CPU::with_config(memory_with_reset_vector(0x8000), CpuConfig::nmos());
    assert_eq!(cpu.config(), CpuConfig::nmos());
}

#[test]
fn test_reset_cycle_count_is_idempotent() {
    let mut memory = memory_with_reset_vector(0x8000);
    memory.load(0x8000, &[0xEA, 0xEA, 0xEA]);
    let mut cpu = CPU::new(memory);

    cpu.step().unwrap();
    cpu.reset_cycle_count();
    assert_eq!(cpu.cycle_count(), 0);
    cpu.reset_cycle_count();
    assert_eq!(cpu.cycle_count(), 0);
}

#[test]
fn test_force_pc_spends_no_cycles() {
    let mut cpu = CPU::new(memory_with_reset_vector(0x8000));
    cpu.reset_cycle_count();

    cpu.force_pc(0x0400);

    assert_eq!(cpu.pc(), 0x0400);
    assert_eq!(cpu.cycle_count(), 0);
}

#[test]
fn test_registers_snapshot() {
    let mut cpu = CPU::new(memory_with_reset_vector(0x8000));
    cpu.set_a(0x11);
    cpu.set_x(0x22);
    cpu.set_y(0x33);

    let registers = cpu.registers();
    assert_eq!(registers.a, 0x11);
    assert_eq!(registers.x, 0x22);
    assert_eq!(registers.y, 0x33);
    assert_eq!(registers.sp, 0xFD);
    assert_eq!(registers.pc, 0x8000);
    assert_eq!(registers.status, 0x24);
}

#[test]
fn test_into_memory_returns_bus() {
    let mut memory = memory_with_reset_vector(0x8000);
    memory.load(0x8000, &[0xA9, 0x42, 0x85, 0x10]);
    let mut cpu = CPU::new(memory);

    cpu.step().unwrap();
    cpu.step().unwrap();

    let memory = cpu.into_memory();
    assert_eq!(memory.read(0x0010), 0x42);
}

//! Tests for ASL, LSR, ROL and ROR.
//!
//! Tests cover:
//! - Accumulator and memory forms
//! - Carry in and carry out
//! - Z/N updates
//! - Cycle counts for the read-modify-write forms

use w65sim::{CpuConfig, FlatMemory, CPU};

fn setup_cpu(program: &[u8]) -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.set_vector(0xFFFC, 0x8000);
    memory.load(0x8000, program);
    let mut cpu = CPU::with_config(memory, CpuConfig::nmos());
    cpu.reset_cycle_count();
    cpu
}

// ========== ASL ==========

#[test]
fn test_asl_accumulator_carry_out() {
    let mut cpu = setup_cpu(&[0x0A]);
    cpu.set_a(0x81);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x02);
    assert!(cpu.flag_c());
    assert!(!cpu.flag_n());
    assert_eq!(cpu.cycle_count(), 2);
}

#[test]
fn test_asl_zero_page_into_negative() {
    let mut cpu = setup_cpu(&[0x06, 0x10]);
    cpu.memory_mut().write(0x0010, 0x40);

    cpu.step().unwrap();

    assert_eq!(cpu.memory().read(0x0010), 0x80);
    assert!(cpu.flag_n());
    assert!(!cpu.flag_c());
    assert_eq!(cpu.cycle_count(), 5);
}

// ========== LSR ==========

#[test]
fn test_lsr_accumulator_to_zero() {
    let mut cpu = setup_cpu(&[0x4A]);
    cpu.set_a(0x01);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_c());
    assert!(cpu.flag_z());
    assert!(!cpu.flag_n());
}

#[test]
fn test_lsr_absolute() {
    let mut cpu = setup_cpu(&[0x4E, 0x00, 0x20]);
    cpu.memory_mut().write(0x2000, 0xFE);

    cpu.step().unwrap();

    assert_eq!(cpu.memory().read(0x2000), 0x7F);
    assert!(!cpu.flag_c());
    assert_eq!(cpu.cycle_count(), 6);
}

// ========== ROL ==========

#[test]
fn test_rol_carry_in_and_out() {
    let mut cpu = setup_cpu(&[0x2A]);
    cpu.set_a(0x80);
    cpu.set_flag_c(true);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x01);
    assert!(cpu.flag_c());
    assert!(!cpu.flag_z());
}

#[test]
fn test_rol_zero_page_x() {
    let mut cpu = setup_cpu(&[0x36, 0x10]);
    cpu.memory_mut().write(0x0015, 0x40);
    cpu.set_x(0x05);

    cpu.step().unwrap();

    assert_eq!(cpu.memory().read(0x0015), 0x80);
    assert!(cpu.flag_n());
    assert_eq!(cpu.cycle_count(), 6);
}

// ========== ROR ==========

#[test]
fn test_ror_carry_into_bit_seven() {
    let mut cpu = setup_cpu(&[0x6A]);
    cpu.set_a(0x02);
    cpu.set_flag_c(true);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x81);
    assert!(!cpu.flag_c());
    assert!(cpu.flag_n());
}

#[test]
fn test_ror_absolute_x_always_seven_cycles_on_nmos() {
    let mut cpu = setup_cpu(&[0x7E, 0x00, 0x20]);
    cpu.memory_mut().write(0x2001, 0x01);
    cpu.set_x(0x01);

    cpu.step().unwrap();

    assert_eq!(cpu.memory().read(0x2001), 0x00);
    assert!(cpu.flag_c());
    assert!(cpu.flag_z());
    assert_eq!(cpu.cycle_count(), 7);
}

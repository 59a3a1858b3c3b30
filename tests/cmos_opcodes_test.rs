//! Tests for the 65C02 instruction additions.
//!
//! Tests cover:
//! - STZ, TRB, TSB, INC A, DEC A, BIT immediate/indexed
//! - RMB/SMB and BBR/BBS including branch timing
//! - Undefined opcodes as NOPs of fixed size and timing
//! - Decoding disabled by configuration

use w65sim::{CpuConfig, ExecutionError, FlatMemory, CPU};

fn setup_cpu(program: &[u8]) -> CPU<FlatMemory> {
    setup_cpu_with_config(CpuConfig::cmos(), program)
}

fn setup_cpu_with_config(config: CpuConfig, program: &[u8]) -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.set_vector(0xFFFC, 0x8000);
    memory.load(0x8000, program);
    let mut cpu = CPU::with_config(memory, config);
    cpu.reset_cycle_count();
    cpu
}

// ========== STZ ==========

#[test]
fn test_stz_modes() {
    // STZ $10 / STZ $10,X / STZ $2000 / STZ $2000,X
    let mut cpu = setup_cpu(&[0x64, 0x10, 0x74, 0x10, 0x9C, 0x00, 0x20, 0x9E, 0x00, 0x20]);
    cpu.set_x(0x01);
    for address in [0x0010, 0x0011, 0x2000, 0x2001] {
        cpu.memory_mut().write(address, 0xFF);
    }

    let mut cycles = Vec::new();
    for _ in 0..4 {
        let before = cpu.cycle_count();
        cpu.step().unwrap();
        cycles.push(cpu.cycle_count() - before);
    }

    for address in [0x0010, 0x0011, 0x2000, 0x2001] {
        assert_eq!(cpu.memory().read(address), 0x00);
    }
    assert_eq!(cycles, vec![3, 4, 4, 5]);
}

// ========== TRB / TSB ==========

#[test]
fn test_tsb_sets_bits_and_tests() {
    let mut cpu = setup_cpu(&[0x04, 0x10]);
    cpu.set_a(0x0F);
    cpu.memory_mut().write(0x0010, 0xF0);

    cpu.step().unwrap();

    assert_eq!(cpu.memory().read(0x0010), 0xFF);
    assert!(cpu.flag_z());
    assert_eq!(cpu.cycle_count(), 5);
}

#[test]
fn test_trb_clears_bits_and_tests() {
    let mut cpu = setup_cpu(&[0x1C, 0x00, 0x20]);
    cpu.set_a(0x0F);
    cpu.memory_mut().write(0x2000, 0x3C);

    cpu.step().unwrap();

    assert_eq!(cpu.memory().read(0x2000), 0x30);
    assert!(!cpu.flag_z());
    assert_eq!(cpu.cycle_count(), 6);
}

// ========== Accumulator INC / DEC ==========

#[test]
fn test_inc_dec_accumulator() {
    let mut cpu = setup_cpu(&[0x1A, 0x3A, 0x3A]);
    cpu.set_a(0xFF);

    cpu.step().unwrap();
    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_z());

    cpu.step().unwrap();
    cpu.step().unwrap();
    assert_eq!(cpu.a(), 0xFE);
    assert!(cpu.flag_n());
    assert_eq!(cpu.cycle_count(), 6);
}

// ========== BIT ==========

#[test]
fn test_bit_immediate_only_sets_z() {
    let mut cpu = setup_cpu(&[0x89, 0xC0]);
    cpu.set_a(0x01);
    cpu.set_flag_n(false);
    cpu.set_flag_v(false);

    cpu.step().unwrap();

    assert!(cpu.flag_z());
    assert!(!cpu.flag_n());
    assert!(!cpu.flag_v());
}

#[test]
fn test_bit_absolute_x_copies_n_and_v() {
    let mut cpu = setup_cpu(&[0x3C, 0x00, 0x20]);
    cpu.set_a(0x40);
    cpu.set_x(0x02);
    cpu.memory_mut().write(0x2002, 0xC0);

    cpu.step().unwrap();

    assert!(!cpu.flag_z());
    assert!(cpu.flag_n());
    assert!(cpu.flag_v());
    assert_eq!(cpu.cycle_count(), 4);
}

// ========== RMB / SMB ==========

#[test]
fn test_rmb_smb() {
    // RMB0 $10 / SMB7 $10
    let mut cpu = setup_cpu(&[0x07, 0x10, 0xF7, 0x10]);
    cpu.memory_mut().write(0x0010, 0x0F);
    let status = cpu.status();

    cpu.step().unwrap();
    assert_eq!(cpu.memory().read(0x0010), 0x0E);
    assert_eq!(cpu.cycle_count(), 5);

    cpu.step().unwrap();
    assert_eq!(cpu.memory().read(0x0010), 0x8E);
    assert_eq!(cpu.status(), status);
}

// ========== BBR / BBS ==========

#[test]
fn test_bbr_not_taken() {
    // BBR1 $10,+4 with bit 1 set
    let mut cpu = setup_cpu(&[0x1F, 0x10, 0x04]);
    cpu.memory_mut().write(0x0010, 0x02);

    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x8003);
    assert_eq!(cpu.cycle_count(), 5);
}

#[test]
fn test_bbr_taken_same_page() {
    let mut cpu = setup_cpu(&[0x1F, 0x10, 0x04]);

    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x8007);
    assert_eq!(cpu.cycle_count(), 6);
}

#[test]
fn test_bbs_taken_across_page() {
    // BBS6 $10,-8 from the start of a page
    let mut memory = FlatMemory::new();
    memory.set_vector(0xFFFC, 0x8100);
    memory.load(0x8100, &[0xEF, 0x10, 0xF8]);
    memory.write(0x0010, 0x40);
    let mut cpu = CPU::new(memory);
    cpu.reset_cycle_count();

    cpu.step().unwrap();

    assert_eq!(cpu.pc(), 0x80FB);
    assert_eq!(cpu.cycle_count(), 7);
}

// ========== Undefined Opcodes ==========

#[test]
fn test_undefined_opcodes_are_sized_nops() {
    // (opcode, bytes, cycles)
    let cases = [
        (0x02, 2, 2),
        (0x03, 1, 1),
        (0x0B, 1, 1),
        (0x44, 2, 3),
        (0x54, 2, 4),
        (0xD4, 2, 4),
        (0xDC, 3, 4),
        (0xFC, 3, 4),
        (0x5C, 3, 8),
    ];

    for (opcode, bytes, cycles) in cases {
        let mut cpu = setup_cpu(&[opcode, 0x10, 0x20]);
        cpu.set_a(0x33);
        let status = cpu.status();

        cpu.step().unwrap();

        assert_eq!(cpu.pc(), 0x8000 + bytes, "opcode 0x{:02X}", opcode);
        assert_eq!(cpu.cycle_count(), cycles, "opcode 0x{:02X}", opcode);
        assert_eq!(cpu.a(), 0x33);
        assert_eq!(cpu.status(), status);
    }
}

// ========== Configuration ==========

#[test]
fn test_cmos_opcodes_disabled() {
    let config = CpuConfig::cmos().with_cmos_opcodes(false);
    let mut cpu = setup_cpu_with_config(config, &[0xDA]);

    assert_eq!(cpu.step(), Err(ExecutionError::UnsupportedOpcode(0xDA)));
}

#[test]
fn test_undefined_opcode_unsupported_without_cmos_opcodes() {
    let mut cpu = setup_cpu_with_config(CpuConfig::nmos(), &[0x5C, 0x00, 0x00]);

    assert_eq!(cpu.step(), Err(ExecutionError::UnsupportedOpcode(0x5C)));
    assert_eq!(cpu.cycle_count(), 1);
}

#[test]
fn test_hybrid_config_decodes_cmos_opcodes() {
    let config = CpuConfig::nmos().with_cmos_opcodes(true);
    let mut cpu = setup_cpu_with_config(config, &[0xDA]);
    cpu.set_x(0x5A);

    cpu.step().unwrap();

    assert_eq!(cpu.memory().read(0x01FD), 0x5A);
}

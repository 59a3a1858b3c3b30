//! End-to-end program execution tests.

use w65sim::{CpuConfig, ExecutionError, FlatMemory, CPU};

fn setup_cpu(program: &[u8]) -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.set_vector(0xFFFC, 0x8000);
    memory.set_vector(0xFFFE, 0x9000);
    memory.load(0x8000, program);
    CPU::new(memory)
}

#[test]
fn test_lda_sta_brk_program() {
    // LDA #$05 / STA $00 / BRK
    let mut cpu = setup_cpu(&[0xA9, 0x05, 0x85, 0x00, 0x00]);

    cpu.step().unwrap();
    cpu.step().unwrap();
    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x05);
    assert_eq!(cpu.memory().read(0x0000), 0x05);
    assert_eq!(cpu.pc(), 0x9000);
    assert!(cpu.flag_i());
}

#[test]
fn test_brk_pushes_return_past_padding() {
    let mut cpu = setup_cpu(&[0x00, 0xFF]);
    cpu.reset_cycle_count();

    cpu.step().unwrap();

    assert_eq!(cpu.cycle_count(), 7);
    assert_eq!(cpu.memory().read(0x01FD), 0x80);
    assert_eq!(cpu.memory().read(0x01FC), 0x02);
    // B and the unused bit set in the pushed copy only
    assert_eq!(cpu.memory().read(0x01FB), 0x34);
    assert_eq!(cpu.status() & 0x10, 0x00);
    assert_eq!(cpu.sp(), 0xFA);
}

#[test]
fn test_brk_then_rti_resumes_after_padding() {
    let mut cpu = setup_cpu(&[0x00, 0xFF, 0xE8]);
    cpu.memory_mut().write(0x9000, 0x40); // RTI

    cpu.step().unwrap();
    cpu.step().unwrap();
    assert_eq!(cpu.pc(), 0x8002);
    cpu.step().unwrap();
    assert_eq!(cpu.x(), 0x01);
}

#[test]
fn test_counting_loop() {
    // LDX #$05 / loop: DEX / BNE loop / STP
    let mut cpu = setup_cpu(&[0xA2, 0x05, 0xCA, 0xD0, 0xFD, 0xDB]);
    cpu.reset_cycle_count();

    for _ in 0..11 {
        cpu.step().unwrap();
    }

    assert_eq!(cpu.x(), 0x00);
    assert_eq!(cpu.pc(), 0x8005);
    // LDX 2 + 5 * DEX 2 + 4 taken BNE 3 + final BNE 2
    assert_eq!(cpu.cycle_count(), 2 + 10 + 12 + 2);
}

#[test]
fn test_subroutine_call() {
    // JSR $8010 / INX / STP ... $8010: LDY #$07 / RTS
    let mut cpu = setup_cpu(&[0x20, 0x10, 0x80, 0xE8, 0xDB]);
    cpu.memory_mut().load(0x8010, &[0xA0, 0x07, 0x60]);

    cpu.step().unwrap();
    assert_eq!(cpu.pc(), 0x8010);
    assert_eq!(cpu.memory().read(0x01FD), 0x80);
    assert_eq!(cpu.memory().read(0x01FC), 0x02);

    cpu.step().unwrap();
    cpu.step().unwrap();
    assert_eq!(cpu.pc(), 0x8003);
    assert_eq!(cpu.sp(), 0xFD);

    cpu.step().unwrap();
    assert_eq!(cpu.x(), 0x01);
    assert_eq!(cpu.y(), 0x07);
}

#[test]
fn test_run_for_cycles_overshoots_by_at_most_one_instruction() {
    let mut cpu = setup_cpu(&[0xEE, 0x00, 0x02, 0xEE, 0x00, 0x02]);
    cpu.reset_cycle_count();

    // INC abs is 6 cycles; a budget of 7 needs two of them
    let ran = cpu.run_for_cycles(7).unwrap();
    assert_eq!(ran, 12);
    assert_eq!(cpu.memory().read(0x0200), 2);
}

// ========== Unsupported Opcodes ==========

#[test]
fn test_unsupported_opcode_on_strict_6502() {
    let mut memory = FlatMemory::new();
    memory.set_vector(0xFFFC, 0x8000);
    memory.load(0x8000, &[0x80, 0x02, 0xEA]);
    let mut cpu = CPU::with_config(memory, CpuConfig::nmos());
    cpu.reset_cycle_count();

    assert_eq!(cpu.step(), Err(ExecutionError::UnsupportedOpcode(0x80)));
    assert_eq!(cpu.pc(), 0x8001);
    assert_eq!(cpu.cycle_count(), 1);
}

#[test]
fn test_unsupported_opcode_does_not_stick() {
    let mut memory = FlatMemory::new();
    memory.set_vector(0xFFFC, 0x8000);
    memory.load(0x8000, &[0x03, 0xE8]);
    let mut cpu = CPU::with_config(memory, CpuConfig::nmos());

    assert!(cpu.step().is_err());
    cpu.step().unwrap();
    assert_eq!(cpu.x(), 0x01);
}

#[test]
fn test_run_for_cycles_surfaces_errors() {
    let mut memory = FlatMemory::new();
    memory.set_vector(0xFFFC, 0x8000);
    memory.load(0x8000, &[0xEA, 0xFF]);
    let mut cpu = CPU::with_config(memory, CpuConfig::nmos());

    assert_eq!(
        cpu.run_for_cycles(100),
        Err(ExecutionError::UnsupportedOpcode(0xFF))
    );
}

#[test]
fn test_error_message() {
    let error = ExecutionError::UnsupportedOpcode(0x02);
    assert_eq!(
        error.to_string(),
        "opcode 0x02 is not supported by this processor configuration"
    );
}

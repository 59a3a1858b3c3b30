//! Closure bus example
//!
//! Demonstrates that any `FnMut(u16, u8, bool) -> u8` closure is a bus, and
//! shows every bus cycle the processor drives, dummy cycles included.
//!
//! This example shows:
//! - Wrapping a plain byte array in a closure
//! - The extra cycles of a read-modify-write (`INC $0200`)
//! - The page-crossing fix-up read of `LDA $02F0,X`
//!
//! Run with: `cargo run --example closure_bus`

use w65sim::{disassemble, DisassemblyOptions, CPU};

fn main() {
    println!("6502 Bus Cycle Viewer - Closure Bus Example");
    println!("===========================================\n");

    let program = [
        0xA2, 0x20, // LDX #$20
        0xEE, 0x00, 0x02, // INC $0200
        0xBD, 0xF0, 0x02, // LDA $02F0,X  (crosses into page 3)
        0xDB, // STP
    ];

    println!("Program at $8000:");
    let options = DisassemblyOptions {
        start_address: 0x8000,
        ..DisassemblyOptions::default()
    };
    for instr in disassemble(&program, options) {
        println!(
            "  ${:04X}  {}",
            instr.address,
            w65sim::disassembler::formatter::format_instruction(&instr)
        );
    }
    println!();

    let mut ram = vec![0u8; 0x10000];
    ram[0xFFFC] = 0x00;
    ram[0xFFFD] = 0x80;
    ram[0x8000..0x8000 + program.len()].copy_from_slice(&program);
    ram[0x0200] = 0x41;

    let bus = move |address: u16, data: u8, is_write: bool| -> u8 {
        if is_write {
            println!("    W ${:04X} <- ${:02X}", address, data);
            ram[address as usize] = data;
            data
        } else {
            let value = ram[address as usize];
            println!("    R ${:04X} -> ${:02X}", address, value);
            value
        }
    };

    println!("Power-on reset:");
    let mut cpu = CPU::new(bus);
    println!("  PC = ${:04X}, {} cycles\n", cpu.pc(), cpu.cycle_count());

    for _ in 0..3 {
        let pc = cpu.pc();
        let before = cpu.cycle_count();
        println!("Instruction at ${:04X}:", pc);
        if let Err(error) = cpu.step() {
            println!("  error: {}", error);
            break;
        }
        println!("  {} cycles\n", cpu.cycle_count() - before);
    }

    println!(
        "Final state: A=${:02X} X=${:02X} PC=${:04X} cycles={}",
        cpu.a(),
        cpu.x(),
        cpu.pc(),
        cpu.cycle_count()
    );
}

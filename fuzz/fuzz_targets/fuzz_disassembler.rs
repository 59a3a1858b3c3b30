//! Fuzz target for the disassembler and listing formatter.
//!
//! Arbitrary bytes must always disassemble into a gapless run of instructions
//! that covers the input exactly, with metadata agreeing with the opcode table.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use w65sim::disassembler::formatter::format_listing;
use w65sim::{disassemble, Disassembly, DisassemblyOptions, OPCODE_TABLE};

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    bytes: Vec<u8>,
    start_address: u16,
    hex_dump: bool,
    show_offsets: bool,
    cmos_opcodes: bool,
}

fuzz_target!(|input: FuzzInput| {
    if input.bytes.len() > 65536 {
        return;
    }

    let options = DisassemblyOptions {
        start_address: input.start_address,
        hex_dump: input.hex_dump,
        show_offsets: input.show_offsets,
        cmos_opcodes: input.cmos_opcodes,
    };

    let instructions = disassemble(&input.bytes, options);
    let mut offset = 0usize;
    let mut address = input.start_address;

    for instr in &instructions {
        assert_eq!(instr.address, address);
        assert_eq!(instr.opcode, input.bytes[offset]);

        if instr.mnemonic == ".byte" {
            assert_eq!(instr.size_bytes, 1);
            assert_eq!(instr.operand_bytes, vec![instr.opcode]);
        } else {
            let metadata = &OPCODE_TABLE[instr.opcode as usize];
            assert!(metadata.is_decoded(input.cmos_opcodes));
            assert_eq!(instr.size_bytes, metadata.size_bytes);
            assert_eq!(
                instr.operand_bytes,
                &input.bytes[offset + 1..offset + instr.size_bytes as usize]
            );
        }

        offset += instr.size_bytes as usize;
        address = address.wrapping_add(instr.size_bytes as u16);
    }
    assert_eq!(offset, input.bytes.len());

    // The lazy walk yields the same instructions
    assert!(Disassembly::new(&input.bytes, options).eq(instructions.iter().cloned()));

    let listing = format_listing(&instructions, options);
    assert_eq!(listing.lines().count(), instructions.len());
});

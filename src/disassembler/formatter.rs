//! Formatting functions for disassembled instructions

use crate::addressing::AddressingMode;
use crate::disassembler::{DisassemblyOptions, Instruction};

/// Format a single instruction as assembly text
///
/// # Arguments
///
/// * `instr` - The instruction to format
///
/// # Returns
///
/// A string containing the formatted assembly instruction
pub fn format_instruction(instr: &Instruction) -> String {
    let operand = format_operand(instr);

    if operand.is_empty() {
        instr.mnemonic.to_string()
    } else {
        format!("{} {}", instr.mnemonic, operand)
    }
}

/// Format a listing, one instruction per line, honouring `hex_dump` and
/// `show_offsets`.
///
/// # Examples
///
/// ```
/// use w65sim::disassembler::formatter::format_listing;
/// use w65sim::{disassemble, DisassemblyOptions};
///
/// let options = DisassemblyOptions {
///     start_address: 0x8000,
///     hex_dump: true,
///     show_offsets: true,
///     ..DisassemblyOptions::default()
/// };
/// let listing = format_listing(&disassemble(&[0xA9, 0x05, 0xEA], options), options);
/// assert_eq!(listing, "$8000  A9 05     LDA #$05\n$8002  EA        NOP\n");
/// ```
pub fn format_listing(instructions: &[Instruction], options: DisassemblyOptions) -> String {
    let mut listing = String::new();

    for instr in instructions {
        if options.show_offsets {
            listing.push_str(&format!("${:04X}  ", instr.address));
        }
        if options.hex_dump {
            listing.push_str(&format!("{:<10}", format_bytes(instr)));
        }
        listing.push_str(&format_instruction(instr));
        listing.push('\n');
    }

    listing
}

/// Raw bytes of an instruction as space-separated hex.
pub fn format_bytes(instr: &Instruction) -> String {
    if instr.mnemonic == ".byte" {
        return format!("{:02X}", instr.opcode);
    }

    std::iter::once(instr.opcode)
        .chain(instr.operand_bytes.iter().copied())
        .map(|byte| format!("{:02X}", byte))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format the operand based on addressing mode
fn format_operand(instr: &Instruction) -> String {
    use AddressingMode::*;

    // Special case for .byte directive (undecodable opcodes)
    if instr.mnemonic == ".byte" {
        return format!("${:02X}", instr.opcode);
    }

    let byte = instr.operand_bytes.first().map(|b| format!("{:02X}", b));
    let word = match instr.operand_bytes.as_slice() {
        [lo, hi, ..] => Some(format!("{:04X}", u16::from_le_bytes([*lo, *hi]))),
        _ => None,
    };
    let byte = byte.as_deref().unwrap_or("??");
    let word = word.as_deref().unwrap_or("????");

    match instr.addressing_mode {
        Implicit => String::new(),
        Accumulator => "A".to_string(),
        Immediate => format!("#${}", byte),
        ZeroPage => format!("${}", byte),
        ZeroPageX => format!("${},X", byte),
        ZeroPageY => format!("${},Y", byte),
        Relative => match instr.operand_bytes.first() {
            Some(&offset) => format!("${:04X}", branch_target(instr.address, 2, offset)),
            None => "$????".to_string(),
        },
        Absolute => format!("${}", word),
        AbsoluteX => format!("${},X", word),
        AbsoluteY => format!("${},Y", word),
        Indirect => format!("(${})", word),
        IndirectX => format!("(${},X)", byte),
        IndirectY => format!("(${}),Y", byte),
        IndirectZP => format!("(${})", byte),
        AbsoluteIndirectX => format!("(${},X)", word),
        ZeroPageRelative => match instr.operand_bytes.get(1) {
            Some(&offset) => format!("${},${:04X}", byte, branch_target(instr.address, 3, offset)),
            None => format!("${},$????", byte),
        },
    }
}

fn branch_target(address: u16, size: u16, offset: u8) -> u16 {
    address
        .wrapping_add(size)
        .wrapping_add_signed(offset as i8 as i16)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instruction(address: u16, opcode: u8, operand_bytes: Vec<u8>) -> Instruction {
        let metadata = &crate::OPCODE_TABLE[opcode as usize];
        Instruction {
            address,
            opcode,
            mnemonic: metadata.mnemonic,
            addressing_mode: metadata.addressing_mode,
            operand_bytes,
            size_bytes: metadata.size_bytes,
            base_cycles: metadata.base_cycles,
        }
    }

    #[test]
    fn test_format_immediate() {
        assert_eq!(format_instruction(&instruction(0x8000, 0xA9, vec![0x42])), "LDA #$42");
    }

    #[test]
    fn test_format_absolute() {
        assert_eq!(
            format_instruction(&instruction(0x0000, 0x8D, vec![0x00, 0x80])),
            "STA $8000"
        );
    }

    #[test]
    fn test_format_implied() {
        assert_eq!(format_instruction(&instruction(0x1000, 0xEA, vec![])), "NOP");
    }

    #[test]
    fn test_format_branch_backwards() {
        assert_eq!(format_instruction(&instruction(0x8010, 0xD0, vec![0xFE])), "BNE $8010");
    }

    #[test]
    fn test_format_65c02_modes() {
        assert_eq!(format_instruction(&instruction(0x0000, 0xB2, vec![0x40])), "LDA ($40)");
        assert_eq!(
            format_instruction(&instruction(0x0000, 0x7C, vec![0x00, 0x20])),
            "JMP ($2000,X)"
        );
        assert_eq!(
            format_instruction(&instruction(0x0300, 0x8F, vec![0x12, 0x10])),
            "BBS0 $12,$0313"
        );
    }

    #[test]
    fn test_format_missing_operand() {
        assert_eq!(format_instruction(&instruction(0x0000, 0xAD, vec![])), "LDA $????");
    }

    #[test]
    fn test_format_illegal_opcode() {
        let instr = Instruction {
            address: 0x2000,
            opcode: 0xFF,
            mnemonic: ".byte",
            addressing_mode: AddressingMode::Implicit,
            operand_bytes: vec![0xFF],
            size_bytes: 1,
            base_cycles: 0,
        };

        assert_eq!(format_instruction(&instr), ".byte $FF");
        assert_eq!(format_bytes(&instr), "FF");
    }
}

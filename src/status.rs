//! Packed processor status register.
//!
//! Bit layout (NV-BDIZC):
//! - Bit 7: N (Negative)
//! - Bit 6: V (Overflow)
//! - Bit 5: (unused, always 1)
//! - Bit 4: B (Break, only exists in the pushed copy)
//! - Bit 3: D (Decimal)
//! - Bit 2: I (Interrupt Disable)
//! - Bit 1: Z (Zero)
//! - Bit 0: C (Carry)

use bitflags::bitflags;

bitflags! {
    /// Status register bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct StatusFlags: u8 {
        const CARRY = 0b0000_0001;
        const ZERO = 0b0000_0010;
        const INTERRUPT_DISABLE = 0b0000_0100;
        const DECIMAL = 0b0000_1000;
        const BREAK = 0b0001_0000;
        const UNUSED = 0b0010_0000;
        const OVERFLOW = 0b0100_0000;
        const NEGATIVE = 0b1000_0000;
    }
}

impl StatusFlags {
    /// Status byte as pushed to the stack: unused bit forced to 1, break bit set
    /// only for BRK/PHP.
    pub fn pushed(self, brk: bool) -> u8 {
        let mut flags = self | StatusFlags::UNUSED;
        flags.set(StatusFlags::BREAK, brk);
        flags.bits()
    }

    /// Interprets a byte pulled from the stack. B is discarded and the unused
    /// bit reads back as 1.
    pub fn pulled(value: u8) -> Self {
        (StatusFlags::from_bits_retain(value) - StatusFlags::BREAK) | StatusFlags::UNUSED
    }
}

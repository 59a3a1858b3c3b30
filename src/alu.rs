//! # Arithmetic Logic Unit
//!
//! Pure functions computing results and flags. Nothing here touches the
//! processor; the instruction handlers copy the outputs into registers.
//!
//! ## Decimal mode
//!
//! With D set, each nibble is a base-10 digit and carries propagate between
//! nibbles at 9. The nibble-wise correction below is what the NMOS silicon does,
//! so operands containing nibbles A-F get the same results as real hardware
//! rather than anything chosen for convenience:
//!
//! - ADC: the low nibble is corrected by +6 when it exceeds 9, the high nibble
//!   likewise; C is the carry out of the corrected high nibble. N and V come from
//!   the high nibble *before* correction and Z from the plain binary sum (the NMOS
//!   behaviour; the 65C02 recomputes N/Z from the result, see
//!   [`ArithmeticOutput::with_result_flags`]).
//! - SBC: each nibble borrow is corrected by -6. All four flags are those of the
//!   binary subtraction.

/// Output of ADC/SBC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArithmeticOutput {
    pub result: u8,
    pub carry: bool,
    pub overflow: bool,
    pub negative: bool,
    pub zero: bool,
}

impl ArithmeticOutput {
    /// Replaces N and Z with values derived from the final result, as the 65C02
    /// does after decimal arithmetic.
    pub fn with_result_flags(mut self) -> Self {
        self.zero = self.result == 0;
        self.negative = self.result & 0x80 != 0;
        self
    }
}

/// Adds `b` and the carry to `a`.
///
/// # Examples
///
/// ```
/// use w65sim::alu::add;
///
/// let out = add(0x09, 0x01, false, true);
/// assert_eq!(out.result, 0x10);
/// assert!(!out.carry);
///
/// let out = add(0x7F, 0x01, false, false);
/// assert_eq!(out.result, 0x80);
/// assert!(out.overflow);
/// ```
pub fn add(a: u8, b: u8, carry_in: bool, decimal: bool) -> ArithmeticOutput {
    if decimal {
        return add_decimal(a, b, carry_in);
    }

    let sum = a as u16 + b as u16 + carry_in as u16;
    let result = sum as u8;

    ArithmeticOutput {
        result,
        carry: sum > 0xFF,
        // Both operands share a sign that the result does not
        overflow: (a ^ result) & (b ^ result) & 0x80 != 0,
        negative: result & 0x80 != 0,
        zero: result == 0,
    }
}

fn add_decimal(a: u8, b: u8, carry_in: bool) -> ArithmeticOutput {
    let (a16, b16) = (a as u16, b as u16);
    let binary = (a16 + b16 + carry_in as u16) as u8;

    let mut lo = (a16 & 0x0F) + (b16 & 0x0F) + carry_in as u16;
    if lo > 0x09 {
        lo += 0x06;
    }
    let mut hi = (a16 >> 4) + (b16 >> 4) + u16::from(lo > 0x0F);

    let negative = hi & 0x08 != 0;
    let overflow = (a ^ b) & 0x80 == 0 && (a16 ^ (hi << 4)) & 0x80 != 0;

    if hi > 0x09 {
        hi += 0x06;
    }

    ArithmeticOutput {
        result: (((hi << 4) | (lo & 0x0F)) & 0xFF) as u8,
        carry: hi > 0x0F,
        overflow,
        negative,
        zero: binary == 0,
    }
}

/// Subtracts `b` and the borrow (inverted carry) from `a`.
///
/// Carry out is set when no borrow occurred.
pub fn subtract(a: u8, b: u8, carry_in: bool, decimal: bool) -> ArithmeticOutput {
    let binary = add(a, !b, carry_in, false);
    if !decimal {
        return binary;
    }

    let borrow = i16::from(!carry_in);
    let mut lo = (a & 0x0F) as i16 - (b & 0x0F) as i16 - borrow;
    let mut hi = (a >> 4) as i16 - (b >> 4) as i16;
    if lo < 0 {
        lo -= 0x06;
        hi -= 1;
    }
    if hi < 0 {
        hi -= 0x06;
    }

    ArithmeticOutput {
        result: (((hi << 4) | (lo & 0x0F)) & 0xFF) as u8,
        ..binary
    }
}

/// ASL: returns (result, carry out of bit 7).
pub fn shift_left(value: u8) -> (u8, bool) {
    (value << 1, value & 0x80 != 0)
}

/// LSR: returns (result, carry out of bit 0).
pub fn shift_right(value: u8) -> (u8, bool) {
    (value >> 1, value & 0x01 != 0)
}

/// ROL: carry enters bit 0.
pub fn rotate_left(value: u8, carry_in: bool) -> (u8, bool) {
    ((value << 1) | carry_in as u8, value & 0x80 != 0)
}

/// ROR: carry enters bit 7.
pub fn rotate_right(value: u8, carry_in: bool) -> (u8, bool) {
    ((value >> 1) | ((carry_in as u8) << 7), value & 0x01 != 0)
}

/// CMP/CPX/CPY: returns (zero, carry, negative).
pub fn compare(register: u8, value: u8) -> (bool, bool, bool) {
    let diff = register.wrapping_sub(value);
    (register == value, register >= value, diff & 0x80 != 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_add_carry_and_zero() {
        let out = add(0x01, 0xFF, false, false);
        assert_eq!(out.result, 0x00);
        assert!(out.carry);
        assert!(out.zero);
        assert!(!out.overflow);
    }

    #[test]
    fn test_binary_add_overflow() {
        // Two negatives making a positive
        let out = add(0x80, 0x80, false, false);
        assert_eq!(out.result, 0x00);
        assert!(out.overflow);
        assert!(out.carry);

        // Mixed signs never overflow
        let out = add(0x7F, 0x80, true, false);
        assert!(!out.overflow);
    }

    #[test]
    fn test_decimal_add_digit_carry() {
        let out = add(0x09, 0x01, false, true);
        assert_eq!(out.result, 0x10);
        assert!(!out.carry);

        let out = add(0x99, 0x01, false, true);
        assert_eq!(out.result, 0x00);
        assert!(out.carry);

        let out = add(0x58, 0x46, true, true);
        assert_eq!(out.result, 0x05);
        assert!(out.carry);
    }

    #[test]
    fn test_decimal_add_nmos_zero_from_binary_sum() {
        // 0x99 + 0x01 = 0x9A in binary, so the NMOS Z flag stays clear
        let out = add(0x99, 0x01, false, true);
        assert!(!out.zero);
        assert!(out.with_result_flags().zero);
    }

    #[test]
    fn test_decimal_add_invalid_nibbles_follow_nibble_correction() {
        // 0x0F + 0x01: low nibble 0x10 is corrected to 0x16, carrying into the high nibble
        let out = add(0x0F, 0x01, false, true);
        assert_eq!(out.result, 0x16);
        assert!(!out.carry);
    }

    #[test]
    fn test_binary_subtract() {
        let out = subtract(0x50, 0x30, true, false);
        assert_eq!(out.result, 0x20);
        assert!(out.carry);

        let out = subtract(0x00, 0x01, true, false);
        assert_eq!(out.result, 0xFF);
        assert!(!out.carry);
        assert!(out.negative);

        // Positive minus negative overflowing into negative
        let out = subtract(0x7F, 0xFF, true, false);
        assert_eq!(out.result, 0x80);
        assert!(out.overflow);
    }

    #[test]
    fn test_decimal_subtract() {
        let out = subtract(0x10, 0x01, true, true);
        assert_eq!(out.result, 0x09);
        assert!(out.carry);

        let out = subtract(0x00, 0x01, true, true);
        assert_eq!(out.result, 0x99);
        assert!(!out.carry);

        let out = subtract(0x46, 0x12, false, true);
        assert_eq!(out.result, 0x33);
    }

    #[test]
    fn test_shifts_and_rotates() {
        assert_eq!(shift_left(0x81), (0x02, true));
        assert_eq!(shift_right(0x81), (0x40, true));
        assert_eq!(rotate_left(0x80, true), (0x01, true));
        assert_eq!(rotate_right(0x01, true), (0x80, true));
        assert_eq!(rotate_right(0x02, false), (0x01, false));
    }

    #[test]
    fn test_compare() {
        assert_eq!(compare(0x40, 0x40), (true, true, false));
        assert_eq!(compare(0x40, 0x41), (false, false, true));
        assert_eq!(compare(0x41, 0x40), (false, true, false));
    }
}

use std::fmt;

use bitflags::bitflags;

bitflags! {
    /// Bit layout of the flag byte pushed by `PUSH PSW`.
    ///
    /// From MSB to LSB: S, Z, 0, AC, 0, P, 1, CY.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PswBits: u8 {
        const SIGN = 0x80;
        const ZERO = 0x40;
        const AUX_CARRY = 0x10;
        const PARITY = 0x04;
        /// Bit 1 reads as 1 on real hardware.
        const ALWAYS_ONE = 0x02;
        const CARRY = 0x01;
    }
}

/// Condition flags of the 8080.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Flags {
    pub sign: bool,
    pub zero: bool,
    pub aux_carry: bool,
    pub parity: bool,
    pub carry: bool,
}

impl Flags {
    /// Pack into the PSW byte. Bits 5 and 3 are forced to 0, bit 1 to 1.
    pub fn to_u8(self) -> u8 {
        let mut bits = PswBits::ALWAYS_ONE;
        bits.set(PswBits::SIGN, self.sign);
        bits.set(PswBits::ZERO, self.zero);
        bits.set(PswBits::AUX_CARRY, self.aux_carry);
        bits.set(PswBits::PARITY, self.parity);
        bits.set(PswBits::CARRY, self.carry);
        bits.bits()
    }

    /// Unpack a PSW byte. The fixed bits are ignored.
    pub fn from_u8(value: u8) -> Self {
        let bits = PswBits::from_bits_truncate(value);
        Self {
            sign: bits.contains(PswBits::SIGN),
            zero: bits.contains(PswBits::ZERO),
            aux_carry: bits.contains(PswBits::AUX_CARRY),
            parity: bits.contains(PswBits::PARITY),
            carry: bits.contains(PswBits::CARRY),
        }
    }

    /// Update S, Z and P from an 8-bit result.
    #[inline]
    pub fn set_szp(&mut self, value: u8) {
        self.sign = value & 0x80 != 0;
        self.zero = value == 0;
        self.parity = value.count_ones() % 2 == 0;
    }
}

/// Register file of the 8080.
///
/// Pairs are formed B:C, D:E and H:L with the first register as the high
/// byte. This is unrelated to the little-endian order used when a 16-bit
/// value is stored on the bus.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Registers {
    pub a: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub e: u8,
    pub h: u8,
    pub l: u8,
    pub sp: u16,
    pub pc: u16,
    pub flags: Flags,
}

impl Registers {
    #[inline]
    pub fn get_bc(&self) -> u16 {
        u16::from_be_bytes([self.b, self.c])
    }

    #[inline]
    pub fn set_bc(&mut self, value: u16) {
        [self.b, self.c] = value.to_be_bytes();
    }

    #[inline]
    pub fn get_de(&self) -> u16 {
        u16::from_be_bytes([self.d, self.e])
    }

    #[inline]
    pub fn set_de(&mut self, value: u16) {
        [self.d, self.e] = value.to_be_bytes();
    }

    #[inline]
    pub fn get_hl(&self) -> u16 {
        u16::from_be_bytes([self.h, self.l])
    }

    #[inline]
    pub fn set_hl(&mut self, value: u16) {
        [self.h, self.l] = value.to_be_bytes();
    }

    /// Program status word: A in the high byte, packed flags in the low byte.
    #[inline]
    pub fn get_a_with_flags(&self) -> u16 {
        u16::from_be_bytes([self.a, self.flags.to_u8()])
    }

    #[inline]
    pub fn set_a_with_flags(&mut self, value: u16) {
        let [a, flags] = value.to_be_bytes();
        self.a = a;
        self.set_flags(flags);
    }

    #[inline]
    pub fn get_flags(&self) -> u8 {
        self.flags.to_u8()
    }

    #[inline]
    pub fn set_flags(&mut self, value: u8) {
        self.flags = Flags::from_u8(value);
    }
}

impl fmt::Display for Registers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bit = |set: bool| if set { '1' } else { '0' };
        write!(
            f,
            "A={:02X} B={:02X} C={:02X} D={:02X} E={:02X} H={:02X} L={:02X} \
             SP={:04X} PC={:04X} S={} Z={} AC={} P={} C={}",
            self.a,
            self.b,
            self.c,
            self.d,
            self.e,
            self.h,
            self.l,
            self.sp,
            self.pc,
            bit(self.flags.sign),
            bit(self.flags.zero),
            bit(self.flags.aux_carry),
            bit(self.flags.parity),
            bit(self.flags.carry),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_matches_documented_layout() {
        let cases = [
            (Flags::default(), 0b0000_0010),
            (
                Flags {
                    carry: true,
                    ..Flags::default()
                },
                0b0000_0011,
            ),
            (
                Flags {
                    parity: true,
                    ..Flags::default()
                },
                0b0000_0110,
            ),
            (
                Flags {
                    aux_carry: true,
                    ..Flags::default()
                },
                0b0001_0010,
            ),
            (
                Flags {
                    zero: true,
                    ..Flags::default()
                },
                0b0100_0010,
            ),
            (
                Flags {
                    sign: true,
                    ..Flags::default()
                },
                0b1000_0010,
            ),
            (
                Flags {
                    sign: true,
                    zero: true,
                    aux_carry: true,
                    parity: true,
                    carry: true,
                },
                0b1101_0111,
            ),
        ];

        for (flags, expected) in cases {
            assert_eq!(flags.to_u8(), expected, "{flags:?}");
        }
    }

    #[test]
    fn unpack_then_pack_is_identity_on_defined_bits() {
        for value in 0..=u8::MAX {
            let packed = Flags::from_u8(value).to_u8();
            let defined = (value & 0b1101_0101) | 0b0000_0010;
            assert_eq!(packed, defined, "0x{value:02X}");
        }
    }

    #[test]
    fn fixed_bits_are_ignored_on_unpack() {
        assert_eq!(Flags::from_u8(0b0010_1000), Flags::default());
        assert_eq!(Flags::from_u8(0b0000_0010), Flags::default());
    }

    #[test]
    fn pairs_use_first_register_as_high_byte() {
        let mut regs = Registers::default();
        regs.set_bc(0x1234);
        regs.set_de(0xABCD);
        regs.set_hl(0x00FF);
        assert_eq!((regs.b, regs.c), (0x12, 0x34));
        assert_eq!((regs.d, regs.e), (0xAB, 0xCD));
        assert_eq!((regs.h, regs.l), (0x00, 0xFF));
        assert_eq!(regs.get_bc(), 0x1234);
        assert_eq!(regs.get_de(), 0xABCD);
        assert_eq!(regs.get_hl(), 0x00FF);
    }

    #[test]
    fn psw_combines_accumulator_and_flags() {
        let mut regs = Registers {
            a: 0x42,
            ..Registers::default()
        };
        regs.flags.sign = true;
        regs.flags.carry = true;
        assert_eq!(regs.get_a_with_flags(), 0x4283);

        let mut other = Registers::default();
        other.set_a_with_flags(0x4283);
        assert_eq!(other.a, 0x42);
        assert_eq!(other.flags, regs.flags);
    }

    #[test]
    fn szp_follow_result() {
        let mut flags = Flags::default();
        flags.set_szp(0x00);
        assert!(flags.zero && flags.parity && !flags.sign);
        flags.set_szp(0x80);
        assert!(!flags.zero && !flags.parity && flags.sign);
        flags.set_szp(0x81);
        assert!(flags.parity && flags.sign);
    }

    #[test]
    fn display_lists_registers_and_flags() {
        let regs = Registers {
            a: 0x06,
            pc: 0x0004,
            flags: Flags {
                parity: true,
                ..Flags::default()
            },
            ..Registers::default()
        };
        let text = regs.to_string();
        assert!(text.starts_with("A=06 B=00"));
        assert!(text.contains("PC=0004"));
        assert!(text.ends_with("S=0 Z=0 AC=0 P=1 C=0"));
    }
}

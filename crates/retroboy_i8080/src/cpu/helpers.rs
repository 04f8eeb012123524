use super::{Bus, Cpu};
use crate::error::Result;

impl<B: Bus> Cpu<B> {
    /// Read an 8-bit register or M by index.
    ///
    /// Index order follows the opcode encoding:
    /// 0=B, 1=C, 2=D, 3=E, 4=H, 5=L, 6=M (memory at HL), 7=A.
    #[inline]
    pub(super) fn read_reg8(&self, index: u8) -> Result<u8> {
        Ok(match index & 0x07 {
            0 => self.regs.b,
            1 => self.regs.c,
            2 => self.regs.d,
            3 => self.regs.e,
            4 => self.regs.h,
            5 => self.regs.l,
            6 => return self.bus.read_byte_at(self.regs.get_hl()),
            _ => self.regs.a,
        })
    }

    /// Write an 8-bit register or M by index. See `read_reg8`.
    #[inline]
    pub(super) fn write_reg8(&mut self, index: u8, value: u8) -> Result<()> {
        match index & 0x07 {
            0 => self.regs.b = value,
            1 => self.regs.c = value,
            2 => self.regs.d = value,
            3 => self.regs.e = value,
            4 => self.regs.h = value,
            5 => self.regs.l = value,
            6 => return self.bus.write_byte_at(self.regs.get_hl(), value),
            _ => self.regs.a = value,
        }
        Ok(())
    }

    /// Read a register pair by the two-bit field of LXI/INX/DCX/DAD.
    ///
    /// 0=BC, 1=DE, 2=HL, 3=SP.
    #[inline]
    pub(super) fn read_pair(&self, index: u8) -> u16 {
        match index & 0x03 {
            0 => self.regs.get_bc(),
            1 => self.regs.get_de(),
            2 => self.regs.get_hl(),
            _ => self.regs.sp,
        }
    }

    #[inline]
    pub(super) fn write_pair(&mut self, index: u8, value: u16) {
        match index & 0x03 {
            0 => self.regs.set_bc(value),
            1 => self.regs.set_de(value),
            2 => self.regs.set_hl(value),
            _ => self.regs.sp = value,
        }
    }

    pub(super) fn fetch_byte(&mut self) -> Result<u8> {
        let value = self.bus.read_byte_at(self.regs.pc)?;
        self.regs.pc = self.regs.pc.wrapping_add(1);
        Ok(value)
    }

    /// Fetch a little-endian 16-bit operand.
    pub(super) fn fetch_word(&mut self) -> Result<u16> {
        let lo = self.fetch_byte()?;
        let hi = self.fetch_byte()?;
        Ok(u16::from_le_bytes([lo, hi]))
    }

    /// Read a little-endian word at `address` and `address + 1`.
    pub(super) fn read_word_at(&self, address: u16) -> Result<u16> {
        let lo = self.bus.read_byte_at(address)?;
        let hi = self.bus.read_byte_at(address.wrapping_add(1))?;
        Ok(u16::from_le_bytes([lo, hi]))
    }

    pub(super) fn write_word_at(&mut self, address: u16, value: u16) -> Result<()> {
        let [lo, hi] = value.to_le_bytes();
        self.bus.write_byte_at(address, lo)?;
        self.bus.write_byte_at(address.wrapping_add(1), hi)
    }

    /// Push a word: high byte at SP-1, low byte at SP-2, then SP -= 2.
    ///
    /// An underflowing SP lands on 0xFFFF, which no bus can hold, so the
    /// write fails instead of wrapping around memory.
    pub(super) fn push_word(&mut self, value: u16) -> Result<()> {
        let [lo, hi] = value.to_le_bytes();
        let sp = self.regs.sp;
        self.bus.write_byte_at(sp.wrapping_sub(1), hi)?;
        self.bus.write_byte_at(sp.wrapping_sub(2), lo)?;
        self.regs.sp = sp.wrapping_sub(2);
        Ok(())
    }

    /// Pop a word: low byte at SP, high byte at SP+1, then SP += 2.
    pub(super) fn pop_word(&mut self) -> Result<u16> {
        let value = self.read_word_at(self.regs.sp)?;
        self.regs.sp = self.regs.sp.wrapping_add(2);
        Ok(value)
    }
}

use crate::cpu::{Bus, Cpu};
use crate::error::Result;

impl<B: Bus> Cpu<B> {
    /// MOV r1, r2. Destination in bits 3..5, source in bits 0..2.
    pub(crate) fn exec_mov(&mut self, opcode: u8) -> Result<()> {
        debug_assert!((0x40..=0x7F).contains(&opcode) && opcode != 0x76);
        let value = self.read_reg8(opcode & 0x07)?;
        self.write_reg8((opcode >> 3) & 0x07, value)
    }

    /// MVI r, d8
    pub(crate) fn exec_mvi(&mut self, opcode: u8) -> Result<()> {
        debug_assert!(opcode & 0xC7 == 0x06);
        let value = self.fetch_byte()?;
        self.write_reg8((opcode >> 3) & 0x07, value)
    }

    /// LXI rp, d16
    pub(crate) fn exec_lxi(&mut self, opcode: u8) -> Result<()> {
        debug_assert!(opcode & 0xCF == 0x01);
        let value = self.fetch_word()?;
        self.write_pair((opcode >> 4) & 0x03, value);
        Ok(())
    }

    /// STAX B / STAX D
    pub(crate) fn exec_stax(&mut self, opcode: u8) -> Result<()> {
        let address = match opcode {
            0x02 => self.regs.get_bc(),
            _ => self.regs.get_de(),
        };
        self.bus.write_byte_at(address, self.regs.a)
    }

    /// LDAX B / LDAX D
    pub(crate) fn exec_ldax(&mut self, opcode: u8) -> Result<()> {
        let address = match opcode {
            0x0A => self.regs.get_bc(),
            _ => self.regs.get_de(),
        };
        self.regs.a = self.bus.read_byte_at(address)?;
        Ok(())
    }

    pub(crate) fn exec_sta(&mut self, _opcode: u8) -> Result<()> {
        let address = self.fetch_word()?;
        self.bus.write_byte_at(address, self.regs.a)
    }

    pub(crate) fn exec_lda(&mut self, _opcode: u8) -> Result<()> {
        let address = self.fetch_word()?;
        self.regs.a = self.bus.read_byte_at(address)?;
        Ok(())
    }

    /// SHLD a16: L to a16, H to a16 + 1.
    pub(crate) fn exec_shld(&mut self, _opcode: u8) -> Result<()> {
        let address = self.fetch_word()?;
        self.write_word_at(address, self.regs.get_hl())
    }

    /// LHLD a16: L from a16, H from a16 + 1.
    pub(crate) fn exec_lhld(&mut self, _opcode: u8) -> Result<()> {
        let address = self.fetch_word()?;
        let value = self.read_word_at(address)?;
        self.regs.set_hl(value);
        Ok(())
    }

    /// XCHG: swap HL and DE.
    pub(crate) fn exec_xchg(&mut self, _opcode: u8) -> Result<()> {
        std::mem::swap(&mut self.regs.h, &mut self.regs.d);
        std::mem::swap(&mut self.regs.l, &mut self.regs.e);
        Ok(())
    }
}

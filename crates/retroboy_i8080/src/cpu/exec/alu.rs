use crate::cpu::{Bus, Cpu};
use crate::error::Result;

impl<B: Bus> Cpu<B> {
    /// Apply one of the eight accumulator operations selected by bits 3..5.
    fn alu_by_index(&mut self, operation: u8, value: u8) {
        let carry = self.regs.flags.carry;
        match operation & 0x07 {
            0 => self.alu_add(value, false),
            1 => self.alu_add(value, carry),
            2 => self.alu_sub(value, false),
            3 => self.alu_sub(value, carry),
            4 => self.alu_ana(value),
            5 => self.alu_xra(value),
            6 => self.alu_ora(value),
            _ => self.alu_cmp(value),
        }
    }

    /// ADD/ADC/SUB/SBB/ANA/XRA/ORA/CMP r (0x80..=0xBF).
    pub(crate) fn exec_alu_reg(&mut self, opcode: u8) -> Result<()> {
        debug_assert!((0x80..=0xBF).contains(&opcode));
        let value = self.read_reg8(opcode & 0x07)?;
        self.alu_by_index(opcode >> 3, value);
        Ok(())
    }

    /// ADI/ACI/SUI/SBI/ANI/XRI/ORI/CPI d8
    pub(crate) fn exec_alu_imm(&mut self, opcode: u8) -> Result<()> {
        debug_assert!(opcode & 0xC7 == 0xC6);
        let value = self.fetch_byte()?;
        self.alu_by_index(opcode >> 3, value);
        Ok(())
    }

    /// DAD rp
    pub(crate) fn exec_dad(&mut self, opcode: u8) -> Result<()> {
        let value = self.read_pair((opcode >> 4) & 0x03);
        self.alu_dad(value);
        Ok(())
    }

    /// RLC/RRC/RAL/RAR
    pub(crate) fn exec_rotate(&mut self, opcode: u8) -> Result<()> {
        match opcode {
            0x07 => self.alu_rlc(),
            0x0F => self.alu_rrc(),
            0x17 => self.alu_ral(),
            _ => self.alu_rar(),
        }
        Ok(())
    }

    pub(crate) fn exec_daa(&mut self, _opcode: u8) -> Result<()> {
        self.alu_daa();
        Ok(())
    }

    /// CMA: complement A. Flags unchanged.
    pub(crate) fn exec_cma(&mut self, _opcode: u8) -> Result<()> {
        self.regs.a = !self.regs.a;
        Ok(())
    }

    pub(crate) fn exec_stc(&mut self, _opcode: u8) -> Result<()> {
        self.regs.flags.carry = true;
        Ok(())
    }

    pub(crate) fn exec_cmc(&mut self, _opcode: u8) -> Result<()> {
        self.regs.flags.carry = !self.regs.flags.carry;
        Ok(())
    }
}

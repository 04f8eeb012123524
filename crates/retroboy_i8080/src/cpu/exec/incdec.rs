use crate::cpu::{Bus, Cpu};
use crate::error::Result;

impl<B: Bus> Cpu<B> {
    /// INR r / INR M
    pub(crate) fn exec_inr(&mut self, opcode: u8) -> Result<()> {
        debug_assert!(opcode & 0xC7 == 0x04);
        let index = (opcode >> 3) & 0x07;
        let value = self.read_reg8(index)?;
        let result = self.alu_inr(value);
        self.write_reg8(index, result)
    }

    /// DCR r / DCR M
    pub(crate) fn exec_dcr(&mut self, opcode: u8) -> Result<()> {
        debug_assert!(opcode & 0xC7 == 0x05);
        let index = (opcode >> 3) & 0x07;
        let value = self.read_reg8(index)?;
        let result = self.alu_dcr(value);
        self.write_reg8(index, result)
    }

    // INX and DCX wrap at 16 bits and leave the flags alone.

    pub(crate) fn exec_inx(&mut self, opcode: u8) -> Result<()> {
        let index = (opcode >> 4) & 0x03;
        let value = self.read_pair(index).wrapping_add(1);
        self.write_pair(index, value);
        Ok(())
    }

    pub(crate) fn exec_dcx(&mut self, opcode: u8) -> Result<()> {
        let index = (opcode >> 4) & 0x03;
        let value = self.read_pair(index).wrapping_sub(1);
        self.write_pair(index, value);
        Ok(())
    }
}

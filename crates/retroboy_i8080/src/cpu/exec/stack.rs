use crate::cpu::{Bus, Cpu};
use crate::error::Result;

impl<B: Bus> Cpu<B> {
    /// PUSH B/D/H/PSW. Pair 3 is A plus the packed flag byte.
    pub(crate) fn exec_push(&mut self, opcode: u8) -> Result<()> {
        let value = match (opcode >> 4) & 0x03 {
            3 => self.regs.get_a_with_flags(),
            index => self.read_pair(index),
        };
        self.push_word(value)
    }

    /// POP B/D/H/PSW
    pub(crate) fn exec_pop(&mut self, opcode: u8) -> Result<()> {
        let value = self.pop_word()?;
        match (opcode >> 4) & 0x03 {
            3 => self.regs.set_a_with_flags(value),
            index => self.write_pair(index, value),
        }
        Ok(())
    }

    /// XTHL: exchange HL with the word on top of the stack.
    pub(crate) fn exec_xthl(&mut self, _opcode: u8) -> Result<()> {
        let sp = self.regs.sp;
        let top = self.read_word_at(sp)?;
        self.write_word_at(sp, self.regs.get_hl())?;
        self.regs.set_hl(top);
        Ok(())
    }

    pub(crate) fn exec_sphl(&mut self, _opcode: u8) -> Result<()> {
        self.regs.sp = self.regs.get_hl();
        Ok(())
    }
}

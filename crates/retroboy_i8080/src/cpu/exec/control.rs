use crate::cpu::{Bus, Condition, Cpu};
use crate::error::Result;

impl<B: Bus> Cpu<B> {
    fn branch_taken(&self, opcode: u8, unconditional: u8) -> bool {
        opcode == unconditional || self.condition_met(Condition::from_opcode(opcode))
    }

    /// JMP a16 / Jcc a16
    pub(crate) fn exec_jump(&mut self, opcode: u8) -> Result<()> {
        let taken = self.branch_taken(opcode, 0xC3);
        self.jump(taken)
    }

    /// CALL a16 / Ccc a16
    pub(crate) fn exec_call(&mut self, opcode: u8) -> Result<()> {
        let taken = self.branch_taken(opcode, 0xCD);
        self.call(taken)
    }

    /// RET / Rcc
    pub(crate) fn exec_ret(&mut self, opcode: u8) -> Result<()> {
        let taken = self.branch_taken(opcode, 0xC9);
        self.ret(taken)
    }

    /// RST n
    pub(crate) fn exec_rst(&mut self, opcode: u8) -> Result<()> {
        debug_assert!(opcode & 0xC7 == 0xC7);
        self.restart(opcode)
    }

    /// PCHL: PC <- HL
    pub(crate) fn exec_pchl(&mut self, _opcode: u8) -> Result<()> {
        self.regs.pc = self.regs.get_hl();
        Ok(())
    }
}

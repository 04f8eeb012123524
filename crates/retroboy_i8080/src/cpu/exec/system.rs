use crate::cpu::{Bus, Cpu, OPCODE_TABLE};
use crate::error::{Error, Result};

impl<B: Bus> Cpu<B> {
    pub(crate) fn exec_nop(&mut self, _opcode: u8) -> Result<()> {
        Ok(())
    }

    /// HLT stops the fetch-execute loop. Not an error.
    pub(crate) fn exec_hlt(&mut self, _opcode: u8) -> Result<()> {
        self.halted = true;
        log::debug!("halted: {}", self.regs);
        Ok(())
    }

    /// IN, OUT, EI and DI: decoded but not emulated.
    pub(crate) fn exec_unimplemented(&mut self, opcode: u8) -> Result<()> {
        let mnemonic = OPCODE_TABLE[opcode as usize].map_or("???", |info| info.mnemonic);
        Err(Error::OpcodeNotImplemented { opcode, mnemonic })
    }
}

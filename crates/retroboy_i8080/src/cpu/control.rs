use super::{Bus, Cpu};
use crate::error::Result;

/// Branch condition encoded in bits 3..5 of Jcc/Ccc/Rcc.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    NotZero,
    Zero,
    NoCarry,
    Carry,
    ParityOdd,
    ParityEven,
    Plus,
    Minus,
}

impl Condition {
    pub fn from_opcode(opcode: u8) -> Self {
        match (opcode >> 3) & 0x07 {
            0 => Self::NotZero,
            1 => Self::Zero,
            2 => Self::NoCarry,
            3 => Self::Carry,
            4 => Self::ParityOdd,
            5 => Self::ParityEven,
            6 => Self::Plus,
            _ => Self::Minus,
        }
    }
}

impl<B: Bus> Cpu<B> {
    pub(super) fn condition_met(&self, condition: Condition) -> bool {
        let flags = self.regs.flags;
        match condition {
            Condition::NotZero => !flags.zero,
            Condition::Zero => flags.zero,
            Condition::NoCarry => !flags.carry,
            Condition::Carry => flags.carry,
            Condition::ParityOdd => !flags.parity,
            Condition::ParityEven => flags.parity,
            Condition::Plus => !flags.sign,
            Condition::Minus => flags.sign,
        }
    }

    /// The target is always fetched so PC skips the operand when not taken.
    pub(super) fn jump(&mut self, taken: bool) -> Result<()> {
        let target = self.fetch_word()?;
        if taken {
            self.regs.pc = target;
        }
        Ok(())
    }

    /// Push the address of the next instruction and jump.
    pub(super) fn call(&mut self, taken: bool) -> Result<()> {
        let target = self.fetch_word()?;
        if taken {
            self.push_word(self.regs.pc)?;
            self.regs.pc = target;
        }
        Ok(())
    }

    /// The return address is popped even when the condition fails; only the
    /// jump is conditional.
    pub(super) fn ret(&mut self, taken: bool) -> Result<()> {
        let target = self.pop_word()?;
        if taken {
            self.regs.pc = target;
        }
        Ok(())
    }

    /// Call the fixed vector `opcode & 0x38`.
    pub(super) fn restart(&mut self, opcode: u8) -> Result<()> {
        self.push_word(self.regs.pc)?;
        self.regs.pc = (opcode & 0x38) as u16;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn condition_decodes_from_bits_three_to_five() {
        let expected = [
            (0xC2, Condition::NotZero),
            (0xCA, Condition::Zero),
            (0xD2, Condition::NoCarry),
            (0xDA, Condition::Carry),
            (0xE2, Condition::ParityOdd),
            (0xEA, Condition::ParityEven),
            (0xF2, Condition::Plus),
            (0xFA, Condition::Minus),
        ];
        for (opcode, condition) in expected {
            assert_eq!(Condition::from_opcode(opcode), condition);
            // Ccc and Rcc share the field.
            assert_eq!(Condition::from_opcode(opcode + 2), condition);
            assert_eq!(Condition::from_opcode(opcode - 2), condition);
        }
    }
}

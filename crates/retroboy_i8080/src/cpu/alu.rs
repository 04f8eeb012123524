use super::{Bus, Cpu};

impl<B: Bus> Cpu<B> {
    /// ADD/ADC: A <- A + value + carry_in.
    pub(super) fn alu_add(&mut self, value: u8, carry_in: bool) {
        let carry = carry_in as u8;
        let a = self.regs.a;
        let wide = a as u16 + value as u16 + carry as u16;
        let result = wide as u8;

        let flags = &mut self.regs.flags;
        flags.carry = wide > 0xFF;
        flags.aux_carry = (a & 0x0F) + (value & 0x0F) + carry > 0x0F;
        flags.set_szp(result);
        self.regs.a = result;
    }

    /// SUB/SBB: A <- A - value - borrow_in. Carry is set on borrow.
    pub(super) fn alu_sub(&mut self, value: u8, borrow_in: bool) {
        let borrow = borrow_in as u8;
        let a = self.regs.a;
        let result = a.wrapping_sub(value).wrapping_sub(borrow);

        let flags = &mut self.regs.flags;
        flags.carry = (a as u16) < value as u16 + borrow as u16;
        flags.aux_carry = (a & 0x0F) < (value & 0x0F) + borrow;
        flags.set_szp(result);
        self.regs.a = result;
    }

    pub(super) fn alu_ana(&mut self, value: u8) {
        self.logical_result(self.regs.a & value);
    }

    pub(super) fn alu_xra(&mut self, value: u8) {
        self.logical_result(self.regs.a ^ value);
    }

    pub(super) fn alu_ora(&mut self, value: u8) {
        self.logical_result(self.regs.a | value);
    }

    fn logical_result(&mut self, result: u8) {
        let flags = &mut self.regs.flags;
        flags.carry = false;
        flags.aux_carry = false;
        flags.set_szp(result);
        self.regs.a = result;
    }

    /// CMP: flags of A - value, A unchanged.
    pub(super) fn alu_cmp(&mut self, value: u8) {
        let a = self.regs.a;
        self.alu_sub(value, false);
        self.regs.a = a;
    }

    /// INR: returns value + 1. Carry is preserved.
    pub(super) fn alu_inr(&mut self, value: u8) -> u8 {
        let result = value.wrapping_add(1);
        let flags = &mut self.regs.flags;
        flags.aux_carry = value & 0x0F == 0x0F;
        flags.set_szp(result);
        result
    }

    /// DCR: returns value - 1. Carry is preserved.
    ///
    /// AC reports a borrow into bit 4, i.e. the low nibble was 0.
    pub(super) fn alu_dcr(&mut self, value: u8) -> u8 {
        let result = value.wrapping_sub(1);
        let flags = &mut self.regs.flags;
        flags.aux_carry = value & 0x0F == 0x00;
        flags.set_szp(result);
        result
    }

    /// DAD: HL <- HL + value. Only Carry is affected.
    pub(super) fn alu_dad(&mut self, value: u16) {
        let (result, carry) = self.regs.get_hl().overflowing_add(value);
        self.regs.flags.carry = carry;
        self.regs.set_hl(result);
    }

    /// DAA: adjust A to packed BCD after an addition.
    pub(super) fn alu_daa(&mut self) {
        let mut a = self.regs.a;
        let flags = &mut self.regs.flags;

        let low = a & 0x0F;
        if low > 9 || flags.aux_carry {
            a = a.wrapping_add(0x06);
            flags.aux_carry = low > 9;
        }

        let high = a >> 4;
        if high > 9 || flags.carry {
            a = a.wrapping_add(0x60);
            flags.carry = high > 9;
        }

        flags.set_szp(a);
        self.regs.a = a;
    }

    /// RLC: bit 7 goes to Carry and bit 0.
    pub(super) fn alu_rlc(&mut self) {
        let a = self.regs.a;
        self.regs.flags.carry = a & 0x80 != 0;
        self.regs.a = a.rotate_left(1);
    }

    /// RRC: bit 0 goes to Carry and bit 7.
    pub(super) fn alu_rrc(&mut self) {
        let a = self.regs.a;
        self.regs.flags.carry = a & 0x01 != 0;
        self.regs.a = a.rotate_right(1);
    }

    /// RAL: rotate left through Carry.
    pub(super) fn alu_ral(&mut self) {
        let a = self.regs.a;
        let carry_in = self.regs.flags.carry as u8;
        self.regs.flags.carry = a & 0x80 != 0;
        self.regs.a = (a << 1) | carry_in;
    }

    /// RAR: rotate right through Carry.
    pub(super) fn alu_rar(&mut self) {
        let a = self.regs.a;
        let carry_in = self.regs.flags.carry as u8;
        self.regs.flags.carry = a & 0x01 != 0;
        self.regs.a = (a >> 1) | (carry_in << 7);
    }
}

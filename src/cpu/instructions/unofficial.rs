// Unofficial (undocumented) 6502 opcodes exercised by real cartridges.
//
// Each of these combines a documented read-modify-write or load/store with
// a second documented operation on the same operand, which is exactly how
// the decimal hardware implements them as a side effect of its internal
// microcode, not as distinct instructions.

use crate::bus::Bus;
use crate::cpu::addressing::AddressingResult;
use crate::cpu::Cpu;

impl Cpu {
    /// LAX - Load A and X simultaneously from memory.
    ///
    /// Flags affected: Z, N (from the loaded value).
    pub fn lax(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let value = self.read_operand(bus, addr_result);
        self.a = value;
        self.x = value;
        self.update_zero_and_negative_flags(value);
    }

    /// SAX - Store A AND X into memory. Flags affected: none.
    pub fn sax(&self, bus: &mut Bus, addr_result: &AddressingResult) {
        bus.write(addr_result.address, self.a & self.x);
    }

    /// DCP - Decrement memory, then compare the result against A.
    ///
    /// Flags affected: C, Z, N (from the CMP half).
    pub fn dcp(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let result = bus.read(addr_result.address).wrapping_sub(1);
        bus.write(addr_result.address, result);
        self.set_carry(self.a >= result);
        self.update_zero_and_negative_flags(self.a.wrapping_sub(result));
    }

    /// ISB/ISC - Increment memory, then subtract the result from A with
    /// borrow (SBC).
    pub fn isb(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let incremented = bus.read(addr_result.address).wrapping_add(1);
        bus.write(addr_result.address, incremented);
        self.sbc_value(incremented);
    }

    /// SLO - Shift memory left, then OR the result into A.
    pub fn slo(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let value = bus.read(addr_result.address);
        self.set_carry(value & 0x80 != 0);
        let shifted = value << 1;
        bus.write(addr_result.address, shifted);
        self.a |= shifted;
        self.update_zero_and_negative_flags(self.a);
    }

    /// RLA - Rotate memory left, then AND the result into A.
    pub fn rla(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let value = bus.read(addr_result.address);
        let carry_in = if self.get_carry() { 1 } else { 0 };
        self.set_carry(value & 0x80 != 0);
        let rotated = (value << 1) | carry_in;
        bus.write(addr_result.address, rotated);
        self.a &= rotated;
        self.update_zero_and_negative_flags(self.a);
    }

    /// SRE - Shift memory right, then EOR the result into A.
    pub fn sre(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let value = bus.read(addr_result.address);
        self.set_carry(value & 0x01 != 0);
        let shifted = value >> 1;
        bus.write(addr_result.address, shifted);
        self.a ^= shifted;
        self.update_zero_and_negative_flags(self.a);
    }

    /// RRA - Rotate memory right, then add the result into A with carry
    /// (ADC).
    pub fn rra(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let value = bus.read(addr_result.address);
        let carry_in = if self.get_carry() { 0x80 } else { 0 };
        self.set_carry(value & 0x01 != 0);
        let rotated = (value >> 1) | carry_in;
        bus.write(addr_result.address, rotated);
        self.adc_value(rotated);
    }

    /// Shared ADC core used by both the documented `adc` and `rra`, operating
    /// on an already-resolved operand byte.
    pub(crate) fn adc_value(&mut self, value: u8) {
        let carry = if self.get_carry() { 1 } else { 0 };
        let sum = self.a as u16 + value as u16 + carry as u16;
        self.set_carry(sum > 0xFF);
        let result = sum as u8;
        let overflow = (self.a ^ result) & (value ^ result) & 0x80 != 0;
        self.set_overflow(overflow);
        self.a = result;
        self.update_zero_and_negative_flags(result);
    }

    /// Shared SBC core used by both the documented `sbc` and `isb`,
    /// operating on an already-resolved operand byte.
    pub(crate) fn sbc_value(&mut self, value: u8) {
        let inverted = !value;
        let carry = if self.get_carry() { 1 } else { 0 };
        let sum = self.a as u16 + inverted as u16 + carry as u16;
        self.set_carry(sum > 0xFF);
        let result = sum as u8;
        let overflow = (self.a ^ result) & (inverted ^ result) & 0x80 != 0;
        self.set_overflow(overflow);
        self.a = result;
        self.update_zero_and_negative_flags(result);
    }

    /// Multi-byte unofficial NOP (DOP/TOP). The operand has already been
    /// addressed (and, for page-crossing absolute,X forms, penalized) by
    /// the decode step; no further effect occurs.
    pub fn nop_unofficial(&mut self, _bus: &mut Bus, _addr_result: &AddressingResult) -> u8 {
        0
    }
}

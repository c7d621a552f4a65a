//! # ALU (Arithmetic Logic Unit) Instructions
//!
//! - ADC, SBC: add/subtract with carry, binary or BCD
//! - AND, ORA, EOR: bitwise logic into A
//! - BIT: test A against memory
//! - CMP, CPX, CPY: compare a register with the operand

use crate::{MemoryBus, Operand, Operation, CPU};

/// ADC: A = A + M + C.
///
/// Binary flags: C on unsigned overflow, V on signed overflow, Z/N from the
/// result. In decimal mode the result and C are BCD-corrected; N, V and Z
/// follow the NMOS part, which derives them from intermediate values.
pub(crate) fn adc<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    let value = cpu.read_operand(operand);

    if cpu.regs.p.d && cpu.config().decimal_mode {
        adc_decimal(cpu, value);
    } else {
        adc_binary(cpu, value);
    }
}

/// SBC: A = A - M - (1 - C).
///
/// Flags always come from the binary subtraction; decimal mode only changes
/// the value written to A.
pub(crate) fn sbc<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    let value = cpu.read_operand(operand);

    if cpu.regs.p.d && cpu.config().decimal_mode {
        let a = cpu.regs.a;
        let borrow = !cpu.regs.p.c as i16;

        // Flags first: identical to binary mode on NMOS.
        adc_binary(cpu, !value);

        let mut lo = (a & 0x0F) as i16 - (value & 0x0F) as i16 - borrow;
        let mut hi = (a >> 4) as i16 - (value >> 4) as i16;
        if lo < 0 {
            lo -= 6;
            hi -= 1;
        }
        if hi < 0 {
            hi -= 6;
        }
        cpu.regs.a = (((hi << 4) | (lo & 0x0F)) & 0xFF) as u8;
    } else {
        // Binary subtraction is addition of the one's complement.
        adc_binary(cpu, !value);
    }
}

fn adc_binary<M: MemoryBus>(cpu: &mut CPU<M>, value: u8) {
    let a = cpu.regs.a;
    let sum = a as u16 + value as u16 + cpu.regs.p.c as u16;
    let result = sum as u8;

    cpu.regs.p.c = sum > 0xFF;
    // Both inputs share a sign the result does not
    cpu.regs.p.v = (a ^ result) & (value ^ result) & 0x80 != 0;
    cpu.regs.p.set_zn(result);
    cpu.regs.a = result;
}

fn adc_decimal<M: MemoryBus>(cpu: &mut CPU<M>, value: u8) {
    let a = cpu.regs.a as u16;
    let m = value as u16;
    let carry = cpu.regs.p.c as u16;

    let mut lo = (a & 0x0F) + (m & 0x0F) + carry;
    if lo > 0x09 {
        lo += 0x06;
    }
    let mut hi = (a >> 4) + (m >> 4) + (lo > 0x0F) as u16;

    // Z is taken from the binary sum on NMOS
    cpu.regs.p.z = (a + m + carry) & 0xFF == 0;
    cpu.regs.p.n = hi & 0x08 != 0;
    cpu.regs.p.v = (!(a ^ m) & (a ^ (hi << 4)) & 0x80) != 0;

    if hi > 0x09 {
        hi += 0x06;
    }
    cpu.regs.p.c = hi > 0x0F;
    cpu.regs.a = (((hi << 4) | (lo & 0x0F)) & 0xFF) as u8;
}

/// AND / ORA / EOR into the accumulator. Sets Z and N.
pub(crate) fn logical<M: MemoryBus>(cpu: &mut CPU<M>, operation: Operation, operand: Operand) {
    let value = cpu.read_operand(operand);

    let result = match operation {
        Operation::And => cpu.regs.a & value,
        Operation::Ora => cpu.regs.a | value,
        Operation::Eor => cpu.regs.a ^ value,
        _ => unreachable!("{} is not a logical operation", operation),
    };

    cpu.regs.a = result;
    cpu.regs.p.set_zn(result);
}

/// BIT: Z from A & M; N and V copied from bits 7 and 6 of M.
pub(crate) fn bit<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    let value = cpu.read_operand(operand);

    cpu.regs.p.z = cpu.regs.a & value == 0;
    cpu.regs.p.n = value & 0x80 != 0;
    cpu.regs.p.v = value & 0x40 != 0;
}

/// CMP / CPX / CPY: C = reg >= M, Z/N from reg - M. The register is left
/// unchanged.
pub(crate) fn compare<M: MemoryBus>(cpu: &mut CPU<M>, operation: Operation, operand: Operand) {
    let value = cpu.read_operand(operand);

    let register = match operation {
        Operation::Cmp => cpu.regs.a,
        Operation::Cpx => cpu.regs.x,
        Operation::Cpy => cpu.regs.y,
        _ => unreachable!("{} is not a compare", operation),
    };

    cpu.regs.p.c = register >= value;
    cpu.regs.p.set_zn(register.wrapping_sub(value));
}

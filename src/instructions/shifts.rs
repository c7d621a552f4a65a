//! # Shift and Rotate Instructions
//!
//! ASL, LSR, ROL, ROR on the accumulator or a memory location. The bit
//! shifted out lands in C; Z and N come from the result.

use crate::{MemoryBus, Operand, Operation, CPU};

pub(crate) fn shift<M: MemoryBus>(cpu: &mut CPU<M>, operation: Operation, operand: Operand) {
    let value = cpu.read_operand(operand);
    let carry_in = cpu.regs.p.c as u8;

    let (result, carry_out) = match operation {
        Operation::Asl => (value << 1, value & 0x80 != 0),
        Operation::Lsr => (value >> 1, value & 0x01 != 0),
        Operation::Rol => ((value << 1) | carry_in, value & 0x80 != 0),
        Operation::Ror => ((value >> 1) | (carry_in << 7), value & 0x01 != 0),
        _ => unreachable!("{} is not a shift", operation),
    };

    cpu.write_operand(operand, result);
    cpu.regs.p.c = carry_out;
    cpu.regs.p.set_zn(result);
}

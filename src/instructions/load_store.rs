//! # Load and Store Instructions
//!
//! - LDA, LDX, LDY: copy the operand into a register and set Z/N
//! - STA, STX, STY: copy a register to memory; no flags affected
//!
//! Loads through AbsoluteX/AbsoluteY/IndirectY pay the page-crossing
//! penalty; stores never do (their table cost already includes it).

use crate::{MemoryBus, Operand, Operation, CPU};

pub(crate) fn load<M: MemoryBus>(cpu: &mut CPU<M>, operation: Operation, operand: Operand) {
    let value = cpu.read_operand(operand);

    match operation {
        Operation::Lda => cpu.regs.a = value,
        Operation::Ldx => cpu.regs.x = value,
        Operation::Ldy => cpu.regs.y = value,
        _ => unreachable!("{} is not a load", operation),
    }

    cpu.regs.p.set_zn(value);
}

pub(crate) fn store<M: MemoryBus>(cpu: &mut CPU<M>, operation: Operation, operand: Operand) {
    let value = match operation {
        Operation::Sta => cpu.regs.a,
        Operation::Stx => cpu.regs.x,
        Operation::Sty => cpu.regs.y,
        _ => unreachable!("{} is not a store", operation),
    };

    cpu.memory.write(operand.effective_address(), value);
}

//! # Increment and Decrement Instructions
//!
//! INC/DEC on memory and INX/INY/DEX/DEY on the index registers. All wrap
//! and set Z/N; C and V are untouched.

use crate::{MemoryBus, Operand, Operation, CPU};

pub(crate) fn memory<M: MemoryBus>(cpu: &mut CPU<M>, operation: Operation, operand: Operand) {
    let addr = operand.effective_address();
    let value = cpu.memory.read(addr);

    let result = match operation {
        Operation::Inc => value.wrapping_add(1),
        Operation::Dec => value.wrapping_sub(1),
        _ => unreachable!("{} is not a memory increment", operation),
    };

    cpu.memory.write(addr, result);
    cpu.regs.p.set_zn(result);
}

pub(crate) fn register<M: MemoryBus>(cpu: &mut CPU<M>, operation: Operation) {
    let regs = &mut cpu.regs;

    let result = match operation {
        Operation::Inx => {
            regs.x = regs.x.wrapping_add(1);
            regs.x
        }
        Operation::Iny => {
            regs.y = regs.y.wrapping_add(1);
            regs.y
        }
        Operation::Dex => {
            regs.x = regs.x.wrapping_sub(1);
            regs.x
        }
        Operation::Dey => {
            regs.y = regs.y.wrapping_sub(1);
            regs.y
        }
        _ => unreachable!("{} is not a register increment", operation),
    };

    regs.p.set_zn(result);
}

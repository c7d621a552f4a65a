//! # Status Flag Manipulation Instructions
//!
//! CLC, SEC, CLI, SEI, CLD, SED, CLV. Each touches exactly one flag.

use crate::{MemoryBus, Operation, CPU};

pub(crate) fn flag<M: MemoryBus>(cpu: &mut CPU<M>, operation: Operation) {
    let p = &mut cpu.regs.p;

    match operation {
        Operation::Clc => p.c = false,
        Operation::Sec => p.c = true,
        Operation::Cli => p.i = false,
        Operation::Sei => p.i = true,
        Operation::Cld => p.d = false,
        Operation::Sed => p.d = true,
        Operation::Clv => p.v = false,
        _ => unreachable!("{} is not a flag operation", operation),
    }
}

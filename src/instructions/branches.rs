//! # Branch Instructions
//!
//! BCC, BCS, BEQ, BNE, BMI, BPL, BVC, BVS. All use relative addressing
//! with a signed 8-bit offset from the address of the next instruction.
//!
//! Cycle timing:
//! - 2 cycles if branch not taken
//! - 3 cycles if branch taken to same page
//! - 4 cycles if branch taken to different page

use crate::addressing::pages_differ;
use crate::{MemoryBus, Operand, Operation, CPU};

/// Returns the cycles to add to the base cost of 2.
pub(crate) fn branch<M: MemoryBus>(cpu: &mut CPU<M>, operation: Operation, operand: Operand) -> u8 {
    let p = cpu.regs.p;
    let taken = match operation {
        Operation::Bcc => !p.c,
        Operation::Bcs => p.c,
        Operation::Bne => !p.z,
        Operation::Beq => p.z,
        Operation::Bpl => !p.n,
        Operation::Bmi => p.n,
        Operation::Bvc => !p.v,
        Operation::Bvs => p.v,
        _ => unreachable!("{} is not a branch", operation),
    };

    if !taken {
        return 0;
    }

    let offset = match operand {
        Operand::Relative(offset) => offset,
        _ => unreachable!("branch without a relative operand: {:?}", operand),
    };

    let next = cpu.regs.pc;
    let target = next.wrapping_add_signed(offset as i16);
    cpu.regs.pc = target;

    if pages_differ(next, target) {
        2
    } else {
        1
    }
}

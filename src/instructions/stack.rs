//! # Stack Operations
//!
//! PHA, PHP, PLA, PLP. The stack lives at 0x0100-0x01FF and grows
//! downward; SP wraps within the page without any overflow detection.

use crate::{MemoryBus, Operation, CPU};

pub(crate) fn stack<M: MemoryBus>(cpu: &mut CPU<M>, operation: Operation) {
    match operation {
        Operation::Pha => cpu.push(cpu.regs.a),
        // PHP always pushes with B and bit 5 set
        Operation::Php => cpu.push(cpu.regs.p.to_byte(true)),
        Operation::Pla => {
            let value = cpu.pull();
            cpu.regs.a = value;
            cpu.regs.p.set_zn(value);
        }
        Operation::Plp => {
            let value = cpu.pull();
            cpu.regs.p.load_byte(value);
        }
        _ => unreachable!("{} is not a stack operation", operation),
    }
}

//! # Register Transfer Instructions
//!
//! TAX, TAY, TXA, TYA, TSX set Z/N from the copied value. TXS is the
//! exception: loading SP never touches the flags.

use crate::{MemoryBus, Operation, CPU};

pub(crate) fn transfer<M: MemoryBus>(cpu: &mut CPU<M>, operation: Operation) {
    let regs = &mut cpu.regs;

    let value = match operation {
        Operation::Tax => {
            regs.x = regs.a;
            regs.x
        }
        Operation::Tay => {
            regs.y = regs.a;
            regs.y
        }
        Operation::Txa => {
            regs.a = regs.x;
            regs.a
        }
        Operation::Tya => {
            regs.a = regs.y;
            regs.a
        }
        Operation::Tsx => {
            regs.x = regs.sp;
            regs.x
        }
        Operation::Txs => {
            regs.sp = regs.x;
            return;
        }
        _ => unreachable!("{} is not a transfer", operation),
    };

    regs.p.set_zn(value);
}

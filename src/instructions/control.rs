//! # Control Flow Instructions
//!
//! - JMP: absolute or indirect jump
//! - JSR / RTS: subroutine call and return
//! - RTI: return from interrupt
//! - BRK: software interrupt
//!
//! ## Stack convention
//!
//! Pushes write at 0x0100 | SP and then decrement SP; pulls increment first.
//! JSR pushes the address of its own last byte, high byte first, so the
//! word sits little-endian in memory. RTS pulls it and adds one.

use crate::registers::IRQ_VECTOR;
use crate::{MemoryBus, Operand, CPU};

pub(crate) fn jmp<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    cpu.regs.pc = operand.effective_address();
}

/// JSR: PC already points past the operand, so the pushed value is PC - 1.
pub(crate) fn jsr<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    let target = operand.effective_address();
    let return_addr = cpu.regs.pc.wrapping_sub(1);

    cpu.push_word(return_addr);
    cpu.regs.pc = target;
}

pub(crate) fn rts<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.regs.pc = cpu.pull_word().wrapping_add(1);
}

/// RTI: pull status (B and bit 5 discarded), then PC. No +1, unlike RTS.
pub(crate) fn rti<M: MemoryBus>(cpu: &mut CPU<M>) {
    let status = cpu.pull();
    cpu.regs.p.load_byte(status);
    cpu.regs.pc = cpu.pull_word();
}

/// BRK: skips a padding byte, pushes PC and status with B set, sets I and
/// jumps through the IRQ vector. D is left as it was (NMOS behaviour).
pub(crate) fn brk<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.regs.pc = cpu.regs.pc.wrapping_add(1);
    cpu.enter_interrupt(IRQ_VECTOR, true);
}

//! # 6502 Instruction Implementations
//!
//! Operation semantics, one handler per operation family. The executor has
//! already fetched the opcode and resolved the operand, so every handler only
//! computes the result, writes it back and updates the flags its family
//! defines.
//!
//! ## Categories
//!
//! - **load_store**: LDA, LDX, LDY, STA, STX, STY
//! - **alu**: ADC, SBC, AND, ORA, EOR, BIT, CMP, CPX, CPY
//! - **shifts**: ASL, LSR, ROL, ROR
//! - **inc_dec**: INC, DEC, INX, INY, DEX, DEY
//! - **branches**: BCC, BCS, BEQ, BNE, BMI, BPL, BVC, BVS
//! - **control**: JMP, JSR, RTS, RTI, BRK, NOP
//! - **stack**: PHA, PHP, PLA, PLP
//! - **flags**: CLC, SEC, CLI, SEI, CLD, SED, CLV
//! - **transfer**: TAX, TAY, TXA, TYA, TSX, TXS

mod alu;
mod branches;
mod control;
mod flags;
mod inc_dec;
mod load_store;
mod shifts;
mod stack;
mod transfer;

use crate::{MemoryBus, Operand, Operation, CPU};

/// Performs `operation` and returns any cycles owed on top of the table's
/// base cost (currently only taken branches).
pub(crate) fn execute<M: MemoryBus>(
    cpu: &mut CPU<M>,
    operation: Operation,
    operand: Operand,
) -> u8 {
    use Operation::*;

    match operation {
        Lda | Ldx | Ldy => load_store::load(cpu, operation, operand),
        Sta | Stx | Sty => load_store::store(cpu, operation, operand),

        Adc => alu::adc(cpu, operand),
        Sbc => alu::sbc(cpu, operand),
        And | Ora | Eor => alu::logical(cpu, operation, operand),
        Bit => alu::bit(cpu, operand),
        Cmp | Cpx | Cpy => alu::compare(cpu, operation, operand),

        Asl | Lsr | Rol | Ror => shifts::shift(cpu, operation, operand),

        Inc | Dec => inc_dec::memory(cpu, operation, operand),
        Inx | Iny | Dex | Dey => inc_dec::register(cpu, operation),

        Bcc | Bcs | Beq | Bne | Bmi | Bpl | Bvc | Bvs => {
            return branches::branch(cpu, operation, operand)
        }

        Jmp => control::jmp(cpu, operand),
        Jsr => control::jsr(cpu, operand),
        Rts => control::rts(cpu),
        Rti => control::rti(cpu),
        Brk => control::brk(cpu),
        Nop | Illegal => {}

        Pha | Php | Pla | Plp => stack::stack(cpu, operation),

        Clc | Sec | Cli | Sei | Cld | Sed | Clv => flags::flag(cpu, operation),

        Tax | Tay | Txa | Tya | Tsx | Txs => transfer::transfer(cpu, operation),
    }

    0
}

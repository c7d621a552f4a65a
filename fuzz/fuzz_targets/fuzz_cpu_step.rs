//! Fuzz target for instruction execution.
//!
//! Seeds the register file, zero page, stack page and a short program with
//! arbitrary bytes, then steps through it under every illegal-opcode policy.
//! Nothing may panic, and every step must charge a cycle count the decoder
//! allows.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use nmos6502::{decode, CpuConfig, ExecutionError, FlatMemory, IllegalOpcodePolicy, MemoryBus, CPU};

#[derive(Debug, Arbitrary)]
enum FuzzPolicy {
    Halt,
    NoOp,
    Report,
}

impl From<FuzzPolicy> for IllegalOpcodePolicy {
    fn from(policy: FuzzPolicy) -> Self {
        match policy {
            FuzzPolicy::Halt => IllegalOpcodePolicy::Halt,
            FuzzPolicy::NoOp => IllegalOpcodePolicy::NoOp,
            FuzzPolicy::Report => IllegalOpcodePolicy::Report,
        }
    }
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    a: u8,
    x: u8,
    y: u8,
    sp: u8,
    status: u8,
    policy: FuzzPolicy,
    decimal_mode: bool,
    nmi: bool,
    zero_page: [u8; 256],
    stack_page: [u8; 256],
    program: [u8; 32],
}

fuzz_target!(|input: FuzzInput| {
    let mut memory = FlatMemory::new();
    memory.write_word(0xFFFC, 0x8000);
    memory.write_word(0xFFFE, 0x8000);
    memory.write_word(0xFFFA, 0x8000);
    memory.load(0x0000, &input.zero_page);
    memory.load(0x0100, &input.stack_page);
    memory.load(0x8000, &input.program);

    let config = CpuConfig {
        illegal_opcode: input.policy.into(),
        decimal_mode: input.decimal_mode,
    };
    let mut cpu = CPU::with_config(memory, config);
    cpu.set_reporter(|_| {});

    cpu.set_a(input.a);
    cpu.set_x(input.x);
    cpu.set_y(input.y);
    cpu.set_sp(input.sp);
    cpu.set_flag_n(input.status & 0x80 != 0);
    cpu.set_flag_v(input.status & 0x40 != 0);
    cpu.set_flag_d(input.status & 0x08 != 0);
    cpu.set_flag_i(input.status & 0x04 != 0);
    cpu.set_flag_z(input.status & 0x02 != 0);
    cpu.set_flag_c(input.status & 0x01 != 0);
    if input.nmi {
        cpu.trigger_nmi();
    }

    for _ in 0..32 {
        let opcode = cpu.peek(cpu.pc());
        let metadata = decode(opcode);
        let before = cpu.cycles();

        match cpu.step() {
            Ok(cycles) => {
                // base, +1 page cross or +2 taken branch, +7 interrupt entry
                let base = metadata.base_cycles as u32;
                assert!(cycles >= base);
                assert!(cycles <= base + 2 + 7);
                assert_eq!(cpu.cycles(), before + cycles as u64);
            }
            Err(ExecutionError::IllegalOpcode(diag)) => {
                assert!(metadata.is_illegal());
                assert_eq!(diag.opcode, opcode);
                assert_eq!(cpu.pc(), diag.pc);
                assert!(cpu.is_halted());
                break;
            }
            Err(ExecutionError::Halted { .. }) => unreachable!("stepped after halting"),
        }
    }
});

//! Tests for the eight conditional branches and their cycle penalties.

use nmos6502::{FlatMemory, MemoryBus, CPU};

fn setup_cpu(program: &[u8]) -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write_word(0xFFFC, 0x8000);
    memory.load(0x8000, program);
    CPU::new(memory)
}

#[test]
fn test_branch_not_taken() {
    let mut cpu = setup_cpu(&[0xF0, 0x10]); // BEQ +16
    cpu.set_flag_z(false);

    assert_eq!(cpu.step().unwrap(), 2);
    assert_eq!(cpu.pc(), 0x8002);
}

#[test]
fn test_branch_taken_same_page() {
    let mut cpu = setup_cpu(&[0xD0, 0x10]); // BNE +16

    assert_eq!(cpu.step().unwrap(), 3);
    assert_eq!(cpu.pc(), 0x8012);
}

#[test]
fn test_branch_taken_backward_across_page() {
    let mut cpu = setup_cpu(&[0x90, 0xFC]); // BCC -4

    // 0x8002 - 4 = 0x7FFE
    assert_eq!(cpu.step().unwrap(), 4);
    assert_eq!(cpu.pc(), 0x7FFE);
}

#[test]
fn test_branch_taken_forward_across_page() {
    let mut cpu = setup_cpu(&[]);
    cpu.memory_mut().load(0x80FD, &[0xB0, 0x05]); // BCS +5
    cpu.set_pc(0x80FD);
    cpu.set_flag_c(true);

    // next instruction at 0x80FF, target 0x8104
    assert_eq!(cpu.step().unwrap(), 4);
    assert_eq!(cpu.pc(), 0x8104);
}

#[test]
fn test_branch_to_self_offset() {
    let mut cpu = setup_cpu(&[0x10, 0xFE]); // BPL -2

    assert_eq!(cpu.step().unwrap(), 3);
    assert_eq!(cpu.pc(), 0x8000);
}

#[test]
fn test_each_branch_condition() {
    // (opcode, flag setter, flag value that takes the branch)
    let cases: [(u8, fn(&mut CPU<FlatMemory>, bool), bool); 8] = [
        (0x10, CPU::set_flag_n, false), // BPL
        (0x30, CPU::set_flag_n, true),  // BMI
        (0x50, CPU::set_flag_v, false), // BVC
        (0x70, CPU::set_flag_v, true),  // BVS
        (0x90, CPU::set_flag_c, false), // BCC
        (0xB0, CPU::set_flag_c, true),  // BCS
        (0xD0, CPU::set_flag_z, false), // BNE
        (0xF0, CPU::set_flag_z, true),  // BEQ
    ];

    for (opcode, set_flag, take) in cases {
        let mut cpu = setup_cpu(&[opcode, 0x04]);
        set_flag(&mut cpu, take);
        assert_eq!(cpu.step().unwrap(), 3, "opcode 0x{:02X} taken", opcode);
        assert_eq!(cpu.pc(), 0x8006);

        let mut cpu = setup_cpu(&[opcode, 0x04]);
        set_flag(&mut cpu, !take);
        assert_eq!(cpu.step().unwrap(), 2, "opcode 0x{:02X} not taken", opcode);
        assert_eq!(cpu.pc(), 0x8002);
    }
}

#[test]
fn test_branches_leave_flags_alone() {
    let mut cpu = setup_cpu(&[0x30, 0x02]); // BMI +2
    cpu.set_flag_n(true);
    cpu.set_flag_c(true);
    let before = cpu.flags();

    cpu.step().unwrap();

    assert_eq!(cpu.flags(), before);
}

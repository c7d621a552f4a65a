//! Tests for construction, reset and power-on.

use nmos6502::{CpuConfig, FlatMemory, IllegalOpcodePolicy, MemoryBus, Status, CPU};

fn setup_cpu(program: &[u8]) -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write_word(0xFFFC, 0x8000);
    memory.load(0x8000, program);
    CPU::new(memory)
}

#[test]
fn test_new_reads_reset_vector() {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x34);
    memory.write(0xFFFD, 0x12);

    let cpu = CPU::new(memory);

    assert_eq!(cpu.pc(), 0x1234);
    assert_eq!(cpu.sp(), 0xFD);
    assert_eq!(cpu.flags(), Status::default());
    assert_eq!(cpu.status(), 0x20);
    assert_eq!(cpu.cycles(), 0);
}

#[test]
fn test_reset_keeps_memory_and_clears_registers() {
    let mut cpu = setup_cpu(&[0xA9, 0xFF, 0xAA, 0x78]); // LDA #$FF; TAX; SEI
    cpu.run_instructions(3).unwrap();
    assert_eq!(cpu.x(), 0xFF);
    assert!(cpu.flag_i());

    cpu.reset();

    assert_eq!(cpu.pc(), 0x8000);
    assert_eq!((cpu.a(), cpu.x(), cpu.y()), (0, 0, 0));
    assert_eq!(cpu.sp(), 0xFD);
    assert_eq!(cpu.flags(), Status::default());
    assert_eq!(cpu.cycles(), 0);
    assert_eq!(cpu.peek(0x8000), 0xA9);
}

#[test]
fn test_reset_follows_new_vector() {
    let mut cpu = setup_cpu(&[]);
    cpu.memory_mut().write_word(0xFFFC, 0xC000);

    cpu.reset();

    assert_eq!(cpu.pc(), 0xC000);
}

#[test]
fn test_power_on_then_load() {
    let mut cpu = setup_cpu(&[0xA9, 0x01]);
    cpu.power_on();
    assert!(cpu.memory().as_slice().iter().all(|&b| b == 0));
    assert_eq!(cpu.pc(), 0x0000);

    cpu.memory_mut().write_word(0xFFFC, 0x0600);
    cpu.memory_mut().load(0x0600, &[0xA2, 0x42]);
    cpu.reset();
    cpu.step().unwrap();

    assert_eq!(cpu.x(), 0x42);
}

#[test]
fn test_with_config_is_kept() {
    let config = CpuConfig {
        illegal_opcode: IllegalOpcodePolicy::Report,
        decimal_mode: false,
    };
    let mut cpu = CPU::with_config(FlatMemory::new(), config);
    cpu.reset();

    assert_eq!(*cpu.config(), config);
}

#[test]
fn test_into_memory() {
    let mut cpu = setup_cpu(&[0x85, 0x10]); // STA $10
    cpu.set_a(0x99);
    cpu.step().unwrap();

    let memory = cpu.into_memory();

    assert_eq!(memory.read(0x0010), 0x99);
}

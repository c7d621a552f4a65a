//! Tests for AND, ORA, EOR and BIT.

use nmos6502::{FlatMemory, MemoryBus, CPU};

fn setup_cpu(program: &[u8]) -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write_word(0xFFFC, 0x8000);
    memory.load(0x8000, program);
    CPU::new(memory)
}

// ========== AND / ORA / EOR ==========

#[test]
fn test_and_immediate() {
    let mut cpu = setup_cpu(&[0x29, 0x0F]);
    cpu.set_a(0xF5);

    assert_eq!(cpu.step().unwrap(), 2);
    assert_eq!(cpu.a(), 0x05);
    assert!(!cpu.flag_z());
    assert!(!cpu.flag_n());
}

#[test]
fn test_and_to_zero() {
    let mut cpu = setup_cpu(&[0x25, 0x10]);
    cpu.set_a(0xF0);
    cpu.memory_mut().write(0x0010, 0x0F);

    assert_eq!(cpu.step().unwrap(), 3);
    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_z());
}

#[test]
fn test_ora_sets_negative() {
    let mut cpu = setup_cpu(&[0x09, 0x80]);
    cpu.set_a(0x01);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x81);
    assert!(cpu.flag_n());
}

#[test]
fn test_ora_indirect_y_page_cross() {
    let mut cpu = setup_cpu(&[0x11, 0x20]);
    cpu.set_y(0x80);
    cpu.memory_mut().write_word(0x0020, 0x10C0);
    cpu.memory_mut().write(0x1140, 0x3C);

    assert_eq!(cpu.step().unwrap(), 6);
    assert_eq!(cpu.a(), 0x3C);
}

#[test]
fn test_eor_self_cancels() {
    let mut cpu = setup_cpu(&[0x49, 0xA5]);
    cpu.set_a(0xA5);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_z());
    assert!(!cpu.flag_n());
}

#[test]
fn test_eor_absolute_x() {
    let mut cpu = setup_cpu(&[0x5D, 0x00, 0x40]);
    cpu.set_a(0xFF);
    cpu.set_x(0x05);
    cpu.memory_mut().write(0x4005, 0x0F);

    assert_eq!(cpu.step().unwrap(), 4);
    assert_eq!(cpu.a(), 0xF0);
    assert!(cpu.flag_n());
}

// ========== BIT ==========

#[test]
fn test_bit_copies_bits_7_and_6() {
    let mut cpu = setup_cpu(&[0x24, 0x40]);
    cpu.set_a(0xFF);
    cpu.memory_mut().write(0x0040, 0xC0);

    assert_eq!(cpu.step().unwrap(), 3);
    assert!(cpu.flag_n());
    assert!(cpu.flag_v());
    assert!(!cpu.flag_z());
    assert_eq!(cpu.a(), 0xFF);
}

#[test]
fn test_bit_zero_from_mask() {
    let mut cpu = setup_cpu(&[0x2C, 0x00, 0x30]);
    cpu.set_a(0x0F);
    cpu.set_flag_n(true);
    cpu.set_flag_v(true);
    cpu.memory_mut().write(0x3000, 0x30);

    assert_eq!(cpu.step().unwrap(), 4);
    assert!(cpu.flag_z());
    assert!(!cpu.flag_n());
    assert!(!cpu.flag_v());
}

//! Tests for ADC (Add with Carry), binary and decimal.

use nmos6502::{CpuConfig, FlatMemory, MemoryBus, CPU};

fn setup_cpu(program: &[u8]) -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write_word(0xFFFC, 0x8000);
    memory.load(0x8000, program);
    CPU::new(memory)
}

/// Runs `ADC #operand` with the given A and carry
fn adc_immediate(a: u8, operand: u8, carry: bool) -> CPU<FlatMemory> {
    let mut cpu = setup_cpu(&[0x69, operand]);
    cpu.set_a(a);
    cpu.set_flag_c(carry);
    assert_eq!(cpu.step().unwrap(), 2);
    cpu
}

// ========== Binary Mode ==========

#[test]
fn test_adc_simple_sum() {
    let cpu = adc_immediate(0x10, 0x05, false);

    assert_eq!(cpu.a(), 0x15);
    assert!(!cpu.flag_c());
    assert!(!cpu.flag_z());
    assert!(!cpu.flag_v());
    assert!(!cpu.flag_n());
}

#[test]
fn test_adc_adds_carry_in() {
    let cpu = adc_immediate(0x10, 0x05, true);
    assert_eq!(cpu.a(), 0x16);
}

#[test]
fn test_adc_carry_out_and_zero() {
    let cpu = adc_immediate(0xFF, 0x01, false);

    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_c());
    assert!(cpu.flag_z());
    assert!(!cpu.flag_v());
}

#[test]
fn test_adc_signed_overflow_positive() {
    // 0x50 + 0x50 = 0xA0: two positives give a negative
    let cpu = adc_immediate(0x50, 0x50, false);

    assert_eq!(cpu.a(), 0xA0);
    assert!(cpu.flag_v());
    assert!(cpu.flag_n());
    assert!(!cpu.flag_c());
}

#[test]
fn test_adc_signed_overflow_negative() {
    // 0xD0 + 0x90 = 0x160: two negatives give a positive
    let cpu = adc_immediate(0xD0, 0x90, false);

    assert_eq!(cpu.a(), 0x60);
    assert!(cpu.flag_v());
    assert!(cpu.flag_c());
    assert!(!cpu.flag_n());
}

#[test]
fn test_adc_mixed_signs_never_overflow() {
    let cpu = adc_immediate(0x50, 0xD0, false);

    assert_eq!(cpu.a(), 0x20);
    assert!(!cpu.flag_v());
    assert!(cpu.flag_c());
}

#[test]
fn test_adc_absolute_y_page_cross() {
    let mut cpu = setup_cpu(&[0x79, 0xFF, 0x12]);
    cpu.set_y(0x01);
    cpu.memory_mut().write(0x1300, 0x01);

    assert_eq!(cpu.step().unwrap(), 5);
    assert_eq!(cpu.a(), 0x01);
}

// ========== Decimal Mode ==========

fn adc_decimal(a: u8, operand: u8, carry: bool) -> CPU<FlatMemory> {
    let mut cpu = setup_cpu(&[0x69, operand]);
    cpu.set_flag_d(true);
    cpu.set_a(a);
    cpu.set_flag_c(carry);
    cpu.step().unwrap();
    cpu
}

#[test]
fn test_adc_decimal_simple() {
    let cpu = adc_decimal(0x15, 0x27, false);

    assert_eq!(cpu.a(), 0x42);
    assert!(!cpu.flag_c());
}

#[test]
fn test_adc_decimal_carry_out() {
    let cpu = adc_decimal(0x58, 0x46, true);

    // 58 + 46 + 1 = 105
    assert_eq!(cpu.a(), 0x05);
    assert!(cpu.flag_c());
    // N and V come from the high nibble before its BCD adjustment (0xA)
    assert!(cpu.flag_n());
    assert!(cpu.flag_v());
}

#[test]
fn test_adc_decimal_negative_and_overflow_from_intermediate() {
    let cpu = adc_decimal(0x79, 0x00, true);

    // 79 + 00 + 1 = 80
    assert_eq!(cpu.a(), 0x80);
    assert!(!cpu.flag_c());
    assert!(!cpu.flag_z());
    assert!(cpu.flag_n());
    assert!(cpu.flag_v());
}

#[test]
fn test_adc_decimal_clears_negative_and_overflow() {
    let mut cpu = setup_cpu(&[0x69, 0x27]);
    cpu.set_flag_d(true);
    cpu.set_flag_n(true);
    cpu.set_flag_v(true);
    cpu.set_a(0x15);
    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x42);
    assert!(!cpu.flag_n());
    assert!(!cpu.flag_v());
}

#[test]
fn test_adc_decimal_99_plus_1_wraps_to_zero() {
    let cpu = adc_decimal(0x99, 0x01, false);

    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_c());
    // NMOS takes Z from the binary sum (0x9A)
    assert!(!cpu.flag_z());
}

#[test]
fn test_adc_decimal_disabled_is_binary() {
    let config = CpuConfig {
        decimal_mode: false,
        ..CpuConfig::default()
    };
    let mut memory = FlatMemory::new();
    memory.write_word(0xFFFC, 0x8000);
    memory.load(0x8000, &[0x69, 0x27]);
    let mut cpu = CPU::with_config(memory, config);
    cpu.set_flag_d(true);
    cpu.set_a(0x15);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x3C);
    assert!(cpu.flag_d());
}

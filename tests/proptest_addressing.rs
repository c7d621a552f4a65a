//! Property-based tests for operand resolution.

use nmos6502::{resolve, AddressingMode, FlatMemory, MemoryBus, Operand, Registers, CPU};
use proptest::prelude::*;

fn regs_at(pc: u16, x: u8, y: u8) -> Registers {
    Registers {
        pc,
        x,
        y,
        ..Registers::default()
    }
}

proptest! {
    #[test]
    fn prop_zero_page_x_wraps(base in any::<u8>(), x in any::<u8>()) {
        let mut memory = FlatMemory::new();
        memory.write(0x0200, base);
        let mut regs = regs_at(0x0200, x, 0);

        let operand = resolve(AddressingMode::ZeroPageX, &mut regs, &memory);

        prop_assert_eq!(operand.address(), Some(base.wrapping_add(x) as u16));
        prop_assert!(!operand.page_crossed());
        prop_assert_eq!(regs.pc, 0x0201);
    }

    #[test]
    fn prop_absolute_x_page_cross(base in any::<u16>(), x in any::<u8>()) {
        let mut memory = FlatMemory::new();
        memory.write_word(0x0200, base);
        let mut regs = regs_at(0x0200, x, 0);

        let operand = resolve(AddressingMode::AbsoluteX, &mut regs, &memory);
        let effective = base.wrapping_add(x as u16);

        prop_assert_eq!(operand.address(), Some(effective));
        prop_assert_eq!(
            operand.page_crossed(),
            (base & 0xFF00) != (effective & 0xFF00)
        );
        prop_assert_eq!(regs.pc, 0x0202);
    }

    #[test]
    fn prop_indirect_y_adds_after_dereference(
        zp in any::<u8>(),
        pointer in any::<u16>(),
        y in any::<u8>(),
    ) {
        let mut memory = FlatMemory::new();
        memory.write(0x0300, zp);
        memory.write(zp as u16, (pointer & 0xFF) as u8);
        memory.write(zp.wrapping_add(1) as u16, (pointer >> 8) as u8);
        let mut regs = regs_at(0x0300, 0, y);

        let operand = resolve(AddressingMode::IndirectY, &mut regs, &memory);

        prop_assert_eq!(operand.address(), Some(pointer.wrapping_add(y as u16)));
    }

    #[test]
    fn prop_relative_offset_is_signed(offset in any::<u8>()) {
        let mut memory = FlatMemory::new();
        memory.write(0x4000, offset);
        let mut regs = regs_at(0x4000, 0, 0);

        let operand = resolve(AddressingMode::Relative, &mut regs, &memory);

        prop_assert_eq!(operand, Operand::Relative(offset as i8));
    }

    #[test]
    fn prop_lda_absolute_x_cycles(
        base in 0x0200u16..0x7F00,
        x in any::<u8>(),
        value in any::<u8>(),
    ) {
        let mut memory = FlatMemory::new();
        memory.write_word(0xFFFC, 0x8000);
        memory.load(0x8000, &[0xBD, (base & 0xFF) as u8, (base >> 8) as u8]);
        let effective = base.wrapping_add(x as u16);
        memory.write(effective, value);

        let mut cpu = CPU::new(memory);
        cpu.set_x(x);
        let cycles = cpu.step().unwrap();

        let expected = if (base & 0xFF00) != (effective & 0xFF00) { 5 } else { 4 };
        prop_assert_eq!(cycles, expected);
        prop_assert_eq!(cpu.a(), value);
    }
}

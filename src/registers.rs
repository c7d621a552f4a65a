//! # Register File
//!
//! Program counter, stack pointer, the A/X/Y registers and the processor
//! status flags.
//!
//! Flags are kept as seven independent `bool` fields and only packed into the
//! hardware byte layout when pushed to the stack or inspected:
//!
//! ```text
//!  7  6  5  4  3  2  1  0
//!  N  V  -  B  D  I  Z  C
//! ```
//!
//! Bit 5 is unused and always reads as 1.

use crate::MemoryBus;

/// NMI vector address.
pub const NMI_VECTOR: u16 = 0xFFFA;

/// Reset vector address.
pub const RESET_VECTOR: u16 = 0xFFFC;

/// IRQ/BRK vector address.
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// Base address of the stack page.
pub const STACK_PAGE: u16 = 0x0100;

/// Stack pointer value after reset.
pub const RESET_SP: u8 = 0xFD;

/// Carry flag mask.
pub const FLAG_C: u8 = 0b0000_0001;
/// Zero flag mask.
pub const FLAG_Z: u8 = 0b0000_0010;
/// Interrupt disable flag mask.
pub const FLAG_I: u8 = 0b0000_0100;
/// Decimal mode flag mask.
pub const FLAG_D: u8 = 0b0000_1000;
/// Break flag mask (only meaningful in a pushed status byte).
pub const FLAG_B: u8 = 0b0001_0000;
/// Unused bit, always set when packed.
pub const FLAG_U: u8 = 0b0010_0000;
/// Overflow flag mask.
pub const FLAG_V: u8 = 0b0100_0000;
/// Negative flag mask.
pub const FLAG_N: u8 = 0b1000_0000;

/// Processor status flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Status {
    /// Carry (unsigned overflow / no borrow)
    pub c: bool,
    /// Zero (result was zero)
    pub z: bool,
    /// Interrupt disable (blocks IRQ)
    pub i: bool,
    /// Decimal mode (BCD arithmetic for ADC/SBC)
    pub d: bool,
    /// Break (set by BRK/PHP in the pushed copy)
    pub b: bool,
    /// Overflow (signed overflow)
    pub v: bool,
    /// Negative (bit 7 of result)
    pub n: bool,
}

impl Status {
    /// Sets Z and N from a result byte.
    ///
    /// Shared by every load, transfer, logical and arithmetic operation.
    pub fn set_zn(&mut self, value: u8) {
        self.z = value == 0;
        self.n = value & 0x80 != 0;
    }

    /// Packs the flags into the hardware byte layout.
    ///
    /// `brk` selects the value of bit 4: set for BRK/PHP, clear for IRQ/NMI.
    /// Bit 5 is always set.
    ///
    /// # Examples
    ///
    /// ```
    /// use nmos6502::Status;
    ///
    /// let status = Status { c: true, n: true, ..Status::default() };
    /// assert_eq!(status.to_byte(false), 0b1010_0001);
    /// assert_eq!(status.to_byte(true), 0b1011_0001);
    /// ```
    pub fn to_byte(&self, brk: bool) -> u8 {
        let mut byte = FLAG_U;
        if self.n {
            byte |= FLAG_N;
        }
        if self.v {
            byte |= FLAG_V;
        }
        if brk {
            byte |= FLAG_B;
        }
        if self.d {
            byte |= FLAG_D;
        }
        if self.i {
            byte |= FLAG_I;
        }
        if self.z {
            byte |= FLAG_Z;
        }
        if self.c {
            byte |= FLAG_C;
        }
        byte
    }

    /// Unpacks a byte pulled from the stack (PLP/RTI).
    ///
    /// Bits 4 and 5 do not exist in the register, so the B flag is left as
    /// it was.
    pub fn load_byte(&mut self, byte: u8) {
        self.n = byte & FLAG_N != 0;
        self.v = byte & FLAG_V != 0;
        self.d = byte & FLAG_D != 0;
        self.i = byte & FLAG_I != 0;
        self.z = byte & FLAG_Z != 0;
        self.c = byte & FLAG_C != 0;
    }
}

/// CPU register file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Registers {
    /// Accumulator
    pub a: u8,
    /// X index register
    pub x: u8,
    /// Y index register
    pub y: u8,
    /// Program counter (address of the next byte to fetch)
    pub pc: u16,
    /// Stack pointer (offset into the stack page)
    pub sp: u8,
    /// Status flags
    pub p: Status,
}

impl Registers {
    /// Puts the registers into the power-up state.
    ///
    /// PC is loaded from the reset vector at 0xFFFC/0xFFFD, SP is set to
    /// 0xFD, and A/X/Y and every flag are cleared.
    pub fn reset<M: MemoryBus>(&mut self, memory: &M) {
        *self = Self {
            pc: memory.read_word(RESET_VECTOR),
            sp: RESET_SP,
            ..Self::default()
        };
    }

    /// Full stack address for the current SP.
    pub fn stack_addr(&self) -> u16 {
        STACK_PAGE | self.sp as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FlatMemory;

    #[test]
    fn test_reset_loads_vector_and_clears_state() {
        let mut mem = FlatMemory::new();
        mem.write_word(RESET_VECTOR, 0x4242);

        let mut regs = Registers {
            a: 1,
            x: 2,
            y: 3,
            pc: 0x1111,
            sp: 0x00,
            p: Status {
                c: true,
                z: true,
                i: true,
                d: true,
                b: true,
                v: true,
                n: true,
            },
        };
        regs.reset(&mem);

        assert_eq!(regs.pc, 0x4242);
        assert_eq!(regs.sp, RESET_SP);
        assert_eq!((regs.a, regs.x, regs.y), (0, 0, 0));
        assert_eq!(regs.p, Status::default());
    }

    #[test]
    fn test_set_zn_for_every_value() {
        let mut status = Status::default();
        for value in 0..=255u8 {
            status.set_zn(value);
            assert_eq!(status.z, value == 0);
            assert_eq!(status.n, value >= 0x80);
        }
    }

    #[test]
    fn test_status_byte_round_trip_ignores_break_and_unused() {
        let mut status = Status::default();
        status.load_byte(0xFF);

        assert!(status.c && status.z && status.i);
        assert!(status.d && status.v && status.n);
        assert!(!status.b);
        assert_eq!(status.to_byte(false), 0xEF);
        assert_eq!(status.to_byte(true), 0xFF);
    }

    #[test]
    fn test_empty_status_packs_unused_bit() {
        assert_eq!(Status::default().to_byte(false), FLAG_U);
    }

    #[test]
    fn test_stack_addr() {
        let regs = Registers {
            sp: 0xFD,
            ..Registers::default()
        };
        assert_eq!(regs.stack_addr(), 0x01FD);
    }
}

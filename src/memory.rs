//! # Address Space
//!
//! This module provides the `MemoryBus` trait through which the CPU sees its
//! 64 KiB address space, and `FlatMemory`, a plain zero-filled implementation.
//!
//! ## Design Principles
//!
//! The bus follows 6502 hardware behavior:
//! - Addresses are `u16`, so every access is inside the space by construction
//! - No bus errors - reads and writes always succeed
//! - Words are little-endian and wrap from 0xFFFF to 0x0000
//! - Zero page and the stack page are ordinary addresses; only the
//!   addressing logic treats them specially

/// Size of the 16-bit address space in bytes.
pub const ADDRESS_SPACE_SIZE: usize = 0x1_0000;

/// Byte-addressable memory as seen by the CPU.
///
/// Implementors provide `read` and `write`; word access, clearing and the IRQ
/// line have default implementations built on top of them.
///
/// # Examples
///
/// ```
/// use nmos6502::{FlatMemory, MemoryBus};
///
/// let mut mem = FlatMemory::new();
/// mem.write_word(0x1234, 0xBEEF);
///
/// assert_eq!(mem.read(0x1234), 0xEF); // low byte first
/// assert_eq!(mem.read(0x1235), 0xBE);
/// assert_eq!(mem.read_word(0x1234), 0xBEEF);
/// ```
///
/// ## Implementing Custom Memory
///
/// ```
/// use nmos6502::MemoryBus;
///
/// struct RomRamMemory {
///     ram: [u8; 0x8000],
///     rom: [u8; 0x8000],
/// }
///
/// impl MemoryBus for RomRamMemory {
///     fn read(&self, addr: u16) -> u8 {
///         if addr < 0x8000 {
///             self.ram[addr as usize]
///         } else {
///             self.rom[(addr - 0x8000) as usize]
///         }
///     }
///
///     fn write(&mut self, addr: u16, value: u8) {
///         // Writes to ROM are silently ignored
///         if addr < 0x8000 {
///             self.ram[addr as usize] = value;
///         }
///     }
/// }
/// ```
pub trait MemoryBus {
    /// Reads a byte from the specified address.
    ///
    /// Must never panic. Unmapped regions may return any value.
    fn read(&self, addr: u16) -> u8;

    /// Writes a byte to the specified address.
    ///
    /// Must never panic. Read-only or unmapped regions may ignore the write.
    fn write(&mut self, addr: u16, value: u8);

    /// Reads a little-endian word from `addr` and `addr + 1`.
    ///
    /// The high byte address wraps, so `read_word(0xFFFF)` combines 0xFFFF
    /// and 0x0000.
    fn read_word(&self, addr: u16) -> u16 {
        let lo = self.read(addr) as u16;
        let hi = self.read(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }

    /// Writes a little-endian word: low byte to `addr`, then high byte to
    /// `addr + 1` (wrapping).
    fn write_word(&mut self, addr: u16, value: u16) {
        self.write(addr, (value & 0xFF) as u8);
        self.write(addr.wrapping_add(1), (value >> 8) as u8);
    }

    /// Zero-fills the whole address space.
    fn clear(&mut self) {
        for addr in 0..=u16::MAX {
            self.write(addr, 0x00);
        }
    }

    /// Returns `true` while any device holds the IRQ line active.
    ///
    /// The line is level-sensitive: the CPU polls it after every instruction
    /// and services it whenever the I flag is clear. Plain memory has no
    /// interrupt sources, so the default is `false`.
    fn irq_active(&self) -> bool {
        false
    }
}

impl<M: MemoryBus + ?Sized> MemoryBus for &mut M {
    fn read(&self, addr: u16) -> u8 {
        (**self).read(addr)
    }

    fn write(&mut self, addr: u16, value: u8) {
        (**self).write(addr, value)
    }

    fn read_word(&self, addr: u16) -> u16 {
        (**self).read_word(addr)
    }

    fn write_word(&mut self, addr: u16, value: u16) {
        (**self).write_word(addr, value)
    }

    fn clear(&mut self) {
        (**self).clear()
    }

    fn irq_active(&self) -> bool {
        (**self).irq_active()
    }
}

/// Flat 64 KiB RAM covering the whole address space.
///
/// All addresses (0x0000-0xFFFF) are writable and start out zeroed.
///
/// # Examples
///
/// ```
/// use nmos6502::{CPU, FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.write_word(0xFFFC, 0x8000); // reset vector
/// memory.load(0x8000, &[0xA9, 0x42]); // LDA #$42
///
/// let cpu = CPU::new(memory);
/// assert_eq!(cpu.pc(), 0x8000);
/// ```
#[derive(Clone)]
pub struct FlatMemory {
    data: Box<[u8; ADDRESS_SPACE_SIZE]>,
}

impl FlatMemory {
    /// Creates a zero-filled address space.
    pub fn new() -> Self {
        Self {
            data: Box::new([0; ADDRESS_SPACE_SIZE]),
        }
    }

    /// Copies `bytes` into memory starting at `offset`, wrapping past 0xFFFF.
    pub fn load(&mut self, offset: u16, bytes: &[u8]) {
        let mut addr = offset;
        for &byte in bytes {
            self.data[addr as usize] = byte;
            addr = addr.wrapping_add(1);
        }
    }

    /// Borrows the raw backing store.
    pub fn as_slice(&self) -> &[u8] {
        &self.data[..]
    }
}

impl Default for FlatMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FlatMemory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlatMemory")
            .field("size", &ADDRESS_SPACE_SIZE)
            .finish()
    }
}

impl MemoryBus for FlatMemory {
    fn read(&self, addr: u16) -> u8 {
        self.data[addr as usize]
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.data[addr as usize] = value;
    }

    fn clear(&mut self) {
        self.data.fill(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_memory_read_write() {
        let mut mem = FlatMemory::new();

        assert_eq!(mem.read(0x0000), 0x00);
        assert_eq!(mem.read(0xFFFF), 0x00);

        mem.write(0x1234, 0x42);
        assert_eq!(mem.read(0x1234), 0x42);

        // Neighbours untouched
        assert_eq!(mem.read(0x1233), 0x00);
        assert_eq!(mem.read(0x1235), 0x00);
    }

    #[test]
    fn test_word_is_little_endian() {
        let mut mem = FlatMemory::new();
        mem.write_word(0x0200, 0x1234);

        assert_eq!(mem.read(0x0200), 0x34);
        assert_eq!(mem.read(0x0201), 0x12);
        assert_eq!(mem.read_word(0x0200), 0x1234);
    }

    #[test]
    fn test_word_wraps_at_top_of_space() {
        let mut mem = FlatMemory::new();
        mem.write_word(0xFFFF, 0xABCD);

        assert_eq!(mem.read(0xFFFF), 0xCD);
        assert_eq!(mem.read(0x0000), 0xAB);
        assert_eq!(mem.read_word(0xFFFF), 0xABCD);
    }

    #[test]
    fn test_load_wraps() {
        let mut mem = FlatMemory::new();
        mem.load(0xFFFE, &[1, 2, 3]);

        assert_eq!(mem.read(0xFFFE), 1);
        assert_eq!(mem.read(0xFFFF), 2);
        assert_eq!(mem.read(0x0000), 3);
    }

    #[test]
    fn test_clear_zero_fills() {
        let mut mem = FlatMemory::new();
        mem.write(0x0000, 0x11);
        mem.write(0x8000, 0x22);
        mem.write(0xFFFF, 0x33);

        mem.clear();

        assert!(mem.as_slice().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_borrowed_memory_is_a_bus() {
        fn poke<B: MemoryBus>(mut bus: B) {
            bus.write_word(0x10, 0xCAFE);
        }

        let mut mem = FlatMemory::new();
        poke(&mut mem);

        assert_eq!(mem.read(0x10), 0xFE);
        assert_eq!(mem.read_word(0x10), 0xCAFE);
    }
}

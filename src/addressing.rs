//! # Addressing Modes
//!
//! This module defines the 13 addressing modes of the 6502 and the resolver
//! that turns a mode plus the bytes following an opcode into an operand.
//!
//! Resolution reads the operand bytes at PC and advances PC past them. For
//! indexed modes it also reports whether the index addition crossed a page,
//! which is what the variable-cycle instructions charge for.

use crate::{MemoryBus, Registers};

/// 6502 addressing mode enumeration.
///
/// # Operand Sizes
///
/// - **0 bytes**: Implicit, Accumulator
/// - **1 byte**: Immediate, ZeroPage, ZeroPageX, ZeroPageY, Relative, IndirectX, IndirectY
/// - **2 bytes**: Absolute, AbsoluteX, AbsoluteY, Indirect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    /// No operand, operation implied by instruction.
    ///
    /// Examples: CLC, RTS, NOP
    Implicit,

    /// Operates directly on the accumulator register.
    ///
    /// Examples: LSR A, ROL A, ASL A
    Accumulator,

    /// 8-bit constant operand in instruction.
    ///
    /// Example: LDA #$10
    Immediate,

    /// 8-bit address in zero page (0x00-0xFF).
    ///
    /// Example: LDA $80
    ZeroPage,

    /// Zero page address indexed by X, wrapping within zero page.
    ///
    /// Example: LDA $80,X
    ZeroPageX,

    /// Zero page address indexed by Y, wrapping within zero page.
    ///
    /// Example: LDX $80,Y
    ZeroPageY,

    /// Signed 8-bit offset for branch instructions.
    ///
    /// Example: BEQ label
    Relative,

    /// Full 16-bit address.
    ///
    /// Example: JMP $1234
    Absolute,

    /// 16-bit address indexed by X register.
    ///
    /// Example: LDA $1234,X
    /// May incur +1 cycle penalty if page boundary is crossed.
    AbsoluteX,

    /// 16-bit address indexed by Y register.
    ///
    /// Example: LDA $1234,Y
    /// May incur +1 cycle penalty if page boundary is crossed.
    AbsoluteY,

    /// Indirect jump through 16-bit pointer. Only used by JMP.
    ///
    /// Example: JMP ($FFFC)
    Indirect,

    /// Indexed indirect: (ZP + X) then dereference.
    ///
    /// Example: LDA ($40,X)
    IndirectX,

    /// Indirect indexed: ZP dereference then + Y.
    ///
    /// Example: LDA ($40),Y
    /// May incur +1 cycle penalty if page boundary is crossed.
    IndirectY,
}

impl AddressingMode {
    /// Number of operand bytes following the opcode.
    pub const fn operand_bytes(self) -> u8 {
        match self {
            AddressingMode::Implicit | AddressingMode::Accumulator => 0,
            AddressingMode::Immediate
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::Relative
            | AddressingMode::IndirectX
            | AddressingMode::IndirectY => 1,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect => 2,
        }
    }
}

/// A resolved operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    /// No operand at all.
    Implied,
    /// The accumulator is the operand.
    Accumulator,
    /// The operand byte itself.
    Immediate(u8),
    /// Signed branch displacement.
    Relative(i8),
    /// An effective address in memory.
    Memory {
        /// Effective address
        addr: u16,
        /// Whether indexing moved the address into another page
        page_crossed: bool,
    },
}

impl Operand {
    fn memory(addr: u16) -> Self {
        Operand::Memory {
            addr,
            page_crossed: false,
        }
    }

    fn indexed(base: u16, index: u8) -> Self {
        let addr = base.wrapping_add(index as u16);
        Operand::Memory {
            addr,
            page_crossed: pages_differ(base, addr),
        }
    }

    /// The effective address, if the operand lives in memory.
    pub fn address(&self) -> Option<u16> {
        match *self {
            Operand::Memory { addr, .. } => Some(addr),
            _ => None,
        }
    }

    /// The effective address of an operand the opcode table guarantees is
    /// in memory (stores, jumps, read-modify-write).
    pub(crate) fn effective_address(&self) -> u16 {
        match self.address() {
            Some(addr) => addr,
            None => unreachable!("{:?} has no effective address", self),
        }
    }

    /// Whether resolution crossed a page boundary.
    pub fn page_crossed(&self) -> bool {
        matches!(
            self,
            Operand::Memory {
                page_crossed: true,
                ..
            }
        )
    }
}

/// Returns true when `a` and `b` lie in different 256-byte pages.
pub fn pages_differ(a: u16, b: u16) -> bool {
    (a & 0xFF00) != (b & 0xFF00)
}

/// Reads a pointer from zero page, wrapping the high byte within zero page.
fn read_zero_page_word<M: MemoryBus>(memory: &M, zp: u8) -> u16 {
    let lo = memory.read(zp as u16) as u16;
    let hi = memory.read(zp.wrapping_add(1) as u16) as u16;
    (hi << 8) | lo
}

fn fetch_byte<M: MemoryBus>(regs: &mut Registers, memory: &M) -> u8 {
    let value = memory.read(regs.pc);
    regs.pc = regs.pc.wrapping_add(1);
    value
}

fn fetch_word<M: MemoryBus>(regs: &mut Registers, memory: &M) -> u16 {
    let lo = fetch_byte(regs, memory) as u16;
    let hi = fetch_byte(regs, memory) as u16;
    (hi << 8) | lo
}

/// Resolves the operand for `mode`.
///
/// Expects PC to point at the first operand byte (just past the opcode) and
/// leaves it pointing at the next instruction.
///
/// # Examples
///
/// ```
/// use nmos6502::{resolve, AddressingMode, FlatMemory, MemoryBus, Operand, Registers};
///
/// let mut mem = FlatMemory::new();
/// mem.write(0x8000, 0xF0); // $F0,X
///
/// let mut regs = Registers { pc: 0x8000, x: 0x20, ..Registers::default() };
/// let operand = resolve(AddressingMode::ZeroPageX, &mut regs, &mem);
///
/// // 0xF0 + 0x20 wraps to 0x10 inside zero page
/// assert_eq!(operand, Operand::Memory { addr: 0x0010, page_crossed: false });
/// assert_eq!(regs.pc, 0x8001);
/// ```
pub fn resolve<M: MemoryBus>(mode: AddressingMode, regs: &mut Registers, memory: &M) -> Operand {
    match mode {
        AddressingMode::Implicit => Operand::Implied,
        AddressingMode::Accumulator => Operand::Accumulator,
        AddressingMode::Immediate => Operand::Immediate(fetch_byte(regs, memory)),
        AddressingMode::Relative => Operand::Relative(fetch_byte(regs, memory) as i8),
        AddressingMode::ZeroPage => Operand::memory(fetch_byte(regs, memory) as u16),
        AddressingMode::ZeroPageX => {
            let zp = fetch_byte(regs, memory).wrapping_add(regs.x);
            Operand::memory(zp as u16)
        }
        AddressingMode::ZeroPageY => {
            let zp = fetch_byte(regs, memory).wrapping_add(regs.y);
            Operand::memory(zp as u16)
        }
        AddressingMode::Absolute => Operand::memory(fetch_word(regs, memory)),
        AddressingMode::AbsoluteX => {
            let base = fetch_word(regs, memory);
            Operand::indexed(base, regs.x)
        }
        AddressingMode::AbsoluteY => {
            let base = fetch_word(regs, memory);
            Operand::indexed(base, regs.y)
        }
        AddressingMode::Indirect => {
            let ptr = fetch_word(regs, memory);
            // NMOS quirk: the high byte is fetched without carrying into the
            // pointer's page, so JMP ($10FF) reads $10FF and $1000.
            let lo = memory.read(ptr) as u16;
            let hi = memory.read((ptr & 0xFF00) | (ptr.wrapping_add(1) & 0x00FF)) as u16;
            Operand::memory((hi << 8) | lo)
        }
        AddressingMode::IndirectX => {
            let zp = fetch_byte(regs, memory).wrapping_add(regs.x);
            Operand::memory(read_zero_page_word(memory, zp))
        }
        AddressingMode::IndirectY => {
            let zp = fetch_byte(regs, memory);
            let base = read_zero_page_word(memory, zp);
            Operand::indexed(base, regs.y)
        }
    }
}

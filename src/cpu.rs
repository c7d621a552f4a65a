//! # CPU State and Execution
//!
//! This module contains the CPU struct representing the 6502 processor and the
//! per-instruction execution pipeline.
//!
//! ## Execution Model
//!
//! Every call to `step()` runs one instruction to completion:
//!
//! 1. **Fetch** the opcode at PC and advance PC
//! 2. **Decode** it through `OPCODE_TABLE`
//! 3. **Resolve** the operand, consuming operand bytes
//! 4. **Perform** the operation's register, memory and flag effects
//! 5. **Charge** base cycles, plus page-crossing and branch penalties
//!
//! After the instruction a latched NMI or an active IRQ line is serviced, and
//! the cycles for that entry sequence are charged to the same step.
//!
//! The run loop built on top of `step()` lives in the `scheduler` module.

use std::collections::BTreeSet;

use crate::addressing::{resolve, Operand};
use crate::instructions;
use crate::registers::{IRQ_VECTOR, NMI_VECTOR};
use crate::scheduler::StopHandle;
use crate::{
    decode, CpuConfig, ExecutionError, IllegalOpcode, IllegalOpcodePolicy, MemoryBus, Registers,
    Status,
};

/// Cycles taken by the IRQ/NMI entry sequence.
pub const INTERRUPT_CYCLES: u32 = 7;

/// Caller-supplied sink for illegal-opcode diagnostics.
pub type Reporter = Box<dyn FnMut(IllegalOpcode) + Send>;

/// 6502 CPU state and execution context.
///
/// Generic over the address space via the `MemoryBus` trait. The CPU can own
/// its memory, or borrow it (`CPU<&mut FlatMemory>`) when something else
/// needs the memory back after the run.
///
/// # Examples
///
/// ```
/// use nmos6502::{CPU, FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.write_word(0xFFFC, 0x4242);
/// memory.load(0x4242, &[0xA9, 0x84]); // LDA #$84
///
/// let mut cpu = CPU::new(memory);
/// let cycles = cpu.step().unwrap();
///
/// assert_eq!(cycles, 2);
/// assert_eq!(cpu.a(), 0x84);
/// assert!(!cpu.flag_z());
/// assert!(cpu.flag_n());
/// ```
pub struct CPU<M: MemoryBus> {
    /// Register file
    pub(crate) regs: Registers,

    /// Address space
    pub(crate) memory: M,

    /// Total cycles charged since the last reset
    pub(crate) cycles: u64,

    /// Construction-time options
    config: CpuConfig,

    /// Set when an illegal opcode stopped the CPU under `Halt`
    halted: bool,

    /// NMI latched by `trigger_nmi`, serviced after the current instruction
    nmi_pending: bool,

    reporter: Option<Reporter>,

    /// Addresses the run loop stops at
    pub(crate) breakpoints: BTreeSet<u16>,

    /// Breakpoint the last run stopped on; the next run steps over it once
    pub(crate) resume_from: Option<u16>,

    /// External stop request, checked between instructions
    pub(crate) stop: StopHandle,
}

impl<M: MemoryBus> CPU<M> {
    /// Creates a CPU with the default configuration.
    ///
    /// The register file is put in its power-up state: PC from the reset
    /// vector at 0xFFFC/0xFFFD, SP = 0xFD, A/X/Y and all flags cleared.
    ///
    /// # Examples
    ///
    /// ```
    /// use nmos6502::{CPU, FlatMemory, MemoryBus};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.write(0xFFFC, 0x00);
    /// mem.write(0xFFFD, 0x80);
    ///
    /// let cpu = CPU::new(mem);
    /// assert_eq!(cpu.pc(), 0x8000);
    /// assert_eq!(cpu.sp(), 0xFD);
    /// ```
    pub fn new(memory: M) -> Self {
        Self::with_config(memory, CpuConfig::default())
    }

    /// Creates a CPU with an explicit configuration.
    pub fn with_config(memory: M, config: CpuConfig) -> Self {
        let mut regs = Registers::default();
        regs.reset(&memory);

        Self {
            regs,
            memory,
            cycles: 0,
            config,
            halted: false,
            nmi_pending: false,
            reporter: None,
            breakpoints: BTreeSet::new(),
            resume_from: None,
            stop: StopHandle::default(),
        }
    }

    /// Resets the register file from the reset vector.
    ///
    /// Memory is left untouched so a loaded program survives. Clears the
    /// halted state, any latched NMI and the cycle counter. Breakpoints stay
    /// set, and one at the reset vector is honoured by the next run.
    pub fn reset(&mut self) {
        self.regs.reset(&self.memory);
        self.cycles = 0;
        self.halted = false;
        self.nmi_pending = false;
        self.resume_from = None;
        tracing::debug!("reset, pc=0x{:04X}", self.regs.pc);
    }

    /// Zero-fills the address space, then resets.
    ///
    /// With memory cleared the reset vector reads as 0x0000, so this is the
    /// state a loader starts from before writing a program and calling
    /// `reset()` again.
    pub fn power_on(&mut self) {
        self.memory.clear();
        self.reset();
    }

    /// Executes one instruction and returns the cycles it consumed.
    ///
    /// # Errors
    ///
    /// - `ExecutionError::IllegalOpcode` when an undocumented opcode is
    ///   fetched under `IllegalOpcodePolicy::Halt`
    /// - `ExecutionError::Halted` when stepping a halted CPU
    ///
    /// # Examples
    ///
    /// ```
    /// use nmos6502::{CPU, FlatMemory, MemoryBus};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.write_word(0xFFFC, 0x8000);
    /// mem.load(0x8000, &[0xB5, 0x10]); // LDA $10,X
    ///
    /// let mut cpu = CPU::new(mem);
    /// assert_eq!(cpu.step().unwrap(), 4);
    /// assert_eq!(cpu.pc(), 0x8002);
    /// ```
    pub fn step(&mut self) -> Result<u32, ExecutionError> {
        if self.halted {
            return Err(ExecutionError::Halted { pc: self.regs.pc });
        }

        let pc = self.regs.pc;
        self.resume_from = None;
        let opcode = self.memory.read(pc);
        self.regs.pc = pc.wrapping_add(1);

        let metadata = decode(opcode);
        tracing::trace!("{:04X}  {:02X}  {}", pc, opcode, metadata.operation);

        if metadata.is_illegal() {
            let diagnostic = IllegalOpcode { opcode, pc };
            match self.config.illegal_opcode {
                IllegalOpcodePolicy::Halt => {
                    self.regs.pc = pc;
                    self.halted = true;
                    tracing::debug!("halted: {}", diagnostic);
                    return Err(ExecutionError::IllegalOpcode(diagnostic));
                }
                IllegalOpcodePolicy::NoOp => {}
                IllegalOpcodePolicy::Report => self.report(diagnostic),
            }
        }

        let operand = resolve(metadata.addressing_mode, &mut self.regs, &self.memory);
        let extra = instructions::execute(self, metadata.operation, operand);

        let mut cycles = metadata.base_cycles as u32 + extra as u32;
        if metadata.page_penalty && operand.page_crossed() {
            cycles += 1;
        }
        cycles += self.poll_interrupts();

        self.cycles += cycles as u64;
        Ok(cycles)
    }

    /// Latches a non-maskable interrupt.
    ///
    /// It is serviced after the next instruction completes, regardless of
    /// the I flag.
    pub fn trigger_nmi(&mut self) {
        self.nmi_pending = true;
    }

    /// Attaches the sink that receives diagnostics under
    /// `IllegalOpcodePolicy::Report`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::mpsc;
    /// use nmos6502::{CpuConfig, FlatMemory, IllegalOpcodePolicy, MemoryBus, CPU};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.write_word(0xFFFC, 0x8000);
    /// mem.write(0x8000, 0x02); // undocumented
    ///
    /// let config = CpuConfig {
    ///     illegal_opcode: IllegalOpcodePolicy::Report,
    ///     ..CpuConfig::default()
    /// };
    /// let mut cpu = CPU::with_config(mem, config);
    ///
    /// let (tx, rx) = mpsc::channel();
    /// cpu.set_reporter(move |diag| {
    ///     let _ = tx.send(diag);
    /// });
    ///
    /// cpu.step().unwrap();
    /// let diag = rx.try_recv().unwrap();
    /// assert_eq!((diag.opcode, diag.pc), (0x02, 0x8000));
    /// ```
    pub fn set_reporter<F>(&mut self, reporter: F)
    where
        F: FnMut(IllegalOpcode) + Send + 'static,
    {
        self.reporter = Some(Box::new(reporter));
    }

    fn report(&mut self, diagnostic: IllegalOpcode) {
        match self.reporter.as_mut() {
            Some(reporter) => reporter(diagnostic),
            None => tracing::warn!("{}", diagnostic),
        }
    }

    fn poll_interrupts(&mut self) -> u32 {
        if self.nmi_pending {
            self.nmi_pending = false;
            tracing::debug!("servicing NMI, pc=0x{:04X}", self.regs.pc);
            self.enter_interrupt(NMI_VECTOR, false);
            return INTERRUPT_CYCLES;
        }
        if !self.regs.p.i && self.memory.irq_active() {
            tracing::debug!("servicing IRQ, pc=0x{:04X}", self.regs.pc);
            self.enter_interrupt(IRQ_VECTOR, false);
            return INTERRUPT_CYCLES;
        }
        0
    }

    /// Pushes PC and status, sets I, and jumps through `vector`.
    ///
    /// `brk` selects the B bit in the pushed status byte.
    pub(crate) fn enter_interrupt(&mut self, vector: u16, brk: bool) {
        self.push_word(self.regs.pc);
        self.push(self.regs.p.to_byte(brk));
        self.regs.p.i = true;
        self.regs.pc = self.memory.read_word(vector);
    }

    // ========== Stack ==========

    /// Writes at 0x0100 | SP, then decrements SP (wrapping within the page).
    pub(crate) fn push(&mut self, value: u8) {
        self.memory.write(self.regs.stack_addr(), value);
        self.regs.sp = self.regs.sp.wrapping_sub(1);
    }

    /// Increments SP (wrapping within the page), then reads at 0x0100 | SP.
    pub(crate) fn pull(&mut self) -> u8 {
        self.regs.sp = self.regs.sp.wrapping_add(1);
        self.memory.read(self.regs.stack_addr())
    }

    /// Pushes high byte first, so the word sits little-endian in memory.
    pub(crate) fn push_word(&mut self, value: u16) {
        self.push((value >> 8) as u8);
        self.push((value & 0xFF) as u8);
    }

    pub(crate) fn pull_word(&mut self) -> u16 {
        let lo = self.pull() as u16;
        let hi = self.pull() as u16;
        (hi << 8) | lo
    }

    // ========== Operand Access ==========

    /// Value of a resolved operand.
    ///
    /// The opcode table only pairs value-reading operations with modes that
    /// yield a value, so the remaining variants cannot reach here.
    pub(crate) fn read_operand(&self, operand: Operand) -> u8 {
        match operand {
            Operand::Immediate(value) => value,
            Operand::Accumulator => self.regs.a,
            Operand::Memory { addr, .. } => self.memory.read(addr),
            Operand::Implied | Operand::Relative(_) => {
                unreachable!("{:?} carries no value", operand)
            }
        }
    }

    /// Writes back to the accumulator or memory.
    pub(crate) fn write_operand(&mut self, operand: Operand, value: u8) {
        match operand {
            Operand::Accumulator => self.regs.a = value,
            Operand::Memory { addr, .. } => self.memory.write(addr, value),
            Operand::Implied | Operand::Immediate(_) | Operand::Relative(_) => {
                unreachable!("{:?} is not writable", operand)
            }
        }
    }

    // ========== Accessors ==========

    /// Returns the accumulator.
    pub fn a(&self) -> u8 {
        self.regs.a
    }

    /// Returns the X index register.
    pub fn x(&self) -> u8 {
        self.regs.x
    }

    /// Returns the Y index register.
    pub fn y(&self) -> u8 {
        self.regs.y
    }

    /// Returns the program counter.
    pub fn pc(&self) -> u16 {
        self.regs.pc
    }

    /// Returns the stack pointer.
    ///
    /// The full stack address is 0x0100 + SP. The stack grows downward.
    pub fn sp(&self) -> u8 {
        self.regs.sp
    }

    /// Returns the status register packed as `NV-BDIZC`, bit 5 set.
    pub fn status(&self) -> u8 {
        self.regs.p.to_byte(self.regs.p.b)
    }

    /// Returns the status flags.
    pub fn flags(&self) -> Status {
        self.regs.p
    }

    /// Returns a copy of the whole register file.
    pub fn registers(&self) -> Registers {
        self.regs
    }

    /// Total cycles charged since the last reset.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Whether an illegal opcode halted the CPU.
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// The configuration chosen at construction.
    pub fn config(&self) -> &CpuConfig {
        &self.config
    }

    /// Reads one byte of the address space without side effects on the CPU.
    pub fn peek(&self, addr: u16) -> u8 {
        self.memory.read(addr)
    }

    /// Borrows the address space.
    pub fn memory(&self) -> &M {
        &self.memory
    }

    /// Mutably borrows the address space, e.g. to load a program.
    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    /// Consumes the CPU and hands back the address space.
    pub fn into_memory(self) -> M {
        self.memory
    }

    /// Returns true if the Negative flag is set.
    pub fn flag_n(&self) -> bool {
        self.regs.p.n
    }

    /// Returns true if the Overflow flag is set.
    pub fn flag_v(&self) -> bool {
        self.regs.p.v
    }

    /// Returns true if the Break flag is set.
    pub fn flag_b(&self) -> bool {
        self.regs.p.b
    }

    /// Returns true if the Decimal mode flag is set.
    pub fn flag_d(&self) -> bool {
        self.regs.p.d
    }

    /// Returns true if the Interrupt Disable flag is set.
    pub fn flag_i(&self) -> bool {
        self.regs.p.i
    }

    /// Returns true if the Zero flag is set.
    pub fn flag_z(&self) -> bool {
        self.regs.p.z
    }

    /// Returns true if the Carry flag is set.
    pub fn flag_c(&self) -> bool {
        self.regs.p.c
    }

    // ========== Setters (test harnesses and debuggers) ==========

    pub fn set_a(&mut self, value: u8) {
        self.regs.a = value;
    }

    pub fn set_x(&mut self, value: u8) {
        self.regs.x = value;
    }

    pub fn set_y(&mut self, value: u8) {
        self.regs.y = value;
    }

    pub fn set_pc(&mut self, value: u16) {
        self.regs.pc = value;
    }

    pub fn set_sp(&mut self, value: u8) {
        self.regs.sp = value;
    }

    pub fn set_flag_n(&mut self, value: bool) {
        self.regs.p.n = value;
    }

    pub fn set_flag_v(&mut self, value: bool) {
        self.regs.p.v = value;
    }

    pub fn set_flag_b(&mut self, value: bool) {
        self.regs.p.b = value;
    }

    pub fn set_flag_d(&mut self, value: bool) {
        self.regs.p.d = value;
    }

    pub fn set_flag_i(&mut self, value: bool) {
        self.regs.p.i = value;
    }

    pub fn set_flag_z(&mut self, value: bool) {
        self.regs.p.z = value;
    }

    pub fn set_flag_c(&mut self, value: bool) {
        self.regs.p.c = value;
    }
}

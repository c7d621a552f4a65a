//! # Run Loop
//!
//! Drives `CPU::step()` against a cycle or instruction budget.
//!
//! A run stops, always between instructions, when:
//! - the budget is met (a cycle budget may be overshot by the last
//!   instruction, since instructions are never split)
//! - PC reaches a breakpoint (including the PC a run starts at, unless the
//!   previous run stopped on that same breakpoint)
//! - a `StopHandle` requested a stop
//!
//! Wall-clock pacing is left to the caller: run a frame's worth of cycles,
//! then sleep or wait for vsync.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::{ExecutionError, MemoryBus, CPU};

/// Why a run returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The cycle or instruction budget was reached.
    BudgetExhausted,
    /// PC reached the given breakpoint address before executing it.
    Breakpoint(u16),
    /// A `StopHandle` asked the run to stop.
    StopRequested,
}

/// Summary of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    /// Cycles consumed by this run.
    pub cycles: u64,
    /// Instructions executed by this run.
    pub instructions: u64,
    /// Why the run returned.
    pub reason: StopReason,
}

/// Cloneable handle that asks a running CPU to stop.
///
/// The request is checked between instructions and consumed by the run it
/// stops. The handle is `Send + Sync`, so it can be fired from a UI or
/// signal-handling thread while another thread owns the CPU.
///
/// # Examples
///
/// ```
/// use nmos6502::{FlatMemory, MemoryBus, StopReason, CPU};
///
/// let mut mem = FlatMemory::new();
/// mem.write_word(0xFFFC, 0x8000);
/// mem.load(0x8000, &[0x4C, 0x00, 0x80]); // JMP $8000
///
/// let mut cpu = CPU::new(mem);
/// let stop = cpu.stop_handle();
/// stop.request_stop();
///
/// let outcome = cpu.run(1_000_000).unwrap();
/// assert_eq!(outcome.reason, StopReason::StopRequested);
/// assert_eq!(outcome.instructions, 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    flag: Arc<AtomicBool>,
}

impl StopHandle {
    /// Asks the run loop to stop before its next instruction.
    pub fn request_stop(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Whether a stop is pending.
    pub fn is_stop_requested(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    fn take(&self) -> bool {
        self.flag.swap(false, Ordering::SeqCst)
    }
}

/// Budget a run is measured against.
#[derive(Debug, Clone, Copy)]
enum Budget {
    Cycles(u64),
    Instructions(u64),
}

impl<M: MemoryBus> CPU<M> {
    /// Runs until at least `cycle_budget` cycles have been charged.
    ///
    /// The last instruction may overshoot the budget. A budget of zero
    /// returns immediately.
    ///
    /// # Errors
    ///
    /// Propagates the first `ExecutionError` from `step()`; the cycles of
    /// the instructions before it stay charged.
    ///
    /// # Examples
    ///
    /// ```
    /// use nmos6502::{FlatMemory, MemoryBus, StopReason, CPU};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.write_word(0xFFFC, 0x4242);
    /// mem.load(0x4242, &[0xA9, 0x84]); // LDA #$84
    ///
    /// let mut cpu = CPU::new(mem);
    /// let outcome = cpu.run(2).unwrap();
    ///
    /// assert_eq!(outcome.cycles, 2);
    /// assert_eq!(outcome.reason, StopReason::BudgetExhausted);
    /// assert_eq!(cpu.a(), 0x84);
    /// ```
    pub fn run(&mut self, cycle_budget: u64) -> Result<RunOutcome, ExecutionError> {
        self.run_with_budget(Budget::Cycles(cycle_budget))
    }

    /// Runs exactly `count` instructions unless stopped earlier.
    pub fn run_instructions(&mut self, count: u64) -> Result<RunOutcome, ExecutionError> {
        self.run_with_budget(Budget::Instructions(count))
    }

    fn run_with_budget(&mut self, budget: Budget) -> Result<RunOutcome, ExecutionError> {
        let mut cycles = 0u64;
        let mut instructions = 0u64;

        let reason = loop {
            let exhausted = match budget {
                Budget::Cycles(limit) => cycles >= limit,
                Budget::Instructions(limit) => instructions >= limit,
            };
            if exhausted {
                break StopReason::BudgetExhausted;
            }
            if self.stop.take() {
                break StopReason::StopRequested;
            }
            let pc = self.regs.pc;
            if self.resume_from != Some(pc) && self.breakpoints.contains(&pc) {
                self.resume_from = Some(pc);
                break StopReason::Breakpoint(pc);
            }

            cycles += self.step()? as u64;
            instructions += 1;
        };

        tracing::debug!(
            "run stopped: {:?} after {} instructions, {} cycles",
            reason,
            instructions,
            cycles
        );

        Ok(RunOutcome {
            cycles,
            instructions,
            reason,
        })
    }

    /// Returns a handle that can stop `run` between instructions.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Stops runs when PC reaches `addr`, before the instruction there runs.
    ///
    /// A run that stopped on a breakpoint leaves PC on it; the next run
    /// executes that instruction instead of stopping again.
    pub fn add_breakpoint(&mut self, addr: u16) {
        self.breakpoints.insert(addr);
    }

    /// Removes a breakpoint; returns whether it was set.
    pub fn remove_breakpoint(&mut self, addr: u16) -> bool {
        self.breakpoints.remove(&addr)
    }

    /// Removes every breakpoint.
    pub fn clear_breakpoints(&mut self) {
        self.breakpoints.clear();
    }

    /// Breakpoint addresses in ascending order.
    pub fn breakpoints(&self) -> impl Iterator<Item = u16> + '_ {
        self.breakpoints.iter().copied()
    }
}

//! # CPU Configuration
//!
//! Behavior that is fixed once, when the CPU is built, rather than decided
//! per instruction.

/// What the CPU does when it fetches an undocumented opcode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum IllegalOpcodePolicy {
    /// Stop the CPU and return `ExecutionError::IllegalOpcode`.
    ///
    /// PC is left on the offending byte. Only `reset()` restarts the CPU.
    #[default]
    Halt,

    /// Execute the opcode as a one-byte, two-cycle NOP.
    NoOp,

    /// Like `NoOp`, but first hand an `IllegalOpcode` diagnostic to the
    /// attached reporter (or log it as a warning if there is none).
    Report,
}

/// Construction-time CPU options.
///
/// # Examples
///
/// ```
/// use nmos6502::{CpuConfig, FlatMemory, IllegalOpcodePolicy, CPU};
///
/// // A 2A03-style core: no BCD, skip over junk bytes.
/// let config = CpuConfig {
///     illegal_opcode: IllegalOpcodePolicy::NoOp,
///     decimal_mode: false,
/// };
/// let cpu = CPU::with_config(FlatMemory::new(), config);
/// assert_eq!(cpu.config().illegal_opcode, IllegalOpcodePolicy::NoOp);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CpuConfig {
    /// Illegal opcode handling.
    pub illegal_opcode: IllegalOpcodePolicy,

    /// Whether ADC/SBC honour the D flag with BCD arithmetic.
    ///
    /// Enabled on a stock NMOS 6502. Disable it to model parts with the
    /// decimal circuitry removed; the D flag can still be set and cleared.
    pub decimal_mode: bool,
}

impl Default for CpuConfig {
    fn default() -> Self {
        Self {
            illegal_opcode: IllegalOpcodePolicy::Halt,
            decimal_mode: true,
        }
    }
}

//! Errors surfaced by the execution core.
//!
//! Memory access and flag computation cannot fail; the only failures are an
//! illegal opcode under the `Halt` policy and stepping a halted CPU.

use std::fmt;

use thiserror::Error;

/// Diagnostic for an undocumented opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IllegalOpcode {
    /// The offending byte.
    pub opcode: u8,
    /// Address the byte was fetched from.
    pub pc: u16,
}

impl fmt::Display for IllegalOpcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "illegal opcode 0x{:02X} at pc=0x{:04X}",
            self.opcode, self.pc
        )
    }
}

/// Errors that can occur during CPU execution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutionError {
    /// An undocumented opcode was fetched while the policy is `Halt`.
    #[error("{0}")]
    IllegalOpcode(IllegalOpcode),

    /// The CPU halted earlier and has not been reset since.
    #[error("CPU is halted at pc=0x{pc:04X}")]
    Halted {
        /// PC at which the CPU stopped.
        pc: u16,
    },
}

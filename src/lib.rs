//! # NMOS 6502 Interpreter Core
//!
//! A cycle-counting instruction interpreter for the MOS 6502.
//!
//! The crate fetches opcodes from a 64 KiB address space, decodes them through a
//! 256-entry table, resolves the operand for the addressing mode, performs the
//! operation and reports the cycles it took, including page-crossing and
//! taken-branch penalties.
//!
//! ## Quick Start
//!
//! ```rust
//! use nmos6502::{CPU, FlatMemory, MemoryBus};
//!
//! let mut memory = FlatMemory::new();
//!
//! // Reset vector -> 0x8000, then a tiny program
//! memory.write_word(0xFFFC, 0x8000);
//! memory.load(0x8000, &[
//!     0xA2, 0x05, // LDX #$05
//!     0xCA,       // DEX
//!     0xD0, 0xFD, // BNE -3
//! ]);
//!
//! let mut cpu = CPU::new(memory);
//! cpu.run_instructions(11).unwrap();
//!
//! assert_eq!(cpu.x(), 0);
//! assert!(cpu.flag_z());
//! assert_eq!(cpu.pc(), 0x8005);
//! ```
//!
//! ## Modules
//!
//! - `memory` - `MemoryBus` trait and the flat 64 KiB `FlatMemory`
//! - `registers` - register file and status flags
//! - `opcodes` - the opcode table (decoder)
//! - `addressing` - addressing modes and operand resolution
//! - `cpu` - per-instruction execution
//! - `scheduler` - run loop, breakpoints and stop requests
//! - `config` - construction-time options such as the illegal-opcode policy
//! - `error` - execution errors and the illegal-opcode diagnostic
//!
//! The core does no I/O of its own. Diagnostics go through `tracing` or a
//! caller-supplied reporter.

pub mod addressing;
pub mod config;
pub mod cpu;
pub mod error;
pub mod memory;
pub mod opcodes;
pub mod registers;
pub mod scheduler;

// Internal instruction implementations (not part of public API)
mod instructions;

// Re-export public API
pub use addressing::{resolve, AddressingMode, Operand};
pub use config::{CpuConfig, IllegalOpcodePolicy};
pub use cpu::{Reporter, CPU};
pub use error::{ExecutionError, IllegalOpcode};
pub use memory::{FlatMemory, MemoryBus};
pub use opcodes::{decode, OpcodeMetadata, Operation, OPCODE_TABLE};
pub use registers::{Registers, Status};
pub use scheduler::{RunOutcome, StopHandle, StopReason};

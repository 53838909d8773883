//! RV64 instruction utilities.
//!
//! This crate provides:
//! - Instruction word field extraction for the R/I/S/B/U/J formats
//! - Register definitions with their ABI roles
//! - Instruction encoders used by tests and tools that assemble guest images

#![no_std]

pub mod decode;
pub mod encode;
pub mod regs;

// Re-exports for convenience
pub use decode::{TypeB, TypeI, TypeJ, TypeR, TypeS, TypeU, opcode};
pub use regs::Gpr;

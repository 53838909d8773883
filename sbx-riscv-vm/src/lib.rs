//! RV64IM sandbox interpreter.
//!
//! This crate executes untrusted 64-bit RISC-V programs against a fixed-size
//! sandbox memory and a curated host-call table. It includes:
//! - Full RV64IM instruction interpretation with bounds-checked memory access
//! - The syscall dispatcher and argument marshalling across the guest/host
//!   boundary
//! - Loader and lifecycle management (load image, run, reset)
//! - Host-facility contracts for terminal, GPIO, buses, storage, and devices

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

// Re-export instruction utilities for convenience
pub use sbx_riscv_inst::{Gpr, decode, encode};

pub mod error;
pub mod executor;
pub mod host;
pub mod marshal;
pub mod memory;
mod syscall;
pub mod vm;

#[cfg(feature = "std")]
pub mod test_util;

// Re-exports for convenience
pub use error::VmError;
pub use host::{
    Clock, Console, DisplayInfo, FileHandle, FileStore, GpioPort, GuestAllocator, HostContext,
    I2cBus, InterruptCtl, Keyboard, NvStorage, SpiBus, SystemInfo,
};
pub use memory::Sandbox;
pub use vm::{Riscv64Vm, StepResult};

/// Initialize logging for the VM host.
///
/// Should be called before running guest code.
/// Reads the RUST_LOG environment variable for filtering.
#[cfg(feature = "std")]
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

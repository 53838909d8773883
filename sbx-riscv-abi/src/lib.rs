//! Host-call ABI shared between the sandbox VM host and guest code.
//!
//! This crate is the single source of truth for the numeric contract between
//! the interpreter and programs compiled for it: the host-call enumeration,
//! the key enums passed through `Sys::info_*`, the GPIO and device constants,
//! and the sandbox memory map. Both sides link against it, so everything here
//! is append-only once a guest toolchain has shipped.

#![no_std]

mod keys;
mod syscall;

pub use keys::{PS2_DEVICE_UNKNOWN, SdCardType, SysInfoNum, SysInfoStr};
pub use syscall::Syscall;

/// Length of the sandbox memory array in bytes.
///
/// Guest images are compiled against this value; changing it breaks every
/// shipped binary.
pub const MEM_SIZE: usize = 32768;

/// Guest address at which the loader places the first instruction of a
/// program image. The region below it is reserved for host bookkeeping.
pub const ENTRY_OFFSET: usize = 4096;

/// Sentinel returned by `Fs::open` when no handle could be produced.
pub const INVALID_FILE_HANDLE: u8 = 0xFF;

/// In-band sentinel for byte reads at end of stream (console, file, bus).
pub const READ_EOF: i64 = -1;

/// GPIO pin configured as input.
pub const GPIO_INPUT: u8 = 0x01;
/// GPIO pin configured as output.
pub const GPIO_OUTPUT: u8 = 0x03;
/// GPIO pin configured as input with the internal pull-up enabled.
pub const GPIO_INPUT_PULLUP: u8 = 0x05;

/// Digital low level.
pub const GPIO_LOW: u8 = 0x0;
/// Digital high level.
pub const GPIO_HIGH: u8 = 0x1;

//! Terminal, clock, and system-information contracts.

extern crate alloc;

use alloc::string::String;

use sbx_riscv_abi::{SysInfoNum, SysInfoStr};

/// The byte-oriented terminal channel.
///
/// Carries all IO-group traffic and the panic diagnostics. Lines are
/// CRLF-terminated by convention; the VM never inserts terminators into
/// guest output on its own.
pub trait Console {
    /// Write text to the terminal.
    fn write(&mut self, text: &str);

    /// Read one byte, honoring the configured timeout. -1 when nothing
    /// arrived.
    fn read_byte(&mut self) -> i64;

    /// Read a line (without its terminator).
    fn read_line(&mut self) -> String;

    /// Bytes currently buffered for reading.
    fn available(&mut self) -> i64;

    /// Next buffered byte without consuming it; -1 when empty.
    fn peek(&mut self) -> i64;

    /// Consume input until `target` is seen. True if found before timeout.
    fn find(&mut self, target: &str) -> bool;

    /// Consume input until `target` or `terminator` is seen. True if
    /// `target` was found first.
    fn find_until(&mut self, target: &str, terminator: &str) -> bool;

    /// Set the read timeout in milliseconds.
    fn set_timeout(&mut self, ms: u64);

    /// The current read timeout in milliseconds.
    fn timeout(&mut self) -> u64;
}

/// Monotonic clocks, delays, randomness, and the cooperative yield.
pub trait Clock {
    /// Block the guest for `ms` milliseconds.
    fn delay_ms(&mut self, ms: u64);

    /// Microseconds since host start.
    fn micros(&mut self) -> u64;

    /// Milliseconds since host start.
    fn millis(&mut self) -> u64;

    /// A value from the host's random source.
    fn random(&mut self) -> i64;

    /// Let the host scheduler run its background work.
    fn yield_now(&mut self);
}

/// Host identity and environment probes, plus shell dispatch.
pub trait SystemInfo {
    /// A textual system property.
    fn info_str(&mut self, key: SysInfoStr) -> String;

    /// A numeric system property. `CardType` reports `SdCardType::None`
    /// when no storage card is present.
    fn info_num(&mut self, key: SysInfoNum) -> i64;

    /// Run another program through the host shell; returns its exit code.
    fn shell_exec(&mut self, program: &str, args: &[String]) -> i64;
}

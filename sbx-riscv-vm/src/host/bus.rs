//! I2C and SPI bus contracts.
//!
//! Bus singletons are owned by the host; the VM borrows them for the span
//! of one handler invocation. Buffer-taking operations receive bounded
//! slices that the dispatcher has already marshalled out of guest memory.

/// The two-wire bus.
pub trait I2cBus {
    /// Join the bus. A non-zero address enters slave mode.
    fn begin(&mut self, address: u8) -> bool;
    fn end(&mut self) -> bool;

    fn begin_transmission(&mut self, address: u8);
    /// Finish a transmission; returns the Wire status code (0 = success).
    fn end_transmission(&mut self, stop_bit: bool) -> u8;

    /// Queue bytes for transmission; returns bytes accepted.
    fn write(&mut self, data: &[u8]) -> u64;
    /// Queue a slave-mode response; returns bytes accepted.
    fn slave_write(&mut self, data: &[u8]) -> u64;

    /// Read one received byte; -1 when none.
    fn read(&mut self) -> i64;
    /// Next received byte without consuming; -1 when none.
    fn peek(&mut self) -> i64;
    /// Request `len` bytes from `address`; returns bytes received.
    fn request(&mut self, address: u8, len: u64, stop_bit: bool) -> u64;
    /// Received bytes waiting.
    fn available(&mut self) -> i64;
    fn flush(&mut self);

    /// Register the guest's receive callback entry point. The two callback
    /// registrations are distinct slots.
    fn on_receive(&mut self, guest_fn: u64);
    /// Register the guest's request callback entry point.
    fn on_request(&mut self, guest_fn: u64);

    fn timeout(&mut self) -> u16;
    fn set_timeout(&mut self, ms: u16);
    fn clock(&mut self) -> u32;
    fn set_clock(&mut self, hz: u32) -> bool;
    fn set_pins(&mut self, sda: u8, scl: u8) -> bool;
    /// Resize the receive buffer; returns the size actually applied.
    fn set_buffer_size(&mut self, size: u64) -> u64;
}

/// The serial peripheral bus.
pub trait SpiBus {
    fn begin(&mut self, sck: u8, miso: u8, mosi: u8, ss: u8);
    fn end(&mut self);

    fn begin_transaction(&mut self, clock: u32, bit_order: u8, data_mode: u8);
    fn end_transaction(&mut self);

    fn transfer8(&mut self, data: u8) -> u8;
    fn transfer16(&mut self, data: u16) -> u16;
    fn transfer32(&mut self, data: u32) -> u32;
    /// Full-duplex block transfer; `out` receives exactly `data.len()`
    /// bytes.
    fn transfer_bytes(&mut self, data: &[u8], out: &mut [u8]);
    /// Transfer the low `bits` bits of `data`; returns the bits read back.
    fn transfer_bits(&mut self, data: u32, bits: u8) -> u32;

    fn set_hwcs(&mut self, enabled: bool);
    fn set_bit_order(&mut self, order: u8);
    fn set_data_mode(&mut self, mode: u8);
    fn set_frequency(&mut self, hz: u32);
    fn set_clock_div(&mut self, div: u32);
    fn clock_div(&mut self) -> u32;

    fn write8(&mut self, data: u8);
    fn write16(&mut self, data: u16);
    fn write32(&mut self, data: u32);
    fn write_bytes(&mut self, data: &[u8]);
    /// Push pixel data (display-oriented write path).
    fn write_pixels(&mut self, data: &[u8]);
    /// Write `data` repeated `repeat` times.
    fn write_pattern(&mut self, data: &[u8], repeat: u32);
}

//! GPIO, interrupt, keyboard, display, NVS, and guest-heap contracts.

extern crate alloc;

use alloc::string::String;

/// Digital and analog pin operations.
pub trait GpioPort {
    fn pin_mode(&mut self, pin: u8, mode: u8);
    fn digital_read(&mut self, pin: u8) -> u8;
    fn digital_write(&mut self, pin: u8, level: u8);
    fn analog_read(&mut self, pin: u8) -> u16;
    fn analog_write(&mut self, pin: u8, value: u16);

    /// Measure a pulse on `pin`; 0 on timeout (microseconds).
    fn pulse_in(&mut self, pin: u8, state: u8, timeout_us: u64) -> u64;
    fn pulse_in_long(&mut self, pin: u8, state: u8, timeout_us: u64) -> u64;

    fn shift_in(&mut self, data_pin: u8, clock_pin: u8, bit_order: u8) -> u8;
    fn shift_out(&mut self, data_pin: u8, clock_pin: u8, bit_order: u8, value: u8);

    fn tone(&mut self, frequency: u32, duration_ms: u64);
    fn no_tone(&mut self);
}

/// Interrupt control.
///
/// `guest_fn` is a guest code address; the host records it but never calls
/// into the sandbox directly.
pub trait InterruptCtl {
    fn enable(&mut self);
    fn disable(&mut self);
    fn attach(&mut self, pin: u8, guest_fn: u64, mode: u8);
    fn detach(&mut self, pin: u8);
}

/// The PS/2 keyboard attached to the host.
pub trait Keyboard {
    fn layout_name(&mut self) -> String;
    fn layout_desc(&mut self) -> String;

    fn num_lock(&mut self) -> bool;
    fn caps_lock(&mut self) -> bool;
    fn scroll_lock(&mut self) -> bool;
    fn set_num_lock(&mut self, state: bool);
    fn set_caps_lock(&mut self, state: bool);
    fn set_scroll_lock(&mut self, state: bool);

    /// Next raw scancode; 0 when the timeout elapsed with no event.
    fn next_scancode(&mut self, timeout_ms: i64, resend: bool) -> u32;

    /// Device type probe (PS/2 identity codes).
    fn device_type(&mut self) -> u64;

    fn lock(&mut self, timeout_ms: i64);
    fn unlock(&mut self);
    fn reset(&mut self);
}

/// Display geometry and capability probes.
pub trait DisplayInfo {
    fn screen_height(&mut self) -> i64;
    fn screen_width(&mut self) -> i64;
    fn viewport_height(&mut self) -> i64;
    fn viewport_width(&mut self) -> i64;
    fn supported_colors(&mut self) -> i64;
}

/// Non-volatile key/value storage.
///
/// Getters return the stored value at full width, or the caller's default
/// when the key is absent.
pub trait NvStorage {
    fn erase(&mut self, key: &str, force: bool) -> bool;
    fn erase_all(&mut self, force: bool) -> bool;
    fn commit(&mut self) -> bool;

    fn set_i64(&mut self, key: &str, value: i64, force: bool) -> bool;
    fn set_u64(&mut self, key: &str, value: u64, force: bool) -> bool;
    fn set_string(&mut self, key: &str, value: &str, force: bool) -> bool;

    fn get_i64(&mut self, key: &str, default: i64) -> i64;
    fn get_u64(&mut self, key: &str, default: u64) -> u64;
    fn get_string(&mut self, key: &str) -> String;

    fn has_wifi_config(&mut self) -> bool;
    fn set_wifi_ssid(&mut self, ssid: &str) -> bool;
    fn set_wifi_passphrase(&mut self, passphrase: &str) -> bool;
}

/// The guest heap manager.
///
/// Manages a heap region inside the sandbox and deals purely in guest
/// offsets. 0 means allocation failure (offset 0 is never handed out; it
/// sits in the host-reserved region).
pub trait GuestAllocator {
    fn alloc(&mut self, size: u64) -> u64;
    fn calloc(&mut self, count: u64, size: u64) -> u64;
    fn realloc(&mut self, ptr: u64, size: u64) -> u64;
    fn free(&mut self, ptr: u64);
}

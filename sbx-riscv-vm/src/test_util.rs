//! Mock host platform for tests.
//!
//! Every facility contract has a recording implementation here, plus a
//! [`MockHost`] aggregate that hands out a ready [`HostContext`]. Tests
//! script inputs up front and assert on the recorded traffic afterwards.

extern crate alloc;

use alloc::collections::VecDeque;
use alloc::rc::Rc;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cell::RefCell;

use hashbrown::HashMap;
use sbx_riscv_abi::{MEM_SIZE, SdCardType, SysInfoNum, SysInfoStr};

use crate::host::{
    Clock, Console, DisplayInfo, FileHandle, FileStore, GpioPort, GuestAllocator, HostContext,
    I2cBus, InterruptCtl, Keyboard, NvStorage, SpiBus, SystemInfo,
};

/// Cross-facility event log.
///
/// The blink-style scenarios assert on the interleaving of GPIO writes and
/// delays, so those mocks share one ordered log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    PinMode { pin: u8, mode: u8 },
    DigitalWrite { pin: u8, level: u8 },
    DelayMs(u64),
    Tone { frequency: u32, duration_ms: u64 },
    NoTone,
    Yield,
}

type EventLog = Rc<RefCell<Vec<HostEvent>>>;

// Console

pub struct MockConsole {
    /// Everything the guest printed.
    pub output: String,
    /// Scripted guest input.
    pub input: VecDeque<u8>,
    timeout_ms: u64,
}

impl MockConsole {
    pub fn new() -> MockConsole {
        MockConsole { output: String::new(), input: VecDeque::new(), timeout_ms: 1000 }
    }

    /// Queue bytes for the guest to read.
    pub fn feed(&mut self, text: &str) {
        self.input.extend(text.as_bytes());
    }
}

impl Console for MockConsole {
    fn write(&mut self, text: &str) {
        self.output.push_str(text);
    }

    fn read_byte(&mut self) -> i64 {
        self.input.pop_front().map_or(-1, |b| b as i64)
    }

    fn read_line(&mut self) -> String {
        let mut line = String::new();
        while let Some(b) = self.input.pop_front() {
            if b == b'\n' {
                break;
            }
            if b != b'\r' {
                line.push(b as char);
            }
        }
        line
    }

    fn available(&mut self) -> i64 {
        self.input.len() as i64
    }

    fn peek(&mut self) -> i64 {
        self.input.front().map_or(-1, |b| *b as i64)
    }

    fn find(&mut self, target: &str) -> bool {
        let needle = target.as_bytes();
        while self.input.len() >= needle.len() {
            if self.input.iter().zip(needle).all(|(a, b)| a == b) {
                for _ in 0..needle.len() {
                    self.input.pop_front();
                }
                return true;
            }
            self.input.pop_front();
        }
        self.input.clear();
        false
    }

    fn find_until(&mut self, target: &str, terminator: &str) -> bool {
        // Scripted input only: terminator wins if it appears first
        let haystack: Vec<u8> = self.input.iter().copied().collect();
        let hay = String::from_utf8_lossy(&haystack);
        match (hay.find(target), hay.find(terminator)) {
            (Some(t), Some(term)) => t < term,
            (Some(_), None) => true,
            _ => false,
        }
    }

    fn set_timeout(&mut self, ms: u64) {
        self.timeout_ms = ms;
    }

    fn timeout(&mut self) -> u64 {
        self.timeout_ms
    }
}

// Clock

pub struct MockClock {
    /// Simulated time, advanced by delays.
    pub now_ms: u64,
    events: EventLog,
    rng_state: u64,
}

impl Clock for MockClock {
    fn delay_ms(&mut self, ms: u64) {
        self.now_ms += ms;
        self.events.borrow_mut().push(HostEvent::DelayMs(ms));
    }

    fn micros(&mut self) -> u64 {
        self.now_ms * 1000
    }

    fn millis(&mut self) -> u64 {
        self.now_ms
    }

    fn random(&mut self) -> i64 {
        // xorshift, deterministic across runs
        self.rng_state ^= self.rng_state << 13;
        self.rng_state ^= self.rng_state >> 7;
        self.rng_state ^= self.rng_state << 17;
        self.rng_state as i64
    }

    fn yield_now(&mut self) {
        self.events.borrow_mut().push(HostEvent::Yield);
    }
}

// System info

pub struct MockSystemInfo {
    /// Recorded shell_exec invocations.
    pub shell_calls: Vec<(String, Vec<String>)>,
    /// Exit code shell_exec reports.
    pub shell_exit_code: i64,
}

impl SystemInfo for MockSystemInfo {
    fn info_str(&mut self, key: SysInfoStr) -> String {
        match key {
            SysInfoStr::ChipModel => "mock-rv64".to_string(),
            SysInfoStr::SdkVersion => "0.4.0".to_string(),
            SysInfoStr::SketchMd5 => "d41d8cd98f00b204e9800998ecf8427e".to_string(),
        }
    }

    fn info_num(&mut self, key: SysInfoNum) -> i64 {
        match key {
            SysInfoNum::ChipCores => 2,
            SysInfoNum::CpuFreq => 240_000_000,
            SysInfoNum::CardType => SdCardType::None.id(),
            SysInfoNum::FreeHeap => 192 * 1024,
            _ => 0,
        }
    }

    fn shell_exec(&mut self, program: &str, args: &[String]) -> i64 {
        self.shell_calls.push((program.to_string(), args.to_vec()));
        self.shell_exit_code
    }
}

// Guest allocator

/// Bump allocator over the upper half of the sandbox. `free` is a no-op,
/// which is fine for test programs.
pub struct BumpAllocator {
    next: u64,
    /// Recorded (ptr, size) pairs handed out.
    pub allocations: Vec<(u64, u64)>,
    pub freed: Vec<u64>,
}

impl BumpAllocator {
    const HEAP_BASE: u64 = (MEM_SIZE as u64) / 2;

    pub fn new() -> BumpAllocator {
        BumpAllocator { next: Self::HEAP_BASE, allocations: Vec::new(), freed: Vec::new() }
    }
}

impl GuestAllocator for BumpAllocator {
    fn alloc(&mut self, size: u64) -> u64 {
        let aligned = (size + 7) & !7;
        if self.next + aligned > MEM_SIZE as u64 {
            return 0;
        }
        let ptr = self.next;
        self.next += aligned;
        self.allocations.push((ptr, size));
        ptr
    }

    fn calloc(&mut self, count: u64, size: u64) -> u64 {
        match count.checked_mul(size) {
            Some(total) => self.alloc(total),
            None => 0,
        }
    }

    fn realloc(&mut self, _ptr: u64, size: u64) -> u64 {
        self.alloc(size)
    }

    fn free(&mut self, ptr: u64) {
        self.freed.push(ptr);
    }
}

// GPIO

pub struct MockGpio {
    events: EventLog,
    /// Levels digital_read answers with.
    pub input_levels: HashMap<u8, u8>,
    /// Value analog_read answers with.
    pub analog_level: u16,
}

impl GpioPort for MockGpio {
    fn pin_mode(&mut self, pin: u8, mode: u8) {
        self.events.borrow_mut().push(HostEvent::PinMode { pin, mode });
    }

    fn digital_read(&mut self, pin: u8) -> u8 {
        self.input_levels.get(&pin).copied().unwrap_or(0)
    }

    fn digital_write(&mut self, pin: u8, level: u8) {
        self.events.borrow_mut().push(HostEvent::DigitalWrite { pin, level });
    }

    fn analog_read(&mut self, _pin: u8) -> u16 {
        self.analog_level
    }

    fn analog_write(&mut self, _pin: u8, _value: u16) {}

    fn pulse_in(&mut self, _pin: u8, _state: u8, _timeout_us: u64) -> u64 {
        0
    }

    fn pulse_in_long(&mut self, _pin: u8, _state: u8, _timeout_us: u64) -> u64 {
        0
    }

    fn shift_in(&mut self, _data_pin: u8, _clock_pin: u8, _bit_order: u8) -> u8 {
        0
    }

    fn shift_out(&mut self, _data_pin: u8, _clock_pin: u8, _bit_order: u8, _value: u8) {}

    fn tone(&mut self, frequency: u32, duration_ms: u64) {
        self.events.borrow_mut().push(HostEvent::Tone { frequency, duration_ms });
    }

    fn no_tone(&mut self) {
        self.events.borrow_mut().push(HostEvent::NoTone);
    }
}

// Interrupts

#[derive(Default)]
pub struct MockInterrupts {
    pub enabled: bool,
    /// (pin, guest_fn, mode) registrations still attached.
    pub attached: Vec<(u8, u64, u8)>,
}

impl InterruptCtl for MockInterrupts {
    fn enable(&mut self) {
        self.enabled = true;
    }

    fn disable(&mut self) {
        self.enabled = false;
    }

    fn attach(&mut self, pin: u8, guest_fn: u64, mode: u8) {
        self.attached.push((pin, guest_fn, mode));
    }

    fn detach(&mut self, pin: u8) {
        self.attached.retain(|(p, _, _)| *p != pin);
    }
}

// Filesystem

type SharedFiles = Rc<RefCell<HashMap<String, Vec<u8>>>>;

/// In-memory filesystem. Files are byte vectors keyed by full path;
/// directories are plain path entries.
pub struct MemFileStore {
    files: SharedFiles,
    pub dirs: Vec<String>,
}

impl MemFileStore {
    pub fn new() -> MemFileStore {
        MemFileStore { files: Rc::new(RefCell::new(HashMap::new())), dirs: Vec::new() }
    }

    /// Direct host-side view of a file's bytes.
    pub fn contents(&self, path: &str) -> Option<Vec<u8>> {
        self.files.borrow().get(path).cloned()
    }

    /// Pre-populate a file.
    pub fn put(&mut self, path: &str, data: &[u8]) {
        self.files.borrow_mut().insert(path.to_string(), data.to_vec());
    }
}

impl FileStore for MemFileStore {
    fn mkdir(&mut self, path: &str) -> bool {
        if self.dirs.iter().any(|d| d == path) {
            return false;
        }
        self.dirs.push(path.to_string());
        true
    }

    fn rmdir(&mut self, path: &str) -> bool {
        let before = self.dirs.len();
        self.dirs.retain(|d| d != path);
        self.dirs.len() != before
    }

    fn remove(&mut self, path: &str) -> bool {
        self.files.borrow_mut().remove(path).is_some()
    }

    fn exists(&mut self, path: &str) -> bool {
        self.files.borrow().contains_key(path) || self.dirs.iter().any(|d| d == path)
    }

    fn is_file(&mut self, path: &str) -> bool {
        self.files.borrow().contains_key(path)
    }

    fn is_dir(&mut self, path: &str) -> bool {
        self.dirs.iter().any(|d| d == path)
    }

    fn open(&mut self, path: &str, mode: &str) -> Option<alloc::boxed::Box<dyn FileHandle>> {
        let writable = mode.starts_with('w') || mode.starts_with('a');
        let mut files = self.files.borrow_mut();
        if !files.contains_key(path) {
            if !writable {
                return None;
            }
            files.insert(path.to_string(), Vec::new());
        } else if mode.starts_with('w') {
            files.insert(path.to_string(), Vec::new());
        }
        drop(files);
        Some(alloc::boxed::Box::new(MemFile {
            files: Rc::clone(&self.files),
            path: path.to_string(),
            pos: 0,
            writable,
        }))
    }
}

struct MemFile {
    files: SharedFiles,
    path: String,
    pos: usize,
    writable: bool,
}

impl MemFile {
    fn len(&self) -> usize {
        self.files.borrow().get(&self.path).map_or(0, |d| d.len())
    }
}

impl FileHandle for MemFile {
    fn available(&mut self) -> i64 {
        (self.len().saturating_sub(self.pos)) as i64
    }

    fn peek(&mut self) -> i64 {
        self.files.borrow().get(&self.path).and_then(|d| d.get(self.pos)).map_or(-1, |b| *b as i64)
    }

    fn read_byte(&mut self) -> i64 {
        let byte =
            self.files.borrow().get(&self.path).and_then(|d| d.get(self.pos)).copied();
        match byte {
            Some(b) => {
                self.pos += 1;
                b as i64
            }
            None => -1,
        }
    }

    fn write_byte(&mut self, byte: u8) -> u64 {
        if !self.writable {
            return 0;
        }
        self.files.borrow_mut().entry(self.path.clone()).or_default().push(byte);
        1
    }

    fn write_str(&mut self, data: &str) -> u64 {
        if !self.writable {
            return 0;
        }
        self.files
            .borrow_mut()
            .entry(self.path.clone())
            .or_default()
            .extend_from_slice(data.as_bytes());
        data.len() as u64
    }

    fn seek(&mut self, pos: u64) -> bool {
        if pos as usize > self.len() {
            return false;
        }
        self.pos = pos as usize;
        true
    }

    fn position(&self) -> u64 {
        self.pos as u64
    }

    fn size(&self) -> u64 {
        self.len() as u64
    }

    fn flush(&mut self) {}

    fn path(&self) -> String {
        self.path.clone()
    }

    fn name(&self) -> String {
        self.path.rsplit('/').next().unwrap_or("").to_string()
    }

    fn is_file(&self) -> bool {
        true
    }

    fn is_dir(&self) -> bool {
        false
    }

    fn next_entry(&mut self) -> Option<alloc::boxed::Box<dyn FileHandle>> {
        None
    }

    fn next_name(&mut self) -> String {
        String::new()
    }

    fn seek_dir(&mut self, _pos: u64) -> bool {
        false
    }

    fn rewind(&mut self) {
        self.pos = 0;
    }

    fn set_buffer_size(&mut self, _size: u64) -> bool {
        true
    }

    fn last_write(&mut self) -> u64 {
        0
    }
}

// I2C

#[derive(Default)]
pub struct MockI2c {
    pub written: Vec<u8>,
    pub rx: VecDeque<u8>,
    pub receive_callback: u64,
    pub request_callback: u64,
    pub clock_hz: u32,
    pub timeout_ms: u16,
    pub transmissions: Vec<u8>,
}

impl I2cBus for MockI2c {
    fn begin(&mut self, _address: u8) -> bool {
        true
    }

    fn end(&mut self) -> bool {
        true
    }

    fn begin_transmission(&mut self, address: u8) {
        self.transmissions.push(address);
    }

    fn end_transmission(&mut self, _stop_bit: bool) -> u8 {
        0
    }

    fn write(&mut self, data: &[u8]) -> u64 {
        self.written.extend_from_slice(data);
        data.len() as u64
    }

    fn slave_write(&mut self, data: &[u8]) -> u64 {
        self.written.extend_from_slice(data);
        data.len() as u64
    }

    fn read(&mut self) -> i64 {
        self.rx.pop_front().map_or(-1, |b| b as i64)
    }

    fn peek(&mut self) -> i64 {
        self.rx.front().map_or(-1, |b| *b as i64)
    }

    fn request(&mut self, _address: u8, len: u64, _stop_bit: bool) -> u64 {
        len.min(self.rx.len() as u64)
    }

    fn available(&mut self) -> i64 {
        self.rx.len() as i64
    }

    fn flush(&mut self) {}

    fn on_receive(&mut self, guest_fn: u64) {
        self.receive_callback = guest_fn;
    }

    fn on_request(&mut self, guest_fn: u64) {
        self.request_callback = guest_fn;
    }

    fn timeout(&mut self) -> u16 {
        self.timeout_ms
    }

    fn set_timeout(&mut self, ms: u16) {
        self.timeout_ms = ms;
    }

    fn clock(&mut self) -> u32 {
        self.clock_hz
    }

    fn set_clock(&mut self, hz: u32) -> bool {
        self.clock_hz = hz;
        true
    }

    fn set_pins(&mut self, _sda: u8, _scl: u8) -> bool {
        true
    }

    fn set_buffer_size(&mut self, size: u64) -> u64 {
        size
    }
}

// SPI

#[derive(Default)]
pub struct MockSpi {
    pub written: Vec<u8>,
    pub transactions: u32,
    pub clock_div: u32,
}

impl SpiBus for MockSpi {
    fn begin(&mut self, _sck: u8, _miso: u8, _mosi: u8, _ss: u8) {}

    fn end(&mut self) {}

    fn begin_transaction(&mut self, _clock: u32, _bit_order: u8, _data_mode: u8) {
        self.transactions += 1;
    }

    fn end_transaction(&mut self) {}

    fn transfer8(&mut self, data: u8) -> u8 {
        self.written.push(data);
        data
    }

    fn transfer16(&mut self, data: u16) -> u16 {
        self.written.extend_from_slice(&data.to_le_bytes());
        data
    }

    fn transfer32(&mut self, data: u32) -> u32 {
        self.written.extend_from_slice(&data.to_le_bytes());
        data
    }

    fn transfer_bytes(&mut self, data: &[u8], out: &mut [u8]) {
        self.written.extend_from_slice(data);
        // Loopback
        out.copy_from_slice(data);
    }

    fn transfer_bits(&mut self, data: u32, bits: u8) -> u32 {
        data & ((1u32 << bits.min(31)) - 1)
    }

    fn set_hwcs(&mut self, _enabled: bool) {}

    fn set_bit_order(&mut self, _order: u8) {}

    fn set_data_mode(&mut self, _mode: u8) {}

    fn set_frequency(&mut self, _hz: u32) {}

    fn set_clock_div(&mut self, div: u32) {
        self.clock_div = div;
    }

    fn clock_div(&mut self) -> u32 {
        self.clock_div
    }

    fn write8(&mut self, data: u8) {
        self.written.push(data);
    }

    fn write16(&mut self, data: u16) {
        self.written.extend_from_slice(&data.to_le_bytes());
    }

    fn write32(&mut self, data: u32) {
        self.written.extend_from_slice(&data.to_le_bytes());
    }

    fn write_bytes(&mut self, data: &[u8]) {
        self.written.extend_from_slice(data);
    }

    fn write_pixels(&mut self, data: &[u8]) {
        self.written.extend_from_slice(data);
    }

    fn write_pattern(&mut self, data: &[u8], repeat: u32) {
        for _ in 0..repeat {
            self.written.extend_from_slice(data);
        }
    }
}

// Keyboard

pub struct MockKeyboard {
    pub scancodes: VecDeque<u32>,
    pub num_lock: bool,
    pub caps_lock: bool,
    pub scroll_lock: bool,
    pub locked: bool,
    pub resets: u32,
}

impl MockKeyboard {
    pub fn new() -> MockKeyboard {
        MockKeyboard {
            scancodes: VecDeque::new(),
            num_lock: false,
            caps_lock: false,
            scroll_lock: false,
            locked: false,
            resets: 0,
        }
    }
}

impl Keyboard for MockKeyboard {
    fn layout_name(&mut self) -> String {
        "US".to_string()
    }

    fn layout_desc(&mut self) -> String {
        "US International".to_string()
    }

    fn num_lock(&mut self) -> bool {
        self.num_lock
    }

    fn caps_lock(&mut self) -> bool {
        self.caps_lock
    }

    fn scroll_lock(&mut self) -> bool {
        self.scroll_lock
    }

    fn set_num_lock(&mut self, state: bool) {
        self.num_lock = state;
    }

    fn set_caps_lock(&mut self, state: bool) {
        self.caps_lock = state;
    }

    fn set_scroll_lock(&mut self, state: bool) {
        self.scroll_lock = state;
    }

    fn next_scancode(&mut self, _timeout_ms: i64, _resend: bool) -> u32 {
        self.scancodes.pop_front().unwrap_or(0)
    }

    fn device_type(&mut self) -> u64 {
        sbx_riscv_abi::PS2_DEVICE_UNKNOWN
    }

    fn lock(&mut self, _timeout_ms: i64) {
        self.locked = true;
    }

    fn unlock(&mut self) {
        self.locked = false;
    }

    fn reset(&mut self) {
        self.resets += 1;
    }
}

// Display

pub struct MockDisplay;

impl DisplayInfo for MockDisplay {
    fn screen_height(&mut self) -> i64 {
        480
    }

    fn screen_width(&mut self) -> i64 {
        640
    }

    fn viewport_height(&mut self) -> i64 {
        480
    }

    fn viewport_width(&mut self) -> i64 {
        640
    }

    fn supported_colors(&mut self) -> i64 {
        16
    }
}

// NVS

#[derive(Default)]
pub struct MockNvs {
    pub signed_values: HashMap<String, i64>,
    pub unsigned_values: HashMap<String, u64>,
    pub strings: HashMap<String, String>,
    pub wifi_ssid: Option<String>,
    pub wifi_passphrase: Option<String>,
    pub commits: u32,
}

impl NvStorage for MockNvs {
    fn erase(&mut self, key: &str, _force: bool) -> bool {
        let mut hit = self.signed_values.remove(key).is_some();
        hit |= self.unsigned_values.remove(key).is_some();
        hit |= self.strings.remove(key).is_some();
        hit
    }

    fn erase_all(&mut self, _force: bool) -> bool {
        self.signed_values.clear();
        self.unsigned_values.clear();
        self.strings.clear();
        true
    }

    fn commit(&mut self) -> bool {
        self.commits += 1;
        true
    }

    fn set_i64(&mut self, key: &str, value: i64, _force: bool) -> bool {
        self.signed_values.insert(key.to_string(), value);
        true
    }

    fn set_u64(&mut self, key: &str, value: u64, _force: bool) -> bool {
        self.unsigned_values.insert(key.to_string(), value);
        true
    }

    fn set_string(&mut self, key: &str, value: &str, _force: bool) -> bool {
        self.strings.insert(key.to_string(), value.to_string());
        true
    }

    fn get_i64(&mut self, key: &str, default: i64) -> i64 {
        self.signed_values.get(key).copied().unwrap_or(default)
    }

    fn get_u64(&mut self, key: &str, default: u64) -> u64 {
        self.unsigned_values.get(key).copied().unwrap_or(default)
    }

    fn get_string(&mut self, key: &str) -> String {
        self.strings.get(key).cloned().unwrap_or_default()
    }

    fn has_wifi_config(&mut self) -> bool {
        self.wifi_ssid.is_some() && self.wifi_passphrase.is_some()
    }

    fn set_wifi_ssid(&mut self, ssid: &str) -> bool {
        self.wifi_ssid = Some(ssid.to_string());
        true
    }

    fn set_wifi_passphrase(&mut self, passphrase: &str) -> bool {
        self.wifi_passphrase = Some(passphrase.to_string());
        true
    }
}

/// The full mock platform.
pub struct MockHost {
    pub events: EventLog,
    pub console: MockConsole,
    pub clock: MockClock,
    pub sysinfo: MockSystemInfo,
    pub alloc: BumpAllocator,
    pub gpio: MockGpio,
    pub interrupts: MockInterrupts,
    pub fs: MemFileStore,
    pub i2c: MockI2c,
    pub spi: MockSpi,
    pub keyboard: MockKeyboard,
    pub display: MockDisplay,
    pub nvs: MockNvs,
}

impl MockHost {
    pub fn new() -> MockHost {
        let events: EventLog = Rc::new(RefCell::new(Vec::new()));
        MockHost {
            console: MockConsole::new(),
            clock: MockClock { now_ms: 0, events: Rc::clone(&events), rng_state: 0x2545_F491_4F6C_DD1D },
            sysinfo: MockSystemInfo { shell_calls: Vec::new(), shell_exit_code: 0 },
            alloc: BumpAllocator::new(),
            gpio: MockGpio {
                events: Rc::clone(&events),
                input_levels: HashMap::new(),
                analog_level: 0,
            },
            interrupts: MockInterrupts::default(),
            fs: MemFileStore::new(),
            i2c: MockI2c::default(),
            spi: MockSpi::default(),
            keyboard: MockKeyboard::new(),
            display: MockDisplay,
            nvs: MockNvs::default(),
            events,
        }
    }

    /// A context borrowing every facility.
    pub fn context(&mut self) -> HostContext<'_> {
        HostContext {
            console: &mut self.console,
            clock: &mut self.clock,
            sysinfo: &mut self.sysinfo,
            alloc: &mut self.alloc,
            gpio: &mut self.gpio,
            interrupts: &mut self.interrupts,
            fs: &mut self.fs,
            i2c: &mut self.i2c,
            spi: &mut self.spi,
            keyboard: &mut self.keyboard,
            display: &mut self.display,
            nvs: &mut self.nvs,
        }
    }

    /// Snapshot of the shared event log.
    pub fn recorded_events(&self) -> Vec<HostEvent> {
        self.events.borrow().clone()
    }
}

impl Default for MockHost {
    fn default() -> Self {
        MockHost::new()
    }
}

//! Host-facility contracts.
//!
//! Concrete implementations of the host-call groups (terminal, clocks,
//! GPIO, buses, storage, devices) live outside this crate. The VM reaches
//! them only through these traits, bundled into a [`HostContext`] that is
//! passed to `run`. Nothing here is a hidden global: a host embedding
//! several VMs decides how the facilities are shared.
//!
//! Handlers must not re-enter the VM and must report failure in-band
//! (sentinel values), never by panicking.

pub mod bus;
pub mod devices;
pub mod fs;
pub mod io;

pub use bus::{I2cBus, SpiBus};
pub use devices::{DisplayInfo, GpioPort, GuestAllocator, InterruptCtl, Keyboard, NvStorage};
pub use fs::{FileHandle, FileStore};
pub use io::{Clock, Console, SystemInfo};

/// Everything the syscall dispatcher needs from the host, borrowed for the
/// duration of one `run` (or one `step`).
pub struct HostContext<'h> {
    pub console: &'h mut dyn Console,
    pub clock: &'h mut dyn Clock,
    pub sysinfo: &'h mut dyn SystemInfo,
    pub alloc: &'h mut dyn GuestAllocator,
    pub gpio: &'h mut dyn GpioPort,
    pub interrupts: &'h mut dyn InterruptCtl,
    pub fs: &'h mut dyn FileStore,
    pub i2c: &'h mut dyn I2cBus,
    pub spi: &'h mut dyn SpiBus,
    pub keyboard: &'h mut dyn Keyboard,
    pub display: &'h mut dyn DisplayInfo,
    pub nvs: &'h mut dyn NvStorage,
}

//! The host-call enumeration.
//!
//! Call ids are assigned by position: groups in the fixed order IO, Sys,
//! Mem, GPIO, Int, FS, Args, I2C, Keyboard, Display, NVS, SPI, Runtime,
//! operations in declaration order within each group. New operations are
//! appended; nothing is ever reordered or removed.

macro_rules! define_syscalls {
    ($($(#[$attr:meta])* $name:ident,)+) => {
        /// One variant per host call, in ABI order.
        ///
        /// The discriminant of each variant is its wire id.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Syscall {
            $($(#[$attr])* $name,)+
        }

        impl Syscall {
            /// Every host call, ordered by wire id.
            pub const ALL: &'static [Syscall] = &[$(Syscall::$name),+];

            /// Number of defined host calls.
            pub const COUNT: usize = Self::ALL.len();

            /// Map a raw id (as found in register a7) to a host call.
            pub fn from_id(id: u64) -> Option<Syscall> {
                usize::try_from(id).ok().and_then(|i| Self::ALL.get(i)).copied()
            }

            /// The wire id of this host call.
            pub const fn id(self) -> u64 {
                self as u64
            }
        }
    };
}

define_syscalls! {
    // IO: the terminal stream
    IoPrints,
    IoPrintn,
    IoPrintd,
    IoReadch,
    IoReadline,
    IoRead,
    IoAvailable,
    IoPeek,
    IoFind,
    IoFindUntil,
    IoSetTimeout,
    IoGetTimeout,

    // Sys: clocks, process control, host environment
    SysDelayMs,
    SysMicros,
    SysMillis,
    SysShellexec,
    SysExit,
    SysInfoStr,
    SysInfoNum,
    SysRandom,
    SysChangeDir,
    SysWorkingDir,

    // Mem: guest heap management
    MemAlloc,
    MemCalloc,
    MemRealloc,
    MemFree,
    MemSet,

    // GPIO
    GpioPinMode,
    GpioDigitalRead,
    GpioDigitalWrite,
    GpioAnalogRead,
    GpioAnalogWrite,
    GpioPulseIn,
    GpioPulseInLong,
    GpioShiftIn,
    GpioShiftOut,
    GpioTone,
    GpioNoTone,

    // Int: interrupt control
    IntEnable,
    IntDisable,
    IntAttach,
    IntDetach,

    // FS: path and handle operations
    FsMkdir,
    FsRmdir,
    FsDelete,
    FsExists,
    FsIsFile,
    FsIsDir,
    FsOpen,
    FsClose,
    FsAvailable,
    FsFlush,
    FsPeek,
    FsSeek,
    FsSize,
    FsRead,
    FsWriteByte,
    FsWriteString,
    FsPosition,
    FsPath,
    FsName,
    FsNext,
    FsBufsize,
    FsLastwrite,
    FsSeekDir,
    FsNextName,
    FsRewind,

    // Args: command-line arguments
    ArgsCount,
    ArgsStr,

    // I2C
    I2cBegin,
    I2cEnd,
    I2cBeginTransmission,
    I2cEndTransmission,
    I2cWrite,
    I2cSlaveWrite,
    I2cRead,
    I2cPeek,
    I2cRequest,
    I2cAvailable,
    I2cFlush,
    I2cOnReceive,
    I2cOnRequest,
    I2cGetTimeout,
    I2cSetTimeout,
    I2cGetClock,
    I2cSetClock,
    I2cPins,
    I2cBufsize,

    // Keyboard
    KbLayoutName,
    KbLayoutDesc,
    KbLedGetNum,
    KbLedGetCaps,
    KbLedGetScroll,
    KbLedSetNum,
    KbLedSetCaps,
    KbLedSetScroll,
    KbNextScancode,
    KbDeviceType,
    KbLock,
    KbUnlock,
    KbReset,

    // Display
    DisplayScreenHeight,
    DisplayScreenWidth,
    DisplayViewportHeight,
    DisplayViewportWidth,
    DisplaySupportedColors,

    // NVS: non-volatile key/value storage
    NvsErase,
    NvsEraseAll,
    NvsSetI8,
    NvsSetI16,
    NvsSetI32,
    NvsSetI64,
    NvsSetU8,
    NvsSetU16,
    NvsSetU32,
    NvsSetU64,
    NvsSetString,
    NvsGetI8,
    NvsGetI16,
    NvsGetI32,
    NvsGetI64,
    NvsGetU8,
    NvsGetU16,
    NvsGetU32,
    NvsGetU64,
    NvsGetString,
    NvsCommit,
    NvsHasWifiConfig,
    NvsSetWifiSsid,
    NvsSetWifiPword,

    // SPI
    SpiBegin,
    SpiEnd,
    SpiBeginTransaction,
    SpiEndTransaction,
    SpiTransfer8,
    SpiTransfer16,
    SpiTransfer32,
    SpiTransferBytes,
    SpiTransferBits,
    SpiSetHwcs,
    SpiSetBitOrder,
    SpiSetDataMode,
    SpiSetFrequency,
    SpiSetClockDiv,
    SpiGetClockDiv,
    SpiWrite8,
    SpiWrite16,
    SpiWrite32,
    SpiWriteBytes,
    SpiWritePixels,
    SpiWritePattern,

    // Runtime: string streaming and cooperative yield
    RtStrpass,
    RtYield,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_positional() {
        assert_eq!(Syscall::IoPrints.id(), 0);
        assert_eq!(Syscall::SysDelayMs.id(), 12);
        assert_eq!(Syscall::MemAlloc.id(), 22);
        assert_eq!(Syscall::GpioPinMode.id(), 27);
        assert_eq!(Syscall::IntEnable.id(), 38);
        assert_eq!(Syscall::FsMkdir.id(), 42);
        assert_eq!(Syscall::ArgsCount.id(), 67);
        assert_eq!(Syscall::I2cBegin.id(), 69);
        assert_eq!(Syscall::KbLayoutName.id(), 88);
        assert_eq!(Syscall::DisplayScreenHeight.id(), 101);
        assert_eq!(Syscall::NvsErase.id(), 106);
        assert_eq!(Syscall::SpiBegin.id(), 130);
        assert_eq!(Syscall::RtStrpass.id(), 151);
        assert_eq!(Syscall::RtYield.id(), 152);
        assert_eq!(Syscall::COUNT, 153);
    }

    #[test]
    fn test_from_id_round_trip() {
        for (i, sc) in Syscall::ALL.iter().enumerate() {
            assert_eq!(Syscall::from_id(i as u64), Some(*sc));
            assert_eq!(sc.id(), i as u64);
        }
        assert_eq!(Syscall::from_id(Syscall::COUNT as u64), None);
        assert_eq!(Syscall::from_id(0xFFFF), None);
        assert_eq!(Syscall::from_id(u64::MAX), None);
    }
}

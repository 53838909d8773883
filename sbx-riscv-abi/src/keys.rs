//! Key enums passed through the `Sys::info_*` host calls.

/// Numeric system-information keys accepted by `Sys::info_num`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SysInfoNum {
    ChipCores,
    ChipRev,
    CpuFreq,
    CycleCount,
    EfuseMac,
    FlashMode,
    FlashSpeed,
    FreeHeap,
    FreePsram,
    HeapSize,
    MaxAllocHeap,
    MinFreeHeap,
    MinFreePsram,
    PsramSize,
    TempVal,
    CardType,
    CardSize,
    NumSectors,
    SectorSize,
    TotalStorage,
    UsedStorage,
}

impl SysInfoNum {
    const ALL: &'static [SysInfoNum] = &[
        SysInfoNum::ChipCores,
        SysInfoNum::ChipRev,
        SysInfoNum::CpuFreq,
        SysInfoNum::CycleCount,
        SysInfoNum::EfuseMac,
        SysInfoNum::FlashMode,
        SysInfoNum::FlashSpeed,
        SysInfoNum::FreeHeap,
        SysInfoNum::FreePsram,
        SysInfoNum::HeapSize,
        SysInfoNum::MaxAllocHeap,
        SysInfoNum::MinFreeHeap,
        SysInfoNum::MinFreePsram,
        SysInfoNum::PsramSize,
        SysInfoNum::TempVal,
        SysInfoNum::CardType,
        SysInfoNum::CardSize,
        SysInfoNum::NumSectors,
        SysInfoNum::SectorSize,
        SysInfoNum::TotalStorage,
        SysInfoNum::UsedStorage,
    ];

    /// Map a raw key from a syscall argument register.
    pub fn from_id(id: u64) -> Option<SysInfoNum> {
        usize::try_from(id).ok().and_then(|i| Self::ALL.get(i)).copied()
    }
}

/// String system-information keys accepted by `Sys::info_str`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SysInfoStr {
    ChipModel,
    SdkVersion,
    SketchMd5,
}

impl SysInfoStr {
    const ALL: &'static [SysInfoStr] =
        &[SysInfoStr::ChipModel, SysInfoStr::SdkVersion, SysInfoStr::SketchMd5];

    /// Map a raw key from a syscall argument register.
    pub fn from_id(id: u64) -> Option<SysInfoStr> {
        usize::try_from(id).ok().and_then(|i| Self::ALL.get(i)).copied()
    }
}

/// Storage card types reported by `Sys::info_num(CardType)`.
///
/// `None` is the defined answer when no card is inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SdCardType {
    None,
    Mmc,
    Sd,
    Sdhc,
    Unknown,
}

impl SdCardType {
    /// The value a host reports for this card type.
    pub const fn id(self) -> i64 {
        self as i64
    }
}

/// Device type reported by `Keyboard::device_type` when probing failed.
pub const PS2_DEVICE_UNKNOWN: u64 = 0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sysinfo_keys() {
        assert_eq!(SysInfoNum::from_id(0), Some(SysInfoNum::ChipCores));
        assert_eq!(SysInfoNum::from_id(15), Some(SysInfoNum::CardType));
        assert_eq!(SysInfoNum::from_id(20), Some(SysInfoNum::UsedStorage));
        assert_eq!(SysInfoNum::from_id(21), None);

        assert_eq!(SysInfoStr::from_id(2), Some(SysInfoStr::SketchMd5));
        assert_eq!(SysInfoStr::from_id(3), None);
    }

    #[test]
    fn test_card_type_values() {
        assert_eq!(SdCardType::None.id(), 0);
        assert_eq!(SdCardType::Unknown.id(), 4);
    }
}

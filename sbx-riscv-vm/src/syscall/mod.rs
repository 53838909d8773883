//! The host-call dispatcher.
//!
//! The guest places the call id in a7 and up to four arguments in a0..a3,
//! then executes ECALL. Dispatch marshals arguments out of registers and
//! guest memory, invokes the facility behind the contract, and writes the
//! return value to a0 — but only for operations that produce one. Void
//! operations leave a0 untouched, exactly as guests compiled against the
//! original ABI expect.
//!
//! The match below is the registry: exhaustive over the ABI enumeration,
//! so adding a host call without wiring a handler fails to compile.

use sbx_riscv_abi::Syscall;
use sbx_riscv_inst::Gpr;

use crate::error::VmError;
use crate::host::HostContext;
use crate::vm::Riscv64Vm;

mod display;
mod fs;
mod gpio;
mod i2c;
mod io;
mod keyboard;
mod mem;
mod nvs;
mod spi;
mod sys;

/// Positional syscall argument (a0..a3).
#[inline]
pub(crate) fn arg(vm: &Riscv64Vm, n: usize) -> u64 {
    let r = match n {
        0 => Gpr::A0,
        1 => Gpr::A1,
        2 => Gpr::A2,
        _ => Gpr::A3,
    };
    vm.reg(r)
}

/// Handle the ECALL the VM just executed. An unknown id is a fault.
pub(crate) fn dispatch(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> Result<(), VmError> {
    let id = vm.reg(Gpr::A7);
    let Some(call) = Syscall::from_id(id) else {
        return Err(VmError::InvalidSyscall { id });
    };
    log::trace!("host call {call:?} ({}, {}, {}, {})", arg(vm, 0), arg(vm, 1), arg(vm, 2), arg(vm, 3));

    let ret = match call {
        Syscall::IoPrints => io::prints(vm, host)?,
        Syscall::IoPrintn => io::printn(vm, host)?,
        Syscall::IoPrintd => io::printd(vm, host)?,
        Syscall::IoReadch => io::readch(vm, host)?,
        Syscall::IoReadline => io::readline(vm, host)?,
        Syscall::IoRead => io::read(vm, host)?,
        Syscall::IoAvailable => io::available(vm, host)?,
        Syscall::IoPeek => io::peek(vm, host)?,
        Syscall::IoFind => io::find(vm, host)?,
        Syscall::IoFindUntil => io::find_until(vm, host)?,
        Syscall::IoSetTimeout => io::set_timeout(vm, host)?,
        Syscall::IoGetTimeout => io::get_timeout(vm, host)?,

        Syscall::SysDelayMs => sys::delay_ms(vm, host)?,
        Syscall::SysMicros => sys::micros(vm, host)?,
        Syscall::SysMillis => sys::millis(vm, host)?,
        Syscall::SysShellexec => sys::shellexec(vm, host)?,
        Syscall::SysExit => sys::exit(vm, host)?,
        Syscall::SysInfoStr => sys::info_str(vm, host)?,
        Syscall::SysInfoNum => sys::info_num(vm, host)?,
        Syscall::SysRandom => sys::random(vm, host)?,
        Syscall::SysChangeDir => sys::change_dir(vm, host)?,
        Syscall::SysWorkingDir => sys::working_dir(vm, host)?,

        Syscall::MemAlloc => mem::alloc(vm, host)?,
        Syscall::MemCalloc => mem::calloc(vm, host)?,
        Syscall::MemRealloc => mem::realloc(vm, host)?,
        Syscall::MemFree => mem::free(vm, host)?,
        Syscall::MemSet => mem::set(vm, host)?,

        Syscall::GpioPinMode => gpio::pin_mode(vm, host)?,
        Syscall::GpioDigitalRead => gpio::digital_read(vm, host)?,
        Syscall::GpioDigitalWrite => gpio::digital_write(vm, host)?,
        Syscall::GpioAnalogRead => gpio::analog_read(vm, host)?,
        Syscall::GpioAnalogWrite => gpio::analog_write(vm, host)?,
        Syscall::GpioPulseIn => gpio::pulse_in(vm, host)?,
        Syscall::GpioPulseInLong => gpio::pulse_in_long(vm, host)?,
        Syscall::GpioShiftIn => gpio::shift_in(vm, host)?,
        Syscall::GpioShiftOut => gpio::shift_out(vm, host)?,
        Syscall::GpioTone => gpio::tone(vm, host)?,
        Syscall::GpioNoTone => gpio::no_tone(vm, host)?,

        Syscall::IntEnable => gpio::int_enable(vm, host)?,
        Syscall::IntDisable => gpio::int_disable(vm, host)?,
        Syscall::IntAttach => gpio::int_attach(vm, host)?,
        Syscall::IntDetach => gpio::int_detach(vm, host)?,

        Syscall::FsMkdir => fs::mkdir(vm, host)?,
        Syscall::FsRmdir => fs::rmdir(vm, host)?,
        Syscall::FsDelete => fs::delete(vm, host)?,
        Syscall::FsExists => fs::exists(vm, host)?,
        Syscall::FsIsFile => fs::is_file(vm, host)?,
        Syscall::FsIsDir => fs::is_dir(vm, host)?,
        Syscall::FsOpen => fs::open(vm, host)?,
        Syscall::FsClose => fs::close(vm, host)?,
        Syscall::FsAvailable => fs::available(vm, host)?,
        Syscall::FsFlush => fs::flush(vm, host)?,
        Syscall::FsPeek => fs::peek(vm, host)?,
        Syscall::FsSeek => fs::seek(vm, host)?,
        Syscall::FsSize => fs::size(vm, host)?,
        Syscall::FsRead => fs::read(vm, host)?,
        Syscall::FsWriteByte => fs::write_byte(vm, host)?,
        Syscall::FsWriteString => fs::write_string(vm, host)?,
        Syscall::FsPosition => fs::position(vm, host)?,
        Syscall::FsPath => fs::path(vm, host)?,
        Syscall::FsName => fs::name(vm, host)?,
        Syscall::FsNext => fs::next(vm, host)?,
        Syscall::FsBufsize => fs::bufsize(vm, host)?,
        Syscall::FsLastwrite => fs::lastwrite(vm, host)?,
        Syscall::FsSeekDir => fs::seek_dir(vm, host)?,
        Syscall::FsNextName => fs::next_name(vm, host)?,
        Syscall::FsRewind => fs::rewind(vm, host)?,

        Syscall::ArgsCount => sys::args_count(vm, host)?,
        Syscall::ArgsStr => sys::args_str(vm, host)?,

        Syscall::I2cBegin => i2c::begin(vm, host)?,
        Syscall::I2cEnd => i2c::end(vm, host)?,
        Syscall::I2cBeginTransmission => i2c::begin_transmission(vm, host)?,
        Syscall::I2cEndTransmission => i2c::end_transmission(vm, host)?,
        Syscall::I2cWrite => i2c::write(vm, host)?,
        Syscall::I2cSlaveWrite => i2c::slave_write(vm, host)?,
        Syscall::I2cRead => i2c::read(vm, host)?,
        Syscall::I2cPeek => i2c::peek(vm, host)?,
        Syscall::I2cRequest => i2c::request(vm, host)?,
        Syscall::I2cAvailable => i2c::available(vm, host)?,
        Syscall::I2cFlush => i2c::flush(vm, host)?,
        Syscall::I2cOnReceive => i2c::on_receive(vm, host)?,
        Syscall::I2cOnRequest => i2c::on_request(vm, host)?,
        Syscall::I2cGetTimeout => i2c::get_timeout(vm, host)?,
        Syscall::I2cSetTimeout => i2c::set_timeout(vm, host)?,
        Syscall::I2cGetClock => i2c::get_clock(vm, host)?,
        Syscall::I2cSetClock => i2c::set_clock(vm, host)?,
        Syscall::I2cPins => i2c::pins(vm, host)?,
        Syscall::I2cBufsize => i2c::bufsize(vm, host)?,

        Syscall::KbLayoutName => keyboard::kb_layout_name(vm, host)?,
        Syscall::KbLayoutDesc => keyboard::kb_layout_desc(vm, host)?,
        Syscall::KbLedGetNum => keyboard::kb_led_get_num(vm, host)?,
        Syscall::KbLedGetCaps => keyboard::kb_led_get_caps(vm, host)?,
        Syscall::KbLedGetScroll => keyboard::kb_led_get_scroll(vm, host)?,
        Syscall::KbLedSetNum => keyboard::kb_led_set_num(vm, host)?,
        Syscall::KbLedSetCaps => keyboard::kb_led_set_caps(vm, host)?,
        Syscall::KbLedSetScroll => keyboard::kb_led_set_scroll(vm, host)?,
        Syscall::KbNextScancode => keyboard::kb_next_scancode(vm, host)?,
        Syscall::KbDeviceType => keyboard::kb_device_type(vm, host)?,
        Syscall::KbLock => keyboard::kb_lock(vm, host)?,
        Syscall::KbUnlock => keyboard::kb_unlock(vm, host)?,
        Syscall::KbReset => keyboard::kb_reset(vm, host)?,

        Syscall::DisplayScreenHeight => display::screen_height(vm, host)?,
        Syscall::DisplayScreenWidth => display::screen_width(vm, host)?,
        Syscall::DisplayViewportHeight => display::viewport_height(vm, host)?,
        Syscall::DisplayViewportWidth => display::viewport_width(vm, host)?,
        Syscall::DisplaySupportedColors => display::supported_colors(vm, host)?,

        Syscall::NvsErase => nvs::erase(vm, host)?,
        Syscall::NvsEraseAll => nvs::erase_all(vm, host)?,
        Syscall::NvsSetI8 => nvs::set_signed(vm, host, 8)?,
        Syscall::NvsSetI16 => nvs::set_signed(vm, host, 16)?,
        Syscall::NvsSetI32 => nvs::set_signed(vm, host, 32)?,
        Syscall::NvsSetI64 => nvs::set_signed(vm, host, 64)?,
        Syscall::NvsSetU8 => nvs::set_unsigned(vm, host, 8)?,
        Syscall::NvsSetU16 => nvs::set_unsigned(vm, host, 16)?,
        Syscall::NvsSetU32 => nvs::set_unsigned(vm, host, 32)?,
        Syscall::NvsSetU64 => nvs::set_unsigned(vm, host, 64)?,
        Syscall::NvsSetString => nvs::set_string(vm, host)?,
        Syscall::NvsGetI8 => nvs::get_signed(vm, host, 8)?,
        Syscall::NvsGetI16 => nvs::get_signed(vm, host, 16)?,
        Syscall::NvsGetI32 => nvs::get_signed(vm, host, 32)?,
        Syscall::NvsGetI64 => nvs::get_signed(vm, host, 64)?,
        Syscall::NvsGetU8 => nvs::get_unsigned(vm, host, 8)?,
        Syscall::NvsGetU16 => nvs::get_unsigned(vm, host, 16)?,
        Syscall::NvsGetU32 => nvs::get_unsigned(vm, host, 32)?,
        Syscall::NvsGetU64 => nvs::get_unsigned(vm, host, 64)?,
        Syscall::NvsGetString => nvs::get_string(vm, host)?,
        Syscall::NvsCommit => nvs::commit(vm, host)?,
        Syscall::NvsHasWifiConfig => nvs::has_wifi_config(vm, host)?,
        Syscall::NvsSetWifiSsid => nvs::set_wifi_ssid(vm, host)?,
        Syscall::NvsSetWifiPword => nvs::set_wifi_pword(vm, host)?,

        Syscall::SpiBegin => spi::begin(vm, host)?,
        Syscall::SpiEnd => spi::end(vm, host)?,
        Syscall::SpiBeginTransaction => spi::begin_transaction(vm, host)?,
        Syscall::SpiEndTransaction => spi::end_transaction(vm, host)?,
        Syscall::SpiTransfer8 => spi::transfer8(vm, host)?,
        Syscall::SpiTransfer16 => spi::transfer16(vm, host)?,
        Syscall::SpiTransfer32 => spi::transfer32(vm, host)?,
        Syscall::SpiTransferBytes => spi::transfer_bytes(vm, host)?,
        Syscall::SpiTransferBits => spi::transfer_bits(vm, host)?,
        Syscall::SpiSetHwcs => spi::set_hwcs(vm, host)?,
        Syscall::SpiSetBitOrder => spi::set_bit_order(vm, host)?,
        Syscall::SpiSetDataMode => spi::set_data_mode(vm, host)?,
        Syscall::SpiSetFrequency => spi::set_frequency(vm, host)?,
        Syscall::SpiSetClockDiv => spi::set_clock_div(vm, host)?,
        Syscall::SpiGetClockDiv => spi::get_clock_div(vm, host)?,
        Syscall::SpiWrite8 => spi::write8(vm, host)?,
        Syscall::SpiWrite16 => spi::write16(vm, host)?,
        Syscall::SpiWrite32 => spi::write32(vm, host)?,
        Syscall::SpiWriteBytes => spi::write_bytes(vm, host)?,
        Syscall::SpiWritePixels => spi::write_pixels(vm, host)?,
        Syscall::SpiWritePattern => spi::write_pattern(vm, host)?,

        Syscall::RtStrpass => sys::strpass(vm, host)?,
        Syscall::RtYield => sys::rt_yield(vm, host)?,
    };

    if let Some(val) = ret {
        vm.set_reg(Gpr::A0, val);
    }
    Ok(())
}

#[cfg(all(test, feature = "std"))]
mod tests {
    extern crate alloc;

    use alloc::string::String;

    use sbx_riscv_abi::{INVALID_FILE_HANDLE, Syscall};
    use sbx_riscv_inst::Gpr;

    use super::dispatch;
    use crate::error::VmError;
    use crate::host::FileStore;
    use crate::test_util::MockHost;
    use crate::vm::Riscv64Vm;

    fn put_cstr(vm: &mut Riscv64Vm, addr: u64, text: &str) {
        for (i, b) in text.bytes().chain([0]).enumerate() {
            vm.memory_mut().write_u8(addr + i as u64, b).unwrap();
        }
    }

    fn call(vm: &mut Riscv64Vm, host: &mut MockHost, sc: Syscall, args: [u64; 4]) -> u64 {
        vm.set_reg(Gpr::A7, sc.id());
        vm.set_reg(Gpr::A0, args[0]);
        vm.set_reg(Gpr::A1, args[1]);
        vm.set_reg(Gpr::A2, args[2]);
        vm.set_reg(Gpr::A3, args[3]);
        dispatch(vm, &mut host.context()).unwrap();
        vm.reg(Gpr::A0)
    }

    #[test]
    fn test_unknown_id_is_a_fault() {
        let mut vm = Riscv64Vm::new();
        let mut host = MockHost::new();
        vm.set_reg(Gpr::A7, 0xFFFF);
        let err = dispatch(&mut vm, &mut host.context()).unwrap_err();
        assert_eq!(err, VmError::InvalidSyscall { id: 0xFFFF });
    }

    #[test]
    fn test_void_operations_leave_a0_untouched() {
        let mut vm = Riscv64Vm::new();
        let mut host = MockHost::new();
        // Sys::delay_ms returns nothing; a0 keeps carrying the argument
        let a0 = call(&mut vm, &mut host, Syscall::SysDelayMs, [250, 0, 0, 0]);
        assert_eq!(a0, 250);
        assert_eq!(host.clock.now_ms, 250);
    }

    #[test]
    fn test_prints_reads_guest_string() {
        let mut vm = Riscv64Vm::new();
        let mut host = MockHost::new();
        put_cstr(&mut vm, 0x2000, "hi there");
        call(&mut vm, &mut host, Syscall::IoPrints, [0x2000, 0, 0, 0]);
        assert_eq!(host.console.output, "hi there");
    }

    #[test]
    fn test_prints_unterminated_string_faults() {
        let mut vm = Riscv64Vm::new();
        let mut host = MockHost::new();
        let base = sbx_riscv_abi::MEM_SIZE as u64 - 2;
        vm.memory_mut().write_u8(base, b'x').unwrap();
        vm.memory_mut().write_u8(base + 1, b'y').unwrap();
        vm.set_reg(Gpr::A7, Syscall::IoPrints.id());
        vm.set_reg(Gpr::A0, base);
        assert!(matches!(
            dispatch(&mut vm, &mut host.context()),
            Err(VmError::MemoryFault { .. })
        ));
    }

    #[test]
    fn test_printn_and_printd_format_values() {
        let mut vm = Riscv64Vm::new();
        let mut host = MockHost::new();
        call(&mut vm, &mut host, Syscall::IoPrintn, [(-42i64) as u64, 0, 0, 0]);
        call(&mut vm, &mut host, Syscall::IoPrintd, [(2.5f64).to_bits(), 0, 0, 0]);
        assert_eq!(host.console.output, "-422.5");
    }

    #[test]
    fn test_readline_stages_stream() {
        let mut vm = Riscv64Vm::new();
        let mut host = MockHost::new();
        host.console.feed("abc\nrest");
        let len = call(&mut vm, &mut host, Syscall::IoReadline, [0; 4]);
        assert_eq!(len, 3);
        for expected in [b'a', b'b', b'c', 0] {
            let got = call(&mut vm, &mut host, Syscall::RtStrpass, [0; 4]);
            assert_eq!(got, expected as u64);
        }
    }

    #[test]
    fn test_mem_set_fills_and_returns_dest() {
        let mut vm = Riscv64Vm::new();
        let mut host = MockHost::new();
        let dest = call(&mut vm, &mut host, Syscall::MemSet, [0x3000, 0xAB, 16, 0]);
        assert_eq!(dest, 0x3000);
        assert_eq!(vm.memory().slice(0x3000, 16).unwrap(), &[0xAB; 16]);
        assert_eq!(vm.memory().read_u8(0x3010).unwrap(), 0);
    }

    #[test]
    fn test_mem_alloc_writes_through_out_pointer() {
        let mut vm = Riscv64Vm::new();
        let mut host = MockHost::new();
        call(&mut vm, &mut host, Syscall::MemAlloc, [0x2000, 64, 0, 0]);
        let ptr = vm.memory().read_u64(0x2000).unwrap();
        assert_ne!(ptr, 0);
        assert_eq!(host.alloc.allocations, alloc::vec![(ptr, 64)]);
    }

    #[test]
    fn test_fs_open_missing_file_yields_invalid_handle() {
        let mut vm = Riscv64Vm::new();
        let mut host = MockHost::new();
        put_cstr(&mut vm, 0x2000, "/nope.txt");
        put_cstr(&mut vm, 0x2100, "r");
        let handle = call(&mut vm, &mut host, Syscall::FsOpen, [0x2000, 0x2100, 0, 0]);
        assert_eq!(handle, INVALID_FILE_HANDLE as u64);
    }

    #[test]
    fn test_fs_write_read_through_handles() {
        let mut vm = Riscv64Vm::new();
        let mut host = MockHost::new();
        put_cstr(&mut vm, 0x2000, "/f.txt");
        put_cstr(&mut vm, 0x2100, "w");
        put_cstr(&mut vm, 0x2200, "payload");

        let h = call(&mut vm, &mut host, Syscall::FsOpen, [0x2000, 0x2100, 0, 0]);
        assert_eq!(h, 0);
        call(&mut vm, &mut host, Syscall::FsWriteString, [h, 0x2200, 0, 0]);
        call(&mut vm, &mut host, Syscall::FsClose, [h, 0, 0, 0]);
        assert_eq!(vm.open_file_count(), 0);
        assert_eq!(host.fs.contents("/f.txt").unwrap(), b"payload");

        put_cstr(&mut vm, 0x2100, "r");
        let h = call(&mut vm, &mut host, Syscall::FsOpen, [0x2000, 0x2100, 0, 0]);
        assert_eq!(call(&mut vm, &mut host, Syscall::FsSize, [h, 0, 0, 0]), 7);
        assert_eq!(call(&mut vm, &mut host, Syscall::FsRead, [h, 0, 0, 0]), b'p' as u64);
        assert_eq!(call(&mut vm, &mut host, Syscall::FsPosition, [h, 0, 0, 0]), 1);
    }

    #[test]
    fn test_fs_handle_ops_on_bad_handle_use_sentinels() {
        let mut vm = Riscv64Vm::new();
        let mut host = MockHost::new();
        let bad = INVALID_FILE_HANDLE as u64;
        assert_eq!(call(&mut vm, &mut host, Syscall::FsRead, [bad, 0, 0, 0]), (-1i64) as u64);
        assert_eq!(call(&mut vm, &mut host, Syscall::FsAvailable, [bad, 0, 0, 0]), 0);
        assert_eq!(call(&mut vm, &mut host, Syscall::FsIsFile, [bad, 0, 0, 0]), 0);
        assert_eq!(call(&mut vm, &mut host, Syscall::FsSeek, [bad, 10, 0, 0]), 0);
    }

    #[test]
    fn test_i2c_callback_slots_are_distinct() {
        let mut vm = Riscv64Vm::new();
        let mut host = MockHost::new();
        call(&mut vm, &mut host, Syscall::I2cOnReceive, [0x1111, 0, 0, 0]);
        call(&mut vm, &mut host, Syscall::I2cOnRequest, [0x2222, 0, 0, 0]);
        assert_eq!(host.i2c.receive_callback, 0x1111);
        assert_eq!(host.i2c.request_callback, 0x2222);
    }

    #[test]
    fn test_i2c_write_marshals_guest_buffer() {
        let mut vm = Riscv64Vm::new();
        let mut host = MockHost::new();
        vm.memory_mut().slice_mut(0x4000, 3).unwrap().copy_from_slice(&[1, 2, 3]);
        let n = call(&mut vm, &mut host, Syscall::I2cWrite, [0x4000, 3, 0, 0]);
        assert_eq!(n, 3);
        assert_eq!(host.i2c.written, alloc::vec![1, 2, 3]);
    }

    #[test]
    fn test_spi_transfer_bytes_round_trips() {
        let mut vm = Riscv64Vm::new();
        let mut host = MockHost::new();
        vm.memory_mut().slice_mut(0x4000, 4).unwrap().copy_from_slice(b"abcd");
        call(&mut vm, &mut host, Syscall::SpiTransferBytes, [0x4000, 0x4100, 4, 0]);
        assert_eq!(vm.memory().slice(0x4100, 4).unwrap(), b"abcd");
        assert_eq!(host.spi.written, b"abcd");
    }

    #[test]
    fn test_nvs_getters_return_declared_width() {
        let mut vm = Riscv64Vm::new();
        let mut host = MockHost::new();
        put_cstr(&mut vm, 0x2000, "key");

        // Store a 16-bit value and read it back through the i16 getter
        call(&mut vm, &mut host, Syscall::NvsSetI16, [0x2000, 0x8000, 1, 0]);
        let got = call(&mut vm, &mut host, Syscall::NvsGetI16, [0x2000, 0, 0, 0]);
        assert_eq!(got as i64, -32768);

        // u32 getter must not narrow to 8 bits
        call(&mut vm, &mut host, Syscall::NvsSetU32, [0x2000, 0xAABB_CCDD, 1, 0]);
        let got = call(&mut vm, &mut host, Syscall::NvsGetU32, [0x2000, 0, 0, 0]);
        assert_eq!(got, 0xAABB_CCDD);
    }

    #[test]
    fn test_nvs_wifi_config_round_trip() {
        let mut vm = Riscv64Vm::new();
        let mut host = MockHost::new();
        assert_eq!(call(&mut vm, &mut host, Syscall::NvsHasWifiConfig, [0; 4]), 0);
        put_cstr(&mut vm, 0x2000, "net");
        call(&mut vm, &mut host, Syscall::NvsSetWifiSsid, [0x2000, 0, 0, 0]);
        put_cstr(&mut vm, 0x2000, "secret");
        call(&mut vm, &mut host, Syscall::NvsSetWifiPword, [0x2000, 0, 0, 0]);
        assert_eq!(call(&mut vm, &mut host, Syscall::NvsHasWifiConfig, [0; 4]), 1);
    }

    #[test]
    fn test_change_dir_validates_against_host() {
        let mut vm = Riscv64Vm::new();
        let mut host = MockHost::new();
        put_cstr(&mut vm, 0x2000, "/data");

        assert_eq!(call(&mut vm, &mut host, Syscall::SysChangeDir, [0x2000, 0, 0, 0]), 0);
        assert_eq!(vm.working_dir(), "/");

        host.fs.mkdir("/data");
        assert_eq!(call(&mut vm, &mut host, Syscall::SysChangeDir, [0x2000, 0, 0, 0]), 1);
        assert_eq!(vm.working_dir(), "/data");

        let len = call(&mut vm, &mut host, Syscall::SysWorkingDir, [0; 4]);
        assert_eq!(len, 5);
        let collected: String = (0..len)
            .map(|_| call(&mut vm, &mut host, Syscall::RtStrpass, [0; 4]) as u8 as char)
            .collect();
        assert_eq!(collected, "/data");
    }

    #[test]
    fn test_shellexec_marshals_argv_array() {
        let mut vm = Riscv64Vm::new();
        let mut host = MockHost::new();
        put_cstr(&mut vm, 0x2000, "ls");
        put_cstr(&mut vm, 0x2100, "-l");
        put_cstr(&mut vm, 0x2200, "/sd");
        vm.memory_mut().write_u64(0x2300, 0x2100).unwrap();
        vm.memory_mut().write_u64(0x2308, 0x2200).unwrap();

        host.sysinfo.shell_exit_code = 3;
        let code = call(&mut vm, &mut host, Syscall::SysShellexec, [0x2000, 2, 0x2300, 0]);
        assert_eq!(code, 3);
        assert_eq!(host.sysinfo.shell_calls.len(), 1);
        let (prog, args) = &host.sysinfo.shell_calls[0];
        assert_eq!(prog, "ls");
        assert_eq!(args.as_slice(), [String::from("-l"), String::from("/sd")]);
    }

    #[test]
    fn test_info_num_reports_no_card() {
        use sbx_riscv_abi::{SdCardType, SysInfoNum};
        let mut vm = Riscv64Vm::new();
        let mut host = MockHost::new();
        let key = SysInfoNum::CardType as u64;
        let card = call(&mut vm, &mut host, Syscall::SysInfoNum, [key, 0, 0, 0]);
        assert_eq!(card as i64, SdCardType::None.id());
    }
}

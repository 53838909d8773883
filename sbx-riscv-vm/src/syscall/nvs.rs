//! NVS group: typed key/value storage and the Wi-Fi credential helpers.
//!
//! The storage contract is width-generic; the dispatcher narrows values
//! here so every getter returns its declared width, sign- or zero-extended
//! into a0.

use super::arg;
use crate::error::VmError;
use crate::host::HostContext;
use crate::vm::Riscv64Vm;

type HandlerResult = Result<Option<u64>, VmError>;

fn truncate_signed(value: i64, bits: u32) -> i64 {
    match bits {
        8 => value as i8 as i64,
        16 => value as i16 as i64,
        32 => value as i32 as i64,
        _ => value,
    }
}

fn truncate_unsigned(value: u64, bits: u32) -> u64 {
    match bits {
        8 => value as u8 as u64,
        16 => value as u16 as u64,
        32 => value as u32 as u64,
        _ => value,
    }
}

pub(super) fn erase(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    let key = vm.memory().read_cstr(arg(vm, 0))?;
    let force = arg(vm, 1) != 0;
    Ok(Some(host.nvs.erase(&key, force) as u64))
}

pub(super) fn erase_all(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    Ok(Some(host.nvs.erase_all(arg(vm, 0) != 0) as u64))
}

pub(super) fn set_signed(vm: &mut Riscv64Vm, host: &mut HostContext<'_>, bits: u32) -> HandlerResult {
    let key = vm.memory().read_cstr(arg(vm, 0))?;
    let value = truncate_signed(arg(vm, 1) as i64, bits);
    let force = arg(vm, 2) != 0;
    Ok(Some(host.nvs.set_i64(&key, value, force) as u64))
}

pub(super) fn set_unsigned(
    vm: &mut Riscv64Vm,
    host: &mut HostContext<'_>,
    bits: u32,
) -> HandlerResult {
    let key = vm.memory().read_cstr(arg(vm, 0))?;
    let value = truncate_unsigned(arg(vm, 1), bits);
    let force = arg(vm, 2) != 0;
    Ok(Some(host.nvs.set_u64(&key, value, force) as u64))
}

pub(super) fn set_string(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    let key = vm.memory().read_cstr(arg(vm, 0))?;
    let value = vm.memory().read_cstr(arg(vm, 1))?;
    let force = arg(vm, 2) != 0;
    Ok(Some(host.nvs.set_string(&key, &value, force) as u64))
}

pub(super) fn get_signed(vm: &mut Riscv64Vm, host: &mut HostContext<'_>, bits: u32) -> HandlerResult {
    let key = vm.memory().read_cstr(arg(vm, 0))?;
    let default = truncate_signed(arg(vm, 1) as i64, bits);
    let stored = host.nvs.get_i64(&key, default);
    Ok(Some(truncate_signed(stored, bits) as u64))
}

pub(super) fn get_unsigned(
    vm: &mut Riscv64Vm,
    host: &mut HostContext<'_>,
    bits: u32,
) -> HandlerResult {
    let key = vm.memory().read_cstr(arg(vm, 0))?;
    let default = truncate_unsigned(arg(vm, 1), bits);
    let stored = host.nvs.get_u64(&key, default);
    Ok(Some(truncate_unsigned(stored, bits)))
}

pub(super) fn get_string(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    let key = vm.memory().read_cstr(arg(vm, 0))?;
    let value = host.nvs.get_string(&key);
    Ok(Some(vm.stage_string(&value)))
}

pub(super) fn commit(_vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    Ok(Some(host.nvs.commit() as u64))
}

pub(super) fn has_wifi_config(_vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    Ok(Some(host.nvs.has_wifi_config() as u64))
}

pub(super) fn set_wifi_ssid(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    let ssid = vm.memory().read_cstr(arg(vm, 0))?;
    Ok(Some(host.nvs.set_wifi_ssid(&ssid) as u64))
}

pub(super) fn set_wifi_pword(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    let passphrase = vm.memory().read_cstr(arg(vm, 0))?;
    Ok(Some(host.nvs.set_wifi_passphrase(&passphrase) as u64))
}

#[cfg(test)]
mod tests {
    use super::{truncate_signed, truncate_unsigned};

    #[test]
    fn test_width_narrowing() {
        // Stored values come back at the declared width, not as i8
        assert_eq!(truncate_signed(0x1_2345, 16), 0x2345);
        assert_eq!(truncate_signed(-1, 8), -1);
        assert_eq!(truncate_signed(0x80, 8), -128);
        assert_eq!(truncate_signed(i64::MIN, 64), i64::MIN);

        assert_eq!(truncate_unsigned(0x1_2345, 16), 0x2345);
        assert_eq!(truncate_unsigned(u64::MAX, 32), 0xffff_ffff);
        assert_eq!(truncate_unsigned(u64::MAX, 64), u64::MAX);
    }
}

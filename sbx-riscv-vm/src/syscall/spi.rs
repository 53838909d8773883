//! SPI group.

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;

use super::arg;
use crate::error::VmError;
use crate::host::HostContext;
use crate::vm::Riscv64Vm;

type HandlerResult = Result<Option<u64>, VmError>;

pub(super) fn begin(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    host.spi.begin(arg(vm, 0) as u8, arg(vm, 1) as u8, arg(vm, 2) as u8, arg(vm, 3) as u8);
    Ok(None)
}

pub(super) fn end(_vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    host.spi.end();
    Ok(None)
}

pub(super) fn begin_transaction(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    host.spi.begin_transaction(arg(vm, 0) as u32, arg(vm, 1) as u8, arg(vm, 2) as u8);
    Ok(None)
}

pub(super) fn end_transaction(_vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    host.spi.end_transaction();
    Ok(None)
}

pub(super) fn transfer8(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    Ok(Some(host.spi.transfer8(arg(vm, 0) as u8) as u64))
}

pub(super) fn transfer16(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    Ok(Some(host.spi.transfer16(arg(vm, 0) as u16) as u64))
}

pub(super) fn transfer32(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    Ok(Some(host.spi.transfer32(arg(vm, 0) as u32) as u64))
}

pub(super) fn transfer_bytes(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    let data_ptr = arg(vm, 0);
    let out_ptr = arg(vm, 1);
    let len = arg(vm, 2);

    let data: Vec<u8> = vm.memory().slice(data_ptr, len)?.to_vec();
    let mut out = vec![0u8; data.len()];
    host.spi.transfer_bytes(&data, &mut out);
    vm.memory_mut().slice_mut(out_ptr, len)?.copy_from_slice(&out);
    Ok(None)
}

pub(super) fn transfer_bits(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    let out_ptr = arg(vm, 1);
    let result = host.spi.transfer_bits(arg(vm, 0) as u32, arg(vm, 2) as u8);
    vm.memory_mut().write_u32(out_ptr, result)?;
    Ok(None)
}

pub(super) fn set_hwcs(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    host.spi.set_hwcs(arg(vm, 0) != 0);
    Ok(None)
}

pub(super) fn set_bit_order(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    host.spi.set_bit_order(arg(vm, 0) as u8);
    Ok(None)
}

pub(super) fn set_data_mode(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    host.spi.set_data_mode(arg(vm, 0) as u8);
    Ok(None)
}

pub(super) fn set_frequency(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    host.spi.set_frequency(arg(vm, 0) as u32);
    Ok(None)
}

pub(super) fn set_clock_div(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    host.spi.set_clock_div(arg(vm, 0) as u32);
    Ok(None)
}

pub(super) fn get_clock_div(_vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    Ok(Some(host.spi.clock_div() as u64))
}

pub(super) fn write8(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    host.spi.write8(arg(vm, 0) as u8);
    Ok(None)
}

pub(super) fn write16(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    host.spi.write16(arg(vm, 0) as u16);
    Ok(None)
}

pub(super) fn write32(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    host.spi.write32(arg(vm, 0) as u32);
    Ok(None)
}

pub(super) fn write_bytes(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    let data: Vec<u8> = vm.memory().slice(arg(vm, 0), arg(vm, 1))?.to_vec();
    host.spi.write_bytes(&data);
    Ok(None)
}

pub(super) fn write_pixels(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    let data: Vec<u8> = vm.memory().slice(arg(vm, 0), arg(vm, 1))?.to_vec();
    host.spi.write_pixels(&data);
    Ok(None)
}

pub(super) fn write_pattern(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    let data: Vec<u8> = vm.memory().slice(arg(vm, 0), arg(vm, 1))?.to_vec();
    host.spi.write_pattern(&data, arg(vm, 2) as u32);
    Ok(None)
}

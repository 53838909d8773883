//! I2C group.

extern crate alloc;

use alloc::vec::Vec;

use super::arg;
use crate::error::VmError;
use crate::host::HostContext;
use crate::vm::Riscv64Vm;

type HandlerResult = Result<Option<u64>, VmError>;

pub(super) fn begin(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    Ok(Some(host.i2c.begin(arg(vm, 0) as u8) as u64))
}

pub(super) fn end(_vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    Ok(Some(host.i2c.end() as u64))
}

pub(super) fn begin_transmission(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    host.i2c.begin_transmission(arg(vm, 0) as u8);
    Ok(None)
}

pub(super) fn end_transmission(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    Ok(Some(host.i2c.end_transmission(arg(vm, 0) != 0) as u64))
}

pub(super) fn write(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    let data: Vec<u8> = vm.memory().slice(arg(vm, 0), arg(vm, 1))?.to_vec();
    Ok(Some(host.i2c.write(&data)))
}

pub(super) fn slave_write(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    let data: Vec<u8> = vm.memory().slice(arg(vm, 0), arg(vm, 1))?.to_vec();
    Ok(Some(host.i2c.slave_write(&data)))
}

pub(super) fn read(_vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    Ok(Some(host.i2c.read() as u64))
}

pub(super) fn peek(_vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    Ok(Some(host.i2c.peek() as u64))
}

pub(super) fn request(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    Ok(Some(host.i2c.request(arg(vm, 0) as u8, arg(vm, 1), arg(vm, 2) != 0)))
}

pub(super) fn available(_vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    Ok(Some(host.i2c.available() as u64))
}

pub(super) fn flush(_vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    host.i2c.flush();
    Ok(None)
}

// The receive and request callbacks are distinct registration slots.

pub(super) fn on_receive(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    host.i2c.on_receive(arg(vm, 0));
    Ok(None)
}

pub(super) fn on_request(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    host.i2c.on_request(arg(vm, 0));
    Ok(None)
}

pub(super) fn get_timeout(_vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    Ok(Some(host.i2c.timeout() as u64))
}

pub(super) fn set_timeout(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    host.i2c.set_timeout(arg(vm, 0) as u16);
    Ok(None)
}

pub(super) fn get_clock(_vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    Ok(Some(host.i2c.clock() as u64))
}

pub(super) fn set_clock(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    Ok(Some(host.i2c.set_clock(arg(vm, 0) as u32) as u64))
}

pub(super) fn pins(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    Ok(Some(host.i2c.set_pins(arg(vm, 0) as u8, arg(vm, 1) as u8) as u64))
}

pub(super) fn bufsize(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    Ok(Some(host.i2c.set_buffer_size(arg(vm, 0))))
}

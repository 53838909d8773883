//! IO group: the terminal stream.

extern crate alloc;

use alloc::format;
use alloc::string::String;

use super::arg;
use crate::error::VmError;
use crate::host::HostContext;
use crate::marshal::f64_from_reg;
use crate::vm::Riscv64Vm;

type HandlerResult = Result<Option<u64>, VmError>;

pub(super) fn prints(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    let text = vm.memory().read_cstr(arg(vm, 0))?;
    host.console.write(&text);
    Ok(None)
}

pub(super) fn printn(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    let value = arg(vm, 0) as i64;
    host.console.write(&format!("{value}"));
    Ok(None)
}

pub(super) fn printd(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    let value = f64_from_reg(arg(vm, 0));
    host.console.write(&format!("{value}"));
    Ok(None)
}

pub(super) fn readch(_vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    Ok(Some(host.console.read_byte() as u64))
}

pub(super) fn readline(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    let line: String = host.console.read_line();
    Ok(Some(vm.stage_string(&line)))
}

pub(super) fn read(_vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    Ok(Some(host.console.read_byte() as u64))
}

pub(super) fn available(_vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    Ok(Some(host.console.available() as u64))
}

pub(super) fn peek(_vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    Ok(Some(host.console.peek() as u64))
}

pub(super) fn find(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    // The guest passes the target length explicitly
    let bytes = vm.memory().slice(arg(vm, 0), arg(vm, 1))?;
    let target = String::from_utf8_lossy(bytes).into_owned();
    Ok(Some(host.console.find(&target) as u64))
}

pub(super) fn find_until(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    let target = vm.memory().read_cstr(arg(vm, 0))?;
    let terminator = vm.memory().read_cstr(arg(vm, 1))?;
    Ok(Some(host.console.find_until(&target, &terminator) as u64))
}

pub(super) fn set_timeout(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    host.console.set_timeout(arg(vm, 0));
    Ok(None)
}

pub(super) fn get_timeout(_vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    Ok(Some(host.console.timeout()))
}

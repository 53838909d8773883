//! Mem group: guest heap management and memset.
//!
//! The allocator deals in guest offsets; the result is written back
//! through a guest out-pointer rather than returned in a0, matching the
//! guest library's calling pattern.

use super::arg;
use crate::error::VmError;
use crate::host::HostContext;
use crate::vm::Riscv64Vm;

type HandlerResult = Result<Option<u64>, VmError>;

pub(super) fn alloc(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    let dest = arg(vm, 0);
    let addr = host.alloc.alloc(arg(vm, 1));
    vm.memory_mut().write_u64(dest, addr)?;
    Ok(None)
}

pub(super) fn calloc(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    let dest = arg(vm, 0);
    let addr = host.alloc.calloc(arg(vm, 1), arg(vm, 2));
    vm.memory_mut().write_u64(dest, addr)?;
    Ok(None)
}

pub(super) fn realloc(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    let dest = arg(vm, 0);
    let addr = host.alloc.realloc(arg(vm, 1), arg(vm, 2));
    vm.memory_mut().write_u64(dest, addr)?;
    Ok(None)
}

pub(super) fn free(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    host.alloc.free(arg(vm, 0));
    Ok(None)
}

pub(super) fn set(vm: &mut Riscv64Vm, _host: &mut HostContext<'_>) -> HandlerResult {
    let dest = arg(vm, 0);
    let value = arg(vm, 1) as u8;
    let len = arg(vm, 2);
    vm.memory_mut().fill(dest, value, len)?;
    Ok(Some(dest))
}

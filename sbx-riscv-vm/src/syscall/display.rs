//! Display group.

use crate::error::VmError;
use crate::host::HostContext;
use crate::vm::Riscv64Vm;

type HandlerResult = Result<Option<u64>, VmError>;

pub(super) fn screen_height(_vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    Ok(Some(host.display.screen_height() as u64))
}

pub(super) fn screen_width(_vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    Ok(Some(host.display.screen_width() as u64))
}

pub(super) fn viewport_height(_vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    Ok(Some(host.display.viewport_height() as u64))
}

pub(super) fn viewport_width(_vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    Ok(Some(host.display.viewport_width() as u64))
}

pub(super) fn supported_colors(_vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    Ok(Some(host.display.supported_colors() as u64))
}

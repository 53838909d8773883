//! Keyboard group.

use super::arg;
use crate::error::VmError;
use crate::host::HostContext;
use crate::vm::Riscv64Vm;

type HandlerResult = Result<Option<u64>, VmError>;

pub(super) fn kb_layout_name(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    let text = host.keyboard.layout_name();
    Ok(Some(vm.stage_string(&text)))
}

pub(super) fn kb_layout_desc(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    let text = host.keyboard.layout_desc();
    Ok(Some(vm.stage_string(&text)))
}

pub(super) fn kb_led_get_num(_vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    Ok(Some(host.keyboard.num_lock() as u64))
}

pub(super) fn kb_led_get_caps(_vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    Ok(Some(host.keyboard.caps_lock() as u64))
}

pub(super) fn kb_led_get_scroll(_vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    Ok(Some(host.keyboard.scroll_lock() as u64))
}

pub(super) fn kb_led_set_num(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    host.keyboard.set_num_lock(arg(vm, 0) != 0);
    Ok(None)
}

pub(super) fn kb_led_set_caps(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    host.keyboard.set_caps_lock(arg(vm, 0) != 0);
    Ok(None)
}

pub(super) fn kb_led_set_scroll(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    host.keyboard.set_scroll_lock(arg(vm, 0) != 0);
    Ok(None)
}

pub(super) fn kb_next_scancode(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    let timeout_ms = arg(vm, 0) as i64;
    let resend = arg(vm, 1) != 0;
    Ok(Some(host.keyboard.next_scancode(timeout_ms, resend) as u64))
}

pub(super) fn kb_device_type(_vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    Ok(Some(host.keyboard.device_type()))
}

pub(super) fn kb_lock(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    host.keyboard.lock(arg(vm, 0) as i64);
    Ok(None)
}

pub(super) fn kb_unlock(_vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    host.keyboard.unlock();
    Ok(None)
}

pub(super) fn kb_reset(_vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    host.keyboard.reset();
    Ok(None)
}

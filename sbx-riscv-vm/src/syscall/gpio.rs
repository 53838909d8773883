//! GPIO and Int groups.

use super::arg;
use crate::error::VmError;
use crate::host::HostContext;
use crate::vm::Riscv64Vm;

type HandlerResult = Result<Option<u64>, VmError>;

pub(super) fn pin_mode(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    host.gpio.pin_mode(arg(vm, 0) as u8, arg(vm, 1) as u8);
    Ok(None)
}

pub(super) fn digital_read(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    Ok(Some(host.gpio.digital_read(arg(vm, 0) as u8) as u64))
}

pub(super) fn digital_write(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    host.gpio.digital_write(arg(vm, 0) as u8, arg(vm, 1) as u8);
    Ok(None)
}

pub(super) fn analog_read(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    Ok(Some(host.gpio.analog_read(arg(vm, 0) as u8) as u64))
}

pub(super) fn analog_write(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    host.gpio.analog_write(arg(vm, 0) as u8, arg(vm, 1) as u16);
    Ok(None)
}

pub(super) fn pulse_in(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    Ok(Some(host.gpio.pulse_in(arg(vm, 0) as u8, arg(vm, 1) as u8, arg(vm, 2))))
}

pub(super) fn pulse_in_long(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    Ok(Some(host.gpio.pulse_in_long(arg(vm, 0) as u8, arg(vm, 1) as u8, arg(vm, 2))))
}

pub(super) fn shift_in(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    Ok(Some(host.gpio.shift_in(arg(vm, 0) as u8, arg(vm, 1) as u8, arg(vm, 2) as u8) as u64))
}

pub(super) fn shift_out(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    host.gpio.shift_out(arg(vm, 0) as u8, arg(vm, 1) as u8, arg(vm, 2) as u8, arg(vm, 3) as u8);
    Ok(None)
}

pub(super) fn tone(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    host.gpio.tone(arg(vm, 0) as u32, arg(vm, 1));
    Ok(None)
}

pub(super) fn no_tone(_vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    host.gpio.no_tone();
    Ok(None)
}

// Int group

pub(super) fn int_enable(_vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    host.interrupts.enable();
    Ok(None)
}

pub(super) fn int_disable(_vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    host.interrupts.disable();
    Ok(None)
}

pub(super) fn int_attach(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    host.interrupts.attach(arg(vm, 0) as u8, arg(vm, 1), arg(vm, 2) as u8);
    Ok(None)
}

pub(super) fn int_detach(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    host.interrupts.detach(arg(vm, 0) as u8);
    Ok(None)
}

//! Sys, Args, and Runtime groups: clocks, process control, host
//! environment, argv, and the string-stream plumbing.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use sbx_riscv_abi::{SysInfoNum, SysInfoStr};

use super::arg;
use crate::error::VmError;
use crate::host::HostContext;
use crate::vm::Riscv64Vm;

type HandlerResult = Result<Option<u64>, VmError>;

pub(super) fn delay_ms(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    host.clock.delay_ms(arg(vm, 0));
    Ok(None)
}

pub(super) fn micros(_vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    Ok(Some(host.clock.micros()))
}

pub(super) fn millis(_vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    Ok(Some(host.clock.millis()))
}

pub(super) fn shellexec(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    let program = vm.memory().read_cstr(arg(vm, 0))?;
    let argc = arg(vm, 1);
    let argv_base = arg(vm, 2);

    // argv is a guest array of guest string pointers
    let mut args: Vec<String> = Vec::new();
    for i in 0..argc {
        let ptr = vm.memory().read_u64(argv_base.wrapping_add(i * 8))?;
        args.push(vm.memory().read_cstr(ptr)?);
    }
    Ok(Some(host.sysinfo.shell_exec(&program, &args) as u64))
}

pub(super) fn exit(vm: &mut Riscv64Vm, _host: &mut HostContext<'_>) -> HandlerResult {
    let code = arg(vm, 0) as i64;
    log::debug!("guest exit({code})");
    vm.halt_with(code);
    Ok(None)
}

pub(super) fn info_str(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    // Unknown keys answer with the empty string, not a fault
    let text = match SysInfoStr::from_id(arg(vm, 0)) {
        Some(key) => host.sysinfo.info_str(key),
        None => String::new(),
    };
    Ok(Some(vm.stage_string(&text)))
}

pub(super) fn info_num(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    let value = match SysInfoNum::from_id(arg(vm, 0)) {
        Some(key) => host.sysinfo.info_num(key),
        None => 0,
    };
    Ok(Some(value as u64))
}

pub(super) fn random(_vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    Ok(Some(host.clock.random() as u64))
}

pub(super) fn change_dir(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    let path = vm.memory().read_cstr(arg(vm, 0))?;
    if host.fs.is_dir(&path) {
        vm.set_working_dir(&path);
        Ok(Some(1))
    } else {
        Ok(Some(0))
    }
}

pub(super) fn working_dir(vm: &mut Riscv64Vm, _host: &mut HostContext<'_>) -> HandlerResult {
    let dir = String::from(vm.working_dir());
    Ok(Some(vm.stage_string(&dir)))
}

// Args group

pub(super) fn args_count(vm: &mut Riscv64Vm, _host: &mut HostContext<'_>) -> HandlerResult {
    Ok(Some(vm.args.len() as u64))
}

pub(super) fn args_str(vm: &mut Riscv64Vm, _host: &mut HostContext<'_>) -> HandlerResult {
    let index = arg(vm, 0) as usize;
    let value = vm.args.get(index).cloned().unwrap_or_default();
    Ok(Some(vm.stage_string(&value)))
}

// Runtime group

pub(super) fn strpass(vm: &mut Riscv64Vm, _host: &mut HostContext<'_>) -> HandlerResult {
    Ok(Some(vm.stream.next_byte() as u64))
}

pub(super) fn rt_yield(_vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    host.clock.yield_now();
    Ok(None)
}

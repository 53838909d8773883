//! FS group: path operations and handle operations.
//!
//! Path operations go straight to the host store. Handle operations look
//! the id up in the VM's file table; an unknown handle answers with the
//! facility's in-band sentinel (false, -1, 0, or the empty string), never
//! a fault.

extern crate alloc;

use alloc::string::String;

use sbx_riscv_abi::INVALID_FILE_HANDLE;

use super::arg;
use crate::error::VmError;
use crate::host::HostContext;
use crate::vm::Riscv64Vm;

type HandlerResult = Result<Option<u64>, VmError>;

pub(super) fn mkdir(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    let path = vm.memory().read_cstr(arg(vm, 0))?;
    Ok(Some(host.fs.mkdir(&path) as u64))
}

pub(super) fn rmdir(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    let path = vm.memory().read_cstr(arg(vm, 0))?;
    Ok(Some(host.fs.rmdir(&path) as u64))
}

pub(super) fn delete(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    let path = vm.memory().read_cstr(arg(vm, 0))?;
    Ok(Some(host.fs.remove(&path) as u64))
}

pub(super) fn exists(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    let path = vm.memory().read_cstr(arg(vm, 0))?;
    Ok(Some(host.fs.exists(&path) as u64))
}

pub(super) fn is_file(vm: &mut Riscv64Vm, _host: &mut HostContext<'_>) -> HandlerResult {
    let handle = arg(vm, 0) as u8;
    Ok(Some(vm.files.get_mut(handle).is_some_and(|f| f.is_file()) as u64))
}

pub(super) fn is_dir(vm: &mut Riscv64Vm, _host: &mut HostContext<'_>) -> HandlerResult {
    let handle = arg(vm, 0) as u8;
    Ok(Some(vm.files.get_mut(handle).is_some_and(|f| f.is_dir()) as u64))
}

pub(super) fn open(vm: &mut Riscv64Vm, host: &mut HostContext<'_>) -> HandlerResult {
    let path = vm.memory().read_cstr(arg(vm, 0))?;
    let mode = vm.memory().read_cstr(arg(vm, 1))?;
    let handle = match host.fs.open(&path, &mode) {
        Some(file) => vm.files.insert(file),
        None => INVALID_FILE_HANDLE,
    };
    log::trace!("fs open {path:?} mode {mode:?} -> handle {handle}");
    Ok(Some(handle as u64))
}

pub(super) fn close(vm: &mut Riscv64Vm, _host: &mut HostContext<'_>) -> HandlerResult {
    vm.files.remove(arg(vm, 0) as u8);
    Ok(None)
}

pub(super) fn available(vm: &mut Riscv64Vm, _host: &mut HostContext<'_>) -> HandlerResult {
    let handle = arg(vm, 0) as u8;
    let n = vm.files.get_mut(handle).map_or(0, |f| f.available());
    Ok(Some(n as u64))
}

pub(super) fn flush(vm: &mut Riscv64Vm, _host: &mut HostContext<'_>) -> HandlerResult {
    if let Some(f) = vm.files.get_mut(arg(vm, 0) as u8) {
        f.flush();
    }
    Ok(None)
}

pub(super) fn peek(vm: &mut Riscv64Vm, _host: &mut HostContext<'_>) -> HandlerResult {
    let n = vm.files.get_mut(arg(vm, 0) as u8).map_or(-1, |f| f.peek());
    Ok(Some(n as u64))
}

pub(super) fn seek(vm: &mut Riscv64Vm, _host: &mut HostContext<'_>) -> HandlerResult {
    let pos = arg(vm, 1);
    let ok = vm.files.get_mut(arg(vm, 0) as u8).is_some_and(|f| f.seek(pos));
    Ok(Some(ok as u64))
}

pub(super) fn size(vm: &mut Riscv64Vm, _host: &mut HostContext<'_>) -> HandlerResult {
    let n = vm.files.get_mut(arg(vm, 0) as u8).map_or(0, |f| f.size());
    Ok(Some(n))
}

pub(super) fn read(vm: &mut Riscv64Vm, _host: &mut HostContext<'_>) -> HandlerResult {
    let n = vm.files.get_mut(arg(vm, 0) as u8).map_or(-1, |f| f.read_byte());
    Ok(Some(n as u64))
}

pub(super) fn write_byte(vm: &mut Riscv64Vm, _host: &mut HostContext<'_>) -> HandlerResult {
    let byte = arg(vm, 1) as u8;
    if let Some(f) = vm.files.get_mut(arg(vm, 0) as u8) {
        f.write_byte(byte);
    }
    Ok(None)
}

pub(super) fn write_string(vm: &mut Riscv64Vm, _host: &mut HostContext<'_>) -> HandlerResult {
    let data = vm.memory().read_cstr(arg(vm, 1))?;
    if let Some(f) = vm.files.get_mut(arg(vm, 0) as u8) {
        f.write_str(&data);
    }
    Ok(None)
}

pub(super) fn position(vm: &mut Riscv64Vm, _host: &mut HostContext<'_>) -> HandlerResult {
    let n = vm.files.get_mut(arg(vm, 0) as u8).map_or(0, |f| f.position());
    Ok(Some(n))
}

pub(super) fn path(vm: &mut Riscv64Vm, _host: &mut HostContext<'_>) -> HandlerResult {
    let text = vm.files.get_mut(arg(vm, 0) as u8).map_or_else(String::new, |f| f.path());
    Ok(Some(vm.stage_string(&text)))
}

pub(super) fn name(vm: &mut Riscv64Vm, _host: &mut HostContext<'_>) -> HandlerResult {
    let text = vm.files.get_mut(arg(vm, 0) as u8).map_or_else(String::new, |f| f.name());
    Ok(Some(vm.stage_string(&text)))
}

pub(super) fn next(vm: &mut Riscv64Vm, _host: &mut HostContext<'_>) -> HandlerResult {
    let handle = arg(vm, 0) as u8;
    let entry = vm.files.get_mut(handle).and_then(|f| f.next_entry());
    let new_handle = match entry {
        Some(file) => vm.files.insert(file),
        None => INVALID_FILE_HANDLE,
    };
    Ok(Some(new_handle as u64))
}

pub(super) fn bufsize(vm: &mut Riscv64Vm, _host: &mut HostContext<'_>) -> HandlerResult {
    let size = arg(vm, 1);
    let ok = vm.files.get_mut(arg(vm, 0) as u8).is_some_and(|f| f.set_buffer_size(size));
    Ok(Some(ok as u64))
}

pub(super) fn lastwrite(vm: &mut Riscv64Vm, _host: &mut HostContext<'_>) -> HandlerResult {
    let n = vm.files.get_mut(arg(vm, 0) as u8).map_or(0, |f| f.last_write());
    Ok(Some(n))
}

pub(super) fn seek_dir(vm: &mut Riscv64Vm, _host: &mut HostContext<'_>) -> HandlerResult {
    let pos = arg(vm, 1);
    let ok = vm.files.get_mut(arg(vm, 0) as u8).is_some_and(|f| f.seek_dir(pos));
    Ok(Some(ok as u64))
}

pub(super) fn next_name(vm: &mut Riscv64Vm, _host: &mut HostContext<'_>) -> HandlerResult {
    let text = vm.files.get_mut(arg(vm, 0) as u8).map_or_else(String::new, |f| f.next_name());
    Ok(Some(vm.stage_string(&text)))
}

pub(super) fn rewind(vm: &mut Riscv64Vm, _host: &mut HostContext<'_>) -> HandlerResult {
    if let Some(f) = vm.files.get_mut(arg(vm, 0) as u8) {
        f.rewind();
    }
    Ok(None)
}

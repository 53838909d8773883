//! Core state and lifecycle for the sandbox VM.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use sbx_riscv_abi::{ENTRY_OFFSET, MEM_SIZE};
use sbx_riscv_inst::Gpr;

use super::files::FileTable;
use super::stream::StreamCursor;
use crate::error::VmError;
use crate::host::{Console, FileStore};
use crate::memory::Sandbox;

/// An RV64IM interpreter bound to one sandbox.
///
/// The VM owns its memory, register file, open file table, and string
/// stream cursor. Host facilities are borrowed per run; see
/// [`crate::host::HostContext`].
pub struct Riscv64Vm {
    pub(crate) regs: [u64; 32],
    pub(crate) pc: i64,
    pub(crate) memory: Sandbox,
    pub(crate) running: bool,
    pub(crate) exit_code: i64,
    pub(crate) args: Vec<String>,
    pub(crate) working_dir: String,
    pub(crate) files: FileTable,
    pub(crate) stream: StreamCursor,
    pub(crate) instruction_limit: u64,
    pub(crate) instruction_count: u64,
}

impl Riscv64Vm {
    /// A halted VM with zeroed state and working directory "/".
    pub fn new() -> Riscv64Vm {
        Riscv64Vm {
            regs: [0; 32],
            pc: 0,
            memory: Sandbox::new(),
            running: false,
            exit_code: 0,
            args: Vec::new(),
            working_dir: String::from("/"),
            files: FileTable::new(),
            stream: StreamCursor::new(),
            instruction_limit: 0,
            instruction_count: 0,
        }
    }

    /// Bound the number of instructions one `run` may execute.
    /// 0 means unlimited.
    pub fn with_instruction_limit(mut self, limit: u64) -> Riscv64Vm {
        self.instruction_limit = limit;
        self
    }

    /// Bound the number of instructions one `run` may execute (mutating).
    pub fn set_instruction_limit(&mut self, limit: u64) {
        self.instruction_limit = limit;
    }

    /// Read a register. x0 is always 0.
    pub fn reg(&self, r: Gpr) -> u64 {
        crate::executor::read_reg(&self.regs, r.num())
    }

    /// Write a register. Writes to x0 are discarded.
    pub fn set_reg(&mut self, r: Gpr, val: u64) {
        crate::executor::write_reg(&mut self.regs, r.num(), val);
    }

    pub fn pc(&self) -> i64 {
        self.pc
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn exit_code(&self) -> i64 {
        self.exit_code
    }

    pub fn instruction_count(&self) -> u64 {
        self.instruction_count
    }

    pub fn memory(&self) -> &Sandbox {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut Sandbox {
        &mut self.memory
    }

    pub fn working_dir(&self) -> &str {
        &self.working_dir
    }

    pub fn set_working_dir(&mut self, dir: &str) {
        self.working_dir.clear();
        self.working_dir.push_str(dir);
    }

    /// Number of open file handles (observability for host controllers).
    pub fn open_file_count(&self) -> usize {
        self.files.open_count()
    }

    /// Copy a flat program image to the entry offset and prime pc and the
    /// stack pointer. The stack grows down from the end of memory.
    pub fn load_image(&mut self, image: &[u8]) -> Result<(), VmError> {
        self.memory.load_image(image)?;
        self.set_reg(Gpr::SP, MEM_SIZE as u64);
        self.pc = ENTRY_OFFSET as i64;
        log::debug!("loaded image: {} bytes at 0x{:x}", image.len(), ENTRY_OFFSET);
        Ok(())
    }

    /// Read a program image from host storage and load it.
    pub fn load_file(&mut self, fs: &mut dyn FileStore, path: &str) -> Result<(), VmError> {
        let mut file = fs.open(path, "r").ok_or(VmError::ImageUnreadable)?;
        let size = file.size() as usize;
        let mut image = Vec::with_capacity(size);
        loop {
            let byte = file.read_byte();
            if byte < 0 {
                break;
            }
            image.push(byte as u8);
        }
        if image.len() != size {
            return Err(VmError::ImageUnreadable);
        }
        self.load_image(&image)
    }

    /// Stop the VM from outside the fetch/execute loop. The loop observes
    /// the flag at its next iteration.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Guest-requested termination (`Sys::exit`).
    pub(crate) fn halt_with(&mut self, code: i64) {
        self.exit_code = code;
        self.running = false;
    }

    /// Return to the post-construction state, closing any open handles.
    /// Must be called between a halt (or fault) and the next `run`.
    pub fn reset(&mut self) {
        self.regs = [0; 32];
        self.pc = 0;
        self.memory.clear();
        self.running = false;
        self.exit_code = 0;
        self.args.clear();
        self.working_dir.clear();
        self.working_dir.push_str("/");
        self.files.clear();
        self.stream.clear();
        self.instruction_count = 0;
    }

    /// Stage a host string for the guest to drain via `Runtime::strpass`;
    /// returns the length the guest should expect.
    pub(crate) fn stage_string(&mut self, text: &str) -> u64 {
        self.stream.stage(text)
    }

    /// The uniform panic path: one CRLF-framed diagnostic line, exit code
    /// -1, open resources dropped, loop halted. Not recoverable within
    /// this run.
    pub(crate) fn fault(&mut self, err: &VmError, console: &mut dyn Console) {
        log::error!("vm fault at pc=0x{:x}: {err}", self.pc);
        let mut line = String::from("\r\n");
        line.push_str(err.diagnostic());
        line.push_str("\r\n");
        console.write(&line);

        self.running = false;
        self.exit_code = -1;
        self.files.clear();
        self.stream.clear();
    }
}

impl Default for Riscv64Vm {
    fn default() -> Self {
        Riscv64Vm::new()
    }
}

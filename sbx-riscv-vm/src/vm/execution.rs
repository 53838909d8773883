//! Single-instruction execution.

use super::{Riscv64Vm, StepResult};
use crate::error::VmError;
use crate::executor::decode_execute;
use crate::host::HostContext;
use crate::syscall;

impl Riscv64Vm {
    /// Fetch, decode, and execute one instruction.
    ///
    /// ECALL dispatches the host call synchronously and then advances pc
    /// by 4 like any non-branch instruction. Errors are contract
    /// violations the caller must route through [`Riscv64Vm::fault`];
    /// the run loop does this automatically.
    pub fn step(&mut self, host: &mut HostContext<'_>) -> Result<StepResult, VmError> {
        if self.instruction_limit != 0 && self.instruction_count >= self.instruction_limit {
            return Err(VmError::InstructionLimit { limit: self.instruction_limit });
        }

        let word = self.memory.fetch_word(self.pc)?;
        let result = decode_execute(word, self.pc, &mut self.regs, &mut self.memory)?;
        self.instruction_count += 1;

        if result.syscall {
            syscall::dispatch(self, host)?;
        }

        self.pc = result.new_pc.unwrap_or_else(|| self.pc.wrapping_add(4));

        if result.halt {
            // EBREAK: silent halt with the failure exit code
            self.halt_with(-1);
            return Ok(StepResult::Halted);
        }
        Ok(StepResult::Continue)
    }
}

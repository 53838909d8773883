//! The blocking fetch/execute loop.

extern crate alloc;

use alloc::string::String;

use super::Riscv64Vm;
use crate::host::HostContext;

impl Riscv64Vm {
    /// Execute the loaded program until it halts.
    ///
    /// `args` become the guest-visible argv. The loop re-reads `running`
    /// every iteration, so a host controller driving `step` directly (or
    /// a handler calling [`Riscv64Vm::stop`]) terminates it cleanly.
    /// Faults are absorbed here: the VM halts with exit code -1 and one
    /// diagnostic line on the terminal.
    ///
    /// Returns the exit code.
    pub fn run(&mut self, host: &mut HostContext<'_>, args: &[&str]) -> i64 {
        self.args = args.iter().map(|a| String::from(*a)).collect();
        self.running = true;
        self.instruction_count = 0;
        log::debug!("run: pc=0x{:x}, argc={}", self.pc, args.len());

        while self.running {
            if let Err(err) = self.step(host) {
                self.fault(&err, host.console);
            }
        }

        log::debug!(
            "run finished: exit_code={}, instructions={}",
            self.exit_code,
            self.instruction_count
        );
        self.exit_code
    }
}

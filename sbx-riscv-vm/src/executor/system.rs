//! SYSTEM instructions (ECALL and EBREAK).
//!
//! There are no privilege modes and no CSRs in this machine; the SYSTEM
//! opcode exists solely to reach the host-call dispatcher.

use sbx_riscv_inst::decode::TypeI;

use super::ExecutionResult;
use crate::error::VmError;

/// SYSTEM (opcode 0x73). Funct12 selects ECALL (0x000) or EBREAK (0x001);
/// anything else, including CSR encodings, faults.
pub(super) fn execute_system(
    word: u32,
    pc: i64,
    _regs: &mut [u64; 32],
) -> Result<ExecutionResult, VmError> {
    let i = TypeI::from_word(word);
    if i.funct3 != 0 {
        return Err(VmError::InvalidInstruction {
            pc,
            word,
            detail: "Invalid system instruction.",
        });
    }

    match i.funct12() {
        0x000 => Ok(ExecutionResult { new_pc: None, halt: false, syscall: true }),
        0x001 => Ok(ExecutionResult { new_pc: None, halt: true, syscall: false }),
        _ => Err(VmError::InvalidInstruction {
            pc,
            word,
            detail: "Invalid system instruction.",
        }),
    }
}

#[cfg(test)]
mod tests {
    use sbx_riscv_inst::encode;

    use super::*;
    use crate::executor::decode_execute;
    use crate::memory::Sandbox;

    #[test]
    fn test_ecall_requests_dispatch() {
        let mut regs = [0u64; 32];
        let mut mem = Sandbox::new();
        let result = decode_execute(encode::ecall(), 0, &mut regs, &mut mem).unwrap();
        assert!(result.syscall);
        assert!(!result.halt);
        assert!(result.new_pc.is_none());
    }

    #[test]
    fn test_ebreak_halts() {
        let mut regs = [0u64; 32];
        let mut mem = Sandbox::new();
        let result = decode_execute(encode::ebreak(), 0, &mut regs, &mut mem).unwrap();
        assert!(result.halt);
        assert!(!result.syscall);
    }

    #[test]
    fn test_csr_encodings_fault() {
        let mut regs = [0u64; 32];
        let mut mem = Sandbox::new();
        // csrrw x0, mstatus, x0 (funct3 = 1)
        let word = 0x3000_1073u32;
        assert!(matches!(
            decode_execute(word, 0, &mut regs, &mut mem),
            Err(VmError::InvalidInstruction { .. })
        ));
        // funct12 = 0x002 is neither ECALL nor EBREAK
        let word = 0x0020_0073u32;
        assert!(decode_execute(word, 0, &mut regs, &mut mem).is_err());
    }
}

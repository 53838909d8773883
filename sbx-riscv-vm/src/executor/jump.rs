//! Unconditional control transfer and upper-immediate instructions.

use sbx_riscv_inst::decode::{TypeI, TypeJ, TypeU, opcode, opcode_of};

use super::{ExecutionResult, read_reg, write_reg};
use crate::error::VmError;

/// LUI, AUIPC, JAL, JALR.
pub(super) fn execute_jump(
    word: u32,
    pc: i64,
    regs: &mut [u64; 32],
) -> Result<ExecutionResult, VmError> {
    match opcode_of(word) {
        opcode::LUI => {
            let u = TypeU::from_word(word);
            write_reg(regs, u.rd, u.imm as u64);
            Ok(ExecutionResult::ADVANCE)
        }
        opcode::AUIPC => {
            let u = TypeU::from_word(word);
            write_reg(regs, u.rd, pc.wrapping_add(u.imm) as u64);
            Ok(ExecutionResult::ADVANCE)
        }
        opcode::JAL => {
            let j = TypeJ::from_word(word);
            write_reg(regs, j.rd, pc.wrapping_add(4) as u64);
            Ok(ExecutionResult::jump(pc.wrapping_add(j.imm)))
        }
        opcode::JALR => {
            let i = TypeI::from_word(word);
            // Target is computed before the link write so rs1 == rd works
            let target = (read_reg(regs, i.rs1).wrapping_add(i.imm as u64) & !1) as i64;
            write_reg(regs, i.rd, pc.wrapping_add(4) as u64);
            Ok(ExecutionResult::jump(target))
        }
        _ => Err(VmError::InvalidInstruction {
            pc,
            word,
            detail: "Invalid opcode instruction.",
        }),
    }
}

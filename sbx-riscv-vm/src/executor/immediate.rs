//! Immediate arithmetic (OP-IMM and OP-IMM-32).

use sbx_riscv_inst::decode::TypeI;

use super::{ExecutionResult, read_reg, write_reg};
use crate::error::VmError;

/// OP-IMM (opcode 0x13): 64-bit immediate arithmetic.
pub(super) fn execute_op_imm(
    word: u32,
    pc: i64,
    regs: &mut [u64; 32],
) -> Result<ExecutionResult, VmError> {
    let i = TypeI::from_word(word);
    let a = read_reg(regs, i.rs1);
    let sa = a as i64;
    let imm = i.imm;

    let val = match i.funct3 {
        0x0 => sa.wrapping_add(imm) as u64,
        0x1 => {
            // SLLI: bits [31:26] must be zero
            if word >> 26 != 0 {
                return Err(VmError::InvalidInstruction {
                    pc,
                    word,
                    detail: "Invalid immediate shift instruction.",
                });
            }
            a.wrapping_shl(i.shamt64())
        }
        0x2 => ((sa) < imm) as u64,
        0x3 => (a < imm as u64) as u64,
        0x4 => a ^ imm as u64,
        0x5 => match word >> 26 {
            // funct6 selects logical vs arithmetic
            0x00 => a.wrapping_shr(i.shamt64()),
            0x10 => sa.wrapping_shr(i.shamt64()) as u64,
            _ => {
                return Err(VmError::InvalidInstruction {
                    pc,
                    word,
                    detail: "Invalid immediate shift instruction.",
                });
            }
        },
        0x6 => a | imm as u64,
        0x7 => a & imm as u64,
        _ => {
            return Err(VmError::InvalidInstruction {
                pc,
                word,
                detail: "Invalid immediate instruction.",
            });
        }
    };

    write_reg(regs, i.rd, val);
    Ok(ExecutionResult::ADVANCE)
}

/// OP-IMM-32 (opcode 0x1B): word-form immediate arithmetic, results
/// sign-extended to 64.
pub(super) fn execute_op_imm32(
    word: u32,
    pc: i64,
    regs: &mut [u64; 32],
) -> Result<ExecutionResult, VmError> {
    let i = TypeI::from_word(word);
    let a = read_reg(regs, i.rs1) as i32;

    let val: i32 = match i.funct3 {
        0x0 => a.wrapping_add(i.imm as i32),
        0x1 => {
            // SLLIW: bits [31:25] must be zero
            if word >> 25 != 0 {
                return Err(VmError::InvalidInstruction {
                    pc,
                    word,
                    detail: "Invalid immediate shift instruction.",
                });
            }
            a.wrapping_shl(i.shamt32())
        }
        0x5 => match word >> 25 {
            0x00 => ((a as u32).wrapping_shr(i.shamt32())) as i32,
            0x20 => a.wrapping_shr(i.shamt32()),
            _ => {
                return Err(VmError::InvalidInstruction {
                    pc,
                    word,
                    detail: "Invalid immediate shift instruction.",
                });
            }
        },
        _ => {
            return Err(VmError::InvalidInstruction {
                pc,
                word,
                detail: "Invalid immediate instruction.",
            });
        }
    };

    write_reg(regs, i.rd, val as i64 as u64);
    Ok(ExecutionResult::ADVANCE)
}

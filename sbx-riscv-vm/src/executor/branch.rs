//! Conditional branches.

use sbx_riscv_inst::decode::TypeB;

use super::{ExecutionResult, read_reg};
use crate::error::VmError;

/// BRANCH (opcode 0x63). A taken branch transfers to pc + offset; a branch
/// not taken falls through.
pub(super) fn execute_branch(
    word: u32,
    pc: i64,
    regs: &mut [u64; 32],
) -> Result<ExecutionResult, VmError> {
    let b = TypeB::from_word(word);
    let a = read_reg(regs, b.rs1);
    let c = read_reg(regs, b.rs2);

    let taken = match b.funct3 {
        0x0 => a == c,
        0x1 => a != c,
        0x4 => (a as i64) < (c as i64),
        0x5 => (a as i64) >= (c as i64),
        0x6 => a < c,
        0x7 => a >= c,
        _ => {
            return Err(VmError::InvalidInstruction {
                pc,
                word,
                detail: "Invalid branch instruction.",
            });
        }
    };

    if taken {
        Ok(ExecutionResult::jump(pc.wrapping_add(b.imm)))
    } else {
        Ok(ExecutionResult::ADVANCE)
    }
}

#[cfg(test)]
mod tests {
    use sbx_riscv_inst::{Gpr, encode};

    use super::*;
    use crate::executor::decode_execute;
    use crate::memory::Sandbox;

    const RS1: Gpr = Gpr::new(1);
    const RS2: Gpr = Gpr::new(2);

    fn branch_target(word: u32, a: u64, b: u64) -> Option<i64> {
        let mut regs = [0u64; 32];
        regs[1] = a;
        regs[2] = b;
        let mut mem = Sandbox::new();
        decode_execute(word, 0x1000, &mut regs, &mut mem).unwrap().new_pc
    }

    #[test]
    fn test_equality_branches() {
        assert_eq!(branch_target(encode::beq(RS1, RS2, 16), 5, 5), Some(0x1010));
        assert_eq!(branch_target(encode::beq(RS1, RS2, 16), 5, 6), None);
        assert_eq!(branch_target(encode::bne(RS1, RS2, -16), 5, 6), Some(0xff0));
    }

    #[test]
    fn test_signed_vs_unsigned_compare() {
        let neg1 = (-1i64) as u64;
        // blt: -1 < 1 signed
        assert_eq!(branch_target(encode::blt(RS1, RS2, 8), neg1, 1), Some(0x1008));
        // bltu: 0xffff... is the largest unsigned value
        assert_eq!(branch_target(encode::bltu(RS1, RS2, 8), neg1, 1), None);
        assert_eq!(branch_target(encode::bgeu(RS1, RS2, 8), neg1, 1), Some(0x1008));
        assert_eq!(branch_target(encode::bge(RS1, RS2, 8), neg1, 1), None);
    }

    #[test]
    fn test_self_branch_loops() {
        // offset 0 re-executes the same instruction
        assert_eq!(branch_target(encode::beq(RS1, RS2, 0), 1, 1), Some(0x1000));
    }
}

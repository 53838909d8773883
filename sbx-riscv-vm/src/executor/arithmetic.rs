//! Register/register arithmetic (OP and OP-32, including the M extension).

use sbx_riscv_inst::decode::TypeR;

use super::{ExecutionResult, read_reg, write_reg};
use crate::error::VmError;

/// OP (opcode 0x33): 64-bit R-type arithmetic.
pub(super) fn execute_op(
    word: u32,
    pc: i64,
    regs: &mut [u64; 32],
) -> Result<ExecutionResult, VmError> {
    let r = TypeR::from_word(word);
    let a = read_reg(regs, r.rs1);
    let b = read_reg(regs, r.rs2);
    let sa = a as i64;
    let sb = b as i64;

    let val = match (r.funct3, r.funct7) {
        (0x0, 0x00) => a.wrapping_add(b),
        (0x0, 0x20) => a.wrapping_sub(b),
        (0x1, 0x00) => a.wrapping_shl((b & 0x3f) as u32),
        (0x2, 0x00) => (sa < sb) as u64,
        (0x3, 0x00) => (a < b) as u64,
        (0x4, 0x00) => a ^ b,
        (0x5, 0x00) => a.wrapping_shr((b & 0x3f) as u32),
        (0x5, 0x20) => sa.wrapping_shr((b & 0x3f) as u32) as u64,
        (0x6, 0x00) => a | b,
        (0x7, 0x00) => a & b,
        (0x0, 0x01) => a.wrapping_mul(b),
        (0x1, 0x01) => mulh(sa, sb),
        (0x2, 0x01) => mulhsu(sa, b),
        (0x3, 0x01) => mulhu(a, b),
        (0x4, 0x01) => div(sa, sb) as u64,
        (0x5, 0x01) => divu(a, b),
        (0x6, 0x01) => rem(sa, sb) as u64,
        (0x7, 0x01) => remu(a, b),
        _ => {
            return Err(VmError::InvalidInstruction {
                pc,
                word,
                detail: "Invalid arithmetic instruction.",
            });
        }
    };

    write_reg(regs, r.rd, val);
    Ok(ExecutionResult::ADVANCE)
}

/// OP-32 (opcode 0x3B): word-form arithmetic, results sign-extended to 64.
pub(super) fn execute_op32(
    word: u32,
    pc: i64,
    regs: &mut [u64; 32],
) -> Result<ExecutionResult, VmError> {
    let r = TypeR::from_word(word);
    let a = read_reg(regs, r.rs1) as i32;
    let b = read_reg(regs, r.rs2) as i32;

    let val: i32 = match (r.funct3, r.funct7) {
        (0x0, 0x00) => a.wrapping_add(b),
        (0x0, 0x20) => a.wrapping_sub(b),
        (0x1, 0x00) => a.wrapping_shl((b & 0x1f) as u32),
        (0x5, 0x00) => ((a as u32).wrapping_shr((b & 0x1f) as u32)) as i32,
        (0x5, 0x20) => a.wrapping_shr((b & 0x1f) as u32),
        (0x0, 0x01) => a.wrapping_mul(b),
        (0x4, 0x01) => divw(a, b),
        (0x5, 0x01) => divuw(a as u32, b as u32),
        (0x6, 0x01) => remw(a, b),
        (0x7, 0x01) => remuw(a as u32, b as u32),
        _ => {
            return Err(VmError::InvalidInstruction {
                pc,
                word,
                detail: "Invalid arithmetic instruction.",
            });
        }
    };

    write_reg(regs, r.rd, val as i64 as u64);
    Ok(ExecutionResult::ADVANCE)
}

// Division corner cases are defined, not trapped: divide-by-zero yields
// the all-ones quotient (or the dividend for remainders), and the one
// signed overflow case wraps back to the minimum.

#[inline]
fn mulh(a: i64, b: i64) -> u64 {
    (((a as i128).wrapping_mul(b as i128)) >> 64) as u64
}

#[inline]
fn mulhsu(a: i64, b: u64) -> u64 {
    (((a as i128).wrapping_mul(b as i128)) >> 64) as u64
}

#[inline]
fn mulhu(a: u64, b: u64) -> u64 {
    (((a as u128).wrapping_mul(b as u128)) >> 64) as u64
}

#[inline]
fn div(a: i64, b: i64) -> i64 {
    if b == 0 {
        -1
    } else if a == i64::MIN && b == -1 {
        i64::MIN
    } else {
        a / b
    }
}

#[inline]
fn divu(a: u64, b: u64) -> u64 {
    if b == 0 { u64::MAX } else { a / b }
}

#[inline]
fn rem(a: i64, b: i64) -> i64 {
    if b == 0 {
        a
    } else if a == i64::MIN && b == -1 {
        0
    } else {
        a % b
    }
}

#[inline]
fn remu(a: u64, b: u64) -> u64 {
    if b == 0 { a } else { a % b }
}

#[inline]
fn divw(a: i32, b: i32) -> i32 {
    if b == 0 {
        -1
    } else if a == i32::MIN && b == -1 {
        i32::MIN
    } else {
        a / b
    }
}

#[inline]
fn divuw(a: u32, b: u32) -> i32 {
    if b == 0 { -1 } else { (a / b) as i32 }
}

#[inline]
fn remw(a: i32, b: i32) -> i32 {
    if b == 0 {
        a
    } else if a == i32::MIN && b == -1 {
        0
    } else {
        a % b
    }
}

#[inline]
fn remuw(a: u32, b: u32) -> i32 {
    if b == 0 { a as i32 } else { (a % b) as i32 }
}

#[cfg(test)]
mod tests {
    use sbx_riscv_inst::{Gpr, encode};

    use super::*;
    use crate::executor::decode_execute;
    use crate::memory::Sandbox;

    fn run_op(word: u32, rs1: u64, rs2: u64) -> u64 {
        let mut regs = [0u64; 32];
        regs[1] = rs1;
        regs[2] = rs2;
        let mut mem = Sandbox::new();
        decode_execute(word, 0, &mut regs, &mut mem).unwrap();
        regs[3]
    }

    const RD: Gpr = Gpr::new(3);
    const RS1: Gpr = Gpr::new(1);
    const RS2: Gpr = Gpr::new(2);

    #[test]
    fn test_add_sub_wrap() {
        assert_eq!(run_op(encode::add(RD, RS1, RS2), 10, 20), 30);
        assert_eq!(run_op(encode::add(RD, RS1, RS2), u64::MAX, 1), 0);
        assert_eq!(run_op(encode::sub(RD, RS1, RS2), 0, 1), u64::MAX);
    }

    #[test]
    fn test_shifts_mask_to_six_bits() {
        assert_eq!(run_op(encode::sll(RD, RS1, RS2), 1, 63), 1u64 << 63);
        // amount 64 wraps to 0
        assert_eq!(run_op(encode::sll(RD, RS1, RS2), 1, 64), 1);
        assert_eq!(run_op(encode::srl(RD, RS1, RS2), u64::MAX, 63), 1);
        assert_eq!(run_op(encode::sra(RD, RS1, RS2), (-16i64) as u64, 2), (-4i64) as u64);
    }

    #[test]
    fn test_comparisons() {
        assert_eq!(run_op(encode::slt(RD, RS1, RS2), (-1i64) as u64, 1), 1);
        assert_eq!(run_op(encode::sltu(RD, RS1, RS2), (-1i64) as u64, 1), 0);
        assert_eq!(run_op(encode::slt(RD, RS1, RS2), 1, 1), 0);
    }

    #[test]
    fn test_mul_high_halves() {
        // (2^63) * 2 = 2^64: high word of the unsigned product is 1
        assert_eq!(run_op(encode::mulhu(RD, RS1, RS2), 1u64 << 63, 2), 1);
        // -1 * -1 = 1: high word of the signed product is 0
        assert_eq!(run_op(encode::mulh(RD, RS1, RS2), (-1i64) as u64, (-1i64) as u64), 0);
        // -1 (signed) * 2 (unsigned) = -2: high word all ones
        assert_eq!(
            run_op(encode::mulhsu(RD, RS1, RS2), (-1i64) as u64, 2),
            u64::MAX
        );
    }

    #[test]
    fn test_division_invariants() {
        let int64_min = i64::MIN as u64;
        let neg1 = (-1i64) as u64;

        assert_eq!(run_op(encode::div(RD, RS1, RS2), int64_min, neg1), int64_min);
        assert_eq!(run_op(encode::div(RD, RS1, RS2), 7, 0), neg1);
        assert_eq!(run_op(encode::rem(RD, RS1, RS2), 7, 0), 7);
        assert_eq!(run_op(encode::rem(RD, RS1, RS2), int64_min, neg1), 0);
        assert_eq!(run_op(encode::divu(RD, RS1, RS2), 1, 0), u64::MAX);
        assert_eq!(run_op(encode::remu(RD, RS1, RS2), 7, 0), 7);
        assert_eq!(run_op(encode::div(RD, RS1, RS2), (-7i64) as u64, 2), (-3i64) as u64);
    }

    #[test]
    fn test_word_forms_sign_extend() {
        // 0x7fffffff + 1 overflows to i32::MIN, sign-extended
        assert_eq!(
            run_op(encode::addw(RD, RS1, RS2), 0x7fff_ffff, 1),
            0xffff_ffff_8000_0000
        );
        // high input bits are ignored
        assert_eq!(run_op(encode::addw(RD, RS1, RS2), 0xdead_0000_0000_0001, 1), 2);
        assert_eq!(
            run_op(encode::subw(RD, RS1, RS2), 0, 1),
            0xffff_ffff_ffff_ffff
        );
    }

    #[test]
    fn test_word_division_corners() {
        let int32_min = i32::MIN as i64 as u64;
        let neg1 = (-1i64) as u64;
        assert_eq!(run_op(encode::divw(RD, RS1, RS2), int32_min, neg1), int32_min);
        assert_eq!(run_op(encode::divw(RD, RS1, RS2), 7, 0), neg1);
        assert_eq!(run_op(encode::remw(RD, RS1, RS2), int32_min, neg1), 0);
        assert_eq!(run_op(encode::divuw(RD, RS1, RS2), 1, 0), neg1);
        assert_eq!(run_op(encode::remuw(RD, RS1, RS2), 7, 0), 7);
    }

    #[test]
    fn test_writes_to_x0_are_discarded() {
        let mut regs = [0u64; 32];
        regs[1] = 5;
        regs[2] = 6;
        let mut mem = Sandbox::new();
        decode_execute(encode::add(Gpr::ZERO, RS1, RS2), 0, &mut regs, &mut mem).unwrap();
        assert_eq!(regs[0], 0);
    }

    #[test]
    fn test_unknown_funct_faults() {
        let mut regs = [0u64; 32];
        let mut mem = Sandbox::new();
        // funct7 = 0x7f is not a defined OP encoding
        let word = 0xfe00_8033u32 | (3 << 7);
        let err = decode_execute(word, 0, &mut regs, &mut mem).unwrap_err();
        assert!(matches!(err, VmError::InvalidInstruction { .. }));
    }
}

//! Memory access instructions (LOAD and STORE).

use sbx_riscv_inst::decode::{TypeI, TypeS};

use super::{ExecutionResult, read_reg, write_reg};
use crate::error::VmError;
use crate::memory::Sandbox;

/// LOAD (opcode 0x03). The effective address wraps modulo 2^64 before the
/// bounds check, matching register arithmetic elsewhere.
pub(super) fn execute_load(
    word: u32,
    pc: i64,
    regs: &mut [u64; 32],
    memory: &mut Sandbox,
) -> Result<ExecutionResult, VmError> {
    let i = TypeI::from_word(word);
    let addr = read_reg(regs, i.rs1).wrapping_add(i.imm as u64);

    let val = match i.funct3 {
        0x0 => memory.read_i8(addr)? as i64 as u64,
        0x1 => memory.read_i16(addr)? as i64 as u64,
        0x2 => memory.read_i32(addr)? as i64 as u64,
        0x3 => memory.read_u64(addr)?,
        0x4 => memory.read_u8(addr)? as u64,
        0x5 => memory.read_u16(addr)? as u64,
        0x6 => memory.read_u32(addr)? as u64,
        _ => {
            return Err(VmError::InvalidInstruction {
                pc,
                word,
                detail: "Invalid load instruction.",
            });
        }
    };

    write_reg(regs, i.rd, val);
    Ok(ExecutionResult::ADVANCE)
}

/// STORE (opcode 0x23).
pub(super) fn execute_store(
    word: u32,
    pc: i64,
    regs: &mut [u64; 32],
    memory: &mut Sandbox,
) -> Result<ExecutionResult, VmError> {
    let s = TypeS::from_word(word);
    let addr = read_reg(regs, s.rs1).wrapping_add(s.imm as u64);
    let val = read_reg(regs, s.rs2);

    match s.funct3 {
        0x0 => memory.write_u8(addr, val as u8)?,
        0x1 => memory.write_u16(addr, val as u16)?,
        0x2 => memory.write_u32(addr, val as u32)?,
        0x3 => memory.write_u64(addr, val)?,
        _ => {
            return Err(VmError::InvalidInstruction {
                pc,
                word,
                detail: "Invalid store instruction.",
            });
        }
    }

    Ok(ExecutionResult::ADVANCE)
}

#[cfg(test)]
mod tests {
    use sbx_riscv_inst::{Gpr, encode};

    use super::*;
    use crate::executor::decode_execute;

    const RD: Gpr = Gpr::new(3);
    const BASE: Gpr = Gpr::new(1);
    const SRC: Gpr = Gpr::new(2);

    fn load_at(word: u32, mem: &mut Sandbox, base: u64) -> u64 {
        let mut regs = [0u64; 32];
        regs[1] = base;
        decode_execute(word, 0, &mut regs, mem).unwrap();
        regs[3]
    }

    #[test]
    fn test_signed_load_extension() {
        let mut mem = Sandbox::new();
        mem.write_u8(512, 0x80).unwrap();
        mem.write_u16(514, 0x8000).unwrap();
        mem.write_u32(516, 0x8000_0000).unwrap();

        assert_eq!(load_at(encode::lb(RD, BASE, 0), &mut mem, 512), (-128i64) as u64);
        assert_eq!(load_at(encode::lbu(RD, BASE, 0), &mut mem, 512), 0x80);
        assert_eq!(load_at(encode::lh(RD, BASE, 2), &mut mem, 512), (-32768i64) as u64);
        assert_eq!(load_at(encode::lhu(RD, BASE, 2), &mut mem, 512), 0x8000);
        assert_eq!(
            load_at(encode::lw(RD, BASE, 4), &mut mem, 512),
            0xffff_ffff_8000_0000
        );
        assert_eq!(load_at(encode::lwu(RD, BASE, 4), &mut mem, 512), 0x8000_0000);
    }

    #[test]
    fn test_store_truncation() {
        let mut mem = Sandbox::new();
        let mut regs = [0u64; 32];
        regs[1] = 1024;
        regs[2] = 0x1122_3344_5566_7788;

        decode_execute(encode::sb(BASE, SRC, 0), 0, &mut regs, &mut mem).unwrap();
        decode_execute(encode::sh(BASE, SRC, 2), 0, &mut regs, &mut mem).unwrap();
        decode_execute(encode::sw(BASE, SRC, 4), 0, &mut regs, &mut mem).unwrap();
        decode_execute(encode::sd(BASE, SRC, 8), 0, &mut regs, &mut mem).unwrap();

        assert_eq!(mem.read_u8(1024).unwrap(), 0x88);
        assert_eq!(mem.read_u16(1026).unwrap(), 0x7788);
        assert_eq!(mem.read_u32(1028).unwrap(), 0x5566_7788);
        assert_eq!(mem.read_u64(1032).unwrap(), 0x1122_3344_5566_7788);
    }

    #[test]
    fn test_negative_offset_addressing() {
        let mut mem = Sandbox::new();
        mem.write_u64(2040, 99).unwrap();
        assert_eq!(load_at(encode::ld(RD, BASE, -8), &mut mem, 2048), 99);
    }

    #[test]
    fn test_out_of_bounds_access_faults() {
        let mut mem = Sandbox::new();
        let mut regs = [0u64; 32];
        regs[1] = sbx_riscv_abi::MEM_SIZE as u64;

        // One byte past the end
        assert!(matches!(
            decode_execute(encode::lb(RD, BASE, 0), 0, &mut regs, &mut mem),
            Err(VmError::MemoryFault { .. })
        ));
        // Doubleword straddling the end
        regs[1] = sbx_riscv_abi::MEM_SIZE as u64 - 7;
        assert!(decode_execute(encode::ld(RD, BASE, 0), 0, &mut regs, &mut mem).is_err());
        // Last valid doubleword
        regs[1] = sbx_riscv_abi::MEM_SIZE as u64 - 8;
        assert!(decode_execute(encode::ld(RD, BASE, 0), 0, &mut regs, &mut mem).is_ok());
    }
}

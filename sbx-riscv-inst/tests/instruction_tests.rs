//! Field-extraction tests against hand-assembled words.

use sbx_riscv_inst::{Gpr, TypeB, TypeI, TypeJ, TypeR, TypeS, decode, encode};

#[test]
fn test_branch_offset_extremes() {
    // B-format covers [-4096, 4094] in steps of 2
    let word = encode::beq(Gpr::A0, Gpr::A1, -4096);
    assert_eq!(TypeB::from_word(word).imm, -4096);

    let word = encode::beq(Gpr::A0, Gpr::A1, 4094);
    assert_eq!(TypeB::from_word(word).imm, 4094);
}

#[test]
fn test_jal_offset_extremes() {
    let word = encode::jal(Gpr::RA, -1048576);
    assert_eq!(TypeJ::from_word(word).imm, -1048576);

    let word = encode::jal(Gpr::RA, 1048574);
    assert_eq!(TypeJ::from_word(word).imm, 1048574);
}

#[test]
fn test_store_offset_extremes() {
    let word = encode::sd(Gpr::SP, Gpr::A0, -2048);
    assert_eq!(TypeS::from_word(word).imm, -2048);

    let word = encode::sb(Gpr::SP, Gpr::A0, 2047);
    let s = TypeS::from_word(word);
    assert_eq!(s.imm, 2047);
    assert_eq!(s.funct3, 0x0);
}

#[test]
fn test_load_funct3_assignment() {
    let cases: [(u32, u8); 7] = [
        (encode::lb(Gpr::A0, Gpr::SP, 0), 0x0),
        (encode::lh(Gpr::A0, Gpr::SP, 0), 0x1),
        (encode::lw(Gpr::A0, Gpr::SP, 0), 0x2),
        (encode::ld(Gpr::A0, Gpr::SP, 0), 0x3),
        (encode::lbu(Gpr::A0, Gpr::SP, 0), 0x4),
        (encode::lhu(Gpr::A0, Gpr::SP, 0), 0x5),
        (encode::lwu(Gpr::A0, Gpr::SP, 0), 0x6),
    ];
    for (word, funct3) in cases {
        assert_eq!(decode::opcode_of(word), decode::opcode::LOAD);
        assert_eq!(TypeI::from_word(word).funct3, funct3);
    }
}

#[test]
fn test_system_funct12() {
    let i = TypeI::from_word(encode::ecall());
    assert_eq!(i.funct12(), 0x000);
    let i = TypeI::from_word(encode::ebreak());
    assert_eq!(i.funct12(), 0x001);
}

#[test]
fn test_m_extension_funct7() {
    for word in [
        encode::mul(Gpr::A0, Gpr::A1, Gpr::A2),
        encode::div(Gpr::A0, Gpr::A1, Gpr::A2),
        encode::remu(Gpr::A0, Gpr::A1, Gpr::A2),
    ] {
        assert_eq!(TypeR::from_word(word).funct7, 0x01);
    }
    for word in [
        encode::mulw(Gpr::A0, Gpr::A1, Gpr::A2),
        encode::divuw(Gpr::A0, Gpr::A1, Gpr::A2),
    ] {
        assert_eq!(decode::opcode_of(word), decode::opcode::OP_32);
        assert_eq!(TypeR::from_word(word).funct7, 0x01);
    }
}

#[test]
fn test_negative_store_offset_bits() {
    // imm = -1 splits across the two S-format fields; both halves must be ones
    let word = encode::sw(Gpr::SP, Gpr::A0, -1);
    assert_eq!((word >> 25) & 0x7f, 0x7f);
    assert_eq!((word >> 7) & 0x1f, 0x1f);
}

//! Shared helpers for assembling guest images.

use sbx_riscv_inst::{Gpr, encode};

/// Flatten instruction words and append a data blob.
pub fn image(words: &[u32], data: &[u8]) -> Vec<u8> {
    let mut img: Vec<u8> = words.iter().flat_map(|w| w.to_le_bytes()).collect();
    img.extend_from_slice(data);
    img
}

/// lui/addi pair materialising an absolute guest address in `rd`.
pub fn li_addr(rd: Gpr, addr: u32) -> [u32; 2] {
    let hi = addr.wrapping_add(0x800) >> 12;
    let lo = addr as i32 - ((hi << 12) as i32);
    [encode::lui(rd, hi), encode::addi(rd, rd, lo)]
}

// Tue Jan 13 2026 - Alex

//! The handful of AArch64 encodings needed to follow an `ADRP` + `ADD` address pair.

use crate::memory::Address;

pub const INSN_SIZE: u64 = 4;

const ADR_MASK: u32 = 0x9F00_0000;
const ADR_OPCODE: u32 = 0x1000_0000;
const ADRP_OPCODE: u32 = 0x9000_0000;

// sf and op are free; S must be clear and bits 28:23 select "add/subtract (immediate)".
const ADDSUB_IMM_MASK: u32 = 0x1F80_0000;
const ADDSUB_IMM_OPCODE: u32 = 0x1100_0000;

pub fn is_adr(insn: u32) -> bool {
    insn & ADR_MASK == ADR_OPCODE
}

pub fn is_adrp(insn: u32) -> bool {
    insn & ADR_MASK == ADRP_OPCODE
}

pub fn is_addsub_imm(insn: u32) -> bool {
    insn & ADDSUB_IMM_MASK == ADDSUB_IMM_OPCODE
}

/// Decodes the PC-relative immediate of `ADR`/`ADRP`.
///
/// `immhi:immlo` is a signed 21-bit field. For `ADRP` it counts 4 KiB pages, so the returned
/// displacement is already scaled by 4096 and spans a signed 33-bit range.
/// Returns `None` for anything that is not `ADR` or `ADRP`.
pub fn decode_adr_imm(insn: u32) -> Option<i64> {
    if !is_adr(insn) && !is_adrp(insn) {
        return None;
    }

    let immlo = (insn >> 29) & 0x3;
    let immhi = (insn >> 5) & 0x7FFFF;
    let imm21 = ((immhi << 2) | immlo) as i32;
    // sign-extend from bit 20
    let imm = ((imm21 << 11) >> 11) as i64;

    if is_adrp(insn) {
        Some(imm << 12)
    } else {
        Some(imm)
    }
}

/// The raw `imm12` field of `ADD`/`SUB (immediate)`, bits 21:10. The `sh` bit is not applied.
pub fn decode_addsub_imm(insn: u32) -> u32 {
    (insn >> 10) & 0xFFF
}

/// `addr & !0xFFF`, the base ADRP adds its displacement to.
pub fn page_base(addr: Address) -> Address {
    addr.page_base()
}

pub fn encode_adrp(rd: u8, page_delta: i64) -> u32 {
    let imm = (page_delta as u32) & 0x1F_FFFF;
    let immlo = imm & 0x3;
    let immhi = (imm >> 2) & 0x7FFFF;
    ADRP_OPCODE | (immlo << 29) | (immhi << 5) | (rd as u32 & 0x1F)
}

pub fn encode_add_imm(rd: u8, rn: u8, imm12: u32) -> u32 {
    0x9100_0000 | ((imm12 & 0xFFF) << 10) | ((rn as u32 & 0x1F) << 5) | (rd as u32 & 0x1F)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_adrp_positive_page() {
        // adrp x8, #0x20000
        let insn = encode_adrp(8, 0x20);
        assert!(is_adrp(insn));
        assert_eq!(decode_adr_imm(insn), Some(0x20000));
    }

    #[test]
    fn test_decode_adrp_negative_page() {
        let insn = encode_adrp(0, -3);
        assert_eq!(decode_adr_imm(insn), Some(-3 * 0x1000));
    }

    #[test]
    fn test_decode_adrp_extremes() {
        assert_eq!(decode_adr_imm(encode_adrp(1, 0xFFFFF)), Some(0xFFFFF << 12));
        assert_eq!(decode_adr_imm(encode_adrp(1, -0x100000)), Some(-0x100000i64 << 12));
    }

    #[test]
    fn test_decode_adr_not_scaled() {
        // adr x0, #-4
        let insn = 0x10FF_FFE0;
        assert!(is_adr(insn));
        assert_eq!(decode_adr_imm(insn), Some(-4));
    }

    #[test]
    fn test_decode_adr_rejects_other_opcodes() {
        assert_eq!(decode_adr_imm(0x9100_0000), None);
        assert_eq!(decode_adr_imm(0xD503_201F), None);
        assert_eq!(decode_adr_imm(0), None);
    }

    #[test]
    fn test_decode_add_imm12() {
        // add x8, x8, #0x3a0
        let insn = encode_add_imm(8, 8, 0x3A0);
        assert!(is_addsub_imm(insn));
        assert_eq!(decode_addsub_imm(insn), 0x3A0);
        assert_eq!(decode_addsub_imm(0x9140_0508), 1);
    }

    #[test]
    fn test_known_encoding() {
        // adrp x8, #0x1a3e000
        let insn: u32 = 0xD000_D1E8;
        assert!(is_adrp(insn));
        assert_eq!(insn & 0x1F, 8);
        assert_eq!(decode_adr_imm(insn), Some(0x1A3E000));
    }
}

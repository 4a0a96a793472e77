// Tue Jan 13 2026 - Alex

pub mod arena_breakout;
pub mod offsets;
pub mod registry;

pub use offsets::UEOffsets;
pub use registry::{ProfileRegistry, RegistryError};

use crate::memory::Address;
use crate::pattern::{MapSelector, Pattern};
use crate::target::{ExecutableHeader, Target};
use crate::utils::arm64::{self, INSN_SIZE};
use goblin::elf::header::EM_AARCH64;
use log::{debug, error, info};

/// Where to find one global: a signature near an `ADRP` + `ADD` pair that forms its address.
#[derive(Debug, Clone, Copy)]
pub struct AnchorSignature {
    /// Name of the global, also used in the miss message.
    pub label: &'static str,
    pub pattern: &'static str,
    /// Added to the signature hit to land on the `ADRP`.
    pub step: i64,
}

impl AnchorSignature {
    pub fn pattern(&self) -> Option<Pattern> {
        match Pattern::from_ida_pattern(self.pattern) {
            Ok(p) => Some(p.with_name(self.label)),
            Err(e) => {
                error!("{} signature is malformed: {}", self.label, e);
                None
            }
        }
    }

    pub fn resolve(&self, target: &dyn Target) -> Address {
        resolve_adrp_add(target, self)
    }
}

/// Everything the dumper needs to know about one title.
///
/// Profiles are plain values; the host keeps them in a [`ProfileRegistry`] and picks one by
/// package id.
pub struct GameProfile {
    pub name: &'static str,
    pub app_ids: &'static [&'static str],
    pub arch_gate: fn(&ExecutableHeader) -> bool,
    pub uses_name_pool: bool,
    pub uses_outline_numbers: bool,
    pub guobject_array: AnchorSignature,
    pub name_pool: AnchorSignature,
    pub offsets: &'static UEOffsets,
}

impl GameProfile {
    pub fn app_name(&self) -> &'static str {
        self.name
    }

    pub fn app_ids(&self) -> &'static [&'static str] {
        self.app_ids
    }

    pub fn matches_app_id(&self, app_id: &str) -> bool {
        self.app_ids.iter().any(|id| *id == app_id)
    }

    /// False when the target's header is unavailable.
    pub fn arch_supported(&self, target: &dyn Target) -> bool {
        target
            .executable_header()
            .map(|header| (self.arch_gate)(&header))
            .unwrap_or(false)
    }

    pub fn uses_name_pool(&self) -> bool {
        self.uses_name_pool
    }

    pub fn uses_outline_numbers(&self) -> bool {
        self.uses_outline_numbers
    }

    pub fn global_uobject_array_address(&self, target: &dyn Target) -> Address {
        self.guobject_array.resolve(target)
    }

    pub fn global_name_pool_address(&self, target: &dyn Target) -> Address {
        self.name_pool.resolve(target)
    }

    pub fn offsets(&self) -> &'static UEOffsets {
        self.offsets
    }
}

pub fn arm64_only(header: &ExecutableHeader) -> bool {
    header.machine == EM_AARCH64
}

/// Finds `anchor` in the target and decodes the `ADRP` + `ADD` pair at the hit.
///
/// Returns `page_base(insn) + adrp_displacement + add_imm12`, or zero if the signature is not
/// found, either instruction reads as zero, or the `ADRP` displacement is missing or zero.
pub fn resolve_adrp_add(target: &dyn Target, anchor: &AnchorSignature) -> Address {
    let selector = MapSelector::for_environment(target.is_emulator());

    let pattern = match anchor.pattern() {
        Some(p) => p,
        None => return Address::zero(),
    };

    let insn_address = target.find_pattern(selector, &pattern, anchor.step);
    if insn_address.is_null() {
        error!("{} pattern failed.", anchor.label);
        return Address::zero();
    }

    let adrp_insn = target.read_u32(insn_address);
    let add_insn = target.read_u32(insn_address + INSN_SIZE);
    if adrp_insn == 0 || add_insn == 0 {
        debug!("{}: empty instruction slot at {}", anchor.label, insn_address);
        return Address::zero();
    }

    // A zero page delta almost always means the signature landed on something that is not ADRP.
    let adrp_pc_rel = match arm64::decode_adr_imm(adrp_insn) {
        Some(rel) if rel != 0 => rel,
        _ => {
            debug!(
                "{}: 0x{:08x} at {} is not a usable ADRP",
                anchor.label, adrp_insn, insn_address
            );
            return Address::zero();
        }
    };

    let add_imm12 = arm64::decode_addsub_imm(add_insn);
    let resolved = arm64::page_base(insn_address).offset(adrp_pc_rel) + add_imm12 as u64;

    info!("{} = {}", anchor.label, resolved);
    resolved
}

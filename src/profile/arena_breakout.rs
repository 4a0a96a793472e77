// Tue Jan 13 2026 - Alex

//! Arena Breakout, UE 4.26, Android arm64.

use crate::profile::offsets::*;
use crate::profile::{arm64_only, AnchorSignature, GameProfile};

const EFUNCTION_FLAGS: u16 = 0xB0;
const NUM_PARAMS: u16 = EFUNCTION_FLAGS + 0x4;

pub static OFFSETS: UEOffsets = UEOffsets {
    stride: 2,
    // iOS builds keep the blocks at 0xD0
    fname_pool_blocks: 0x40,
    fname_max_size: 0xff,
    fname: FNameOffsets { number: 4 },
    fname_entry: FNameEntryOffsets { name: 0 },
    fname_entry23: FNameEntry23Offsets {
        header: 0,
        get_is_wide: header_is_wide,
        get_length: header_length,
    },
    fuobject_array: FUObjectArrayOffsets { obj_objects: 0x10 },
    tuobject_array: TUObjectArrayOffsets {
        objects: 0,
        num_elements: 0x14,
    },
    fuobject_item: FUObjectItemOffsets { object: 0, size: 0x18 },
    uobject: UObjectOffsets {
        object_flags: 0x8,
        internal_index: 0xC,
        class_private: 0x10,
        name_private: 0x18,
        outer_private: 0x20,
    },
    // sizeof(UObject)
    ufield: UFieldOffsets { next: 0x28 },
    ustruct: UStructOffsets {
        super_struct: 0x40,
        children: 0x48,
        child_properties: 0x50,
        properties_size: 0x58,
    },
    uenum: UEnumOffsets { names: 0x40 },
    ufunction: UFunctionOffsets {
        efunction_flags: EFUNCTION_FLAGS,
        num_params: NUM_PARAMS,
        param_size: NUM_PARAMS + 0x2,
        func: EFUNCTION_FLAGS + 0x28,
    },
    ffield: FFieldOffsets {
        class_private: 0x8,
        next: 0x20,
        name_private: 0x28,
        flags_private: 0x30,
    },
    fproperty: FPropertyOffsets {
        array_dim: 0x34,
        element_size: 0x38,
        property_flags: 0x40,
        offset_internal: 0x4C,
        size: 0x78,
    },
    uproperty: UPropertyOffsets::UNUSED,
};

pub static PROFILE: GameProfile = GameProfile {
    name: "Arena Breakout",
    app_ids: &["com.proximabeta.mf.uamo"],
    arch_gate: arm64_only,
    uses_name_pool: true,
    uses_outline_numbers: false,
    guobject_array: AnchorSignature {
        label: "GUObjectArray",
        pattern: "08 ? ? 91 E1 03 ? AA E0 03 08 AA E2 03 1F 2A",
        step: -4,
    },
    name_pool: AnchorSignature {
        label: "NamePoolData",
        pattern: "C8 00 00 37 ? ? ? ? ? ? ? 91 ? ? FF 97",
        step: 4,
    },
    offsets: &OFFSETS,
};

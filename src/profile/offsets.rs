// Tue Jan 13 2026 - Alex

//! Byte offsets into UE reflection types, grouped the way the walker consumes them.
//!
//! Every profile hands out one `UEOffsets`. The record is `#[repr(C)]` and its size is pinned
//! below, so the walker and all profiles agree on layout.

use serde::Serialize;

/// Size of `UEOffsets` the walker is built against: 40 `u16` slots plus the two header
/// decoders in the `FNameEntry23` group.
#[cfg(target_pointer_width = "64")]
pub const UE_OFFSETS_SIZE: usize = 112;
#[cfg(target_pointer_width = "32")]
pub const UE_OFFSETS_SIZE: usize = 92;

const _: () = assert!(std::mem::size_of::<UEOffsets>() == UE_OFFSETS_SIZE);

#[repr(C)]
#[derive(Debug, Clone, Copy, Serialize)]
pub struct UEOffsets {
    /// alignof(FNameEntry)
    #[serde(rename = "Stride")]
    pub stride: u16,
    /// First block slot inside the name pool.
    #[serde(rename = "FNamePoolBlocks")]
    pub fname_pool_blocks: u16,
    #[serde(rename = "FNameMaxSize")]
    pub fname_max_size: u16,
    #[serde(rename = "FName")]
    pub fname: FNameOffsets,
    #[serde(rename = "FNameEntry")]
    pub fname_entry: FNameEntryOffsets,
    #[serde(rename = "FNameEntry23")]
    pub fname_entry23: FNameEntry23Offsets,
    #[serde(rename = "FUObjectArray")]
    pub fuobject_array: FUObjectArrayOffsets,
    #[serde(rename = "TUObjectArray")]
    pub tuobject_array: TUObjectArrayOffsets,
    #[serde(rename = "FUObjectItem")]
    pub fuobject_item: FUObjectItemOffsets,
    #[serde(rename = "UObject")]
    pub uobject: UObjectOffsets,
    #[serde(rename = "UField")]
    pub ufield: UFieldOffsets,
    #[serde(rename = "UStruct")]
    pub ustruct: UStructOffsets,
    #[serde(rename = "UEnum")]
    pub uenum: UEnumOffsets,
    #[serde(rename = "UFunction")]
    pub ufunction: UFunctionOffsets,
    #[serde(rename = "FField")]
    pub ffield: FFieldOffsets,
    #[serde(rename = "FProperty")]
    pub fproperty: FPropertyOffsets,
    #[serde(rename = "UProperty")]
    pub uproperty: UPropertyOffsets,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct FNameOffsets {
    pub number: u16,
}

/// Pre-4.23 name entries. Unused by pooled names.
#[repr(C)]
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct FNameEntryOffsets {
    pub name: u16,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FNameEntry23Offsets {
    /// 16-bit header holding the wide flag and the length.
    #[serde(rename = "Header")]
    pub header: u16,
    #[serde(skip)]
    pub get_is_wide: fn(u16) -> bool,
    #[serde(skip)]
    pub get_length: fn(u16) -> usize,
}

impl FNameEntry23Offsets {
    pub fn is_wide(&self, header: u16) -> bool {
        (self.get_is_wide)(header)
    }

    pub fn length(&self, header: u16) -> usize {
        (self.get_length)(header)
    }
}

/// Header layout shared by UE 4.23+ name pools: bit 0 is the wide flag, bits 15:6 the length.
pub fn header_is_wide(header: u16) -> bool {
    (header & 1) != 0
}

pub fn header_length(header: u16) -> usize {
    (header >> 6) as usize
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct FUObjectArrayOffsets {
    pub obj_objects: u16,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TUObjectArrayOffsets {
    pub objects: u16,
    pub num_elements: u16,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct FUObjectItemOffsets {
    pub object: u16,
    /// Stride between consecutive items.
    pub size: u16,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UObjectOffsets {
    pub object_flags: u16,
    pub internal_index: u16,
    pub class_private: u16,
    pub name_private: u16,
    pub outer_private: u16,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UFieldOffsets {
    pub next: u16,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UStructOffsets {
    pub super_struct: u16,
    pub children: u16,
    pub child_properties: u16,
    pub properties_size: u16,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UEnumOffsets {
    pub names: u16,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Serialize)]
pub struct UFunctionOffsets {
    #[serde(rename = "EFunctionFlags")]
    pub efunction_flags: u16,
    #[serde(rename = "NumParams")]
    pub num_params: u16,
    #[serde(rename = "ParamSize")]
    pub param_size: u16,
    #[serde(rename = "Func")]
    pub func: u16,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct FFieldOffsets {
    pub class_private: u16,
    pub next: u16,
    pub name_private: u16,
    pub flags_private: u16,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FPropertyOffsets {
    #[serde(rename = "ArrayDim")]
    pub array_dim: u16,
    #[serde(rename = "ElementSize")]
    pub element_size: u16,
    #[serde(rename = "PropertyFlags")]
    pub property_flags: u16,
    #[serde(rename = "Offset_Internal")]
    pub offset_internal: u16,
    #[serde(rename = "Size")]
    pub size: u16,
}

/// Pre-4.25 properties. Zeroed for engines that use `FProperty`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct UPropertyOffsets {
    #[serde(rename = "ArrayDim")]
    pub array_dim: u16,
    #[serde(rename = "ElementSize")]
    pub element_size: u16,
    #[serde(rename = "PropertyFlags")]
    pub property_flags: u16,
    #[serde(rename = "Offset_Internal")]
    pub offset_internal: u16,
    #[serde(rename = "Size")]
    pub size: u16,
}

impl UPropertyOffsets {
    pub const UNUSED: Self = Self {
        array_dim: 0,
        element_size: 0,
        property_flags: 0,
        offset_internal: 0,
        size: 0,
    };
}

// Tue Jan 13 2026 - Alex

use crate::memory::{Address, MemoryReader};
use crate::profile::UEOffsets;
use crate::walker::WalkError;

/// `FChunkedFixedUObjectArray` chunk length.
pub const NUM_ELEMENTS_PER_CHUNK: usize = 64 * 1024;

const POINTER_SIZE: u64 = 8;

/// Reference stored in `UObject::NamePrivate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FNameRef {
    pub comparison_index: u32,
    pub number: u32,
}

/// The chunked object table behind `GUObjectArray`.
pub struct ObjectArray<'a> {
    reader: &'a dyn MemoryReader,
    offsets: &'a UEOffsets,
    chunks: Address,
    num_elements: usize,
}

impl<'a> ObjectArray<'a> {
    pub fn new(
        reader: &'a dyn MemoryReader,
        offsets: &'a UEOffsets,
        guobject_array: Address,
    ) -> Result<Self, WalkError> {
        let obj_objects = guobject_array + offsets.fuobject_array.obj_objects as u64;
        let chunks = reader.read_ptr(obj_objects + offsets.tuobject_array.objects as u64)?;
        if chunks.is_null() {
            return Err(WalkError::NullPointer("TUObjectArray::Objects"));
        }
        let num_elements = reader
            .read_i32(obj_objects + offsets.tuobject_array.num_elements as u64)?
            .max(0) as usize;

        Ok(Self {
            reader,
            offsets,
            chunks,
            num_elements,
        })
    }

    pub fn len(&self) -> usize {
        self.num_elements
    }

    pub fn is_empty(&self) -> bool {
        self.num_elements == 0
    }

    /// Address of the `FUObjectItem` for `index`.
    pub fn item_address(&self, index: usize) -> Result<Address, WalkError> {
        if index >= self.num_elements {
            return Err(WalkError::IndexOutOfRange {
                index,
                len: self.num_elements,
            });
        }

        let chunk_slot = self.chunks + (index / NUM_ELEMENTS_PER_CHUNK) as u64 * POINTER_SIZE;
        let chunk = self.reader.read_ptr(chunk_slot)?;
        if chunk.is_null() {
            return Err(WalkError::NullPointer("object chunk"));
        }

        let within = (index % NUM_ELEMENTS_PER_CHUNK) as u64;
        Ok(chunk + within * self.offsets.fuobject_item.size as u64)
    }

    /// `None` for empty slots.
    pub fn object(&self, index: usize) -> Result<Option<UObjectView<'a>>, WalkError> {
        let item = self.item_address(index)?;
        let object = self.reader.read_ptr(item + self.offsets.fuobject_item.object as u64)?;
        if object.is_null() {
            return Ok(None);
        }
        Ok(Some(UObjectView::new(self.reader, self.offsets, object)))
    }

    /// Live objects in index order; unreadable slots are skipped.
    pub fn iter(&self) -> impl Iterator<Item = (usize, UObjectView<'a>)> + '_ {
        (0..self.num_elements).filter_map(move |i| match self.object(i) {
            Ok(Some(obj)) => Some((i, obj)),
            _ => None,
        })
    }
}

/// Field accessors over one `UObject` in the target.
#[derive(Clone, Copy)]
pub struct UObjectView<'a> {
    reader: &'a dyn MemoryReader,
    offsets: &'a UEOffsets,
    base: Address,
}

impl<'a> UObjectView<'a> {
    pub fn new(reader: &'a dyn MemoryReader, offsets: &'a UEOffsets, base: Address) -> Self {
        Self { reader, offsets, base }
    }

    pub fn address(&self) -> Address {
        self.base
    }

    fn field(&self, offset: u16) -> Address {
        self.base + offset as u64
    }

    pub fn object_flags(&self) -> Result<u32, WalkError> {
        Ok(self.reader.read_u32(self.field(self.offsets.uobject.object_flags))?)
    }

    pub fn internal_index(&self) -> Result<i32, WalkError> {
        Ok(self.reader.read_i32(self.field(self.offsets.uobject.internal_index))?)
    }

    pub fn class(&self) -> Result<Option<UObjectView<'a>>, WalkError> {
        let class = self.reader.read_ptr(self.field(self.offsets.uobject.class_private))?;
        Ok((!class.is_null()).then(|| UObjectView::new(self.reader, self.offsets, class)))
    }

    pub fn outer(&self) -> Result<Option<UObjectView<'a>>, WalkError> {
        let outer = self.reader.read_ptr(self.field(self.offsets.uobject.outer_private))?;
        Ok((!outer.is_null()).then(|| UObjectView::new(self.reader, self.offsets, outer)))
    }

    pub fn name(&self) -> Result<FNameRef, WalkError> {
        let name = self.field(self.offsets.uobject.name_private);
        Ok(FNameRef {
            comparison_index: self.reader.read_u32(name)?,
            number: self.reader.read_u32(name + self.offsets.fname.number as u64)?,
        })
    }
}

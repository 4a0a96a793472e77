// Tue Jan 13 2026 - Alex

use crate::memory::{Address, MemoryReader};
use crate::profile::UEOffsets;
use crate::walker::{FNameRef, WalkError};

const POINTER_SIZE: u64 = 8;
const HEADER_SIZE: u64 = 2;

/// Block-allocated `FNamePool` name storage.
pub struct NamePool<'a> {
    reader: &'a dyn MemoryReader,
    offsets: &'a UEOffsets,
    blocks: Address,
}

impl<'a> NamePool<'a> {
    pub fn new(
        reader: &'a dyn MemoryReader,
        offsets: &'a UEOffsets,
        name_pool_data: Address,
    ) -> Self {
        Self {
            reader,
            offsets,
            blocks: name_pool_data + offsets.fname_pool_blocks as u64,
        }
    }

    /// Block is the high half of the id, offset the low half scaled by the pool stride.
    pub fn entry_address(&self, comparison_index: u32) -> Result<Address, WalkError> {
        let block = (comparison_index >> 16) as u64;
        let offset = (comparison_index & 0xFFFF) as u64 * self.offsets.stride as u64;

        let block_ptr = self.reader.read_ptr(self.blocks + block * POINTER_SIZE)?;
        if block_ptr.is_null() {
            return Err(WalkError::NullPointer("name block"));
        }
        Ok(block_ptr + offset)
    }

    pub fn entry(&self, comparison_index: u32) -> Result<String, WalkError> {
        let entry = self.entry_address(comparison_index)?;
        let layout = &self.offsets.fname_entry23;

        let header = self.reader.read_u16(entry + layout.header as u64)?;
        let length = layout.length(header);
        if length == 0 || length > self.offsets.fname_max_size as usize {
            return Err(WalkError::InvalidName {
                index: comparison_index,
                length,
            });
        }

        let data = entry + layout.header as u64 + HEADER_SIZE;
        if layout.is_wide(header) {
            let raw = self.reader.read_bytes(data, length * 2)?;
            let units: Vec<u16> = raw
                .chunks_exact(2)
                .map(|c| u16::from_le_bytes([c[0], c[1]]))
                .collect();
            Ok(String::from_utf16_lossy(&units))
        } else {
            // ANSICHAR is Latin-1
            let raw = self.reader.read_bytes(data, length)?;
            Ok(raw.into_iter().map(char::from).collect())
        }
    }

    /// Display form of an `FName`: a non-zero number appends `_<number - 1>`.
    pub fn name(&self, name: FNameRef) -> Result<String, WalkError> {
        let base = self.entry(name.comparison_index)?;
        if name.number == 0 {
            Ok(base)
        } else {
            Ok(format!("{}_{}", base, name.number - 1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::testing::SparseMemory;
    use crate::memory::Protection;
    use crate::profile::arena_breakout::OFFSETS;

    const POOL: u64 = 0x4000;
    const BLOCK0: u64 = 0x20_0000;
    const BLOCK2: u64 = 0x30_0000;

    fn ansi_header(len: u16) -> u16 {
        len << 6
    }

    fn pool() -> SparseMemory {
        let mut mem = SparseMemory::new();
        mem.map(POOL, 0x100, Protection::ReadWrite)
            .map(BLOCK0, 0x1000, Protection::ReadWrite)
            .map(BLOCK2, 0x1000, Protection::ReadWrite)
            .write_u64(POOL + 0x40, BLOCK0)
            .write_u64(POOL + 0x40 + 16, BLOCK2)
            // id 0x0 -> "None"
            .write_u16(BLOCK0, ansi_header(4))
            .write(BLOCK0 + 2, b"None")
            // id 0x10 -> "Actor", entry at 0x10 * stride
            .write_u16(BLOCK0 + 0x20, ansi_header(5))
            .write(BLOCK0 + 0x22, b"Actor")
            // id 0x20 -> header claims an oversized name
            .write_u16(BLOCK0 + 0x40, ansi_header(0x300))
            // id 0x20008 -> wide "Übung"
            .write_u16(BLOCK2 + 0x10, ansi_header(5) | 1)
            .write(
                BLOCK2 + 0x12,
                &[0xDC, 0x00, b'b', 0, b'u', 0, b'n', 0, b'g', 0],
            );
        mem
    }

    #[test]
    fn test_entry_address() {
        let mem = pool();
        let names = NamePool::new(&mem, &OFFSETS, Address::new(POOL));
        assert_eq!(names.entry_address(0x10).unwrap(), Address::new(BLOCK0 + 0x20));
        assert_eq!(names.entry_address(0x0002_0008).unwrap(), Address::new(BLOCK2 + 0x10));
        // block 1 was never allocated
        assert!(matches!(
            names.entry_address(0x0001_0000),
            Err(WalkError::NullPointer(_))
        ));
    }

    #[test]
    fn test_ansi_and_wide_entries() {
        let mem = pool();
        let names = NamePool::new(&mem, &OFFSETS, Address::new(POOL));
        assert_eq!(names.entry(0).unwrap(), "None");
        assert_eq!(names.entry(0x10).unwrap(), "Actor");
        assert_eq!(names.entry(0x0002_0008).unwrap(), "Übung");
    }

    #[test]
    fn test_number_suffix() {
        let mem = pool();
        let names = NamePool::new(&mem, &OFFSETS, Address::new(POOL));
        let plain = FNameRef {
            comparison_index: 0x10,
            number: 0,
        };
        let numbered = FNameRef {
            comparison_index: 0x10,
            number: 3,
        };
        assert_eq!(names.name(plain).unwrap(), "Actor");
        assert_eq!(names.name(numbered).unwrap(), "Actor_2");
    }

    #[test]
    fn test_oversized_entry_rejected() {
        let mem = pool();
        let names = NamePool::new(&mem, &OFFSETS, Address::new(POOL));
        assert!(matches!(
            names.entry(0x20),
            Err(WalkError::InvalidName { index: 0x20, length: 0x300 })
        ));
        // empty slot, header reads as zero
        assert!(matches!(names.entry(0x30), Err(WalkError::InvalidName { length: 0, .. })));
    }
}

// Wed Jan 15 2026 - Alex

use crate::memory::{Address, MemoryError, MemoryRange, MemoryReader, MemoryRegion, Protection};
use std::collections::BTreeMap;

/// In-memory address space for tests: a handful of regions backed by byte vectors.
#[derive(Default)]
pub struct SparseMemory {
    regions: BTreeMap<u64, (Protection, Vec<u8>)>,
}

impl SparseMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn map(&mut self, start: u64, size: usize, protection: Protection) -> &mut Self {
        self.regions.insert(start, (protection, vec![0u8; size]));
        self
    }

    pub fn write(&mut self, addr: u64, data: &[u8]) -> &mut Self {
        let (start, (_, bytes)) = self
            .regions
            .range_mut(..=addr)
            .next_back()
            .expect("write into unmapped test memory");
        let rel = (addr - *start) as usize;
        bytes[rel..rel + data.len()].copy_from_slice(data);
        self
    }

    pub fn write_u16(&mut self, addr: u64, value: u16) -> &mut Self {
        self.write(addr, &value.to_le_bytes())
    }

    pub fn write_u32(&mut self, addr: u64, value: u32) -> &mut Self {
        self.write(addr, &value.to_le_bytes())
    }

    pub fn write_u64(&mut self, addr: u64, value: u64) -> &mut Self {
        self.write(addr, &value.to_le_bytes())
    }
}

impl MemoryReader for SparseMemory {
    fn read_into(&self, addr: Address, buf: &mut [u8]) -> Result<(), MemoryError> {
        let (start, (_, bytes)) = self
            .regions
            .range(..=addr.as_u64())
            .next_back()
            .ok_or(MemoryError::ReadFailed(addr.as_u64()))?;
        let range = MemoryRange::from_start_size(Address::new(*start), bytes.len() as u64);
        if !range.contains_span(addr, buf.len() as u64) {
            return Err(MemoryError::ReadFailed(addr.as_u64()));
        }
        let rel = (addr.as_u64() - start) as usize;
        buf.copy_from_slice(&bytes[rel..rel + buf.len()]);
        Ok(())
    }

    fn regions(&self) -> Result<Vec<MemoryRegion>, MemoryError> {
        Ok(self
            .regions
            .iter()
            .map(|(start, (prot, bytes))| {
                let range = MemoryRange::from_start_size(Address::new(*start), bytes.len() as u64);
                MemoryRegion::new(range, *prot)
            })
            .collect())
    }
}

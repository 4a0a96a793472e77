// Tue Jan 13 2026 - Alex

use crate::memory::{Address, MemoryReader, MemoryRegion};
use crate::pattern::{MapSelector, Pattern};
use log::trace;
use rayon::prelude::*;

/// Chunked signature scanner over a region list.
///
/// Results always follow map order (lowest region first, lowest offset first) even when regions
/// are scanned in parallel, so repeated runs over the same snapshot agree.
pub struct PatternScanner {
    chunk_size: usize,
    use_parallel: bool,
}

impl PatternScanner {
    pub fn new() -> Self {
        Self {
            chunk_size: 0x10000,
            use_parallel: true,
        }
    }

    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size;
        self
    }

    pub fn use_parallel(mut self, parallel: bool) -> Self {
        self.use_parallel = parallel;
        self
    }

    /// First hit of `pattern` inside regions accepted by `selector`.
    pub fn scan_first(
        &self,
        reader: &dyn MemoryReader,
        pattern: &Pattern,
        regions: &[MemoryRegion],
        selector: MapSelector,
    ) -> Option<Address> {
        let selected: Vec<&MemoryRegion> = regions.iter().filter(|r| selector.matches(r)).collect();
        trace!(
            "scanning {} of {} regions ({}) for {}",
            selected.len(),
            regions.len(),
            selector,
            pattern
        );

        if self.use_parallel {
            selected
                .par_iter()
                .find_map_first(|region| self.scan_region(reader, pattern, region))
        } else {
            selected
                .iter()
                .find_map(|region| self.scan_region(reader, pattern, region))
        }
    }

    fn scan_region(
        &self,
        reader: &dyn MemoryReader,
        pattern: &Pattern,
        region: &MemoryRegion,
    ) -> Option<Address> {
        let start = region.start();
        let size = region.size() as usize;
        if size < pattern.len() {
            return None;
        }

        let chunk_size = self.chunk_size.max(pattern.len());
        let overlap = pattern.len().saturating_sub(1);
        let step = chunk_size.saturating_sub(overlap).max(1);

        let mut offset = 0;
        while offset < size {
            let read_size = (size - offset).min(chunk_size);
            let addr = start + offset as u64;

            if let Ok(data) = reader.read_bytes(addr, read_size) {
                if let Some(match_offset) = pattern.find_in(&data) {
                    return Some(addr + match_offset as u64);
                }
            }

            if offset + read_size >= size {
                break;
            }
            offset += step;
        }

        None
    }
}

impl Default for PatternScanner {
    fn default() -> Self {
        Self::new()
    }
}

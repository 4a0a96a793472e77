// Tue Jan 13 2026 - Alex

//! Reads engine globals through a profile's offset table once their addresses are resolved.

pub mod error;
pub mod names;
pub mod objects;

pub use error::WalkError;
pub use names::NamePool;
pub use objects::{FNameRef, ObjectArray, UObjectView, NUM_ELEMENTS_PER_CHUNK};

use crate::memory::{Address, MemoryReader};
use crate::profile::UEOffsets;
use log::{debug, trace};
use serde::Serialize;

/// Slots a sample may look at per object it asks for.
const SLOTS_PER_SAMPLE: usize = 64;

#[derive(Debug, Clone, Serialize)]
pub struct ObjectSummary {
    pub index: usize,
    pub address: Address,
    pub name: String,
    pub class: Option<String>,
}

/// First `limit` live objects with their names, as a check that both globals are right.
///
/// Objects whose names cannot be decoded are logged and skipped. At most
/// `limit * SLOTS_PER_SAMPLE` slots are visited.
pub fn sample_objects(
    reader: &dyn MemoryReader,
    offsets: &UEOffsets,
    guobject_array: Address,
    name_pool_data: Address,
    limit: usize,
) -> Result<Vec<ObjectSummary>, WalkError> {
    let objects = ObjectArray::new(reader, offsets, guobject_array)?;
    let names = NamePool::new(reader, offsets, name_pool_data);
    debug!("object array holds {} slots", objects.len());

    let slots = objects.len().min(limit.saturating_mul(SLOTS_PER_SAMPLE));
    let mut out = Vec::with_capacity(limit.min(objects.len()));
    for index in 0..slots {
        if out.len() >= limit {
            break;
        }

        let object = match objects.object(index) {
            Ok(Some(object)) => object,
            _ => continue,
        };
        let name = match object.name().and_then(|n| names.name(n)) {
            Ok(name) => name,
            Err(e) => {
                trace!("object {} at {}: {}", index, object.address(), e);
                continue;
            }
        };
        let class = object
            .class()?
            .and_then(|class| class.name().and_then(|n| names.name(n)).ok());

        out.push(ObjectSummary {
            index,
            address: object.address(),
            name,
            class,
        });
    }
    if out.len() < limit && slots < objects.len() {
        debug!("sample stopped after {} of {} slots", slots, objects.len());
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::testing::SparseMemory;
    use crate::memory::{MemoryError, MemoryRange, MemoryRegion, Protection};
    use crate::profile::arena_breakout::OFFSETS;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts reads that start inside `watch`.
    struct CountingReader {
        inner: SparseMemory,
        watch: MemoryRange,
        hits: AtomicUsize,
    }

    impl MemoryReader for CountingReader {
        fn read_into(&self, addr: Address, buf: &mut [u8]) -> Result<(), MemoryError> {
            if self.watch.contains(addr) {
                self.hits.fetch_add(1, Ordering::SeqCst);
            }
            self.inner.read_into(addr, buf)
        }

        fn regions(&self) -> Result<Vec<MemoryRegion>, MemoryError> {
            self.inner.regions()
        }
    }

    #[test]
    fn test_sample_objects() {
        let guobjects = 0x1000u64;
        let pool = 0x2000u64;
        let chunk = 0x10_0000u64;
        let block = 0x20_0000u64;
        let object = 0x30_0000u64;
        let class = 0x30_0100u64;

        let mut mem = SparseMemory::new();
        mem.map(guobjects, 0x100, Protection::ReadWrite)
            .map(pool, 0x100, Protection::ReadWrite)
            .map(chunk, 0x100, Protection::ReadWrite)
            .map(block, 0x100, Protection::ReadWrite)
            .map(object, 0x1000, Protection::ReadWrite)
            .write_u64(guobjects + 0x10, chunk + 0x80)
            .write_u32(guobjects + 0x24, 3)
            .write_u64(chunk + 0x80, chunk)
            // slots: 0 -> object, 1 -> class, 2 -> empty
            .write_u64(chunk, object)
            .write_u64(chunk + 0x18, class)
            .write_u64(pool + 0x40, block)
            .write_u16(block, 6 << 6)
            .write(block + 2, b"Player")
            .write_u16(block + 0x10, 5 << 6)
            .write(block + 0x12, b"Class")
            // object: ClassPrivate and NamePrivate
            .write_u64(object + 0x10, class)
            .write_u32(object + 0x18, 0)
            .write_u32(object + 0x1C, 1)
            .write_u32(class + 0x18, 0x8);

        let sample =
            sample_objects(&mem, &OFFSETS, Address::new(guobjects), Address::new(pool), 10)
                .unwrap();
        assert_eq!(sample.len(), 2);
        assert_eq!(sample[0].name, "Player_0");
        assert_eq!(sample[0].class.as_deref(), Some("Class"));
        assert_eq!(sample[1].index, 1);
        assert_eq!(sample[1].name, "Class");
        assert_eq!(sample[1].class, None);

        let one = sample_objects(&mem, &OFFSETS, Address::new(guobjects), Address::new(pool), 1)
            .unwrap();
        assert_eq!(one.len(), 1);
    }

    #[test]
    fn test_sample_gives_up_on_undecodable_names() {
        let guobjects = 0x1000u64;
        let pool = 0x2000u64;
        let chunks = 0x3000u64;
        let block = 0x20_0000u64;
        let object = 0x30_0000u64;
        let chunk = 0x40_0000u64;
        let slots = 1000usize;
        let item_size = OFFSETS.fuobject_item.size as u64;

        let mut mem = SparseMemory::new();
        mem.map(guobjects, 0x100, Protection::ReadWrite)
            .map(pool, 0x100, Protection::ReadWrite)
            .map(chunks, 0x100, Protection::ReadWrite)
            .map(block, 0x100, Protection::ReadWrite)
            .map(object, 0x100, Protection::ReadWrite)
            .map(chunk, slots * item_size as usize, Protection::ReadWrite)
            .write_u64(guobjects + 0x10, chunks)
            .write_u32(guobjects + 0x24, slots as u32)
            .write_u64(chunks, chunk)
            .write_u64(pool + 0x40, block)
            // zero-length entry header: every name fails to decode
            .write_u16(block, 0);
        for i in 0..slots as u64 {
            mem.write_u64(chunk + i * item_size, object);
        }

        let reader = CountingReader {
            inner: mem,
            watch: MemoryRange::from_start_size(Address::new(chunk), slots as u64 * item_size),
            hits: AtomicUsize::new(0),
        };

        let sample =
            sample_objects(&reader, &OFFSETS, Address::new(guobjects), Address::new(pool), 1)
                .unwrap();
        assert!(sample.is_empty());
        assert_eq!(reader.hits.load(Ordering::SeqCst), SLOTS_PER_SAMPLE);
    }
}

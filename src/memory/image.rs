// Tue Jan 13 2026 - Alex

use crate::memory::{Address, MemoryError, MemoryRange, MemoryReader, MemoryRegion, Protection};
use goblin::elf::program_header::PT_LOAD;
use goblin::elf::Elf;
use log::debug;
use memmap2::Mmap;
use std::fs::File;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
struct ImageSegment {
    /// `load_bias + p_vaddr`
    start: u64,
    memsz: u64,
    fileoff: u64,
    filesz: u64,
    protection: Protection,
}

/// An ELF shared object on disk, presented as if the loader had mapped it at `load_bias`.
///
/// Only `PT_LOAD` segments are visible. Bytes past `p_filesz` but inside `p_memsz` read as zero.
pub struct ImageMemory {
    map: Mmap,
    path: PathBuf,
    load_bias: u64,
    segments: Vec<ImageSegment>,
}

impl ImageMemory {
    pub fn load<P: AsRef<Path>>(path: P, load_bias: u64) -> Result<Self, MemoryError> {
        let file = File::open(path.as_ref())?;
        // The file is opened read-only and never written through this mapping.
        let map = unsafe { Mmap::map(&file)? };

        let elf = Elf::parse(&map)
            .map_err(|e| MemoryError::BinaryParseError(format!("Failed to parse ELF: {}", e)))?;

        let mut segments = Vec::new();
        for ph in elf.program_headers.iter().filter(|ph| ph.p_type == PT_LOAD) {
            // the whole segment must be addressable once shifted by the bias
            let start = load_bias
                .checked_add(ph.p_vaddr)
                .filter(|start| start.checked_add(ph.p_memsz).is_some())
                .ok_or_else(|| {
                    MemoryError::BinaryParseError(format!(
                        "segment at 0x{:x} does not fit at load bias 0x{:x}",
                        ph.p_vaddr, load_bias
                    ))
                })?;

            segments.push(ImageSegment {
                start,
                memsz: ph.p_memsz,
                fileoff: ph.p_offset,
                filesz: ph.p_filesz,
                protection: Protection::from_elf_flags(ph.p_flags),
            });
        }

        if segments.is_empty() {
            return Err(MemoryError::BinaryParseError(format!(
                "{} has no loadable segments",
                path.as_ref().display()
            )));
        }

        debug!("loaded {} with {} PT_LOAD segments", path.as_ref().display(), segments.len());

        Ok(Self {
            map,
            path: path.as_ref().to_path_buf(),
            load_bias,
            segments,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load_bias(&self) -> Address {
        Address::new(self.load_bias)
    }

    fn segment_range(&self, segment: &ImageSegment) -> MemoryRange {
        MemoryRange::from_start_size(Address::new(segment.start), segment.memsz)
    }
}

impl MemoryReader for ImageMemory {
    fn read_into(&self, addr: Address, buf: &mut [u8]) -> Result<(), MemoryError> {
        let segment = self
            .segments
            .iter()
            .find(|s| self.segment_range(s).contains_span(addr, buf.len() as u64))
            .ok_or(MemoryError::ReadFailed(addr.as_u64()))?;

        let rel = addr.as_u64() - segment.start;
        for (i, byte) in buf.iter_mut().enumerate() {
            let pos = rel + i as u64;
            *byte = if pos < segment.filesz {
                let file_byte = segment
                    .fileoff
                    .checked_add(pos)
                    .and_then(|p| usize::try_from(p).ok())
                    .and_then(|p| self.map.get(p))
                    .ok_or(MemoryError::ReadFailed(addr.as_u64()))?;
                *file_byte
            } else {
                0
            };
        }
        Ok(())
    }

    fn regions(&self) -> Result<Vec<MemoryRegion>, MemoryError> {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(self
            .segments
            .iter()
            .map(|s| {
                MemoryRegion::new(self.segment_range(s), s.protection)
                    .with_offset(s.fileoff)
                    .with_path(name.clone())
            })
            .collect())
    }
}

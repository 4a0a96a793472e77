// Tue Jan 13 2026 - Alex

use crate::memory::{Address, ImageMemory, MemoryError, MemoryReader, MemoryRegion, ProcessMemory};
use crate::pattern::{MapSelector, Pattern, PatternScanner};
use crate::target::header::HEADER_READ_SIZE;
use crate::target::{ExecutableHeader, Target};
use log::{debug, info, warn};
use std::path::Path;
use std::sync::Arc;

pub const DEFAULT_UE_LIBRARY: &str = "libUE4.so";

/// Libraries that only show up when arm64 code runs under a binary translator.
const TRANSLATOR_LIBRARIES: &[&str] = &["libhoudini.so", "libndk_translation.so"];

#[derive(Debug, Clone)]
pub struct AttachOptions {
    pub ue_library: String,
    pub emulator: Option<bool>,
}

impl Default for AttachOptions {
    fn default() -> Self {
        Self {
            ue_library: DEFAULT_UE_LIBRARY.to_string(),
            emulator: None,
        }
    }
}

/// One attach session: the reader, a snapshot of its maps and everything derived from them once.
pub struct AttachedTarget {
    reader: Arc<dyn MemoryReader>,
    regions: Vec<MemoryRegion>,
    scan_regions: Vec<MemoryRegion>,
    header: Option<ExecutableHeader>,
    ue_base: Option<Address>,
    emulator: bool,
    scanner: PatternScanner,
}

impl AttachedTarget {
    pub fn new(
        reader: Arc<dyn MemoryReader>,
        options: &AttachOptions,
    ) -> Result<Self, MemoryError> {
        let regions = reader.regions()?;

        let ue_regions: Vec<MemoryRegion> = regions
            .iter()
            .filter(|r| r.file_name() == Some(options.ue_library.as_str()))
            .cloned()
            .collect();

        let ue_base = ue_regions
            .iter()
            .find(|r| r.offset() == 0)
            .or_else(|| ue_regions.first())
            .map(|r| r.start());

        let header = match ue_base {
            Some(base) => read_header(reader.as_ref(), base),
            None => {
                warn!("{} is not mapped, scanning every region", options.ue_library);
                None
            }
        };

        let emulator = options.emulator.unwrap_or_else(|| detect_translator(&regions));

        let scan_regions = if ue_regions.is_empty() { regions.clone() } else { ue_regions };

        if let Some(base) = ue_base {
            info!("{} base {}", options.ue_library, base);
        }
        debug!(
            "{} regions, {} scannable, emulator={}",
            regions.len(),
            scan_regions.len(),
            emulator
        );

        Ok(Self {
            reader,
            regions,
            scan_regions,
            header,
            ue_base,
            emulator,
            scanner: PatternScanner::new(),
        })
    }

    pub fn attach_pid(pid: i32, options: &AttachOptions) -> Result<Self, MemoryError> {
        let process = ProcessMemory::attach(pid)?;
        Self::new(Arc::new(process), options)
    }

    pub fn attach_package(package: &str, options: &AttachOptions) -> Result<Self, MemoryError> {
        let process = ProcessMemory::attach_by_name(package)?;
        Self::new(Arc::new(process), options)
    }

    /// Opens a UE library pulled off a device. The image's own file name is used to find it,
    /// whatever `options.ue_library` says.
    pub fn open_image(
        path: &Path,
        load_bias: u64,
        options: &AttachOptions,
    ) -> Result<Self, MemoryError> {
        let image = ImageMemory::load(path, load_bias)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| options.ue_library.clone());
        let options = AttachOptions {
            ue_library: name,
            emulator: options.emulator,
        };
        Self::new(Arc::new(image), &options)
    }

    pub fn reader(&self) -> &Arc<dyn MemoryReader> {
        &self.reader
    }

    pub fn regions(&self) -> &[MemoryRegion] {
        &self.regions
    }

    pub fn ue_base(&self) -> Option<Address> {
        self.ue_base
    }
}

impl Target for AttachedTarget {
    fn executable_header(&self) -> Option<ExecutableHeader> {
        self.header
    }

    fn is_emulator(&self) -> bool {
        self.emulator
    }

    fn find_pattern(&self, selector: MapSelector, pattern: &Pattern, step: i64) -> Address {
        match self
            .scanner
            .scan_first(self.reader.as_ref(), pattern, &self.scan_regions, selector)
        {
            Some(hit) => {
                debug!("{} hit at {}", pattern, hit);
                hit.offset(step)
            }
            None => Address::zero(),
        }
    }

    fn read_mem(&self, addr: Address, buf: &mut [u8]) {
        if self.reader.read_into(addr, buf).is_err() {
            buf.fill(0);
        }
    }
}

fn read_header(reader: &dyn MemoryReader, base: Address) -> Option<ExecutableHeader> {
    let bytes = match reader.read_bytes(base, HEADER_READ_SIZE) {
        Ok(b) => b,
        Err(e) => {
            warn!("cannot read ELF header at {}: {}", base, e);
            return None;
        }
    };

    match ExecutableHeader::parse(&bytes) {
        Ok(header) => Some(header),
        Err(e) => {
            warn!("{}", e);
            None
        }
    }
}

pub fn detect_translator(regions: &[MemoryRegion]) -> bool {
    regions
        .iter()
        .filter_map(|r| r.file_name())
        .any(|name| TRANSLATOR_LIBRARIES.contains(&name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryRange, Protection};

    #[test]
    fn test_detect_translator() {
        let range = |start| MemoryRange::from_start_size(Address::new(start), 0x1000);
        let plain = MemoryRegion::new(range(0x1000), Protection::Read)
            .with_path("/system/lib64/libc.so");
        let houdini = MemoryRegion::new(range(0x2000), Protection::ReadExecute)
            .with_path("/system/lib64/libhoudini.so");

        assert!(!detect_translator(&[plain.clone()]));
        assert!(detect_translator(&[plain, houdini]));
    }
}

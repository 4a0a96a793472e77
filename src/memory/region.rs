// Tue Jan 13 2026 - Alex

use crate::memory::{Address, MemoryRange, Protection};
use std::fmt;

/// One line of the target's memory map.
#[derive(Debug, Clone)]
pub struct MemoryRegion {
    range: MemoryRange,
    protection: Protection,
    offset: u64,
    path: Option<String>,
}

impl MemoryRegion {
    pub fn new(range: MemoryRange, protection: Protection) -> Self {
        Self {
            range,
            protection,
            offset: 0,
            path: None,
        }
    }

    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn range(&self) -> &MemoryRange {
        &self.range
    }

    pub fn protection(&self) -> Protection {
        self.protection
    }

    /// File offset of the mapping, as reported by the kernel.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// File name component of the backing path, if any.
    pub fn file_name(&self) -> Option<&str> {
        self.path().map(|p| p.rsplit('/').next().unwrap_or(p))
    }

    pub fn start(&self) -> Address {
        self.range.start()
    }

    pub fn end(&self) -> Address {
        self.range.end()
    }

    pub fn size(&self) -> u64 {
        self.range.size()
    }

    pub fn contains(&self, addr: Address) -> bool {
        self.range.contains(addr)
    }

    pub fn is_readable(&self) -> bool {
        self.protection.can_read()
    }

    pub fn is_executable(&self) -> bool {
        self.protection.can_execute()
    }
}

impl fmt::Display for MemoryRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {:08x} {}",
            self.range,
            self.protection,
            self.offset,
            self.path().unwrap_or("")
        )
    }
}

// Tue Jan 13 2026 - Alex

use crate::memory::MemoryRegion;
use serde::Serialize;
use std::fmt;

/// Which mappings a signature scan is allowed to look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MapSelector {
    AnyReadable,
    AnyExecutable,
}

impl MapSelector {
    /// Translated (emulated) targets often keep guest code in pages that are readable but not
    /// executable from the host kernel's point of view.
    pub fn for_environment(emulator: bool) -> Self {
        if emulator {
            Self::AnyReadable
        } else {
            Self::AnyExecutable
        }
    }

    pub fn matches(&self, region: &MemoryRegion) -> bool {
        match self {
            Self::AnyReadable => region.is_readable(),
            Self::AnyExecutable => region.is_executable(),
        }
    }
}

impl fmt::Display for MapSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AnyReadable => write!(f, "any-r"),
            Self::AnyExecutable => write!(f, "any-x"),
        }
    }
}

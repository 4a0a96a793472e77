// Tue Jan 13 2026 - Alex

use crate::memory::MemoryError;
use goblin::elf::header;
use goblin::elf::Elf;
use serde::Serialize;

/// Bytes needed to parse either ELF header class.
pub const HEADER_READ_SIZE: usize = header::header64::SIZEOF_EHDR;

/// The parts of the UE library's ELF header a profile is allowed to look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExecutableHeader {
    pub machine: u16,
    pub is_64: bool,
}

impl ExecutableHeader {
    pub fn new(machine: u16, is_64: bool) -> Self {
        Self { machine, is_64 }
    }

    pub fn parse(bytes: &[u8]) -> Result<Self, MemoryError> {
        let parsed = Elf::parse_header(bytes)
            .map_err(|e| {
                MemoryError::BinaryParseError(format!("Failed to parse ELF header: {}", e))
            })?;

        Ok(Self {
            machine: parsed.e_machine,
            is_64: parsed.e_ident[header::EI_CLASS] == header::ELFCLASS64,
        })
    }
}

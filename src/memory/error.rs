// Tue Jan 13 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MemoryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Read failed at address 0x{0:x}")]
    ReadFailed(u64),
    #[error("Short read at address 0x{addr:x}: wanted {wanted} bytes, got {got}")]
    ShortRead { addr: u64, wanted: usize, got: usize },
    #[error("Process not found: {0}")]
    ProcessNotFound(String),
    #[error("Binary parse error: {0}")]
    BinaryParseError(String),
    #[error("Malformed maps line: {0}")]
    MalformedMapsLine(String),
}

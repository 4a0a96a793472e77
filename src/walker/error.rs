// Tue Jan 13 2026 - Alex

use crate::memory::MemoryError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WalkError {
    #[error(transparent)]
    Memory(#[from] MemoryError),
    #[error("object index {index} out of range (array holds {len})")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("null {0} pointer")]
    NullPointer(&'static str),
    #[error("name entry 0x{index:x} has invalid length {length}")]
    InvalidName { index: u32, length: usize },
}

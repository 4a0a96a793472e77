// Tue Jan 13 2026 - Alex

pub mod address;
pub mod error;
pub mod image;
pub mod process;
pub mod protection;
pub mod range;
pub mod region;
pub mod traits;

#[cfg(test)]
pub mod testing;

pub use address::{Address, PAGE_SIZE};
pub use error::MemoryError;
pub use image::ImageMemory;
pub use process::ProcessMemory;
pub use protection::Protection;
pub use range::MemoryRange;
pub use region::MemoryRegion;
pub use traits::MemoryReader;

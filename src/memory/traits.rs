// Wed Jan 15 2026 - Alex

use crate::memory::{Address, MemoryError, MemoryRegion};

/// Read-only view of a target address space.
///
/// Implementors only provide `read_into` and `regions`; the typed helpers decode little-endian
/// values on top of it, which matches every arm64 Android target.
pub trait MemoryReader: Send + Sync {
    fn read_into(&self, addr: Address, buf: &mut [u8]) -> Result<(), MemoryError>;

    fn regions(&self) -> Result<Vec<MemoryRegion>, MemoryError>;

    fn read_bytes(&self, addr: Address, len: usize) -> Result<Vec<u8>, MemoryError> {
        let mut buf = vec![0u8; len];
        self.read_into(addr, &mut buf)?;
        Ok(buf)
    }

    fn read_u16(&self, addr: Address) -> Result<u16, MemoryError> {
        let mut buf = [0u8; 2];
        self.read_into(addr, &mut buf)?;
        Ok(u16::from_le_bytes(buf))
    }

    fn read_u32(&self, addr: Address) -> Result<u32, MemoryError> {
        let mut buf = [0u8; 4];
        self.read_into(addr, &mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }

    fn read_i32(&self, addr: Address) -> Result<i32, MemoryError> {
        Ok(self.read_u32(addr)? as i32)
    }

    fn read_u64(&self, addr: Address) -> Result<u64, MemoryError> {
        let mut buf = [0u8; 8];
        self.read_into(addr, &mut buf)?;
        Ok(u64::from_le_bytes(buf))
    }

    fn read_ptr(&self, addr: Address) -> Result<Address, MemoryError> {
        Ok(Address::new(self.read_u64(addr)?))
    }
}

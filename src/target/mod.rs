// Tue Jan 13 2026 - Alex

pub mod attached;
pub mod header;

pub use attached::{AttachOptions, AttachedTarget, DEFAULT_UE_LIBRARY};
pub use header::ExecutableHeader;

use crate::memory::Address;
use crate::pattern::{MapSelector, Pattern};

/// What a game profile may ask of the attached process.
///
/// Every call is best-effort and infallible from the profile's side: a missing header is `None`,
/// a pattern miss is a zero address and a failed read leaves the buffer zeroed.
pub trait Target: Send + Sync {
    fn executable_header(&self) -> Option<ExecutableHeader>;

    fn is_emulator(&self) -> bool;

    /// First hit of `pattern` in the mappings picked by `selector`, moved by `step` bytes.
    /// Zero when nothing matched.
    fn find_pattern(&self, selector: MapSelector, pattern: &Pattern, step: i64) -> Address;

    fn read_mem(&self, addr: Address, buf: &mut [u8]);

    fn read_u32(&self, addr: Address) -> u32 {
        let mut buf = [0u8; 4];
        self.read_mem(addr, &mut buf);
        u32::from_le_bytes(buf)
    }
}

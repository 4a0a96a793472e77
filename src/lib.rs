// Tue Jan 15 2026 - Alex

pub mod config;
pub mod memory;
pub mod output;
pub mod pattern;
pub mod profile;
pub mod target;
pub mod utils;
pub mod walker;

pub use config::Config;
pub use memory::{Address, MemoryReader};
pub use output::DumpReport;
pub use pattern::{MapSelector, Pattern, PatternScanner};
pub use profile::{GameProfile, ProfileRegistry, UEOffsets};
pub use target::{AttachedTarget, Target};

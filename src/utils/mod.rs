// Tue Jan 13 2026 - Alex

pub mod arm64;
pub mod logging;

pub use logging::LoggingUtils;

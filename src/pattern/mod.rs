// Tue Jan 13 2026 - Alex

pub mod error;
pub mod pattern;
pub mod scanner;
pub mod selector;

pub use error::PatternError;
pub use pattern::Pattern;
pub use scanner::PatternScanner;
pub use selector::MapSelector;

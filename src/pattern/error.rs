// Tue Jan 13 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PatternError {
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),
    #[error("Pattern too short: {0} bytes")]
    PatternTooShort(usize),
    #[error("Invalid pattern token: {0}")]
    InvalidWildcard(String),
}

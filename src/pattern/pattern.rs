// Tue Jan 13 2026 - Alex

use crate::pattern::error::PatternError;
use std::fmt;
use std::str::FromStr;

/// A byte signature with per-byte wildcards.
#[derive(Debug, Clone)]
pub struct Pattern {
    bytes: Vec<u8>,
    mask: Vec<bool>,
    name: Option<String>,
}

impl Pattern {
    pub fn new(bytes: Vec<u8>, mask: Vec<bool>) -> Result<Self, PatternError> {
        if bytes.len() != mask.len() {
            return Err(PatternError::InvalidPattern(format!(
                "{} bytes but {} mask entries",
                bytes.len(),
                mask.len()
            )));
        }
        if bytes.is_empty() {
            return Err(PatternError::PatternTooShort(0));
        }
        Ok(Self { bytes, mask, name: None })
    }

    /// Parses an IDA-style signature: space separated hex bytes, `?` or `??` for any byte.
    pub fn from_ida_pattern(pattern: &str) -> Result<Self, PatternError> {
        let mut bytes = Vec::new();
        let mut mask = Vec::new();

        for token in pattern.split_whitespace() {
            if token == "?" || token == "??" {
                bytes.push(0);
                mask.push(false);
                continue;
            }

            if token.len() > 2 || !token.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(PatternError::InvalidWildcard(token.to_string()));
            }

            let byte = u8::from_str_radix(token, 16)
                .map_err(|_| PatternError::InvalidWildcard(token.to_string()))?;
            bytes.push(byte);
            mask.push(true);
        }

        Self::new(bytes, mask)
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mask(&self) -> &[bool] {
        &self.mask
    }

    pub fn matches(&self, data: &[u8]) -> bool {
        if data.len() < self.bytes.len() {
            return false;
        }

        self.bytes.iter()
            .zip(self.mask.iter())
            .zip(data.iter())
            .all(|((pattern_byte, &significant), &data_byte)| {
                !significant || *pattern_byte == data_byte
            })
    }

    /// Offset of the first match in `data`, scanning front to back.
    pub fn find_in(&self, data: &[u8]) -> Option<usize> {
        if self.bytes.is_empty() || data.len() < self.bytes.len() {
            return None;
        }

        let anchor = self.mask.iter().position(|&m| m);

        (0..=(data.len() - self.bytes.len())).find(|&i| match anchor {
            Some(pos) => data[i + pos] == self.bytes[pos] && self.matches(&data[i..]),
            None => true,
        })
    }

    pub fn significant_byte_count(&self) -> usize {
        self.mask.iter().filter(|&&m| m).count()
    }

    pub fn to_hex_string(&self) -> String {
        self.bytes.iter()
            .zip(self.mask.iter())
            .map(|(b, &m)| if m { format!("{:02X}", b) } else { "??".to_string() })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl FromStr for Pattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_ida_pattern(s)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref name) = self.name {
            write!(f, "{}: ", name)?;
        }
        write!(f, "{}", self.to_hex_string())
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes && self.mask == other.mask
    }
}

impl Eq for Pattern {}

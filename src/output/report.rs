// Tue Jan 13 2026 - Alex

use crate::memory::Address;
use crate::profile::{GameProfile, UEOffsets};
use crate::walker::ObjectSummary;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Anchors {
    #[serde(rename = "GUObjectArray")]
    pub guobject_array: Address,
    #[serde(rename = "NamePoolData")]
    pub name_pool_data: Address,
}

impl Anchors {
    pub fn all_resolved(&self) -> bool {
        !self.guobject_array.is_null() && !self.name_pool_data.is_null()
    }
}

/// Everything one run learned about the target.
#[derive(Serialize)]
pub struct DumpReport {
    pub version: &'static str,
    pub profile: &'static str,
    pub package: Option<String>,
    pub arch_supported: bool,
    pub emulator: bool,
    pub ue_base: Option<Address>,
    pub anchors: Anchors,
    pub uses_name_pool: bool,
    pub uses_outline_numbers: bool,
    pub offsets: &'static UEOffsets,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub objects: Vec<ObjectSummary>,
}

impl DumpReport {
    pub fn new(profile: &'static GameProfile, anchors: Anchors) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            profile: profile.app_name(),
            package: None,
            arch_supported: false,
            emulator: false,
            ue_base: None,
            anchors,
            uses_name_pool: profile.uses_name_pool(),
            uses_outline_numbers: profile.uses_outline_numbers(),
            offsets: profile.offsets(),
            objects: Vec::new(),
        }
    }

    pub fn to_json(&self, pretty: bool) -> Result<String, OutputError> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    pub fn write_to_file<P: AsRef<Path>>(&self, path: P, pretty: bool) -> Result<(), OutputError> {
        let json = self.to_json(pretty)?;
        let mut writer = BufWriter::new(File::create(path.as_ref())?);
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}

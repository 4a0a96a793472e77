// Tue Jan 13 2026 - Alex

use crate::target::{AttachOptions, DEFAULT_UE_LIBRARY};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Android package id, also used to pick the profile.
    pub package: Option<String>,
    pub pid: Option<i32>,
    /// Pulled shared object to scan instead of a live process.
    pub image: Option<PathBuf>,
    pub load_bias: u64,
    pub ue_library: String,
    /// Forces the emulator flag; detected from the target's maps when unset.
    pub emulator: Option<bool>,
    pub output_file: Option<PathBuf>,
    pub verbosity: usize,
    pub pretty: bool,
    /// Objects to name after resolving, zero to skip the walk.
    pub sample: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            package: None,
            pid: None,
            image: None,
            load_bias: 0,
            ue_library: DEFAULT_UE_LIBRARY.to_string(),
            emulator: None,
            output_file: None,
            verbosity: 0,
            pretty: true,
            sample: 0,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn with_package(mut self, package: String) -> Self {
        self.package = Some(package);
        self
    }

    pub fn with_pid(mut self, pid: i32) -> Self {
        self.pid = Some(pid);
        self
    }

    pub fn with_image(mut self, image: PathBuf) -> Self {
        self.image = Some(image);
        self
    }

    pub fn with_output_file(mut self, output: PathBuf) -> Self {
        self.output_file = Some(output);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.package.is_none() && self.pid.is_none() && self.image.is_none() {
            return Err(ConfigError::Invalid(
                "one of package, pid or image must be set".to_string(),
            ));
        }
        if matches!(self.pid, Some(pid) if pid <= 0) {
            return Err(ConfigError::Invalid("pid must be positive".to_string()));
        }
        if self.ue_library.is_empty() {
            return Err(ConfigError::Invalid("ue_library must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn attach_options(&self) -> AttachOptions {
        AttachOptions {
            ue_library: self.ue_library.clone(),
            emulator: self.emulator,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::new();
        assert_eq!(config.ue_library, "libUE4.so");
        assert!(config.emulator.is_none());
        assert!(config.pretty);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate() {
        assert!(Config::new().with_package("com.proximabeta.mf.uamo".into()).validate().is_ok());
        assert!(Config::new().with_pid(1234).validate().is_ok());
        assert!(Config::new().with_image("libUE4.so".into()).validate().is_ok());
        assert!(Config::new().with_pid(0).validate().is_err());

        let mut config = Config::new().with_pid(1);
        config.ue_library.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let json = r#"{ "package": "com.proximabeta.mf.uamo", "emulator": true }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.package.as_deref(), Some("com.proximabeta.mf.uamo"));
        assert_eq!(config.emulator, Some(true));
        assert_eq!(config.ue_library, "libUE4.so");

        let options = config.attach_options();
        assert_eq!(options.emulator, Some(true));
        assert_eq!(options.ue_library, "libUE4.so");
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/ue-profile-dumper.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_load_from_disk() {
        let path = std::env::temp_dir()
            .join(format!("ue-profile-dumper-{}.json", std::process::id()));
        fs::write(&path, r#"{ "pid": 4321, "sample": 8 }"#).unwrap();
        let config = Config::load(&path).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(config.pid, Some(4321));
        assert_eq!(config.sample, 8);
    }
}

// Tue Jan 13 2026 - Alex

use crate::profile::{arena_breakout, GameProfile};
use indexmap::IndexMap;
use log::error;
use once_cell::sync::Lazy;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("app id {app_id} is already claimed by {existing}")]
    DuplicateAppId { app_id: String, existing: String },
    #[error("profile {0} lists no app ids")]
    NoAppIds(String),
}

static BUILTIN: Lazy<ProfileRegistry> = Lazy::new(|| {
    let mut registry = ProfileRegistry::new();
    for profile in [&arena_breakout::PROFILE] {
        if let Err(e) = registry.register(profile) {
            error!("skipping built-in profile {}: {}", profile.app_name(), e);
        }
    }
    registry
});

/// Profiles keyed by package id, in registration order.
#[derive(Default)]
pub struct ProfileRegistry {
    profiles: Vec<&'static GameProfile>,
    by_app_id: IndexMap<&'static str, usize>,
}

impl ProfileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builtin() -> &'static ProfileRegistry {
        &BUILTIN
    }

    pub fn register(&mut self, profile: &'static GameProfile) -> Result<(), RegistryError> {
        if profile.app_ids().is_empty() {
            return Err(RegistryError::NoAppIds(profile.app_name().to_string()));
        }

        for app_id in profile.app_ids() {
            if let Some(&idx) = self.by_app_id.get(app_id) {
                return Err(RegistryError::DuplicateAppId {
                    app_id: app_id.to_string(),
                    existing: self.profiles[idx].app_name().to_string(),
                });
            }
        }

        let idx = self.profiles.len();
        self.profiles.push(profile);
        for app_id in profile.app_ids() {
            self.by_app_id.insert(*app_id, idx);
        }
        Ok(())
    }

    pub fn find_by_app_id(&self, app_id: &str) -> Option<&'static GameProfile> {
        self.by_app_id.get(app_id).map(|&idx| self.profiles[idx])
    }

    pub fn profiles(&self) -> impl Iterator<Item = &'static GameProfile> + '_ {
        self.profiles.iter().copied()
    }

    pub fn app_ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.by_app_id.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::profile::{arm64_only, AnchorSignature};

    const SIGNATURE: AnchorSignature = AnchorSignature {
        label: "Test",
        pattern: "AA BB",
        step: 0,
    };

    static COPY: GameProfile = GameProfile {
        name: "Copy",
        app_ids: &["com.other.title", "com.proximabeta.mf.uamo"],
        arch_gate: arm64_only,
        uses_name_pool: true,
        uses_outline_numbers: false,
        guobject_array: SIGNATURE,
        name_pool: SIGNATURE,
        offsets: &arena_breakout::OFFSETS,
    };

    static NO_IDS: GameProfile = GameProfile {
        name: "Nothing",
        app_ids: &[],
        arch_gate: arm64_only,
        uses_name_pool: true,
        uses_outline_numbers: false,
        guobject_array: SIGNATURE,
        name_pool: SIGNATURE,
        offsets: &arena_breakout::OFFSETS,
    };

    #[test]
    fn test_builtin_lookup() {
        let registry = ProfileRegistry::builtin();
        assert_eq!(registry.len(), 1);
        let profile = registry.find_by_app_id("com.proximabeta.mf.uamo").unwrap();
        assert_eq!(profile.app_name(), "Arena Breakout");
        assert!(registry.find_by_app_id("com.example.other").is_none());
        assert_eq!(registry.app_ids().collect::<Vec<_>>(), vec!["com.proximabeta.mf.uamo"]);
    }

    #[test]
    fn test_duplicate_app_id_rejected() {
        let mut registry = ProfileRegistry::new();
        registry.register(&arena_breakout::PROFILE).unwrap();
        let err = registry.register(&COPY).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateAppId { .. }));
        assert_eq!(registry.len(), 1);
        // nothing from the rejected profile leaks in
        assert!(registry.find_by_app_id("com.other.title").is_none());
    }

    #[test]
    fn test_empty_app_ids_rejected() {
        let mut registry = ProfileRegistry::new();
        assert!(matches!(registry.register(&NO_IDS), Err(RegistryError::NoAppIds(_))));
        assert!(registry.is_empty());
    }
}

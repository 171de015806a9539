//! Settings persistence
//!
//! Each preference is stored as a single byte under its protocol id.
//! Reads never fail: anything missing or unreadable falls back to the
//! caller's default.

use dotclock_hal::{SettingsStorage, StorageError, StorageKey};
use dotclock_protocol::{SettingKey, SettingsPatch};

use crate::config::Settings;

/// Loads and saves the six boolean preferences
#[derive(Debug)]
pub struct SettingsStore<S> {
    storage: S,
}

impl<S: SettingsStorage> SettingsStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Persisted value for `key`, or `default` if there is none
    pub fn load(&mut self, key: SettingKey, default: bool) -> bool {
        let mut buffer = [0u8; 1];
        match self.storage.read(StorageKey(key.id()), &mut buffer) {
            Ok(1) => buffer[0] != 0,
            Ok(len) => {
                warn!("setting {} has unexpected length {}", key.name(), len);
                default
            }
            Err(StorageError::NotFound) => default,
            Err(e) => {
                warn!("setting {} unreadable: {:?}", key.name(), e);
                default
            }
        }
    }

    /// Persist one value
    pub fn save(&mut self, key: SettingKey, value: bool) -> Result<(), StorageError> {
        self.storage
            .write(StorageKey(key.id()), &[u8::from(value)])
            .inspect_err(|e| warn!("failed to save setting {}: {:?}", key.name(), e))
    }

    /// Load every preference, using the key defaults for missing ones
    pub fn load_all(&mut self) -> Settings {
        let mut settings = Settings::default();
        for key in SettingKey::ALL {
            settings.set(key, self.load(key, key.default_value()));
        }
        settings
    }

    /// Persist every key a patch carries
    ///
    /// All keys are attempted; the last failure, if any, is returned.
    pub fn save_patch(&mut self, patch: &SettingsPatch) -> Result<(), StorageError> {
        let mut result = Ok(());
        for (key, value) in patch.iter() {
            if let Err(e) = self.save(key, value) {
                result = Err(e);
            }
        }
        result
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn into_inner(self) -> S {
        self.storage
    }
}

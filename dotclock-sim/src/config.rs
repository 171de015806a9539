//! Simulator configuration
//!
//! Read from a TOML file. Every table and key is optional; a missing
//! file means the reference layout, a companion that answers with canned
//! weather, and one simulated hour starting now.
//!
//! ```toml
//! [layout]
//! side_padding = 12
//!
//! [companion]
//! enabled = true
//! temperature = 14
//! conditions = "Overcast"
//!
//! [companion.push]
//! at = 30
//! invert_colours = true
//!
//! [clock]
//! use_24h = false
//! minutes = 90
//! start = "2024-10-16 09:55"
//!
//! [settings]
//! hourly_vibrate = true
//! ```

use std::path::Path;

use chrono::NaiveDateTime;
use dotclock_core::{LayoutConfig, LayoutError, Settings};
use dotclock_protocol::{SettingKey, SettingsPatch};
use serde::Deserialize;
use thiserror::Error;

/// Format of `clock.start`
pub const START_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid start time {0:?}, expected YYYY-MM-DD HH:MM")]
    StartTime(String),

    #[error("invalid layout: {0:?}")]
    Layout(LayoutError),
}

/// Canned companion behaviour
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CompanionConfig {
    /// Companion connected at start
    pub enabled: bool,
    /// Temperature sent with every weather response
    pub temperature: Option<i32>,
    /// Conditions sent with every weather response
    pub conditions: Option<String>,
    /// Minute at which the companion drops off, if any
    pub disconnect_after: Option<u32>,
    /// Settings change pushed from the phone during the run
    pub push: Option<PushConfig>,
}

/// One scripted settings push
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PushConfig {
    /// Minute of the run at which the push arrives
    pub at: u32,
    pub battery_percentage_visible: Option<bool>,
    pub show_date: Option<bool>,
    pub show_weather: Option<bool>,
    pub invert_colours: Option<bool>,
    pub bluetooth_vibrate: Option<bool>,
    pub hourly_vibrate: Option<bool>,
}

impl PushConfig {
    /// The keys this push carries
    pub fn patch(&self) -> SettingsPatch {
        let values = [
            (SettingKey::BatteryPercentageVisible, self.battery_percentage_visible),
            (SettingKey::ShowDate, self.show_date),
            (SettingKey::ShowWeather, self.show_weather),
            (SettingKey::InvertColours, self.invert_colours),
            (SettingKey::BluetoothVibrate, self.bluetooth_vibrate),
            (SettingKey::HourlyVibrate, self.hourly_vibrate),
        ];
        let mut patch = SettingsPatch::new();
        for (key, value) in values {
            if let Some(value) = value {
                patch.set(key, value);
            }
        }
        patch
    }
}

impl Default for CompanionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            temperature: Some(14),
            conditions: Some("Overcast".to_string()),
            disconnect_after: None,
            push: None,
        }
    }
}

/// Simulated clock
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    pub use_24h: bool,
    /// Minutes to simulate after the first frame
    pub minutes: u32,
    /// Start time, local time now if unset
    pub start: Option<String>,
    /// Real time between simulated minutes
    pub tick_ms: u64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            use_24h: false,
            minutes: 60,
            start: None,
            tick_ms: 0,
        }
    }
}

impl ClockConfig {
    /// Parsed start time, `None` when unset
    pub fn start_time(&self) -> Result<Option<NaiveDateTime>, ConfigError> {
        self.start
            .as_deref()
            .map(|s| {
                NaiveDateTime::parse_from_str(s, START_FORMAT)
                    .map_err(|_| ConfigError::StartTime(s.to_string()))
            })
            .transpose()
    }
}

/// Whole simulator configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub layout: LayoutConfig,
    pub companion: CompanionConfig,
    pub clock: ClockConfig,
    /// Values already in storage when the watchface starts
    pub settings: Option<Settings>,
}

impl SimConfig {
    /// Parse and validate a TOML document
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = toml::from_str(text)?;
        config.layout.validate().map_err(ConfigError::Layout)?;
        config.clock.start_time()?;
        Ok(config)
    }

    /// Load from `path`; a missing file gives the defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::parse(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("{} not found, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }
}

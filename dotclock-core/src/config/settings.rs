//! User settings
//!
//! Six independent preferences. They are persisted one key at a time and
//! can be changed from the companion's settings page.

use dotclock_protocol::{SettingKey, SettingsPatch};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// User preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Settings {
    /// Show battery text
    pub battery_percentage_visible: bool,
    /// Show date text
    pub show_date: bool,
    /// Show weather text
    pub show_weather: bool,
    /// Black on white instead of white on black
    pub invert_colours: bool,
    /// Double pulse when the companion connects or disconnects
    pub bluetooth_vibrate: bool,
    /// Short pulse on the hour
    pub hourly_vibrate: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            battery_percentage_visible: SettingKey::BatteryPercentageVisible.default_value(),
            show_date: SettingKey::ShowDate.default_value(),
            show_weather: SettingKey::ShowWeather.default_value(),
            invert_colours: SettingKey::InvertColours.default_value(),
            bluetooth_vibrate: SettingKey::BluetoothVibrate.default_value(),
            hourly_vibrate: SettingKey::HourlyVibrate.default_value(),
        }
    }
}

impl Settings {
    /// Read one preference
    pub fn get(&self, key: SettingKey) -> bool {
        match key {
            SettingKey::BatteryPercentageVisible => self.battery_percentage_visible,
            SettingKey::ShowDate => self.show_date,
            SettingKey::ShowWeather => self.show_weather,
            SettingKey::InvertColours => self.invert_colours,
            SettingKey::BluetoothVibrate => self.bluetooth_vibrate,
            SettingKey::HourlyVibrate => self.hourly_vibrate,
        }
    }

    /// Change one preference
    pub fn set(&mut self, key: SettingKey, value: bool) {
        let slot = match key {
            SettingKey::BatteryPercentageVisible => &mut self.battery_percentage_visible,
            SettingKey::ShowDate => &mut self.show_date,
            SettingKey::ShowWeather => &mut self.show_weather,
            SettingKey::InvertColours => &mut self.invert_colours,
            SettingKey::BluetoothVibrate => &mut self.bluetooth_vibrate,
            SettingKey::HourlyVibrate => &mut self.hourly_vibrate,
        };
        *slot = value;
    }

    /// Apply the keys a patch carries, leaving the rest untouched
    ///
    /// Returns true if any value changed.
    pub fn apply(&mut self, patch: &SettingsPatch) -> bool {
        let mut changed = false;
        for (key, value) in patch.iter() {
            changed |= self.get(key) != value;
            self.set(key, value);
        }
        changed
    }

    /// Both date and weather text are hidden
    ///
    /// The grid is shifted down to stay centred in that case.
    pub fn text_hidden(&self) -> bool {
        !self.show_date && !self.show_weather
    }
}

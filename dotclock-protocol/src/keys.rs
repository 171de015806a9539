//! Message keys shared by the watch and the companion
//!
//! Settings keys double as persistent storage keys, so a preference is
//! identified by the same number on the wire and in flash.

/// Outbound request tuple key ("refresh weather now")
pub const KEY_REQUEST: u32 = 0;
/// Temperature in degrees Celsius (signed integer)
pub const KEY_TEMPERATURE: u32 = 1;
/// Weather conditions (C string)
pub const KEY_CONDITIONS: u32 = 2;

// Settings keys
const KEY_BATTERY_PERCENTAGE: u32 = 3;
const KEY_SHOW_DATE: u32 = 4;
const KEY_SHOW_WEATHER: u32 = 5;
const KEY_INVERT_COLOURS: u32 = 6;
const KEY_BLUETOOTH_VIBRATE: u32 = 7;
const KEY_HOURLY_VIBRATE: u32 = 8;

/// Number of user settings
pub const SETTING_COUNT: usize = 6;

/// User preference identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingKey {
    /// Show battery text
    BatteryPercentageVisible,
    /// Show date text
    ShowDate,
    /// Show weather text
    ShowWeather,
    /// Swap foreground and background colours
    InvertColours,
    /// Vibrate when the companion connects or disconnects
    BluetoothVibrate,
    /// Vibrate on the hour
    HourlyVibrate,
}

impl SettingKey {
    /// All keys, in storage order
    pub const ALL: [SettingKey; SETTING_COUNT] = [
        SettingKey::BatteryPercentageVisible,
        SettingKey::ShowDate,
        SettingKey::ShowWeather,
        SettingKey::InvertColours,
        SettingKey::BluetoothVibrate,
        SettingKey::HourlyVibrate,
    ];

    /// Parse a key from its wire id
    pub fn from_id(id: u32) -> Option<Self> {
        match id {
            KEY_BATTERY_PERCENTAGE => Some(SettingKey::BatteryPercentageVisible),
            KEY_SHOW_DATE => Some(SettingKey::ShowDate),
            KEY_SHOW_WEATHER => Some(SettingKey::ShowWeather),
            KEY_INVERT_COLOURS => Some(SettingKey::InvertColours),
            KEY_BLUETOOTH_VIBRATE => Some(SettingKey::BluetoothVibrate),
            KEY_HOURLY_VIBRATE => Some(SettingKey::HourlyVibrate),
            _ => None,
        }
    }

    /// Wire and storage id
    pub const fn id(self) -> u32 {
        match self {
            SettingKey::BatteryPercentageVisible => KEY_BATTERY_PERCENTAGE,
            SettingKey::ShowDate => KEY_SHOW_DATE,
            SettingKey::ShowWeather => KEY_SHOW_WEATHER,
            SettingKey::InvertColours => KEY_INVERT_COLOURS,
            SettingKey::BluetoothVibrate => KEY_BLUETOOTH_VIBRATE,
            SettingKey::HourlyVibrate => KEY_HOURLY_VIBRATE,
        }
    }

    /// Stable snake_case name
    pub const fn name(self) -> &'static str {
        match self {
            SettingKey::BatteryPercentageVisible => "battery_percentage_visible",
            SettingKey::ShowDate => "show_date",
            SettingKey::ShowWeather => "show_weather",
            SettingKey::InvertColours => "invert_colours",
            SettingKey::BluetoothVibrate => "bluetooth_vibrate",
            SettingKey::HourlyVibrate => "hourly_vibrate",
        }
    }

    /// Value used when nothing has been persisted
    pub const fn default_value(self) -> bool {
        match self {
            SettingKey::BatteryPercentageVisible
            | SettingKey::ShowDate
            | SettingKey::ShowWeather => true,
            SettingKey::InvertColours
            | SettingKey::BluetoothVibrate
            | SettingKey::HourlyVibrate => false,
        }
    }

    /// Position within [`SettingKey::ALL`]
    pub const fn index(self) -> usize {
        match self {
            SettingKey::BatteryPercentageVisible => 0,
            SettingKey::ShowDate => 1,
            SettingKey::ShowWeather => 2,
            SettingKey::InvertColours => 3,
            SettingKey::BluetoothVibrate => 4,
            SettingKey::HourlyVibrate => 5,
        }
    }
}

/// A subset of settings carried by one message
///
/// Keys that were not present stay `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SettingsPatch {
    values: [Option<bool>; SETTING_COUNT],
}

impl SettingsPatch {
    /// Empty patch
    pub const fn new() -> Self {
        Self {
            values: [None; SETTING_COUNT],
        }
    }

    /// Set one key
    pub fn set(&mut self, key: SettingKey, value: bool) {
        self.values[key.index()] = Some(value);
    }

    /// Builder form of [`SettingsPatch::set`]
    pub fn with(mut self, key: SettingKey, value: bool) -> Self {
        self.set(key, value);
        self
    }

    /// Value for one key, if the patch carries it
    pub fn get(&self, key: SettingKey) -> Option<bool> {
        self.values[key.index()]
    }

    /// Check if the patch carries no keys
    pub fn is_empty(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }

    /// Number of keys carried
    pub fn len(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    /// Iterate over the carried keys in storage order
    pub fn iter(&self) -> impl Iterator<Item = (SettingKey, bool)> + '_ {
        SettingKey::ALL
            .iter()
            .filter_map(move |&key| self.get(key).map(|value| (key, value)))
    }
}

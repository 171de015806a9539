//! Weather shown on the face

use dotclock_protocol::{Conditions, SyncResponse};

/// Last weather received from the companion
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WeatherReport {
    /// Degrees Celsius
    pub temperature: Option<i32>,
    pub conditions: Option<Conditions>,
}

/// Weather display state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WeatherState {
    /// Nothing received yet
    #[default]
    Loading,
    Report(WeatherReport),
}

impl WeatherState {
    /// Take the weather fields of a response
    ///
    /// Both fields are replaced together, so a field missing or unusable
    /// in the response clears any earlier value. A response without any
    /// weather key (a settings-only push) leaves the state alone. Returns true
    /// if the state was replaced.
    pub fn apply(&mut self, response: &SyncResponse) -> bool {
        if !response.has_weather() {
            return false;
        }
        *self = WeatherState::Report(WeatherReport {
            temperature: response.temperature,
            conditions: response.conditions.clone(),
        });
        true
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, WeatherState::Loading)
    }

    pub fn report(&self) -> Option<&WeatherReport> {
        match self {
            WeatherState::Loading => None,
            WeatherState::Report(report) => Some(report),
        }
    }
}

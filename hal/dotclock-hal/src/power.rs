//! Battery state reported by the platform power service

/// Battery charge state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatteryChargeState {
    /// Charge level in percent (0-100)
    pub charge_percent: u8,
    /// Battery is currently charging
    pub is_charging: bool,
    /// Charger is connected (may be full and no longer charging)
    pub is_plugged: bool,
}

impl BatteryChargeState {
    /// Create a discharging state at the given level
    ///
    /// Levels above 100 are clamped.
    pub const fn discharging(charge_percent: u8) -> Self {
        Self {
            charge_percent: if charge_percent > 100 { 100 } else { charge_percent },
            is_charging: false,
            is_plugged: false,
        }
    }

    /// Create a charging state at the given level
    pub const fn charging(charge_percent: u8) -> Self {
        Self {
            charge_percent: if charge_percent > 100 { 100 } else { charge_percent },
            is_charging: true,
            is_plugged: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_clamped() {
        assert_eq!(BatteryChargeState::discharging(150).charge_percent, 100);
        assert_eq!(BatteryChargeState::charging(101).charge_percent, 100);
    }

    #[test]
    fn test_charging_implies_plugged() {
        let state = BatteryChargeState::charging(40);
        assert!(state.is_charging);
        assert!(state.is_plugged);
    }
}

//! Events delivered to the watchface

use chrono::NaiveDateTime;
use dotclock_hal::BatteryChargeState;
use dotclock_protocol::SyncResponse;

/// Events that drive the watchface
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    // Lifecycle events
    /// First render done
    InitComplete,

    // Host service events
    /// Minute tick with the current local time
    Tick(NaiveDateTime),
    /// Battery level or charging state changed
    BatteryChange(BatteryChargeState),
    /// Companion connected (`true`) or disconnected
    BluetoothChange(bool),

    // Companion events
    /// Weather and/or settings arrived from the companion
    SyncResponse(SyncResponse),
}

#[cfg(feature = "defmt")]
impl defmt::Format for Event {
    fn format(&self, f: defmt::Formatter) {
        use chrono::Timelike;

        match self {
            Event::InitComplete => defmt::write!(f, "InitComplete"),
            Event::Tick(now) => {
                defmt::write!(f, "Tick({=u32}:{=u32})", now.hour(), now.minute())
            }
            Event::BatteryChange(state) => defmt::write!(f, "BatteryChange({})", state),
            Event::BluetoothChange(connected) => {
                defmt::write!(f, "BluetoothChange({})", connected)
            }
            Event::SyncResponse(response) => defmt::write!(f, "SyncResponse({})", response),
        }
    }
}

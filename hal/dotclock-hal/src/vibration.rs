//! Vibration motor abstraction

/// Vibration patterns the watchface uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum VibePattern {
    /// One short buzz (hourly chime)
    ShortPulse,
    /// Two short buzzes (connection change)
    DoublePulse,
}

/// Length of a short pulse in milliseconds
pub const SHORT_PULSE_MS: u32 = 200;

/// Gap between the buzzes of a double pulse in milliseconds
pub const PULSE_GAP_MS: u32 = 150;

impl VibePattern {
    /// Alternating on/off durations in milliseconds, starting with "on"
    pub const fn segments(self) -> &'static [u32] {
        match self {
            VibePattern::ShortPulse => &[SHORT_PULSE_MS],
            VibePattern::DoublePulse => &[SHORT_PULSE_MS, PULSE_GAP_MS, SHORT_PULSE_MS],
        }
    }

    /// Total time the pattern occupies in milliseconds
    pub fn duration_ms(self) -> u32 {
        self.segments().iter().sum()
    }
}

/// Vibration motor
///
/// `vibrate` starts the pattern and returns immediately; the
/// implementation is responsible for timing the segments.
pub trait Vibrator {
    /// Play a pattern
    fn vibrate(&mut self, pattern: VibePattern);

    /// Stop any pattern in progress
    fn cancel(&mut self) {}
}

impl<T: Vibrator + ?Sized> Vibrator for &mut T {
    fn vibrate(&mut self, pattern: VibePattern) {
        (**self).vibrate(pattern)
    }

    fn cancel(&mut self) {
        (**self).cancel()
    }
}

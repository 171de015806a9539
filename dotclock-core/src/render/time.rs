//! Time sampling and hour formatting

use chrono::Timelike;

/// Host clock style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClockFormat {
    /// 1-12
    TwelveHour,
    /// 0-23
    TwentyFourHour,
}

impl ClockFormat {
    /// From the host "24h style" flag
    pub const fn from_24h_flag(is_24h: bool) -> Self {
        if is_24h {
            ClockFormat::TwentyFourHour
        } else {
            ClockFormat::TwelveHour
        }
    }

    pub const fn is_24h(self) -> bool {
        matches!(self, ClockFormat::TwentyFourHour)
    }
}

/// Hour as shown on the face
///
/// In 12-hour mode midnight and noon both show as 12.
pub const fn display_hour(hour: u8, format: ClockFormat) -> u8 {
    match format {
        ClockFormat::TwentyFourHour => hour,
        ClockFormat::TwelveHour => match hour % 12 {
            0 => 12,
            h => h,
        },
    }
}

/// Hour and minute captured together
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeSample {
    hour: u8,
    minute: u8,
}

impl TimeSample {
    /// Build from raw values, rejecting anything out of range
    pub const fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self { hour, minute })
        } else {
            None
        }
    }

    /// Capture from any clock value
    pub fn capture<T: Timelike>(time: &T) -> Self {
        // chrono guarantees hour < 24 and minute < 60
        Self {
            hour: time.hour() as u8,
            minute: time.minute() as u8,
        }
    }

    /// Wall-clock hour (0-23)
    pub const fn hour(&self) -> u8 {
        self.hour
    }

    /// Minute (0-59)
    pub const fn minute(&self) -> u8 {
        self.minute
    }

    /// Hour as shown in the given format
    pub const fn display_hour(&self, format: ClockFormat) -> u8 {
        display_hour(self.hour, format)
    }

    /// Minute is a multiple of `period`
    pub const fn on_period(&self, period: u8) -> bool {
        period != 0 && self.minute % period == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    #[test]
    fn test_display_hour_twelve() {
        assert_eq!(display_hour(0, ClockFormat::TwelveHour), 12);
        assert_eq!(display_hour(12, ClockFormat::TwelveHour), 12);
        assert_eq!(display_hour(13, ClockFormat::TwelveHour), 1);
        assert_eq!(display_hour(23, ClockFormat::TwelveHour), 11);
        assert_eq!(display_hour(7, ClockFormat::TwelveHour), 7);
    }

    #[test]
    fn test_display_hour_twenty_four() {
        assert_eq!(display_hour(0, ClockFormat::TwentyFourHour), 0);
        assert_eq!(display_hour(13, ClockFormat::TwentyFourHour), 13);
        assert_eq!(display_hour(23, ClockFormat::TwentyFourHour), 23);
    }

    #[test]
    fn test_twelve_hour_range() {
        for hour in 0..24 {
            let shown = display_hour(hour, ClockFormat::TwelveHour);
            assert!((1..=12).contains(&shown));
        }
    }

    #[test]
    fn test_sample_bounds() {
        assert!(TimeSample::new(23, 59).is_some());
        assert!(TimeSample::new(24, 0).is_none());
        assert!(TimeSample::new(0, 60).is_none());
    }

    #[test]
    fn test_capture() {
        let time = NaiveTime::from_hms_opt(21, 30, 45).unwrap();
        let sample = TimeSample::capture(&time);
        assert_eq!(sample.hour(), 21);
        assert_eq!(sample.minute(), 30);
        assert_eq!(sample.display_hour(ClockFormat::TwelveHour), 9);
    }

    #[test]
    fn test_on_period() {
        let half = TimeSample::new(10, 30).unwrap();
        assert!(half.on_period(30));
        assert!(!half.on_period(60));
        assert!(!half.on_period(0));

        let top = TimeSample::new(10, 0).unwrap();
        assert!(top.on_period(30));
        assert!(top.on_period(60));

        let other = TimeSample::new(10, 31).unwrap();
        assert!(!other.on_period(30));
    }

    #[test]
    fn test_from_flag() {
        assert_eq!(ClockFormat::from_24h_flag(true), ClockFormat::TwentyFourHour);
        assert!(!ClockFormat::from_24h_flag(false).is_24h());
    }
}

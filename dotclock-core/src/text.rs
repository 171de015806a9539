//! Text field formatting
//!
//! All text is written into owned bounded strings. Output that would not
//! fit is cut short rather than failing.

use core::fmt::Write;

use chrono::{Datelike, Month};
use dotclock_hal::BatteryChargeState;

use crate::view::FieldText;
use crate::weather::WeatherState;

/// Weather text before the first response
pub const WEATHER_LOADING: &str = "Loading...";

/// Battery text while charging
pub const BATTERY_CHARGING: &str = "charging";

/// Full month name and space-padded day, e.g. `"March  3"`
pub fn format_date<D: Datelike>(date: &D) -> FieldText {
    let mut text = FieldText::new();
    let month = u8::try_from(date.month())
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map_or("", |m| m.name());
    let _ = write!(text, "{} {:>2}", month, date.day());
    text
}

/// `"charging"` or `"N% charged"`
pub fn format_battery(state: &BatteryChargeState) -> FieldText {
    let mut text = FieldText::new();
    if state.is_charging {
        let _ = text.push_str(BATTERY_CHARGING);
    } else {
        let _ = write!(text, "{}% charged", state.charge_percent);
    }
    text
}

/// `"T C, CONDITIONS"` with whichever parts are known
pub fn format_weather(state: &WeatherState) -> FieldText {
    let mut text = FieldText::new();
    let Some(report) = state.report() else {
        let _ = text.push_str(WEATHER_LOADING);
        return text;
    };

    let _ = match (report.temperature, report.conditions.as_deref()) {
        (Some(t), Some(c)) => write!(text, "{}C, {}", t, c),
        (Some(t), None) => write!(text, "{}C", t),
        (None, Some(c)) => text.push_str(c).map_err(|_| core::fmt::Error),
        (None, None) => Ok(()),
    };
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weather::WeatherReport;
    use chrono::NaiveDate;

    fn report(temperature: Option<i32>, conditions: Option<&str>) -> WeatherState {
        WeatherState::Report(WeatherReport {
            temperature,
            conditions: conditions.map(|c| c.try_into().unwrap()),
        })
    }

    #[test]
    fn test_date() {
        let date = NaiveDate::from_ymd_opt(2024, 10, 16).unwrap();
        assert_eq!(format_date(&date).as_str(), "October 16");

        let date = NaiveDate::from_ymd_opt(2024, 3, 3).unwrap();
        assert_eq!(format_date(&date).as_str(), "March  3");
    }

    #[test]
    fn test_longest_date_fits() {
        let date = NaiveDate::from_ymd_opt(2024, 9, 30).unwrap();
        assert_eq!(format_date(&date).as_str(), "September 30");
    }

    #[test]
    fn test_battery() {
        assert_eq!(
            format_battery(&BatteryChargeState::discharging(80)).as_str(),
            "80% charged"
        );
        assert_eq!(
            format_battery(&BatteryChargeState::discharging(0)).as_str(),
            "0% charged"
        );
        assert_eq!(
            format_battery(&BatteryChargeState::charging(40)).as_str(),
            "charging"
        );
    }

    #[test]
    fn test_weather() {
        assert_eq!(format_weather(&WeatherState::Loading).as_str(), "Loading...");
        assert_eq!(
            format_weather(&report(Some(18), Some("Cloudy"))).as_str(),
            "18C, Cloudy"
        );
        assert_eq!(format_weather(&report(Some(-4), None)).as_str(), "-4C");
        assert_eq!(format_weather(&report(None, Some("Snow"))).as_str(), "Snow");
        assert_eq!(format_weather(&report(None, None)).as_str(), "");
    }

    #[test]
    fn test_long_conditions_fit() {
        let conditions = "Thunderstorms with heavy hail!!";
        assert_eq!(conditions.len(), 31);
        let text = format_weather(&report(Some(-100), Some(conditions)));
        assert!(text.ends_with(conditions));
    }
}

//! Message types for the companion protocol
//!
//! - Watch → Companion: [`WeatherRequest`], a single trigger tuple
//! - Companion → Watch: [`SyncResponse`], weather and/or settings

use heapless::String;

use crate::dict::{DictError, DictReader, DictWriter};
use crate::frame::{Frame, FrameError, FrameKind, MAX_PAYLOAD_SIZE};
use crate::keys::{SettingKey, SettingsPatch, KEY_CONDITIONS, KEY_REQUEST, KEY_TEMPERATURE};

/// Longest conditions text kept from a response, in bytes
pub const MAX_CONDITIONS_LEN: usize = 31;

/// Conditions text
pub type Conditions = String<MAX_CONDITIONS_LEN>;

impl From<DictError> for FrameError {
    fn from(e: DictError) -> Self {
        match e {
            DictError::BufferFull => FrameError::PayloadTooLarge,
            _ => FrameError::InvalidFrame,
        }
    }
}

/// Copy `text` into a bounded string, cutting at a char boundary
pub fn truncate_into<const N: usize>(text: &str) -> String<N> {
    let mut out = String::new();
    for ch in text.chars() {
        if out.push(ch).is_err() {
            break;
        }
    }
    out
}

/// "Refresh weather now" trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WeatherRequest;

impl WeatherRequest {
    /// Encode into a frame: one tuple, key 0, unsigned value 0
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        let mut dict = DictWriter::<MAX_PAYLOAD_SIZE>::new();
        dict.write_u8(KEY_REQUEST, 0)?;
        Frame::new(FrameKind::ToCompanion, dict.as_bytes())
    }

    /// Recognise a request (companion side)
    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        if frame.kind != FrameKind::ToCompanion {
            return Err(FrameError::UnexpectedKind);
        }
        let reader = DictReader::new(&frame.payload)?;
        reader
            .find(KEY_REQUEST)
            .map(|_| WeatherRequest)
            .ok_or(FrameError::InvalidFrame)
    }
}

/// Payload pushed by the companion
///
/// Every field is optional. Fields that were missing, ill-typed or
/// unreadable are left empty rather than failing the whole message;
/// `skipped` counts the tuples that were dropped that way. A weather key
/// whose value could not be used still marks the response as carrying
/// weather, so the empty field replaces whatever was shown before.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SyncResponse {
    /// Temperature in degrees Celsius
    pub temperature: Option<i32>,
    /// Short conditions text ("Cloudy")
    pub conditions: Option<Conditions>,
    /// Settings changed on the companion side
    pub settings: SettingsPatch,
    /// A temperature or conditions tuple was present, usable or not
    pub weather_sent: bool,
    /// Tuples that were present but could not be used
    pub skipped: u8,
}

impl SyncResponse {
    /// Build a response carrying weather
    pub fn weather(temperature: i32, conditions: &str) -> Self {
        Self {
            temperature: Some(temperature),
            conditions: Some(truncate_into(conditions)),
            weather_sent: true,
            ..Self::default()
        }
    }

    /// Check if the response carries weather
    pub fn has_weather(&self) -> bool {
        self.weather_sent || self.temperature.is_some() || self.conditions.is_some()
    }

    /// Decode from a frame
    ///
    /// Fails only when the frame is not a companion message at all or its
    /// dictionary header is unreadable.
    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        if frame.kind != FrameKind::ToWatch {
            return Err(FrameError::UnexpectedKind);
        }
        let reader = DictReader::new(&frame.payload)?;
        Ok(Self::from_dict(&reader))
    }

    /// Decode from a dictionary, keeping every usable field
    pub fn from_dict(reader: &DictReader<'_>) -> Self {
        let mut response = Self::default();

        for tuple in reader.iter() {
            let Ok(tuple) = tuple else {
                response.skipped = response.skipped.saturating_add(1);
                continue;
            };

            if matches!(tuple.key, KEY_TEMPERATURE | KEY_CONDITIONS) {
                response.weather_sent = true;
            }

            let used = match tuple.key {
                KEY_TEMPERATURE => tuple
                    .value
                    .as_i32()
                    .map(|t| response.temperature = Some(t))
                    .is_some(),
                KEY_CONDITIONS => tuple
                    .value
                    .as_str_prefix()
                    .map(|text| response.conditions = Some(truncate_into(text)))
                    .is_some(),
                id => match (SettingKey::from_id(id), tuple.value.as_bool()) {
                    (Some(key), Some(value)) => {
                        response.settings.set(key, value);
                        true
                    }
                    _ => false,
                },
            };

            if !used {
                response.skipped = response.skipped.saturating_add(1);
            }
        }

        response
    }

    /// Encode into a frame (companion side)
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        let mut dict = DictWriter::<MAX_PAYLOAD_SIZE>::new();
        if let Some(temperature) = self.temperature {
            dict.write_i32(KEY_TEMPERATURE, temperature)?;
        }
        if let Some(conditions) = &self.conditions {
            dict.write_cstring(KEY_CONDITIONS, conditions)?;
        }
        for (key, value) in self.settings.iter() {
            dict.write_u8(key.id(), u8::from(value))?;
        }
        Frame::new(FrameKind::ToWatch, dict.as_bytes())
    }
}

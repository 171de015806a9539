//! Companion Link Protocol
//!
//! This crate defines the messages exchanged between the watch and its
//! paired companion (the phone-side process that fetches weather and hosts
//! the settings page).
//!
//! # Protocol Overview
//!
//! Each message is a tuple dictionary carried in a checksummed frame:
//! ```text
//! ┌───────┬────────┬──────┬─────────────┬──────────┐
//! │ START │ LENGTH │ KIND │ DICTIONARY  │ CHECKSUM │
//! │ 1B    │ 1B     │ 1B   │ 0–250B      │ 1B       │
//! └───────┴────────┴──────┴─────────────┴──────────┘
//! ```
//!
//! The watch only ever sends one message, a weather refresh trigger. The
//! companion answers with weather fields and may push any subset of the
//! user settings along with them.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod dict;
pub mod frame;
pub mod keys;
pub mod messages;

pub use dict::{DictError, DictReader, DictWriter, Tuple, TupleValue};
pub use frame::{
    Frame, FrameError, FrameKind, FrameParser, FRAME_START, MAX_FRAME_SIZE, MAX_PAYLOAD_SIZE,
};
pub use keys::{SettingKey, SettingsPatch, SETTING_COUNT};
pub use messages::{Conditions, SyncResponse, WeatherRequest, MAX_CONDITIONS_LEN};

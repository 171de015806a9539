//! Board-agnostic core logic for the dotclock binary watchface
//!
//! This crate contains all watchface logic that does not depend on a
//! particular watch platform:
//!
//! - Settings persistence over the HAL storage trait
//! - Time to binary grid rendering
//! - Text formatting (date, battery, weather)
//! - Companion sync channel (weather requests, weather/settings pushes)
//! - Lifecycle state machine and the event-driven controller
//! - The declarative face view handed to the display layer
//!
//! # Architecture
//!
//! ```text
//!   host services            companion link
//!  (tick, battery, bt)      (framed bytes)
//!          │                       │
//!          ▼                       ▼
//!   ┌─────────────────────────────────────┐
//!   │         WatchfaceController         │
//!   │  Settings · WeatherState · FaceView │
//!   └──┬──────────────┬──────────────┬────┘
//!      ▼              ▼              ▼
//!  SettingsStore  BinaryGrid-   CompanionSync-
//!  (storage)      Renderer      Channel (link)
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

// This must go first so the logging macros are visible to later modules
mod fmt;

pub mod config;
pub mod controller;
pub mod render;
pub mod state;
pub mod store;
pub mod sync;
pub mod text;
pub mod view;
pub mod weather;

pub use config::{LayoutConfig, LayoutError, Settings};
pub use controller::WatchfaceController;
pub use render::{BinaryGridRenderer, ClockFormat, Grid, GridCell, TimeSample};
pub use state::{Event, State};
pub use store::SettingsStore;
pub use sync::{CompanionSyncChannel, SyncError, SyncStats};
pub use view::{Colour, FaceView, FontKey, Palette, Point, Rect, TextField};
pub use weather::{WeatherReport, WeatherState};

//! dotclock Hardware Abstraction Layer
//!
//! Traits for the handful of platform services a watchface needs. A
//! watch port implements them over its flash, radio link and vibration
//! motor; the host simulator implements them in memory.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  dotclock-core (controller, renderer)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  dotclock-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  watch port   │       │ dotclock-sim  │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`storage::SettingsStorage`] - Persistent key-value storage
//! - [`link::CompanionTx`], [`link::CompanionRx`] - Companion byte link
//! - [`vibration::Vibrator`] - Vibration motor
//!
//! [`power::BatteryChargeState`] is the battery report handed to the
//! watchface by the platform power service.

#![no_std]
#![deny(unsafe_code)]

pub mod link;
pub mod power;
pub mod storage;
pub mod vibration;

// Re-export key traits at crate root for convenience
pub use link::{CompanionLink, CompanionRx, CompanionTx};
pub use power::BatteryChargeState;
pub use storage::{MemoryStorage, SettingsStorage, StorageError, StorageKey};
pub use vibration::{VibePattern, Vibrator};

//! Configuration types
//!
//! Face geometry and user preferences.

pub mod layout;
pub mod settings;

pub use layout::{LayoutConfig, LayoutError};
pub use settings::Settings;

//! Watchface lifecycle state machine
//!
//! Two states: the face is either still initialising or ready to take
//! host and companion events. Every callback the host would deliver is an
//! [`Event`] variant.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::State;

//! Display abstraction and face drawing for dotclock
//!
//! This crate provides:
//! - `DisplayBackend` trait for different display types (memory LCD, e-paper, terminal)
//! - `draw_face` to render a [`dotclock_core::FaceView`] onto any backend
//! - `refresh` to redraw a controller's face only when it changed
//!
//! # Architecture
//!
//! The core crate describes the face declaratively; it never draws. A
//! platform implements `DisplayBackend` with its own primitives and calls
//! `refresh` from its main loop after handling events.

#![no_std]
#![deny(unsafe_code)]

pub mod backend;
pub mod screen;

// Re-export key types
pub use backend::{DisplayBackend, DisplayError};
pub use screen::{draw_cell, draw_face, refresh};

//! Display backend trait
//!
//! Defines the interface for different display types.

use dotclock_core::{Colour, FontKey, Point, Rect};

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display
    Communication,
    /// Invalid coordinates or dimensions
    InvalidCoordinates,
    /// Display not initialized
    NotInitialized,
    /// Buffer overflow
    BufferOverflow,
}

/// Display backend trait
///
/// Provides a hardware-agnostic interface for drawing the face. Two
/// colours, filled circles and centred text are all the face needs.
pub trait DisplayBackend {
    /// Fill the whole display with one colour
    fn clear(&mut self, colour: Colour) -> Result<(), DisplayError>;

    /// Draw a filled circle
    ///
    /// A zero radius draws nothing.
    fn fill_circle(&mut self, center: Point, radius: u16, colour: Colour)
        -> Result<(), DisplayError>;

    /// Draw text centred horizontally in `frame`
    ///
    /// Text wider than the frame is clipped.
    fn draw_text(
        &mut self,
        frame: Rect,
        text: &str,
        font: FontKey,
        colour: Colour,
    ) -> Result<(), DisplayError>;

    /// Flush buffered content to the display
    ///
    /// For displays with internal buffers, this sends the buffer to the hardware.
    fn flush(&mut self) -> Result<(), DisplayError>;

    /// Check if the display is ready
    fn is_ready(&self) -> bool {
        true
    }
}

impl<T: DisplayBackend + ?Sized> DisplayBackend for &mut T {
    fn clear(&mut self, colour: Colour) -> Result<(), DisplayError> {
        (**self).clear(colour)
    }

    fn fill_circle(
        &mut self,
        center: Point,
        radius: u16,
        colour: Colour,
    ) -> Result<(), DisplayError> {
        (**self).fill_circle(center, radius, colour)
    }

    fn draw_text(
        &mut self,
        frame: Rect,
        text: &str,
        font: FontKey,
        colour: Colour,
    ) -> Result<(), DisplayError> {
        (**self).draw_text(frame, text, font, colour)
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        (**self).flush()
    }

    fn is_ready(&self) -> bool {
        (**self).is_ready()
    }
}

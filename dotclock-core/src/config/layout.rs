//! Screen layout configuration
//!
//! Geometry constants for the face. The defaults describe a 144x168
//! rectangular watch display.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::render::grid::MAX_COLUMNS;
use crate::view::Rect;

/// Layout problems found by [`LayoutConfig::validate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LayoutError {
    /// Side padding leaves no room for cells
    NoRoomForCells,
    /// Cells would be too small to draw a ring
    CellsTooSmall,
    /// A text frame or cell row falls outside the screen
    OutOfBounds,
}

/// Face geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayoutConfig {
    /// Display width
    pub screen_width: u16,
    /// Display height
    pub screen_height: u16,
    /// Ring width of an unfilled cell
    pub circle_line_thickness: u16,
    /// Gap around each cell
    pub circle_padding: u16,
    /// Margin left and right of the cell rows
    pub side_padding: u16,
    /// Top of the hour row
    pub hours_row_start: i16,
    /// Top of the minute row
    pub minutes_row_start: i16,
    /// Extra vertical offset applied when both date and weather are hidden
    pub hidden_text_padding: i16,
    /// Date text frame
    pub date_frame: Rect,
    /// Weather text frame
    pub weather_frame: Rect,
    /// Battery text frame
    pub battery_frame: Rect,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            screen_width: 144,
            screen_height: 168,
            circle_line_thickness: 2,
            circle_padding: 2,
            side_padding: 12,
            hours_row_start: 12,
            minutes_row_start: 48,
            hidden_text_padding: 40,
            date_frame: Rect::new(0, 80, 144, 30),
            weather_frame: Rect::new(0, 110, 144, 25),
            battery_frame: Rect::new(0, 140, 144, 20),
        }
    }
}

impl LayoutConfig {
    /// Width available to a cell row
    pub fn row_width(&self) -> u16 {
        self.screen_width.saturating_sub(self.side_padding.saturating_mul(2))
    }

    /// Check that every row can be drawn inside the screen
    ///
    /// The default layout always passes; this exists for layouts loaded
    /// at runtime.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.row_width() == 0 {
            return Err(LayoutError::NoRoomForCells);
        }

        // The densest row decides whether rings are drawable
        let radius = crate::render::grid::cell_radius(self, MAX_COLUMNS);
        if radius <= self.circle_line_thickness {
            return Err(LayoutError::CellsTooSmall);
        }

        let height = i32::from(self.screen_height);
        let width = i32::from(self.screen_width);
        for frame in [self.date_frame, self.weather_frame, self.battery_frame] {
            if frame.x < 0 || frame.y < 0 || frame.right() > width || frame.bottom() > height {
                return Err(LayoutError::OutOfBounds);
            }
        }

        let cell = 2 * (i32::from(radius) + i32::from(self.circle_padding));
        let lowest_row = i32::from(self.hours_row_start.max(self.minutes_row_start))
            + i32::from(self.hidden_text_padding.max(0))
            + cell;
        if self.hours_row_start < 0 || self.minutes_row_start < 0 || lowest_row > height {
            return Err(LayoutError::OutOfBounds);
        }

        Ok(())
    }
}

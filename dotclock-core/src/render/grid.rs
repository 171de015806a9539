//! Binary cell grid
//!
//! Each row shows one number in binary. Column `i` holds bit `i`, with
//! column 0 (the least significant bit) against the right margin.
//!
//! Cell size is chosen so the columns of a row exactly tile the width
//! between the side margins:
//!
//! ```text
//! radius = ((width - 2 * side) / columns - 2 * padding) / 2
//! cell   = 2 * (radius + padding)
//! x(i)   = width - (side + cell / 2 + cell * i)
//! y      = row_start + offset + cell / 2
//! ```

use heapless::Vec;

use super::time::{ClockFormat, TimeSample};
use crate::config::{LayoutConfig, Settings};
use crate::view::Point;

/// Columns in the minute row (0-59 needs 6 bits)
pub const MINUTE_COLUMNS: u8 = 6;

/// Hour columns in 12-hour mode (1-12 needs 4 bits)
pub const HOUR_COLUMNS_12H: u8 = 4;

/// Hour columns in 24-hour mode (0-23 needs 5 bits)
pub const HOUR_COLUMNS_24H: u8 = 5;

/// Widest row
pub const MAX_COLUMNS: u8 = MINUTE_COLUMNS;

/// Which number a row shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GridRow {
    Hours,
    Minutes,
}

/// One bit of a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GridCell {
    pub row: GridRow,
    /// Bit index, 0 = least significant
    pub column: u8,
    pub filled: bool,
    pub center: Point,
    pub radius: u16,
}

/// A rendered row of cells
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CellRow {
    pub row: GridRow,
    pub cells: Vec<GridCell, { MAX_COLUMNS as usize }>,
}

impl CellRow {
    const fn empty(row: GridRow) -> Self {
        Self {
            row,
            cells: Vec::new(),
        }
    }

    /// Read the row back as a number
    pub fn value(&self) -> u8 {
        self.cells
            .iter()
            .filter(|c| c.filled)
            .fold(0, |acc, c| acc | (1 << c.column))
    }

    pub fn columns(&self) -> u8 {
        self.cells.len() as u8
    }
}

/// Hour row above minute row
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Grid {
    pub hours: CellRow,
    pub minutes: CellRow,
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            hours: CellRow::empty(GridRow::Hours),
            minutes: CellRow::empty(GridRow::Minutes),
        }
    }
}

impl Grid {
    /// All cells, hour row first
    pub fn cells(&self) -> impl Iterator<Item = &GridCell> {
        self.hours.cells.iter().chain(self.minutes.cells.iter())
    }

    /// Check if nothing has been rendered yet
    pub fn is_empty(&self) -> bool {
        self.hours.cells.is_empty() && self.minutes.cells.is_empty()
    }
}

/// Hour columns for a clock format
pub const fn hour_columns(format: ClockFormat) -> u8 {
    match format {
        ClockFormat::TwelveHour => HOUR_COLUMNS_12H,
        ClockFormat::TwentyFourHour => HOUR_COLUMNS_24H,
    }
}

/// Cell radius for a row with `columns` columns
pub fn cell_radius(layout: &LayoutConfig, columns: u8) -> u16 {
    let columns = u16::from(columns.max(1));
    let slot = layout.row_width() / columns;
    slot.saturating_sub(layout.circle_padding.saturating_mul(2)) / 2
}

/// Centre of a cell
pub fn cell_center(layout: &LayoutConfig, column: u8, row_top: i16, radius: u16) -> Point {
    let cell = 2 * (i32::from(radius) + i32::from(layout.circle_padding));
    let x = i32::from(layout.screen_width)
        - (i32::from(layout.side_padding) + cell / 2 + cell * i32::from(column));
    let y = cell / 2 + i32::from(row_top);
    Point::new(x as i16, y as i16)
}

/// Vertical shift for the grid
///
/// With both date and weather hidden the grid moves down to stay centred.
pub fn vertical_offset(layout: &LayoutConfig, settings: &Settings) -> i16 {
    if settings.text_hidden() {
        layout.hidden_text_padding
    } else {
        0
    }
}

/// Maps a time sample to cell rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinaryGridRenderer {
    layout: LayoutConfig,
}

impl BinaryGridRenderer {
    pub fn new(layout: LayoutConfig) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    fn render_row(&self, row: GridRow, value: u8, columns: u8, row_top: i16) -> CellRow {
        let radius = cell_radius(&self.layout, columns);
        let mut out = CellRow::empty(row);
        for column in 0..columns.min(MAX_COLUMNS) {
            // Bounded by MAX_COLUMNS
            let _ = out.cells.push(GridCell {
                row,
                column,
                filled: (value >> column) & 1 == 1,
                center: cell_center(&self.layout, column, row_top, radius),
                radius,
            });
        }
        out
    }

    /// Render both rows
    pub fn render(&self, sample: TimeSample, format: ClockFormat, vertical_offset: i16) -> Grid {
        let hours = self.render_row(
            GridRow::Hours,
            sample.display_hour(format),
            hour_columns(format),
            self.layout.hours_row_start + vertical_offset,
        );
        let minutes = self.render_row(
            GridRow::Minutes,
            sample.minute(),
            MINUTE_COLUMNS,
            self.layout.minutes_row_start + vertical_offset,
        );
        Grid { hours, minutes }
    }
}

//! Time to binary grid rendering
//!
//! Pure functions only: a [`TimeSample`] goes in, a [`Grid`] of cells
//! comes out. Drawing the cells is left to the host.

pub mod grid;
pub mod time;

pub use grid::{
    cell_center, cell_radius, hour_columns, vertical_offset, BinaryGridRenderer, CellRow, Grid,
    GridCell, GridRow, MAX_COLUMNS, MINUTE_COLUMNS,
};
pub use time::{display_hour, ClockFormat, TimeSample};

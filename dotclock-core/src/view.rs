//! Host-facing render output
//!
//! [`FaceView`] is a declarative description of the whole face: palette,
//! both cell rows and the three text fields with their visibility. The
//! host draws it; nothing here touches a display.

use heapless::String;

use crate::render::Grid;

/// Capacity of a text field
pub const TEXT_CAPACITY: usize = 48;

/// Text field contents
pub type FieldText = String<TEXT_CAPACITY>;

/// Point in display units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i16,
    pub y: i16,
}

impl Point {
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in display units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: i16,
    pub y: i16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub const fn new(x: i16, y: i16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Bottom edge (exclusive)
    pub fn bottom(&self) -> i32 {
        i32::from(self.y) + i32::from(self.height)
    }

    /// Right edge (exclusive)
    pub fn right(&self) -> i32 {
        i32::from(self.x) + i32::from(self.width)
    }
}

/// Monochrome colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Colour {
    Black,
    White,
}

/// Foreground/background pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Palette {
    pub foreground: Colour,
    pub background: Colour,
}

impl Palette {
    /// White on black
    pub const NORMAL: Palette = Palette {
        foreground: Colour::White,
        background: Colour::Black,
    };

    /// Black on white
    pub const INVERTED: Palette = Palette {
        foreground: Colour::Black,
        background: Colour::White,
    };

    /// Palette for the `invert_colours` setting
    pub const fn for_inverted(inverted: bool) -> Self {
        if inverted {
            Self::INVERTED
        } else {
            Self::NORMAL
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::NORMAL
    }
}

/// Font hint for a text field
///
/// The host maps these to whatever fonts it has.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FontKey {
    /// Large condensed face (date)
    Large,
    /// Medium face (weather)
    Medium,
    /// Small face (battery)
    Small,
}

/// One optional line of centred text
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TextField {
    pub text: FieldText,
    pub frame: Rect,
    pub font: FontKey,
    pub visible: bool,
}

impl TextField {
    pub fn new(frame: Rect, font: FontKey) -> Self {
        Self {
            text: String::new(),
            frame,
            font,
            visible: true,
        }
    }

    /// Replace the text, truncating at a char boundary
    pub fn set_text(&mut self, text: &str) {
        self.text = dotclock_protocol::messages::truncate_into(text);
    }

    /// Text as drawn, `None` when hidden
    pub fn shown(&self) -> Option<&str> {
        self.visible.then_some(self.text.as_str())
    }
}

/// Complete face description
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FaceView {
    pub palette: Palette,
    /// Ring width of an unfilled cell
    pub ring_thickness: u16,
    pub grid: Grid,
    pub date: TextField,
    pub weather: TextField,
    pub battery: TextField,
}

impl FaceView {
    /// Text fields in drawing order
    pub fn text_fields(&self) -> [&TextField; 3] {
        [&self.date, &self.weather, &self.battery]
    }
}

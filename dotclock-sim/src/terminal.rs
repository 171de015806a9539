//! Terminal display backend
//!
//! Collects the draw calls of one frame and prints the cell rows as
//! `●`/`○` glyphs followed by the visible text lines.

use std::collections::BTreeMap;
use std::io::Write;

use dotclock_core::{Colour, FontKey, Point, Rect};
use dotclock_display::{DisplayBackend, DisplayError};

/// Characters per printed line
const LINE_WIDTH: usize = 24;

/// One frame's worth of drawing
#[derive(Debug, Default)]
struct Frame {
    background: Option<Colour>,
    /// Cells keyed by (y, x); true when no hole was punched
    cells: BTreeMap<(i16, i16), bool>,
    texts: Vec<String>,
}

/// Prints frames to a writer
pub struct TerminalDisplay<W> {
    out: W,
    width: u16,
    height: u16,
    frame: Frame,
    frames_drawn: u32,
}

impl<W: Write> TerminalDisplay<W> {
    pub fn new(out: W, width: u16, height: u16) -> Self {
        Self {
            out,
            width,
            height,
            frame: Frame::default(),
            frames_drawn: 0,
        }
    }

    pub fn frames_drawn(&self) -> u32 {
        self.frames_drawn
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn render(&self) -> String {
        let mut text = String::new();
        let inverted = self.frame.background == Some(Colour::White);
        text.push_str(&format!(
            "+{:-^width$}+\n",
            if inverted { " inverted " } else { "" },
            width = LINE_WIDTH
        ));

        let mut rows: BTreeMap<i16, Vec<(i16, bool)>> = BTreeMap::new();
        for (&(y, x), &filled) in &self.frame.cells {
            rows.entry(y).or_default().push((x, filled));
        }
        for cells in rows.values() {
            let glyphs: Vec<&str> = cells
                .iter()
                .map(|&(_, filled)| if filled { "●" } else { "○" })
                .collect();
            text.push_str(&format!("|{:^width$}|\n", glyphs.join(" "), width = LINE_WIDTH));
        }

        for line in &self.frame.texts {
            text.push_str(&format!("|{:^width$}|\n", line, width = LINE_WIDTH));
        }
        text.push_str(&format!("+{:-^width$}+\n", "", width = LINE_WIDTH));
        text
    }
}

impl<W: Write> DisplayBackend for TerminalDisplay<W> {
    fn clear(&mut self, colour: Colour) -> Result<(), DisplayError> {
        self.frame = Frame {
            background: Some(colour),
            ..Frame::default()
        };
        Ok(())
    }

    fn fill_circle(
        &mut self,
        center: Point,
        radius: u16,
        colour: Colour,
    ) -> Result<(), DisplayError> {
        if center.x < 0
            || center.y < 0
            || center.x as u16 >= self.width
            || center.y as u16 >= self.height
        {
            return Err(DisplayError::InvalidCoordinates);
        }
        if radius == 0 {
            return Ok(());
        }
        let background = self.frame.background.ok_or(DisplayError::NotInitialized)?;
        // A background disc over an existing cell punches the ring's hole
        let filled = colour != background;
        self.frame
            .cells
            .entry((center.y, center.x))
            .and_modify(|f| *f &= filled)
            .or_insert(filled);
        Ok(())
    }

    fn draw_text(
        &mut self,
        _frame: Rect,
        text: &str,
        _font: FontKey,
        _colour: Colour,
    ) -> Result<(), DisplayError> {
        self.frame.texts.push(text.chars().take(LINE_WIDTH).collect());
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        let rendered = self.render();
        self.out
            .write_all(rendered.as_bytes())
            .and_then(|_| self.out.flush())
            .map_err(|_| DisplayError::Communication)?;
        self.frames_drawn += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dotclock_core::{
        BinaryGridRenderer, ClockFormat, FaceView, LayoutConfig, Palette, TextField, TimeSample,
    };
    use dotclock_display::draw_face;

    fn face(palette: Palette) -> FaceView {
        let layout = LayoutConfig::default();
        let mut date = TextField::new(layout.date_frame, FontKey::Large);
        date.set_text("October 16");
        let mut weather = TextField::new(layout.weather_frame, FontKey::Medium);
        weather.visible = false;
        FaceView {
            palette,
            ring_thickness: 2,
            // 5:03 -> 0101 / 000011
            grid: BinaryGridRenderer::new(layout).render(
                TimeSample::new(5, 3).unwrap(),
                ClockFormat::TwelveHour,
                0,
            ),
            date,
            weather,
            battery: TextField::new(layout.battery_frame, FontKey::Small),
        }
    }

    #[test]
    fn test_prints_rows_and_text() {
        let mut display = TerminalDisplay::new(Vec::new(), 144, 168);
        draw_face(&face(Palette::NORMAL), &mut display).unwrap();
        assert_eq!(display.frames_drawn(), 1);

        let out = String::from_utf8(display.into_inner()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        // Most significant bit on the left
        assert!(lines[1].contains("○ ● ○ ●"));
        assert!(lines[2].contains("○ ○ ○ ○ ● ●"));
        assert!(lines[3].contains("October 16"));
        assert!(!out.contains("inverted"));
    }

    #[test]
    fn test_inverted_frame_is_marked() {
        let mut display = TerminalDisplay::new(Vec::new(), 144, 168);
        draw_face(&face(Palette::INVERTED), &mut display).unwrap();

        let out = String::from_utf8(display.into_inner()).unwrap();
        assert!(out.lines().next().unwrap().contains("inverted"));
        assert!(out.contains("○ ● ○ ●"));
    }

    #[test]
    fn test_off_screen_circle() {
        let mut display = TerminalDisplay::new(Vec::new(), 144, 168);
        display.clear(Colour::Black).unwrap();
        assert_eq!(
            display.fill_circle(Point::new(200, 10), 4, Colour::White),
            Err(DisplayError::InvalidCoordinates)
        );
    }
}

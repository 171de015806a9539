//! Face drawing
//!
//! Turns a [`FaceView`] into backend draw calls. Filled cells are solid
//! discs; unfilled cells are rings, drawn as a foreground disc with a
//! background disc on top.

use dotclock_core::{FaceView, GridCell, Palette, WatchfaceController};
use dotclock_hal::{CompanionLink, SettingsStorage, Vibrator};

use crate::backend::{DisplayBackend, DisplayError};

/// Draw one cell
pub fn draw_cell<D: DisplayBackend>(
    backend: &mut D,
    cell: &GridCell,
    palette: Palette,
    ring_thickness: u16,
) -> Result<(), DisplayError> {
    backend.fill_circle(cell.center, cell.radius, palette.foreground)?;
    if !cell.filled {
        let inner = cell.radius.saturating_sub(ring_thickness);
        if inner > 0 {
            backend.fill_circle(cell.center, inner, palette.background)?;
        }
    }
    Ok(())
}

/// Draw the whole face and flush
pub fn draw_face<D: DisplayBackend>(view: &FaceView, backend: &mut D) -> Result<(), DisplayError> {
    if !backend.is_ready() {
        return Err(DisplayError::NotInitialized);
    }

    backend.clear(view.palette.background)?;

    for cell in view.grid.cells() {
        draw_cell(backend, cell, view.palette, view.ring_thickness)?;
    }

    for field in view.text_fields() {
        if let Some(text) = field.shown() {
            backend.draw_text(field.frame, text, field.font, view.palette.foreground)?;
        }
    }

    backend.flush()
}

/// Redraw the controller's face if it changed
///
/// Returns true if a frame was drawn. The view stays dirty when drawing
/// fails so the next call retries.
pub fn refresh<S, L, V, D>(
    face: &mut WatchfaceController<S, L, V>,
    backend: &mut D,
) -> Result<bool, DisplayError>
where
    S: SettingsStorage,
    L: CompanionLink,
    V: Vibrator,
    D: DisplayBackend,
{
    if !face.is_dirty() {
        return Ok(false);
    }
    draw_face(face.view(), backend)?;
    face.mark_clean();
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dotclock_core::{
        BinaryGridRenderer, ClockFormat, Colour, FontKey, LayoutConfig, Point, Rect, TextField,
        TimeSample,
    };
    use heapless::{String, Vec};

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Op {
        Clear(Colour),
        Circle(Point, u16, Colour),
        Text(Rect, String<48>, FontKey, Colour),
        Flush,
    }

    #[derive(Default)]
    struct RecordingBackend {
        ops: Vec<Op, 64>,
        not_ready: bool,
    }

    impl RecordingBackend {
        fn circles(&self) -> impl Iterator<Item = (&Point, &u16, &Colour)> {
            self.ops.iter().filter_map(|op| match op {
                Op::Circle(p, r, c) => Some((p, r, c)),
                _ => None,
            })
        }

        fn texts(&self) -> impl Iterator<Item = &str> {
            self.ops.iter().filter_map(|op| match op {
                Op::Text(_, t, _, _) => Some(t.as_str()),
                _ => None,
            })
        }
    }

    impl DisplayBackend for RecordingBackend {
        fn clear(&mut self, colour: Colour) -> Result<(), DisplayError> {
            self.ops.push(Op::Clear(colour)).map_err(|_| DisplayError::BufferOverflow)
        }

        fn fill_circle(
            &mut self,
            center: Point,
            radius: u16,
            colour: Colour,
        ) -> Result<(), DisplayError> {
            self.ops
                .push(Op::Circle(center, radius, colour))
                .map_err(|_| DisplayError::BufferOverflow)
        }

        fn draw_text(
            &mut self,
            frame: Rect,
            text: &str,
            font: FontKey,
            colour: Colour,
        ) -> Result<(), DisplayError> {
            let text = String::try_from(text).map_err(|_| DisplayError::BufferOverflow)?;
            self.ops
                .push(Op::Text(frame, text, font, colour))
                .map_err(|_| DisplayError::BufferOverflow)
        }

        fn flush(&mut self) -> Result<(), DisplayError> {
            self.ops.push(Op::Flush).map_err(|_| DisplayError::BufferOverflow)
        }

        fn is_ready(&self) -> bool {
            !self.not_ready
        }
    }

    fn view(hour: u8, minute: u8, palette: Palette) -> FaceView {
        let layout = LayoutConfig::default();
        let grid = BinaryGridRenderer::new(layout).render(
            TimeSample::new(hour, minute).unwrap(),
            ClockFormat::TwelveHour,
            0,
        );
        let mut date = TextField::new(layout.date_frame, FontKey::Large);
        date.set_text("October 16");
        let mut weather = TextField::new(layout.weather_frame, FontKey::Medium);
        weather.set_text("Loading...");
        let mut battery = TextField::new(layout.battery_frame, FontKey::Small);
        battery.set_text("80% charged");

        FaceView {
            palette,
            ring_thickness: layout.circle_line_thickness,
            grid,
            date,
            weather,
            battery,
        }
    }

    #[test]
    fn test_filled_and_ring_cells() {
        // 12:00 -> hours 0b1100, minutes all empty
        let view = view(0, 0, Palette::NORMAL);
        let mut backend = RecordingBackend::default();
        draw_face(&view, &mut backend).unwrap();

        let discs = backend.circles().filter(|(_, _, c)| **c == Colour::White).count();
        let holes = backend.circles().filter(|(_, _, c)| **c == Colour::Black).count();
        // One foreground disc per cell, one hole per unfilled cell
        assert_eq!(discs, 4 + 6);
        assert_eq!(holes, 2 + 6);

        let (_, radius, _) = backend
            .circles()
            .find(|(_, _, c)| **c == Colour::Black)
            .unwrap();
        assert_eq!(*radius, 13 - 2);
    }

    #[test]
    fn test_draw_order() {
        let view = view(3, 7, Palette::NORMAL);
        let mut backend = RecordingBackend::default();
        draw_face(&view, &mut backend).unwrap();

        assert_eq!(backend.ops.first(), Some(&Op::Clear(Colour::Black)));
        assert_eq!(backend.ops.last(), Some(&Op::Flush));
        let texts: Vec<&str, 3> = backend.texts().collect();
        assert_eq!(&texts[..], &["October 16", "Loading...", "80% charged"]);
    }

    #[test]
    fn test_hidden_fields_not_drawn() {
        let mut view = view(3, 7, Palette::NORMAL);
        view.weather.visible = false;
        view.battery.visible = false;

        let mut backend = RecordingBackend::default();
        draw_face(&view, &mut backend).unwrap();
        let texts: Vec<&str, 3> = backend.texts().collect();
        assert_eq!(&texts[..], &["October 16"]);
    }

    #[test]
    fn test_inverted_palette() {
        let view = view(3, 7, Palette::INVERTED);
        let mut backend = RecordingBackend::default();
        draw_face(&view, &mut backend).unwrap();

        assert_eq!(backend.ops[0], Op::Clear(Colour::White));
        assert!(backend
            .ops
            .iter()
            .all(|op| !matches!(op, Op::Text(_, _, _, Colour::White))));
    }

    #[test]
    fn test_thick_ring_leaves_no_hole() {
        let view = view(0, 0, Palette::NORMAL);
        let cell = view.grid.minutes.cells[0];
        let mut backend = RecordingBackend::default();
        draw_cell(&mut backend, &cell, Palette::NORMAL, cell.radius).unwrap();
        assert_eq!(backend.circles().count(), 1);
    }

    #[test]
    fn test_backend_not_ready() {
        let view = view(0, 0, Palette::NORMAL);
        let mut backend = RecordingBackend {
            not_ready: true,
            ..RecordingBackend::default()
        };
        assert_eq!(draw_face(&view, &mut backend), Err(DisplayError::NotInitialized));
        assert!(backend.ops.is_empty());
    }

    #[test]
    fn test_backend_error_propagates() {
        struct Broken;
        impl DisplayBackend for Broken {
            fn clear(&mut self, _: Colour) -> Result<(), DisplayError> {
                Err(DisplayError::Communication)
            }
            fn fill_circle(&mut self, _: Point, _: u16, _: Colour) -> Result<(), DisplayError> {
                Ok(())
            }
            fn draw_text(
                &mut self,
                _: Rect,
                _: &str,
                _: FontKey,
                _: Colour,
            ) -> Result<(), DisplayError> {
                Ok(())
            }
            fn flush(&mut self) -> Result<(), DisplayError> {
                Ok(())
            }
        }

        let view = view(0, 0, Palette::NORMAL);
        assert_eq!(draw_face(&view, &mut Broken), Err(DisplayError::Communication));
    }

    #[test]
    fn test_refresh_draws_only_when_dirty() {
        use chrono::NaiveDate;
        use dotclock_hal::{
            BatteryChargeState, CompanionRx, CompanionTx, MemoryStorage, VibePattern,
        };

        struct Offline;
        impl CompanionTx for Offline {
            type Error = ();
            fn write(&mut self, _: &[u8]) -> Result<(), ()> {
                Err(())
            }
        }
        impl CompanionRx for Offline {
            type Error = ();
            fn read(&mut self, _: &mut [u8]) -> Result<usize, ()> {
                Ok(0)
            }
            fn is_connected(&self) -> bool {
                false
            }
        }

        struct Still;
        impl Vibrator for Still {
            fn vibrate(&mut self, _: VibePattern) {}
        }

        let mut face = WatchfaceController::new(
            LayoutConfig::default(),
            MemoryStorage::<8>::new(),
            Offline,
            Still,
            ClockFormat::TwentyFourHour,
        );
        let now = NaiveDate::from_ymd_opt(2024, 3, 3)
            .unwrap()
            .and_hms_opt(21, 42, 0)
            .unwrap();
        face.start(now, BatteryChargeState::discharging(55), false);

        let mut backend = RecordingBackend::default();
        assert_eq!(refresh(&mut face, &mut backend), Ok(true));
        assert!(!face.is_dirty());
        let drawn = backend.ops.len();

        assert_eq!(refresh(&mut face, &mut backend), Ok(false));
        assert_eq!(backend.ops.len(), drawn);

        let texts: Vec<&str, 3> = backend.texts().collect();
        assert_eq!(&texts[..], &["March  3", "Loading...", "55% charged"]);
    }

    #[test]
    fn test_failed_refresh_stays_dirty() {
        use dotclock_hal::{CompanionRx, CompanionTx, MemoryStorage, VibePattern};

        struct Offline;
        impl CompanionTx for Offline {
            type Error = ();
            fn write(&mut self, _: &[u8]) -> Result<(), ()> {
                Err(())
            }
        }
        impl CompanionRx for Offline {
            type Error = ();
            fn read(&mut self, _: &mut [u8]) -> Result<usize, ()> {
                Ok(0)
            }
        }

        struct Still;
        impl Vibrator for Still {
            fn vibrate(&mut self, _: VibePattern) {}
        }

        let mut face = WatchfaceController::new(
            LayoutConfig::default(),
            MemoryStorage::<8>::new(),
            Offline,
            Still,
            ClockFormat::TwelveHour,
        );
        let mut backend = RecordingBackend {
            not_ready: true,
            ..RecordingBackend::default()
        };
        assert_eq!(refresh(&mut face, &mut backend), Err(DisplayError::NotInitialized));
        assert!(face.is_dirty());
    }
}

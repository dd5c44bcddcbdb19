//! Axis-aligned drawing primitives
//!
//! Pixels, lines and rectangles, all drawn in the graphics orientation.
//! Everything here is clipped at the screen edge: a primitive that starts
//! off screen is skipped and one that runs past the edge is cut.
//!
//! Filled areas cost one window and one burst stream each, never a window
//! per pixel.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ili9341_tft::{Color, Config, Display, Interface};
//! # use core::convert::Infallible;
//! # use embedded_hal::digital::OutputPin;
//! # use embedded_hal::spi::{Operation, SpiDevice};
//! # struct MockSpi;
//! # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
//! # impl SpiDevice for MockSpi {
//! #     fn transaction(
//! #         &mut self,
//! #         _operations: &mut [Operation<'_, u8>],
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # let interface = Interface::new(MockSpi, MockPin, MockPin);
//! let mut display = Display::new(interface, Config::default());
//!
//! let _ = display.fill_screen(Color::BLUE, 0);
//! let _ = display.draw_hline(10, 20, 100, Color::WHITE, 2);
//! let _ = display.draw_rect(20, 40, 80, 60, Color::YELLOW, 3, Some(Color::NAVY));
//! ```

use crate::color::Color;
use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::display::{Display, DisplayResult};
use crate::interface::DisplayInterface;
use crate::orientation::Orientation;

/// Widest stroke a line or rectangle border may have
pub const MAX_LINE_WIDTH: u16 = 10;

impl<I> Display<I>
where
    I: DisplayInterface,
{
    /// Draw a single pixel
    ///
    /// Pixels outside the screen are ignored.
    pub fn draw_pixel(&mut self, x: u16, y: u16, color: Color) -> DisplayResult<I> {
        if x >= SCREEN_WIDTH || y >= SCREEN_HEIGHT {
            return Ok(());
        }
        self.ensure_orientation(Orientation::Graphics)?;
        // The controller wraps inside the window, so a 2x2 window fed a
        // single word only touches (x, y).
        self.set_window(
            x,
            y,
            (x + 1).min(SCREEN_WIDTH - 1),
            (y + 1).min(SCREEN_HEIGHT - 1),
        )?;
        self.write_data(&color.to_be_bytes())
    }

    /// Fill a `width x height` rectangle with one color
    ///
    /// The rectangle is clipped to the screen. Empty or fully off-screen
    /// rectangles send nothing.
    pub fn fill_rect(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
        color: Color,
    ) -> DisplayResult<I> {
        if width == 0 || height == 0 || x >= SCREEN_WIDTH || y >= SCREEN_HEIGHT {
            return Ok(());
        }
        let x1 = (u32::from(x) + u32::from(width)).min(u32::from(SCREEN_WIDTH)) as u16 - 1;
        let y1 = (u32::from(y) + u32::from(height)).min(u32::from(SCREEN_HEIGHT)) as u16 - 1;

        self.ensure_orientation(Orientation::Graphics)?;
        self.set_window(x, y, x1, y1)?;
        let pixels = usize::from(x1 - x + 1) * usize::from(y1 - y + 1);
        self.write_repeated(color, pixels)
    }

    /// Draw a horizontal line `width` pixels thick
    ///
    /// `length` is capped at the screen width and `width` at
    /// [`MAX_LINE_WIDTH`].
    pub fn draw_hline(
        &mut self,
        x: u16,
        y: u16,
        length: u16,
        color: Color,
        width: u16,
    ) -> DisplayResult<I> {
        let length = length.min(SCREEN_WIDTH);
        let width = width.min(MAX_LINE_WIDTH);
        self.fill_rect(x, y, length, width, color)
    }

    /// Draw a vertical line `width` pixels thick
    ///
    /// `length` is capped at the screen height and `width` at
    /// [`MAX_LINE_WIDTH`].
    pub fn draw_vline(
        &mut self,
        x: u16,
        y: u16,
        length: u16,
        color: Color,
        width: u16,
    ) -> DisplayResult<I> {
        let length = length.min(SCREEN_HEIGHT);
        let width = width.min(MAX_LINE_WIDTH);
        self.fill_rect(x, y, width, length, color)
    }

    /// Draw a rectangle with a border and an optional fill
    ///
    /// The size is capped at the screen. A border wider than half the
    /// rectangle shrinks to one less than half of it. With a border of 0
    /// the whole rectangle is filled in one window, with `fill` if given
    /// and `color` otherwise.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_rect(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
        color: Color,
        border: u16,
        fill: Option<Color>,
    ) -> DisplayResult<I> {
        let width = width.min(SCREEN_WIDTH);
        let height = height.min(SCREEN_HEIGHT);
        if width == 0 || height == 0 {
            return Ok(());
        }

        let mut border = border.min(MAX_LINE_WIDTH);
        if border > width / 2 {
            border = (width / 2).saturating_sub(1);
        }
        if border > height / 2 {
            border = (height / 2).saturating_sub(1);
        }

        if border == 0 {
            return self.fill_rect(x, y, width, height, fill.unwrap_or(color));
        }

        let right = x.saturating_add(width - border);
        let bottom = y.saturating_add(height - border);
        let inner_x = x.saturating_add(border);
        let inner_y = y.saturating_add(border);
        let inner_width = width - 2 * border;
        let inner_height = height - 2 * border;

        self.draw_hline(x, y, width, color, border)?;
        self.draw_hline(x, bottom, width, color, border)?;
        self.draw_vline(x, inner_y, inner_height, color, border)?;
        self.draw_vline(right, inner_y, inner_height, color, border)?;

        if let Some(fill) = fill {
            self.fill_rect(inner_x, inner_y, inner_width, inner_height, fill)?;
        }
        Ok(())
    }

    /// Fill the whole screen, leaving `margin` pixels untouched on every side
    pub fn fill_screen(&mut self, color: Color, margin: u16) -> DisplayResult<I> {
        let width = SCREEN_WIDTH.saturating_sub(margin.saturating_mul(2));
        let height = SCREEN_HEIGHT.saturating_sub(margin.saturating_mul(2));
        self.fill_rect(margin, margin, width, height, color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{COLUMN_ADDRESS_SET, MEMORY_WRITE, PAGE_ADDRESS_SET};
    use crate::testing::{Event, test_display};
    use alloc::vec;

    #[test]
    fn test_draw_pixel_transaction() {
        let mut display = test_display();
        display.draw_pixel(10, 10, Color::RED).unwrap();
        assert_eq!(
            display.interface().events,
            vec![
                Event::Command(COLUMN_ADDRESS_SET),
                Event::Data(vec![0x00, 0x0A, 0x00, 0x0B]),
                Event::Command(PAGE_ADDRESS_SET),
                Event::Data(vec![0x00, 0x0A, 0x00, 0x0B]),
                Event::Command(MEMORY_WRITE),
                Event::Data(vec![0xF8, 0x00]),
            ]
        );
    }

    #[test]
    fn test_draw_pixel_at_corner_and_off_screen() {
        let mut display = test_display();
        display.draw_pixel(239, 319, Color::WHITE).unwrap();
        assert_eq!(display.interface().windows(), vec![(239, 319, 239, 319)]);
        display.interface_mut().clear();
        display.draw_pixel(240, 0, Color::WHITE).unwrap();
        assert!(display.interface().events.is_empty());
    }

    #[test]
    fn test_draw_pixel_restores_graphics_orientation() {
        let mut display = test_display();
        display.set_orientation(Orientation::Character).unwrap();
        display.interface_mut().clear();
        display.draw_pixel(1, 1, Color::RED).unwrap();
        assert_eq!(display.interface().madctl_writes(), vec![0x48]);
    }

    #[test]
    fn test_hline_clamps_length_and_width() {
        let mut display = test_display();
        display.draw_hline(0, 5, 1000, Color::GREEN, 50).unwrap();
        assert_eq!(display.interface().windows(), vec![(0, 5, 239, 14)]);
        assert_eq!(display.interface().pixel_stream().len(), 240 * 10 * 2);
    }

    #[test]
    fn test_vline_emits_exact_word_count() {
        let mut display = test_display();
        display.draw_vline(3, 7, 33, Color::BLUE, 3).unwrap();
        assert_eq!(display.interface().windows(), vec![(3, 7, 5, 39)]);
        let stream = display.interface().pixel_stream();
        assert_eq!(stream.len(), 3 * 33 * 2);
        assert!(stream.chunks_exact(2).all(|word| word == [0x00, 0x1F]));
    }

    #[test]
    fn test_line_clipped_at_screen_edge() {
        let mut display = test_display();
        display.draw_vline(100, 300, 320, Color::RED, 1).unwrap();
        assert_eq!(display.interface().windows(), vec![(100, 300, 100, 319)]);
        assert_eq!(display.interface().pixel_stream().len(), 20 * 2);
    }

    #[test]
    fn test_rect_without_border_is_one_window() {
        let mut display = test_display();
        display
            .draw_rect(10, 20, 30, 40, Color::RED, 0, None)
            .unwrap();
        assert_eq!(display.interface().windows(), vec![(10, 20, 39, 59)]);
        let stream = display.interface().pixel_stream();
        assert_eq!(stream.len(), 30 * 40 * 2);
        assert!(stream.chunks_exact(2).all(|word| word == [0xF8, 0x00]));
    }

    #[test]
    fn test_rect_without_border_prefers_fill_color() {
        let mut display = test_display();
        display
            .draw_rect(0, 0, 4, 4, Color::RED, 0, Some(Color::BLUE))
            .unwrap();
        let stream = display.interface().pixel_stream();
        assert!(stream.chunks_exact(2).all(|word| word == [0x00, 0x1F]));
    }

    #[test]
    fn test_rect_border_and_fill_windows() {
        let mut display = test_display();
        display
            .draw_rect(10, 10, 20, 30, Color::WHITE, 2, Some(Color::BLACK))
            .unwrap();
        assert_eq!(
            display.interface().windows(),
            vec![
                (10, 10, 29, 11),
                (10, 38, 29, 39),
                (10, 12, 11, 37),
                (28, 12, 29, 37),
                (12, 12, 27, 37),
            ]
        );
        let streams = display.interface().window_streams();
        assert_eq!(streams[4].len(), 16 * 26 * 2);
        assert!(streams[4].iter().all(|byte| *byte == 0));
    }

    #[test]
    fn test_rect_border_shrinks_on_narrow_rect() {
        let mut display = test_display();
        display
            .draw_rect(0, 0, 6, 100, Color::WHITE, 5, None)
            .unwrap();
        // border becomes 6 / 2 - 1 = 2
        assert_eq!(display.interface().windows()[0], (0, 0, 5, 1));
    }

    #[test]
    fn test_rect_clamped_to_screen() {
        let mut display = test_display();
        display
            .draw_rect(0, 0, 500, 500, Color::RED, 0, None)
            .unwrap();
        assert_eq!(display.interface().windows(), vec![(0, 0, 239, 319)]);
    }

    #[test]
    fn test_fill_screen_with_margin() {
        let mut display = test_display();
        display.fill_screen(Color::BLACK, 0).unwrap();
        display.fill_screen(Color::BLACK, 10).unwrap();
        assert_eq!(
            display.interface().windows(),
            vec![(0, 0, 239, 319), (10, 10, 229, 309)]
        );
    }
}

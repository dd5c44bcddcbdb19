//! Bitmap text
//!
//! Glyph columns are stored top to bottom, which is the raster order of
//! the character orientation: with rows and columns exchanged, each glyph
//! column becomes one scan line of the addressing window. A glyph is
//! therefore streamed straight from its bitmap, one color word per bit,
//! without any transposition.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ili9341_tft::{Color, Config, Display, Font, Interface, TextStyle};
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
//! const DOT: [u32; 1] = [0b1_010];
//! let font = match Font::new(3, &[('.', &DOT)]) {
//!     Ok(font) => font,
//!     Err(_) => return,
//! };
//! let style = TextStyle::new(&font, Color::WHITE, Color::BLACK).with_scale(2);
//!
//! let mut display = Display::new(interface, Config::default());
//! let _ = display.print_line("... ...", 10, 10, &style);
//! ```

use embedded_hal::delay::DelayNs;

use crate::color::Color;
use crate::config::{MAX_BURST_PIXELS, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::display::{Display, DisplayResult};
use crate::error::Error;
use crate::font::Font;
use crate::interface::DisplayInterface;
use crate::orientation::Orientation;

/// Largest scale for a single character
pub const MAX_CHAR_SCALE: u8 = 8;

/// Largest scale for a line of text
pub const MAX_LINE_SCALE: u8 = 4;

/// Unscaled gap between characters
pub const CHAR_SPACING: u16 = 3;

/// Unscaled gap between lines
pub const LINE_GAP: u16 = 2;

/// Distance from the right edge at which words wrap
pub const LINE_MARGIN: u16 = 10;

/// Cursor width
pub const CURSOR_WIDTH: u16 = 2;

/// Cursor height
pub const CURSOR_HEIGHT: u16 = 14;

/// Half period of the blinking cursor
pub const BLINK_INTERVAL_MS: u32 = 500;

/// Font, colors and scale used to draw text
#[derive(Clone, Copy, Debug)]
pub struct TextStyle<'a> {
    /// Glyph source
    pub font: &'a Font<'a>,
    /// Foreground color
    pub color: Color,
    /// Background color
    pub background: Color,
    /// Integer magnification in both axes
    pub scale: u8,
}

impl<'a> TextStyle<'a> {
    /// Unscaled text in `color` on `background`
    pub fn new(font: &'a Font<'a>, color: Color, background: Color) -> Self {
        Self {
            font,
            color,
            background,
            scale: 1,
        }
    }

    /// Set the magnification
    #[must_use]
    pub fn with_scale(mut self, scale: u8) -> Self {
        self.scale = scale;
        self
    }
}

impl<I> Display<I>
where
    I: DisplayInterface,
{
    /// Draw one character with its top-left corner at `(x, y)`
    ///
    /// The scale is clamped to [`MAX_CHAR_SCALE`]. The character
    /// orientation stays active afterwards if `continuation` is set, so a
    /// caller drawing a run of characters can skip the switch back until
    /// the last one.
    ///
    /// # Errors
    ///
    /// `Error::MissingGlyph` if the font has no glyph for `ch`, before
    /// anything is sent. `Error::InvalidWindow` if the scaled glyph does
    /// not fit on the screen at `(x, y)`.
    pub fn print_char(
        &mut self,
        ch: char,
        x: u16,
        y: u16,
        style: &TextStyle<'_>,
        continuation: bool,
    ) -> DisplayResult<I> {
        let glyph = style.font.glyph(ch).ok_or(Error::MissingGlyph(ch))?;
        let scale = style.scale.clamp(1, MAX_CHAR_SCALE);
        let height = u16::from(style.font.height()) * u16::from(scale);
        let width = glyph.width().saturating_mul(u16::from(scale));

        // Portrait rows count down from the far edge of the exchanged axis
        let column = SCREEN_HEIGHT.checked_sub(y).and_then(|c| c.checked_sub(height));
        let fits = x.checked_add(width).is_some_and(|end| end <= SCREEN_WIDTH);
        let Some(column) = column.filter(|_| fits) else {
            return Err(Error::InvalidWindow {
                x0: x,
                y0: y,
                x1: x.saturating_add(width).saturating_sub(1),
                y1: y.saturating_add(height).saturating_sub(1),
            });
        };

        self.ensure_orientation(Orientation::Character)?;
        self.set_window(column, x, column + height - 1, x + width - 1)?;

        let foreground = style.color.to_be_bytes();
        let background = style.background.to_be_bytes();
        let mut buffer = [0u8; MAX_BURST_PIXELS * 2];
        let mut used = 0;
        for index in 0..glyph.columns().len() {
            for _ in 0..scale {
                for bit in glyph.column_bits(index, style.font.height()) {
                    let word = if bit { foreground } else { background };
                    for _ in 0..scale {
                        if used == buffer.len() {
                            self.write_data(&buffer)?;
                            used = 0;
                        }
                        buffer[used..used + 2].copy_from_slice(&word);
                        used += 2;
                    }
                }
            }
        }
        if used > 0 {
            self.write_data(&buffer[..used])?;
        }

        if !continuation {
            self.ensure_orientation(Orientation::Graphics)?;
        }
        Ok(())
    }

    /// Draw a line of text starting at `(x, y)`, wrapping on spaces
    ///
    /// The scale is clamped to [`MAX_LINE_SCALE`]. A word that would cross
    /// the right margin starts a new line at `x`, unless it is already the
    /// first word of its line. Returns the cursor position after the last
    /// word, ready for [`blink_cursor`](Self::blink_cursor).
    ///
    /// # Errors
    ///
    /// `Error::MissingGlyph` if any character lacks a glyph; a word is
    /// checked as a whole before any of it is drawn.
    pub fn print_line(
        &mut self,
        text: &str,
        x: u16,
        y: u16,
        style: &TextStyle<'_>,
    ) -> Result<(u16, u16), Error<I>> {
        let style = TextStyle {
            scale: style.scale.clamp(1, MAX_LINE_SCALE),
            ..*style
        };
        let scale = u16::from(style.scale);
        let line_height = (u16::from(style.font.height()) + LINE_GAP) * scale;
        let word_gap = style
            .font
            .space_width()
            .saturating_add(CHAR_SPACING)
            .saturating_mul(scale);
        let (mut cx, mut cy) = (x, y);

        for word in text.split(' ') {
            let width = measure_word(style.font, word, scale).map_err(Error::MissingGlyph)?;
            if cx > x && cx.saturating_add(width) > SCREEN_WIDTH - LINE_MARGIN {
                cx = x;
                cy = cy.saturating_add(line_height);
            }
            for ch in word.chars() {
                self.print_char(ch, cx, cy, &style, true)?;
                let advance = style.font.width(ch).unwrap_or(0).saturating_add(CHAR_SPACING);
                cx = cx.saturating_add(advance.saturating_mul(scale));
            }
            cx = cx.saturating_add(word_gap);
        }

        self.ensure_orientation(Orientation::Graphics)?;
        log::trace!("ili9341: text cursor at ({cx},{cy})");
        Ok((cx, cy))
    }

    /// Blink a text cursor at `(x, y)` `times` times
    ///
    /// Each blink shows the cursor in the text color, then the background
    /// color, for [`BLINK_INTERVAL_MS`] each. Blocks for the whole effect.
    pub fn blink_cursor<D: DelayNs>(
        &mut self,
        x: u16,
        y: u16,
        style: &TextStyle<'_>,
        times: u16,
        delay: &mut D,
    ) -> DisplayResult<I> {
        for _ in 0..times {
            self.draw_rect(x, y, CURSOR_WIDTH, CURSOR_HEIGHT, style.color, 0, None)?;
            delay.delay_ms(BLINK_INTERVAL_MS);
            self.draw_rect(x, y, CURSOR_WIDTH, CURSOR_HEIGHT, style.background, 0, None)?;
            delay.delay_ms(BLINK_INTERVAL_MS);
        }
        Ok(())
    }
}

/// Horizontal advance of `word`, or the first character without a glyph
fn measure_word(font: &Font<'_>, word: &str, scale: u16) -> Result<u16, char> {
    word.chars().try_fold(0u16, |total, ch| {
        let width = font.width(ch).ok_or(ch)?;
        Ok(total.saturating_add(width.saturating_add(CHAR_SPACING).saturating_mul(scale)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::tests::test_font;
    use crate::testing::{CountingDelay, test_display};
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn test_print_char_restores_graphics() {
        let font = test_font();
        let style = TextStyle::new(&font, Color::WHITE, Color::BLACK);
        let mut display = test_display();
        display.print_char('I', 10, 20, &style, false).unwrap();
        assert_eq!(display.interface().madctl_writes(), vec![0xE8, 0x48]);
        assert_eq!(display.orientation(), Orientation::Graphics);
    }

    #[test]
    fn test_continuation_keeps_character_orientation() {
        let font = test_font();
        let style = TextStyle::new(&font, Color::WHITE, Color::BLACK);
        let mut display = test_display();
        display.print_char('I', 10, 20, &style, true).unwrap();
        display.print_char('I', 14, 20, &style, true).unwrap();
        assert_eq!(display.interface().madctl_writes(), vec![0xE8]);
        assert_eq!(display.orientation(), Orientation::Character);
    }

    #[test]
    fn test_glyph_window_and_bicolor_stream() {
        let font = test_font();
        let style = TextStyle::new(&font, Color::WHITE, Color::BLACK);
        let mut display = test_display();
        display.print_char('L', 10, 20, &style, false).unwrap();

        // 5 tall at row 20 -> exchanged columns 295..=299, 2 wide at x 10
        assert_eq!(display.interface().windows(), vec![(295, 10, 299, 11)]);
        let stream = display.interface().pixel_stream();
        let on = Color::WHITE.to_be_bytes();
        let off = Color::BLACK.to_be_bytes();
        let expected: Vec<u8> = [on, on, on, on, on, off, off, off, off, on]
            .iter()
            .flatten()
            .copied()
            .collect();
        assert_eq!(stream, expected);
    }

    #[test]
    fn test_scaled_glyph_word_count() {
        let font = test_font();
        let style = TextStyle::new(&font, Color::WHITE, Color::BLACK).with_scale(3);
        let mut display = test_display();
        display.print_char('L', 0, 0, &style, false).unwrap();
        assert_eq!(display.interface().windows(), vec![(305, 0, 319, 5)]);
        assert_eq!(display.interface().pixel_stream().len(), 2 * 3 * 5 * 3 * 2);
    }

    #[test]
    fn test_char_scale_clamped() {
        let font = test_font();
        let style = TextStyle::new(&font, Color::WHITE, Color::BLACK).with_scale(20);
        let mut display = test_display();
        display.print_char('I', 0, 0, &style, false).unwrap();
        // height 5 * 8, width 1 * 8
        assert_eq!(display.interface().windows(), vec![(280, 0, 319, 7)]);
    }

    #[test]
    fn test_missing_glyph_fails_before_any_write() {
        let font = test_font();
        let style = TextStyle::new(&font, Color::WHITE, Color::BLACK);
        let mut display = test_display();
        assert!(matches!(
            display.print_char('?', 0, 0, &style, false),
            Err(Error::MissingGlyph('?'))
        ));
        assert!(matches!(
            display.print_line("LI L?", 0, 0, &style),
            Err(Error::MissingGlyph('?'))
        ));
        // the first word is drawn, the broken one is not started
        assert_eq!(display.interface().windows().len(), 2);
    }

    #[test]
    fn test_char_off_screen_rejected() {
        let font = test_font();
        let style = TextStyle::new(&font, Color::WHITE, Color::BLACK);
        let mut display = test_display();
        assert!(matches!(
            display.print_char('I', 0, 318, &style, false),
            Err(Error::InvalidWindow { .. })
        ));
        assert!(matches!(
            display.print_char('L', 239, 0, &style, false),
            Err(Error::InvalidWindow { .. })
        ));
        assert!(display.interface().events.is_empty());
    }

    #[test]
    fn test_print_line_advances_and_wraps() {
        let font = test_font();
        let style = TextStyle::new(&font, Color::WHITE, Color::BLACK);
        let mut display = test_display();
        // each "IIII" is 4 * (1 + 3) = 16 wide, word gap is 2 + 3 = 5
        let cursor = display.print_line("IIII IIII", 200, 30, &style).unwrap();
        assert_eq!(cursor, (221, 37));

        let columns: Vec<u16> = display.interface().windows().iter().map(|w| w.1).collect();
        assert_eq!(columns, vec![200, 204, 208, 212, 200, 204, 208, 212]);
        assert_eq!(display.interface().madctl_writes(), vec![0xE8, 0x48]);
    }

    #[test]
    fn test_print_line_scale_clamped() {
        let font = test_font();
        let style = TextStyle::new(&font, Color::WHITE, Color::BLACK).with_scale(8);
        let mut display = test_display();
        let cursor = display.print_line("I", 0, 0, &style).unwrap();
        // (1 + 3) * 4 + (2 + 3) * 4
        assert_eq!(cursor, (36, 0));
    }

    #[test]
    fn test_print_line_huge_space_width_saturates() {
        let font = test_font().with_space_width(u16::MAX - 1);
        let style = TextStyle::new(&font, Color::WHITE, Color::BLACK).with_scale(2);
        let mut display = test_display();
        let cursor = display.print_line("I I", 0, 0, &style).unwrap();
        assert_eq!(cursor, (u16::MAX, 14));
        assert_eq!(display.interface().windows().len(), 2);
    }

    #[test]
    fn test_blink_cursor_toggles_colors() {
        let font = test_font();
        let style = TextStyle::new(&font, Color::WHITE, Color::BLACK);
        let mut display = test_display();
        let mut delay = CountingDelay::default();
        display.blink_cursor(50, 60, &style, 2, &mut delay).unwrap();

        assert_eq!(delay.delays_ms, vec![BLINK_INTERVAL_MS; 4]);
        assert_eq!(display.interface().windows(), vec![(50, 60, 51, 73); 4]);
        let streams = display.interface().window_streams();
        assert_eq!(streams[0][..2], Color::WHITE.to_be_bytes());
        assert_eq!(streams[1][..2], Color::BLACK.to_be_bytes());
    }
}

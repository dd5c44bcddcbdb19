//! Bitmap fonts
//!
//! A glyph is a sequence of columns, left to right. Each column is a `u32`
//! holding a marker bit followed by exactly `height` pixel bits, most
//! significant first, top to bottom: `1` is foreground, `0` is background.
//! The marker lets a column keep its leading background pixels.
//!
//! Glyphs live in a fixed table indexed by character code. Every glyph is
//! validated when the font is built, so rendering never meets a malformed
//! bitmap.
//!
//! ## Example
//!
//! ```
//! use ili9341_tft::Font;
//!
//! // 3 pixels tall: marker bit + 3 pixel bits per column
//! const BAR: [u32; 2] = [0b1_111, 0b1_010];
//! const SPACE: [u32; 1] = [0b1_000];
//!
//! let font = match Font::new(3, &[('|', &BAR), (' ', &SPACE)]) {
//!     Ok(font) => font,
//!     Err(_) => return,
//! };
//! assert_eq!(font.width('|'), Some(2));
//! assert_eq!(font.space_width(), 1);
//! ```

use crate::error::FontError;

/// Number of character codes a font can hold
pub const GLYPH_TABLE_SIZE: usize = 128;

/// Tallest glyph a `u32` column can hold next to its marker bit
pub const MAX_FONT_HEIGHT: u8 = 31;

/// Space width used when a font has no glyph for `' '`
pub const DEFAULT_SPACE_WIDTH: u16 = 4;

/// One validated glyph
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Glyph<'a> {
    columns: &'a [u32],
}

impl<'a> Glyph<'a> {
    /// Width in pixels
    pub fn width(self) -> u16 {
        u16::try_from(self.columns.len()).unwrap_or(u16::MAX)
    }

    /// Raw columns, marker bit included
    pub fn columns(self) -> &'a [u32] {
        self.columns
    }

    /// Pixel bits of column `index`, top to bottom
    pub fn column_bits(self, index: usize, height: u8) -> impl Iterator<Item = bool> + 'a {
        let column = self.columns.get(index).copied().unwrap_or(0);
        (0..height).rev().map(move |bit| column & (1 << bit) != 0)
    }
}

/// An immutable bitmap font
#[derive(Clone, Debug)]
pub struct Font<'a> {
    height: u8,
    space_width: u16,
    glyphs: [Option<Glyph<'a>>; GLYPH_TABLE_SIZE],
}

impl<'a> Font<'a> {
    /// Build a font from `(character, columns)` pairs
    ///
    /// The space width is taken from the `' '` glyph if there is one.
    ///
    /// # Errors
    ///
    /// Returns [`FontError`] if the height is out of range, a character
    /// does not fit the glyph table, a glyph is empty or any column does
    /// not carry exactly `height` pixel bits.
    pub fn new(height: u8, glyphs: &[(char, &'a [u32])]) -> Result<Self, FontError> {
        if height == 0 || height > MAX_FONT_HEIGHT {
            return Err(FontError::InvalidHeight(height));
        }

        let mut table = [None; GLYPH_TABLE_SIZE];
        for &(ch, columns) in glyphs {
            let index = ch as usize;
            if index >= GLYPH_TABLE_SIZE {
                return Err(FontError::CodeOutOfRange(ch));
            }
            if columns.is_empty() {
                return Err(FontError::EmptyGlyph(ch));
            }
            let found: usize = columns.iter().map(|&column| pixel_bits(column)).sum();
            let expected = columns.len() * usize::from(height);
            if columns.iter().any(|&column| pixel_bits(column) != usize::from(height)) {
                return Err(FontError::BitCountMismatch {
                    ch,
                    expected,
                    found,
                });
            }
            table[index] = Some(Glyph { columns });
        }

        let space_width = table[usize::from(b' ')].map_or(DEFAULT_SPACE_WIDTH, Glyph::width);
        Ok(Self {
            height,
            space_width,
            glyphs: table,
        })
    }

    /// Override the gap used between words
    #[must_use]
    pub fn with_space_width(mut self, width: u16) -> Self {
        self.space_width = width;
        self
    }

    /// Glyph height in pixels
    pub fn height(&self) -> u8 {
        self.height
    }

    /// Width of the gap between words
    pub fn space_width(&self) -> u16 {
        self.space_width
    }

    /// Glyph for `ch`, if the font has one
    pub fn glyph(&self, ch: char) -> Option<Glyph<'a>> {
        self.glyphs.get(ch as usize).copied().flatten()
    }

    /// Width of the glyph for `ch`
    pub fn width(&self, ch: char) -> Option<u16> {
        self.glyph(ch).map(Glyph::width)
    }
}

/// Bits after the marker
fn pixel_bits(column: u32) -> usize {
    (u32::BITS - column.leading_zeros()).saturating_sub(1) as usize
}

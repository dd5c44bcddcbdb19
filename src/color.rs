//! RGB565 colors
//!
//! The ILI9341 is configured for 16 bits per pixel: 5 bits red, 6 bits green,
//! 5 bits blue, packed as `(r << 11) | (g << 5) | b` and sent most
//! significant byte first.
//!
//! ## Example
//!
//! ```
//! use ili9341_tft::Color;
//!
//! let orange = match Color::new(31, 39, 0) {
//!     Ok(color) => color,
//!     Err(_) => return,
//! };
//! assert_eq!(orange, Color::ORANGE);
//! assert_eq!(Color::RED.to_word(), 0xF800);
//! assert_eq!(Color::RED.to_be_bytes(), [0xF8, 0x00]);
//!
//! // Channels beyond their bit width are rejected, never clamped
//! assert!(Color::new(32, 0, 0).is_err());
//! ```

/// Largest red channel value (5 bits)
pub const MAX_RED: u8 = 0x1F;
/// Largest green channel value (6 bits)
pub const MAX_GREEN: u8 = 0x3F;
/// Largest blue channel value (5 bits)
pub const MAX_BLUE: u8 = 0x1F;

/// A 16-bit RGB565 color
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
}

/// A channel value did not fit its bit width
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ColorError {
    /// Red channel as given
    pub r: u8,
    /// Green channel as given
    pub g: u8,
    /// Blue channel as given
    pub b: u8,
}

impl core::fmt::Display for ColorError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "Color channels out of range: r={} (max {MAX_RED}), g={} (max {MAX_GREEN}), b={} (max {MAX_BLUE})",
            self.r, self.g, self.b
        )
    }
}

impl core::error::Error for ColorError {}

impl Color {
    /// Black (0, 0, 0)
    pub const BLACK: Self = Self::raw(0, 0, 0);
    /// Navy (0, 0, 15)
    pub const NAVY: Self = Self::raw(0, 0, 15);
    /// Dark green (0, 31, 0)
    pub const DARKGREEN: Self = Self::raw(0, 31, 0);
    /// Dark cyan (0, 31, 15)
    pub const DARKCYAN: Self = Self::raw(0, 31, 15);
    /// Maroon (15, 0, 0)
    pub const MAROON: Self = Self::raw(15, 0, 0);
    /// Purple (15, 0, 15)
    pub const PURPLE: Self = Self::raw(15, 0, 15);
    /// Olive (15, 31, 0)
    pub const OLIVE: Self = Self::raw(15, 31, 0);
    /// Light grey (23, 47, 23)
    pub const LIGHTGREY: Self = Self::raw(23, 47, 23);
    /// Dark grey (15, 31, 15)
    pub const DARKGREY: Self = Self::raw(15, 31, 15);
    /// Blue (0, 0, 31)
    pub const BLUE: Self = Self::raw(0, 0, 31);
    /// Green (0, 63, 0)
    pub const GREEN: Self = Self::raw(0, 63, 0);
    /// Cyan (0, 63, 31)
    pub const CYAN: Self = Self::raw(0, 63, 31);
    /// Red (31, 0, 0)
    pub const RED: Self = Self::raw(31, 0, 0);
    /// Magenta (31, 0, 31)
    pub const MAGENTA: Self = Self::raw(31, 0, 31);
    /// Yellow (31, 63, 0)
    pub const YELLOW: Self = Self::raw(31, 63, 0);
    /// White (31, 63, 31)
    pub const WHITE: Self = Self::raw(31, 63, 31);
    /// Orange (31, 39, 0)
    pub const ORANGE: Self = Self::raw(31, 39, 0);
    /// Green-yellow (18, 63, 4)
    pub const GREENYELLOW: Self = Self::raw(18, 63, 4);

    const fn raw(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from its channels
    ///
    /// # Errors
    ///
    /// Returns [`ColorError`] if `r > 31`, `g > 63` or `b > 31`.
    pub const fn new(r: u8, g: u8, b: u8) -> Result<Self, ColorError> {
        if r > MAX_RED || g > MAX_GREEN || b > MAX_BLUE {
            return Err(ColorError { r, g, b });
        }
        Ok(Self::raw(r, g, b))
    }

    /// Unpack a 16-bit RGB565 word
    pub const fn from_word(word: u16) -> Self {
        Self::raw(
            (word >> 11) as u8 & MAX_RED,
            (word >> 5) as u8 & MAX_GREEN,
            word as u8 & MAX_BLUE,
        )
    }

    /// Red channel (0..=31)
    pub const fn r(self) -> u8 {
        self.r
    }

    /// Green channel (0..=63)
    pub const fn g(self) -> u8 {
        self.g
    }

    /// Blue channel (0..=31)
    pub const fn b(self) -> u8 {
        self.b
    }

    /// Pack into a 16-bit RGB565 word
    pub const fn to_word(self) -> u16 {
        ((self.r as u16) << 11) | ((self.g as u16) << 5) | self.b as u16
    }

    /// Packed word in the order the controller expects on the wire
    pub const fn to_be_bytes(self) -> [u8; 2] {
        self.to_word().to_be_bytes()
    }
}

#[cfg(feature = "graphics")]
impl embedded_graphics_core::prelude::PixelColor for Color {
    type Raw = embedded_graphics_core::pixelcolor::raw::RawU16;
}

#[cfg(feature = "graphics")]
impl From<embedded_graphics_core::pixelcolor::Rgb565> for Color {
    fn from(color: embedded_graphics_core::pixelcolor::Rgb565) -> Self {
        use embedded_graphics_core::pixelcolor::RgbColor;
        Self::raw(color.r(), color.g(), color.b())
    }
}

#[cfg(feature = "graphics")]
impl From<Color> for embedded_graphics_core::pixelcolor::Rgb565 {
    fn from(color: Color) -> Self {
        Self::new(color.r, color.g, color.b)
    }
}

#[cfg(feature = "graphics")]
impl From<embedded_graphics_core::pixelcolor::raw::RawU16> for Color {
    fn from(raw: embedded_graphics_core::pixelcolor::raw::RawU16) -> Self {
        use embedded_graphics_core::pixelcolor::raw::RawData;
        Self::from_word(raw.into_inner())
    }
}

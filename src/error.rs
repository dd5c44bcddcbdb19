//! Error types for the driver
//!
//! This module defines error types for configuration building ([`BuilderError`]),
//! display operations ([`Error`]), font construction ([`FontError`]) and
//! bitmap/cache decoding ([`FormatError`]).
//!
//! ## Error Types
//!
//! - [`BuilderError`] - Errors during configuration construction
//! - [`Error`] - Runtime errors during display operations
//! - [`FontError`] - Malformed glyph tables, raised when a font is loaded
//! - [`FormatError`] - Malformed bitmap files or cache artifacts
//! - [`InterfaceError`](crate::interface::InterfaceError) - Low-level hardware communication errors
//! - [`ColorError`](crate::color::ColorError) - Out-of-range color channels
//!
//! ## Example
//!
//! ```
//! use ili9341_tft::{Builder, BuilderError};
//!
//! // Burst sizes must be a multiple of 4 pixels
//! let result = Builder::new().burst_pixels(3).build();
//! assert!(matches!(result, Err(BuilderError::InvalidBurstSize(3))));
//! ```

use crate::interface::DisplayInterface;

/// Errors that can occur when interacting with the display
///
/// Generic over the interface type to preserve the specific error type.
/// This allows error handling code to match on the underlying hardware error.
#[derive(Debug)]
pub enum Error<I: DisplayInterface> {
    /// Interface error (SPI/GPIO)
    ///
    /// Wraps the underlying hardware error from the [`DisplayInterface`] implementation.
    /// Chip-select has already been released when this is returned.
    Interface(I::Error),
    /// Window outside the addressable extent or with start after end
    ///
    /// The extent is 240x320 in graphics and image orientation and
    /// 320x240 in character orientation.
    InvalidWindow {
        /// Start column
        x0: u16,
        /// Start row
        y0: u16,
        /// End column (inclusive)
        x1: u16,
        /// End row (inclusive)
        y1: u16,
    },
    /// The font has no glyph for this character
    MissingGlyph(char),
}

impl<I: DisplayInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(_) => write!(f, "Interface error"),
            Self::InvalidWindow { x0, y0, x1, y1 } => {
                write!(f, "Invalid window: ({x0},{y0})-({x1},{y1})")
            }
            Self::MissingGlyph(ch) => write!(f, "No glyph for character {ch:?}"),
        }
    }
}

impl<I: DisplayInterface + core::fmt::Debug> core::error::Error for Error<I> {}

/// Errors that can occur when building configuration
///
/// These errors occur during the builder pattern before the display is created.
#[derive(Debug)]
pub enum BuilderError {
    /// Burst size is zero, not a multiple of 4 pixels or above the burst buffer
    InvalidBurstSize(usize),
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidBurstSize(pixels) => write!(
                f,
                "Invalid burst size {pixels} (must be a non-zero multiple of {} up to {})",
                crate::config::BURST_GROUP_PIXELS,
                crate::config::MAX_BURST_PIXELS
            ),
        }
    }
}

impl core::error::Error for BuilderError {}

/// Errors raised while loading a font
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontError {
    /// Font height is zero or too tall for a 32-bit glyph column
    InvalidHeight(u8),
    /// Character code outside the glyph table
    CodeOutOfRange(char),
    /// Glyph has no columns
    EmptyGlyph(char),
    /// Glyph bit count differs from `width * height`
    BitCountMismatch {
        /// Character whose glyph is malformed
        ch: char,
        /// `width * height`
        expected: usize,
        /// Bits actually present
        found: usize,
    },
}

impl core::fmt::Display for FontError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidHeight(height) => write!(f, "Invalid font height {height}"),
            Self::CodeOutOfRange(ch) => write!(f, "Character {ch:?} outside the glyph table"),
            Self::EmptyGlyph(ch) => write!(f, "Glyph for {ch:?} has no columns"),
            Self::BitCountMismatch {
                ch,
                expected,
                found,
            } => write!(
                f,
                "Glyph for {ch:?} has {found} bits, expected {expected}"
            ),
        }
    }
}

impl core::error::Error for FontError {}

/// Malformed bitmap source or cache artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatError {
    /// The file does not start with `BM`
    BadSignature([u8; 2]),
    /// Only 16 bits per pixel are supported
    UnsupportedDepth(u16),
    /// Image is empty or larger than the screen
    InvalidSize {
        /// Declared width
        width: u16,
        /// Declared height
        height: u16,
    },
    /// The file ended before the declared data
    Truncated {
        /// Bytes the header promised
        expected: u64,
        /// Bytes available
        found: u64,
    },
    /// Cache artifact length does not match its header
    SizeMismatch {
        /// `4 + width * height * 2`
        expected: u64,
        /// Actual artifact length
        found: u64,
    },
}

impl core::fmt::Display for FormatError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::BadSignature(sig) => write!(f, "Not a valid BMP image (signature {sig:02X?})"),
            Self::UnsupportedDepth(bpp) => write!(f, "Unsupported depth: {bpp} bits per pixel"),
            Self::InvalidSize { width, height } => {
                write!(f, "Invalid image size {width}x{height}")
            }
            Self::Truncated { expected, found } => {
                write!(f, "Truncated data: expected {expected} bytes, found {found}")
            }
            Self::SizeMismatch { expected, found } => write!(
                f,
                "Cache artifact size mismatch: expected {expected} bytes, found {found}"
            ),
        }
    }
}

impl core::error::Error for FormatError {}

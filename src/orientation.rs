//! Memory access orientation modes
//!
//! The ILI9341 writes an incoming pixel stream into its frame memory in an
//! order selected by the memory access control register (MADCTL). Each
//! kind of pixel stream this driver produces is laid out for one order:
//!
//! - **Graphics**: primitives in portrait raster order.
//! - **Character**: glyph bitmaps, stored column by column, written with
//!   rows and columns exchanged.
//! - **Image**: bottom-up bitmap rows, written with rows mirrored.
//!
//! ## Example
//!
//! ```
//! use ili9341_tft::Orientation;
//!
//! assert_eq!(Orientation::Graphics.default_madctl(), 0x48);
//! assert_eq!(Orientation::Character.extent(), (320, 240));
//! ```

use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Row address order (MY)
const MADCTL_MY: u8 = 0x80;
/// Column address order (MX)
const MADCTL_MX: u8 = 0x40;
/// Row/column exchange (MV)
const MADCTL_MV: u8 = 0x20;
/// BGR color filter order
const MADCTL_BGR: u8 = 0x08;

/// Memory access orientation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Orientation {
    /// Portrait raster order used by pixels, lines, rectangles and shapes
    #[default]
    Graphics,
    /// Rows and columns exchanged, used by glyph blits
    Character,
    /// Rows mirrored, used by bottom-up bitmap streams
    Image,
}

impl Orientation {
    /// MADCTL byte for this orientation on a stock panel
    ///
    /// | Mode      | MY | MX | MV | BGR | Value |
    /// |-----------|----|----|----|-----|-------|
    /// | Graphics  | 0  | 1  | 0  | 1   | 0x48  |
    /// | Character | 1  | 1  | 1  | 1   | 0xE8  |
    /// | Image     | 1  | 1  | 0  | 1   | 0xC8  |
    pub const fn default_madctl(self) -> u8 {
        match self {
            Self::Graphics => MADCTL_MX | MADCTL_BGR,
            Self::Character => MADCTL_MY | MADCTL_MX | MADCTL_MV | MADCTL_BGR,
            Self::Image => MADCTL_MY | MADCTL_MX | MADCTL_BGR,
        }
    }

    /// Whether this orientation exchanges rows and columns
    pub const fn swaps_axes(self) -> bool {
        matches!(self, Self::Character)
    }

    /// Addressable (columns, rows) while this orientation is active
    pub const fn extent(self) -> (u16, u16) {
        if self.swaps_axes() {
            (SCREEN_HEIGHT, SCREEN_WIDTH)
        } else {
            (SCREEN_WIDTH, SCREEN_HEIGHT)
        }
    }
}

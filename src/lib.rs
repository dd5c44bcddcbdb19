//! ILI9341 TFT Display Driver
//!
//! A driver for the ILI9341 240x320 TFT controller over a 4-line serial
//! interface, with a small rasterizer, bitmap text and a persistent cache
//! of pre-converted bitmap images.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 support
//! - `embedded-graphics` integration (with `graphics` feature)
//! - Pixels, lines, rectangles, circles and ovals drawn straight into
//!   controller memory
//! - Bitmap fonts with scaling and word wrap
//! - 16-bit BMP rendering with an on-storage cache (with `alloc` feature,
//!   `std::fs` backend with `std` feature)
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use embedded_hal::spi::{Operation, SpiDevice};
//! use ili9341_tft::{Builder, Color, Display, Interface};
//!
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
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let spi = MockSpi;
//! # let dc = MockPin;
//! # let rst = MockPin;
//! # let mut delay = MockDelay;
//! let interface = Interface::new(spi, dc, rst);
//! let config = match Builder::new().gamma_curve(0x01).build() {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//!
//! let mut display = Display::new(interface, config);
//! let _ = display.init(&mut delay);
//! let _ = display.fill_screen(Color::BLACK, 0);
//! let _ = display.draw_circle_filled(120, 160, 40, Color::ORANGE);
//! ```

#![no_std]

#[cfg(any(test, feature = "alloc"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

/// 16-bit BMP header decoding
pub mod bmp;
/// RGB565 colors and the named palette
pub mod color;
/// ILI9341 command definitions
pub mod command;
/// Display configuration types and builder
pub mod config;
/// Core display operations
pub mod display;
/// Pixels, lines and rectangles
pub mod draw;
/// Error types for the driver
pub mod error;
/// Bitmap fonts
pub mod font;
/// Hardware interface abstraction
pub mod interface;
/// Memory access orientation modes
pub mod orientation;
/// Circles and ovals
pub mod shapes;
/// Bitmap text
pub mod text;

/// Image rendering and the image cache (requires `alloc` feature)
#[cfg(feature = "alloc")]
pub mod cache;
/// File storage abstraction (requires `alloc` feature)
#[cfg(feature = "alloc")]
pub mod storage;

/// Graphics support via embedded-graphics (requires `graphics` feature)
#[cfg(feature = "graphics")]
pub mod graphics;

#[cfg(test)]
mod testing;

pub use bmp::BmpHeader;
pub use color::{Color, ColorError};
pub use config::{Builder, Config, SCREEN_HEIGHT, SCREEN_WIDTH};
pub use display::Display;
pub use draw::MAX_LINE_WIDTH;
pub use error::{BuilderError, Error, FontError, FormatError};
pub use font::{Font, Glyph};
pub use interface::{DisplayInterface, Interface, InterfaceError};
pub use orientation::Orientation;
pub use shapes::{ScanSpans, Span};
pub use text::TextStyle;

#[cfg(feature = "alloc")]
pub use cache::{CacheConfig, CacheError, ImageCache, ImageError};
#[cfg(feature = "alloc")]
pub use storage::{Storage, StorageFile};
#[cfg(feature = "std")]
pub use storage::{StdFile, StdStorage};

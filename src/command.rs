//! ILI9341 command definitions
//!
//! This module defines the command bytes used to drive the ILI9341 TFT
//! controller over its 4-line serial interface. Commands are sent with the
//! D/C pin low, their parameters and pixel data with D/C high.
//!
//! ## Command Structure
//!
//! Every transfer follows the pattern:
//! 1. Assert CS (Chip Select)
//! 2. Set D/C low (command) or high (data)
//! 3. Send the bytes
//! 4. Deassert CS
//!
//! ## Example
//!
//! ```rust,no_run
//! use ili9341_tft::{command, DisplayInterface, Interface};
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
//! # let mut interface = Interface::new(MockSpi, MockPin, MockPin);
//! // Soft reset
//! let _ = interface.send_command(command::SOFT_RESET);
//!
//! // Select 16 bits per pixel
//! let _ = interface.send_command(command::PIXEL_FORMAT_SET);
//! let _ = interface.send_data(&[command::PIXEL_FORMAT_16BPP]);
//! ```

// System control commands

/// No operation (0x00)
pub const NOP: u8 = 0x00;

/// Software reset command (0x01)
///
/// Resets the controller registers to their defaults. The controller needs
/// at least 5 ms before accepting the next command.
pub const SOFT_RESET: u8 = 0x01;

/// Read display identification (0x04)
///
/// Returns one dummy byte followed by three identification bytes.
pub const READ_DISPLAY_ID: u8 = 0x04;

/// Enter sleep mode (0x10)
pub const SLEEP_IN: u8 = 0x10;

/// Sleep out (0x11)
///
/// Wakes the controller. Requires 120 ms before sleep-in and ~5 ms before
/// any further command; the init sequence waits longer.
pub const SLEEP_OUT: u8 = 0x11;

/// Display inversion off (0x20)
pub const INVERSION_OFF: u8 = 0x20;

/// Display inversion on (0x21)
pub const INVERSION_ON: u8 = 0x21;

/// Gamma set (0x26)
///
/// Selects one of the built-in gamma curves.
/// Requires 1 byte: 0x01 = curve G2.2
pub const GAMMA_SET: u8 = 0x26;

/// Display off (0x28)
pub const DISPLAY_OFF: u8 = 0x28;

/// Display on (0x29)
pub const DISPLAY_ON: u8 = 0x29;

// Addressing commands

/// Column address set (0x2A)
///
/// Requires 4 bytes: [start_MSB, start_LSB, end_MSB, end_LSB]
pub const COLUMN_ADDRESS_SET: u8 = 0x2A;

/// Page (row) address set (0x2B)
///
/// Requires 4 bytes: [start_MSB, start_LSB, end_MSB, end_LSB]
pub const PAGE_ADDRESS_SET: u8 = 0x2B;

/// Memory write (0x2C)
///
/// Arms the controller to accept a pixel stream into the current window.
/// Any following command ends the stream.
pub const MEMORY_WRITE: u8 = 0x2C;

/// Memory access control (0x36)
///
/// Controls row/column mirroring, row/column exchange and RGB/BGR order.
/// Requires 1 byte:
/// - Bit 7 (MY): row address order
/// - Bit 6 (MX): column address order
/// - Bit 5 (MV): row/column exchange
/// - Bit 4 (ML): vertical refresh order
/// - Bit 3 (BGR): RGB-BGR order
/// - Bit 2 (MH): horizontal refresh order
pub const MEMORY_ACCESS_CONTROL: u8 = 0x36;

/// Pixel format set (0x3A)
///
/// Requires 1 byte. See [`PIXEL_FORMAT_16BPP`].
pub const PIXEL_FORMAT_SET: u8 = 0x3A;

/// 16 bits per pixel on both the RGB and MCU interfaces
pub const PIXEL_FORMAT_16BPP: u8 = 0x55;

/// Entry mode set (0xB7)
///
/// Requires 1 byte: low voltage detection, gate output levels.
pub const ENTRY_MODE_SET: u8 = 0xB7;

//! Core display operations
//!
//! [`Display`] owns the bus interface and the one piece of mutable device
//! state, the active [`Orientation`]. Everything that talks to the
//! controller goes through it, so frames from different callers can never
//! interleave.

use embedded_hal::delay::DelayNs;

use crate::color::Color;
use crate::command::{
    COLUMN_ADDRESS_SET, DISPLAY_OFF, DISPLAY_ON, ENTRY_MODE_SET, GAMMA_SET, INVERSION_OFF,
    INVERSION_ON, MEMORY_ACCESS_CONTROL, MEMORY_WRITE, PAGE_ADDRESS_SET, PIXEL_FORMAT_16BPP,
    PIXEL_FORMAT_SET, READ_DISPLAY_ID, SLEEP_IN, SLEEP_OUT, SOFT_RESET,
};
use crate::config::{Config, MAX_BURST_PIXELS};
use crate::error::Error;
use crate::interface::DisplayInterface;
use crate::orientation::Orientation;

pub(crate) type DisplayResult<I> = core::result::Result<(), Error<I>>;

/// Settle time after switching the display off during init
pub const DISPLAY_OFF_DELAY_MS: u32 = 10;

/// Settle time after a software reset
pub const SOFT_RESET_DELAY_MS: u32 = 50;

/// Settle time after leaving sleep mode
pub const SLEEP_OUT_DELAY_MS: u32 = 100;

/// Settle time after switching the display on
pub const DISPLAY_ON_DELAY_MS: u32 = 100;

/// Settle time after entering sleep mode
pub const SLEEP_IN_DELAY_MS: u32 = 5;

/// Core display driver for the ILI9341
///
/// This struct provides the register protocol: framing, addressing
/// windows, orientation and init sequencing. Drawing primitives, text and
/// images are built on top of it in their own modules.
pub struct Display<I>
where
    I: DisplayInterface,
{
    /// Hardware interface
    interface: I,
    /// Display configuration
    config: Config,
    /// Orientation most recently written to MADCTL
    orientation: Orientation,
    /// Cleared by a hardware reset, which reloads the power-on MADCTL
    orientation_synced: bool,
}

impl<I> Display<I>
where
    I: DisplayInterface,
{
    /// Create a new Display instance
    ///
    /// The graphics orientation is assumed active until [`init`](Self::init)
    /// programs it explicitly.
    pub fn new(interface: I, config: Config) -> Self {
        Self {
            interface,
            config,
            orientation: Orientation::Graphics,
            orientation_synced: true,
        }
    }

    /// Pulse the hardware reset line
    ///
    /// Blocks for the full reset hold and recovery time. The controller
    /// comes back in its power-on portrait layout, so the next
    /// [`ensure_orientation`](Self::ensure_orientation) always writes MADCTL.
    pub fn reset<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.orientation = Orientation::Graphics;
        self.orientation_synced = false;
        self.interface.reset(delay).map_err(Error::Interface)
    }

    /// Reset and initialize the controller
    ///
    /// Sequence: hardware reset, display off, software reset, graphics
    /// orientation, 16-bit pixel format, gamma curve, entry mode, sleep out,
    /// display on, memory write armed. Every step waits its mandated settle
    /// time; none of them may be shortened.
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.reset(delay)?;

        self.write_command(DISPLAY_OFF)?;
        delay.delay_ms(DISPLAY_OFF_DELAY_MS);

        self.write_command(SOFT_RESET)?;
        delay.delay_ms(SOFT_RESET_DELAY_MS);

        self.set_orientation(Orientation::Graphics)?;

        self.write_command(PIXEL_FORMAT_SET)?;
        self.write_data(&[PIXEL_FORMAT_16BPP])?;

        self.write_command(GAMMA_SET)?;
        self.write_data(&[self.config.gamma_curve])?;

        self.write_command(ENTRY_MODE_SET)?;
        self.write_data(&[self.config.entry_mode])?;

        self.write_command(SLEEP_OUT)?;
        delay.delay_ms(SLEEP_OUT_DELAY_MS);

        self.write_command(DISPLAY_ON)?;
        delay.delay_ms(DISPLAY_ON_DELAY_MS);

        self.write_command(MEMORY_WRITE)?;

        log::debug!("ili9341: init complete");
        Ok(())
    }

    /// Send a command byte
    pub fn write_command(&mut self, cmd: u8) -> DisplayResult<I> {
        self.interface.send_command(cmd).map_err(Error::Interface)
    }

    /// Send parameter or pixel bytes
    pub fn write_data(&mut self, data: &[u8]) -> DisplayResult<I> {
        self.interface.send_data(data).map_err(Error::Interface)
    }

    /// Send a command and read its response into `buffer`
    pub fn read_command(&mut self, cmd: u8, buffer: &mut [u8]) -> DisplayResult<I> {
        self.interface
            .read_after_command(cmd, buffer)
            .map_err(Error::Interface)
    }

    /// Read the 24-bit display identification
    ///
    /// Returns the manufacturer, version and module ID bytes; the dummy
    /// byte the controller clocks out first is discarded.
    pub fn read_display_id(&mut self) -> Result<[u8; 3], Error<I>> {
        let mut response = [0u8; 4];
        self.read_command(READ_DISPLAY_ID, &mut response)?;
        Ok([response[1], response[2], response[3]])
    }

    /// Address a rectangular window and arm a memory write
    ///
    /// Coordinates are inclusive and relative to the active orientation.
    /// After this call the controller places the following pixel stream in
    /// raster order inside the window.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidWindow` if the start is after the end or the
    /// end lies outside the extent of the active orientation.
    pub fn set_window(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> DisplayResult<I> {
        let (cols, rows) = self.orientation.extent();
        if x0 > x1 || y0 > y1 || x1 >= cols || y1 >= rows {
            return Err(Error::InvalidWindow { x0, y0, x1, y1 });
        }
        log::trace!("ili9341: window ({x0},{y0})-({x1},{y1})");

        let [x0_hi, x0_lo] = x0.to_be_bytes();
        let [x1_hi, x1_lo] = x1.to_be_bytes();
        self.write_command(COLUMN_ADDRESS_SET)?;
        self.write_data(&[x0_hi, x0_lo, x1_hi, x1_lo])?;

        let [y0_hi, y0_lo] = y0.to_be_bytes();
        let [y1_hi, y1_lo] = y1.to_be_bytes();
        self.write_command(PAGE_ADDRESS_SET)?;
        self.write_data(&[y0_hi, y0_lo, y1_hi, y1_lo])?;

        self.write_command(MEMORY_WRITE)
    }

    /// Write the MADCTL pattern for `orientation`
    ///
    /// Always sends the register, even if the orientation is unchanged.
    pub fn set_orientation(&mut self, orientation: Orientation) -> DisplayResult<I> {
        log::trace!("ili9341: orientation {orientation:?}");
        self.write_command(MEMORY_ACCESS_CONTROL)?;
        self.write_data(&[self.config.madctl(orientation)])?;
        self.orientation = orientation;
        self.orientation_synced = true;
        Ok(())
    }

    /// Switch to `orientation` unless it is already active
    pub fn ensure_orientation(&mut self, orientation: Orientation) -> DisplayResult<I> {
        if self.orientation_synced && self.orientation == orientation {
            return Ok(());
        }
        self.set_orientation(orientation)
    }

    /// Orientation most recently written to the controller
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Stream `count` pixels of one color into the current window
    ///
    /// The color word is replicated into a burst buffer once and sent in
    /// transfers of [`Config::burst_pixels`] pixels.
    pub fn write_repeated(&mut self, color: Color, count: usize) -> DisplayResult<I> {
        let word = color.to_be_bytes();
        let burst = self.config.burst_pixels.clamp(1, MAX_BURST_PIXELS);
        let mut buffer = [0u8; MAX_BURST_PIXELS * 2];
        for pixel in buffer[..burst * 2].chunks_exact_mut(2) {
            pixel.copy_from_slice(&word);
        }

        let mut remaining = count;
        while remaining > 0 {
            let pixels = remaining.min(burst);
            self.write_data(&buffer[..pixels * 2])?;
            remaining -= pixels;
        }
        Ok(())
    }

    /// Enter sleep mode
    pub fn sleep<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.write_command(SLEEP_IN)?;
        delay.delay_ms(SLEEP_IN_DELAY_MS);
        Ok(())
    }

    /// Leave sleep mode
    pub fn wake<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        self.write_command(SLEEP_OUT)?;
        delay.delay_ms(SLEEP_OUT_DELAY_MS);
        Ok(())
    }

    /// Switch the panel output on or off without touching frame memory
    pub fn set_display_on(&mut self, on: bool) -> DisplayResult<I> {
        self.write_command(if on { DISPLAY_ON } else { DISPLAY_OFF })
    }

    /// Enable or disable color inversion
    pub fn set_inverted(&mut self, inverted: bool) -> DisplayResult<I> {
        self.write_command(if inverted { INVERSION_ON } else { INVERSION_OFF })
    }

    /// Access the underlying configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Access the underlying interface
    pub fn interface(&self) -> &I {
        &self.interface
    }

    /// Access the underlying interface mutably
    pub fn interface_mut(&mut self) -> &mut I {
        &mut self.interface
    }

    /// Release the interface
    pub fn release(self) -> I {
        self.interface
    }
}

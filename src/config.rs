//! Display configuration types and builder

pub use crate::error::BuilderError;
use crate::orientation::Orientation;

/// Panel width in pixels in the graphics orientation
pub const SCREEN_WIDTH: u16 = 240;

/// Panel height in pixels in the graphics orientation
pub const SCREEN_HEIGHT: u16 = 320;

/// Largest number of pixels sent in one data transfer by burst fills
pub const MAX_BURST_PIXELS: usize = 128;

/// Pixels per burst group; burst sizes must be a multiple of this
pub const BURST_GROUP_PIXELS: usize = 4;

/// Display configuration
///
/// This struct holds the panel-specific register values used by the
/// ILI9341 init sequence and the orientation switches.
/// Use `Builder` to create a Config.
#[derive(Clone, Debug)]
pub struct Config {
    /// Gamma curve selector (command 0x26)
    pub gamma_curve: u8,
    /// Entry mode byte (command 0xB7)
    pub entry_mode: u8,
    /// MADCTL value for graphics primitives
    pub madctl_graphics: u8,
    /// MADCTL value for glyph blits
    pub madctl_character: u8,
    /// MADCTL value for image streams
    pub madctl_image: u8,
    /// Pixels per data transfer when streaming a solid color
    pub burst_pixels: usize,
}

impl Config {
    /// MADCTL byte written for `orientation`
    pub fn madctl(&self, orientation: Orientation) -> u8 {
        match orientation {
            Orientation::Graphics => self.madctl_graphics,
            Orientation::Character => self.madctl_character,
            Orientation::Image => self.madctl_image,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gamma_curve: 0x01,
            entry_mode: 0x07,
            madctl_graphics: Orientation::Graphics.default_madctl(),
            madctl_character: Orientation::Character.default_madctl(),
            madctl_image: Orientation::Image.default_madctl(),
            burst_pixels: MAX_BURST_PIXELS,
        }
    }
}

/// Builder for constructing display configuration
///
/// # Example
///
/// ```rust,no_run
/// use ili9341_tft::Builder;
///
/// let config = match Builder::new().gamma_curve(0x01).burst_pixels(64).build() {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// let _ = config;
/// ```
#[must_use]
#[derive(Default)]
pub struct Builder {
    config: Config,
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the gamma curve selector
    pub fn gamma_curve(mut self, value: u8) -> Self {
        self.config.gamma_curve = value;
        self
    }

    /// Set the entry mode byte
    pub fn entry_mode(mut self, value: u8) -> Self {
        self.config.entry_mode = value;
        self
    }

    /// Override the MADCTL byte used for one orientation
    ///
    /// Panels wired with BGR/RGB swapped or mirrored glass need different
    /// bits than the defaults.
    pub fn madctl(mut self, orientation: Orientation, value: u8) -> Self {
        match orientation {
            Orientation::Graphics => self.config.madctl_graphics = value,
            Orientation::Character => self.config.madctl_character = value,
            Orientation::Image => self.config.madctl_image = value,
        }
        self
    }

    /// Set the number of pixels sent per data transfer in solid fills
    pub fn burst_pixels(mut self, pixels: usize) -> Self {
        self.config.burst_pixels = pixels;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidBurstSize` if the burst size is zero,
    /// not a multiple of [`BURST_GROUP_PIXELS`] or above [`MAX_BURST_PIXELS`]
    pub fn build(self) -> Result<Config, BuilderError> {
        let pixels = self.config.burst_pixels;
        if pixels == 0 || pixels % BURST_GROUP_PIXELS != 0 || pixels > MAX_BURST_PIXELS {
            return Err(BuilderError::InvalidBurstSize(pixels));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_panel_defaults() {
        let config = Builder::new().build().unwrap();
        assert_eq!(config.gamma_curve, 0x01);
        assert_eq!(config.entry_mode, 0x07);
        assert_eq!(config.madctl(Orientation::Graphics), 0x48);
        assert_eq!(config.madctl(Orientation::Character), 0xE8);
        assert_eq!(config.madctl(Orientation::Image), 0xC8);
        assert_eq!(config.burst_pixels, MAX_BURST_PIXELS);
    }

    #[test]
    fn test_madctl_override() {
        let config = Builder::new()
            .madctl(Orientation::Graphics, 0x40)
            .build()
            .unwrap();
        assert_eq!(config.madctl(Orientation::Graphics), 0x40);
        assert_eq!(config.madctl(Orientation::Image), 0xC8);
    }

    #[test]
    fn test_burst_size_validation() {
        assert!(matches!(
            Builder::new().burst_pixels(0).build(),
            Err(BuilderError::InvalidBurstSize(0))
        ));
        assert!(matches!(
            Builder::new().burst_pixels(6).build(),
            Err(BuilderError::InvalidBurstSize(6))
        ));
        assert!(matches!(
            Builder::new().burst_pixels(MAX_BURST_PIXELS + 4).build(),
            Err(BuilderError::InvalidBurstSize(_))
        ));
        assert!(Builder::new().burst_pixels(4).build().is_ok());
    }
}

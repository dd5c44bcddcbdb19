//! Graphics support via embedded-graphics
//!
//! [`Display`] implements
//! [`DrawTarget`](embedded_graphics_core::draw_target::DrawTarget) directly.
//! The ILI9341 keeps its own frame memory, so there is no buffer to flush:
//! pixels go to the panel as they are drawn. Solid fills map onto one
//! window and burst each, which keeps rectangles and clears fast; single
//! pixels cost a full window set each.
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_graphics::{
//!     prelude::*,
//!     primitives::{Circle, PrimitiveStyle, Rectangle},
//! };
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
//! let _ = display.clear(Color::BLACK);
//!
//! let _ = Rectangle::new(Point::new(10, 10), Size::new(50, 30))
//!     .into_styled(PrimitiveStyle::with_fill(Color::RED))
//!     .draw(&mut display);
//!
//! let _ = Circle::new(Point::new(100, 50), 40)
//!     .into_styled(PrimitiveStyle::with_stroke(Color::WHITE, 2))
//!     .draw(&mut display);
//! ```

use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{Dimensions, OriginDimensions, Size},
    prelude::Pixel,
    primitives::Rectangle,
};

use crate::color::Color;
use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::display::Display;
use crate::error::Error;
use crate::interface::DisplayInterface;

impl<I> DrawTarget for Display<I>
where
    I: DisplayInterface,
{
    type Color = Color;
    type Error = Error<I>;

    fn draw_iter<P>(&mut self, pixels: P) -> Result<(), Self::Error>
    where
        P: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            let (Ok(x), Ok(y)) = (u16::try_from(point.x), u16::try_from(point.y)) else {
                continue;
            };
            self.draw_pixel(x, y, color)?;
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        if area.size.width == 0 || area.size.height == 0 {
            return Ok(());
        }
        // the intersection lies inside the 240x320 screen
        self.fill_rect(
            area.top_left.x as u16,
            area.top_left.y as u16,
            area.size.width as u16,
            area.size.height as u16,
            color,
        )
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill_screen(color, 0)
    }
}

impl<I> OriginDimensions for Display<I>
where
    I: DisplayInterface,
{
    fn size(&self) -> Size {
        Size::new(u32::from(SCREEN_WIDTH), u32::from(SCREEN_HEIGHT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::test_display;
    use alloc::vec;
    use embedded_graphics::{
        prelude::*,
        primitives::{PrimitiveStyle, Rectangle},
    };

    #[test]
    fn test_size_is_portrait_screen() {
        let display = test_display();
        assert_eq!(display.size(), Size::new(240, 320));
    }

    #[test]
    fn test_filled_rectangle_is_one_window() {
        let mut display = test_display();
        Rectangle::new(Point::new(10, 20), Size::new(30, 40))
            .into_styled(PrimitiveStyle::with_fill(Color::RED))
            .draw(&mut display)
            .unwrap();
        assert_eq!(display.interface().windows(), vec![(10, 20, 39, 59)]);
    }

    #[test]
    fn test_fill_solid_clips_to_screen() {
        let mut display = test_display();
        display
            .fill_solid(
                &Rectangle::new(Point::new(-5, 300), Size::new(20, 50)),
                Color::BLUE,
            )
            .unwrap();
        assert_eq!(display.interface().windows(), vec![(0, 300, 14, 319)]);
    }

    #[test]
    fn test_off_screen_pixels_skipped() {
        let mut display = test_display();
        display
            .draw_iter([
                Pixel(Point::new(-1, 0), Color::RED),
                Pixel(Point::new(0, 320), Color::RED),
                Pixel(Point::new(3, 4), Color::GREEN),
            ])
            .unwrap();
        assert_eq!(display.interface().windows(), vec![(3, 4, 4, 5)]);
        assert_eq!(display.interface().pixel_stream(), vec![0x07, 0xE0]);
    }

    #[test]
    fn test_clear_fills_screen() {
        let mut display = test_display();
        DrawTarget::clear(&mut display, Color::WHITE).unwrap();
        assert_eq!(display.interface().windows(), vec![(0, 0, 239, 319)]);
        assert_eq!(display.interface().pixel_stream().len(), 240 * 320 * 2);
    }
}

//! Circles and ovals
//!
//! Shapes are filled by sampling the perimeter once per degree over the
//! right half, top to bottom, and mirroring each sample to the left half.
//! Every time the sampled row moves down, the horizontal span between the
//! mirrored points is filled for all rows passed since the previous
//! sample. Rows that repeat are skipped, so no row is drawn twice.
//!
//! Truncating the parametric coordinates to integers biases the right and
//! lower edges outwards by one pixel; the sampler pulls them back in at
//! 90 degrees and on the lower half.

use core::f32::consts::PI;

use crate::color::Color;
use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::display::{Display, DisplayResult};
use crate::interface::DisplayInterface;

/// Last sampled angle, in degrees
const HALF_TURN: u16 = 180;

/// Point on an ellipse perimeter at `degrees`, clockwise from the top
///
/// `x = cx + rx * sin(deg)`, `y = cy - ry * cos(deg)`, truncated towards
/// zero.
#[allow(clippy::cast_precision_loss)]
pub fn perimeter_point(cx: i32, cy: i32, rx: i32, ry: i32, degrees: u16) -> (i32, i32) {
    let radians = f32::from(degrees) * PI / 180.0;
    let x = cx as f32 + rx as f32 * libm::sinf(radians);
    let y = cy as f32 - ry as f32 * libm::cosf(radians);
    (x as i32, y as i32)
}

/// Filled rows `top..=bottom`, each spanning columns `left..=right`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    /// First row
    pub top: i32,
    /// Last row (inclusive)
    pub bottom: i32,
    /// First column
    pub left: i32,
    /// Last column (inclusive)
    pub right: i32,
}

impl Span {
    fn contains_row(&self, row: i32) -> bool {
        self.top <= row && row <= self.bottom
    }
}

/// Angle-sampled scanline spans of a filled ellipse, top to bottom
#[derive(Clone, Debug)]
pub struct ScanSpans {
    cx: i32,
    cy: i32,
    rx: i32,
    ry: i32,
    degrees: u16,
    last_row: Option<i32>,
}

impl ScanSpans {
    /// Spans of the ellipse centred on `(cx, cy)` with radii `rx`, `ry`
    ///
    /// A non-positive radius yields no spans.
    pub fn new(cx: i32, cy: i32, rx: i32, ry: i32) -> Self {
        let degrees = if rx <= 0 || ry <= 0 { HALF_TURN + 1 } else { 0 };
        Self {
            cx,
            cy,
            rx,
            ry,
            degrees,
            last_row: None,
        }
    }
}

impl Iterator for ScanSpans {
    type Item = Span;

    fn next(&mut self) -> Option<Span> {
        while self.degrees <= HALF_TURN {
            let degrees = self.degrees;
            self.degrees += 1;

            let (mut right, mut row) =
                perimeter_point(self.cx, self.cy, self.rx, self.ry, degrees);
            let (left, _) = perimeter_point(self.cx, self.cy, self.rx, self.ry, 360 - degrees);
            if degrees == 90 {
                right = right.saturating_sub(1);
            }
            if degrees > 89 {
                row = row.saturating_sub(1);
            }

            let top = match self.last_row {
                None => row,
                Some(last) if row > last => last.saturating_add(1),
                Some(_) => continue,
            };
            self.last_row = Some(row);
            return Some(Span {
                top,
                bottom: row,
                left: left.min(right),
                right: left.max(right),
            });
        }
        None
    }
}

impl<I> Display<I>
where
    I: DisplayInterface,
{
    /// Draw a filled circle
    pub fn draw_circle_filled(
        &mut self,
        cx: i32,
        cy: i32,
        radius: u16,
        color: Color,
    ) -> DisplayResult<I> {
        self.draw_oval_filled(cx, cy, radius, radius, color)
    }

    /// Draw a circle outline `border` pixels thick
    pub fn draw_circle(
        &mut self,
        cx: i32,
        cy: i32,
        radius: u16,
        color: Color,
        border: u16,
    ) -> DisplayResult<I> {
        self.draw_oval(cx, cy, radius, radius, color, border)
    }

    /// Draw a filled oval with horizontal radius `rx` and vertical radius `ry`
    pub fn draw_oval_filled(
        &mut self,
        cx: i32,
        cy: i32,
        rx: u16,
        ry: u16,
        color: Color,
    ) -> DisplayResult<I> {
        for span in ScanSpans::new(cx, cy, i32::from(rx), i32::from(ry)) {
            self.fill_span(span.left, span.right, span.top, span.bottom, color)?;
        }
        Ok(())
    }

    /// Draw an oval outline `border` pixels thick
    ///
    /// The ring lies between the full radii and the radii shrunk by
    /// `border`. A border of 0 is drawn as 1; a border reaching the
    /// smaller radius fills the oval.
    pub fn draw_oval(
        &mut self,
        cx: i32,
        cy: i32,
        rx: u16,
        ry: u16,
        color: Color,
        border: u16,
    ) -> DisplayResult<I> {
        let border = border.max(1);
        if border >= rx.min(ry) {
            return self.draw_oval_filled(cx, cy, rx, ry, color);
        }
        let border = i32::from(border);
        let (rx, ry) = (i32::from(rx), i32::from(ry));

        let mut inner = ScanSpans::new(cx, cy, rx - border, ry - border).peekable();
        for outer in ScanSpans::new(cx, cy, rx, ry) {
            for row in outer.top..=outer.bottom {
                while inner.next_if(|span| span.bottom < row).is_some() {}
                match inner.peek() {
                    Some(hole) if hole.contains_row(row) => {
                        self.fill_span(outer.left, hole.left.saturating_sub(1), row, row, color)?;
                        self.fill_span(hole.right.saturating_add(1), outer.right, row, row, color)?;
                    }
                    _ => self.fill_span(outer.left, outer.right, row, row, color)?,
                }
            }
        }
        Ok(())
    }

    /// Fill columns `left..=right` of rows `top..=bottom`, clipped to the screen
    fn fill_span(
        &mut self,
        left: i32,
        right: i32,
        top: i32,
        bottom: i32,
        color: Color,
    ) -> DisplayResult<I> {
        let left = left.max(0);
        let top = top.max(0);
        let right = right.min(i32::from(SCREEN_WIDTH) - 1);
        let bottom = bottom.min(i32::from(SCREEN_HEIGHT) - 1);
        if left > right || top > bottom {
            return Ok(());
        }
        // all four are within the screen now
        self.fill_rect(
            left as u16,
            top as u16,
            (right - left + 1) as u16,
            (bottom - top + 1) as u16,
            color,
        )
    }
}

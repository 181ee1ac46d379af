//! Producer-side drawing surface for the active half
//!
//! A `HalfCanvas` exists only while the hand-off flag is idle. Coordinates
//! are relative to the half: row 0 of the canvas is row `row_offset()` of
//! the virtual frame. Anything outside the half is clipped.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use super::flag::{FlagState, HandoffFlag};
use super::{FrameGeometry, Half, BYTES_PER_PIXEL};

/// Mutable view of the shared region for one drawing pass
pub struct HalfCanvas<'a> {
    pixels: &'a mut [u8],
    geometry: FrameGeometry,
    half: Half,
    flag: &'a HandoffFlag,
}

impl<'a> HalfCanvas<'a> {
    pub(crate) fn new(
        pixels: &'a mut [u8],
        geometry: FrameGeometry,
        half: Half,
        flag: &'a HandoffFlag,
    ) -> Self {
        Self {
            pixels,
            geometry,
            half,
            flag,
        }
    }

    /// Half this pass is drawing
    pub fn half(&self) -> Half {
        self.half
    }

    /// Virtual-frame row that maps to canvas row 0
    pub fn row_offset(&self) -> i32 {
        self.geometry.row_offset(self.half) as i32
    }

    /// Raw pixel bytes (RGB565, big-endian)
    pub fn pixels(&self) -> &[u8] {
        self.pixels
    }

    /// Finish the pass and mark the half ready for transfer
    pub fn publish(self) -> Half {
        self.flag.store(FlagState::Ready(self.half));
        self.half
    }

    fn stride(&self) -> usize {
        self.geometry.width() as usize * BYTES_PER_PIXEL
    }
}

impl OriginDimensions for HalfCanvas<'_> {
    fn size(&self) -> Size {
        Size::new(
            self.geometry.width() as u32,
            self.geometry.half_height() as u32,
        )
    }
}

impl DrawTarget for HalfCanvas<'_> {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let bounds = self.bounding_box();
        let stride = self.stride();

        for Pixel(point, color) in pixels {
            if !bounds.contains(point) {
                continue;
            }
            let offset = point.y as usize * stride + point.x as usize * BYTES_PER_PIXEL;
            self.pixels[offset..offset + BYTES_PER_PIXEL]
                .copy_from_slice(&color.into_storage().to_be_bytes());
        }

        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        let Some(bottom_right) = area.bottom_right() else {
            return Ok(());
        };

        let raw = color.into_storage().to_be_bytes();
        let stride = self.stride();
        let left = area.top_left.x as usize * BYTES_PER_PIXEL;
        let right = (bottom_right.x as usize + 1) * BYTES_PER_PIXEL;

        for y in area.top_left.y..=bottom_right.y {
            let row = y as usize * stride;
            for px in self.pixels[row + left..row + right].chunks_exact_mut(BYTES_PER_PIXEL) {
                px.copy_from_slice(&raw);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GEOMETRY: FrameGeometry = FrameGeometry::new(8, 4);

    fn pixel_at(canvas: &HalfCanvas<'_>, x: usize, y: usize) -> [u8; 2] {
        let offset = y * 8 * 2 + x * 2;
        [canvas.pixels()[offset], canvas.pixels()[offset + 1]]
    }

    #[test]
    fn test_fill_solid_writes_big_endian() {
        let flag = HandoffFlag::new();
        let mut buf = [0u8; 8 * 2 * 2];
        let mut canvas = HalfCanvas::new(&mut buf, GEOMETRY, Half::Top, &flag);

        let color = Rgb565::new(31, 0, 0); // 0xF800
        canvas
            .fill_solid(&Rectangle::new(Point::new(1, 0), Size::new(2, 1)), color)
            .unwrap();

        assert_eq!(pixel_at(&canvas, 0, 0), [0, 0]);
        assert_eq!(pixel_at(&canvas, 1, 0), [0xF8, 0x00]);
        assert_eq!(pixel_at(&canvas, 2, 0), [0xF8, 0x00]);
        assert_eq!(pixel_at(&canvas, 3, 0), [0, 0]);
        assert_eq!(pixel_at(&canvas, 1, 1), [0, 0]);
    }

    #[test]
    fn test_fill_solid_clips_to_half() {
        let flag = HandoffFlag::new();
        let mut buf = [0u8; 8 * 2 * 2];
        let mut canvas = HalfCanvas::new(&mut buf, GEOMETRY, Half::Bottom, &flag);

        let color = Rgb565::new(0, 63, 0);
        canvas
            .fill_solid(&Rectangle::new(Point::new(6, -3), Size::new(5, 4)), color)
            .unwrap();

        // Only row 0, columns 6..8 survive clipping
        let painted = buf.chunks_exact(2).filter(|px| *px != [0, 0]).count();
        assert_eq!(painted, 2);
    }

    #[test]
    fn test_fill_fully_outside_is_noop() {
        let flag = HandoffFlag::new();
        let mut buf = [0u8; 8 * 2 * 2];
        let mut canvas = HalfCanvas::new(&mut buf, GEOMETRY, Half::Top, &flag);

        canvas
            .fill_solid(
                &Rectangle::new(Point::new(0, 5), Size::new(3, 3)),
                Rgb565::WHITE,
            )
            .unwrap();

        assert!(buf.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_draw_iter_skips_out_of_bounds() {
        let flag = HandoffFlag::new();
        let mut buf = [0u8; 8 * 2 * 2];
        let mut canvas = HalfCanvas::new(&mut buf, GEOMETRY, Half::Top, &flag);

        canvas
            .draw_iter([
                Pixel(Point::new(-1, 0), Rgb565::WHITE),
                Pixel(Point::new(7, 1), Rgb565::WHITE),
                Pixel(Point::new(8, 0), Rgb565::WHITE),
            ])
            .unwrap();

        assert_eq!(pixel_at(&canvas, 7, 1), [0xFF, 0xFF]);
        let painted = buf.chunks_exact(2).filter(|px| *px != [0, 0]).count();
        assert_eq!(painted, 1);
    }

    #[test]
    fn test_publish_marks_half_ready() {
        let flag = HandoffFlag::new();
        let mut buf = [0u8; 8 * 2 * 2];
        let canvas = HalfCanvas::new(&mut buf, GEOMETRY, Half::Bottom, &flag);

        assert_eq!(canvas.row_offset(), 2);
        assert_eq!(canvas.publish(), Half::Bottom);
        assert_eq!(flag.load(), FlagState::Ready(Half::Bottom));
    }
}
